//! Proxy Common - Shared utilities for HTTP proxy services
//!
//! This crate provides common functionality used across proxy services:
//!
//! - **Initialization**: [`init_tracing`] for standardized logging setup
//! - **Errors**: [`ErrorBody`] envelope and response helpers
//! - **Serving**: [`serve`] with graceful shutdown
//!
//! # Example
//!
//! ```rust,ignore
//! use proxy_common::{init_tracing, serve};
//!
//! init_tracing("search_proxy")?;
//! serve(router, "0.0.0.0:3000".parse()?).await?;
//! ```

pub mod error;
pub mod init;
pub mod serve;

// Re-export commonly used items at crate root
pub use error::{error_response, ErrorBody};
pub use init::init_tracing;
pub use serve::serve;
