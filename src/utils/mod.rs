//! Utility modules for the router
//!
//! ## Module Organization
//!
//! - **error**: Crate-wide error type and `Result` alias
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};
pub use logging::{LogFormat, init_logging};
