//! Error handling for the router
//!
//! This module defines the crate-wide error type. Routing decisions use the
//! narrower [`crate::core::router::RouterError`], which converts into
//! [`GatewayError`].

#![allow(missing_docs)]

mod types;

pub use types::{GatewayError, Result};
