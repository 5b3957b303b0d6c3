//! Integration tests for litellm-router
//!
//! These tests verify the interaction between configuration, registry,
//! selection, classification and cooldown through the public API.

pub mod config_validation_tests;
pub mod error_handling_tests;
pub mod router_tests;
