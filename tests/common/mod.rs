//! Common test utilities for litellm-router
//!
//! - Test fixtures for deployments and YAML configurations
//! - Custom assertions and helpers

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{ConfigFixture, DeploymentFactory};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
