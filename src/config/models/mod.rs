//! Configuration data models
//!
//! This module defines the YAML configuration structures of the router.

#![allow(missing_docs)]

pub mod classifier;
pub mod model_list;
pub mod router;

// Re-export all configuration types
pub use classifier::*;
pub use model_list::*;
pub use router::*;

/// Default ordinary failures per minute before cooldown
pub fn default_allowed_fails() -> u32 {
    3
}

/// Default cooldown in seconds after `allowed_fails` is reached
pub fn default_cooldown_time() -> u64 {
    5
}

/// Default retry attempts after the first one
pub fn default_num_retries() -> u32 {
    2
}

/// Default forced cooldown in seconds when the upstream gives no hint
pub fn default_forced_cooldown_time() -> u64 {
    60
}
