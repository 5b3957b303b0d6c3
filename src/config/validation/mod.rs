//! Configuration validation
//!
//! The validation is organized into several submodules:
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Model list validators (entries, deployment IDs, aliases)
//! - `router_validators`: Router settings and classifier rule validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod router_validators;
mod trait_def;

pub use config_validators::{validate_aliases, validate_model_list};
pub use trait_def::Validate;
