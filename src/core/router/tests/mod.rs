//! Router tests module
//!
//! Contains tests for selection, classification, cooldown and routing.
