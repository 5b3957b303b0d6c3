//! Core routing functionality

pub mod router;
