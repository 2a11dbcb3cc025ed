//! Command handlers.
//!
//! Each handler takes the composed `CliContext` and its command arguments.

pub mod browse;
pub mod facets;
pub mod sample;
