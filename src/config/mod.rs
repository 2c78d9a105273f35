//! Application configuration for morio.
//!
//! This module defines the `AppConfig` struct that represents `<root>/morio.yaml`.
//! Unknown fields are ignored and every field has a default, so a missing or
//! empty file yields a usable configuration.

mod model;
mod operations;
pub mod types;


pub use model::AppConfig;
pub use types::AgentPaths;
