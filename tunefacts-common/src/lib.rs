//! # TuneFacts Common Library
//!
//! Shared code for the TuneFacts crates:
//! - Error types
//! - Bootstrap configuration loading (TOML + environment)

pub mod config;
pub mod error;

pub use error::{Error, Result};
