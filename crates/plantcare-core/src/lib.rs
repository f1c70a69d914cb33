//! Core types and utilities for the plantcare workspace.
//!
//! This crate provides the foundational types, the error type, the analysis
//! configuration and the disease knowledge base used across the plantcare
//! project.

pub mod cli;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod types;

pub use cli::{load_toml_config, setup_cli_logging};
pub use config::*;
pub use error::{Error, Result};
pub use knowledge::*;
pub use types::*;
