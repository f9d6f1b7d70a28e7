//! Clausewise CLI library.
//!
//! This library provides the core functionality for the `clausewise`
//! command-line interface: configuration, provider selection, input
//! staging, command execution and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod provider;
pub mod source;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use provider::ModelProvider;
