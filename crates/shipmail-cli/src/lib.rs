//! Shipmail CLI library.
//!
//! Configuration loading, console diagnostics and report rendering for the
//! `shipmail` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod observer;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use observer::ConsoleObserver;
pub use output::{render_markdown, Formatter};
