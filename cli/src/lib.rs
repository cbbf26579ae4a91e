//! Presentation layer for the `wordindex` engine: the numbered menu, command parsing and
//! rendering of results as text or JSON.

#[macro_use]
extern crate clap;

pub use crate::command::{Command, CommandError, MENU};
pub use crate::render::{OutputFormat, Renderer};
pub use crate::repl::{Flow, Repl};

pub mod command;
pub mod render;
pub mod repl;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Command(#[from] CommandError),
    #[error("{0}")]
    Query(#[from] wordindex::QueryError),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
