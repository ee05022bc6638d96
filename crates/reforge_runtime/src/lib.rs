//! Document files, prompts, and the CLI for Reforge.
//!
//! This crate provides:
//! - [`FileBackend`] - Documents stored as `MessagePack` files in a directory
//! - [`PromptConfirm`] - Terminal confirmation of destructive migrations
//! - CLI argument parsing, logging setup and report rendering
//! - Document serialization and deserialization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
pub mod cli;
pub mod prompt;
pub mod serialize;

pub use backend::FileBackend;
pub use cli::{CliConfig, init_tracing, parse_args, render_report};
pub use prompt::{LineEditor, PromptConfirm, ReadResult, RustylineEditor};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
