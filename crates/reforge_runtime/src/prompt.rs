//! Interactive confirmation of destructive migrations.
//!
//! This module provides a trait-based abstraction over line editing
//! libraries, so the prompt uses rustyline at a terminal while tests can
//! feed it scripted answers.

use reforge_engine::{Confirm, ConfirmRequest, Decision};
use reforge_foundation::{Error, ErrorKind, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<(), DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder().auto_add_history(false).build();
        let editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }
}

const PROMPT: &str = "\x1b[1;33mproceed?\x1b[0m [y]es / [n]o / [a]ll / [q]uit: ";

/// Asks the operator about each destructive migration.
///
/// Answering "all" proceeds with this and every later request without
/// asking again. Ctrl+C, Ctrl+D and editor failures abort the run.
pub struct PromptConfirm<E: LineEditor> {
    editor: E,
    proceed_all: bool,
}

impl<E: LineEditor> PromptConfirm<E> {
    /// Creates a prompt reading answers from `editor`.
    pub fn new(editor: E) -> Self {
        Self {
            editor,
            proceed_all: false,
        }
    }
}

impl PromptConfirm<RustylineEditor> {
    /// Creates a prompt on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal editor cannot be initialized.
    pub fn terminal() -> Result<Self> {
        Ok(Self::new(RustylineEditor::new()?))
    }
}

impl<E: LineEditor> Confirm for PromptConfirm<E> {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Decision {
        if self.proceed_all {
            return Decision::Proceed;
        }
        eprintln!("{request}");
        loop {
            let line = match self.editor.read_line(PROMPT) {
                Ok(ReadResult::Line(line)) => line,
                Ok(ReadResult::Interrupted | ReadResult::Eof) => return Decision::Abort,
                Err(err) => {
                    tracing::error!(error = %err, "confirmation prompt failed");
                    return Decision::Abort;
                }
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Decision::Proceed,
                "n" | "no" => return Decision::Skip,
                "a" | "all" => {
                    self.proceed_all = true;
                    return Decision::Proceed;
                }
                "q" | "quit" => return Decision::Abort,
                other => eprintln!("unrecognized answer '{other}'"),
            }
        }
    }
}
