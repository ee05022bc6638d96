//! Confirmation of migrations that drop data.

use std::fmt;
use std::sync::Arc;

use reforge_foundation::ComponentTag;
use reforge_storage::ObjectKey;

/// Answer to a confirmation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Apply the migration to this object.
    Proceed,
    /// Leave this object untouched and continue with the next.
    Skip,
    /// Leave this and every remaining object untouched.
    Abort,
}

/// What is about to happen to one object.
#[derive(Clone, Debug)]
pub struct ConfirmRequest<'a> {
    /// The object being migrated.
    pub key: &'a ObjectKey,
    /// Legacy component being replaced.
    pub legacy: &'a ComponentTag,
    /// Replacement component.
    pub replacement: &'a ComponentTag,
    /// Legacy fields that have no place in the replacement.
    pub dropped: &'a [Arc<str>],
}

impl fmt::Display for ConfirmRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replace {} with {} on {}", self.legacy, self.replacement, self.key)?;
        if !self.dropped.is_empty() {
            write!(f, ", dropping ")?;
            for (i, field) in self.dropped.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{field}")?;
            }
        }
        Ok(())
    }
}

/// Decides whether destructive migrations go ahead.
pub trait Confirm {
    /// Asks whether to apply the migration described by `request`.
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Decision;
}

/// A fixed answer to every request.
impl Confirm for Decision {
    fn confirm(&mut self, _request: &ConfirmRequest<'_>) -> Decision {
        *self
    }
}
