//! Component type tags.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies the type of a component (e.g. `OldManip`, `NewManip`).
///
/// Tags compare by name. Cloning is O(1).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComponentTag(Arc<str>);

impl ComponentTag {
    /// Creates a tag from a type name.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentTag({})", self.0)
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ComponentTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ComponentTag {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}
