//! Built-in handlers for the known legacy component types.

pub mod bounds;
pub mod manipulation;

use std::fmt;

use reforge_foundation::ComponentTag;

use crate::handler::MappedHandler;

/// The legacy component types this crate knows how to migrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegacyKind {
    /// `OldManip`, replaced by `NewManip`.
    Manipulation,
    /// `OldBounds`, replaced by `NewBounds`.
    Bounds,
}

impl LegacyKind {
    /// Every known legacy kind.
    pub const ALL: [Self; 2] = [Self::Manipulation, Self::Bounds];

    /// Tag of the legacy component.
    #[must_use]
    pub const fn legacy_name(self) -> &'static str {
        match self {
            Self::Manipulation => manipulation::LEGACY,
            Self::Bounds => bounds::LEGACY,
        }
    }

    /// Tag of the replacement component.
    #[must_use]
    pub const fn replacement_name(self) -> &'static str {
        match self {
            Self::Manipulation => manipulation::REPLACEMENT,
            Self::Bounds => bounds::REPLACEMENT,
        }
    }

    /// Returns the kind whose legacy tag is `tag`.
    #[must_use]
    pub fn from_tag(tag: &ComponentTag) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.legacy_name() == tag.as_str())
    }

    /// Builds the handler for this kind.
    #[must_use]
    pub fn handler(self) -> MappedHandler {
        match self {
            Self::Manipulation => manipulation::handler(),
            Self::Bounds => bounds::handler(),
        }
    }
}

impl fmt::Display for LegacyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.legacy_name(), self.replacement_name())
    }
}
