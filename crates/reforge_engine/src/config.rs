//! Configuration for migration runs.

/// Configuration for a [`Migrator`](crate::Migrator).
///
/// Controls confirmation of destructive handlers and how much detail the
/// report keeps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Ask the confirmer before applying handlers that drop data.
    /// When false those handlers run like any other.
    pub confirm_destructive: bool,

    /// Record per-field change lists in the report.
    pub record_changes: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            confirm_destructive: true,
            record_changes: true,
        }
    }
}

impl MigrationConfig {
    /// Creates a configuration for an operator at a terminal.
    #[must_use]
    pub fn interactive() -> Self {
        Self::default()
    }

    /// Creates a configuration for batch runs with nobody to ask.
    ///
    /// Destructive handlers are applied without confirmation and the report
    /// only keeps per-object outcomes.
    #[must_use]
    pub fn unattended() -> Self {
        Self {
            confirm_destructive: false,
            record_changes: false,
        }
    }

    /// Builder method to enable/disable confirmation of destructive handlers.
    #[must_use]
    pub fn with_confirm_destructive(mut self, confirm: bool) -> Self {
        self.confirm_destructive = confirm;
        self
    }

    /// Builder method to enable/disable field-level change lists.
    #[must_use]
    pub fn with_record_changes(mut self, record: bool) -> Self {
        self.record_changes = record;
        self
    }
}
