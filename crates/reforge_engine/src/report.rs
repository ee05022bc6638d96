//! Results of a migration run.

use std::fmt;
use std::sync::Arc;

use reforge_foundation::{ComponentTag, Error, Value};
use reforge_storage::ObjectKey;

/// How one field of a replacement component got its value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldChange {
    /// Carried over from the legacy component.
    Mapped {
        /// Replacement field.
        field: Arc<str>,
        /// Value written.
        value: Value,
    },
    /// Not mapped; holds the schema default.
    Defaulted {
        /// Replacement field.
        field: Arc<str>,
        /// Value written.
        value: Value,
    },
    /// Legacy field with no counterpart.
    Dropped {
        /// Legacy field.
        field: Arc<str>,
    },
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapped { field, value } => write!(f, "{field} = {value}"),
            Self::Defaulted { field, value } => write!(f, "{field} = {value} (default)"),
            Self::Dropped { field } => write!(f, "{field} dropped"),
        }
    }
}

/// One legacy component replaced (or planned to be) on an object.
#[derive(Clone, Debug, PartialEq)]
pub struct Replacement {
    /// Tag of the removed component.
    pub legacy: ComponentTag,
    /// Tag of the attached component.
    pub replacement: ComponentTag,
    /// Field-level changes; empty unless change recording is enabled.
    pub changes: Vec<FieldChange>,
}

impl Replacement {
    /// Number of fields carried over from the legacy component.
    #[must_use]
    pub fn mapped(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, FieldChange::Mapped { .. }))
            .count()
    }

    /// Number of legacy fields that were dropped.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, FieldChange::Dropped { .. }))
            .count()
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.legacy, self.replacement)
    }
}

/// What happened to one queued object.
#[derive(Debug)]
pub enum Outcome {
    /// Legacy components were replaced and the change persisted.
    Migrated(Vec<Replacement>),
    /// Dry run: these replacements would be made.
    Planned(Vec<Replacement>),
    /// The object holds no component the run migrates.
    Unchanged,
    /// The confirmer declined; the object is untouched.
    Skipped,
    /// The object could not be migrated and is untouched.
    Failed(Error),
    /// The run was aborted before reaching this object.
    Pending,
}

impl Outcome {
    /// Short lowercase label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Migrated(_) => "migrated",
            Self::Planned(_) => "planned",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
            Self::Failed(_) => "failed",
            Self::Pending => "pending",
        }
    }

    /// Replacements made or planned.
    #[must_use]
    pub fn replacements(&self) -> &[Replacement] {
        match self {
            Self::Migrated(r) | Self::Planned(r) => r,
            _ => &[],
        }
    }
}

/// Outcome of one object within a report.
#[derive(Debug)]
pub struct ObjectReport {
    /// The object.
    pub key: ObjectKey,
    /// What happened to it.
    pub outcome: Outcome,
}

/// Per-outcome object counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Objects migrated.
    pub migrated: usize,
    /// Objects with planned replacements (dry run).
    pub planned: usize,
    /// Objects with nothing to migrate.
    pub unchanged: usize,
    /// Objects the confirmer skipped.
    pub skipped: usize,
    /// Objects that failed.
    pub failed: usize,
    /// Objects not reached before an abort.
    pub pending: usize,
}

impl Summary {
    /// Total number of objects.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.migrated + self.planned + self.unchanged + self.skipped + self.failed + self.pending
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            (self.migrated, "migrated"),
            (self.planned, "planned"),
            (self.unchanged, "unchanged"),
            (self.skipped, "skipped"),
            (self.failed, "failed"),
            (self.pending, "pending"),
        ];
        let mut first = true;
        for (count, label) in parts.into_iter().filter(|(n, _)| *n > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{count} {label}")?;
            first = false;
        }
        if first {
            write!(f, "no objects")?;
        }
        Ok(())
    }
}

/// Everything a migration run did, object by object, in queue order.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Whether the run was a dry run.
    pub dry_run: bool,
    /// Whether the confirmer aborted the run.
    pub aborted: bool,
    objects: Vec<ObjectReport>,
}

impl MigrationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            aborted: false,
            objects: Vec::new(),
        }
    }

    /// Records the outcome of an object.
    pub fn push(&mut self, key: ObjectKey, outcome: Outcome) {
        self.objects.push(ObjectReport { key, outcome });
    }

    /// Returns the per-object outcomes in queue order.
    #[must_use]
    pub fn objects(&self) -> &[ObjectReport] {
        &self.objects
    }

    /// Returns the outcome of an object.
    #[must_use]
    pub fn outcome(&self, key: &ObjectKey) -> Option<&Outcome> {
        self.objects
            .iter()
            .find(|o| &o.key == key)
            .map(|o| &o.outcome)
    }

    /// Returns the objects that failed with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&ObjectKey, &Error)> + '_ {
        self.objects.iter().filter_map(|o| match &o.outcome {
            Outcome::Failed(err) => Some((&o.key, err)),
            _ => None,
        })
    }

    /// Returns true if any object failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Total number of component replacements made or planned.
    #[must_use]
    pub fn replacement_count(&self) -> usize {
        self.objects
            .iter()
            .map(|o| o.outcome.replacements().len())
            .sum()
    }

    /// Counts objects per outcome.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for object in &self.objects {
            let slot = match object.outcome {
                Outcome::Migrated(_) => &mut summary.migrated,
                Outcome::Planned(_) => &mut summary.planned,
                Outcome::Unchanged => &mut summary.unchanged,
                Outcome::Skipped => &mut summary.skipped,
                Outcome::Failed(_) => &mut summary.failed,
                Outcome::Pending => &mut summary.pending,
            };
            *slot += 1;
        }
        summary
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for object in &self.objects {
            write!(f, "{}: {}", object.key, object.outcome.label())?;
            match &object.outcome {
                Outcome::Failed(err) => writeln!(f, " ({err})")?,
                outcome => {
                    writeln!(f)?;
                    for replacement in outcome.replacements() {
                        writeln!(f, "  {replacement}")?;
                        for change in &replacement.changes {
                            writeln!(f, "    {change}")?;
                        }
                    }
                }
            }
        }
        if self.dry_run {
            write!(f, "dry run: ")?;
        }
        write!(f, "{}", self.summary())?;
        if self.aborted {
            write!(f, " (aborted)")?;
        }
        Ok(())
    }
}
