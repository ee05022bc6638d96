//! The migration engine.
//!
//! Objects are migrated one at a time. For each object every replacement is
//! computed first, then applied and persisted; if anything fails after the
//! first mutation the object is rolled back and the unsaved edits of its
//! backing representation are discarded. A failing object never stops the
//! run.

use std::sync::Arc;

use reforge_foundation::{ComponentTag, Error, ErrorContext, Fields};
use reforge_storage::{Component, ComponentSet, ObjectKey, ObjectStore};

use crate::config::MigrationConfig;
use crate::confirm::{Confirm, ConfirmRequest, Decision};
use crate::handler::MigrationHandler;
use crate::queue::MigrationQueue;
use crate::registry::HandlerRegistry;
use crate::report::{FieldChange, MigrationReport, Outcome, Replacement};

/// Which legacy components a run migrates.
#[derive(Clone, Copy, Debug)]
enum Scope<'a> {
    /// Only components with this tag.
    One(&'a ComponentTag),
    /// Every component with a registered handler.
    All,
}

/// A replacement computed but not yet applied.
struct Step<'h> {
    handler: &'h dyn MigrationHandler,
    old: Component,
    new: Component,
    record: Replacement,
}

/// Result of migrating one object.
enum Flow {
    Continue(Outcome),
    Abort,
}

/// Runs handlers over queued objects and persists the results.
pub struct Migrator {
    registry: HandlerRegistry,
    config: MigrationConfig,
    confirm: Box<dyn Confirm>,
}

impl Migrator {
    /// Creates a migrator with the default configuration.
    ///
    /// Until a confirmer is installed with [`Migrator::with_confirm`],
    /// objects that need confirmation are skipped.
    #[must_use]
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            config: MigrationConfig::default(),
            confirm: Box::new(Decision::Skip),
        }
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }

    /// Builder method to set the confirmer for destructive handlers.
    #[must_use]
    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Returns the handler registry.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Replaces every `legacy` component on the queued objects.
    ///
    /// With `dry_run` the store is only read and the report lists the
    /// planned replacements. Objects without a `legacy` component are
    /// reported unchanged; if no handler is registered for `legacy`, every
    /// object holding one is reported failed.
    pub fn migrate<S>(
        &mut self,
        store: &mut S,
        queue: &MigrationQueue,
        legacy: &ComponentTag,
        dry_run: bool,
    ) -> MigrationReport
    where
        S: ObjectStore + ?Sized,
    {
        let span = tracing::info_span!("migrate", handler = %legacy, dry_run);
        let _enter = span.enter();
        if !self.registry.contains(legacy) {
            tracing::warn!(handler = %legacy, "no handler registered");
        }
        self.run(store, queue, Scope::One(legacy), dry_run)
    }

    /// Replaces every component that has a registered handler.
    pub fn migrate_all<S>(
        &mut self,
        store: &mut S,
        queue: &MigrationQueue,
        dry_run: bool,
    ) -> MigrationReport
    where
        S: ObjectStore + ?Sized,
    {
        let span = tracing::info_span!("migrate_all", handlers = self.registry.len(), dry_run);
        let _enter = span.enter();
        self.run(store, queue, Scope::All, dry_run)
    }

    fn run<S>(
        &mut self,
        store: &mut S,
        queue: &MigrationQueue,
        scope: Scope<'_>,
        dry_run: bool,
    ) -> MigrationReport
    where
        S: ObjectStore + ?Sized,
    {
        let mut report = MigrationReport::new(dry_run);
        let mut keys = queue.iter();

        for key in keys.by_ref() {
            match self.migrate_object(store, key, scope, dry_run) {
                Flow::Continue(outcome) => {
                    match &outcome {
                        Outcome::Failed(err) => tracing::warn!(%key, error = %err, "migration failed"),
                        outcome => tracing::debug!(%key, outcome = outcome.label(), "object done"),
                    }
                    report.push(key.clone(), outcome);
                }
                Flow::Abort => {
                    tracing::info!(%key, "run aborted");
                    report.aborted = true;
                    report.push(key.clone(), Outcome::Pending);
                    break;
                }
            }
        }
        for key in keys {
            report.push(key.clone(), Outcome::Pending);
        }

        tracing::info!(summary = %report.summary(), "migration finished");
        report
    }

    fn migrate_object<S>(
        &mut self,
        store: &mut S,
        key: &ObjectKey,
        scope: Scope<'_>,
        dry_run: bool,
    ) -> Flow
    where
        S: ObjectStore + ?Sized,
    {
        let components = match store.components(key) {
            Ok(components) => components,
            Err(err) => return Flow::Continue(Outcome::Failed(err)),
        };

        let Self {
            registry,
            config,
            confirm,
        } = self;

        let steps = match plan(registry, config, key, &components, scope) {
            Ok(steps) if steps.is_empty() => return Flow::Continue(Outcome::Unchanged),
            Ok(steps) => steps,
            Err(err) => return Flow::Continue(Outcome::Failed(err)),
        };

        if !dry_run && config.confirm_destructive {
            for step in steps.iter().filter(|s| s.handler.requires_confirmation()) {
                let dropped = step.handler.dropped_fields(&step.old);
                let request = ConfirmRequest {
                    key,
                    legacy: &step.record.legacy,
                    replacement: &step.record.replacement,
                    dropped: &dropped,
                };
                match confirm.confirm(&request) {
                    Decision::Proceed => {}
                    Decision::Skip => return Flow::Continue(Outcome::Skipped),
                    Decision::Abort => return Flow::Abort,
                }
            }
        }

        if dry_run {
            let planned = steps.into_iter().map(|s| s.record).collect();
            return Flow::Continue(Outcome::Planned(planned));
        }

        Flow::Continue(match apply(store, key, steps) {
            Ok(replacements) => Outcome::Migrated(replacements),
            Err(err) => Outcome::Failed(err),
        })
    }
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Computes every replacement for one object without touching the store.
fn plan<'h>(
    registry: &'h HandlerRegistry,
    config: &MigrationConfig,
    key: &ObjectKey,
    components: &ComponentSet,
    scope: Scope<'_>,
) -> reforge_foundation::Result<Vec<Step<'h>>> {
    let handlers: Vec<&dyn MigrationHandler> = match scope {
        Scope::One(tag) if components.has(tag) => vec![registry.lookup(tag)?],
        Scope::One(_) => Vec::new(),
        Scope::All => components
            .tags()
            .filter_map(|tag| registry.lookup(tag).ok())
            .collect(),
    };

    let mut steps: Vec<Step<'h>> = Vec::with_capacity(handlers.len());
    for handler in handlers {
        let legacy = handler.legacy_tag();
        let replacement = handler.replacement_tag();
        let context = || {
            ErrorContext::new()
                .with_source(key.to_string())
                .with_frame(format!("migrate {legacy}"))
        };

        let taken = components.has(replacement)
            || steps.iter().any(|s| &s.record.replacement == replacement);
        if taken {
            return Err(Error::component_exists(key.to_string(), replacement.clone())
                .with_context(context()));
        }

        let old = components
            .get(legacy)
            .cloned()
            .ok_or_else(|| Error::component_not_found(key.to_string(), legacy.clone()))?;
        let new = handler
            .migrate(&old)
            .map_err(|err| err.with_context(context()))?;
        let changes = if config.record_changes {
            field_changes(handler, &old, &new)
        } else {
            Vec::new()
        };

        steps.push(Step {
            handler,
            record: Replacement {
                legacy: legacy.clone(),
                replacement: replacement.clone(),
                changes,
            },
            old,
            new,
        });
    }
    Ok(steps)
}

/// Lists which replacement fields were mapped or defaulted, and which legacy
/// fields were dropped.
fn field_changes(
    handler: &dyn MigrationHandler,
    old: &Component,
    new: &Component,
) -> Vec<FieldChange> {
    let mapped = handler.map_fields(old).unwrap_or_else(|_| Fields::new());
    let mut changes: Vec<FieldChange> = new
        .fields
        .iter()
        .map(|(field, value)| {
            let field = Arc::clone(field);
            let value = value.clone();
            if mapped.contains_key(&field) {
                FieldChange::Mapped { field, value }
            } else {
                FieldChange::Defaulted { field, value }
            }
        })
        .collect();
    changes.extend(
        handler
            .dropped_fields(old)
            .into_iter()
            .map(|field| FieldChange::Dropped { field }),
    );
    changes
}

/// Applies planned replacements and saves the object's representation.
fn apply<S>(
    store: &mut S,
    key: &ObjectKey,
    steps: Vec<Step<'_>>,
) -> reforge_foundation::Result<Vec<Replacement>>
where
    S: ObjectStore + ?Sized,
{
    let mut applied: Vec<Step<'_>> = Vec::with_capacity(steps.len());
    for step in steps {
        if let Err(err) = store.replace_component(key, &step.record.legacy, step.new.clone()) {
            rollback(store, key, applied);
            return Err(err);
        }
        applied.push(step);
    }

    if let Err(err) = store.save(&key.origin) {
        match key.origin.path() {
            None => rollback(store, key, applied),
            Some(_) => store.discard(&key.origin),
        }
        return Err(err);
    }
    Ok(applied.into_iter().map(|s| s.record).collect())
}

/// Restores the legacy components of applied steps, newest first, then drops
/// any staged edits.
fn rollback<S>(store: &mut S, key: &ObjectKey, applied: Vec<Step<'_>>)
where
    S: ObjectStore + ?Sized,
{
    for step in applied.into_iter().rev() {
        if let Err(err) = store.replace_component(key, &step.record.replacement, step.old) {
            tracing::error!(%key, error = %err, "rollback failed");
        }
    }
    store.discard(&key.origin);
}
