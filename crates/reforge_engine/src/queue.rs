//! The set of objects queued for migration.

use indexmap::IndexSet;
use reforge_storage::{Handle, ObjectKey, ObjectStore};

/// Objects awaiting migration, unique and in the order they were queued.
#[derive(Clone, Debug, Default)]
pub struct MigrationQueue {
    keys: IndexSet<ObjectKey>,
}

impl MigrationQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a candidate against `store` and queues every object it names.
    ///
    /// A template queues its root, an aggregate queues each of its roots.
    /// Objects already queued are left where they are. Returns how many
    /// objects were newly queued: 0 when the candidate resolves to nothing.
    pub fn enqueue<S>(&mut self, store: &S, handle: &Handle) -> usize
    where
        S: ObjectStore + ?Sized,
    {
        match store.resolve(handle) {
            Ok(keys) => {
                let added = keys.into_iter().filter(|key| self.keys.insert(key.clone())).count();
                tracing::debug!(%handle, added, "queued candidate");
                added
            }
            Err(err) => {
                tracing::debug!(%handle, error = %err, "candidate did not resolve");
                0
            }
        }
    }

    /// Queues an already resolved object. Returns false if it was queued.
    pub fn push(&mut self, key: ObjectKey) -> bool {
        self.keys.insert(key)
    }

    /// Returns the number of queued objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns true if `key` is queued.
    #[must_use]
    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.keys.contains(key)
    }

    /// Iterates over queued objects in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectKey> {
        self.keys.iter()
    }

    /// Removes every queued object.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl<'a> IntoIterator for &'a MigrationQueue {
    type Item = &'a ObjectKey;
    type IntoIter = indexmap::set::Iter<'a, ObjectKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
