//! Instance lifecycle management with generational indices.
//!
//! The `ObjectAllocator` hands out ids for live instances and tracks
//! generations to detect stale handles to destroyed instances.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use reforge_foundation::{Error, ObjectId, Result};

/// Manages instance id allocation and generation tracking.
///
/// Ids are reused from a free list when available. When an instance is
/// destroyed its index goes on the free list and its generation is bumped.
#[derive(Debug, Clone, Default)]
pub struct ObjectAllocator {
    /// Generation counter for each index.
    /// Even generations are free, odd generations are alive.
    generations: Vec<u32>,
    /// Free list of indices available for reuse.
    free_list: Vec<u64>,
    /// Count of live instances.
    live_count: usize,
}

impl ObjectAllocator {
    /// Creates a new empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new id.
    pub fn allocate(&mut self) -> ObjectId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let idx = index as usize;
            // Was even/free, now odd/alive
            self.generations[idx] += 1;
            ObjectId::new(index, self.generations[idx])
        } else {
            let index = self.generations.len() as u64;
            self.generations.push(1);
            ObjectId::new(index, 1)
        }
    }

    /// Releases an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn release(&mut self, id: ObjectId) -> Result<()> {
        self.validate(id)?;

        let idx = id.index as usize;
        self.generations[idx] += 1;
        self.free_list.push(id.index);
        self.live_count -= 1;

        Ok(())
    }

    /// Checks if an id is live.
    #[must_use]
    pub fn is_live(&self, id: ObjectId) -> bool {
        self.validate(id).is_ok()
    }

    /// Validates that an id is live.
    ///
    /// # Errors
    ///
    /// Returns `StaleObject` if the slot was reused or freed, and
    /// `HandleResolution` if the index was never allocated.
    pub fn validate(&self, id: ObjectId) -> Result<()> {
        let Some(&current) = self.generations.get(id.index as usize) else {
            return Err(Error::handle_resolution(format!("instance {id}")));
        };

        if current != id.generation || current % 2 == 0 {
            return Err(Error::stale_object(id));
        }

        Ok(())
    }

    /// Returns the number of live ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over all live ids in index order.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(idx, generation)| ObjectId::new(idx as u64, *generation))
    }
}
