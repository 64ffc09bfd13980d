//! Order id to locator index.
//!
//! The index never owns order data. A [`Locator`] says which side and price
//! level an order rests at and which slab slot holds it. Entries are created
//! and destroyed in the same call that links/unlinks the slab node, so a
//! locator never outlives its slot.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::types::Side;

/// Where a resting order lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub side: Side,
    /// Level price (fixed-point)
    pub price: u64,
    /// Slab key of the order node
    pub key: usize,
}

/// Maps order ids to locators with O(1) expected operations.
#[derive(Debug, Default)]
pub struct OrderIndex {
    entries: HashMap<u64, Locator>,
}

impl OrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Register a locator. Fails if `id` is already indexed.
    pub fn insert(&mut self, id: u64, locator: Locator) -> EngineResult<()> {
        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(EngineError::DuplicateOrderId(id)),
            Entry::Vacant(slot) => {
                slot.insert(locator);
                Ok(())
            }
        }
    }

    /// Drop the entry for `id`, returning its locator.
    pub fn remove(&mut self, id: u64) -> EngineResult<Locator> {
        self.entries
            .remove(&id)
            .ok_or(EngineError::OrderNotFound(id))
    }

    pub fn lookup(&self, id: u64) -> EngineResult<Locator> {
        self.entries
            .get(&id)
            .copied()
            .ok_or(EngineError::OrderNotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, Locator)> + '_ {
        self.entries.iter().map(|(id, loc)| (*id, *loc))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
