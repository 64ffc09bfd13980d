//! Order id and arrival sequence allocation.
//!
//! Two independent counters, both starting at 1:
//!
//! - **order ids** identify orders to callers (and to `cancel`)
//! - **sequence numbers** only break ties by arrival time within a level
//!
//! Neither counter ever repeats or goes backwards. When either would
//! overflow, allocation fails without advancing anything.

use crate::error::{EngineError, EngineResult};

/// Issues unique, strictly increasing order ids and sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceAllocator {
    next_order_id: u64,
    next_sequence: u64,
}

impl Default for SequenceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceAllocator {
    /// Create an allocator whose first id and first sequence are both 1
    pub fn new() -> Self {
        Self::starting_at(1, 1)
    }

    /// Create an allocator that resumes from the given counters
    pub fn starting_at(next_order_id: u64, next_sequence: u64) -> Self {
        Self {
            next_order_id,
            next_sequence,
        }
    }

    /// Issue the next order id
    pub fn next_order_id(&mut self) -> EngineResult<u64> {
        bump(&mut self.next_order_id, "order id")
    }

    /// Issue the next sequence number
    pub fn next_sequence(&mut self) -> EngineResult<u64> {
        bump(&mut self.next_sequence, "sequence")
    }

    /// Issue an (order id, sequence) pair for a new order.
    ///
    /// Both counters are checked before either advances, so a failure
    /// leaves the allocator untouched.
    pub fn allocate(&mut self) -> EngineResult<(u64, u64)> {
        if self.next_order_id == u64::MAX {
            return Err(EngineError::IdSpaceExhausted { counter: "order id" });
        }
        if self.next_sequence == u64::MAX {
            return Err(EngineError::IdSpaceExhausted { counter: "sequence" });
        }
        Ok((self.next_order_id()?, self.next_sequence()?))
    }

    /// The id the next submission will receive
    #[inline]
    pub fn peek_order_id(&self) -> u64 {
        self.next_order_id
    }

    /// The sequence number the next submission will receive
    #[inline]
    pub fn peek_sequence(&self) -> u64 {
        self.next_sequence
    }
}

// u64::MAX is the exhausted sentinel and is never issued.
fn bump(counter: &mut u64, name: &'static str) -> EngineResult<u64> {
    let value = *counter;
    if value == u64::MAX {
        return Err(EngineError::IdSpaceExhausted { counter: name });
    }
    *counter = value + 1;
    Ok(value)
}
