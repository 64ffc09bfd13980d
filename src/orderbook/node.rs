//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` owns a resting `Order` plus the doubly-linked list pointers
//! that thread it into its price level's FIFO queue. Pointers are slab keys
//! (`usize`), never references, so nothing dangles when the slab grows.
//!
//! ## Linked List
//!
//! - `prev`: the next-older order at the same price (None at the head)
//! - `next`: the next-newer order at the same price (None at the tail)
//!
//! Any node can be unlinked in O(1) given its key.

use crate::types::{Order, Side};

/// A resting order stored in the slab.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The resting order (authoritative record)
    pub order: Order,

    /// Next (newer) order in the price level queue
    pub next: Option<usize>,

    /// Previous (older) order in the price level queue
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked node
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node has no neighbours
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.order.side()
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.order.sequence
    }

    /// Fill a portion of this order, returning the quantity filled
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}
