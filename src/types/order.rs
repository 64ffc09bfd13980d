//! Order types for the matching engine.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so the resting book can be
//! encoded deterministically when computing a state root.
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 scaled by 10^8 (see [`crate::types::price`]).
//! Quantities are whole units.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether an order on this side with `limit` crosses a resting
    /// opposite-side price.
    ///
    /// A buy crosses when `limit >= resting`; a sell crosses when
    /// `limit <= resting`.
    #[inline]
    pub fn crosses(self, limit: u64, resting: u64) -> bool {
        match self {
            Side::Buy => limit >= resting,
            Side::Sell => limit <= resting,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// `id` and `sequence` are assigned by the engine on submission and never
/// change afterwards. `remaining` only ever decreases.
///
/// ## Example
///
/// ```
/// use lob_sim::types::{Order, Side};
///
/// let order = Order::new(1, Side::Buy, 9_900_000_000, 100, 1);
/// assert_eq!(order.side(), Side::Buy);
/// assert_eq!(order.remaining, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Limit price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Original quantity
    pub quantity: u64,

    /// Quantity still open, decremented by fills
    pub remaining: u64,

    /// Arrival sequence number, used only for time priority
    pub sequence: u64,
}

impl Order {
    /// Create a new limit order with `remaining == quantity`
    pub fn new(id: u64, side: Side, price: u64, quantity: u64, sequence: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            remaining: quantity,
            sequence,
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).expect("Invalid side_raw")
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity - self.remaining
    }

    /// Fill a portion of this order
    ///
    /// Returns the quantity actually filled, capped at `remaining`.
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
