//! Trade record produced by the matching loop.

/// One matched fill between a buy order and a sell order.
///
/// ## Price Discovery
///
/// The trade always executes at the resting order's price. An aggressor
/// never trades at a worse price than the one displayed in the book.
///
/// ## Example
///
/// ```
/// use lob_sim::types::Trade;
///
/// let trade = Trade::new(4, 3, 10_100_000_000, 150);
/// assert_eq!(trade.buy_order_id, 4);
/// assert_eq!(trade.sell_order_id, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trade {
    /// Id of the buying order
    pub buy_order_id: u64,

    /// Id of the selling order
    pub sell_order_id: u64,

    /// Execution price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,
}

impl Trade {
    /// Create a new trade
    pub fn new(buy_order_id: u64, sell_order_id: u64, price: u64, quantity: u64) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
        }
    }

    /// Notional value of this trade (price * quantity)
    ///
    /// The result keeps the price scaling (10^8).
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}
