//! Error types for the order book simulator.
//!
//! Only recoverable conditions are represented here. A broken book invariant
//! (an index entry pointing at a missing node, an empty level left behind)
//! is a programming defect and panics instead of returning an error.

use thiserror::Error;

/// Errors returned by the matching engine and its components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Price or quantity was rejected before any state was touched.
    #[error("invalid order: {reason}")]
    InvalidOrder {
        /// Human-readable rejection reason
        reason: String,
    },

    /// No resting order with this id (never existed, filled, or cancelled).
    #[error("order {0} not found")]
    OrderNotFound(u64),

    /// An index entry already exists for this id.
    #[error("order {0} is already indexed")]
    DuplicateOrderId(u64),

    /// A monotonic counter reached its maximum and cannot issue a fresh value.
    #[error("{counter} space exhausted")]
    IdSpaceExhausted {
        /// Which counter overflowed ("order id" or "sequence")
        counter: &'static str,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidOrder`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        EngineError::InvalidOrder {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;
