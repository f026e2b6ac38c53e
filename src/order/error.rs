//! Error types for the order lifecycle.

use super::OrderStatus;
use thiserror::Error;

/// Errors that can occur while placing or advancing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Local validation failure; the message is meant for the customer.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The status sequence only moves forward within one order.
    #[error("Order status cannot move from {from:?} back to {to:?}")]
    Regression { from: OrderStatus, to: OrderStatus },
}
