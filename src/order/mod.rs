//! # Order Lifecycle
//!
//! The single active order and its four-state status machine:
//!
//! ```text
//! Received -> Preparing -> OutForDelivery -> Delivered
//! ```
//!
//! Within one order the status only moves forward. Confirming starts a new
//! lifecycle, so it is the one place where the status goes back to
//! [`OrderStatus::Received`]. The middle states are labels only: nothing in
//! this crate emits kitchen or dispatch events, the session jumps straight to
//! `Delivered` when the courier arrives.

pub mod error;

pub use error::*;

use crate::catalog::StoreId;
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub enum OrderStatus {
    #[default]
    Received,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Human-readable status line shown to the customer.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Received => "📥 Order received",
            OrderStatus::Preparing => "👨‍🍳 Preparing",
            OrderStatus::OutForDelivery => "🚴 Out for delivery",
            OrderStatus::Delivered => "✅ Delivered",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The customer's one active order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub store_id: StoreId,
    pub item: Option<String>,
    pub confirmed: bool,
    pub status: OrderStatus,
}

impl Order {
    /// Creates the unconfirmed order that goes with a fresh store selection.
    pub fn new(store_id: StoreId) -> Self {
        Self {
            store_id,
            item: None,
            confirmed: false,
            status: OrderStatus::Received,
        }
    }

    /// Places the order for `item` and restarts the lifecycle at `Received`.
    ///
    /// A blank item is rejected and leaves the order untouched.
    pub fn confirm(&mut self, item: &str) -> Result<(), OrderError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(OrderError::InvalidSelection(
                "Please select an item before confirming".into(),
            ));
        }

        self.item = Some(item.to_string());
        self.confirmed = true;
        self.status = OrderStatus::Received;
        info!(store = %self.store_id, item, "Order confirmed");
        Ok(())
    }

    /// Moves to `target`, which must not be behind the current status.
    pub fn advance_to(&mut self, target: OrderStatus) -> Result<(), OrderError> {
        if target < self.status {
            return Err(OrderError::Regression {
                from: self.status,
                to: target,
            });
        }
        if target != self.status {
            debug!(from = ?self.status, to = ?target, "Order status advanced");
            self.status = target;
        }
        Ok(())
    }

    /// Terminal transition taken when the courier arrives.
    pub fn mark_delivered(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        // Delivered is the maximum, so this can never regress.
        let _ = self.advance_to(OrderStatus::Delivered);
    }

    /// `"<item> requested! <status>"`, or just the status before confirmation.
    pub fn status_line(&self) -> String {
        match &self.item {
            Some(item) if self.confirmed => format!("{} requested! {}", item, self.status),
            _ => self.status.to_string(),
        }
    }
}
