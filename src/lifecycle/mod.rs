//! Runtime orchestration and lifecycle management.
//!
//! - [`DeliverySystem`] - builds the session from [`Settings`](crate::config::Settings),
//!   spawns its actor and tickers, and shuts them down
//! - [`Ticker`] - periodic tick source for one selection
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod delivery_system;
pub mod ticker;
pub mod tracing;

pub use delivery_system::*;
pub use ticker::*;
pub use tracing::*;
