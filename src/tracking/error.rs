//! Error types for the tracking simulator.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    /// `tick` was called with no waypoints primed: there is no position to report.
    #[error("No route available: the tracker holds no waypoints")]
    EmptyRoute,
}
