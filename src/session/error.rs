//! Error types for the delivery session.

use super::Generation;
use crate::directions::RouteFetchError;
use crate::framework::FrameworkError;
use crate::order::OrderError;
use crate::route_cache::{CacheError, RouteLookupError};
use crate::tracking::TrackingError;
use thiserror::Error;

/// Everything a session operation can report back to the presentation layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Local validation failure. No state was changed; the message is user-facing.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The directions provider failed. Nothing was cached or primed.
    #[error("Route fetch failed: {0}")]
    RouteFetch(#[from] RouteFetchError),

    #[error("Route cache error: {0}")]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Order(OrderError),

    /// The active selection has no waypoints, so there is no position to report.
    #[error("No route available for the current selection")]
    EmptyRoute,

    /// A tick for a selection that has since been replaced.
    #[error("Stale tick for generation {requested} (current is {current})")]
    StaleTick {
        requested: Generation,
        current: Generation,
    },

    #[error("No store selected")]
    NoActiveSession,

    /// The session actor could not be reached.
    #[error("Actor communication error: {0}")]
    Actor(#[from] FrameworkError),
}

impl From<RouteLookupError> for SessionError {
    fn from(e: RouteLookupError) -> Self {
        match e {
            RouteLookupError::Fetch(e) => SessionError::RouteFetch(e),
            RouteLookupError::Cache(e) => SessionError::Cache(e),
        }
    }
}

impl From<OrderError> for SessionError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::InvalidSelection(msg) => SessionError::InvalidSelection(msg),
            other => SessionError::Order(other),
        }
    }
}

impl From<TrackingError> for SessionError {
    fn from(e: TrackingError) -> Self {
        match e {
            TrackingError::EmptyRoute => SessionError::EmptyRoute,
        }
    }
}

impl SessionError {
    /// True for errors that say something about the caller's input rather than the system.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, SessionError::InvalidSelection(_) | SessionError::EmptyRoute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_validation_surfaces_as_invalid_selection() {
        let err = SessionError::from(OrderError::InvalidSelection("pick an item".into()));
        assert!(matches!(err, SessionError::InvalidSelection(ref m) if m == "pick an item"));
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_lookup_errors_keep_their_kind() {
        let err = SessionError::from(RouteLookupError::Fetch(RouteFetchError::NoRoutes));
        assert!(matches!(err, SessionError::RouteFetch(RouteFetchError::NoRoutes)));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_stale_tick_message() {
        let err = SessionError::StaleTick {
            requested: Generation(1),
            current: Generation(2),
        };
        assert_eq!(err.to_string(), "Stale tick for generation 1 (current is 2)");
    }
}
