//! # Mock Directions Provider
//!
//! `MockDirections` implements [`DirectionsProvider`] entirely in memory. Queue
//! the responses you expect, hand a clone to the code under test, then assert
//! on [`MockDirections::calls`] or call [`MockDirections::verify`].
//!
//! | Feature | MockDirections | GoogleDirectionsClient |
//! |---------|----------------|------------------------|
//! | **Speed** | Instant | Network round trip |
//! | **Determinism** | 100% | Subject to provider |
//! | **Error Injection** | `return_err` | Hard (quota, bad keys) |
//!
//! ```rust
//! use delivery_tracker::directions::{DirectionsProvider, MockDirections};
//! use delivery_tracker::model::{Address, RouteDescription, RouteRequest, TravelMode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockDirections::new();
//!     mock.expect_directions().return_ok(RouteDescription::single("??"));
//!
//!     let request = RouteRequest {
//!         origin: Address::from("Rua São Mateus, Juiz de Fora, MG"),
//!         destination: Address::from("Rua X"),
//!         mode: TravelMode::Driving,
//!         departure_time: chrono::Utc::now(),
//!     };
//!     let route = mock.directions(&request).await.unwrap();
//!     assert_eq!(route.primary_geometry(), Some("??"));
//!
//!     assert_eq!(mock.calls(), 1);
//!     mock.verify();
//! }
//! ```

use super::{DirectionsProvider, RouteFetchError};
use crate::model::{RouteDescription, RouteRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Result<RouteDescription, RouteFetchError>>,
    requests: Vec<RouteRequest>,
}

/// Expectation-driven provider. Clones share the same queue and call log.
#[derive(Clone, Default)]
pub struct MockDirections {
    state: Arc<Mutex<MockState>>,
}

impl MockDirections {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one `directions` call.
    pub fn expect_directions(&self) -> DirectionsExpectationBuilder {
        DirectionsExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Number of `directions` calls received so far.
    pub fn calls(&self) -> usize {
        self.lock().requests.len()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<RouteRequest> {
        self.lock().requests.clone()
    }

    /// Panics unless all expectations were consumed.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DirectionsProvider for MockDirections {
    async fn directions(&self, request: &RouteRequest) -> Result<RouteDescription, RouteFetchError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        match state.expectations.pop_front() {
            Some(response) => response,
            None => panic!(
                "Unexpected directions request: {} -> {}",
                request.origin, request.destination
            ),
        }
    }
}

/// Builder for `directions` expectations.
pub struct DirectionsExpectationBuilder {
    state: Arc<Mutex<MockState>>,
}

impl DirectionsExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, route: RouteDescription) {
        self.push(Ok(route));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RouteFetchError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<RouteDescription, RouteFetchError>) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.expectations.push_back(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, TravelMode};

    fn request() -> RouteRequest {
        RouteRequest {
            origin: Address::from("Shopping Independência, Juiz de Fora, MG"),
            destination: Address::from("Rua X"),
            mode: TravelMode::Driving,
            departure_time: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mock_returns_queued_responses_in_order() {
        let mock = MockDirections::new();
        mock.expect_directions().return_ok(RouteDescription::single("??"));
        mock.expect_directions().return_err(RouteFetchError::NoRoutes);

        let first = mock.directions(&request()).await;
        let second = mock.directions(&request()).await;

        assert!(first.is_ok());
        assert_eq!(second, Err(RouteFetchError::NoRoutes));
        assert_eq!(mock.calls(), 2);
        assert_eq!(mock.requests()[0].destination, Address::from("Rua X"));
        mock.verify();
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_panics_on_unused_expectation() {
        let mock = MockDirections::new();
        mock.expect_directions().return_ok(RouteDescription::single("??"));
        mock.verify();
    }
}
