//! # Directions Client
//!
//! The contract the core expects from a routing provider, and its adapters.
//!
//! ## Structure
//!
//! - [`DirectionsProvider`] - the seam the route cache calls through
//! - [`google`] - [`GoogleDirectionsClient`], the production adapter
//! - [`mock`] - [`MockDirections`], an expectation-driven provider for tests
//! - [`error`] - [`RouteFetchError`]
//!
//! A provider takes a [`RouteRequest`] and returns a [`RouteDescription`] with at
//! least one alternative, or a [`RouteFetchError`]. Retries and caching are not
//! the provider's business.

pub mod error;
pub mod google;
pub mod mock;

pub use error::*;
pub use google::GoogleDirectionsClient;
pub use mock::MockDirections;

use crate::model::{RouteDescription, RouteRequest};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Fetch the route alternatives for `request`, primary alternative first.
    async fn directions(&self, request: &RouteRequest) -> Result<RouteDescription, RouteFetchError>;
}

#[async_trait]
impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Arc<P> {
    async fn directions(&self, request: &RouteRequest) -> Result<RouteDescription, RouteFetchError> {
        (**self).directions(request).await
    }
}

#[async_trait]
impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Box<P> {
    async fn directions(&self, request: &RouteRequest) -> Result<RouteDescription, RouteFetchError> {
        (**self).directions(request).await
    }
}
