//! # Route Cache
//!
//! Single-slot cache of the most recently fetched route.
//!
//! ## Overview
//!
//! [`RouteCache::get_or_fetch`] returns the persisted route when it belongs to the
//! requested origin/destination pair, and otherwise asks the
//! [`DirectionsProvider`], persists the answer and returns it. There is no TTL:
//! the slot lives until [`RouteCache::invalidate`] is called, which the session
//! does before fetching for a new selection and once a delivery arrives.
//!
//! ## Structure
//!
//! - [`store`] - [`RouteStore`] trait with file and in-memory slots
//! - [`error`] - [`CacheError`]
//!
//! A failed fetch writes nothing, so the slot is left exactly as it was.

pub mod error;
pub mod store;

pub use error::*;
pub use store::*;

use crate::directions::{DirectionsProvider, RouteFetchError};
use crate::model::{Address, DeparturePolicy, RouteDescription, RouteRequest, TravelMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// The persisted document: the raw provider answer plus the pair it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRoute {
    pub origin: Address,
    pub destination: Address,
    pub fetched_at: DateTime<Utc>,
    pub route: RouteDescription,
}

impl CachedRoute {
    pub fn new(origin: Address, destination: Address, route: RouteDescription) -> Self {
        Self {
            origin,
            destination,
            fetched_at: Utc::now(),
            route,
        }
    }

    pub fn answers(&self, origin: &Address, destination: &Address) -> bool {
        &self.origin == origin && &self.destination == destination
    }
}

/// Why `get_or_fetch` produced no route.
#[derive(Debug, Error)]
pub enum RouteLookupError {
    #[error(transparent)]
    Fetch(#[from] RouteFetchError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Cache in front of a directions provider.
pub struct RouteCache<P, S> {
    provider: P,
    store: S,
    mode: TravelMode,
    departure: DeparturePolicy,
}

impl<P: DirectionsProvider, S: RouteStore> RouteCache<P, S> {
    /// Creates a cache that fetches with a fixed travel `mode`.
    pub fn new(provider: P, store: S, mode: TravelMode, departure: DeparturePolicy) -> Self {
        Self {
            provider,
            store,
            mode,
            departure,
        }
    }

    /// Returns the cached route for the pair, fetching and persisting it on a miss.
    ///
    /// A persisted document for a different pair counts as a miss and is
    /// overwritten. An unreadable document is also treated as a miss.
    #[instrument(skip_all, fields(origin = %origin, destination = %destination))]
    pub async fn get_or_fetch(
        &self,
        origin: &Address,
        destination: &Address,
    ) -> Result<CachedRoute, RouteLookupError> {
        match self.store.load().await {
            Ok(Some(cached)) if cached.answers(origin, destination) => {
                debug!(fetched_at = %cached.fetched_at, "Route cache hit");
                return Ok(cached);
            }
            Ok(Some(_)) => debug!("Cached route belongs to another selection"),
            Ok(None) => debug!("Route cache miss"),
            Err(CacheError::Parse { path, source }) => {
                warn!(path = %path.display(), error = %source, "Ignoring unreadable route cache");
            }
            Err(e) => return Err(e.into()),
        }

        let request = RouteRequest {
            origin: origin.clone(),
            destination: destination.clone(),
            mode: self.mode,
            departure_time: self.departure.departure_time(),
        };
        let route = self.provider.directions(&request).await?;

        let cached = CachedRoute::new(origin.clone(), destination.clone(), route);
        self.store.save(&cached).await?;
        info!(alternatives = cached.route.routes.len(), "Route fetched and cached");
        Ok(cached)
    }

    /// Removes the persisted route unconditionally.
    pub async fn invalidate(&self) -> Result<(), CacheError> {
        self.store.clear().await?;
        debug!("Route cache invalidated");
        Ok(())
    }
}
