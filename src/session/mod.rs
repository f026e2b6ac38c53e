//! # Delivery Session
//!
//! The one active delivery: selected store, order, cached route and courier
//! position, behind three operations the presentation layer binds to.
//!
//! ```text
//! select_store ──► invalidate? ──► get_or_fetch ──► decode ──► prime
//! confirm_order ─► Order::confirm ─► rewind
//! tick(gen) ─────► DeliveryTracker::tick ─► on arrival: Delivered + invalidate (once)
//! ```
//!
//! ## Generations
//!
//! Each successful selection bumps a [`Generation`]. Ticks carry the
//! generation they were started for; a tick from an older selection is
//! rejected with [`SessionError::StaleTick`] and touches nothing. That is how a
//! ticker started for a previous store stops itself.
//!
//! ## No partial state
//!
//! Validation and fetch failures return before anything is primed. Either a
//! full route is in place for the new selection, or the previous selection
//! is still active.
//!
//! The session is plain data with `async` methods. [`crate::session_actor`]
//! wraps it in a task so callers can share it.

pub mod error;

pub use error::*;

use crate::catalog::{Catalog, MenuEntry, Store, StoreId};
use crate::directions::DirectionsProvider;
use crate::model::{Address, Waypoint, DEFAULT_MAP_CENTER};
use crate::order::{Order, OrderStatus};
use crate::polyline;
use crate::route_cache::{RouteCache, RouteStore};
use crate::tracking::{DeliveryTracker, Progress};
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, info, instrument, warn};

/// Counter identifying one primed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a successful `select_store`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub generation: Generation,
    /// `"Selected store: <name> ⭐ <rating>"`.
    pub store_label: String,
    pub menu: Vec<MenuEntry>,
    /// Zero when the provider's geometry decoded to nothing.
    pub waypoints: usize,
}

/// Point-in-time view of the order and courier, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSnapshot {
    pub generation: Generation,
    pub order: Option<Order>,
    pub label: String,
    pub position: Waypoint,
    pub traveled: Vec<Waypoint>,
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingFrame {
    pub generation: Generation,
    pub position: Waypoint,
    pub traveled: Vec<Waypoint>,
    pub cursor: usize,
    pub progress: Progress,
    pub status: OrderStatus,
}

impl TrackingFrame {
    /// Courier marker as `[lat, lng]`.
    pub fn marker(&self) -> [f64; 2] {
        self.position.to_pair()
    }

    /// Traveled path as `[lat, lng]` pairs, oldest first.
    pub fn polyline(&self) -> Vec<[f64; 2]> {
        self.traveled.iter().map(|w| w.to_pair()).collect()
    }

    pub fn has_arrived(&self) -> bool {
        self.progress.has_arrived()
    }
}

struct ActiveSelection {
    store: Store,
    origin: Address,
    destination: Address,
    order: Order,
}

pub struct DeliverySession<P, S> {
    catalog: Catalog,
    cache: RouteCache<P, S>,
    tracker: DeliveryTracker,
    active: Option<ActiveSelection>,
    generation: Generation,
}

impl<P: DirectionsProvider, S: RouteStore> DeliverySession<P, S> {
    pub fn new(catalog: Catalog, cache: RouteCache<P, S>) -> Self {
        Self {
            catalog,
            cache,
            tracker: DeliveryTracker::new(),
            active: None,
            generation: Generation::default(),
        }
    }

    /// Selects a store and delivery address, then fetches and primes the route.
    ///
    /// Re-selecting the active pair reuses the cached route. Any other pair
    /// invalidates the cache before fetching.
    #[instrument(skip(self), fields(store = %store_id))]
    pub async fn select_store(
        &mut self,
        store_id: &StoreId,
        address: &Address,
    ) -> Result<Selection, SessionError> {
        let store = self
            .catalog
            .get(store_id)
            .cloned()
            .ok_or_else(|| SessionError::InvalidSelection(format!("Unknown store: {store_id}")))?;
        if address.is_blank() {
            return Err(SessionError::InvalidSelection(
                "Please enter a delivery address".into(),
            ));
        }

        let origin = Address::new(store.address.clone());
        let destination = address.clone();

        let reselected = self
            .active
            .as_ref()
            .is_some_and(|a| a.origin == origin && a.destination == destination);
        if !reselected {
            self.cache.invalidate().await?;
        }

        let cached = self.cache.get_or_fetch(&origin, &destination).await?;
        let waypoints = cached
            .route
            .primary_geometry()
            .map(polyline::decode)
            .unwrap_or_default();

        if waypoints.is_empty() {
            warn!("Route geometry decoded to no waypoints");
            self.cache.invalidate().await?;
        }

        let count = waypoints.len();
        self.tracker.prime(waypoints);
        self.generation = self.generation.next();

        let selection = Selection {
            generation: self.generation,
            store_label: store.selected_label(),
            menu: store.menu_entries(),
            waypoints: count,
        };
        self.active = Some(ActiveSelection {
            order: Order::new(store.id.clone()),
            store,
            origin,
            destination,
        });

        info!(generation = %self.generation, waypoints = count, "Store selected");
        Ok(selection)
    }

    /// Confirms `item` for the active store and restarts tracking from the pickup.
    #[instrument(skip(self))]
    pub fn confirm_order(&mut self, item: &str) -> Result<OrderSnapshot, SessionError> {
        let active = self.active.as_mut().ok_or_else(|| {
            SessionError::InvalidSelection("Please select a store first".into())
        })?;

        let item = item.trim();
        if !item.is_empty() && !active.store.has_item(item) {
            return Err(SessionError::InvalidSelection(format!(
                "{item} is not on the {} menu",
                active.store.id
            )));
        }

        active.order.confirm(item)?;
        self.tracker.rewind();
        Ok(self.snapshot())
    }

    /// Advances the courier by one waypoint for the selection `generation`.
    pub async fn tick(&mut self, generation: Generation) -> Result<TrackingFrame, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        if generation != self.generation {
            return Err(SessionError::StaleTick {
                requested: generation,
                current: self.generation,
            });
        }

        let step = self.tracker.tick(active.order.confirmed)?;
        debug!(%generation, cursor = step.cursor, progress = ?step.progress, "Tick");

        if step.progress == Progress::JustArrived {
            active.order.mark_delivered();
            // The frame is still valid if removal fails; a later selection clears the slot.
            if let Err(e) = self.cache.invalidate().await {
                warn!(error = %e, "Failed to invalidate route cache after arrival");
            }
            info!(%generation, "Delivery completed");
        }

        Ok(TrackingFrame {
            generation,
            position: step.position,
            traveled: step.traveled,
            cursor: step.cursor,
            progress: step.progress,
            status: active.order.status,
        })
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        let order = self.active.as_ref().map(|a| a.order.clone());
        let label = order
            .as_ref()
            .map(Order::status_line)
            .unwrap_or_else(|| "Select a store to start".to_string());
        let cursor = self.tracker.cursor();
        let traveled = self
            .tracker
            .waypoints()
            .get(..=cursor)
            .map(<[Waypoint]>::to_vec)
            .unwrap_or_default();

        OrderSnapshot {
            generation: self.generation,
            order,
            label,
            position: self.tracker.position().unwrap_or(DEFAULT_MAP_CENTER),
            traveled,
        }
    }

    /// Menu of the selected store, empty before any selection.
    pub fn menu(&self) -> Vec<MenuEntry> {
        self.active
            .as_ref()
            .map(|a| a.store.menu_entries())
            .unwrap_or_default()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}
