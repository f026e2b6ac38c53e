//! # Delivery Tracking Simulator
//!
//! Moves a simulated courier along a decoded route, one waypoint per tick.
//!
//! The whole state is the waypoint list and a cursor into it. Speed is
//! "one waypoint per tick": no elapsed-time or distance weighting. Swapping in
//! interpolation later only changes [`DeliveryTracker::tick`], not what it
//! returns.
//!
//! ## Tick rules
//!
//! - Order not confirmed: nothing moves, the last position is reported again.
//! - Cursor before the last waypoint: advance by exactly one.
//! - Cursor on the last waypoint: stay put. The first such tick reports
//!   [`Progress::JustArrived`], every later one [`Progress::Arrived`].
//! - No waypoints: [`TrackingError::EmptyRoute`], never an index panic.

pub mod error;

pub use error::*;

use crate::model::Waypoint;
use serde::Serialize;
use tracing::{debug, info};

/// Where the courier stands relative to the end of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Progress {
    /// Tick ignored because the order is not confirmed yet.
    AwaitingConfirmation,
    EnRoute,
    /// First tick that found the courier on the last waypoint.
    JustArrived,
    /// Any later tick after arrival.
    Arrived,
}

impl Progress {
    pub fn has_arrived(&self) -> bool {
        matches!(self, Progress::JustArrived | Progress::Arrived)
    }
}

/// What one tick reports: the marker position and the path behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingStep {
    pub position: Waypoint,
    /// Waypoints `0..=cursor`.
    pub traveled: Vec<Waypoint>,
    pub cursor: usize,
    pub progress: Progress,
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryTracker {
    waypoints: Vec<Waypoint>,
    cursor: usize,
    arrived: bool,
}

impl DeliveryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the route and rewinds the cursor to the first waypoint.
    pub fn prime(&mut self, waypoints: Vec<Waypoint>) {
        debug!(waypoints = waypoints.len(), "Tracker primed");
        self.waypoints = waypoints;
        self.rewind();
    }

    /// Starts the current route over from the first waypoint.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.arrived = false;
    }

    pub fn tick(&mut self, confirmed: bool) -> Result<TrackingStep, TrackingError> {
        let last = self
            .waypoints
            .len()
            .checked_sub(1)
            .ok_or(TrackingError::EmptyRoute)?;

        let progress = if !confirmed {
            Progress::AwaitingConfirmation
        } else if self.cursor < last {
            self.cursor += 1;
            Progress::EnRoute
        } else if !self.arrived {
            self.arrived = true;
            info!(cursor = self.cursor, "Courier arrived");
            Progress::JustArrived
        } else {
            Progress::Arrived
        };

        Ok(TrackingStep {
            position: self.waypoints[self.cursor],
            traveled: self.waypoints[..=self.cursor].to_vec(),
            cursor: self.cursor,
            progress,
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Current courier position, `None` when no route is primed.
    pub fn position(&self) -> Option<Waypoint> {
        self.waypoints.get(self.cursor).copied()
    }
}
