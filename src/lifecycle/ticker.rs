//! # Ticker
//!
//! The periodic tick source for one selection. Each period it sends one
//! `tick(generation)` to the session actor and publishes the resulting frame
//! on a `watch` channel, which always holds the latest frame only.
//!
//! The first tick fires one full period after spawning. The task ends by
//! itself when:
//!
//! - the arrival frame has been published,
//! - the session reports a newer selection ([`SessionError::StaleTick`]),
//! - there is no selection to track,
//! - the route is empty, or
//! - the actor is gone.
//!
//! Time comes from `tokio::time`, so tests drive it with a paused clock.

use crate::clients::SessionClient;
use crate::session::{Generation, SessionError, TrackingFrame};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Why a ticker task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    Arrived,
    Superseded,
    NoSession,
    EmptyRoute,
    ActorClosed,
}

pub type FrameReceiver = watch::Receiver<Option<TrackingFrame>>;

pub struct Ticker;

impl Ticker {
    /// Starts ticking `generation` every `period`.
    ///
    /// Returns the task handle and a receiver that sees `None` until the
    /// first frame.
    pub fn spawn(
        client: SessionClient,
        generation: Generation,
        period: Duration,
    ) -> (JoinHandle<TickerExit>, FrameReceiver) {
        let (sender, receiver) = watch::channel(None);
        let handle = tokio::spawn(run(client, generation, period, sender));
        (handle, receiver)
    }
}

async fn run(
    client: SessionClient,
    generation: Generation,
    period: Duration,
    frames: watch::Sender<Option<TrackingFrame>>,
) -> TickerExit {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately.
    interval.tick().await;
    info!(%generation, ?period, "Ticker started");

    loop {
        interval.tick().await;

        let exit = match client.tick(generation).await {
            Ok(frame) => {
                let arrived = frame.has_arrived();
                // No receivers is fine: the frame is simply not watched.
                frames.send_replace(Some(frame));
                if !arrived {
                    continue;
                }
                TickerExit::Arrived
            }
            Err(SessionError::StaleTick { current, .. }) => {
                debug!(%generation, %current, "Selection replaced");
                TickerExit::Superseded
            }
            Err(SessionError::NoActiveSession) => TickerExit::NoSession,
            Err(SessionError::EmptyRoute) => TickerExit::EmptyRoute,
            Err(SessionError::Actor(e)) => {
                warn!(%generation, error = %e, "Session actor unreachable");
                TickerExit::ActorClosed
            }
            Err(e) => {
                warn!(%generation, error = %e, "Tick failed");
                continue;
            }
        };

        info!(%generation, ?exit, "Ticker stopped");
        return exit;
    }
}
