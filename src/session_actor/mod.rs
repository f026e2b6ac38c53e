//! # Session Actor
//!
//! Runs a [`DeliverySession`] inside its own Tokio task.
//!
//! The actor is the "server" half: it owns the session and the receiving end
//! of the mailbox, and handles one [`SessionRequest`] at a time. Selection,
//! confirmation and ticks are therefore serialized without a lock, and a tick
//! can never observe a half-primed route because the directions fetch is
//! awaited inside the loop.
//!
//! ```rust,no_run
//! use delivery_tracker::catalog::{Catalog, StoreId};
//! use delivery_tracker::directions::MockDirections;
//! use delivery_tracker::model::{Address, DeparturePolicy, RouteDescription, TravelMode};
//! use delivery_tracker::route_cache::{MemoryStore, RouteCache};
//! use delivery_tracker::session::DeliverySession;
//! use delivery_tracker::session_actor::SessionActor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockDirections::new();
//!     mock.expect_directions().return_ok(RouteDescription::single("??_ibE_ibE"));
//!     let cache = RouteCache::new(mock, MemoryStore::new(), TravelMode::Driving, DeparturePolicy::Now);
//!
//!     // 1. Create
//!     let (actor, client) = SessionActor::new(32, DeliverySession::new(Catalog::default(), cache));
//!
//!     // 2. Run
//!     tokio::spawn(actor.run());
//!
//!     // 3. Use
//!     let selection = client
//!         .select_store(StoreId::from("Pizza Express"), Address::from("Rua X"))
//!         .await
//!         .unwrap();
//!     client.confirm_order("🍕 Pizza").await.unwrap();
//!     let frame = client.tick(selection.generation).await.unwrap();
//!     assert_eq!(frame.cursor, 1);
//! }
//! ```

pub mod message;

pub use message::*;

use crate::clients::SessionClient;
use crate::directions::DirectionsProvider;
use crate::route_cache::RouteStore;
use crate::session::{DeliverySession, SessionError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct SessionActor<P, S> {
    receiver: mpsc::Receiver<SessionRequest>,
    session: DeliverySession<P, S>,
}

impl<P, S> SessionActor<P, S>
where
    P: DirectionsProvider + 'static,
    S: RouteStore + 'static,
{
    /// Creates the actor and the client that talks to it.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the mailbox. When it is full, client
    ///   calls wait for space.
    /// * `session` - The session the actor takes ownership of.
    pub fn new(buffer_size: usize, session: DeliverySession<P, S>) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, session };
        (actor, SessionClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!("Session actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionRequest::SelectStore {
                    store_id,
                    address,
                    respond_to,
                } => {
                    debug!(%store_id, %address, "SelectStore");
                    let result = self.session.select_store(&store_id, &address).await;
                    log_outcome("SelectStore", &result);
                    let _ = respond_to.send(result);
                }
                SessionRequest::ConfirmOrder { item, respond_to } => {
                    debug!(item = %item, "ConfirmOrder");
                    let result = self.session.confirm_order(&item);
                    log_outcome("ConfirmOrder", &result);
                    let _ = respond_to.send(result);
                }
                SessionRequest::Tick {
                    generation,
                    respond_to,
                } => {
                    let result = self.session.tick(generation).await;
                    match &result {
                        Ok(frame) => debug!(%generation, cursor = frame.cursor, "Tick ok"),
                        Err(SessionError::StaleTick { .. }) => {
                            debug!(%generation, "Stale tick ignored")
                        }
                        Err(e) => warn!(%generation, error = %e, "Tick failed"),
                    }
                    let _ = respond_to.send(result);
                }
                SessionRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.session.snapshot()));
                }
                SessionRequest::Menu { respond_to } => {
                    let _ = respond_to.send(Ok(self.session.menu()));
                }
            }
        }

        info!(generation = %self.session.generation(), "Session actor shutdown");
    }
}

fn log_outcome<T>(operation: &str, result: &Result<T, SessionError>) {
    match result {
        Ok(_) => info!(operation, "ok"),
        Err(e) if e.is_user_facing() => info!(operation, error = %e, "Rejected"),
        Err(e) => warn!(operation, error = %e, "Failed"),
    }
}
