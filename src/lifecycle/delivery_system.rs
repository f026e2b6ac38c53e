use super::{FrameReceiver, Ticker, TickerExit};
use crate::catalog::Catalog;
use crate::clients::SessionClient;
use crate::config::Settings;
use crate::directions::{DirectionsProvider, GoogleDirectionsClient, RouteFetchError};
use crate::route_cache::{JsonFileStore, RouteCache, RouteStore};
use crate::session::{DeliverySession, Generation};
use crate::session_actor::SessionActor;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Mailbox capacity of the session actor.
const SESSION_BUFFER: usize = 32;

/// The runtime orchestrator for one delivery session.
///
/// `DeliverySystem` is responsible for:
/// - **Wiring**: provider and route store into a cache, the cache into a session
/// - **Lifecycle**: spawning the session actor and its tickers, and stopping them
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::new(&Settings::from_env()?)?;
///
/// let selection = system.session_client.select_store(store_id, address).await?;
/// system.session_client.confirm_order("🍕 Pizza").await?;
/// let mut frames = system.start_tracking(selection.generation);
///
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    /// Client for interacting with the session actor
    pub session_client: SessionClient,

    tick_interval: Duration,
    actor_handle: JoinHandle<()>,
    tickers: Vec<JoinHandle<TickerExit>>,
}

impl DeliverySystem {
    /// Builds the production system: Google directions and a JSON file cache.
    pub fn new(settings: &Settings) -> Result<Self, RouteFetchError> {
        let provider = GoogleDirectionsClient::new(
            settings.api_key.clone(),
            settings.directions_url.clone(),
            settings.request_timeout,
        )?;
        let store = JsonFileStore::new(&settings.cache_path);
        Ok(Self::with_parts(provider, store, settings))
    }

    /// Builds the system around any provider and store.
    pub fn with_parts<P, S>(provider: P, store: S, settings: &Settings) -> Self
    where
        P: DirectionsProvider + 'static,
        S: RouteStore + 'static,
    {
        let cache = RouteCache::new(
            provider,
            store,
            settings.travel_mode,
            settings.departure_policy,
        );
        let session = DeliverySession::new(Catalog::default(), cache);
        let (actor, session_client) = SessionActor::new(SESSION_BUFFER, session);
        let actor_handle = tokio::spawn(actor.run());

        info!(interval = ?settings.tick_interval, "Delivery system started");
        Self {
            session_client,
            tick_interval: settings.tick_interval,
            actor_handle,
            tickers: Vec::new(),
        }
    }

    /// Starts a ticker for `generation` at the configured interval.
    ///
    /// Only one ticker runs at a time: any earlier ticker is aborted first,
    /// whatever generation it was started for.
    pub fn start_tracking(&mut self, generation: Generation) -> FrameReceiver {
        for ticker in self.tickers.drain(..) {
            ticker.abort();
        }
        let (handle, frames) =
            Ticker::spawn(self.session_client.clone(), generation, self.tick_interval);
        self.tickers.push(handle);
        frames
    }

    /// Gracefully shuts down the system.
    ///
    /// Running tickers are aborted, then the client is dropped so the actor's
    /// mailbox closes, then the actor task is awaited.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down delivery system...");

        for ticker in &self.tickers {
            ticker.abort();
        }
        for ticker in self.tickers {
            // Aborted tickers report cancellation, which is expected here.
            if let Err(e) = ticker.await {
                if e.is_panic() {
                    error!("Ticker task failed: {:?}", e);
                    return Err(e);
                }
            }
        }

        drop(self.session_client);
        if let Err(e) = self.actor_handle.await {
            error!("Session actor task failed: {:?}", e);
            return Err(e);
        }

        info!("Delivery system shutdown complete.");
        Ok(())
    }
}
