use crate::catalog::{MenuEntry, StoreId};
use crate::framework::request;
use crate::model::Address;
use crate::session::{Generation, OrderSnapshot, Selection, SessionError, TrackingFrame};
use crate::session_actor::SessionRequest;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Client for interacting with the session actor.
///
/// Holds only the mailbox sender, so clones are cheap and can be handed to
/// the presentation layer and to a [`Ticker`](crate::lifecycle::Ticker) at
/// the same time. The actor shuts down once every clone is dropped.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn select_store(
        &self,
        store_id: StoreId,
        address: Address,
    ) -> Result<Selection, SessionError> {
        debug!("Sending select_store to actor");
        request(&self.sender, |respond_to| SessionRequest::SelectStore {
            store_id,
            address,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, item))]
    pub async fn confirm_order(&self, item: impl Into<String>) -> Result<OrderSnapshot, SessionError> {
        let item = item.into();
        debug!(item = %item, "Sending confirm_order to actor");
        request(&self.sender, |respond_to| SessionRequest::ConfirmOrder { item, respond_to }).await
    }

    #[instrument(skip(self))]
    pub async fn tick(&self, generation: Generation) -> Result<TrackingFrame, SessionError> {
        request(&self.sender, |respond_to| SessionRequest::Tick {
            generation,
            respond_to,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<OrderSnapshot, SessionError> {
        request(&self.sender, |respond_to| SessionRequest::Snapshot { respond_to }).await
    }

    pub async fn menu(&self) -> Result<Vec<MenuEntry>, SessionError> {
        request(&self.sender, |respond_to| SessionRequest::Menu { respond_to }).await
    }

    /// True once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
