//! Messages understood by the [`SessionActor`](super::SessionActor).

use crate::catalog::{MenuEntry, StoreId};
use crate::framework::Response;
use crate::model::Address;
use crate::session::{Generation, OrderSnapshot, Selection, SessionError, TrackingFrame};

/// Type alias for the one-shot response channel used by the session actor.
pub type SessionResponse<T> = Response<T, SessionError>;

/// One request per session operation. Each carries the channel its answer goes back on.
#[derive(Debug)]
pub enum SessionRequest {
    SelectStore {
        store_id: StoreId,
        address: Address,
        respond_to: SessionResponse<Selection>,
    },
    ConfirmOrder {
        item: String,
        respond_to: SessionResponse<OrderSnapshot>,
    },
    Tick {
        generation: Generation,
        respond_to: SessionResponse<TrackingFrame>,
    },
    Snapshot {
        respond_to: SessionResponse<OrderSnapshot>,
    },
    Menu {
        respond_to: SessionResponse<Vec<MenuEntry>>,
    },
}
