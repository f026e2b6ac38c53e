//! # Request/Response
//!
//! Every message sent to an actor carries a [`Response`] sender. The actor
//! answers on it exactly once; the client awaits the matching receiver.

use super::FrameworkError;
use tokio::sync::{mpsc, oneshot};

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// Sends the message built by `make` and waits for the actor's answer.
///
/// A closed mailbox maps to [`FrameworkError::ActorClosed`], a responder
/// dropped without answering to [`FrameworkError::ActorDropped`].
pub async fn request<M, T, E>(
    sender: &mpsc::Sender<M>,
    make: impl FnOnce(Response<T, E>) -> M,
) -> Result<T, E>
where
    E: From<FrameworkError>,
{
    let (respond_to, response) = oneshot::channel();
    sender
        .send(make(respond_to))
        .await
        .map_err(|_| FrameworkError::ActorClosed)?;
    response.await.map_err(|_| FrameworkError::ActorDropped)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum PingError {
        Framework(FrameworkError),
    }

    impl From<FrameworkError> for PingError {
        fn from(e: FrameworkError) -> Self {
            PingError::Framework(e)
        }
    }

    struct Ping {
        respond_to: Response<u32, PingError>,
    }

    #[tokio::test]
    async fn test_request_round_trip() {
        let (sender, mut receiver) = mpsc::channel::<Ping>(1);
        tokio::spawn(async move {
            while let Some(ping) = receiver.recv().await {
                let _ = ping.respond_to.send(Ok(7));
            }
        });

        let answer = request(&sender, |respond_to| Ping { respond_to }).await;
        assert_eq!(answer, Ok(7));
    }

    #[tokio::test]
    async fn test_closed_actor() {
        let (sender, receiver) = mpsc::channel::<Ping>(1);
        drop(receiver);

        let answer = request(&sender, |respond_to| Ping { respond_to }).await;
        assert_eq!(answer, Err(PingError::Framework(FrameworkError::ActorClosed)));
    }

    #[tokio::test]
    async fn test_dropped_responder() {
        let (sender, mut receiver) = mpsc::channel::<Ping>(1);
        tokio::spawn(async move {
            // Swallow the request without answering.
            let _ = receiver.recv().await;
        });

        let answer = request(&sender, |respond_to| Ping { respond_to }).await;
        assert_eq!(answer, Err(PingError::Framework(FrameworkError::ActorDropped)));
    }
}
