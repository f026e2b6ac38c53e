//! Actor plumbing shared by the session actor and its client.
//!
//! # Main Components
//!
//! - [`Response`] - one-shot channel an actor answers a request on
//! - [`request`] - send a message and await its answer
//! - [`FrameworkError`] - channel failures between client and actor

pub mod error;
pub mod message;

pub use error::*;
pub use message::*;
