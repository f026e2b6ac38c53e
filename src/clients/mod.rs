//! Type-safe wrappers around the session actor's mailbox.

pub mod session_client;

pub use session_client::*;
