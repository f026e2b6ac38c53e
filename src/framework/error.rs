//! # Framework Errors
//!
//! Failures of the channel between a client and its actor, as opposed to
//! failures of the operation the actor was asked to perform.

/// Errors that can occur within the actor plumbing itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}
