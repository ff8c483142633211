//! Error types produced by actors and their interrupt paths.
//!
//! The group itself is outcome-agnostic: it only distinguishes `Ok` from
//! `Err` and surfaces the first failure it observes. [`ActorError`] exists so
//! adapters and callers can still tell *why* an actor stopped — a delivered
//! OS signal, a propagated cancellation, a closed listener, or a drain that
//! blew through its grace period.

use std::time::Duration;

use thiserror::Error;

use crate::adapters::TermSignal;

/// # Errors produced by actor execution and interruption.
///
/// Some variants are benign by convention (a closed listener, a propagated
/// cancellation): they mark the *reason* an actor stopped during an orderly
/// shutdown, not a malfunction. Use [`ActorError::is_benign`] to filter them
/// out when deciding whether a run ended badly.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActorError {
    /// A configured termination signal was delivered to the process.
    #[error("received signal {signal}")]
    Signal {
        /// The signal that arrived.
        signal: TermSignal,
    },

    /// The actor stopped because another actor triggered group shutdown.
    #[error("group cancelled")]
    Canceled,

    /// The listener was closed and the serve loop ended normally.
    ///
    /// Mirrors the "server closed" sentinel of HTTP server stacks: the serve
    /// call reports it as an error, but callers of [`crate::RunGroup::run`]
    /// typically treat it as a clean exit.
    #[error("listener closed")]
    ListenerClosed,

    /// Graceful draining did not finish within the configured grace period.
    #[error("graceful shutdown exceeded grace period of {grace:?}")]
    GraceExceeded {
        /// The grace period that elapsed.
        grace: Duration,
    },

    /// Opaque execution failure.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl ActorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use rungroup::ActorError;
    ///
    /// let err = ActorError::Canceled;
    /// assert_eq!(err.as_label(), "actor_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ActorError::Signal { .. } => "actor_signal",
            ActorError::Canceled => "actor_canceled",
            ActorError::ListenerClosed => "actor_listener_closed",
            ActorError::GraceExceeded { .. } => "actor_grace_exceeded",
            ActorError::Fail { .. } => "actor_failed",
        }
    }

    /// Indicates whether the error marks an orderly stop rather than a fault.
    ///
    /// Returns `true` for [`ActorError::Canceled`], [`ActorError::ListenerClosed`]
    /// and [`ActorError::Signal`] — the three ways an actor reports "I stopped
    /// because the group is shutting down (or was asked to)."
    ///
    /// # Example
    /// ```
    /// use rungroup::ActorError;
    ///
    /// assert!(ActorError::ListenerClosed.is_benign());
    /// assert!(!ActorError::Fail { error: "boom".into() }.is_benign());
    /// ```
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            ActorError::Canceled | ActorError::ListenerClosed | ActorError::Signal { .. }
        )
    }
}
