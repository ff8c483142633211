//! # Lifecycle events emitted by the group and its adapters.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (wall-clock timestamp, originating actor, error text, received signal).
//! Events are observational only — the coordination protocol never depends on
//! them being delivered.
//!
//! ## Example
//! ```rust
//! use rungroup::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::ActorFinished)
//!     .with_actor("http")
//!     .with_error("listener closed");
//!
//! assert_eq!(ev.kind, EventKind::ActorFinished);
//! assert_eq!(ev.actor.as_deref(), Some("http"));
//! assert_eq!(ev.error.as_deref(), Some("listener closed"));
//! ```

use std::borrow::Cow;
use std::time::SystemTime;

use crate::adapters::TermSignal;

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Group events ===
    /// An actor's execute step returned (successfully or not).
    ///
    /// Sets: `error` (if the actor failed), `at`.
    ActorFinished,

    /// The shared cancellation was broadcast; interrupts may now begin.
    ///
    /// Sets: `at`.
    ShutdownTriggered,

    /// An actor's interrupt step returned.
    ///
    /// Sets: `error` (if the interrupt failed), `at`.
    InterruptFinished,

    /// All spawned units were joined and the group produced its outcome.
    ///
    /// Sets: `error` (the aggregated failure, if any), `at`.
    GroupFinished,

    // === Adapter events ===
    /// The signal actor observed a configured termination signal.
    ///
    /// Sets: `actor`, `signal`, `at`.
    SignalReceived,

    /// The listener drain did not finish within the grace period.
    ///
    /// Sets: `actor`, `at`.
    DrainTimedOut,

    /// The dual-phase stop finished on the graceful path.
    ///
    /// Sets: `actor`, `at`.
    GracefulStopped,

    /// The dual-phase stop escalated to a forced stop.
    ///
    /// Sets: `actor`, `at`.
    ForcedStop,
}

/// A lifecycle event with optional metadata.
///
/// Built with [`Event::now`] and the `with_*` setters; unset fields stay
/// `None`.
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Originating actor, when one adapter is clearly the source.
    pub actor: Option<Cow<'static, str>>,
    /// Failure text, for *Finished events that carried an error.
    pub error: Option<String>,
    /// The received signal, for [`EventKind::SignalReceived`].
    pub signal: Option<TermSignal>,
    /// Wall-clock timestamp taken at construction.
    pub at: SystemTime,
}

impl Event {
    /// Creates an event of the given kind, timestamped now.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            actor: None,
            error: None,
            signal: None,
            at: SystemTime::now(),
        }
    }

    /// Sets the originating actor name.
    pub fn with_actor(mut self, actor: impl Into<Cow<'static, str>>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Sets the failure text.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Sets the received signal.
    pub fn with_signal(mut self, signal: TermSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}
