//! # OS-signal actor.
//!
//! [`SignalActor`] lets an operator-initiated signal participate in the same
//! first-exit-wins protocol as any other actor: its execute step blocks until
//! either a configured termination signal arrives (failure naming the signal)
//! or its interrupt step fires because some other actor took the group down
//! (failure reporting the cancellation).
//!
//! ## Signals
//! **Unix platforms:** any subset of
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//! - `SIGHUP`
//!
//! **Non-Unix platforms:** only Ctrl-C via [`tokio::signal::ctrl_c`].
//!
//! For tests, [`SignalActor::with_source`] replaces the OS wait with any
//! injected future — the signal source is an explicit constructor dependency,
//! not a global.

use std::fmt;
use std::future::Future;
use std::io;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::error::ActorError;
use crate::events::{Bus, Event, EventKind};
use crate::group::Actor;

/// A termination signal kind the actor can wait for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermSignal {
    /// `SIGINT` (Ctrl-C).
    Interrupt,
    /// `SIGTERM`.
    Terminate,
    /// `SIGQUIT`.
    Quit,
    /// `SIGHUP`.
    Hangup,
}

impl TermSignal {
    /// The usual shutdown set: `SIGINT`, `SIGTERM`, `SIGQUIT`.
    pub const TERMINATION: &'static [TermSignal] = &[
        TermSignal::Interrupt,
        TermSignal::Terminate,
        TermSignal::Quit,
    ];

    fn as_str(self) -> &'static str {
        match self {
            TermSignal::Interrupt => "SIGINT",
            TermSignal::Terminate => "SIGTERM",
            TermSignal::Quit => "SIGQUIT",
            TermSignal::Hangup => "SIGHUP",
        }
    }

    #[cfg(unix)]
    fn signal_kind(self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;
        match self {
            TermSignal::Interrupt => SignalKind::interrupt(),
            TermSignal::Terminate => SignalKind::terminate(),
            TermSignal::Quit => SignalKind::quit(),
            TermSignal::Hangup => SignalKind::hangup(),
        }
    }
}

impl fmt::Display for TermSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type BoxSignalWait = Pin<Box<dyn Future<Output = io::Result<TermSignal>> + Send + 'static>>;

/// Builder for the signal actor.
///
/// # Example
/// ```rust
/// use rungroup::{RunGroup, SignalActor, TermSignal};
///
/// # fn demo(group: &mut RunGroup) {
/// group.add_actor(SignalActor::new(TermSignal::TERMINATION).into_actor());
/// # }
/// ```
pub struct SignalActor {
    kinds: Vec<TermSignal>,
    source: Option<BoxSignalWait>,
    bus: Option<Bus>,
}

impl SignalActor {
    /// Creates a signal actor waiting for the given signal kinds.
    ///
    /// An empty set never completes on its own; such an actor exits only
    /// through its interrupt step.
    pub fn new(kinds: impl Into<Vec<TermSignal>>) -> Self {
        Self {
            kinds: kinds.into(),
            source: None,
            bus: None,
        }
    }

    /// Replaces the OS signal wait with an injected source.
    ///
    /// The actor behaves as if the resolved signal had been delivered; an
    /// `Err` from the source is reported as a plain failure.
    pub fn with_source<F>(mut self, source: F) -> Self
    where
        F: Future<Output = io::Result<TermSignal>> + Send + 'static,
    {
        self.source = Some(Box::pin(source));
        self
    }

    /// Publishes a [`EventKind::SignalReceived`] event on the given bus when
    /// a signal arrives.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds the actor.
    ///
    /// The interrupt step cancels a token private to this actor and always
    /// succeeds; the execute step then reports [`ActorError::Canceled`].
    pub fn into_actor(self) -> Actor {
        let Self { kinds, source, bus } = self;
        let stop = CancellationToken::new();
        let trigger = stop.clone();

        let execute = async move {
            let wait: BoxSignalWait = match source {
                Some(src) => src,
                None => Box::pin(os_signal_wait(kinds)),
            };
            tokio::select! {
                res = wait => match res {
                    Ok(signal) => {
                        if let Some(bus) = &bus {
                            bus.publish(
                                Event::now(EventKind::SignalReceived)
                                    .with_actor("signal")
                                    .with_signal(signal),
                            );
                        }
                        Err(ActorError::Signal { signal })
                    }
                    Err(e) => Err(ActorError::Fail {
                        error: format!("signal source failed: {e}"),
                    }),
                },
                _ = stop.cancelled() => Err(ActorError::Canceled),
            }
        };

        let interrupt = async move {
            trigger.cancel();
            Ok(())
        };

        Actor::new(execute, interrupt)
    }
}

/// Waits for the first of the configured signals and reports which one.
///
/// Registration happens on first poll; a registration failure surfaces as the
/// future's `Err`.
#[cfg(unix)]
async fn os_signal_wait(kinds: Vec<TermSignal>) -> io::Result<TermSignal> {
    use std::task::Poll;
    use tokio::signal::unix::signal;

    let mut streams = Vec::with_capacity(kinds.len());
    for kind in kinds {
        streams.push((kind, signal(kind.signal_kind())?));
    }

    std::future::poll_fn(move |cx| {
        for (kind, stream) in streams.iter_mut() {
            if let Poll::Ready(Some(())) = stream.poll_recv(cx) {
                return Poll::Ready(Ok(*kind));
            }
        }
        Poll::Pending
    })
    .await
}

#[cfg(not(unix))]
async fn os_signal_wait(kinds: Vec<TermSignal>) -> io::Result<TermSignal> {
    tokio::signal::ctrl_c().await?;
    Ok(kinds.first().copied().unwrap_or(TermSignal::Interrupt))
}
