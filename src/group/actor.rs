//! # Actor: one registered unit of work.
//!
//! An [`Actor`] pairs a required `execute` future (the blocking work; its
//! completion means the actor is done) with an optional `interrupt` future
//! (asks the work to stop; awaited only after group-wide cancellation).
//! Both are stored boxed so heterogeneous actors live in one registration
//! list.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::ActorError;

/// The result of an execute or interrupt step.
///
/// The group only distinguishes `Ok` from `Err`; the error carried inside is
/// opaque to the coordination protocol.
pub type Outcome = Result<(), ActorError>;

/// Boxed outcome future, the stored form of execute/interrupt steps.
pub(crate) type BoxOutcome = Pin<Box<dyn Future<Output = Outcome> + Send + 'static>>;

/// A registered unit of work: an execute step plus an optional interrupt step.
///
/// Immutable once built; owned exclusively by the [`RunGroup`](crate::RunGroup)
/// that registers it. Adapters produce these via their `into_actor()`
/// constructors.
pub struct Actor {
    pub(crate) execute: BoxOutcome,
    pub(crate) interrupt: Option<BoxOutcome>,
}

impl Actor {
    /// Builds an actor from an execute step and an interrupt step.
    ///
    /// The interrupt future is only ever awaited after the group's shared
    /// cancellation fires.
    pub fn new<E, I>(execute: E, interrupt: I) -> Self
    where
        E: Future<Output = Outcome> + Send + 'static,
        I: Future<Output = Outcome> + Send + 'static,
    {
        Self {
            execute: Box::pin(execute),
            interrupt: Some(Box::pin(interrupt)),
        }
    }

    /// Builds an actor with no interrupt step.
    ///
    /// Used when the work already understands cancellation natively (its own
    /// suspension point is a wait on the group's cancellation token).
    pub fn from_execute<E>(execute: E) -> Self
    where
        E: Future<Output = Outcome> + Send + 'static,
    {
        Self {
            execute: Box::pin(execute),
            interrupt: None,
        }
    }

    /// Whether this actor registered an interrupt step.
    pub fn has_interrupt(&self) -> bool {
        self.interrupt.is_some()
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("interrupt", &self.interrupt.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_interrupt() {
        let a = Actor::new(async { Ok(()) }, async { Ok(()) });
        assert!(a.has_interrupt());

        let b = Actor::from_execute(async { Ok(()) });
        assert!(!b.has_interrupt());
    }
}
