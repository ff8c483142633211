//! # RunGroup: first-exit-wins orchestration.
//!
//! [`RunGroup`] fans every registered actor's execute step out onto its own
//! task, cancels the shared [`CancellationToken`] the moment the first
//! execute returns, then awaits every registered interrupt step and joins all
//! spawned units. The group's outcome is the first failure observed in
//! completion order, or success if nothing failed.
//!
//! ```text
//!  add()/add_ctx()            run()
//!  ┌──────────────┐   ┌───────────────────────────────────────────┐
//!  │ Actor #1..N  │──►│ spawn execute #1..N ──┐                   │
//!  └──────────────┘   │                   first return            │
//!                     │                       ▼                   │
//!                     │              token.cancel() (idempotent)  │
//!                     │                       ▼                   │
//!                     │ spawn interrupt #1..N (gated on cancel)   │
//!                     │                       ▼                   │
//!                     │ join all ──► first observed Err, or Ok    │
//!                     └───────────────────────────────────────────┘
//! ```
//!
//! ## Ordering guarantees
//! - Cancellation happens-before every interrupt invocation.
//! - All execute units are spawned before any interrupt unit can begin
//!   (interrupt units block on the cancellation broadcast).
//! - The group outcome depends on *completion* order, not registration order.
//!   When two failures race, whichever the join loop observes first wins; the
//!   other is discarded.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::ActorError;
use crate::events::{Bus, Event, EventKind};
use crate::group::actor::{Actor, Outcome};
use crate::subscribers::Subscribe;

/// Capacity of the group's event bus ring buffer.
const BUS_CAPACITY: usize = 64;

/// Orchestrator coordinating a fixed set of actors under first-exit-wins
/// semantics.
///
/// Actors are registered before [`RunGroup::run`]; `run` consumes the group,
/// so a group is used exactly once. An actor that exits is never restarted —
/// its exit terminates the whole group.
///
/// # Example
/// ```rust
/// use rungroup::{ActorError, RunGroup};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut group = RunGroup::new();
///
/// // A worker that stops when the group shuts down.
/// group.add_ctx(|token| async move {
///     token.cancelled().await;
///     Ok(())
/// });
///
/// // A unit of work that ends immediately and takes the group down with it.
/// group.add_execute(async { Err(ActorError::Fail { error: "done".into() }) });
///
/// let err = group.run().await.unwrap_err();
/// assert_eq!(err.to_string(), "execution failed: done");
/// # }
/// ```
pub struct RunGroup {
    token: CancellationToken,
    bus: Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,
    actors: Vec<Actor>,
}

impl RunGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            bus: Bus::new(BUS_CAPACITY),
            subscribers: Vec::new(),
            actors: Vec::new(),
        }
    }

    /// Registers an actor from an execute step and an interrupt step.
    ///
    /// The interrupt is awaited only after the shared cancellation fires.
    pub fn add<E, I>(&mut self, execute: E, interrupt: I)
    where
        E: std::future::Future<Output = Outcome> + Send + 'static,
        I: std::future::Future<Output = Outcome> + Send + 'static,
    {
        self.actors.push(Actor::new(execute, interrupt));
    }

    /// Registers an actor with no interrupt step.
    pub fn add_execute<E>(&mut self, execute: E)
    where
        E: std::future::Future<Output = Outcome> + Send + 'static,
    {
        self.actors.push(Actor::from_execute(execute));
    }

    /// Registers an actor whose execute step receives the group's
    /// cancellation token directly.
    ///
    /// Sugar for work that understands cancellation natively: its own
    /// suspension point is a wait on the token, so it needs no separate
    /// interrupt step.
    pub fn add_ctx<F, Fut>(&mut self, f: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: std::future::Future<Output = Outcome> + Send + 'static,
    {
        let child = self.token.child_token();
        self.actors.push(Actor::from_execute(f(child)));
    }

    /// Registers a pre-built actor (what the adapters produce).
    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    /// Attaches an event subscriber.
    ///
    /// Each subscriber gets a dedicated listener task, spawned when `run`
    /// starts and finishing once the group's last event is delivered.
    pub fn with_subscriber(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(sub);
        self
    }

    /// Creates a raw receiver for the group's lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Returns a handle to the group's event bus, for adapters built with
    /// `with_bus`.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Returns a clone of the shared cancellation token.
    ///
    /// Cancelling it shuts the group down as if an actor had exited.
    /// Cancellation is an idempotent broadcast; repeated cancels are no-ops
    /// and nothing can un-cancel it.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Number of registered actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether no actors are registered.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Runs all registered actors to completion and returns the first
    /// observed failure, or `Ok(())` if none failed.
    ///
    /// - Every execute step runs on its own task; the moment **any** execute
    ///   returns (whatever its outcome), the shared token is cancelled.
    /// - Every interrupt step runs on its own task, gated on that
    ///   cancellation.
    /// - `run` only returns once **all** spawned units have been joined; no
    ///   concurrent work is leaked, whichever outcome is reported.
    /// - A group with zero actors returns `Ok(())` immediately.
    ///
    /// Interrupt failures participate in the same first-observed aggregation
    /// as execute failures; a unit that panics contributes
    /// [`ActorError::Fail`].
    pub async fn run(self) -> Outcome {
        let RunGroup {
            token,
            bus,
            subscribers,
            actors,
        } = self;

        for sub in subscribers {
            spawn_listener(sub, bus.subscribe());
        }

        if actors.is_empty() {
            bus.publish(Event::now(EventKind::GroupFinished));
            return Ok(());
        }

        let mut set: JoinSet<Outcome> = JoinSet::new();

        // With at least one actor the token always ends up cancelled, so this
        // watcher unit always completes.
        {
            let token = token.clone();
            let bus = bus.clone();
            set.spawn(async move {
                token.cancelled().await;
                bus.publish(Event::now(EventKind::ShutdownTriggered));
                Ok(())
            });
        }

        for actor in actors {
            let execute_token = token.clone();
            let execute_bus = bus.clone();
            set.spawn(async move {
                // The guard cancels the shared token when dropped, which also
                // covers a panicking execute.
                let guard = execute_token.drop_guard();
                let res = actor.execute.await;
                drop(guard);

                let mut ev = Event::now(EventKind::ActorFinished);
                if let Err(e) = &res {
                    ev = ev.with_error(e.to_string());
                }
                execute_bus.publish(ev);
                res
            });

            if let Some(interrupt) = actor.interrupt {
                let interrupt_token = token.clone();
                let interrupt_bus = bus.clone();
                set.spawn(async move {
                    interrupt_token.cancelled().await;
                    let res = interrupt.await;

                    let mut ev = Event::now(EventKind::InterruptFinished);
                    if let Err(e) = &res {
                        ev = ev.with_error(e.to_string());
                    }
                    interrupt_bus.publish(ev);
                    res
                });
            }
        }

        let mut first: Option<ActorError> = None;
        while let Some(joined) = set.join_next().await {
            let outcome = joined.unwrap_or_else(|join_err| {
                Err(ActorError::Fail {
                    error: format!("actor task failed: {join_err}"),
                })
            });
            if let Err(e) = outcome {
                if first.is_none() {
                    first = Some(e);
                }
            }
        }

        let mut ev = Event::now(EventKind::GroupFinished);
        if let Some(e) = &first {
            ev = ev.with_error(e.to_string());
        }
        bus.publish(ev);

        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for RunGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one subscriber from its own bus receiver until the bus closes.
fn spawn_listener(sub: Arc<dyn Subscribe>, mut rx: broadcast::Receiver<Event>) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => sub.on_event(&ev).await,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    fn fail(msg: &str) -> ActorError {
        ActorError::Fail { error: msg.into() }
    }

    #[tokio::test]
    async fn test_empty_group_returns_immediately() {
        let group = RunGroup::new();
        let res = timeout(Duration::from_millis(100), group.run()).await;
        assert!(matches!(res, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_single_failing_actor_surfaces_its_error() {
        let mut group = RunGroup::new();
        group.add(async { Err(fail("foobar")) }, async { Ok(()) });

        let err = group.run().await.unwrap_err();
        assert_eq!(err.to_string(), "execution failed: foobar");
    }

    #[tokio::test]
    async fn test_first_exit_wins_and_interrupt_runs_once() {
        let stop = Arc::new(Notify::new());
        let interrupts = Arc::new(AtomicUsize::new(0));

        let mut group = RunGroup::new();
        group.add(async { Err(fail("first")) }, async { Ok(()) });

        let wait = stop.clone();
        let count = interrupts.clone();
        let release = stop.clone();
        group.add(
            async move {
                wait.notified().await;
                Ok(())
            },
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                release.notify_one();
                Ok(())
            },
        );

        let err = group.run().await.unwrap_err();
        assert_eq!(err.to_string(), "execution failed: first");
        assert_eq!(interrupts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_add_ctx_actor_stops_when_sibling_exits() {
        let mut group = RunGroup::new();
        group.add_ctx(|token| async move {
            token.cancelled().await;
            Ok(())
        });
        group.add(async { Err(fail("boom")) }, async { Ok(()) });

        let res = timeout(Duration::from_secs(1), group.run()).await;
        let err = res.expect("group must not hang").unwrap_err();
        assert_eq!(err.to_string(), "execution failed: boom");
    }

    #[tokio::test]
    async fn test_interrupt_failure_surfaces_when_first_observed() {
        let stop = Arc::new(Notify::new());

        let mut group = RunGroup::new();
        let wait = stop.clone();
        let release = stop.clone();
        group.add(
            async move {
                wait.notified().await;
                Ok(())
            },
            async move {
                release.notify_one();
                Err(fail("interrupt failed"))
            },
        );
        group.add_execute(async { Ok(()) });

        let err = group.run().await.unwrap_err();
        assert_eq!(err.to_string(), "execution failed: interrupt failed");
    }

    #[tokio::test]
    async fn test_external_cancellation_is_idempotent() {
        let mut group = RunGroup::new();
        group.add_ctx(|token| async move {
            token.cancelled().await;
            Ok(())
        });

        let token = group.cancellation_token();
        for _ in 0..3 {
            let t = token.clone();
            tokio::spawn(async move { t.cancel() });
        }

        let res = timeout(Duration::from_secs(1), group.run()).await;
        assert!(matches!(res, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_panicked_actor_becomes_failure_and_cancels_group() {
        let mut group = RunGroup::new();
        group.add_ctx(|token| async move {
            token.cancelled().await;
            Ok(())
        });
        group.add_execute(async { panic!("kaboom") });

        let res = timeout(Duration::from_secs(1), group.run()).await;
        let err = res.expect("group must not hang").unwrap_err();
        assert!(matches!(err, ActorError::Fail { .. }));
        assert!(err.to_string().contains("panic"), "got: {err}");
    }

    #[tokio::test]
    async fn test_lifecycle_events_are_published() {
        let mut group = RunGroup::new();
        let mut rx = group.subscribe();
        group.add(async { Err(fail("boom")) }, async { Ok(()) });

        group.run().await.unwrap_err();

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::ActorFinished));
        assert!(kinds.contains(&EventKind::ShutdownTriggered));
        assert!(kinds.contains(&EventKind::InterruptFinished));
        assert!(kinds.contains(&EventKind::GroupFinished));
    }

    struct Probe {
        kinds: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Probe {
        async fn on_event(&self, event: &Event) {
            self.kinds.lock().unwrap().push(event.kind);
        }
    }

    #[tokio::test]
    async fn test_subscriber_observes_the_run() {
        let probe = Arc::new(Probe {
            kinds: Mutex::new(Vec::new()),
        });

        let mut group = RunGroup::new().with_subscriber(probe.clone());
        group.add(async { Ok(()) }, async { Ok(()) });
        group.run().await.unwrap();

        // The listener task drains asynchronously after run() returns.
        let seen = timeout(Duration::from_secs(1), async {
            loop {
                if probe
                    .kinds
                    .lock()
                    .unwrap()
                    .contains(&EventKind::GroupFinished)
                {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(seen.is_ok(), "subscriber never saw GroupFinished");
    }
}
