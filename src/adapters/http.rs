//! # Bounded-listener (HTTP-style) actor.
//!
//! [`HttpActor`] wraps any server satisfying the [`HttpServer`] capability
//! set. The execute step serves until the listener closes; the interrupt step
//! requests a graceful drain — stop accepting, let in-flight requests finish —
//! bounded by the configured grace period. With a zero grace period the drain
//! is unbounded: there is no forced-kill path at this layer.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time;

use crate::config::ShutdownConfig;
use crate::error::ActorError;
use crate::events::{Bus, Event, EventKind};
use crate::group::Actor;

/// Capability set the bounded-listener actor depends on.
///
/// The actual server implementation (hyper, axum, a hand-rolled accept loop)
/// stays outside this crate; anything that can serve and drain fits.
#[async_trait]
pub trait HttpServer: Send + Sync + 'static {
    /// Serves connections until the listener closes.
    ///
    /// A normal close should be reported as
    /// [`ActorError::ListenerClosed`], which callers treat as benign.
    async fn serve(&self) -> Result<(), ActorError>;

    /// Stops accepting new connections and waits for in-flight requests to
    /// finish.
    ///
    /// Unbounded; the actor applies the grace period on top of this call.
    async fn shutdown(&self) -> Result<(), ActorError>;
}

/// Builder for the bounded-listener actor.
///
/// # Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use rungroup::{HttpActor, HttpServer, RunGroup, ShutdownConfig};
///
/// # fn demo<S: HttpServer>(group: &mut RunGroup, server: Arc<S>) {
/// let actor = HttpActor::new(server)
///     .with_config(ShutdownConfig::with_grace(Duration::from_secs(10)))
///     .into_actor();
/// group.add_actor(actor);
/// # }
/// ```
pub struct HttpActor<S> {
    server: Arc<S>,
    cfg: ShutdownConfig,
    bus: Option<Bus>,
}

impl<S: HttpServer> HttpActor<S> {
    /// Creates the actor with the default shutdown configuration (5 s grace).
    pub fn new(server: Arc<S>) -> Self {
        Self {
            server,
            cfg: ShutdownConfig::default(),
            bus: None,
        }
    }

    /// Overrides the shutdown configuration.
    ///
    /// A zero grace period means "wait indefinitely for the drain".
    pub fn with_config(mut self, cfg: ShutdownConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Publishes a [`EventKind::DrainTimedOut`] event on the given bus when
    /// the grace period elapses before the drain finishes.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds the actor.
    pub fn into_actor(self) -> Actor {
        let Self { server, cfg, bus } = self;

        let serve_handle = server.clone();
        let execute = async move { serve_handle.serve().await };

        let interrupt = async move {
            match cfg.drain_deadline() {
                None => server.shutdown().await,
                Some(grace) => match time::timeout(grace, server.shutdown()).await {
                    Ok(res) => res,
                    Err(_elapsed) => {
                        if let Some(bus) = &bus {
                            bus.publish(Event::now(EventKind::DrainTimedOut).with_actor("http"));
                        }
                        Err(ActorError::GraceExceeded { grace })
                    }
                },
            }
        };

        Actor::new(execute, interrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    struct MockHttp {
        drain: Duration,
        drained: AtomicBool,
    }

    impl MockHttp {
        fn with_drain(drain: Duration) -> Arc<Self> {
            Arc::new(Self {
                drain,
                drained: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl HttpServer for MockHttp {
        async fn serve(&self) -> Result<(), ActorError> {
            Err(ActorError::ListenerClosed)
        }

        async fn shutdown(&self) -> Result<(), ActorError> {
            time::sleep(self.drain).await;
            self.drained.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_serve_reports_benign_listener_closed() {
        let actor = HttpActor::new(MockHttp::with_drain(Duration::ZERO)).into_actor();
        let err = actor.execute.await.unwrap_err();
        assert!(matches!(err, ActorError::ListenerClosed));
        assert!(err.is_benign());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_within_grace_succeeds() {
        let server = MockHttp::with_drain(Duration::from_millis(50));
        let actor = HttpActor::new(server.clone())
            .with_config(ShutdownConfig::with_grace(Duration::from_millis(200)))
            .into_actor();

        actor.interrupt.expect("has interrupt").await.unwrap();
        assert!(server.drained.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_exceeding_grace_is_bounded() {
        let grace = Duration::from_millis(200);
        let server = MockHttp::with_drain(Duration::from_secs(10));
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        let actor = HttpActor::new(server.clone())
            .with_config(ShutdownConfig::with_grace(grace))
            .with_bus(bus)
            .into_actor();

        let start = time::Instant::now();
        let err = actor.interrupt.expect("has interrupt").await.unwrap_err();

        assert!(matches!(err, ActorError::GraceExceeded { grace: g } if g == grace));
        assert!(start.elapsed() >= grace);
        assert!(start.elapsed() < Duration::from_secs(10));
        assert!(!server.drained.load(Ordering::SeqCst));
        assert_eq!(rx.try_recv().unwrap().kind, EventKind::DrainTimedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_grace_waits_for_the_full_drain() {
        let server = MockHttp::with_drain(Duration::from_secs(60));
        let actor = HttpActor::new(server.clone())
            .with_config(ShutdownConfig::with_grace(Duration::ZERO))
            .into_actor();

        actor.interrupt.expect("has interrupt").await.unwrap();
        assert!(server.drained.load(Ordering::SeqCst));
    }
}
