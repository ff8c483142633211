//! # Dual-phase (RPC-style) actor.
//!
//! [`RpcActor`] wraps any server satisfying the [`RpcServer`] capability set.
//! Its interrupt step races a graceful stop (wait for all in-flight calls to
//! drain) against a timer set to the grace period. If the graceful stop wins,
//! teardown is clean and no forced stop is ever issued. If the timer wins, a
//! forced stop is issued exactly once, abandoning in-flight calls, and the
//! interrupt returns without waiting for the graceful path any further.
//!
//! Forced stop is a safety valve, never the default path. It is observable
//! both through the [`RpcServer::force_stop`] call and, with
//! [`RpcActor::with_bus`], as an [`EventKind::ForcedStop`] event.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time;

use crate::config::ShutdownConfig;
use crate::error::ActorError;
use crate::events::{Bus, Event, EventKind};
use crate::group::Actor;

/// Capability set the dual-phase actor depends on.
///
/// Matches what gRPC-style server stacks expose: serve, a blocking graceful
/// stop, and an immediate stop.
#[async_trait]
pub trait RpcServer: Send + Sync + 'static {
    /// Serves accepted connections until told to stop.
    async fn serve(&self) -> Result<(), ActorError>;

    /// Stops accepting new calls and resolves once all in-flight calls have
    /// drained.
    async fn graceful_stop(&self);

    /// Terminates immediately, abandoning in-flight calls.
    fn force_stop(&self);
}

/// Builder for the dual-phase actor.
///
/// # Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use rungroup::{RpcActor, RpcServer, RunGroup, ShutdownConfig};
///
/// # fn demo<S: RpcServer>(group: &mut RunGroup, server: Arc<S>) {
/// let actor = RpcActor::new(server)
///     .with_config(ShutdownConfig::with_grace(Duration::from_secs(15)))
///     .into_actor();
/// group.add_actor(actor);
/// # }
/// ```
pub struct RpcActor<S> {
    server: Arc<S>,
    cfg: ShutdownConfig,
    bus: Option<Bus>,
}

impl<S: RpcServer> RpcActor<S> {
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
    /// An unbounded race is not meaningful here, so a zero grace period is
    /// clamped to the default.
    pub fn with_config(mut self, cfg: ShutdownConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Publishes [`EventKind::GracefulStopped`] / [`EventKind::ForcedStop`]
    /// events on the given bus.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds the actor.
    pub fn into_actor(self) -> Actor {
        let Self { server, cfg, bus } = self;
        let grace = cfg.grace_or_default();

        let serve_handle = server.clone();
        let execute = async move { serve_handle.serve().await };

        let interrupt = async move {
            let graceful = server.graceful_stop();
            tokio::pin!(graceful);
            tokio::select! {
                // The graceful path wins a simultaneous wakeup.
                biased;
                _ = &mut graceful => {
                    if let Some(bus) = &bus {
                        bus.publish(Event::now(EventKind::GracefulStopped).with_actor("rpc"));
                    }
                }
                _ = time::sleep(grace) => {
                    server.force_stop();
                    if let Some(bus) = &bus {
                        bus.publish(Event::now(EventKind::ForcedStop).with_actor("rpc"));
                    }
                }
            }
            Ok(())
        };

        Actor::new(execute, interrupt)
    }
}
