//! # rungroup
//!
//! **rungroup** is a lifecycle-coordination primitive for processes composed
//! of several independently running components — a network listener, a signal
//! watcher, a background worker — that must start together and where the exit
//! of *any one* of them triggers an orderly, bounded-time shutdown of all.
//!
//! ## Architecture
//! ```text
//!   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!   │ SignalActor  │  │  HttpActor   │  │   RpcActor   │   (+ ad-hoc actors
//!   └──────┬───────┘  └──────┬───────┘  └──────┬───────┘    via add/add_ctx)
//!          ▼                 ▼                 ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  RunGroup                                               │
//! │  - spawns every execute step on its own task            │
//! │  - first execute to return cancels the shared token     │
//! │  - interrupt steps run only after that cancellation     │
//! │  - joins all units, returns the first observed failure  │
//! │  - Bus broadcasts lifecycle events to subscribers       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//! - **First exit wins**: whichever execute step returns first — success or
//!   failure — takes the whole group down. Actors are never restarted.
//! - **Idempotent cancellation**: the shared token is a single broadcast;
//!   repeated cancels are no-ops and nothing can un-cancel it.
//! - **No leaked work**: [`RunGroup::run`] returns only after every execute
//!   and interrupt unit has been joined.
//! - **First-observed failure**: when several units fail, the one the join
//!   loop observes first is returned and the rest are discarded. This follows
//!   completion order, not registration order.
//!
//! ## Features
//! | Area           | Description                                          | Key types / traits                  |
//! |----------------|------------------------------------------------------|-------------------------------------|
//! | **Core**       | Register actors, run under first-exit-wins.          | [`RunGroup`], [`Actor`]             |
//! | **Adapters**   | Signals, drainable listeners, dual-phase servers.    | [`SignalActor`], [`HttpActor`], [`RpcActor`] |
//! | **Capability traits** | What the wrapped servers must provide.        | [`HttpServer`], [`RpcServer`]       |
//! | **Shutdown**   | One tunable: the grace period.                       | [`ShutdownConfig`]                  |
//! | **Errors**     | Why an actor stopped.                                | [`ActorError`]                      |
//! | **Events**     | Observational lifecycle stream.                      | [`Bus`], [`Event`], [`Subscribe`]   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use rungroup::{ActorError, RunGroup, SignalActor, TermSignal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut group = RunGroup::new();
//!
//!     // Let SIGINT/SIGTERM/SIGQUIT take the group down.
//!     // (Injected source here so the example terminates on its own.)
//!     group.add_actor(
//!         SignalActor::new(TermSignal::TERMINATION)
//!             .with_source(async { Ok(TermSignal::Terminate) })
//!             .into_actor(),
//!     );
//!
//!     // A worker that stops when the group shuts down.
//!     group.add_ctx(|token| async move {
//!         token.cancelled().await;
//!         Ok(())
//!     });
//!
//!     match group.run().await {
//!         Ok(()) => {}
//!         Err(e) if e.is_benign() => println!("stopped: {e}"),
//!         Err(e) => eprintln!("failed: {e}"),
//!     }
//! }
//! ```

mod adapters;
mod config;
mod error;
mod events;
mod group;
mod subscribers;

// ---- Public re-exports ----

pub use adapters::{HttpActor, HttpServer, RpcActor, RpcServer, SignalActor, TermSignal};
pub use config::{ShutdownConfig, DEFAULT_GRACE};
pub use error::ActorError;
pub use events::{Bus, Event, EventKind};
pub use group::{Actor, Outcome, RunGroup};
pub use subscribers::Subscribe;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
