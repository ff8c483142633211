//! Adapters translating concrete long-running resources into actors.
//!
//! Each adapter closes over its resource (a signal wait, a drainable
//! listener, a dual-phase server handle) and the shared shutdown
//! configuration, producing one [`Actor`](crate::Actor) for registration:
//! - [`signal`]: OS termination signals as a first-class actor;
//! - [`http`]: bounded-listener serve/drain (no forced path);
//! - [`rpc`]: dual-phase graceful-vs-forced stop race.

mod http;
mod rpc;
mod signal;

pub use http::{HttpActor, HttpServer};
pub use rpc::{RpcActor, RpcServer};
pub use signal::{SignalActor, TermSignal};
