//! # Event subscribers.
//!
//! [`Subscribe`] is the extension point for observing group lifecycle events
//! (logging, metrics, test probes). Each subscriber is driven by a dedicated
//! listener task fed from the group's [`Bus`](crate::Bus); slow subscribers
//! lag and skip old events, they never block the coordination protocol.

use async_trait::async_trait;

use crate::events::Event;

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated listener task. Implementations should
/// avoid blocking the runtime (prefer async I/O and cooperative waits).
///
/// # Example
/// ```rust
/// use async_trait::async_trait;
/// use rungroup::{Event, Subscribe};
///
/// struct Audit;
///
/// #[async_trait]
/// impl Subscribe for Audit {
///     async fn on_event(&self, event: &Event) {
///         let _ = event; // write an audit record...
///     }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
