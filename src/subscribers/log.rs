use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Base subscriber that logs events to stdout.
///
/// Enabled via the `logging` feature. Useful for demos and debugging.
#[derive(Default)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ActorFinished => {
                println!("[actor-finished] err={:?}", e.error);
            }
            EventKind::ShutdownTriggered => {
                println!("[shutdown-triggered]");
            }
            EventKind::InterruptFinished => {
                println!("[interrupt-finished] err={:?}", e.error);
            }
            EventKind::GroupFinished => {
                println!("[group-finished] err={:?}", e.error);
            }
            EventKind::SignalReceived => {
                println!("[signal] actor={:?} signal={:?}", e.actor, e.signal);
            }
            EventKind::DrainTimedOut => {
                println!("[drain-timed-out] actor={:?}", e.actor);
            }
            EventKind::GracefulStopped => {
                println!("[graceful-stopped] actor={:?}", e.actor);
            }
            EventKind::ForcedStop => {
                println!("[forced-stop] actor={:?}", e.actor);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
