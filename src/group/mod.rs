//! Coordination core: actor registration and first-exit-wins orchestration.
//!
//! Internal modules:
//! - [`actor`]: the registered unit of work (execute + optional interrupt);
//! - [`group`]: the [`RunGroup`] orchestrator.

mod actor;
#[allow(clippy::module_inception)]
mod group;

pub use actor::{Actor, Outcome};
pub use group::RunGroup;
