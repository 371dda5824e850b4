//! Live configuration updates.
//!
//! [`realtime::RealtimeUpdates`] watches the config source, fetches changes
//! into the store's pending slot, and publishes an [`UpdateEvent`] per
//! change. [`listener::UpdateListener`] consumes those events and activates
//! the pending snapshot when an activation-triggering key changed.
//!
//! ```text
//! source ──has_changed──▶ RealtimeUpdates ──fetch──▶ ConfigStore (pending)
//!                               │
//!                        UpdateEvent (mpsc)
//!                               ▼
//!                        UpdateListener ──activate──▶ ConfigStore (active)
//! ```

pub mod listener;
pub mod realtime;

use std::collections::BTreeSet;

use crate::error::ResolverError;

pub use listener::UpdateListener;
pub use realtime::RealtimeUpdates;

/// Keys that changed in the most recent fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub updated_keys: BTreeSet<String>,
}

#[derive(Debug)]
pub enum UpdateEvent {
    Updated(ConfigUpdate),
    Failed(ResolverError),
}
