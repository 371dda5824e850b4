//! Activation policy for live updates.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::UpdateEvent;
use crate::config::snapshot::MODEL_NAME_KEY;
use crate::config::store::ConfigStore;

pub const DEFAULT_ACTIVATION_KEYS: &[&str] = &[MODEL_NAME_KEY];

pub struct UpdateListener {
    store: Arc<ConfigStore>,
    activation_keys: BTreeSet<String>,
}

impl UpdateListener {
    #[must_use]
    pub fn new<I, K>(store: Arc<ConfigStore>, activation_keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            store,
            activation_keys: activation_keys.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_default_keys(store: Arc<ConfigStore>) -> Self {
        Self::new(store, DEFAULT_ACTIVATION_KEYS.iter().copied())
    }

    #[must_use]
    pub const fn activation_keys(&self) -> &BTreeSet<String> {
        &self.activation_keys
    }

    /// React to one event. Returns whether a snapshot was activated.
    pub fn handle(&self, event: UpdateEvent) -> bool {
        match event {
            UpdateEvent::Updated(update) => {
                tracing::debug!(keys = ?update.updated_keys, "config update received");
                if update.updated_keys.is_disjoint(&self.activation_keys) {
                    tracing::debug!("no activation-triggering key changed, values stay pending");
                    return false;
                }
                self.store.activate()
            }
            UpdateEvent::Failed(error) => {
                self.store.record_update_error();
                tracing::warn!(error = %error, "config update error");
                false
            }
        }
    }

    /// Drain `events` until the channel closes or `shutdown` fires.
    pub async fn run(
        self,
        mut events: mpsc::UnboundedReceiver<UpdateEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        self.handle(event);
                    }
                    None => return,
                },
                _ = shutdown.changed() => {
                    tracing::debug!("update listener shutting down");
                    return;
                }
            }
        }
    }
}
