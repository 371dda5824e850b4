//! Source polling that turns remote changes into [`UpdateEvent`]s.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use super::{ConfigUpdate, UpdateEvent};
use crate::config::store::ConfigStore;
use crate::error::ResolverError;

pub struct RealtimeUpdates {
    store: Arc<ConfigStore>,
    interval: Duration,
    events: mpsc::UnboundedSender<UpdateEvent>,
}

impl RealtimeUpdates {
    /// Create the poller and the receiving end of its update channel.
    #[must_use]
    pub fn new(
        store: Arc<ConfigStore>,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<UpdateEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                store,
                interval,
                events,
            },
            rx,
        )
    }

    /// Check the source once. Returns `false` once the receiver is gone.
    pub async fn poll_once(&self) -> bool {
        let current = self.store.latest_version();
        let source = self.store.resolver().primary();

        let event = match source.has_changed(&current).await {
            Ok(false) => return true,
            Ok(true) => match self.store.fetch().await {
                Ok(updated_keys) if updated_keys.is_empty() => return true,
                Ok(updated_keys) => {
                    tracing::info!(keys = ?updated_keys, "remote config updated");
                    UpdateEvent::Updated(ConfigUpdate { updated_keys })
                }
                Err(e) => UpdateEvent::Failed(e),
            },
            Err(e) => UpdateEvent::Failed(ResolverError::ConfigUpdate {
                source_name: source.name(),
                source: Box::new(e),
            }),
        };

        self.events.send(event).is_ok()
    }

    /// Poll every `interval` until `shutdown` fires or the receiver is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.interval);
        interval.tick().await; // Skip first immediate tick

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown.changed() => {
                    tracing::debug!("realtime updates shutting down");
                    return;
                }
            }

            if !self.poll_once().await {
                tracing::debug!("update listener gone, stopping realtime updates");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::snapshot::builtin_defaults;
    use crate::config::sources::memory::MemorySource;
    use crate::config::ConfigResolver;

    fn setup(source: MemorySource) -> (RealtimeUpdates, mpsc::UnboundedReceiver<UpdateEvent>) {
        let store = Arc::new(ConfigStore::new(
            ConfigResolver::new(Box::new(source), None),
            builtin_defaults(),
        ));
        RealtimeUpdates::new(store, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn change_is_published_once() {
        let source = MemorySource::from_pairs([("model_name", "model-A")]);
        let (updates, mut rx) = setup(source.clone());

        assert!(updates.poll_once().await);
        match rx.try_recv().unwrap() {
            UpdateEvent::Updated(update) => assert!(update.updated_keys.contains("model_name")),
            UpdateEvent::Failed(e) => panic!("unexpected failure: {e}"),
        }

        assert!(updates.poll_once().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn source_failure_is_published_as_error() {
        let source = MemorySource::default();
        source.set_unavailable(true);
        let (updates, mut rx) = setup(source);

        assert!(updates.poll_once().await);
        assert!(matches!(
            rx.try_recv().unwrap(),
            UpdateEvent::Failed(ResolverError::ConfigUpdate { .. })
        ));
    }

    #[tokio::test]
    async fn dropped_receiver_stops_polling() {
        let source = MemorySource::from_pairs([("model_name", "model-A")]);
        let (updates, rx) = setup(source);
        drop(rx);
        assert!(!updates.poll_once().await);
    }
}
