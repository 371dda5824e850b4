//! The process-wide remote config store.
//!
//! Two-phase model: [`ConfigStore::fetch`] loads values from the
//! [`ConfigResolver`] into a *pending* snapshot, and
//! [`ConfigStore::activate`] publishes the pending snapshot as the *active*
//! one. Readers call [`ConfigStore::current`], which is a lock-free
//! `ArcSwap` load, so they always see one whole snapshot.
//!
//! Activations are serialized by the pending-slot lock: the activation
//! marker only ever grows and the last activation wins.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;

use super::snapshot::RemoteConfigSnapshot;
use super::{ConfigResolver, ConfigVersion, RemoteValues};
use crate::error::ResolverError;

pub struct ConfigStore {
    resolver: ConfigResolver,
    defaults: RemoteValues,
    active: ArcSwap<RemoteConfigSnapshot>,
    pending: Mutex<Option<RemoteConfigSnapshot>>,
    fetches: AtomicU64,
    activations: AtomicU64,
    update_errors: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ConfigStore {
    /// Create a store whose active snapshot holds only `defaults`.
    #[must_use]
    pub fn new(resolver: ConfigResolver, defaults: RemoteValues) -> Self {
        let initial = RemoteConfigSnapshot::from_defaults(defaults.clone());
        Self {
            resolver,
            defaults,
            active: ArcSwap::from_pointee(initial),
            pending: Mutex::new(None),
            fetches: AtomicU64::new(0),
            activations: AtomicU64::new(0),
            update_errors: AtomicU64::new(0),
        }
    }

    /// The active snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<RemoteConfigSnapshot> {
        self.active.load_full()
    }

    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.resolver.primary_name()
    }

    #[must_use]
    pub const fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Whether fetched values are waiting for activation.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }

    /// Version of the most recently fetched values (pending, else active).
    #[must_use]
    pub fn latest_version(&self) -> ConfigVersion {
        lock(&self.pending).as_ref().map_or_else(
            || self.active.load().version().clone(),
            |pending| pending.version().clone(),
        )
    }

    #[must_use]
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn activation_count(&self) -> u64 {
        self.activations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn update_error_count(&self) -> u64 {
        self.update_errors.load(Ordering::Relaxed)
    }

    pub fn record_update_error(&self) {
        self.update_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Load fresh values into the pending slot.
    ///
    /// Returns the keys that differ from the previously fetched values, so
    /// callers can decide whether the change warrants an activation. Values
    /// identical to the active snapshot do not create a pending snapshot.
    pub async fn fetch(&self) -> Result<BTreeSet<String>, ResolverError> {
        let (values, version, source) =
            self.resolver
                .load_with_fallback()
                .await
                .map_err(|e| ResolverError::ConfigFetch {
                    source_name: self.resolver.primary_name(),
                    source: Box::new(e),
                })?;

        let fetched = RemoteConfigSnapshot::fetched(&self.defaults, values, version, source);
        self.fetches.fetch_add(1, Ordering::Relaxed);

        let mut pending = lock(&self.pending);
        let changed = match pending.as_ref() {
            Some(previous) => fetched.changed_keys(previous),
            None => fetched.changed_keys(&self.active.load()),
        };
        tracing::debug!(
            source = source,
            version = fetched.version().short(),
            changed = changed.len(),
            "remote config fetched"
        );
        if changed.is_empty() && pending.is_none() {
            return Ok(changed);
        }
        *pending = Some(fetched);
        Ok(changed)
    }

    /// Publish the pending snapshot. Returns `false` when nothing was pending.
    pub fn activate(&self) -> bool {
        let mut pending = lock(&self.pending);
        let Some(snapshot) = pending.take() else {
            return false;
        };

        let activation = self.active.load().activation() + 1;
        let snapshot = snapshot.activated(activation);
        tracing::info!(
            activation,
            version = snapshot.version().short(),
            model = snapshot.model_name(),
            "remote config activated"
        );
        self.active.store(Arc::new(snapshot));
        self.activations.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// [`fetch`](Self::fetch) followed by [`activate`](Self::activate).
    pub async fn fetch_and_activate(&self) -> Result<bool, ResolverError> {
        self.fetch().await?;
        Ok(self.activate())
    }
}
