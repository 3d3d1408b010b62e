// ── Inventory facade ──
//
// Owns the store and notification sink and hands out the core
// components wired to them. Front ends talk to this, not to the store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::error::CoreError;
use crate::joiner::DiscoveryJoiner;
use crate::model::{Device, DeviceId, MacAddress, PersonSummary, Scan, ScanId, ScanSummary};
use crate::notify::{Notifier, TracingNotifier};
use crate::projection::DeviceListProjection;
use crate::session::DeviceEditSession;
use crate::store::{EntityStore, PersonFilter, RemoteStore};

/// Entry point into the inventory. Cheaply cloneable.
#[derive(Clone)]
pub struct Inventory {
    store: Arc<dyn EntityStore>,
    notifier: Arc<dyn Notifier>,
}

impl Inventory {
    /// Connect to the server described by `config`.
    pub fn connect(config: &ServerConfig) -> Result<Self, CoreError> {
        let store = RemoteStore::connect(config)?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Use an arbitrary store (tests, alternative backends).
    pub fn with_store(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    // ── Components ───────────────────────────────────────────────────

    pub fn device_list(&self) -> DeviceListProjection {
        DeviceListProjection::new(Arc::clone(&self.store))
    }

    pub fn discovery_joiner(&self) -> DiscoveryJoiner {
        DiscoveryJoiner::new(Arc::clone(&self.store))
    }

    /// Fetch the canonical device and open a session seeded from it.
    pub async fn edit_session(&self, id: DeviceId) -> Result<DeviceEditSession, CoreError> {
        let device = self.store.fetch_device(id).await?;
        debug!(device = %id, "edit session opened");
        Ok(DeviceEditSession::new(Arc::new(device)))
    }

    /// Commit `session` through this inventory's store and notifier.
    pub async fn commit(&self, session: &mut DeviceEditSession) -> Result<Arc<Device>, CoreError> {
        session
            .commit(self.store.as_ref(), self.notifier.as_ref())
            .await
    }

    /// Refresh the session's vendor and return it.
    pub async fn refresh_vendor(&self, session: &mut DeviceEditSession) -> String {
        session.refresh_vendor(self.store.as_ref()).await.to_owned()
    }

    // ── Plain reads ──────────────────────────────────────────────────

    pub async fn device(&self, id: DeviceId) -> Result<Device, CoreError> {
        self.store.fetch_device(id).await
    }

    /// Vendor name for a MAC. Best effort: a failed lookup is logged and
    /// yields an empty string.
    pub async fn vendor(&self, mac: &MacAddress) -> String {
        self.store.lookup_vendor(mac).await.unwrap_or_else(|e| {
            warn!(%mac, error = %e, "vendor lookup failed");
            String::new()
        })
    }

    pub async fn people(&self) -> Result<Vec<PersonSummary>, CoreError> {
        self.store
            .fetch_people_by_filter(&PersonFilter::default())
            .await
    }

    pub async fn scans(&self) -> Result<Vec<ScanSummary>, CoreError> {
        self.store.list_scans().await
    }

    pub async fn scan(&self, id: ScanId) -> Result<Scan, CoreError> {
        self.store.fetch_scan(id).await
    }
}
