// ── Scan discovery join ──
//
// Resolves a scan's discoveries into display rows in two dependent
// phases: the referenced devices first, then the owners of those
// devices. Phase 2 only accepts phase 1's output type, so it cannot be
// started early. Missing data renders as absent fields, never an error.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{
    DeviceId, DeviceSummary, Discovery, DiscoveryId, MacAddress, PersonId, PersonSummary, Scan,
    ScanId,
};
use crate::projection::LoadOutcome;
use crate::store::{DeviceFilter, EntityStore, Generation, PersonFilter, Ticket};

// ── Stage outputs ───────────────────────────────────────────────────

/// Phase 1 output: devices keyed by id, in server response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDevices(IndexMap<DeviceId, DeviceSummary>);

impl ResolvedDevices {
    pub fn get(&self, id: DeviceId) -> Option<&DeviceSummary> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceSummary> {
        self.0.values()
    }
}

impl FromIterator<DeviceSummary> for ResolvedDevices {
    fn from_iter<I: IntoIterator<Item = DeviceSummary>>(iter: I) -> Self {
        Self(iter.into_iter().map(|d| (d.id, d)).collect())
    }
}

/// Phase 2 output: owners keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOwners(IndexMap<PersonId, PersonSummary>);

impl ResolvedOwners {
    pub fn get(&self, id: PersonId) -> Option<&PersonSummary> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PersonSummary> for ResolvedOwners {
    fn from_iter<I: IntoIterator<Item = PersonSummary>>(iter: I) -> Self {
        Self(iter.into_iter().map(|p| (p.id, p)).collect())
    }
}

// ── Rows ────────────────────────────────────────────────────────────

/// One joined display row. Discovery fields are always present; device
/// and owner fields are `None` until (and unless) they resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryRow {
    pub discovery_id: DiscoveryId,
    pub device_id: DeviceId,
    pub mac_address: Option<MacAddress>,
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub is_primary: Option<bool>,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
}

// ── Pure phases ─────────────────────────────────────────────────────

/// Referenced device ids, de-duplicated, in first-seen order.
pub fn unique_device_ids(discoveries: &[Discovery]) -> IndexSet<DeviceId> {
    discoveries.iter().map(|d| d.device_id).collect()
}

/// Non-null owner ids of resolved devices, de-duplicated.
pub fn unique_owner_ids(devices: &ResolvedDevices) -> IndexSet<PersonId> {
    devices.iter().filter_map(|d| d.owner_id).collect()
}

/// Phase 1. No request is made when there is nothing to resolve.
pub async fn resolve_devices(
    store: &dyn EntityStore,
    discoveries: &[Discovery],
) -> Result<ResolvedDevices, CoreError> {
    let ids = unique_device_ids(discoveries);
    if ids.is_empty() {
        return Ok(ResolvedDevices::default());
    }
    let devices = store
        .fetch_devices_by_filter(&DeviceFilter::by_ids(ids))
        .await?;
    Ok(devices.into_iter().collect())
}

/// Phase 2. No request is made when no resolved device has an owner.
pub async fn resolve_owners(
    store: &dyn EntityStore,
    devices: &ResolvedDevices,
) -> Result<ResolvedOwners, CoreError> {
    let ids = unique_owner_ids(devices);
    if ids.is_empty() {
        return Ok(ResolvedOwners::default());
    }
    let people = store
        .fetch_people_by_filter(&PersonFilter::by_ids(ids))
        .await?;
    Ok(people.into_iter().collect())
}

/// Join discoveries against whatever has resolved so far, preserving
/// discovery order.
pub fn join_rows(
    discoveries: &[Discovery],
    devices: Option<&ResolvedDevices>,
    owners: Option<&ResolvedOwners>,
) -> Vec<DiscoveryRow> {
    discoveries
        .iter()
        .map(|disc| {
            let device = devices.and_then(|d| d.get(disc.device_id));
            let owner = device
                .and_then(|d| d.owner_id)
                .and_then(|id| owners.and_then(|o| o.get(id)));
            DiscoveryRow {
                discovery_id: disc.id,
                device_id: disc.device_id,
                mac_address: device.map(|d| d.mac_address.clone()),
                name: device.map(|d| d.name.clone()),
                owner_name: owner.map(|p| p.name.clone()),
                is_primary: device.and_then(|d| d.is_primary),
                hostname: disc.hostname.clone(),
                ip_address: disc.ip_address.clone(),
            }
        })
        .collect()
}

// ── Stateful joiner ─────────────────────────────────────────────────

/// Published state of a [`DiscoveryJoiner`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinState {
    pub scan: Option<ScanId>,
    pub discoveries: Arc<Vec<Discovery>>,
    /// `None` until phase 1 resolves.
    pub devices: Option<Arc<ResolvedDevices>>,
    /// `None` until phase 2 resolves.
    pub owners: Option<Arc<ResolvedOwners>>,
}

impl JoinState {
    pub fn rows(&self) -> Vec<DiscoveryRow> {
        join_rows(
            &self.discoveries,
            self.devices.as_deref(),
            self.owners.as_deref(),
        )
    }
}

/// Keyed by scan identity: loading a different scan discards any
/// in-flight work for the previous one.
pub struct DiscoveryJoiner {
    store: Arc<dyn EntityStore>,
    state: Generation<JoinState>,
}

impl DiscoveryJoiner {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            state: Generation::default(),
        }
    }

    /// Run both phases for `scan`, publishing after each one.
    ///
    /// A phase 1 failure leaves devices and owners unresolved; a phase 2
    /// failure leaves the device columns populated and owners unresolved.
    pub async fn load(&self, scan: &Scan) -> Result<LoadOutcome, CoreError> {
        let discoveries = Arc::new(scan.discoveries.clone());
        let ticket = self.state.begin(|s| {
            *s = JoinState {
                scan: Some(scan.id),
                discoveries: Arc::clone(&discoveries),
                devices: None,
                owners: None,
            };
        });

        let devices = match resolve_devices(self.store.as_ref(), &discoveries).await {
            Ok(devices) => Arc::new(devices),
            Err(e) => return self.failed(ticket, scan.id, "device", e),
        };
        let published = Arc::clone(&devices);
        if !self.state.apply(ticket, |s| s.devices = Some(published)) {
            debug!(scan = %scan.id, "discarding stale device resolution");
            return Ok(LoadOutcome::Superseded);
        }

        let owners = match resolve_owners(self.store.as_ref(), &devices).await {
            Ok(owners) => Arc::new(owners),
            Err(e) => return self.failed(ticket, scan.id, "owner", e),
        };
        if !self.state.apply(ticket, |s| s.owners = Some(owners)) {
            debug!(scan = %scan.id, "discarding stale owner resolution");
            return Ok(LoadOutcome::Superseded);
        }

        debug!(
            scan = %scan.id,
            discoveries = discoveries.len(),
            devices = devices.len(),
            "discoveries joined"
        );
        Ok(LoadOutcome::Applied)
    }

    fn failed(
        &self,
        ticket: Ticket,
        scan: ScanId,
        phase: &str,
        err: CoreError,
    ) -> Result<LoadOutcome, CoreError> {
        if !self.state.is_current(ticket) {
            debug!(%scan, phase, error = %err, "ignoring failure of superseded join");
            return Ok(LoadOutcome::Superseded);
        }
        warn!(%scan, phase, error = %err, "discovery join fetch failed");
        Err(err)
    }

    /// Rows for the current scan, joined against whatever has resolved.
    pub fn rows(&self) -> Vec<DiscoveryRow> {
        self.state.snapshot().rows()
    }

    pub fn state(&self) -> JoinState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<JoinState> {
        self.state.subscribe()
    }
}
