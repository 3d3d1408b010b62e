// ── Entity store seam ──
//
// Typed async accessors over the remote inventory. Nothing here caches:
// every call is a fresh round-trip. Components depend on the trait so
// tests can substitute an in-memory store.

pub mod generation;
mod remote;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::model::{
    Device, DeviceId, DeviceSummary, DeviceUpdate, MacAddress, PersonId, PersonSummary, Scan,
    ScanId, ScanSummary,
};

pub use generation::{Generation, Ticket};
pub use remote::RemoteStore;

/// Predicate for [`EntityStore::fetch_devices_by_filter`].
///
/// Every field is optional; `Default` matches every device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    pub ids: Option<Vec<DeviceId>>,
    pub mac_address: Option<MacAddress>,
    pub owner_id: Option<PersonId>,
    pub is_primary: Option<bool>,
}

impl DeviceFilter {
    pub fn by_ids(ids: impl IntoIterator<Item = DeviceId>) -> Self {
        Self {
            ids: Some(ids.into_iter().collect()),
            ..Self::default()
        }
    }

    /// `None` yields the unfiltered listing.
    pub fn by_owner(owner: Option<PersonId>) -> Self {
        Self {
            owner_id: owner,
            ..Self::default()
        }
    }
}

/// Predicate for [`EntityStore::fetch_people_by_filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
    pub ids: Option<Vec<PersonId>>,
}

impl PersonFilter {
    pub fn by_ids(ids: impl IntoIterator<Item = PersonId>) -> Self {
        Self {
            ids: Some(ids.into_iter().collect()),
        }
    }
}

/// Remote data collaborator for the core components.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn fetch_devices_by_filter(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Vec<DeviceSummary>, CoreError>;

    async fn fetch_people_by_filter(
        &self,
        filter: &PersonFilter,
    ) -> Result<Vec<PersonSummary>, CoreError>;

    async fn fetch_device(&self, id: DeviceId) -> Result<Device, CoreError>;

    /// Replace the editable fields of one device, returning the new
    /// canonical record.
    async fn update_device(&self, update: &DeviceUpdate) -> Result<Device, CoreError>;

    async fn list_scans(&self) -> Result<Vec<ScanSummary>, CoreError>;

    async fn fetch_scan(&self, id: ScanId) -> Result<Scan, CoreError>;

    /// Vendor name for a MAC address, or an empty string when unknown.
    async fn lookup_vendor(&self, mac: &MacAddress) -> Result<String, CoreError>;
}
