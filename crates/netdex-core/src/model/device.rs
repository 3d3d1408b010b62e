// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::{DeviceId, MacAddress, PersonId};

/// The canonical device record as stored by the inventory server.
///
/// The console never owns this value; edit sessions hold drafts derived
/// from it (see [`DeviceEditSession`](crate::DeviceEditSession)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    /// Natural key. Display-only: never edited through a session.
    pub mac_address: MacAddress,
    pub name: String,
    pub note: String,
    /// `None` means "unassigned".
    pub owner_id: Option<PersonId>,
    /// `None` until someone classifies the device.
    pub is_primary: Option<bool>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Device {
    /// Project down to the list/summary shape.
    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            id: self.id,
            mac_address: self.mac_address.clone(),
            name: self.name.clone(),
            owner_id: self.owner_id,
            is_primary: self.is_primary,
            first_seen: self.first_seen,
            last_seen: self.last_seen,
        }
    }
}

/// Display-relevant subset of [`Device`], returned by filtered listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: DeviceId,
    pub mac_address: MacAddress,
    pub name: String,
    pub owner_id: Option<PersonId>,
    pub is_primary: Option<bool>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Full replacement of a device's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUpdate {
    pub id: DeviceId,
    pub name: String,
    pub note: String,
    pub owner_id: Option<PersonId>,
    pub is_primary: bool,
}
