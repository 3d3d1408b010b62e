// Wire types for the inventory server's JSON API.
//
// These mirror the server's payloads field-for-field. Core converts them
// into domain types; nothing outside `netdex-core` should depend on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /api/devices` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummaryResponse {
    pub id: u64,
    pub mac_address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// `GET /api/devices/{id}` and `PUT /api/devices/{id}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceResponse {
    pub id: u64,
    pub mac_address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Request body for `PUT /api/devices/{id}`.
///
/// `owner_id` is always serialized; an explicit `null` unassigns the device.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDeviceRequest<'a> {
    pub name: &'a str,
    pub note: &'a str,
    pub owner_id: Option<u64>,
    pub is_primary: bool,
}

/// `GET /api/people` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummaryResponse {
    pub id: u64,
    pub name: String,
}

/// `GET /api/scans` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummaryResponse {
    pub id: u64,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

/// `GET /api/scans/{id}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub id: u64,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discoveries: Vec<DiscoveryResponse>,
}

/// One sighting inside a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    pub id: u64,
    pub device_id: u64,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

/// Filter for `GET /api/devices`. Every field is optional; an empty
/// filter lists every device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceQuery {
    pub ids: Option<Vec<u64>>,
    pub mac_address: Option<String>,
    pub owner_id: Option<u64>,
    pub is_primary: Option<bool>,
}

impl DeviceQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref ids) = self.ids {
            params.push(("ids", join_ids(ids)));
        }
        if let Some(ref mac) = self.mac_address {
            params.push(("mac_address", mac.clone()));
        }
        if let Some(owner) = self.owner_id {
            params.push(("owner_id", owner.to_string()));
        }
        if let Some(primary) = self.is_primary {
            params.push(("is_primary", primary.to_string()));
        }
        params
    }
}

/// Filter for `GET /api/people`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonQuery {
    pub ids: Option<Vec<u64>>,
}

impl PersonQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        self.ids
            .as_ref()
            .map(|ids| vec![("ids", join_ids(ids))])
            .unwrap_or_default()
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
