// ── Scan / discovery domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::{DeviceId, DiscoveryId, ScanId};

/// One sighting of a device during a scan.
///
/// `hostname` and `ip_address` are point-in-time observations; the
/// referenced device may since have been renamed or reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    pub id: DiscoveryId,
    pub device_id: DeviceId,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
}

/// A bounded collection of discoveries produced by one inventory run.
/// Discovery order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    pub id: ScanId,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub discoveries: Vec<Discovery>,
}

/// Scan listing row (no discoveries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub id: ScanId,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
