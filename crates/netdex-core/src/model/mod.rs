// ── Domain model ──
//
// Canonical types consumed by the core components. Wire DTOs from
// `netdex-api` are converted into these in `crate::convert`.

pub mod device;
pub mod entity_id;
pub mod person;
pub mod scan;

pub use device::{Device, DeviceSummary, DeviceUpdate};
pub use entity_id::{DeviceId, DiscoveryId, MacAddress, PersonId, ScanId};
pub use person::{Person, PersonSummary};
pub use scan::{Discovery, Scan, ScanSummary};
