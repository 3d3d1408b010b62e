// netdex-api: Async Rust client for the netdex inventory server API

pub mod client;
mod devices;
pub mod error;
pub mod models;
mod people;
mod scans;
pub mod transport;
mod vendor;

pub use client::InventoryClient;
pub use error::Error;
pub use models::{
    DeviceQuery, DeviceResponse, DeviceSummaryResponse, DiscoveryResponse, PersonQuery,
    PersonSummaryResponse, ScanResponse, ScanSummaryResponse, UpdateDeviceRequest,
};
pub use transport::{TlsMode, TransportConfig};
