//! Correlation and edit-state logic between `netdex-api` and front ends.
//!
//! - **[`Inventory`]**: facade owning an [`EntityStore`] and a
//!   [`Notifier`]; hands out the components below.
//!
//! - **[`EntityStore`]**: typed async accessors over the remote inventory,
//!   with no caching. [`RemoteStore`] is the HTTP implementation.
//!
//! - **[`DiscoveryJoiner`]**: joins a scan's discoveries to their devices and
//!   then to the devices' owners, in two dependent batched fetches.
//!   Partially resolved data renders as absent fields.
//!
//! - **[`DeviceListProjection`]**: owner-filtered device listing in a
//!   deterministic display order ([`sort_for_display`]).
//!
//! - **[`DeviceEditSession`]**: local draft of one device's editable fields
//!   with dirty tracking, committed through the store.
//!
//! Keyed loads publish through `tokio::sync::watch` channels behind a
//! generation guard ([`store::Generation`]), so a response for a stale key
//! never replaces the state for the current one.

pub mod config;
pub mod convert;
pub mod error;
pub mod inventory;
pub mod joiner;
pub mod model;
pub mod notify;
pub mod projection;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ServerConfig, TlsVerification};
pub use error::CoreError;
pub use inventory::Inventory;
pub use joiner::{DiscoveryJoiner, DiscoveryRow, JoinState, ResolvedDevices, ResolvedOwners};
pub use notify::{Notifier, TracingNotifier};
pub use projection::{DeviceListProjection, ListState, LoadOutcome, sort_for_display};
pub use session::{
    DeviceDraft, DeviceEditSession, FieldChange, UNASSIGNED_LABEL, owner_choices, owner_label,
};
pub use store::{DeviceFilter, EntityStore, PersonFilter, RemoteStore};

pub use model::{
    Device, DeviceId, DeviceSummary, DeviceUpdate, Discovery, DiscoveryId, MacAddress, Person,
    PersonId, PersonSummary, Scan, ScanId, ScanSummary,
};
