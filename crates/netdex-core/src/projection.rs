// ── Device list projection ──
//
// Owner-filtered device listing with a deterministic display order.
// Results are published through a generation-guarded watch channel, so a
// slow response for a previous owner never overwrites the current one.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{DeviceSummary, PersonId};
use crate::store::{DeviceFilter, EntityStore, Generation};

/// Whether a finished load made it into the published state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load started before this one resolved; its result was dropped.
    Superseded,
}

/// Published state of a [`DeviceListProjection`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    /// The owner filter of the most recent load (`None` = every device).
    pub owner: Option<PersonId>,
    /// Sorted devices, or `None` while unresolved.
    pub devices: Option<Arc<Vec<DeviceSummary>>>,
}

pub struct DeviceListProjection {
    store: Arc<dyn EntityStore>,
    state: Generation<ListState>,
}

impl DeviceListProjection {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            state: Generation::default(),
        }
    }

    /// Fetch every device owned by `owner` (or every device, when `None`)
    /// and publish them in display order.
    ///
    /// Changing the owner clears the previous result immediately; reloading
    /// the same owner keeps the old rows visible until the new ones land.
    /// A failed fetch leaves the state as it was.
    pub async fn load(&self, owner: Option<PersonId>) -> Result<LoadOutcome, CoreError> {
        let ticket = self.state.begin(|s| {
            if s.owner != owner {
                s.devices = None;
            }
            s.owner = owner;
        });

        let fetched = self
            .store
            .fetch_devices_by_filter(&DeviceFilter::by_owner(owner))
            .await;

        match fetched {
            Ok(rows) => {
                let sorted = Arc::new(sort_for_display(&rows));
                if self.state.apply(ticket, |s| s.devices = Some(sorted)) {
                    debug!(?owner, count = rows.len(), "device list loaded");
                    Ok(LoadOutcome::Applied)
                } else {
                    debug!(?owner, generation = ticket.get(), "discarding stale device list");
                    Ok(LoadOutcome::Superseded)
                }
            }
            Err(e) if !self.state.is_current(ticket) => {
                debug!(?owner, error = %e, "ignoring failure of superseded device list load");
                Ok(LoadOutcome::Superseded)
            }
            Err(e) => {
                warn!(?owner, error = %e, "device list fetch failed");
                Err(e)
            }
        }
    }

    /// The current sorted devices, or `None` while unresolved.
    pub fn devices(&self) -> Option<Arc<Vec<DeviceSummary>>> {
        self.state.snapshot().devices
    }

    /// The owner filter of the most recent load.
    pub fn owner(&self) -> Option<PersonId> {
        self.state.snapshot().owner
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }
}

/// Display order: by name with empty names last, ties broken by MAC.
///
/// Implemented as two stable sorts (MAC first, then name) over a copy of
/// the input; the input slice is never reordered.
pub fn sort_for_display(devices: &[DeviceSummary]) -> Vec<DeviceSummary> {
    let mut sorted = devices.to_vec();
    sorted.sort_by(|a, b| a.mac_address.cmp(&b.mac_address));
    sorted.sort_by(|a, b| compare_names(&a.name, &b.name));
    sorted
}

fn compare_names(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}
