// Device endpoints
//
// Filtered listing returns summaries; single-device reads and updates
// return the full record including the free-form note.

use tracing::debug;

use crate::client::InventoryClient;
use crate::error::Error;
use crate::models::{DeviceQuery, DeviceResponse, DeviceSummaryResponse, UpdateDeviceRequest};

impl InventoryClient {
    /// List device summaries matching `query`.
    ///
    /// `GET /api/devices?ids=..&mac_address=..&owner_id=..&is_primary=..`
    pub async fn list_devices(
        &self,
        query: &DeviceQuery,
    ) -> Result<Vec<DeviceSummaryResponse>, Error> {
        let url = self.url(&["devices"]);
        self.get_with_params(url, &query.to_params()).await
    }

    /// Fetch one full device record.
    ///
    /// `GET /api/devices/{id}`
    pub async fn get_device(&self, id: u64) -> Result<DeviceResponse, Error> {
        let url = self.url(&["devices", &id.to_string()]);
        self.get(url).await
    }

    /// Replace the editable fields of a device and return the stored record.
    ///
    /// `PUT /api/devices/{id}`
    pub async fn update_device(
        &self,
        id: u64,
        body: &UpdateDeviceRequest<'_>,
    ) -> Result<DeviceResponse, Error> {
        let url = self.url(&["devices", &id.to_string()]);
        debug!(id, owner_id = ?body.owner_id, is_primary = body.is_primary, "updating device");
        self.put(url, body).await
    }
}
