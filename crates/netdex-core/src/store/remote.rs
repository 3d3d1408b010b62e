// ── HTTP-backed entity store ──

use async_trait::async_trait;
use tracing::debug;

use netdex_api::{DeviceQuery, InventoryClient, PersonQuery, UpdateDeviceRequest};

use super::{DeviceFilter, EntityStore, PersonFilter};
use crate::config::ServerConfig;
use crate::error::CoreError;
use crate::model::{
    Device, DeviceId, DeviceSummary, DeviceUpdate, MacAddress, Person, PersonSummary, Scan,
    ScanId, ScanSummary,
};

/// [`EntityStore`] backed by the inventory server's JSON API.
pub struct RemoteStore {
    client: InventoryClient,
}

impl RemoteStore {
    pub fn connect(config: &ServerConfig) -> Result<Self, CoreError> {
        let client = InventoryClient::new(config.url.as_str(), &config.transport())?;
        debug!(base_url = %client.base_url(), "remote store ready");
        Ok(Self { client })
    }

    pub fn from_client(client: InventoryClient) -> Self {
        Self { client }
    }
}

/// Map a 404 onto a typed not-found; everything else goes through the
/// generic transport translation.
fn or_not_found(err: netdex_api::Error, entity_type: &str, id: impl ToString) -> CoreError {
    if err.is_not_found() {
        CoreError::not_found(entity_type, id)
    } else {
        err.into()
    }
}

#[async_trait]
impl EntityStore for RemoteStore {
    async fn fetch_devices_by_filter(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Vec<DeviceSummary>, CoreError> {
        let rows = self.client.list_devices(&DeviceQuery::from(filter)).await?;
        Ok(rows.into_iter().map(DeviceSummary::from).collect())
    }

    async fn fetch_people_by_filter(
        &self,
        filter: &PersonFilter,
    ) -> Result<Vec<PersonSummary>, CoreError> {
        let rows = self.client.list_people(&PersonQuery::from(filter)).await?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn fetch_device(&self, id: DeviceId) -> Result<Device, CoreError> {
        self.client
            .get_device(id.get())
            .await
            .map(Device::from)
            .map_err(|e| or_not_found(e, "device", id))
    }

    async fn update_device(&self, update: &DeviceUpdate) -> Result<Device, CoreError> {
        self.client
            .update_device(update.id.get(), &UpdateDeviceRequest::from(update))
            .await
            .map(Device::from)
            .map_err(|e| or_not_found(e, "device", update.id))
    }

    async fn list_scans(&self) -> Result<Vec<ScanSummary>, CoreError> {
        let rows = self.client.list_scans().await?;
        Ok(rows.into_iter().map(ScanSummary::from).collect())
    }

    async fn fetch_scan(&self, id: ScanId) -> Result<Scan, CoreError> {
        self.client
            .get_scan(id.get())
            .await
            .map(Scan::from)
            .map_err(|e| or_not_found(e, "scan", id))
    }

    async fn lookup_vendor(&self, mac: &MacAddress) -> Result<String, CoreError> {
        Ok(self.client.lookup_vendor(mac.as_str()).await?)
    }
}
