// Scan endpoints

use crate::client::InventoryClient;
use crate::error::Error;
use crate::models::{ScanResponse, ScanSummaryResponse};

impl InventoryClient {
    /// List scans without their discoveries.
    ///
    /// `GET /api/scans`
    pub async fn list_scans(&self) -> Result<Vec<ScanSummaryResponse>, Error> {
        let url = self.url(&["scans"]);
        self.get(url).await
    }

    /// Fetch one scan with its ordered discoveries.
    ///
    /// `GET /api/scans/{id}`
    pub async fn get_scan(&self, id: u64) -> Result<ScanResponse, Error> {
        let url = self.url(&["scans", &id.to_string()]);
        self.get(url).await
    }
}
