// MAC vendor lookup
//
// The server owns the OUI database; the client only forwards the MAC.

use crate::client::InventoryClient;
use crate::error::Error;

impl InventoryClient {
    /// Look up the hardware vendor for a MAC address.
    ///
    /// `GET /api/vendor/{mac}` returns a JSON string, empty when unknown.
    pub async fn lookup_vendor(&self, mac: &str) -> Result<String, Error> {
        let url = self.url(&["vendor", mac]);
        self.get(url).await
    }
}
