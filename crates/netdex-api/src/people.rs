// Person endpoints

use crate::client::InventoryClient;
use crate::error::Error;
use crate::models::{PersonQuery, PersonSummaryResponse};

impl InventoryClient {
    /// List people, optionally restricted to a set of ids.
    ///
    /// `GET /api/people?ids=..`
    pub async fn list_people(
        &self,
        query: &PersonQuery,
    ) -> Result<Vec<PersonSummaryResponse>, Error> {
        let url = self.url(&["people"]);
        self.get_with_params(url, &query.to_params()).await
    }
}
