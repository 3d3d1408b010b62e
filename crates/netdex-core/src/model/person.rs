// ── Person domain types ──

use serde::{Deserialize, Serialize};

use super::entity_id::PersonId;

/// A device owner. Referenced by `Device::owner_id`, never owned by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

/// The server's person listing carries no fields beyond the record itself.
pub type PersonSummary = Person;
