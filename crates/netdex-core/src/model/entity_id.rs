// ── Core identity types ──
//
// Every record kind gets its own id newtype so a `PersonId` can never be
// passed where a `DeviceId` is expected. `MacAddress` is the device's
// natural key and the tie-break for display ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ── Numeric ids ─────────────────────────────────────────────────────

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().trim_start_matches('#').parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Server-assigned identity of a tracked device.
    DeviceId
);
entity_id!(
    /// Server-assigned identity of a person (device owner).
    PersonId
);
entity_id!(
    /// Server-assigned identity of one inventory scan.
    ScanId
);
entity_id!(
    /// Server-assigned identity of one sighting inside a scan.
    DiscoveryId
);

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address exactly as the server reports it.
///
/// Display and ordering use the stored text, so `"B0:00"` sorts before
/// `"a0:00"`. Use [`MacAddress::normalized`] to compare addresses written
/// in different formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase colon-separated form (aa:bb:cc:dd:ee:ff) for matching.
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase().replace('-', ":")
    }

    /// Whether both addresses name the same interface, ignoring case and
    /// separator style.
    pub fn same_as(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
