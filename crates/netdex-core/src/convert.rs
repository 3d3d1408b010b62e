// ── API-to-domain type conversions ──
//
// Bridges raw `netdex_api` response types into canonical domain types,
// and domain filters back into wire queries.

use netdex_api::{
    DeviceQuery, DeviceResponse, DeviceSummaryResponse, DiscoveryResponse, PersonQuery,
    PersonSummaryResponse, ScanResponse, ScanSummaryResponse, UpdateDeviceRequest,
};

use crate::model::{
    Device, DeviceId, DeviceSummary, DeviceUpdate, Discovery, DiscoveryId, MacAddress, Person,
    PersonId, Scan, ScanId, ScanSummary,
};
use crate::store::{DeviceFilter, PersonFilter};

// ── Responses → domain ──────────────────────────────────────────────

impl From<DeviceSummaryResponse> for DeviceSummary {
    fn from(d: DeviceSummaryResponse) -> Self {
        Self {
            id: DeviceId(d.id),
            mac_address: MacAddress::new(d.mac_address),
            name: d.name,
            owner_id: d.owner_id.map(PersonId),
            is_primary: d.is_primary,
            first_seen: d.first_seen,
            last_seen: d.last_seen,
        }
    }
}

impl From<DeviceResponse> for Device {
    fn from(d: DeviceResponse) -> Self {
        Self {
            id: DeviceId(d.id),
            mac_address: MacAddress::new(d.mac_address),
            name: d.name,
            note: d.note,
            owner_id: d.owner_id.map(PersonId),
            is_primary: d.is_primary,
            first_seen: d.first_seen,
            last_seen: d.last_seen,
        }
    }
}

impl From<PersonSummaryResponse> for Person {
    fn from(p: PersonSummaryResponse) -> Self {
        Self {
            id: PersonId(p.id),
            name: p.name,
        }
    }
}

impl From<DiscoveryResponse> for Discovery {
    fn from(d: DiscoveryResponse) -> Self {
        Self {
            id: DiscoveryId(d.id),
            device_id: DeviceId(d.device_id),
            hostname: d.hostname,
            ip_address: d.ip_address,
        }
    }
}

impl From<ScanResponse> for Scan {
    fn from(s: ScanResponse) -> Self {
        Self {
            id: ScanId(s.id),
            started_at: s.started_at,
            finished_at: s.finished_at,
            discoveries: s.discoveries.into_iter().map(Discovery::from).collect(),
        }
    }
}

impl From<ScanSummaryResponse> for ScanSummary {
    fn from(s: ScanSummaryResponse) -> Self {
        Self {
            id: ScanId(s.id),
            started_at: s.started_at,
            finished_at: s.finished_at,
        }
    }
}

// ── Domain → requests ───────────────────────────────────────────────

impl From<&DeviceFilter> for DeviceQuery {
    fn from(f: &DeviceFilter) -> Self {
        Self {
            ids: f
                .ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.get()).collect()),
            mac_address: f.mac_address.as_ref().map(|m| m.as_str().to_owned()),
            owner_id: f.owner_id.map(PersonId::get),
            is_primary: f.is_primary,
        }
    }
}

impl From<&PersonFilter> for PersonQuery {
    fn from(f: &PersonFilter) -> Self {
        Self {
            ids: f
                .ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.get()).collect()),
        }
    }
}

impl<'a> From<&'a DeviceUpdate> for UpdateDeviceRequest<'a> {
    fn from(u: &'a DeviceUpdate) -> Self {
        Self {
            name: &u.name,
            note: &u.note,
            owner_id: u.owner_id.map(PersonId::get),
            is_primary: u.is_primary,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn device_response_keeps_mac_text() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let device = Device::from(DeviceResponse {
            id: 9,
            mac_address: "AA-BB-CC-00-11-22".into(),
            name: "printer".into(),
            note: String::new(),
            owner_id: Some(3),
            is_primary: None,
            first_seen: ts,
            last_seen: ts,
        });
        assert_eq!(device.mac_address.as_str(), "AA-BB-CC-00-11-22");
        assert_eq!(device.owner_id, Some(PersonId(3)));
    }

    #[test]
    fn owner_filter_maps_to_query() {
        let query = DeviceQuery::from(&DeviceFilter::by_owner(Some(PersonId(5))));
        assert_eq!(query.owner_id, Some(5));
        assert_eq!(query.ids, None);
    }
}
