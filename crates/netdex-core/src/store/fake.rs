// In-memory `EntityStore` for component tests. Records every call and
// can hold device fetches open until the test releases them.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::oneshot;

use super::{DeviceFilter, EntityStore, PersonFilter};
use crate::error::CoreError;
use crate::model::{
    Device, DeviceId, DeviceSummary, DeviceUpdate, MacAddress, Person, PersonId, PersonSummary,
    Scan, ScanId, ScanSummary,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Devices(DeviceFilter),
    People(PersonFilter),
    Device(DeviceId),
    Update(DeviceUpdate),
    Scans,
    Scan(ScanId),
    Vendor(MacAddress),
}

#[derive(Default)]
pub(crate) struct FakeStore {
    devices: Mutex<Vec<Device>>,
    people: Vec<Person>,
    scans: Vec<Scan>,
    vendors: HashMap<MacAddress, String>,
    calls: Mutex<Vec<Call>>,
    device_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    fail_devices: AtomicBool,
    fail_people: AtomicBool,
    fail_update: AtomicBool,
    fail_vendor: AtomicBool,
}

pub(crate) fn device(id: u64, mac: &str, name: &str, owner: Option<u64>) -> Device {
    let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Device {
        id: DeviceId(id),
        mac_address: MacAddress::new(mac),
        name: name.into(),
        note: String::new(),
        owner_id: owner.map(PersonId),
        is_primary: Some(false),
        first_seen: ts,
        last_seen: ts,
    }
}

pub(crate) fn person(id: u64, name: &str) -> Person {
    Person {
        id: PersonId(id),
        name: name.into(),
    }
}

fn server_error() -> CoreError {
    CoreError::Api {
        message: "internal server error".into(),
        code: None,
        status: Some(500),
    }
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_devices(mut self, devices: impl IntoIterator<Item = Device>) -> Self {
        self.devices = Mutex::new(devices.into_iter().collect());
        self
    }

    pub(crate) fn with_people(mut self, people: impl IntoIterator<Item = Person>) -> Self {
        self.people = people.into_iter().collect();
        self
    }

    pub(crate) fn with_scan(mut self, scan: Scan) -> Self {
        self.scans.push(scan);
        self
    }

    pub(crate) fn with_vendor(mut self, mac: &str, vendor: &str) -> Self {
        self.vendors.insert(MacAddress::new(mac), vendor.into());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Hold the next device-list fetch until the returned sender fires.
    pub(crate) fn gate_next_device_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.device_gates.lock().unwrap().push_back(rx);
        tx
    }

    /// Replace a stored device, as if edited by someone else.
    pub(crate) fn put_device(&self, device: Device) {
        let mut devices = self.devices.lock().unwrap();
        devices.retain(|d| d.id != device.id);
        devices.push(device);
    }

    pub(crate) fn fail_devices(&self, fail: bool) {
        self.fail_devices.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_people(&self, fail: bool) {
        self.fail_people.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_vendor(&self, fail: bool) {
        self.fail_vendor.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn matches(device: &Device, filter: &DeviceFilter) -> bool {
    filter.ids.as_ref().is_none_or(|ids| ids.contains(&device.id))
        && filter
            .mac_address
            .as_ref()
            .is_none_or(|mac| *mac == device.mac_address)
        && filter.owner_id.is_none_or(|o| device.owner_id == Some(o))
        && filter
            .is_primary
            .is_none_or(|p| device.is_primary == Some(p))
}

#[async_trait]
impl EntityStore for FakeStore {
    async fn fetch_devices_by_filter(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Vec<DeviceSummary>, CoreError> {
        self.record(Call::Devices(filter.clone()));
        let gate = self.device_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_devices.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let devices = self.devices.lock().unwrap();
        Ok(devices
            .iter()
            .filter(|d| matches(d, filter))
            .map(Device::summary)
            .collect())
    }

    async fn fetch_people_by_filter(
        &self,
        filter: &PersonFilter,
    ) -> Result<Vec<PersonSummary>, CoreError> {
        self.record(Call::People(filter.clone()));
        if self.fail_people.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self
            .people
            .iter()
            .filter(|p| filter.ids.as_ref().is_none_or(|ids| ids.contains(&p.id)))
            .cloned()
            .collect())
    }

    async fn fetch_device(&self, id: DeviceId) -> Result<Device, CoreError> {
        self.record(Call::Device(id));
        self.devices
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("device", id))
    }

    async fn update_device(&self, update: &DeviceUpdate) -> Result<Device, CoreError> {
        self.record(Call::Update(update.clone()));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let mut devices = self.devices.lock().unwrap();
        let device = devices
            .iter_mut()
            .find(|d| d.id == update.id)
            .ok_or_else(|| CoreError::not_found("device", update.id))?;
        device.name.clone_from(&update.name);
        device.note.clone_from(&update.note);
        device.owner_id = update.owner_id;
        device.is_primary = Some(update.is_primary);
        Ok(device.clone())
    }

    async fn list_scans(&self) -> Result<Vec<ScanSummary>, CoreError> {
        self.record(Call::Scans);
        Ok(self
            .scans
            .iter()
            .map(|s| ScanSummary {
                id: s.id,
                started_at: s.started_at,
                finished_at: s.finished_at,
            })
            .collect())
    }

    async fn fetch_scan(&self, id: ScanId) -> Result<Scan, CoreError> {
        self.record(Call::Scan(id));
        self.scans
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("scan", id))
    }

    async fn lookup_vendor(&self, mac: &MacAddress) -> Result<String, CoreError> {
        self.record(Call::Vendor(mac.clone()));
        if self.fail_vendor.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self.vendors.get(mac).cloned().unwrap_or_default())
    }
}
