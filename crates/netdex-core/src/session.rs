// ── Device edit session ──
//
// A local draft of one device's editable fields, derived from exactly one
// canonical snapshot. Re-seeding from a new snapshot always discards the
// draft: the server's copy wins, there is no merge.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Device, DeviceId, DeviceUpdate, PersonId, PersonSummary};
use crate::notify::Notifier;
use crate::store::EntityStore;

/// Label shown for a device without an owner.
pub const UNASSIGNED_LABEL: &str = "Not Set";

/// One edit to a single draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Name(String),
    Note(String),
    Owner(Option<PersonId>),
    Primary(bool),
}

/// The editable fields of a device, as currently drafted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDraft {
    pub name: String,
    pub note: String,
    pub owner_id: Option<PersonId>,
    /// `None` until the device has been classified.
    pub is_primary: Option<bool>,
}

impl From<&Device> for DeviceDraft {
    fn from(device: &Device) -> Self {
        Self {
            name: device.name.clone(),
            note: device.note.clone(),
            owner_id: device.owner_id,
            is_primary: device.is_primary,
        }
    }
}

pub struct DeviceEditSession {
    canonical: Arc<Device>,
    draft: DeviceDraft,
    dirty: bool,
    vendor: Option<String>,
}

impl DeviceEditSession {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            draft: DeviceDraft::from(device.as_ref()),
            canonical: device,
            dirty: false,
            vendor: None,
        }
    }

    // ── Seeding ──────────────────────────────────────────────────────

    /// Re-seed from `device`, discarding any unsaved draft.
    pub fn initialize(&mut self, device: Arc<Device>) {
        if !device.mac_address.same_as(&self.canonical.mac_address) {
            self.vendor = None;
        }
        if self.dirty {
            debug!(device = %device.id, "discarding unsaved draft");
        }
        self.draft = DeviceDraft::from(device.as_ref());
        self.canonical = device;
        self.dirty = false;
    }

    /// Re-seed only if `device` is a different snapshot from the one held.
    /// Returns whether the session was re-seeded.
    pub fn sync(&mut self, device: Arc<Device>) -> bool {
        if Arc::ptr_eq(&self.canonical, &device) {
            return false;
        }
        self.initialize(device);
        true
    }

    // ── Editing ──────────────────────────────────────────────────────

    pub fn set_field(&mut self, change: FieldChange) {
        match change {
            FieldChange::Name(name) => self.draft.name = name,
            FieldChange::Note(note) => self.draft.note = note,
            FieldChange::Owner(owner) => self.draft.owner_id = owner,
            FieldChange::Primary(primary) => self.draft.is_primary = Some(primary),
        }
        self.dirty = true;
    }

    pub fn id(&self) -> DeviceId {
        self.canonical.id
    }

    pub fn device(&self) -> &Arc<Device> {
        &self.canonical
    }

    pub fn draft(&self) -> &DeviceDraft {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Commit needs `is_primary` resolved; nothing else is validated locally.
    pub fn can_commit(&self) -> bool {
        self.draft.is_primary.is_some()
    }

    /// The full-replacement update the draft would send, if committable.
    pub fn pending_update(&self) -> Option<DeviceUpdate> {
        let is_primary = self.draft.is_primary?;
        Some(DeviceUpdate {
            id: self.canonical.id,
            name: self.draft.name.clone(),
            note: self.draft.note.clone(),
            owner_id: self.draft.owner_id,
            is_primary,
        })
    }

    // ── Commit ───────────────────────────────────────────────────────

    /// Send the draft to the store.
    ///
    /// On success the session re-seeds from the returned record and the
    /// notifier receives `Updated {name} (#{id})`. On failure the draft
    /// and dirty flag are left exactly as they were.
    pub async fn commit(
        &mut self,
        store: &dyn EntityStore,
        notifier: &dyn Notifier,
    ) -> Result<Arc<Device>, CoreError> {
        let Some(update) = self.pending_update() else {
            return Err(CoreError::ValidationFailed {
                message: format!(
                    "device #{} must be marked primary or secondary before saving",
                    self.canonical.id
                ),
            });
        };

        let updated = match store.update_device(&update).await {
            Ok(device) => Arc::new(device),
            Err(e) => {
                warn!(device = %update.id, error = %e, "device update failed");
                return Err(e);
            }
        };

        self.initialize(Arc::clone(&updated));
        notifier.notify(&format!("Updated {} (#{})", updated.name, updated.id));
        Ok(updated)
    }

    // ── Vendor ───────────────────────────────────────────────────────

    /// Cached vendor for the device's MAC, if looked up.
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// Look up the vendor for the canonical MAC. Best effort: a failed
    /// lookup is logged and cached as an empty string.
    pub async fn refresh_vendor(&mut self, store: &dyn EntityStore) -> &str {
        let vendor = match store.lookup_vendor(&self.canonical.mac_address).await {
            Ok(vendor) => vendor,
            Err(e) => {
                warn!(mac = %self.canonical.mac_address, error = %e, "vendor lookup failed");
                String::new()
            }
        };
        self.vendor.insert(vendor).as_str()
    }
}

// ── Owner picker helpers ────────────────────────────────────────────

/// People sorted by name, for an owner picker. The input is not reordered.
pub fn owner_choices(people: &[PersonSummary]) -> Vec<PersonSummary> {
    let mut sorted = people.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

/// Display label for an owner reference: [`UNASSIGNED_LABEL`] when unset,
/// the person's name when known, empty when the owner is not resolved.
pub fn owner_label(owner: Option<PersonId>, people: &[PersonSummary]) -> &str {
    let Some(id) = owner else {
        return UNASSIGNED_LABEL;
    };
    people
        .iter()
        .find(|p| p.id == id)
        .map_or("", |p| p.name.as_str())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::fake::{Call, FakeStore, device, person};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<String>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_owned());
        }
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    fn unclassified(id: u64) -> Device {
        Device {
            is_primary: None,
            ..device(id, "aa:bb:cc:00:00:01", "nas", None)
        }
    }

    // ── Dirty flag ──────────────────────────────────────────────────

    #[test]
    fn set_field_marks_dirty_and_initialize_resets() {
        let canonical = Arc::new(device(1, "aa:01", "laptop", None));
        let mut session = DeviceEditSession::new(Arc::clone(&canonical));
        assert!(!session.is_dirty());

        session.set_field(FieldChange::Name("work laptop".into()));
        session.set_field(FieldChange::Note(String::new()));
        assert!(session.is_dirty());
        assert_eq!(session.draft().name, "work laptop");

        session.initialize(canonical);
        assert!(!session.is_dirty());
        assert_eq!(session.draft().name, "laptop");
    }

    #[test]
    fn sync_reseeds_only_on_new_snapshot() {
        let canonical = Arc::new(device(1, "aa:01", "laptop", None));
        let mut session = DeviceEditSession::new(Arc::clone(&canonical));
        session.set_field(FieldChange::Owner(Some(PersonId(4))));

        assert!(!session.sync(Arc::clone(&canonical)));
        assert!(session.is_dirty());

        // Same id, equal contents, but a refreshed object.
        let refreshed = Arc::new(canonical.as_ref().clone());
        assert!(session.sync(refreshed));
        assert!(!session.is_dirty());
        assert_eq!(session.draft().owner_id, None);
    }

    #[tokio::test]
    async fn outside_edit_discards_dirty_draft_on_refetch() {
        let store = FakeStore::new().with_devices([device(7, "aa:07", "camera", None)]);
        let mut session =
            DeviceEditSession::new(Arc::new(store.fetch_device(DeviceId(7)).await.unwrap()));
        session.set_field(FieldChange::Name("my camera".into()));

        store.put_device(Device {
            note: "moved to garage".into(),
            ..device(7, "aa:07", "garage camera", Some(2))
        });
        let refreshed = Arc::new(store.fetch_device(DeviceId(7)).await.unwrap());

        assert!(session.sync(refreshed));
        assert!(!session.is_dirty());
        assert_eq!(session.draft().name, "garage camera");
        assert_eq!(session.draft().note, "moved to garage");
        assert_eq!(session.draft().owner_id, Some(PersonId(2)));
    }

    // ── Commit ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn commit_sends_draft_and_reseeds() {
        let store = FakeStore::new().with_devices([device(42, "aa:01", "printer", None)]);
        let notifier = RecordingNotifier::default();
        let mut session =
            DeviceEditSession::new(Arc::new(store.fetch_device(DeviceId(42)).await.unwrap()));

        session.set_field(FieldChange::Name("office printer".into()));
        session.set_field(FieldChange::Owner(Some(PersonId(3))));
        session.set_field(FieldChange::Primary(true));
        let updated = session.commit(&store, &notifier).await.unwrap();

        assert_eq!(
            store.calls().last(),
            Some(&Call::Update(DeviceUpdate {
                id: DeviceId(42),
                name: "office printer".into(),
                note: String::new(),
                owner_id: Some(PersonId(3)),
                is_primary: true,
            }))
        );
        assert!(Arc::ptr_eq(session.device(), &updated));
        assert!(!session.is_dirty());
        assert_eq!(session.draft().is_primary, Some(true));
        assert_eq!(notifier.messages(), vec!["Updated office printer (#42)"]);
    }

    #[tokio::test]
    async fn commit_without_classification_has_no_side_effects() {
        let store = FakeStore::new().with_devices([unclassified(5)]);
        let notifier = RecordingNotifier::default();
        let mut session = DeviceEditSession::new(Arc::new(unclassified(5)));
        session.set_field(FieldChange::Name("nas".into()));

        assert!(!session.can_commit());
        let err = session.commit(&store, &notifier).await.unwrap_err();

        assert!(matches!(err, CoreError::ValidationFailed { .. }));
        assert!(store.calls().is_empty());
        assert!(notifier.messages().is_empty());
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn failed_commit_preserves_draft() {
        let store = FakeStore::new().with_devices([device(7, "aa:01", "tv", None)]);
        store.fail_update(true);
        let notifier = RecordingNotifier::default();
        let mut session = DeviceEditSession::new(Arc::new(device(7, "aa:01", "tv", None)));
        session.set_field(FieldChange::Name("living room tv".into()));
        let before = session.draft().clone();

        assert!(session.commit(&store, &notifier).await.is_err());

        assert_eq!(session.draft(), &before);
        assert!(session.is_dirty());
        assert!(notifier.messages().is_empty());
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn clean_session_can_still_commit() {
        let store = FakeStore::new().with_devices([device(8, "aa:01", "tv", None)]);
        let notifier = RecordingNotifier::default();
        let mut session = DeviceEditSession::new(Arc::new(device(8, "aa:01", "tv", None)));

        session.commit(&store, &notifier).await.unwrap();

        assert_eq!(notifier.messages(), vec!["Updated tv (#8)"]);
    }

    // ── Vendor ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn vendor_lookup_is_cached_until_mac_changes() {
        let store = FakeStore::new().with_vendor("aa:01", "Acme Networks");
        let mut session = DeviceEditSession::new(Arc::new(device(1, "aa:01", "tv", None)));

        assert_eq!(session.refresh_vendor(&store).await, "Acme Networks");
        assert_eq!(session.vendor(), Some("Acme Networks"));

        session.initialize(Arc::new(device(1, "aa:01", "renamed", None)));
        assert_eq!(session.vendor(), Some("Acme Networks"));

        session.initialize(Arc::new(device(2, "aa:02", "other", None)));
        assert_eq!(session.vendor(), None);
    }

    #[tokio::test]
    async fn vendor_failure_yields_empty() {
        let store = FakeStore::new();
        store.fail_vendor(true);
        let mut session = DeviceEditSession::new(Arc::new(device(1, "aa:01", "tv", None)));

        assert_eq!(session.refresh_vendor(&store).await, "");
    }

    // ── Owner helpers ───────────────────────────────────────────────

    #[test]
    fn owner_choices_sorted_by_name() {
        let people = vec![person(1, "Zoe"), person(2, "Ann"), person(3, "Max")];
        let names: Vec<_> = owner_choices(&people).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Ann", "Max", "Zoe"]);
        assert_eq!(people[0].name, "Zoe");
    }

    #[test]
    fn owner_label_cases() {
        let people = vec![person(1, "Ann")];
        assert_eq!(owner_label(None, &people), "Not Set");
        assert_eq!(owner_label(Some(PersonId(1)), &people), "Ann");
        assert_eq!(owner_label(Some(PersonId(9)), &people), "");
    }
}
