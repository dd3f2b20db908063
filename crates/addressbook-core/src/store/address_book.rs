// ── Address book ──
//
// Insertion-ordered entries keyed by address id. Every mutation rebuilds
// the snapshot that subscribers receive through a `watch` channel.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::info;

use super::codec;
use super::persistence::KeyValueStore;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::CoreError;
use crate::model::PersonAddress;

pub const DEFAULT_STORAGE_KEY: &str = "address-book";

struct Persistence {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

/// The address book state container.
///
/// Holds at most one entry per address id. A second `add_address` for an
/// id already present is ignored: the first entry wins and keeps its
/// position.
pub struct AddressBook {
    entries: IndexMap<String, PersonAddress>,
    snapshot: watch::Sender<Arc<Vec<PersonAddress>>>,
    persistence: Option<Persistence>,
    diagnostics: Arc<dyn DiagnosticSink>,
    dirty: bool,
}

impl AddressBook {
    /// An empty, memory-only address book.
    pub fn new() -> Self {
        Self::with_diagnostics(Arc::new(TracingSink))
    }

    pub fn with_diagnostics(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            entries: IndexMap::new(),
            snapshot,
            persistence: None,
            diagnostics,
            dirty: false,
        }
    }

    /// Load the book stored under `key`.
    ///
    /// A missing key yields an empty book. A payload that fails to decode
    /// also yields an empty book and is reported to `diagnostics`; it stays
    /// on disk until the next [`flush`](Self::flush) after a mutation.
    /// Storage read failures are returned.
    pub fn hydrate(
        storage: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, CoreError> {
        let key = key.into();
        let mut book = Self::with_diagnostics(diagnostics);

        match storage.get(&key)? {
            None => book.diagnostics.info("hydrate", "no stored address book"),
            Some(payload) => match codec::deserialize(&payload) {
                Ok(entries) => {
                    for entry in entries {
                        book.entries.entry(entry.id().to_owned()).or_insert(entry);
                    }
                    book.diagnostics.info(
                        "hydrate",
                        &format!("loaded {} address book entries", book.entries.len()),
                    );
                }
                Err(e) => book.diagnostics.warning(
                    "hydrate",
                    &format!("discarding unreadable address book '{key}': {e}"),
                ),
            },
        }

        book.persistence = Some(Persistence { storage, key });
        book.rebuild_snapshot();
        Ok(book)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append an entry. Returns `false` if its id was already present, in
    /// which case the book is unchanged.
    pub fn add_address(&mut self, entry: PersonAddress) -> bool {
        let id = entry.id().to_owned();
        if self.entries.contains_key(&id) {
            self.diagnostics.info(
                "add",
                &format!("address {id} is already in the address book, ignoring"),
            );
            return false;
        }

        info!(id = %id, "adding address book entry");
        self.entries.insert(id, entry);
        self.changed();
        true
    }

    /// Remove an entry by id, keeping the order of the rest.
    pub fn remove_address(&mut self, id: &str) -> Option<PersonAddress> {
        let removed = self.entries.shift_remove(id);
        if removed.is_some() {
            info!(id = %id, "removed address book entry");
            self.changed();
        }
        removed
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.changed();
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// All entries in insertion order (cheap `Arc` clone).
    pub fn list_addresses(&self) -> Arc<Vec<PersonAddress>> {
        self.snapshot.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<&PersonAddress> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonAddress> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<PersonAddress>>> {
        self.snapshot.subscribe()
    }

    /// Encode the current entries with [`codec::serialize`].
    pub fn serialize(&self) -> Result<String, CoreError> {
        codec::serialize(&self.list_addresses())
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Whether there are changes not yet written to storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes to the storage backend. No-op for memory-only
    /// books and when nothing changed since the last flush.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        let Some(persistence) = &self.persistence else {
            return Ok(());
        };
        if !self.dirty {
            return Ok(());
        }

        let payload = self.serialize()?;
        if let Err(e) = persistence.storage.set(&persistence.key, &payload) {
            self.diagnostics
                .error("flush", &format!("failed to save address book: {e}"));
            return Err(e);
        }

        self.dirty = false;
        self.diagnostics.info(
            "flush",
            &format!("saved {} address book entries", self.entries.len()),
        );
        Ok(())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn changed(&mut self) {
        self.dirty = true;
        self.rebuild_snapshot();
    }

    fn rebuild_snapshot(&self) {
        let values: Vec<PersonAddress> = self.entries.values().cloned().collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::convert::address_id;
    use crate::diagnostics::{MemorySink, Severity};
    use crate::model::Address;
    use crate::store::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn entry(house_number: &str, first: &str) -> PersonAddress {
        Address {
            id: address_id(52.1, 5.1, house_number),
            street: "Dorpsstraat".into(),
            house_number: house_number.into(),
            postcode: "1345".into(),
            city: "Aalsmeer".into(),
            lat: 52.1,
            lon: 5.1,
            region: None,
        }
        .with_person(first, "Lovelace")
    }

    fn ids(book: &AddressBook) -> Vec<String> {
        book.list_addresses()
            .iter()
            .map(|e| e.id().to_owned())
            .collect()
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut book = AddressBook::new();
        assert!(book.add_address(entry("3", "C")));
        assert!(book.add_address(entry("1", "A")));
        assert!(book.add_address(entry("2", "B")));

        assert_eq!(ids(&book), vec!["52.1_5.1_3", "52.1_5.1_1", "52.1_5.1_2"]);
    }

    #[test]
    fn duplicate_id_is_ignored() {
        let mut book = AddressBook::new();
        assert!(book.add_address(entry("350", "Ada")));
        assert!(!book.add_address(entry("350", "Augusta")));

        assert_eq!(book.len(), 1);
        assert_eq!(book.get("52.1_5.1_350").unwrap().first_name, "Ada");
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut book = AddressBook::new();
        for n in ["1", "2", "3"] {
            book.add_address(entry(n, n));
        }

        let removed = book.remove_address("52.1_5.1_2").unwrap();
        assert_eq!(removed.first_name, "2");
        assert_eq!(ids(&book), vec!["52.1_5.1_1", "52.1_5.1_3"]);
        assert!(book.remove_address("52.1_5.1_2").is_none());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let mut book = AddressBook::new();
        let mut rx = book.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        book.add_address(entry("1", "A"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        book.clear();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn flush_and_hydrate_round_trip() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let sink = Arc::new(MemorySink::new());

        let mut book =
            AddressBook::hydrate(Arc::clone(&storage), DEFAULT_STORAGE_KEY, sink.clone()).unwrap();
        assert!(book.is_empty());
        book.add_address(entry("1", "A"));
        book.add_address(entry("2", "B"));
        assert!(book.is_dirty());
        book.flush().unwrap();
        assert!(!book.is_dirty());

        let reloaded = AddressBook::hydrate(storage, DEFAULT_STORAGE_KEY, sink).unwrap();
        assert_eq!(reloaded.list_addresses(), book.list_addresses());
    }

    #[test]
    fn flush_without_changes_does_not_write() {
        let storage = Arc::new(MemoryStorage::new());
        let mut book =
            AddressBook::hydrate(storage.clone(), "book", Arc::new(MemorySink::new())).unwrap();
        book.flush().unwrap();
        assert_eq!(storage.get("book").unwrap(), None);
    }

    #[test]
    fn memory_only_flush_is_a_noop() {
        let mut book = AddressBook::new();
        book.add_address(entry("1", "A"));
        book.flush().unwrap();
    }

    #[test]
    fn corrupt_payload_hydrates_empty_and_is_reported() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("book", "{definitely not json").unwrap();
        let sink = Arc::new(MemorySink::new());

        let book = AddressBook::hydrate(storage.clone(), "book", sink.clone()).unwrap();

        assert!(book.is_empty());
        assert!(!book.is_dirty());
        let warnings = sink.with_severity(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].action, "hydrate");
        // The unreadable payload is left alone until something is saved.
        assert_eq!(
            storage.get("book").unwrap().as_deref(),
            Some("{definitely not json")
        );
    }

    #[test]
    fn hydrate_collapses_duplicate_ids() {
        let storage = Arc::new(MemoryStorage::new());
        let payload = codec::serialize(&[entry("1", "First"), entry("1", "Second")]).unwrap();
        storage.set("book", &payload).unwrap();

        let book = AddressBook::hydrate(storage, "book", Arc::new(MemorySink::new())).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.iter().next().unwrap().first_name, "First");
    }
}
