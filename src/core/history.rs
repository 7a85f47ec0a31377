// src/core/history.rs

//! Bounded, write-through history of finished scans.
//!
//! The store owns the only copy of the collection for the session. Every
//! mutation persists the whole collection through the [`KeyValueStore`] port
//! and bumps a render revision that the UI watches.

use crate::core::errors::StorageError;
use crate::core::models::{DateScope, HistoryStats, ScanRecord};
use crate::core::storage::KeyValueStore;
use chrono::{DateTime, Duration, Local, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Storage key holding the serialized collection.
pub const HISTORY_KEY: &str = "sena_scan_history";

/// Maximum number of records kept; older ones are dropped from the tail.
pub const HISTORY_CAPACITY: usize = 100;

pub struct ScanHistoryStore<S: KeyValueStore> {
    storage: S,
    records: Vec<ScanRecord>,
    revision: watch::Sender<u64>,
}

impl<S: KeyValueStore> ScanHistoryStore<S> {
    /// Creates an empty store. Call [`load`](Self::load) to pick up persisted state.
    pub fn new(storage: S) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            storage,
            records: Vec::new(),
            revision,
        }
    }

    /// Receiver that changes every time the collection does.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Unreadable or malformed data resets the history to empty; the failure
    /// is logged and never reaches the caller.
    pub fn load(&mut self) {
        self.records = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ScanRecord>>(&raw) {
                Ok(mut records) => {
                    records.truncate(HISTORY_CAPACITY);
                    info!(count = records.len(), "Loaded scan history.");
                    records
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse scan history, starting empty.");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No persisted scan history.");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read scan history, starting empty.");
                Vec::new()
            }
        };
        self.notify();
    }

    /// Inserts `record` as the newest entry, trimming the oldest past capacity.
    pub fn append(&mut self, record: ScanRecord) {
        debug!(id = %record.id, target = %record.target, "Appending scan to history.");
        self.records.insert(0, record);
        if self.records.len() > HISTORY_CAPACITY {
            let dropped = self.records.len() - HISTORY_CAPACITY;
            self.records.truncate(HISTORY_CAPACITY);
            debug!(dropped, "History over capacity, dropped oldest records.");
        }
        self.persist();
        self.notify();
    }

    /// Removes the record with the given id.
    ///
    /// Returns the removed record, or `None` (leaving everything untouched)
    /// when no record has that id.
    pub fn remove(&mut self, id: &str) -> Option<ScanRecord> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            debug!(id, "Remove requested for unknown scan id, ignoring.");
            return None;
        };
        let removed = self.records.remove(index);
        self.persist();
        self.notify();
        Some(removed)
    }

    /// Drops every record and deletes the persisted key.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Err(e) = self.storage.remove(HISTORY_KEY) {
            warn!(error = %e, "Failed to remove persisted scan history.");
        }
        info!("Scan history cleared.");
        self.notify();
    }

    pub fn get(&self, id: &str) -> Option<&ScanRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, newest first.
    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose target contains `search_term` (case-insensitive) and whose
    /// start time falls in `scope`, evaluated against the current time.
    pub fn filter(&self, search_term: &str, scope: DateScope) -> Vec<&ScanRecord> {
        self.filter_at(search_term, scope, Utc::now())
    }

    /// Same as [`filter`](Self::filter) with an explicit "now".
    pub fn filter_at(&self, search_term: &str, scope: DateScope, now: DateTime<Utc>) -> Vec<&ScanRecord> {
        let needle = search_term.to_lowercase();
        self.records
            .iter()
            .filter(|r| needle.is_empty() || r.target.to_lowercase().contains(&needle))
            .filter(|r| in_scope(r.start_time, scope, now))
            .collect()
    }

    pub fn compute_stats(&self) -> HistoryStats {
        self.compute_stats_at(Utc::now())
    }

    pub fn compute_stats_at(&self, now: DateTime<Utc>) -> HistoryStats {
        HistoryStats {
            daily_scans: self.records.iter().filter(|r| same_local_day(r.start_time, now)).count(),
            total_scans: self.records.len(),
            threats_found: self.records.iter().map(|r| r.open_ports().len()).sum(),
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.records)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(HISTORY_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist scan history.");
        }
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}

fn same_local_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.with_timezone(&Local).date_naive() == b.with_timezone(&Local).date_naive()
}

fn in_scope(start: DateTime<Utc>, scope: DateScope, now: DateTime<Utc>) -> bool {
    match scope {
        DateScope::All => true,
        DateScope::Today => same_local_day(start, now),
        DateScope::Week => start >= now - Duration::days(7),
        DateScope::Month => start >= now - Duration::days(30),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ScanMode, ScanOutcome, Traversal};
    use crate::core::storage::MemoryStore;
    use chrono::TimeZone;

    fn completed(target: &str, ports: &[u16]) -> ScanRecord {
        let mut record = ScanRecord::start(target, ScanMode::Tcp, Traversal::Bfs, 50);
        record.outcome = ScanOutcome::Completed {
            open_ports: ports.to_vec(),
            closed_ports: 1024 - ports.len() as u32,
            total_ports: 1024,
            duration: Some(0.5),
            risk_level: None,
            results: String::new(),
        };
        record
    }

    #[test]
    fn append_puts_newest_first_and_persists() {
        let storage = MemoryStore::new();
        let mut store = ScanHistoryStore::new(storage.clone());

        store.append(completed("10.0.0.1", &[]));
        store.append(completed("10.0.0.2", &[]));

        assert_eq!(store.records()[0].target, "10.0.0.2");
        assert_eq!(store.records()[1].target, "10.0.0.1");
        let persisted: Vec<ScanRecord> = serde_json::from_str(&storage.raw(HISTORY_KEY).unwrap()).unwrap();
        assert_eq!(persisted, store.records());
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut store = ScanHistoryStore::new(MemoryStore::new());
        let mut ids = Vec::new();
        for i in 0..101 {
            let mut record = completed("192.168.1.1", &[]);
            record.id = format!("scan_{i:04}");
            ids.push(record.id.clone());
            store.append(record);
            assert!(store.len() <= HISTORY_CAPACITY);
            assert_eq!(store.records()[0].id, ids[i]);
        }
        assert_eq!(store.len(), 100);
        assert!(store.get(&ids[0]).is_none());
        assert!(store.get(&ids[1]).is_some());
    }

    #[test]
    fn load_rejects_garbage_and_starts_empty() {
        let storage = MemoryStore::new();
        storage.set(HISTORY_KEY, "{not json").unwrap();
        let mut store = ScanHistoryStore::new(storage);
        store.load();
        assert!(store.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut store = ScanHistoryStore::new(MemoryStore::new());
        store.append(completed("10.0.0.1", &[80]));
        let before = store.revision();
        assert!(store.remove("scan_missing").is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn remove_round_trips_through_storage() {
        let storage = MemoryStore::new();
        let mut store = ScanHistoryStore::new(storage.clone());
        let keep = completed("10.0.0.1", &[22]);
        let drop = completed("10.0.0.2", &[80]);
        let drop_id = drop.id.clone();
        store.append(keep.clone());
        store.append(drop);

        assert_eq!(store.remove(&drop_id).map(|r| r.target), Some("10.0.0.2".to_string()));

        let mut reloaded = ScanHistoryStore::new(storage);
        reloaded.load();
        assert_eq!(reloaded.records(), &[keep]);
    }

    #[test]
    fn clear_removes_persisted_key() {
        let storage = MemoryStore::new();
        let mut store = ScanHistoryStore::new(storage.clone());
        store.append(completed("10.0.0.1", &[]));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(storage.raw(HISTORY_KEY), None);
    }

    #[test]
    fn stats_are_recomputed_from_the_collection() {
        let mut store = ScanHistoryStore::new(MemoryStore::new());
        store.append(completed("10.0.0.1", &[22, 80]));
        store.append(completed("10.0.0.2", &[]));
        store.append(completed("10.0.0.3", &[21, 22, 23, 80, 443]));

        let stats = store.compute_stats();
        assert_eq!(stats.threats_found, 7);
        assert_eq!(stats.total_scans, 3);
        assert_eq!(stats.daily_scans, 3);

        let id = store.records()[0].id.clone();
        store.remove(&id);
        assert_eq!(store.compute_stats().threats_found, 2);
    }

    #[test]
    fn filter_by_today_keeps_order() {
        let now = Utc::now();
        let mut store = ScanHistoryStore::new(MemoryStore::new());

        let mut old = completed("10.0.0.9", &[]);
        old.start_time = now - Duration::days(10);
        let mut first = completed("10.0.0.1", &[]);
        first.start_time = now;
        let mut second = completed("10.0.0.2", &[]);
        second.start_time = now;

        store.append(first);
        store.append(old);
        store.append(second);

        let today: Vec<&str> = store
            .filter_at("", DateScope::Today, now)
            .iter()
            .map(|r| r.target.as_str())
            .collect();
        assert_eq!(today, vec!["10.0.0.2", "10.0.0.1"]);
        assert_eq!(store.filter_at("", DateScope::Month, now).len(), 3);
        assert_eq!(store.filter_at("", DateScope::Week, now).len(), 2);
    }

    #[test]
    fn filter_is_pure_and_case_insensitive() {
        let mut store = ScanHistoryStore::new(MemoryStore::new());
        store.append(completed("192.168.0.10", &[]));
        store.append(completed("10.0.0.1", &[]));
        let revision = store.revision();

        let a: Vec<String> = store.filter("168", DateScope::All).iter().map(|r| r.id.clone()).collect();
        let b: Vec<String> = store.filter("168", DateScope::All).iter().map(|r| r.id.clone()).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn search_term_is_matched_untrimmed() {
        let mut store = ScanHistoryStore::new(MemoryStore::new());
        store.append(completed("10.0.0.1", &[]));
        assert_eq!(store.filter("0.0", DateScope::All).len(), 1);
        assert!(store.filter(" 10.0", DateScope::All).is_empty());
    }

    #[test]
    fn today_is_the_local_calendar_date() {
        let now = Local
            .with_ymd_and_hms(2026, 1, 15, 0, 10, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        let mut late = completed("10.0.0.1", &[22]);
        late.start_time = Local
            .with_ymd_and_hms(2026, 1, 14, 23, 30, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        let mut store = ScanHistoryStore::new(MemoryStore::new());
        store.append(late);

        assert!(store.filter_at("", DateScope::Today, now).is_empty());
        assert_eq!(store.filter_at("", DateScope::Week, now).len(), 1);
        assert_eq!(store.compute_stats_at(now).daily_scans, 0);

        let mut early = completed("10.0.0.2", &[]);
        early.start_time = now - Duration::minutes(5);
        store.append(early);
        assert_eq!(store.filter_at("", DateScope::Today, now).len(), 1);
        assert_eq!(store.compute_stats_at(now).daily_scans, 1);
    }

    #[test]
    fn week_and_month_include_their_lower_bound() {
        let now = Utc::now();
        let at = |start| {
            let mut record = completed("10.0.0.1", &[]);
            record.start_time = start;
            let mut store = ScanHistoryStore::new(MemoryStore::new());
            store.append(record);
            store
        };
        let second = Duration::seconds(1);

        let week = now - Duration::days(7);
        assert_eq!(at(week).filter_at("", DateScope::Week, now).len(), 1);
        assert!(at(week - second).filter_at("", DateScope::Week, now).is_empty());

        let month = now - Duration::days(30);
        assert_eq!(at(month).filter_at("", DateScope::Month, now).len(), 1);
        assert!(at(month - second).filter_at("", DateScope::Month, now).is_empty());
    }

    #[test]
    fn mutations_bump_the_render_revision() {
        let mut store = ScanHistoryStore::new(MemoryStore::new());
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.append(completed("10.0.0.1", &[]));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.clear();
        assert!(rx.has_changed().unwrap());
    }
}
