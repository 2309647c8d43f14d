use crate::entry::Entry;
use crate::error::{require_non_blank, Result};
use crate::storage::KeyValueStore;

/// Newest-first list of entries mirrored to a key-value store.
pub struct EntryStore<S: KeyValueStore> {
    store: S,
    key: String,
    date_format: String,
    entries: Vec<Entry>,
    last_mood: Option<String>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Reads the list stored under `key`. Missing or unreadable data yields an
    /// empty list.
    pub fn load(store: S, key: impl Into<String>, date_format: impl Into<String>) -> Self {
        let key = key.into();
        let entries = match store.get(&key) {
            Ok(Some(serialized)) => match serde_json::from_str::<Vec<Entry>>(&serialized) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Discarding unreadable entries under {}: {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => {
                log::info!("No saved entries under {}, starting empty", key);
                Vec::new()
            }
            Err(e) => {
                log::warn!("Failed to read entries under {}: {}", key, e);
                Vec::new()
            }
        };
        log::debug!("Loaded {} entries", entries.len());

        EntryStore {
            store,
            key,
            date_format: date_format.into(),
            entries,
            last_mood: None,
        }
    }

    pub fn save_journal_entry(&mut self, text: &str, analysis: &str) -> Result<&Entry> {
        require_non_blank("text", text)?;
        let entry = Entry::new_journal(text.to_string(), analysis.to_string(), &self.date_format);
        Ok(self.prepend(entry))
    }

    pub fn save_mood_check_in(&mut self, mood: &str) -> Result<&Entry> {
        require_non_blank("mood", mood)?;
        let entry = Entry::new_mood(mood.to_string(), &self.date_format);
        self.last_mood = Some(mood.to_string());
        Ok(self.prepend(entry))
    }

    /// Writes the whole list under the store key, replacing what was there.
    pub fn persist(&mut self) -> Result<()> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, &serialized)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Mood saved most recently by this process, if any.
    pub fn last_mood(&self) -> Option<&str> {
        self.last_mood.as_deref()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn prepend(&mut self, entry: Entry) -> &Entry {
        self.entries.insert(0, entry);
        if let Err(e) = self.persist() {
            log::error!("Failed to persist entries under {}: {}", self.key, e);
        }
        &self.entries[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{JournalEntry, MoodCheckIn};
    use crate::error::MindMendError;
    use crate::storage::{FileStore, MemoryStore};
    use chrono::Local;
    use tempfile::TempDir;

    const KEY: &str = "mindmend-entries";
    const DATE_FORMAT: &str = "%-m/%-d/%Y";

    fn empty_store() -> EntryStore<MemoryStore> {
        EntryStore::load(MemoryStore::new(), KEY, DATE_FORMAT)
    }

    fn today() -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(std::io::Error::other("quota exceeded").into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(std::io::Error::other("quota exceeded").into())
        }
    }

    #[test]
    fn test_save_journal_entry_prepends() {
        let mut store = empty_store();
        store.save_mood_check_in("ok").unwrap();

        store.save_journal_entry("first thought", "").unwrap();

        assert_eq!(store.entries().len(), 2);
        match &store.entries()[0] {
            Entry::Journal(e) => assert_eq!(e.text, "first thought"),
            Entry::Mood(_) => panic!("expected journal entry at index 0"),
        }
    }

    #[test]
    fn test_blank_text_leaves_list_unchanged() {
        let mut store = empty_store();
        store.save_journal_entry("kept", "").unwrap();

        for blank in ["", "   "] {
            let err = store.save_journal_entry(blank, "insight").unwrap_err();
            assert!(matches!(err, MindMendError::EmptyInput { field: "text" }));
        }
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_blank_mood_rejected() {
        let mut store = empty_store();
        let err = store.save_mood_check_in(" \t").unwrap_err();
        assert!(matches!(err, MindMendError::EmptyInput { field: "mood" }));
        assert!(store.entries().is_empty());
        assert_eq!(store.last_mood(), None);
    }

    #[test]
    fn test_mood_then_journal_scenario() {
        let mut store = empty_store();

        store.save_mood_check_in("anxious").unwrap();
        assert_eq!(store.entries().len(), 1);
        match &store.entries()[0] {
            Entry::Mood(MoodCheckIn { mood, date, .. }) => {
                assert_eq!(mood, "anxious");
                assert_eq!(date, &today());
            }
            Entry::Journal(_) => panic!("expected mood check-in"),
        }

        store.save_journal_entry("I feel tired", "").unwrap();
        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        match (&entries[0], &entries[1]) {
            (
                Entry::Journal(JournalEntry { text, analysis, date, .. }),
                Entry::Mood(MoodCheckIn { mood, .. }),
            ) => {
                assert_eq!(text, "I feel tired");
                assert_eq!(analysis, "");
                assert_eq!(date, &today());
                assert_eq!(mood, "anxious");
            }
            _ => panic!("expected journal entry followed by mood check-in"),
        }
        assert_eq!(store.last_mood(), Some("anxious"));
    }

    #[test]
    fn test_every_save_is_persisted() {
        let mut store = empty_store();
        store.save_mood_check_in("calm").unwrap();
        store.save_journal_entry("note", "insight").unwrap();

        let backend = store.into_store();
        let raw = backend.get(KEY).unwrap().unwrap();
        let saved: Vec<Entry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.len(), 2);
    }

    #[test]
    fn test_round_trip_through_fresh_store() {
        let mut store = empty_store();
        store.save_mood_check_in("anxious").unwrap();
        store.save_journal_entry("I feel tired", "Take a rest").unwrap();
        let before = store.entries().to_vec();

        let reloaded = EntryStore::load(store.into_store(), KEY, DATE_FORMAT);

        assert_eq!(reloaded.entries(), before.as_slice());
        assert_eq!(reloaded.last_mood(), None);
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let temp = TempDir::new().unwrap();
        let mut store = EntryStore::load(FileStore::new(temp.path()), KEY, DATE_FORMAT);
        store.save_journal_entry("on disk", "").unwrap();
        let before = store.entries().to_vec();

        let reloaded = EntryStore::load(FileStore::new(temp.path()), KEY, DATE_FORMAT);
        assert_eq!(reloaded.entries(), before.as_slice());
    }

    #[test]
    fn test_load_missing_is_empty() {
        assert!(empty_store().entries().is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        for raw in ["not json", "{\"id\":1}", "[{\"id\":1,\"date\":\"x\"}]", "null"] {
            let mut backend = MemoryStore::new();
            backend.set(KEY, raw).unwrap();
            let store = EntryStore::load(backend, KEY, DATE_FORMAT);
            assert!(store.entries().is_empty(), "expected empty list for {raw}");
        }
    }

    #[test]
    fn test_load_reads_other_key_independently() {
        let mut backend = MemoryStore::new();
        backend
            .set("other", r#"[{"id":1,"mood":"fine","date":"1/1/2024"}]"#)
            .unwrap();
        let store = EntryStore::load(backend, KEY, DATE_FORMAT);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_invalid_date_format_does_not_panic() {
        let mut store = EntryStore::load(MemoryStore::new(), KEY, "%Q");
        store.save_mood_check_in("calm").unwrap();
        store.save_journal_entry("still saved", "").unwrap();
        assert_eq!(store.entries().len(), 2);
        assert!(!store.entries()[0].date().is_empty());
    }

    #[test]
    fn test_storage_failures_are_not_fatal() {
        let mut store = EntryStore::load(FailingStore, KEY, DATE_FORMAT);
        assert!(store.entries().is_empty());

        store.save_journal_entry("still here", "").unwrap();
        assert_eq!(store.entries().len(), 1);
        assert!(store.persist().is_err());
    }
}
