use crate::models::{DATE_FORMAT, History, Task};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::{error, warn};

pub const TASKS_KEY: &str = "tasks";
pub const HISTORY_KEY: &str = "history";

/// Synchronous string key-value storage. Writes replace the whole value.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// In-memory storage. Clones share the same entries, so a caller can keep a
/// handle and observe what a `TaskStore` wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_tasks(storage: &dyn Storage) -> Vec<Task> {
    let raw: Vec<Task> = load_entry(storage, TASKS_KEY).unwrap_or_default();
    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(raw.len());
    for name in raw {
        if name.trim().is_empty() {
            warn!("dropping empty task name from stored tasks");
            continue;
        }
        if !seen.insert(name.clone()) {
            warn!("dropping duplicate stored task {name:?}");
            continue;
        }
        tasks.push(name);
    }
    tasks
}

pub fn load_history(storage: &dyn Storage) -> History {
    let mut history: History = load_entry(storage, HISTORY_KEY).unwrap_or_default();
    history.retain(|date, _| {
        let valid = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .is_ok_and(|parsed| parsed.format(DATE_FORMAT).to_string() == *date);
        if !valid {
            warn!("dropping stored history entry with malformed date {date:?}");
        }
        valid
    });
    history
}

pub fn save_entry<T: serde::Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> io::Result<()> {
    let payload = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    storage.set(key, &payload)
}

fn load_entry<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                error!("failed to parse stored {key}: {err}");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            error!("failed to read stored {key}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entries_load_as_empty() {
        let storage = MemoryStorage::new();
        assert!(load_tasks(&storage).is_empty());
        assert!(load_history(&storage).is_empty());
    }

    #[test]
    fn corrupt_entries_load_as_empty() {
        let storage = MemoryStorage::with_entries([
            (TASKS_KEY, "not json"),
            (HISTORY_KEY, "{\"2026-01-01\": 3}"),
        ]);
        assert!(load_tasks(&storage).is_empty());
        assert!(load_history(&storage).is_empty());
    }

    #[test]
    fn stored_tasks_drop_blanks_and_duplicates() {
        let storage =
            MemoryStorage::with_entries([(TASKS_KEY, r#"["run", "  ", "read", "run", " gym "]"#)]);
        assert_eq!(load_tasks(&storage), vec!["run", "read", " gym "]);
    }

    #[test]
    fn malformed_history_dates_are_dropped() {
        let storage = MemoryStorage::with_entries([(
            HISTORY_KEY,
            r#"{"2026-01-05": {"run": true}, "yesterday": {"run": true}, "2026-13-01": {}, "2026-1-6": {"run": true}}"#,
        )]);
        let history = load_history(&storage);
        assert_eq!(history.len(), 1);
        assert_eq!(history["2026-01-05"]["run"], true);
    }

    #[test]
    fn file_storage_round_trips_and_reports_missing() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("habit_storage_{}_{nanos}", std::process::id()));
        let mut storage = FileStorage::new(&dir);

        assert_eq!(storage.get(TASKS_KEY).unwrap(), None);
        storage.set(TASKS_KEY, "[\"run\"]").unwrap();
        assert_eq!(storage.get(TASKS_KEY).unwrap().as_deref(), Some("[\"run\"]"));
        assert!(dir.join("tasks.json").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
