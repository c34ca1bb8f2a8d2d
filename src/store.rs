use crate::models::{AddOutcome, DATE_FORMAT, DayRecord, History, RejectReason, Task};
use crate::storage::{HISTORY_KEY, Storage, TASKS_KEY, load_history, load_tasks, save_entry};
use chrono::NaiveDate;
use std::io;
use tracing::info;

/// Owns the live task list and the completion history, and writes each back
/// to storage before a mutation returns.
pub struct TaskStore {
    storage: Box<dyn Storage>,
    tasks: Vec<Task>,
    history: History,
}

impl TaskStore {
    /// Loads both entries from `storage`. Missing or corrupt data starts empty.
    pub fn load(storage: impl Storage + 'static) -> Self {
        let tasks = load_tasks(&storage);
        let history = load_history(&storage);
        info!(tasks = tasks.len(), days = history.len(), "loaded habit data");
        Self {
            storage: Box::new(storage),
            tasks,
            history,
        }
    }

    pub fn add_task(&mut self, name: &str) -> io::Result<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AddOutcome::Rejected(RejectReason::Empty));
        }
        if self.tasks.iter().any(|task| task == name) {
            return Ok(AddOutcome::Rejected(RejectReason::Duplicate));
        }

        let mut tasks = self.tasks.clone();
        tasks.push(name.to_string());
        save_entry(&mut *self.storage, TASKS_KEY, &tasks)?;
        self.tasks = tasks;
        Ok(AddOutcome::Added(name.to_string()))
    }

    /// Removes `name` from the live list. History keeps its entries.
    pub fn delete_task(&mut self, name: &str) -> io::Result<bool> {
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.as_str() != name)
            .cloned()
            .collect();
        save_entry(&mut *self.storage, TASKS_KEY, &tasks)?;
        let removed = tasks.len() != self.tasks.len();
        self.tasks = tasks;
        Ok(removed)
    }

    /// `task` is not checked against the live list.
    pub fn set_completion(&mut self, date: NaiveDate, task: &str, completed: bool) -> io::Result<()> {
        let mut history = self.history.clone();
        history
            .entry(date_key(date))
            .or_default()
            .insert(task.to_string(), completed);
        save_entry(&mut *self.storage, HISTORY_KEY, &history)?;
        self.history = history;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn day_record(&self, date: NaiveDate) -> DayRecord {
        self.history.get(&date_key(date)).cloned().unwrap_or_default()
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> io::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_task_trims_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(storage.clone());

        let outcome = store.add_task("  run  ").unwrap();
        assert_eq!(outcome, AddOutcome::Added("run".to_string()));
        assert_eq!(store.tasks(), ["run"]);

        let persisted: Vec<String> =
            serde_json::from_str(&storage.snapshot(TASKS_KEY).unwrap()).unwrap();
        assert_eq!(persisted, vec!["run"]);
    }

    #[test]
    fn add_task_rejects_duplicates_case_sensitively() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add_task("run").unwrap();

        assert_eq!(
            store.add_task("run").unwrap(),
            AddOutcome::Rejected(RejectReason::Duplicate)
        );
        assert_eq!(
            store.add_task(" run ").unwrap(),
            AddOutcome::Rejected(RejectReason::Duplicate)
        );
        assert_eq!(
            store.add_task("Run").unwrap(),
            AddOutcome::Added("Run".to_string())
        );
        assert_eq!(store.tasks(), ["run", "Run"]);
    }

    #[test]
    fn add_task_rejects_whitespace_without_writing() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(storage.clone());

        assert_eq!(
            store.add_task("   ").unwrap(),
            AddOutcome::Rejected(RejectReason::Empty)
        );
        assert!(store.tasks().is_empty());
        assert_eq!(storage.snapshot(TASKS_KEY), None);
    }

    #[test]
    fn delete_task_keeps_history() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add_task("run").unwrap();
        store.add_task("read").unwrap();
        store.set_completion(day(2026, 1, 4), "run", true).unwrap();

        assert!(store.delete_task("run").unwrap());
        assert!(!store.delete_task("missing").unwrap());
        assert_eq!(store.tasks(), ["read"]);
        assert_eq!(store.day_record(day(2026, 1, 4)).get("run"), Some(&true));
    }

    #[test]
    fn set_completion_creates_record_lazily() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(storage.clone());
        let date = day(2026, 1, 5);

        assert!(store.day_record(date).is_empty());
        assert!(store.history().is_empty());

        store.set_completion(date, "run", true).unwrap();
        store.set_completion(date, "read", false).unwrap();

        let record = store.day_record(date);
        assert_eq!(record.get("run"), Some(&true));
        assert_eq!(record.get("read"), Some(&false));

        let persisted: History =
            serde_json::from_str(&storage.snapshot(HISTORY_KEY).unwrap()).unwrap();
        assert_eq!(persisted["2026-01-05"], record);
    }

    #[test]
    fn reload_sees_previous_mutations() {
        let storage = MemoryStorage::new();
        {
            let mut store = TaskStore::load(storage.clone());
            store.add_task("run").unwrap();
            store.set_completion(day(2026, 1, 5), "run", true).unwrap();
        }

        let store = TaskStore::load(storage);
        assert_eq!(store.tasks(), ["run"]);
        assert_eq!(store.day_record(day(2026, 1, 5)).get("run"), Some(&true));
    }

    #[test]
    fn failed_writes_leave_store_unchanged() {
        let mut store = TaskStore::load(FailingStorage);
        let date = day(2026, 1, 5);

        assert!(store.add_task("run").is_err());
        assert!(store.tasks().is_empty());

        assert!(store.set_completion(date, "run", true).is_err());
        assert!(store.history().is_empty());
        assert!(store.day_record(date).is_empty());
    }

    #[test]
    fn failed_delete_keeps_task() {
        let mut store = TaskStore {
            storage: Box::new(FailingStorage),
            tasks: vec!["run".to_string()],
            history: History::new(),
        };

        assert!(store.delete_task("run").is_err());
        assert_eq!(store.tasks(), ["run"]);
    }
}
