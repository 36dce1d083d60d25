//! Shared screen state.
//!
//! `MainViewModel` is created once per navigation root and handed to each
//! screen by reference. It owns the task store, the task currently shown on
//! the details screen and the emoji catalogue load state.
//!
//! Emoji loads run on a worker thread and report back over a channel. The UI
//! loop calls [`MainViewModel::pump`] between frames, so state only changes on
//! the UI thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::db::{Database, StoreError};
use crate::emoji::{EmojiError, EmojiItem, EmojiSource, EmojiViewState};
use crate::fields::TaskStatus;
use crate::task::Task;

type EmojiLoad = Result<Vec<EmojiItem>, EmojiError>;

pub struct MainViewModel {
    db: Database,
    db_path: PathBuf,
    task_details: Option<Task>,
    emoji: EmojiViewState,
    emoji_source: Arc<dyn EmojiSource>,
    pending_emoji: Option<Receiver<EmojiLoad>>,
    emoji_loads_started: usize,
}

impl MainViewModel {
    /// Open the store at `db_path`.
    pub fn new(db_path: &Path, emoji_source: Arc<dyn EmojiSource>) -> Result<Self, StoreError> {
        let db = Database::load(db_path)?;
        info!(path = %db_path.display(), tasks = db.tasks.len(), "task store opened");
        Ok(Self {
            db,
            db_path: db_path.to_path_buf(),
            task_details: None,
            emoji: EmojiViewState::Empty,
            emoji_source,
            pending_emoji: None,
            emoji_loads_started: 0,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.db.tasks
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn emoji_source(&self) -> &dyn EmojiSource {
        self.emoji_source.as_ref()
    }

    /// Persist a new task. On a failed save the in-memory store is rolled back.
    pub fn insert_task(&mut self, task: Task) -> Result<u64, StoreError> {
        let id = self.db.insert(task, Utc::now().timestamp());
        if let Err(e) = self.db.save(&self.db_path) {
            error!(error = %e, "failed to save new task");
            self.db.remove(id);
            return Err(e);
        }
        info!(id, "task inserted");
        Ok(id)
    }

    /// Load a task into the details state. An unknown id clears it.
    pub fn find_task_by_id(&mut self, id: u64) {
        self.task_details = self.db.get(id).cloned();
        if self.task_details.is_none() {
            warn!(id, "task not found");
        } else {
            debug!(id, "task details loaded");
        }
    }

    pub fn task_details(&self) -> Option<&Task> {
        self.task_details.as_ref()
    }

    /// Advance a task's status and save. Returns the new status, or `None` for an unknown id.
    pub fn cycle_task_status(&mut self, id: u64) -> Result<Option<TaskStatus>, StoreError> {
        let Some(task) = self.db.get_mut(id) else {
            return Ok(None);
        };
        let previous = task.status;
        task.status = previous.next();
        task.updated_at_utc = Utc::now().timestamp();
        let status = task.status;

        if let Err(e) = self.db.save(&self.db_path) {
            error!(error = %e, id, "failed to save status change");
            if let Some(task) = self.db.get_mut(id) {
                task.status = previous;
            }
            return Err(e);
        }
        self.refresh_details(id);
        info!(id, status = status.label(), "task status changed");
        Ok(Some(status))
    }

    /// Set a task's status and save. Returns `false` for an unknown id.
    pub fn set_task_status(&mut self, id: u64, status: TaskStatus) -> Result<bool, StoreError> {
        let Some(task) = self.db.get_mut(id) else {
            return Ok(false);
        };
        let previous = task.status;
        task.status = status;
        task.updated_at_utc = Utc::now().timestamp();
        if let Err(e) = self.db.save(&self.db_path) {
            error!(error = %e, id, "failed to save status change");
            if let Some(task) = self.db.get_mut(id) {
                task.status = previous;
            }
            return Err(e);
        }
        self.refresh_details(id);
        Ok(true)
    }

    /// Delete a task and save. Returns `false` for an unknown id.
    pub fn delete_task(&mut self, id: u64) -> Result<bool, StoreError> {
        let Some((idx, removed)) = self.db.take(id) else {
            return Ok(false);
        };
        if let Err(e) = self.db.save(&self.db_path) {
            error!(error = %e, id, "failed to save deletion");
            self.db.restore(idx, removed);
            return Err(e);
        }
        if self.task_details.as_ref().is_some_and(|t| t.id == id) {
            self.task_details = None;
        }
        info!(id, "task deleted");
        Ok(true)
    }

    fn refresh_details(&mut self, id: u64) {
        if self.task_details.as_ref().is_some_and(|t| t.id == id) {
            self.task_details = self.db.get(id).cloned();
        }
    }

    pub fn emoji(&self) -> &EmojiViewState {
        &self.emoji
    }

    /// Request the emoji catalogue. A request while a load is running is coalesced.
    pub fn get_all_emoji(&mut self) {
        if self.pending_emoji.is_some() {
            debug!("emoji load already in flight");
            return;
        }
        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.emoji_source);
        thread::spawn(move || {
            // The receiver is gone if the view-model was dropped mid-load.
            let _ = tx.send(source.load());
        });
        self.pending_emoji = Some(rx);
        self.emoji = EmojiViewState::Loading;
        self.emoji_loads_started += 1;
        debug!(source = %self.emoji_source.describe(), "emoji load started");
    }

    /// Number of catalogue loads started so far.
    pub fn emoji_loads_started(&self) -> usize {
        self.emoji_loads_started
    }

    /// Deliver a finished emoji load, if any. Returns `true` when the state changed.
    pub fn pump(&mut self) -> bool {
        let Some(rx) = &self.pending_emoji else {
            return false;
        };
        self.emoji = match rx.try_recv() {
            Err(TryRecvError::Empty) => return false,
            Ok(Ok(items)) if items.is_empty() => EmojiViewState::Empty,
            Ok(Ok(items)) => {
                debug!(count = items.len(), "emoji loaded");
                EmojiViewState::Success(items)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "emoji load failed");
                EmojiViewState::Error(e.to_string())
            }
            Err(TryRecvError::Disconnected) => {
                warn!("emoji loader exited without a result");
                EmojiViewState::Error("emoji loader stopped".to_string())
            }
        };
        self.pending_emoji = None;
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use super::*;

    /// Emoji source with a fixed result.
    pub struct StaticEmoji(pub Vec<EmojiItem>);

    impl EmojiSource for StaticEmoji {
        fn load(&self) -> Result<Vec<EmojiItem>, EmojiError> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    /// Pump until the running emoji load lands.
    pub fn settle(vm: &mut MainViewModel) {
        for _ in 0..500 {
            if vm.pump() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("emoji load did not finish");
    }

    pub fn view_model(dir: &Path) -> MainViewModel {
        MainViewModel::new(&dir.join("tasks.json"), Arc::new(crate::emoji::BundledEmoji)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::emoji::FileEmoji;
    use crate::task::{DEFAULT_EMOJI, DUE_PLACEHOLDER};

    fn task(title: &str) -> Task {
        Task {
            id: 0,
            title: title.into(),
            description: "d".into(),
            category: "c".into(),
            emoji: DEFAULT_EMOJI.into(),
            urgency: 1,
            importance: 2,
            due: DUE_PLACEHOLDER.into(),
            status: TaskStatus::Todo,
            created_at_utc: 0,
            updated_at_utc: 0,
        }
    }

    #[test]
    fn insert_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = view_model(dir.path());
        let id = vm.insert_task(task("write tests")).unwrap();
        assert_eq!(id, 1);

        let reopened = view_model(dir.path());
        assert_eq!(reopened.tasks().len(), 1);
        assert_eq!(reopened.tasks()[0].title, "write tests");
        assert!(reopened.tasks()[0].created_at_utc > 0);
    }

    #[test]
    fn failed_save_rolls_back_insert() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the store file should be makes the rename fail.
        let db_path = dir.path().join("tasks.json");
        std::fs::create_dir_all(&db_path).unwrap();
        std::fs::write(db_path.join("keep"), "x").unwrap();
        let mut vm = MainViewModel {
            db: Database::default(),
            db_path,
            task_details: None,
            emoji: EmojiViewState::Empty,
            emoji_source: Arc::new(crate::emoji::BundledEmoji),
            pending_emoji: None,
            emoji_loads_started: 0,
        };
        assert!(vm.insert_task(task("lost")).is_err());
        assert!(vm.tasks().is_empty());
    }

    /// Swap the store file for a non-empty directory so every save fails.
    fn break_store(vm: &MainViewModel) {
        std::fs::remove_file(vm.db_path()).unwrap();
        std::fs::create_dir(vm.db_path()).unwrap();
        std::fs::write(vm.db_path().join("keep"), "x").unwrap();
    }

    #[test]
    fn failed_delete_restores_original_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = view_model(dir.path());
        for title in ["a", "b", "c"] {
            vm.insert_task(task(title)).unwrap();
        }
        vm.find_task_by_id(1);
        break_store(&vm);

        assert!(vm.delete_task(1).is_err());
        let ids: Vec<u64> = vm.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(vm.task_details().map(|t| t.id), Some(1));
    }

    #[test]
    fn failed_status_change_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = view_model(dir.path());
        let id = vm.insert_task(task("stuck")).unwrap();
        vm.find_task_by_id(id);
        break_store(&vm);

        assert!(vm.cycle_task_status(id).is_err());
        assert_eq!(vm.database().get(id).unwrap().status, TaskStatus::Todo);
        assert!(vm.set_task_status(id, TaskStatus::Done).is_err());
        assert_eq!(vm.database().get(id).unwrap().status, TaskStatus::Todo);
        assert_eq!(vm.task_details().unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn find_task_by_id_loads_details() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = view_model(dir.path());
        let id = vm.insert_task(task("details")).unwrap();
        vm.find_task_by_id(id);
        assert_eq!(vm.task_details().map(|t| t.title.as_str()), Some("details"));
        vm.find_task_by_id(999);
        assert!(vm.task_details().is_none());
    }

    #[test]
    fn status_cycle_and_delete_update_details() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = view_model(dir.path());
        let id = vm.insert_task(task("cycle")).unwrap();
        vm.find_task_by_id(id);

        assert_eq!(vm.cycle_task_status(id).unwrap(), Some(TaskStatus::InProgress));
        assert_eq!(vm.task_details().unwrap().status, TaskStatus::InProgress);
        assert_eq!(vm.cycle_task_status(42).unwrap(), None);

        assert!(vm.set_task_status(id, TaskStatus::Done).unwrap());
        assert_eq!(vm.task_details().unwrap().status, TaskStatus::Done);

        assert!(vm.delete_task(id).unwrap());
        assert!(vm.task_details().is_none());
        assert!(!vm.delete_task(id).unwrap());
        assert!(view_model(dir.path()).tasks().is_empty());
    }

    #[test]
    fn emoji_load_goes_loading_then_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = view_model(dir.path());
        assert_eq!(vm.emoji(), &EmojiViewState::Empty);
        assert!(!vm.pump());

        vm.get_all_emoji();
        assert_eq!(vm.emoji(), &EmojiViewState::Loading);
        settle(&mut vm);
        assert!(matches!(vm.emoji(), EmojiViewState::Success(items) if !items.is_empty()));
        assert_eq!(vm.emoji_loads_started(), 1);
    }

    #[test]
    fn requests_during_a_load_are_coalesced() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = view_model(dir.path());
        vm.get_all_emoji();
        vm.get_all_emoji();
        vm.get_all_emoji();
        assert_eq!(vm.emoji_loads_started(), 1);
        settle(&mut vm);
        vm.get_all_emoji();
        assert_eq!(vm.emoji_loads_started(), 2);
    }

    #[test]
    fn empty_catalogue_maps_to_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut vm = MainViewModel::new(&dir.path().join("tasks.json"), Arc::new(StaticEmoji(vec![]))).unwrap();
        vm.get_all_emoji();
        settle(&mut vm);
        assert_eq!(vm.emoji(), &EmojiViewState::Empty);
    }

    #[test]
    fn failed_load_maps_to_error_state() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileEmoji { path: dir.path().join("missing.json") };
        let mut vm = MainViewModel::new(&dir.path().join("tasks.json"), Arc::new(source)).unwrap();
        vm.get_all_emoji();
        settle(&mut vm);
        match vm.emoji() {
            EmojiViewState::Error(cause) => assert!(cause.contains("missing.json")),
            other => panic!("expected error state, got {other:?}"),
        }
    }
}
