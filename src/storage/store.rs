use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    models::{mood::MoodEntry, task::Task},
    storage::{Storage, StorageError, flat_file::FlatFileCollection},
};

/// Backups kept per collection
const MAX_BACKUPS: usize = 5;
const BACKUP_DIR: &str = "backups";

pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";
pub const DEFAULT_JOURNAL_FILE: &str = "journal.txt";

/// Where the two collection files live.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data_dir: PathBuf,
    pub tasks_file: PathBuf,
    pub journal_file: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl Into<PathBuf>, tasks_file: &str, journal_file: &str) -> Self {
        let data_dir = data_dir.into();
        Self {
            tasks_file: data_dir.join(tasks_file),
            journal_file: data_dir.join(journal_file),
            data_dir,
        }
    }
}

/// The task list and the mood journal.
///
/// The two collections are independent: reading both is two separate snapshots,
/// never one transaction.
pub struct RecordStore {
    data_dir: PathBuf,
    tasks: FlatFileCollection<Task>,
    moods: FlatFileCollection<MoodEntry>,
}

impl RecordStore {
    pub fn open(paths: &StorePaths) -> Result<Self, StorageError> {
        fs::create_dir_all(&paths.data_dir).map_err(|e| StorageError::InitFailed {
            path: paths.data_dir.clone(),
            source: e,
        })?;

        let store = Self {
            data_dir: paths.data_dir.clone(),
            tasks: FlatFileCollection::open(paths.tasks_file.clone())?,
            moods: FlatFileCollection::open(paths.journal_file.clone())?,
        };
        info!(
            "event=store_open status=ok data_dir={}",
            store.data_dir.display()
        );
        Ok(store)
    }

    pub fn tasks(&mut self) -> &mut FlatFileCollection<Task> {
        &mut self.tasks
    }

    pub fn moods(&mut self) -> &mut FlatFileCollection<MoodEntry> {
        &mut self.moods
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Ensures the data directory and both collection files exist.
    pub fn initialize(&self) -> Result<(), StorageError> {
        self.tasks.initialize()?;
        self.moods.initialize()
    }

    /// Copies both collection files into the backup directory.
    ///
    /// Returns the paths of the new backups. Only the newest backups of each
    /// collection are kept.
    pub fn backup(&self) -> Result<Vec<PathBuf>, StorageError> {
        // a collection file removed since open is backed up as empty
        self.initialize()?;

        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir).map_err(|e| StorageError::BackupFailed {
            path: backup_dir.clone(),
            source: e,
        })?;

        let stamp = format!("{:024}", jiff::Timestamp::now().as_nanosecond());
        let mut created = Vec::new();
        for source in [self.tasks.path(), self.moods.path()] {
            let prefix = backup_prefix(source);
            let target = backup_dir.join(format!("{prefix}{stamp}.txt"));
            fs::copy(source, &target).map_err(|e| StorageError::BackupFailed {
                path: target.clone(),
                source: e,
            })?;
            self.cleanup_old_backups(&prefix)?;
            created.push(target);
        }

        info!(
            "event=backup status=ok dir={} files={}",
            backup_dir.display(),
            created.len()
        );
        Ok(created)
    }

    /// Copies the newest backup of each collection over its live file.
    ///
    /// Both collections are reloaded afterwards so the id watermarks cover every
    /// restored id.
    pub fn restore_latest(&mut self) -> Result<(), StorageError> {
        let backup_dir = self.backup_dir();
        let sources = [
            self.latest_backup(self.tasks.path())?,
            self.latest_backup(self.moods.path())?,
        ];
        if sources.iter().all(Option::is_none) {
            return Err(StorageError::NoBackups { dir: backup_dir });
        }

        let [tasks_backup, moods_backup] = sources;
        if let Some(backup) = tasks_backup {
            restore_file(&backup, self.tasks.path())?;
        }
        if let Some(backup) = moods_backup {
            restore_file(&backup, self.moods.path())?;
        }

        self.tasks.load_all()?;
        self.moods.load_all()?;
        info!("event=restore status=ok dir={}", backup_dir.display());
        Ok(())
    }

    fn backup_dir(&self) -> PathBuf {
        self.data_dir.join(BACKUP_DIR)
    }

    fn backups_for(&self, prefix: &str) -> Result<Vec<PathBuf>, StorageError> {
        let backup_dir = self.backup_dir();
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = fs::read_dir(&backup_dir)
            .map_err(|e| StorageError::BackupFailed {
                path: backup_dir.clone(),
                source: e,
            })?
            .flatten()
            .filter(|entry| entry.metadata().map(|m| m.is_file()).unwrap_or(false))
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
            .map(|entry| entry.path())
            .collect::<Vec<_>>();

        backups.sort();
        Ok(backups)
    }

    fn latest_backup(&self, live: &Path) -> Result<Option<PathBuf>, StorageError> {
        Ok(self.backups_for(&backup_prefix(live))?.pop())
    }

    fn cleanup_old_backups(&self, prefix: &str) -> Result<(), StorageError> {
        let backups = self.backups_for(prefix)?;
        let excess = backups.len().saturating_sub(MAX_BACKUPS);

        for path in &backups[..excess] {
            fs::remove_file(path).map_err(|e| StorageError::BackupFailed {
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(())
    }
}

fn backup_prefix(live: &Path) -> String {
    let stem = live
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("collection"));
    format!("{stem}-")
}

fn restore_file(backup: &Path, live: &Path) -> Result<(), StorageError> {
    fs::copy(backup, live)
        .map(|_| ())
        .map_err(|e| StorageError::SaveFailed {
            path: live.to_path_buf(),
            source: e,
        })
}
