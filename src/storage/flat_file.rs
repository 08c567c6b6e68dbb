use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use log::{debug, error};
use uuid::Uuid;

use crate::storage::{Storage, StorageError, codec::Record};

/// One collection of records stored as one line each in a single text file.
pub struct FlatFileCollection<T: Record> {
    path: PathBuf,
    /// Watermark: the next id `next_id` will hand out. `None` once `u64::MAX` is taken.
    next_id: Option<u64>,
    _record: PhantomData<T>,
}

impl<T: Record> FlatFileCollection<T> {
    /// A collection over `path` with the watermark at 1. Touches nothing on disk.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            next_id: Some(1),
            _record: PhantomData,
        }
    }

    /// Creates the file if needed and primes the watermark from its contents.
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let mut collection = Self::new(path);
        collection.initialize()?;
        collection.load_all()?;
        Ok(collection)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the parent directory and the file exist. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::InitFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::InitFailed {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn observe(&mut self, id: u64) {
        self.next_id = match (self.next_id, id.checked_add(1)) {
            (Some(current), Some(after)) => Some(current.max(after)),
            _ => None,
        };
    }

    /// Replaces the whole file with `records`.
    ///
    /// The new content goes to a sibling temp file first, so a failed write leaves
    /// the current file as it was.
    fn rewrite(&self, records: &[T]) -> Result<(), StorageError> {
        let content: String = records
            .iter()
            .map(|record| record.encode() + "\n")
            .collect();

        let temp_path = PathBuf::from(format!("{}.tmp.{}", self.path.display(), Uuid::new_v4()));
        fs::write(&temp_path, content).map_err(|e| {
            error!(
                "event=rewrite kind={} status=error path={} err={}",
                T::KIND,
                temp_path.display(),
                e
            );
            StorageError::SaveFailed {
                path: temp_path.clone(),
                source: e,
            }
        })?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            error!(
                "event=rewrite kind={} status=error path={} err={}",
                T::KIND,
                self.path.display(),
                e
            );
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::SaveFailed {
                path: self.path.clone(),
                source: e,
            });
        }

        debug!(
            "event=rewrite kind={} status=ok records={}",
            T::KIND,
            records.len()
        );
        Ok(())
    }
}

impl<T: Record> Storage<T> for FlatFileCollection<T> {
    fn create(&mut self, record: &T) -> Result<(), StorageError> {
        let save_failed = |e: std::io::Error| {
            error!(
                "event=create kind={} status=error path={} err={}",
                T::KIND,
                self.path.display(),
                e
            );
            StorageError::SaveFailed {
                path: self.path.clone(),
                source: e,
            }
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(save_failed)?;
        writeln!(file, "{}", record.encode()).map_err(save_failed)?;

        self.observe(record.id());
        debug!("event=create kind={} id={} status=ok", T::KIND, record.id());
        Ok(())
    }

    fn load_all(&mut self) -> Result<Vec<T>, StorageError> {
        let load_failed = |path: &Path, e: std::io::Error| StorageError::LoadFailed {
            path: path.to_path_buf(),
            source: e,
        };

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(load_failed(&self.path, e)),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| load_failed(&self.path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = T::decode(&line);
            self.observe(record.id());
            records.push(record);
        }

        debug!(
            "event=load kind={} records={} next_id={:?}",
            T::KIND,
            records.len(),
            self.next_id
        );
        Ok(records)
    }

    fn update(&mut self, record: &T) -> Result<(), StorageError> {
        let mut records = self.load_all()?;

        if let Some(existing) = records.iter_mut().find(|r| r.id() == record.id()) {
            *existing = record.clone();
        } else {
            debug!(
                "event=update kind={} id={} status=missing",
                T::KIND,
                record.id()
            );
        }

        self.rewrite(&records)
    }

    fn delete(&mut self, id: u64) -> Result<(), StorageError> {
        let mut records = self.load_all()?;

        let Some(position) = records.iter().position(|r| r.id() == id) else {
            return Err(StorageError::NotFound { kind: T::KIND, id });
        };
        records.remove(position);

        self.rewrite(&records)
    }

    fn next_id(&mut self) -> Result<u64, StorageError> {
        let id = self
            .next_id
            .ok_or(StorageError::IdsExhausted { kind: T::KIND })?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::models::{
        mood::{Mood, MoodEntry},
        task::{Priority, Task},
    };

    fn tasks_in(dir: &TempDir) -> FlatFileCollection<Task> {
        FlatFileCollection::open(dir.path().join("data").join("tasks.txt")).unwrap()
    }

    fn task(id: u64, title: &str) -> Task {
        Task::new(id, title)
    }

    #[test]
    fn test_initialize_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let collection = tasks_in(&dir);

        assert!(collection.path().is_file());
        collection.initialize().unwrap();
        assert_eq!(fs::read_to_string(collection.path()).unwrap(), "");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut collection: FlatFileCollection<Task> =
            FlatFileCollection::new(dir.path().join("nope.txt"));

        assert!(collection.load_all().unwrap().is_empty());
        assert_eq!(collection.next_id().unwrap(), 1);
    }

    #[test]
    fn test_create_then_load_single_task() {
        let dir = TempDir::new().unwrap();
        let mut collection = tasks_in(&dir);

        let mut new_task = task(collection.next_id().unwrap(), "Buy milk");
        new_task.priority = Priority::Low;
        collection.create(&new_task).unwrap();

        let loaded = collection.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Buy milk");
        assert_eq!(loaded[0].priority, Priority::Low);
        assert!(!loaded[0].completed);
        assert!(loaded[0].completed_at.is_none());
    }

    #[test]
    fn test_watermark_follows_highest_created_id() {
        let dir = TempDir::new().unwrap();
        let mut collection = tasks_in(&dir);

        for id in [3, 7, 1] {
            collection.create(&task(id, "t")).unwrap();
        }

        assert_eq!(collection.next_id().unwrap(), 8);
        assert_eq!(collection.next_id().unwrap(), 9);
    }

    #[test]
    fn test_reopened_collection_does_not_reuse_ids() {
        let dir = TempDir::new().unwrap();
        {
            let mut collection = tasks_in(&dir);
            for _ in 0..3 {
                let id = collection.next_id().unwrap();
                collection.create(&task(id, "t")).unwrap();
            }
        }

        let mut reopened = tasks_in(&dir);
        assert_eq!(reopened.next_id().unwrap(), 4);
    }

    #[test]
    fn test_largest_stored_id_exhausts_allocation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "18446744073709551615|x||2|2|0|1700000000|0\n").unwrap();

        let mut collection: FlatFileCollection<Task> = FlatFileCollection::open(path).unwrap();

        for _ in 0..2 {
            assert!(matches!(
                collection.next_id(),
                Err(StorageError::IdsExhausted { kind: "task" })
            ));
        }
    }

    #[test]
    fn test_handing_out_the_largest_id_stops_allocation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "18446744073709551614|x||2|2|0|1700000000|0\n").unwrap();

        let mut collection: FlatFileCollection<Task> = FlatFileCollection::open(path).unwrap();

        assert_eq!(collection.next_id().unwrap(), u64::MAX);
        assert!(matches!(
            collection.next_id(),
            Err(StorageError::IdsExhausted { .. })
        ));
    }

    #[test]
    fn test_load_keeps_file_order_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(
            &path,
            "5|Fifth||2|2|0|1700000000|0\n\n2|Second||2|2|0|1700000000|0\n   \n",
        )
        .unwrap();

        let mut collection: FlatFileCollection<Task> = FlatFileCollection::new(path);
        let ids: Vec<u64> = collection.load_all().unwrap().iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![5, 2]);
        assert_eq!(collection.next_id().unwrap(), 6);
    }

    #[test]
    fn test_update_replaces_record_in_place() {
        let dir = TempDir::new().unwrap();
        let mut collection = tasks_in(&dir);
        for (id, title) in [(1, "a"), (2, "b"), (3, "c")] {
            collection.create(&task(id, title)).unwrap();
        }

        let mut changed = collection.load_all().unwrap()[1].clone();
        changed.title = String::from("b2");
        changed.complete(crate::models::now());
        collection.update(&changed).unwrap();

        let loaded = collection.load_all().unwrap();
        let titles: Vec<&str> = loaded.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b2", "c"]);
        assert_eq!(loaded[1], changed);
    }

    #[test]
    fn test_update_unknown_id_is_a_successful_no_op() {
        let dir = TempDir::new().unwrap();
        let mut collection = tasks_in(&dir);
        for (id, title) in [(1, "a"), (2, "b")] {
            collection.create(&task(id, title)).unwrap();
        }
        let before = collection.load_all().unwrap();

        collection.update(&task(42, "ghost")).unwrap();

        assert_eq!(collection.load_all().unwrap(), before);
    }

    #[test]
    fn test_delete_middle_record_keeps_order() {
        let dir = TempDir::new().unwrap();
        let mut collection = tasks_in(&dir);
        for (id, title) in [(1, "a"), (2, "b"), (3, "c")] {
            collection.create(&task(id, title)).unwrap();
        }

        collection.delete(2).unwrap();

        let ids: Vec<u64> = collection.load_all().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_delete_unknown_id_fails_and_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let mut collection = tasks_in(&dir);
        for (id, title) in [(1, "a"), (2, "b"), (3, "c")] {
            collection.create(&task(id, title)).unwrap();
        }
        let before = fs::read_to_string(collection.path()).unwrap();

        let result = collection.delete(99);

        assert!(matches!(
            result,
            Err(StorageError::NotFound { kind: "task", id: 99 })
        ));
        assert_eq!(fs::read_to_string(collection.path()).unwrap(), before);
        assert_eq!(collection.load_all().unwrap().len(), 3);
    }

    #[test]
    fn test_create_fails_when_file_cannot_be_opened() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes every open fail.
        let mut collection: FlatFileCollection<Task> =
            FlatFileCollection::new(dir.path().to_path_buf());

        let result = collection.create(&task(5, "t"));

        assert!(matches!(result, Err(StorageError::SaveFailed { .. })));
        assert_eq!(collection.next_id().unwrap(), 1);
    }

    #[test]
    fn test_rewrite_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let mut collection = tasks_in(&dir);
        collection.create(&task(1, "a")).unwrap();
        collection.update(&task(1, "b")).unwrap();

        let leftovers = fs::read_dir(dir.path().join("data"))
            .unwrap()
            .flatten()
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_mood_entries_use_their_own_collection() {
        let dir = TempDir::new().unwrap();
        let mut journal: FlatFileCollection<MoodEntry> =
            FlatFileCollection::open(dir.path().join("journal.txt")).unwrap();

        let mut entry = MoodEntry::new(journal.next_id().unwrap(), "Had a great morning", Mood::Good);
        entry.keywords = vec![String::from("great")];
        entry.sentiment_score = 0.3;
        journal.create(&entry).unwrap();

        assert_eq!(journal.load_all().unwrap(), vec![entry]);
        journal.delete(1).unwrap();
        assert!(journal.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_loaded_scores_stay_in_range() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("journal.txt");
        fs::write(&path, "1|a|4|1700000000||inf\n2|b|4|1700000000||NaN\n").unwrap();

        let mut journal: FlatFileCollection<MoodEntry> = FlatFileCollection::open(path).unwrap();
        let scores: Vec<f64> = journal
            .load_all()
            .unwrap()
            .iter()
            .map(|e| e.sentiment_score)
            .collect();

        assert_eq!(scores, vec![0.0, 0.0]);
    }
}
