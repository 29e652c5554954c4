// File: ./src/storage.rs
// Local JSON persistence for the alarm-set collection and the schedule map.
//
// Both blobs are written whole on every mutation: the in-memory stores are
// the source of truth and the files trail them (last write wins). The file
// contents are the plain JSON shapes other tooling can read directly: an
// array of alarm sets, and an object keyed by `YYYY-MM-DD` date strings.
use crate::context::AppContext;
use crate::model::AlarmSet;
use anyhow::Result;
use fs2::FileExt;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock on a sidecar file,
    /// so two processes never interleave a read-modify-write on the blob.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads the full alarm-set collection. A missing file is an empty
    /// collection, not an error.
    pub fn load_alarm_sets(ctx: &dyn AppContext) -> Result<Vec<AlarmSet>> {
        let Some(path) = ctx.get_alarm_sets_path() else {
            anyhow::bail!("Could not determine alarm sets path");
        };
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            let sets: Vec<AlarmSet> = serde_json::from_str(&json)?;
            Ok(sets)
        })
    }

    /// Persists the full alarm-set collection.
    pub fn save_alarm_sets(ctx: &dyn AppContext, sets: &[AlarmSet]) -> Result<()> {
        let Some(path) = ctx.get_alarm_sets_path() else {
            anyhow::bail!("Could not determine alarm sets path");
        };
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(sets)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }

    /// Loads the full date-key → alarm-set schedule mapping.
    pub fn load_schedules(ctx: &dyn AppContext) -> Result<HashMap<String, AlarmSet>> {
        let Some(path) = ctx.get_schedule_path() else {
            anyhow::bail!("Could not determine schedule path");
        };
        if !path.exists() {
            return Ok(HashMap::new());
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            let schedules: HashMap<String, AlarmSet> = serde_json::from_str(&json)?;
            Ok(schedules)
        })
    }

    /// Persists the full schedule mapping.
    pub fn save_schedules(ctx: &dyn AppContext, schedules: &HashMap<String, AlarmSet>) -> Result<()> {
        let Some(path) = ctx.get_schedule_path() else {
            anyhow::bail!("Could not determine schedule path");
        };
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(schedules)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }
}
