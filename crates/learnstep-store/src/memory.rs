//! In-memory store for tests and offline operation.
//!
//! Mirrors the real backend's write semantics: records are keyed by
//! (child, module, identifier) composites and a save for an existing key
//! overwrites — last write wins, no history. Tests can flip the store
//! into an unavailable state to exercise degraded paths and inspect call
//! counts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use learnstep_core::error::StorageError;
use learnstep_core::model::{AssessmentRecord, CompletionRecord, Subject};
use learnstep_core::traits::{CompletionStore, LevelTestRecord, WeeklySummary};

/// An in-memory [`CompletionStore`].
#[derive(Default)]
pub struct MemoryStore {
    assessments: Mutex<HashMap<(String, Subject), AssessmentRecord>>,
    completions: Mutex<HashMap<(String, String, String), CompletionRecord>>,
    weekly: Mutex<HashMap<(String, String), Vec<WeeklySummary>>>,
    level_tests: Mutex<HashMap<(String, String, String), LevelTestRecord>>,
    unavailable: AtomicBool,
    reads: AtomicU32,
    writes: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a storage outage. All subsequent calls fail with
    /// [`StorageError::Unavailable`] until cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Seed a weekly assignment summary (newest last).
    pub fn push_weekly_summary(&self, child_id: &str, module: &str, summary: WeeklySummary) {
        self.weekly
            .lock()
            .unwrap()
            .entry((child_id.to_string(), module.to_string()))
            .or_default()
            .push(summary);
    }

    pub fn read_count(&self) -> u32 {
        self.reads.load(Ordering::Relaxed)
    }

    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::Relaxed)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::Relaxed) {
            Err(StorageError::Unavailable("memory store offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn read(&self) -> Result<(), StorageError> {
        self.check_available()?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn write(&self) -> Result<(), StorageError> {
        self.check_available()?;
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[async_trait]
impl CompletionStore for MemoryStore {
    async fn assessment(
        &self,
        child_id: &str,
        subject: Subject,
    ) -> Result<Option<AssessmentRecord>, StorageError> {
        self.read()?;
        Ok(self
            .assessments
            .lock()
            .unwrap()
            .get(&(child_id.to_string(), subject))
            .cloned())
    }

    async fn put_assessment(
        &self,
        child_id: &str,
        subject: Subject,
        record: AssessmentRecord,
    ) -> Result<(), StorageError> {
        self.write()?;
        self.assessments
            .lock()
            .unwrap()
            .insert((child_id.to_string(), subject), record);
        Ok(())
    }

    async fn completion(
        &self,
        child_id: &str,
        module: &str,
        identifier: &str,
    ) -> Result<Option<CompletionRecord>, StorageError> {
        self.read()?;
        Ok(self
            .completions
            .lock()
            .unwrap()
            .get(&(
                child_id.to_string(),
                module.to_string(),
                identifier.to_string(),
            ))
            .cloned())
    }

    async fn put_completion(
        &self,
        child_id: &str,
        module: &str,
        identifier: &str,
        record: CompletionRecord,
    ) -> Result<(), StorageError> {
        self.write()?;
        self.completions.lock().unwrap().insert(
            (
                child_id.to_string(),
                module.to_string(),
                identifier.to_string(),
            ),
            record,
        );
        Ok(())
    }

    async fn completions_with_prefix(
        &self,
        child_id: &str,
        module: &str,
        prefix: &str,
    ) -> Result<Vec<CompletionRecord>, StorageError> {
        self.read()?;
        Ok(self
            .completions
            .lock()
            .unwrap()
            .iter()
            .filter(|((child, m, identifier), _)| {
                child == child_id && m == module && identifier.starts_with(prefix)
            })
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn weekly_summaries(
        &self,
        child_id: &str,
        module: &str,
        limit: usize,
    ) -> Result<Vec<WeeklySummary>, StorageError> {
        self.read()?;
        let weekly = self.weekly.lock().unwrap();
        let mut summaries = weekly
            .get(&(child_id.to_string(), module.to_string()))
            .cloned()
            .unwrap_or_default();
        summaries.reverse(); // newest first
        summaries.truncate(limit);
        Ok(summaries)
    }

    async fn level_test(
        &self,
        child_id: &str,
        module: &str,
        week: &str,
    ) -> Result<Option<LevelTestRecord>, StorageError> {
        self.read()?;
        Ok(self
            .level_tests
            .lock()
            .unwrap()
            .get(&(child_id.to_string(), module.to_string(), week.to_string()))
            .cloned())
    }

    async fn put_level_test(
        &self,
        child_id: &str,
        module: &str,
        record: LevelTestRecord,
    ) -> Result<(), StorageError> {
        self.write()?;
        self.level_tests.lock().unwrap().insert(
            (
                child_id.to_string(),
                module.to_string(),
                record.week.clone(),
            ),
            record,
        );
        Ok(())
    }
}
