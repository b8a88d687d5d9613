//! Caching decorator for assessment records.
//!
//! Assessment records are read on every navigation decision but change
//! only when a child retakes an assessment, so they cache well. The cache
//! is an explicit object owned by this decorator — not an ambient global —
//! with one invalidation rule: an entry is overwritten by every successful
//! write and populated on read. Completion records pass straight through;
//! they change too often to be worth caching.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use async_trait::async_trait;
use lru::LruCache;

use learnstep_core::error::StorageError;
use learnstep_core::model::{AssessmentRecord, CompletionRecord, Subject};
use learnstep_core::traits::{CompletionStore, LevelTestRecord, WeeklySummary};

const DEFAULT_CAPACITY: usize = 256;

/// A [`CompletionStore`] decorator with an LRU cache of assessment
/// records keyed by (child, subject).
pub struct CachedStore<S> {
    inner: S,
    cache: Mutex<LruCache<(String, Subject), AssessmentRecord>>,
}

impl<S: CompletionStore> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: S, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: CompletionStore> CompletionStore for CachedStore<S> {
    async fn assessment(
        &self,
        child_id: &str,
        subject: Subject,
    ) -> Result<Option<AssessmentRecord>, StorageError> {
        let key = (child_id.to_string(), subject);
        if let Some(record) = self.cache.lock().unwrap().get(&key) {
            return Ok(Some(record.clone()));
        }

        let record = self.inner.assessment(child_id, subject).await?;
        if let Some(record) = &record {
            self.cache.lock().unwrap().put(key, record.clone());
        }
        Ok(record)
    }

    async fn put_assessment(
        &self,
        child_id: &str,
        subject: Subject,
        record: AssessmentRecord,
    ) -> Result<(), StorageError> {
        self.inner
            .put_assessment(child_id, subject, record.clone())
            .await?;
        // Only a successful write updates the cache, keeping it a strict
        // mirror of what the store accepted.
        self.cache
            .lock()
            .unwrap()
            .put((child_id.to_string(), subject), record);
        Ok(())
    }

    async fn completion(
        &self,
        child_id: &str,
        module: &str,
        identifier: &str,
    ) -> Result<Option<CompletionRecord>, StorageError> {
        self.inner.completion(child_id, module, identifier).await
    }

    async fn put_completion(
        &self,
        child_id: &str,
        module: &str,
        identifier: &str,
        record: CompletionRecord,
    ) -> Result<(), StorageError> {
        self.inner
            .put_completion(child_id, module, identifier, record)
            .await
    }

    async fn completions_with_prefix(
        &self,
        child_id: &str,
        module: &str,
        prefix: &str,
    ) -> Result<Vec<CompletionRecord>, StorageError> {
        self.inner
            .completions_with_prefix(child_id, module, prefix)
            .await
    }

    async fn weekly_summaries(
        &self,
        child_id: &str,
        module: &str,
        limit: usize,
    ) -> Result<Vec<WeeklySummary>, StorageError> {
        self.inner.weekly_summaries(child_id, module, limit).await
    }

    async fn level_test(
        &self,
        child_id: &str,
        module: &str,
        week: &str,
    ) -> Result<Option<LevelTestRecord>, StorageError> {
        self.inner.level_test(child_id, module, week).await
    }

    async fn put_level_test(
        &self,
        child_id: &str,
        module: &str,
        record: LevelTestRecord,
    ) -> Result<(), StorageError> {
        self.inner.put_level_test(child_id, module, record).await
    }
}
