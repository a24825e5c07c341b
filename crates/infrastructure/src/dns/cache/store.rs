use super::record_summary::summarize_records;
use super::snapshot::SnapshotFile;
use chrono::{DateTime, Utc};
use dnsrelay_application::ports::{AnswerCache, CacheSnapshotPort, CachedAnswer, SnapshotOutcome};
use dnsrelay_domain::{DomainError, QuestionKey, RepeatAnswerPolicy};
use hickory_proto::rr::Record;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Unbounded answer cache behind a single lock, optionally backed by a
/// snapshot file.
///
/// `persisted_len` is the size of the snapshot most recently loaded or
/// written; a save is skipped unless the cache has grown past it, so a
/// smaller in-memory cache never overwrites a larger snapshot.
///
/// A snapshot that fails to load is moved aside before anything new is
/// written. If that rename fails, saving stays blocked for the lifetime of
/// the store.
pub struct AnswerCacheStore {
    entries: Mutex<HashMap<QuestionKey, CachedAnswer>>,
    repeat: RepeatAnswerPolicy,
    snapshot: Option<SnapshotFile>,
    persisted_len: AtomicUsize,
    writes_blocked: AtomicBool,
    save_lock: Mutex<()>,
}

impl AnswerCacheStore {
    pub fn new(repeat: RepeatAnswerPolicy) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            repeat,
            snapshot: None,
            persisted_len: AtomicUsize::new(0),
            writes_blocked: AtomicBool::new(false),
            save_lock: Mutex::new(()),
        }
    }

    pub fn with_snapshot(mut self, snapshot: SnapshotFile) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Size of the snapshot on disk as of the last load or save.
    pub fn persisted_len(&self) -> usize {
        self.persisted_len.load(Ordering::Acquire)
    }

    /// Like [`AnswerCache::push`] with an explicit capture time for new entries.
    pub fn push_at(&self, key: &QuestionKey, records: Vec<Record>, now: DateTime<Utc>) {
        let inserted = records.len();
        let summary = summarize_records(&records);

        let cached = {
            let mut entries = self.lock_entries();
            match entries.get_mut(key) {
                Some(existing) if self.repeat == RepeatAnswerPolicy::Accumulate => {
                    existing.records.extend(records);
                }
                _ => {
                    entries.insert(key.clone(), CachedAnswer::new(records, now));
                }
            }
            entries.len()
        };

        info!(key = %key, inserted, records = %summary, cached, "Cached answer");
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<QuestionKey, CachedAnswer>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnswerCache for AnswerCacheStore {
    fn push(&self, key: &QuestionKey, records: Vec<Record>) {
        self.push_at(key, records, Utc::now());
    }

    fn get(&self, key: &QuestionKey) -> Option<CachedAnswer> {
        self.lock_entries().get(key).cloned()
    }

    fn contains(&self, key: &QuestionKey) -> bool {
        self.lock_entries().contains_key(key)
    }

    fn clear(&self, key: &QuestionKey) {
        self.lock_entries().remove(key);
    }

    fn len(&self) -> usize {
        self.lock_entries().len()
    }
}

impl CacheSnapshotPort for AnswerCacheStore {
    fn load_snapshot(&self) -> Result<usize, DomainError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(0);
        };

        let loaded = match snapshot.read() {
            Ok(Some(loaded)) => loaded,
            Ok(None) => {
                info!(path = %snapshot.path().display(), "No cache snapshot yet, starting empty");
                HashMap::new()
            }
            Err(e) => {
                warn!(path = %snapshot.path().display(), error = %e, "Failed to load cache snapshot, starting empty");
                self.lock_entries().clear();
                self.persisted_len.store(0, Ordering::Release);

                match snapshot.set_aside() {
                    Ok(aside) => {
                        self.writes_blocked.store(false, Ordering::Release);
                        warn!(kept = %aside.display(), "Unreadable cache snapshot moved aside");
                    }
                    Err(aside_err) => {
                        self.writes_blocked.store(true, Ordering::Release);
                        warn!(
                            path = %snapshot.path().display(),
                            error = %aside_err,
                            "Cannot move unreadable cache snapshot aside, snapshot writes disabled"
                        );
                    }
                }
                return Err(e);
            }
        };

        let count = loaded.len();
        *self.lock_entries() = loaded;
        self.persisted_len.store(count, Ordering::Release);
        self.writes_blocked.store(false, Ordering::Release);

        info!(path = %snapshot.path().display(), cached = count, "Loaded cache snapshot");
        Ok(count)
    }

    fn save_snapshot(&self) -> Result<SnapshotOutcome, DomainError> {
        let _saving = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let persisted = self.persisted_len();

        let Some(snapshot) = &self.snapshot else {
            return Ok(SnapshotOutcome::Skipped {
                cached: self.len(),
                persisted,
            });
        };

        let entries = self.lock_entries().clone();
        let cached = entries.len();

        if self.writes_blocked.load(Ordering::Acquire) {
            warn!(path = %snapshot.path().display(), cached, "Unreadable cache snapshot still in place, not saving");
            return Ok(SnapshotOutcome::Blocked { cached });
        }

        if cached <= persisted {
            debug!(cached, persisted, "Cache has not grown, keeping existing snapshot");
            return Ok(SnapshotOutcome::Skipped { cached, persisted });
        }

        if let Err(e) = snapshot.write(&entries) {
            warn!(path = %snapshot.path().display(), error = %e, "Failed to save cache snapshot");
            return Err(e);
        }

        self.persisted_len.store(cached, Ordering::Release);
        let learned = cached - persisted;

        info!(path = %snapshot.path().display(), cached, learned, "Saved cache snapshot");
        Ok(SnapshotOutcome::Written { cached, learned })
    }
}
