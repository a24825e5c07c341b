#![allow(dead_code)]

use dnsrelay_application::ports::{CacheSnapshotPort, SnapshotOutcome};
use dnsrelay_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct MockSnapshotPort {
    cached: AtomicUsize,
    persisted: AtomicUsize,
    save_calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockSnapshotPort {
    pub fn new() -> Self {
        Self {
            cached: AtomicUsize::new(0),
            persisted: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_cached(&self, cached: usize) {
        self.cached.store(cached, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn save_call_count(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn persisted(&self) -> usize {
        self.persisted.load(Ordering::SeqCst)
    }
}

impl CacheSnapshotPort for MockSnapshotPort {
    fn load_snapshot(&self) -> Result<usize, DomainError> {
        Ok(self.persisted())
    }

    fn save_snapshot(&self) -> Result<SnapshotOutcome, DomainError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::SnapshotWrite {
                path: "mock.cache".to_string(),
                reason: "disk full".to_string(),
            });
        }

        let cached = self.cached.load(Ordering::SeqCst);
        let persisted = self.persisted();
        if cached <= persisted {
            return Ok(SnapshotOutcome::Skipped { cached, persisted });
        }
        self.persisted.store(cached, Ordering::SeqCst);
        Ok(SnapshotOutcome::Written {
            cached,
            learned: cached - persisted,
        })
    }
}
