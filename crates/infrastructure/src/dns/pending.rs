use dnsrelay_application::ports::{PendingQueries, QuestionKey};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Clients waiting on an upstream answer, per question. A single lock
/// serializes every operation.
///
/// Entries are only removed when a matching upstream response arrives, so
/// a question the upstream never answers stays here until restart.
#[derive(Default)]
pub struct PendingQueryTable {
    waiting: Mutex<HashMap<QuestionKey, Vec<SocketAddr>>>,
}

impl PendingQueryTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QuestionKey, Vec<SocketAddr>>> {
        self.waiting.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PendingQueries for PendingQueryTable {
    fn push(&self, key: &QuestionKey, addr: SocketAddr) {
        self.lock().entry(key.clone()).or_default().push(addr);
    }

    fn get(&self, key: &QuestionKey) -> Option<Vec<SocketAddr>> {
        self.lock().get(key).cloned()
    }

    fn clear(&self, key: &QuestionKey) {
        self.lock().remove(key);
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
