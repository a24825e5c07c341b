#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dnsrelay_application::ports::{
    AnswerCache, CachedAnswer, DatagramSender, PendingQueries, QuestionKey,
};
use dnsrelay_domain::DomainError;
use hickory_proto::rr::Record;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Mutex;

pub struct MockAnswerCache {
    entries: Mutex<HashMap<QuestionKey, CachedAnswer>>,
    pushes: Mutex<Vec<QuestionKey>>,
}

impl MockAnswerCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            pushes: Mutex::new(Vec::new()),
        }
    }

    pub fn insert_at(&self, key: &QuestionKey, records: Vec<Record>, captured_at: DateTime<Utc>) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), CachedAnswer::new(records, captured_at));
    }

    pub fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }
}

impl AnswerCache for MockAnswerCache {
    fn push(&self, key: &QuestionKey, records: Vec<Record>) {
        self.pushes.lock().unwrap().push(key.clone());
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(key) {
            Some(existing) => existing.records.extend(records),
            None => {
                entries.insert(key.clone(), CachedAnswer::new(records, Utc::now()));
            }
        }
    }

    fn get(&self, key: &QuestionKey) -> Option<CachedAnswer> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn contains(&self, key: &QuestionKey) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    fn clear(&self, key: &QuestionKey) {
        self.entries.lock().unwrap().remove(key);
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

pub struct MockPendingQueries {
    waiting: Mutex<HashMap<QuestionKey, Vec<SocketAddr>>>,
}

impl MockPendingQueries {
    pub fn new() -> Self {
        Self {
            waiting: Mutex::new(HashMap::new()),
        }
    }
}

impl PendingQueries for MockPendingQueries {
    fn push(&self, key: &QuestionKey, addr: SocketAddr) {
        self.waiting
            .lock()
            .unwrap()
            .entry(key.clone())
            .or_default()
            .push(addr);
    }

    fn get(&self, key: &QuestionKey) -> Option<Vec<SocketAddr>> {
        self.waiting.lock().unwrap().get(key).cloned()
    }

    fn clear(&self, key: &QuestionKey) {
        self.waiting.lock().unwrap().remove(key);
    }

    fn len(&self) -> usize {
        self.waiting.lock().unwrap().len()
    }
}

/// Records every datagram instead of putting it on the wire.
pub struct RecordingSender {
    sent: Mutex<Vec<(SocketAddr, Vec<u8>)>>,
    unreachable: Mutex<HashSet<SocketAddr>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            unreachable: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_sends_to(&self, target: SocketAddr) {
        self.unreachable.lock().unwrap().insert(target);
    }

    pub fn sent(&self) -> Vec<(SocketAddr, Vec<u8>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, target: SocketAddr) -> Vec<Vec<u8>> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(addr, _)| *addr == target)
            .map(|(_, bytes)| bytes.clone())
            .collect()
    }
}

#[async_trait]
impl DatagramSender for RecordingSender {
    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        if self.unreachable.lock().unwrap().contains(&target) {
            return Err(DomainError::SendFailed {
                target: target.to_string(),
                reason: "network unreachable".to_string(),
            });
        }
        self.sent.lock().unwrap().push((target, bytes.to_vec()));
        Ok(())
    }
}
