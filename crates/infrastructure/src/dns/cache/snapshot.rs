//! Versioned on-disk format for the answer cache.
//!
//! A snapshot is a JSON document:
//!
//! ```json
//! { "version": 1,
//!   "entries": [
//!     { "key": "example.com001", "captured_at": 1700000000,
//!       "records": [ { "name": "example.com.", "type": "A", "ttl": 300, "wire": "..." } ] } ] }
//! ```
//!
//! `name`, `type` and `ttl` are there for humans; `wire` is the base64 of
//! the record's RFC 1035 encoding and is the only field read back, so every
//! record type survives a save/load cycle without a registry of variants.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::DateTime;
use dnsrelay_application::ports::CachedAnswer;
use dnsrelay_domain::{DomainError, QuestionKey};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct SnapshotDocument {
    version: u32,
    entries: Vec<SnapshotEntry>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotEntry {
    key: String,
    captured_at: i64,
    records: Vec<SnapshotRecord>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    ttl: u32,
    wire: String,
}

impl SnapshotRecord {
    fn encode(record: &Record) -> Result<Self, DomainError> {
        let wire = record.to_bytes().map_err(|e| {
            DomainError::SnapshotEncode(format!("cannot encode {} record: {}", record.name(), e))
        })?;

        Ok(Self {
            name: record.name().to_string(),
            record_type: record.record_type().to_string(),
            ttl: record.ttl(),
            wire: BASE64.encode(wire),
        })
    }

    fn decode(&self) -> Result<Record, DomainError> {
        let wire = BASE64.decode(&self.wire).map_err(|e| {
            DomainError::SnapshotDecode(format!("bad wire data for {}: {}", self.name, e))
        })?;

        Record::from_bytes(&wire).map_err(|e| {
            DomainError::SnapshotDecode(format!(
                "bad {} record for {}: {}",
                self.record_type, self.name, e
            ))
        })
    }
}

pub(crate) fn encode_snapshot(
    entries: &HashMap<QuestionKey, CachedAnswer>,
) -> Result<Vec<u8>, DomainError> {
    let mut keys: Vec<&QuestionKey> = entries.keys().collect();
    keys.sort();

    let mut document = SnapshotDocument {
        version: SNAPSHOT_VERSION,
        entries: Vec::with_capacity(keys.len()),
    };

    for key in keys {
        let answer = &entries[key];
        document.entries.push(SnapshotEntry {
            key: key.to_string(),
            captured_at: answer.captured_at.timestamp(),
            records: answer
                .records
                .iter()
                .map(SnapshotRecord::encode)
                .collect::<Result<_, _>>()?,
        });
    }

    serde_json::to_vec_pretty(&document).map_err(|e| DomainError::SnapshotEncode(e.to_string()))
}

pub(crate) fn decode_snapshot(
    bytes: &[u8],
) -> Result<HashMap<QuestionKey, CachedAnswer>, DomainError> {
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|e| DomainError::SnapshotDecode(e.to_string()))?;

    if probe.version != SNAPSHOT_VERSION {
        return Err(DomainError::UnsupportedSnapshotVersion {
            found: probe.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let document: SnapshotDocument =
        serde_json::from_slice(bytes).map_err(|e| DomainError::SnapshotDecode(e.to_string()))?;

    let mut entries = HashMap::with_capacity(document.entries.len());
    for entry in document.entries {
        let key = QuestionKey::parse(&entry.key)
            .map_err(|e| DomainError::SnapshotDecode(e.to_string()))?;
        let captured_at = DateTime::from_timestamp(entry.captured_at, 0).ok_or_else(|| {
            DomainError::SnapshotDecode(format!(
                "capture time {} of {} is out of range",
                entry.captured_at, entry.key
            ))
        })?;
        let records = entry
            .records
            .iter()
            .map(SnapshotRecord::decode)
            .collect::<Result<Vec<_>, _>>()?;

        entries.insert(key, CachedAnswer::new(records, captured_at));
    }

    Ok(entries)
}

/// The snapshot location. Writes land in a sibling temporary file that is
/// renamed over the target, so readers never see a half-written snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no snapshot has been written yet.
    pub fn read(&self) -> Result<Option<HashMap<QuestionKey, CachedAnswer>>, DomainError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::SnapshotRead {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        decode_snapshot(&bytes).map(Some)
    }

    pub fn write(&self, entries: &HashMap<QuestionKey, CachedAnswer>) -> Result<(), DomainError> {
        let bytes = encode_snapshot(entries)?;
        let tmp_path = self.tmp_path();

        let result =
            Self::write_synced(&tmp_path, &bytes).and_then(|()| fs::rename(&tmp_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(DomainError::SnapshotWrite {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            });
        }

        Ok(())
    }

    /// Rename the current snapshot to `<file>.unreadable` and return the
    /// new path.
    pub fn set_aside(&self) -> Result<PathBuf, DomainError> {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".unreadable");
        let aside = self.path.with_file_name(name);

        fs::rename(&self.path, &aside).map_err(|e| DomainError::SnapshotWrite {
            path: aside.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(aside)
    }

    fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".tmp.{}", std::process::id()));
        self.path.with_file_name(name)
    }
}
