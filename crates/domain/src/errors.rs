use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Failed to decode DNS message: {0}")]
    MessageDecode(String),

    #[error("Failed to encode DNS message: {0}")]
    MessageEncode(String),

    #[error("Failed to send datagram to {target}: {reason}")]
    SendFailed { target: String, reason: String },

    #[error("Failed to read cache snapshot {path}: {reason}")]
    SnapshotRead { path: String, reason: String },

    #[error("Failed to encode cache snapshot: {0}")]
    SnapshotEncode(String),

    #[error("Failed to decode cache snapshot: {0}")]
    SnapshotDecode(String),

    #[error("Unsupported cache snapshot version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    #[error("Failed to write cache snapshot {path}: {reason}")]
    SnapshotWrite { path: String, reason: String },

    #[error("Invalid question key: {0}")]
    InvalidQuestionKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
