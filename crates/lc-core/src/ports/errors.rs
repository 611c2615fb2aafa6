use thiserror::Error;

use crate::security::CryptoError;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

/// Failure to read or write the OS clipboard. Always treated as transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardAccessError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard read failed: {0}")]
    Read(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("log file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("entry could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("entry could not be encrypted: {0}")]
    Crypto(#[from] CryptoError),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file could not be read: {0}")]
    Read(String),

    #[error("settings file is malformed: {0}")]
    Malformed(String),

    #[error("settings file could not be written: {0}")]
    Write(String),
}
