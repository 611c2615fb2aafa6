//! Security domain types shared by the line cipher and its callers.

use std::fmt;

use thiserror::Error;

/// Confidentiality actually provided by the active line cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    /// Lines are AES-256-GCM encrypted.
    Encrypted,
    /// The cipher backend is unusable; lines use a reversible text encoding.
    Degraded,
}

impl SecurityLevel {
    pub fn is_degraded(&self) -> bool {
        matches!(self, SecurityLevel::Degraded)
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityLevel::Encrypted => write!(f, "aes-256-gcm"),
            SecurityLevel::Degraded => write!(f, "degraded (reversible encoding)"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("line is not valid base64")]
    InvalidEncoding,

    #[error("line is too short to contain a nonce")]
    Truncated,

    #[error("decryption failed: wrong key or corrupted line")]
    DecryptFailed,

    #[error("encryption failed")]
    EncryptFailed,

    #[error("decrypted bytes are not valid UTF-8")]
    InvalidUtf8,
}
