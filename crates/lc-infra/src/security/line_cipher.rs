//! Per-line cipher for the activity logs.
//! 活动日志的逐行加密。
//!
//! Every line is encrypted on its own with a fresh nonce, so one damaged line
//! never affects its neighbours. The key comes from two user preferences and
//! is not secret in any meaningful sense; it only keeps the logs from being
//! plain text on disk.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lc_core::{CryptoError, SecurityLevel};
use sha2::{Digest, Sha256};
use tracing::warn;

const NONCE_LEN: usize = 12;
const SELF_TEST_PLAINTEXT: &str = "lingoclip line cipher self-test";

/// Prefix of lines written by the degraded (unencrypted) backend.
pub const DEGRADED_PREFIX: &str = "b64:";

/// 32 bytes of key material. Redacted in `Debug` output.
#[derive(Clone)]
pub struct LineKey([u8; 32]);

impl LineKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LineKey").field(&"[32 bytes]").finish()
    }
}

/// SHA-256 of the two preference strings concatenated.
///
/// Deterministic, so the same interface language and theme always open the
/// same logs. Changing either preference makes existing lines unreadable.
pub fn derive_key(pref1: &str, pref2: &str) -> LineKey {
    let mut hasher = Sha256::new();
    hasher.update(pref1.as_bytes());
    hasher.update(pref2.as_bytes());
    LineKey(hasher.finalize().into())
}

enum Backend {
    Aes(Box<Aes256Gcm>),
    Degraded,
}

pub struct LineCipher {
    backend: Backend,
}

impl LineCipher {
    /// Build the AES-256-GCM cipher and run a round-trip self-test.
    ///
    /// If construction or the self-test fails the cipher switches to the
    /// degraded backend, which only base64-encodes lines. Callers must check
    /// [`LineCipher::security_level`] and tell the user.
    pub fn new(key: &LineKey) -> Self {
        let cipher = match Aes256Gcm::new_from_slice(key.as_bytes()) {
            Ok(cipher) => cipher,
            Err(e) => {
                warn!(error = %e, "AES-256-GCM unavailable, activity logs fall back to reversible encoding");
                return Self::degraded();
            }
        };

        let candidate = Self {
            backend: Backend::Aes(Box::new(cipher)),
        };
        if let Err(e) = candidate.self_test() {
            warn!(error = %e, "line cipher self-test failed, activity logs fall back to reversible encoding");
            return Self::degraded();
        }
        candidate
    }

    pub fn from_preferences(pref1: &str, pref2: &str) -> Self {
        Self::new(&derive_key(pref1, pref2))
    }

    /// Reversible encoding only. Not encryption.
    pub fn degraded() -> Self {
        Self {
            backend: Backend::Degraded,
        }
    }

    pub fn security_level(&self) -> SecurityLevel {
        match self.backend {
            Backend::Aes(_) => SecurityLevel::Encrypted,
            Backend::Degraded => SecurityLevel::Degraded,
        }
    }

    /// Encrypt one log line. The result is printable and contains no newline.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        match &self.backend {
            Backend::Aes(cipher) => {
                let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
                let ciphertext = cipher
                    .encrypt(&nonce, plaintext.as_bytes())
                    .map_err(|_| CryptoError::EncryptFailed)?;
                Ok(STANDARD.encode([nonce.as_slice(), &ciphertext].concat()))
            }
            Backend::Degraded => Ok(format!(
                "{DEGRADED_PREFIX}{}",
                STANDARD.encode(plaintext.as_bytes())
            )),
        }
    }

    /// Decrypt one log line, reporting why it could not be read.
    ///
    /// Lines written by the degraded backend are accepted in either mode.
    pub fn try_decrypt(&self, line: &str) -> Result<String, CryptoError> {
        let line = line.trim();

        if let Some(encoded) = line.strip_prefix(DEGRADED_PREFIX) {
            let bytes = STANDARD
                .decode(encoded)
                .map_err(|_| CryptoError::InvalidEncoding)?;
            return String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8);
        }

        let Backend::Aes(cipher) = &self.backend else {
            return Err(CryptoError::DecryptFailed);
        };

        let raw = STANDARD
            .decode(line)
            .map_err(|_| CryptoError::InvalidEncoding)?;
        if raw.len() <= NONCE_LEN {
            return Err(CryptoError::Truncated);
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::DecryptFailed)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }

    /// Decrypt one log line; on any failure the input comes back unchanged.
    pub fn decrypt(&self, line: &str) -> String {
        self.try_decrypt(line).unwrap_or_else(|_| line.to_string())
    }

    fn self_test(&self) -> Result<(), CryptoError> {
        let line = self.encrypt(SELF_TEST_PLAINTEXT)?;
        if self.try_decrypt(&line)? == SELF_TEST_PLAINTEXT {
            Ok(())
        } else {
            Err(CryptoError::DecryptFailed)
        }
    }
}

impl std::fmt::Debug for LineCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineCipher")
            .field("security_level", &self.security_level())
            .finish()
    }
}
