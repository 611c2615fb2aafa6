mod line_cipher;

pub use line_cipher::{derive_key, LineCipher, LineKey, DEGRADED_PREFIX};
