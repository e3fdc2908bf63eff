//! Crypto error types.

use keywarden_types::UnknownKeyEncoding;
use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in keywarden crypto operations.
///
/// All variants are terminal for the operation that raised them:
/// retrying with identical inputs reproduces the identical failure.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Public-key box authentication failed: wrong key pair, tampering,
    /// or corruption. No plaintext is ever returned alongside this.
    #[error("box authentication failed (wrong key pair or tampered data)")]
    Authentication,

    /// Symmetric field authentication tag did not verify.
    #[error("field authentication tag mismatch (tampered or corrupted ciphertext)")]
    Integrity,

    /// The underlying cipher refused to encrypt (e.g. plaintext too
    /// large for one AEAD invocation).
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Stored `keyEncoding` value matches neither known scheme.
    #[error(transparent)]
    UnsupportedEncoding(#[from] UnknownKeyEncoding),

    /// A base64-encoded component failed to decode.
    #[error("malformed base64 component: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("invalid tag length: expected {expected} bytes, got {actual}")]
    InvalidTagLength { expected: usize, actual: usize },

    /// Decryption succeeded but the plaintext is not valid UTF-8.
    /// Secret fields and project keys are strings by contract.
    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8,
}
