//! Engine error types.

use keywarden_crypto::CryptoError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while orchestrating key distribution and batch
/// decryption.
///
/// All variants are terminal and never retried: the inputs are immutable
/// ciphertext and keys, so a retry reproduces the same failure. Batch
/// operations are fail-fast: no partial output accompanies an error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller's wrapped project key copy could not be opened
    /// (wrong or revoked private key, or a corrupted row).
    #[error("project key unwrap failed: {source}")]
    KeyUnwrap {
        #[source]
        source: CryptoError,
    },

    /// A specific record in the batch failed to decrypt. The id names
    /// the offending row for diagnosis; no records from the batch are
    /// returned.
    #[error("failed to decrypt secret record {id}: {source}")]
    Record {
        id: String,
        #[source]
        source: CryptoError,
    },

    /// A crypto failure outside the unwrap or per-record paths, e.g.
    /// wrapping the project key for an invitee with a malformed key.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
