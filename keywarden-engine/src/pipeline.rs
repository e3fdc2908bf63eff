//! Batch secret decryption.
//!
//! Unwraps the caller's copy of the project key once, then drives the
//! field cipher over each record. Pure and synchronous: ciphertext rows
//! in, plaintext secrets out, no I/O anywhere.

use crate::error::{EngineError, EngineResult};
use crypto_box::SecretKey;
use keywarden_crypto::{cipher, project_key, ProjectKey};
use keywarden_types::{DecryptedSecret, EncryptedSecretRecord, WrappedProjectKey};
use tracing::debug;

/// Decrypts a batch of secret records with the caller's private key.
///
/// The project key is unwrapped exactly once per batch, whatever the
/// batch size. Results are index-aligned with `records`; callers
/// correlate positionally.
///
/// Fail-fast: the first failure (the unwrap, or any record) aborts the
/// whole batch. A failed unwrap would poison every record anyway, and a
/// partial result list would misrepresent the batch's integrity.
pub fn decrypt_batch(
    records: &[EncryptedSecretRecord],
    caller_secret: &SecretKey,
    wrapped_key: &WrappedProjectKey,
) -> EngineResult<Vec<DecryptedSecret>> {
    let key = project_key::unwrap_project_key(wrapped_key, caller_secret)
        .map_err(|source| EngineError::KeyUnwrap { source })?;

    debug!(records = records.len(), "decrypting secret batch");

    records
        .iter()
        .map(|record| {
            decrypt_record(record, &key).map_err(|source| EngineError::Record {
                id: record.id.clone(),
                source,
            })
        })
        .collect()
}

fn decrypt_record(
    record: &EncryptedSecretRecord,
    key: &ProjectKey,
) -> Result<DecryptedSecret, keywarden_crypto::CryptoError> {
    let encoding = record.key_encoding;
    let is_approval = record.doc_type.forces_legacy_encoding();

    let secret_key = cipher::decrypt_field(
        &record.secret_key_ciphertext,
        &record.secret_key_iv,
        &record.secret_key_tag,
        key.as_str(),
        encoding,
        is_approval,
    )?;

    let secret_value = cipher::decrypt_field(
        &record.secret_value_ciphertext,
        &record.secret_value_iv,
        &record.secret_value_tag,
        key.as_str(),
        encoding,
        is_approval,
    )?;

    // Comment decrypts only when the full ciphertext/iv/tag triple is
    // stored; otherwise the secret has no comment.
    let secret_comment = match record.comment_fields() {
        Some((ciphertext, iv, tag)) => {
            cipher::decrypt_field(ciphertext, iv, tag, key.as_str(), encoding, is_approval)?
        }
        None => String::new(),
    };

    Ok(DecryptedSecret {
        id: record.id.clone(),
        secret_key,
        secret_value,
        secret_comment,
        doc_type: record.doc_type,
    })
}
