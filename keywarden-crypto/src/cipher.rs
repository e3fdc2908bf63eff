//! Authenticated symmetric encryption of individual secret fields.
//!
//! AES-256-GCM with the ciphertext, 12-byte IV, and 16-byte tag carried
//! separately as base64 strings, matching how rows are stored. Two key
//! interpretations coexist for historical reasons:
//!
//! - legacy: the project key string's literal UTF-8 bytes are the AES
//!   key (the original 32-char hex keys give exactly 32 bytes);
//! - current: the project key string is base64-decoded into raw bytes.
//!
//! The stored `keyEncoding` flag selects between them, except that
//! approval-flow secrets always use the legacy path: that write path
//! was never migrated, so its rows must keep decrypting with the
//! original algorithm even when their metadata says otherwise.

use crate::error::{CryptoError, CryptoResult};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use keywarden_types::SecretKeyEncoding;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// AES-GCM IV length in bytes.
pub const IV_SIZE: usize = 12;

/// Poly1305/GCM authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// AES-256 key length in bytes.
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// One encrypted field as stored: base64 ciphertext, IV, and tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedField {
    pub ciphertext: String,
    pub iv: String,
    pub tag: String,
}

/// Decrypts one secret field.
///
/// `is_approval_secret` forces the legacy key interpretation regardless
/// of `encoding`; see the module docs. A tag mismatch fails with
/// [`CryptoError::Integrity`]; altered or partial plaintext is never
/// returned.
pub fn decrypt_field(
    ciphertext: &str,
    iv: &str,
    tag: &str,
    key: &str,
    encoding: SecretKeyEncoding,
    is_approval_secret: bool,
) -> CryptoResult<String> {
    let key_bytes = symmetric_key_bytes(key, encoding, is_approval_secret)?;

    let ct = STANDARD.decode(ciphertext)?;
    let iv = decode_iv(iv)?;
    let tag = decode_tag(tag)?;

    // aes-gcm expects the tag appended to the ciphertext.
    let mut combined = ct;
    combined.extend_from_slice(&tag);

    let cipher = new_cipher(&key_bytes)?;
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(&iv), combined.as_slice())
            .map_err(|_| CryptoError::Integrity)?,
    );

    let text = std::str::from_utf8(&plaintext).map_err(|_| CryptoError::InvalidUtf8)?;
    Ok(text.to_string())
}

/// Encrypts one secret field under the given key interpretation, with a
/// fresh random IV per call.
pub fn encrypt_field(
    plaintext: &str,
    key: &str,
    encoding: SecretKeyEncoding,
) -> CryptoResult<EncryptedField> {
    let key_bytes = symmetric_key_bytes(key, encoding, false)?;
    let cipher = new_cipher(&key_bytes)?;

    let mut iv = [0u8; IV_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let mut combined = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("field encrypt failed: {e}")))?;
    let tag = combined.split_off(combined.len() - TAG_SIZE);

    Ok(EncryptedField {
        ciphertext: STANDARD.encode(&combined),
        iv: STANDARD.encode(iv),
        tag: STANDARD.encode(&tag),
    })
}

/// Turns the stored project key string into raw AES key bytes.
///
/// The match is exhaustive over the closed encoding enum; rows carrying
/// an unknown encoding never get this far (rejected at parse time).
fn symmetric_key_bytes(
    key: &str,
    encoding: SecretKeyEncoding,
    force_legacy: bool,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    if force_legacy {
        return Ok(Zeroizing::new(key.as_bytes().to_vec()));
    }
    match encoding {
        SecretKeyEncoding::Utf8 => Ok(Zeroizing::new(key.as_bytes().to_vec())),
        SecretKeyEncoding::Base64 => Ok(Zeroizing::new(STANDARD.decode(key)?)),
    }
}

fn new_cipher(key_bytes: &[u8]) -> CryptoResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key_bytes).map_err(|_| CryptoError::InvalidKeyLength {
        expected: SYMMETRIC_KEY_SIZE,
        actual: key_bytes.len(),
    })
}

fn decode_iv(iv: &str) -> CryptoResult<[u8; IV_SIZE]> {
    let bytes = STANDARD.decode(iv)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidNonceLength {
            expected: IV_SIZE,
            actual,
        })
}

fn decode_tag(tag: &str) -> CryptoResult<[u8; TAG_SIZE]> {
    let bytes = STANDARD.decode(tag)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| CryptoError::InvalidTagLength {
        expected: TAG_SIZE,
        actual,
    })
}
