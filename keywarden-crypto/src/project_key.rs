//! Per-project symmetric key creation, wrapping, and unwrapping.
//!
//! A project key is minted once per project: 16 random bytes rendered as
//! a 32-char hex string. It is stored only in wrapped form, one
//! [`WrappedProjectKey`] per member, each produced by boxing the
//! plaintext string for that member's public key. Losing every member's
//! private key makes the project key unrecoverable; there is no
//! backdoor.

use crate::error::{CryptoError, CryptoResult};
use crate::keybox::{self, SealedBox};
use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_box::{PublicKey, SecretKey};
use keywarden_types::WrappedProjectKey;
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

/// Entropy drawn for a fresh project key, before hex encoding.
pub const PROJECT_KEY_BYTES: usize = 16;

/// A plaintext project key. Zeroized on drop; exists only transiently
/// between unwrap and use.
pub struct ProjectKey(Zeroizing<String>);

impl ProjectKey {
    /// Wraps an already-unwrapped plaintext key, e.g. one obtained from
    /// [`unwrap_project_key`] on another member's copy.
    pub fn new(plaintext: impl Into<String>) -> Self {
        ProjectKey(Zeroizing::new(plaintext.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Key material stays out of debug output.
impl fmt::Debug for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProjectKey(<redacted>)")
    }
}

/// Generates a fresh project key and self-wraps it for the project
/// owner, using the owner's own pair as both sender and recipient.
pub fn create_project_key(
    owner_public: &PublicKey,
    owner_secret: &SecretKey,
) -> CryptoResult<WrappedProjectKey> {
    let mut entropy = Zeroizing::new([0u8; PROJECT_KEY_BYTES]);
    rand::rngs::OsRng.fill_bytes(&mut *entropy);
    let plaintext = ProjectKey(Zeroizing::new(hex::encode(*entropy)));

    share_project_key(&plaintext, owner_public, owner_secret, owner_public)
}

/// Wraps an already-unwrapped project key for another member.
///
/// Callers obtain `plaintext` by unwrapping their own copy first; the
/// resulting row records `sender_public` so the recipient can verify
/// who performed the wrap.
pub fn share_project_key(
    plaintext: &ProjectKey,
    recipient_public: &PublicKey,
    sender_secret: &SecretKey,
    sender_public: &PublicKey,
) -> CryptoResult<WrappedProjectKey> {
    let sealed = keybox::seal(plaintext.as_str().as_bytes(), recipient_public, sender_secret)?;

    Ok(WrappedProjectKey {
        encrypted_key: STANDARD.encode(&sealed.ciphertext),
        nonce: STANDARD.encode(sealed.nonce),
        sender_public_key: keybox::public_key_to_b64(sender_public),
    })
}

/// Opens a member's wrapped copy of the project key.
pub fn unwrap_project_key(
    wrapped: &WrappedProjectKey,
    recipient_secret: &SecretKey,
) -> CryptoResult<ProjectKey> {
    let sender_public = keybox::public_key_from_b64(&wrapped.sender_public_key)?;

    let sealed = SealedBox {
        ciphertext: STANDARD.decode(&wrapped.encrypted_key)?,
        nonce: decode_nonce(&wrapped.nonce)?,
    };

    let plaintext = keybox::open(&sealed, &sender_public, recipient_secret)?;
    let key = std::str::from_utf8(&plaintext).map_err(|_| CryptoError::InvalidUtf8)?;
    Ok(ProjectKey(Zeroizing::new(key.to_string())))
}

fn decode_nonce(nonce: &str) -> CryptoResult<[u8; keybox::NONCE_SIZE]> {
    let bytes = STANDARD.decode(nonce)?;
    let actual = bytes.len();
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidNonceLength {
            expected: keybox::NONCE_SIZE,
            actual,
        })
}
