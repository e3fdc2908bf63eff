//! Authenticated public-key box primitive.
//!
//! X25519 key agreement + XSalsa20-Poly1305, via `crypto_box`. Unlike an
//! anonymous sealed box, both sides are real identities: the sender
//! encrypts with their own secret key and the recipient verifies against
//! the sender's stored public key. This is what lets the server relay
//! wrapped project keys it cannot read while members still know which
//! member wrapped their copy.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_box::aead::Aead;
use crypto_box::{PublicKey, SalsaBox, SecretKey};
use rand::RngCore;
use zeroize::Zeroizing;

/// XSalsa20 nonce length in bytes.
pub const NONCE_SIZE: usize = 24;

/// X25519 key length in bytes.
pub const KEY_SIZE: usize = 32;

/// X25519 keypair owned by one identity (user or org member).
///
/// The secret key zeroizes on drop (from `crypto_box`).
pub struct KeyPair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

impl KeyPair {
    /// Reconstructs a keypair from raw secret key bytes.
    pub fn from_secret_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        let secret = SecretKey::from(bytes);
        let public = secret.public_key();
        Self { secret, public }
    }

    pub fn public_bytes(&self) -> [u8; KEY_SIZE] {
        *self.public.as_bytes()
    }
}

/// Output of [`seal`]: box ciphertext (including the Poly1305 tag) and
/// the fresh nonce it was produced under.
#[derive(Clone, Debug)]
pub struct SealedBox {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_SIZE],
}

/// Generates a fresh X25519 keypair from the OS RNG.
pub fn generate_keypair() -> KeyPair {
    let secret = SecretKey::generate(&mut rand::rngs::OsRng);
    let public = secret.public_key();
    KeyPair { secret, public }
}

/// Encrypts `message` for `recipient_public`, authenticated by
/// `sender_secret`. A fresh random nonce is drawn per call and never
/// reused.
pub fn seal(
    message: &[u8],
    recipient_public: &PublicKey,
    sender_secret: &SecretKey,
) -> CryptoResult<SealedBox> {
    let salsa_box = SalsaBox::new(recipient_public, sender_secret);

    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let ciphertext = salsa_box
        .encrypt(crypto_box::Nonce::from_slice(&nonce), message)
        .map_err(|e| CryptoError::Encryption(format!("box seal failed: {e}")))?;

    Ok(SealedBox { ciphertext, nonce })
}

/// Opens a sealed box, verifying it against the sender's public key.
///
/// Fails with [`CryptoError::Authentication`] on any tag mismatch
/// (wrong keys, tampering, or corruption). Never returns partial output.
/// The plaintext is returned in a zeroizing buffer since callers use
/// this for key material.
pub fn open(
    sealed: &SealedBox,
    sender_public: &PublicKey,
    recipient_secret: &SecretKey,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let salsa_box = SalsaBox::new(sender_public, recipient_secret);

    salsa_box
        .decrypt(
            crypto_box::Nonce::from_slice(&sealed.nonce),
            sealed.ciphertext.as_ref(),
        )
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::Authentication)
}

/// Parses a base64-encoded X25519 public key as the identity layer
/// stores them.
pub fn public_key_from_b64(encoded: &str) -> CryptoResult<PublicKey> {
    Ok(PublicKey::from(decode_key_bytes(encoded)?))
}

/// Parses a base64-encoded X25519 secret key.
pub fn secret_key_from_b64(encoded: &str) -> CryptoResult<SecretKey> {
    Ok(SecretKey::from(decode_key_bytes(encoded)?))
}

/// Renders a public key in the identity layer's base64 form.
pub fn public_key_to_b64(key: &PublicKey) -> String {
    STANDARD.encode(key.as_bytes())
}

fn decode_key_bytes(encoded: &str) -> CryptoResult<[u8; KEY_SIZE]> {
    let bytes = Zeroizing::new(STANDARD.decode(encoded)?);
    let actual = bytes.len();
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual,
        })
}
