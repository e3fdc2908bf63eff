//! Envelope-encryption primitives for keywarden.
//!
//! Provides the cryptographic core of the secrets manager:
//! - X25519 + XSalsa20-Poly1305 authenticated boxes for key distribution
//! - AES-256-GCM for field-level secret encryption
//! - per-project symmetric key creation, wrapping, and unwrapping
//!
//! # Architecture
//!
//! Secrets use a two-tier key system:
//!
//! 1. **Project key**: a random symmetric key per project, used to
//!    encrypt every secret field in that project. Never stored in
//!    plaintext.
//!
//! 2. **Member key pairs**: each member holds a long-lived X25519 pair.
//!    The project key is boxed once per member, so the server only ever
//!    stores wrapped copies it cannot read.
//!
//! This allows adding a member without re-encrypting any secrets (wrap
//! the project key once more) and keeps decryption entirely client-side.
//! Two symmetric key encodings coexist historically; see [`cipher`].
//!
//! Everything here is synchronous, CPU-bound, and free of shared state;
//! all functions are safe to call concurrently.

pub mod cipher;
mod error;
pub mod keybox;
pub mod project_key;

pub use cipher::{
    decrypt_field, encrypt_field, EncryptedField, IV_SIZE, SYMMETRIC_KEY_SIZE, TAG_SIZE,
};
pub use error::{CryptoError, CryptoResult};
pub use keybox::{
    generate_keypair, public_key_from_b64, public_key_to_b64, secret_key_from_b64, KeyPair,
    SealedBox, KEY_SIZE, NONCE_SIZE,
};
pub use project_key::{
    create_project_key, share_project_key, unwrap_project_key, ProjectKey, PROJECT_KEY_BYTES,
};
