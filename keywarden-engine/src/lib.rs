//! Secret decryption pipeline and project key distribution.
//!
//! Orchestrates the keywarden-crypto primitives: [`pipeline`] unwraps a
//! caller's project key once and decrypts a batch of secret records;
//! [`sharing`] fans a project key out to newly added members. The
//! persistence and identity layers sit above this crate and hand it
//! already-authenticated keys and opaque ciphertext rows.

mod error;
pub mod pipeline;
pub mod sharing;

pub use error::{EngineError, EngineResult};
pub use pipeline::decrypt_batch;
pub use sharing::{share_with_members, MemberPublicKey, ProjectMemberKey};
