//! Shared types for the keywarden secrets core.
//!
//! These are the shapes the persistence and identity layers hand to the
//! decryption engine: encrypted secret rows, per-member wrapped project
//! keys, and the enums that select between the two historical symmetric
//! key encodings. Nothing here touches key material or performs I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of document an encrypted secret row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecretDocType {
    #[serde(rename = "secret")]
    Secret,
    #[serde(rename = "secretVersion")]
    SecretVersion,
    #[serde(rename = "approvalSecret")]
    ApprovalSecret,
}

impl SecretDocType {
    /// Approval-flow secrets were never migrated to the base64 key
    /// encoding and must always decrypt via the legacy algorithm,
    /// whatever their stored encoding flag says.
    pub fn forces_legacy_encoding(self) -> bool {
        matches!(self, SecretDocType::ApprovalSecret)
    }
}

/// Raised when a stored `keyEncoding` value matches neither known scheme.
///
/// There is no fallback: decrypting with a guessed key interpretation
/// would either fail the authentication tag or, worse, succeed with
/// garbage on an unauthenticated path. Rows with unknown encodings are
/// rejected at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported key encoding: {0:?}")]
pub struct UnknownKeyEncoding(pub String);

/// How a stored symmetric project key string is turned into key bytes.
///
/// `Utf8` is the legacy scheme: the key string's literal bytes are the
/// key (historically a 32-char hex string, so 32 bytes). `Base64` is the
/// current scheme: the string is decoded into raw key bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SecretKeyEncoding {
    Utf8,
    Base64,
}

impl SecretKeyEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            SecretKeyEncoding::Utf8 => "utf8",
            SecretKeyEncoding::Base64 => "base64",
        }
    }
}

impl FromStr for SecretKeyEncoding {
    type Err = UnknownKeyEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utf8" => Ok(SecretKeyEncoding::Utf8),
            "base64" => Ok(SecretKeyEncoding::Base64),
            other => Err(UnknownKeyEncoding(other.to_string())),
        }
    }
}

impl TryFrom<String> for SecretKeyEncoding {
    type Error = UnknownKeyEncoding;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SecretKeyEncoding> for String {
    fn from(e: SecretKeyEncoding) -> Self {
        e.as_str().to_string()
    }
}

impl fmt::Display for SecretKeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member's encrypted copy of a project's symmetric key.
///
/// Produced when a project is created or a member is invited, superseded
/// (never mutated) on rotation. All three components are base64 strings
/// as stored: the box ciphertext, its 24-byte nonce, and the public key
/// of whoever performed the wrap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedProjectKey {
    pub encrypted_key: String,
    pub nonce: String,
    pub sender_public_key: String,
}

/// Role granted to a project member alongside their wrapped key copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectMembershipRole {
    Admin,
    Member,
    Viewer,
}

/// An encrypted secret row as supplied by the persistence layer.
///
/// Ciphertext, IV, and tag components are base64 strings. The key and
/// value triples are always present; the comment triple is optional and
/// all-or-nothing (see [`EncryptedSecretRecord::comment_fields`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedSecretRecord {
    pub id: String,

    pub secret_key_ciphertext: String,
    #[serde(rename = "secretKeyIV")]
    pub secret_key_iv: String,
    pub secret_key_tag: String,

    pub secret_value_ciphertext: String,
    #[serde(rename = "secretValueIV")]
    pub secret_value_iv: String,
    pub secret_value_tag: String,

    #[serde(default)]
    pub secret_comment_ciphertext: Option<String>,
    #[serde(rename = "secretCommentIV", default)]
    pub secret_comment_iv: Option<String>,
    #[serde(default)]
    pub secret_comment_tag: Option<String>,

    pub doc_type: SecretDocType,
    pub key_encoding: SecretKeyEncoding,
}

impl EncryptedSecretRecord {
    /// Returns the comment (ciphertext, iv, tag) triple only when every
    /// part is present and non-empty. A row with a partial or empty
    /// triple has no decryptable comment and is treated as comment-less;
    /// historical rows store `""` and `null` interchangeably for absent
    /// comment components.
    pub fn comment_fields(&self) -> Option<(&str, &str, &str)> {
        fn present(field: Option<&str>) -> Option<&str> {
            field.filter(|s| !s.is_empty())
        }

        match (
            present(self.secret_comment_ciphertext.as_deref()),
            present(self.secret_comment_iv.as_deref()),
            present(self.secret_comment_tag.as_deref()),
        ) {
            (Some(ct), Some(iv), Some(tag)) => Some((ct, iv, tag)),
            _ => None,
        }
    }
}

/// A decrypted secret. Transient and in-memory only; deliberately not
/// serializable so plaintext cannot drift into a persistence path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecryptedSecret {
    pub id: String,
    pub secret_key: String,
    pub secret_value: String,
    /// Empty string when the row carries no comment.
    pub secret_comment: String,
    pub doc_type: SecretDocType,
}
