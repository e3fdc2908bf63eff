//! Project key distribution to members.
//!
//! When members are added to a project, the inviter unwraps their own
//! copy of the project key once, then wraps the plaintext for each
//! invitee's public key. The rows produced here go straight back to the
//! persistence layer.

use crate::error::{EngineError, EngineResult};
use crypto_box::{PublicKey, SecretKey};
use keywarden_crypto::{keybox, project_key};
use keywarden_types::{ProjectMembershipRole, WrappedProjectKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An invitee: their org membership, granted role, and base64 public key
/// as held by the identity layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPublicKey {
    pub org_membership_id: String,
    pub role: ProjectMembershipRole,
    pub public_key: String,
}

/// One member's project key row, ready for persistence.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMemberKey {
    pub org_membership_id: String,
    pub role: ProjectMembershipRole,
    pub wrapped_key: WrappedProjectKey,
}

/// Wraps the project key for each invitee.
///
/// `wrapped_key` is the inviter's own copy; it is unwrapped once and the
/// plaintext reused for every member. Output order matches `members`.
pub fn share_with_members(
    wrapped_key: &WrappedProjectKey,
    inviter_secret: &SecretKey,
    inviter_public: &PublicKey,
    members: &[MemberPublicKey],
) -> EngineResult<Vec<ProjectMemberKey>> {
    let key = project_key::unwrap_project_key(wrapped_key, inviter_secret)
        .map_err(|source| EngineError::KeyUnwrap { source })?;

    debug!(members = members.len(), "wrapping project key for new members");

    members
        .iter()
        .map(|member| {
            let recipient_public = keybox::public_key_from_b64(&member.public_key)?;
            let wrapped = project_key::share_project_key(
                &key,
                &recipient_public,
                inviter_secret,
                inviter_public,
            )?;

            Ok(ProjectMemberKey {
                org_membership_id: member.org_membership_id.clone(),
                role: member.role,
                wrapped_key: wrapped,
            })
        })
        .collect()
}
