//! Real-time communication session tokens.

use dynkey_token::{AppCertificate, Privilege, Result, TokenRequest, uid_to_account};
use tracing::debug;

use crate::Role;

/// Publish grants handed to roles that may publish.
const PUBLISH_PRIVILEGES: [Privilege; 3] = [
    Privilege::PublishAudioStream,
    Privilege::PublishVideoStream,
    Privilege::PublishDataStream,
];

/// Build a session token for a string user account.
///
/// Always grants join-channel until `expire_at` (Unix seconds). Roles that
/// [can publish](Role::can_publish) also get publish audio, video and data
/// with the same expiration.
pub fn build_session_token(
    app_id: &str,
    certificate: impl Into<AppCertificate>,
    channel: &str,
    user_account: &str,
    role: Role,
    expire_at: u32,
) -> Result<String> {
    let mut request = TokenRequest::new(app_id, certificate, channel, user_account);
    request.add_privilege(Privilege::JoinChannel, expire_at);
    if role.can_publish() {
        for privilege in PUBLISH_PRIVILEGES {
            request.add_privilege(privilege, expire_at);
        }
    }
    debug!(%role, expire_at, "building session token");
    request.build()
}

/// Build a session token for an integer uid. Uid `0` means any user.
pub fn build_session_token_with_uid(
    app_id: &str,
    certificate: impl Into<AppCertificate>,
    channel: &str,
    uid: u32,
    role: Role,
    expire_at: u32,
) -> Result<String> {
    build_session_token(
        app_id,
        certificate,
        channel,
        &uid_to_account(uid),
        role,
        expire_at,
    )
}
