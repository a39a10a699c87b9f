//! Real-time messaging login tokens.

use dynkey_token::{AppCertificate, Privilege, Result, TokenRequest};
use tracing::debug;

/// Build a messaging login token for `user_account`.
///
/// Grants only login until `expire_at` (Unix seconds). The channel scope is
/// empty.
pub fn build_messaging_token(
    app_id: &str,
    certificate: impl Into<AppCertificate>,
    user_account: &str,
    expire_at: u32,
) -> Result<String> {
    let mut request = TokenRequest::new(app_id, certificate, "", user_account);
    request.add_privilege(Privilege::LoginRtm, expire_at);
    debug!(expire_at, "building messaging token");
    request.build()
}
