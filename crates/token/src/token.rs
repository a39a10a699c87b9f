//! Token assembly and parsing.
//!
//! [`TokenRequest`] collects the scope and privileges for a single token and
//! is consumed by [`TokenRequest::build`]. [`ParsedToken`] is the read-only
//! result of decoding a token string; it never holds the certificate, and
//! the channel/user strings can only be checked against its checksums, not
//! recovered.

use std::{
    borrow::Cow,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use tracing::{debug, trace};

use crate::{
    APP_ID_LENGTH, AppCertificate, DEFAULT_ISSUE_TTL_SECS, Privilege, PrivilegeMap, ScopeChecksums,
    VERSION, VERSION_LENGTH,
    content::Content,
    error::{Result, TokenError},
    message::Message,
    salt::next_salt,
    signer,
};

/// User scope for an integer uid: `0` means any user and maps to `""`.
pub fn uid_to_account(uid: u32) -> String {
    if uid == 0 {
        String::new()
    } else {
        uid.to_string()
    }
}

fn validate_app_id(app_id: &str) -> Result<()> {
    if app_id.len() != APP_ID_LENGTH || !app_id.is_ascii() {
        return Err(TokenError::InvalidAppId);
    }
    Ok(())
}

/// Drop CR and LF so a token wrapped across lines still decodes.
fn strip_line_breaks(encoded: &str) -> Cow<'_, str> {
    if encoded.contains(['\r', '\n']) {
        Cow::Owned(encoded.replace(['\r', '\n'], ""))
    } else {
        Cow::Borrowed(encoded)
    }
}

fn default_issued_at() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    u32::try_from(now)
        .unwrap_or(u32::MAX)
        .saturating_add(DEFAULT_ISSUE_TTL_SECS)
}

/// A single-use token under construction.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    app_id: String,
    certificate: AppCertificate,
    channel: String,
    user: String,
    salt: u32,
    issued_at: Option<u32>,
    privileges: PrivilegeMap,
}

impl TokenRequest {
    /// Start a request with a freshly drawn salt and no privileges.
    pub fn new(
        app_id: impl Into<String>,
        certificate: impl Into<AppCertificate>,
        channel: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            certificate: certificate.into(),
            channel: channel.into(),
            user: user.into(),
            salt: next_salt(),
            issued_at: None,
            privileges: PrivilegeMap::new(),
        }
    }

    /// Start a request scoped to an integer uid. See [`uid_to_account`].
    pub fn with_uid(
        app_id: impl Into<String>,
        certificate: impl Into<AppCertificate>,
        channel: impl Into<String>,
        uid: u32,
    ) -> Self {
        Self::new(app_id, certificate, channel, uid_to_account(uid))
    }

    /// Pin the salt instead of using the drawn one.
    pub fn with_salt(mut self, salt: u32) -> Self {
        self.salt = salt;
        self
    }

    /// Pin the issued timestamp. Otherwise it is taken as now plus
    /// [`DEFAULT_ISSUE_TTL_SECS`] when the token is built.
    pub fn with_issued_at(mut self, issued_at: u32) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    /// Grant `privilege` until `expire_at` (Unix seconds), replacing any
    /// earlier grant of the same kind.
    pub fn add_privilege(&mut self, privilege: Privilege, expire_at: u32) -> &mut Self {
        self.privileges.insert(privilege, expire_at);
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn salt(&self) -> u32 {
        self.salt
    }

    pub fn privileges(&self) -> &PrivilegeMap {
        &self.privileges
    }

    /// Sign and assemble the token string.
    pub fn build(self) -> Result<String> {
        validate_app_id(&self.app_id)?;

        let issued_at = self.issued_at.unwrap_or_else(default_issued_at);
        let message = Message::new(self.salt, issued_at, self.privileges).encode()?;

        let signature = signer::sign(
            &self.certificate,
            &self.app_id,
            &self.channel,
            &self.user,
            &message,
        )?;
        let checksums = ScopeChecksums::compute(&self.channel, &self.user);

        let content = Content::new(Bytes::copy_from_slice(&signature), checksums, message)
            .encode()?;
        trace!(content_len = content.len(), "assembled token content");

        Ok(format!("{VERSION}{}{}", self.app_id, STANDARD.encode(&content)))
    }
}

/// A decoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    app_id: String,
    signature: Bytes,
    checksums: ScopeChecksums,
    salt: u32,
    issued_at: u32,
    privileges: PrivilegeMap,
}

impl ParsedToken {
    /// Decode a token string.
    ///
    /// The version tag is checked before anything else is looked at. Line
    /// breaks inside the base64 part are skipped; any other character
    /// outside the standard alphabet is an error.
    pub fn parse(token: &str) -> Result<Self> {
        let Some(rest) = token.strip_prefix(VERSION) else {
            let got: String = token.chars().take(VERSION_LENGTH).collect();
            debug!(version = %got, "rejected token version");
            return Err(TokenError::VersionMismatch {
                expected: VERSION,
                got,
            });
        };

        let (app_id, encoded) = rest
            .split_at_checked(APP_ID_LENGTH)
            .filter(|(app_id, _)| app_id.is_ascii())
            .ok_or(TokenError::InvalidAppId)?;

        let raw = STANDARD
            .decode(strip_line_breaks(encoded).as_bytes())
            .inspect_err(|err| debug!(%err, "rejected token encoding"))?;
        let content =
            Content::decode(&raw).inspect_err(|err| debug!(%err, "rejected token content"))?;
        let message = Message::decode(content.message())
            .inspect_err(|err| debug!(%err, "rejected token message"))?;

        Ok(Self {
            app_id: app_id.to_owned(),
            signature: content.signature().clone(),
            checksums: content.checksums(),
            salt: message.salt(),
            issued_at: message.issued_at(),
            privileges: message.into_privileges(),
        })
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Raw signature bytes as carried in the token.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn signature_hex(&self) -> String {
        hex::encode(&self.signature)
    }

    pub fn crc_channel(&self) -> u32 {
        self.checksums.channel
    }

    pub fn crc_user(&self) -> u32 {
        self.checksums.user
    }

    pub fn checksums(&self) -> ScopeChecksums {
        self.checksums
    }

    pub fn salt(&self) -> u32 {
        self.salt
    }

    pub fn issued_at(&self) -> u32 {
        self.issued_at
    }

    pub fn privileges(&self) -> &PrivilegeMap {
        &self.privileges
    }

    /// Expiration of `privilege`, or `0` when the token does not grant it.
    pub fn expire_at(&self, privilege: Privilege) -> u32 {
        self.privileges.expire_at(privilege)
    }

    /// True if the token's checksums match this channel and user scope.
    pub fn matches_scope(&self, channel: &str, user: &str) -> bool {
        self.checksums.matches(channel, user)
    }
}

impl FromStr for ParsedToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
