//! Error types for token encoding and decoding.

use thiserror::Error;

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors produced while building or parsing a token.
///
/// Decoding never yields a partial result: any failure aborts the whole parse.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The leading version tag is not one this crate understands.
    #[error("unsupported token version: expected {expected}, got {got:?}")]
    VersionMismatch {
        /// Supported version.
        expected: &'static str,
        /// Version found in the token (at most three characters).
        got: String,
    },

    /// A fixed-width or length-prefixed field claims more bytes than remain.
    #[error("truncated {context}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Field being read.
        context: &'static str,
        /// Bytes the field requires.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// The content segment is not valid standard base64.
    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The application id is not exactly 32 ASCII characters.
    #[error("application id must be {} ASCII characters", crate::APP_ID_LENGTH)]
    InvalidAppId,

    /// A length-prefixed field or count does not fit in 16 bits.
    #[error("{context} too long: {len} exceeds {limit}")]
    FieldTooLong {
        /// Field being written.
        context: &'static str,
        /// Actual length.
        len: usize,
        /// Largest encodable length.
        limit: usize,
    },

    /// The signing key was rejected by the MAC.
    #[error("signing key rejected: {0}")]
    SigningKey(#[from] hmac::digest::InvalidLength),
}

impl TokenError {
    pub(crate) fn truncated(context: &'static str, needed: usize, remaining: usize) -> Self {
        Self::Truncated {
            context,
            needed,
            remaining,
        }
    }
}
