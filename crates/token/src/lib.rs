//! Versioned, HMAC-signed privilege tokens.
//!
//! A token grants its bearer a set of time-boxed privileges (join a channel,
//! publish audio, log in to messaging, ...) scoped to an application and a
//! channel/user pair. Issuance needs the application certificate; parsing
//! does not.
//!
//! # Wire format
//!
//! All integers are little-endian.
//!
//! ```txt
//! token    := "006" ++ app_id (32 ascii bytes) ++ base64(content)
//! content  := u16 sig_len ++ signature
//!             ++ u32 crc_channel ++ u32 crc_user
//!             ++ u16 msg_len ++ message
//! message  := u32 salt ++ u32 issued_at
//!             ++ u16 count ++ count * (u16 privilege ++ u32 expire_at)
//! ```
//!
//! The signature is `HMAC-SHA256(certificate, app_id ++ channel ++ user ++ message)`.
//!
//! # Modules
//!
//! - [`wire`] - fixed-width integers and length-prefixed byte strings
//! - [`privilege_map`] - canonical (sorted) privilege map codec
//! - [`message`] - salt, timestamp and privileges ("M")
//! - [`content`] - signature, checksums and the message block
//! - [`signer`] - HMAC-SHA256 signing and the certificate type
//! - [`checksum`] - CRC-32 scope checksums
//! - [`token`] - request builder and token parser
//!
//! # Example
//!
//! ```rust
//! use dynkey_token::{ParsedToken, Privilege, TokenRequest};
//!
//! let mut request = TokenRequest::new(
//!     "970CA35de60c44645bbae8a215061b33",
//!     "5CFd2fd1755d40ecb72977518be15d3b",
//!     "my-channel",
//!     "alice",
//! );
//! request.add_privilege(Privilege::JoinChannel, 1_900_000_000);
//! let token = request.build().unwrap();
//!
//! let parsed: ParsedToken = token.parse().unwrap();
//! assert_eq!(parsed.expire_at(Privilege::JoinChannel), 1_900_000_000);
//! assert!(parsed.matches_scope("my-channel", "alice"));
//! ```

pub mod checksum;
pub mod content;
mod error;
pub mod message;
mod privilege;
pub mod privilege_map;
mod salt;
pub mod signer;
pub mod token;
pub mod wire;

pub use checksum::ScopeChecksums;
pub use error::{Result, TokenError};
pub use privilege::Privilege;
pub use privilege_map::PrivilegeMap;
pub use salt::{SALT_MAX, SALT_MIN, next_salt};
pub use signer::{AppCertificate, SIGNATURE_LENGTH};
pub use token::{ParsedToken, TokenRequest, uid_to_account};

/// Token format version this crate reads and writes.
pub const VERSION: &str = "006";

/// Length of the version tag at the start of every token.
pub const VERSION_LENGTH: usize = 3;

/// Length of the application id carried in clear after the version tag.
pub const APP_ID_LENGTH: usize = 32;

/// Lifetime added to the current time when the issued timestamp is not pinned.
pub const DEFAULT_ISSUE_TTL_SECS: u32 = 24 * 3600;
