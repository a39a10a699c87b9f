//! HMAC-SHA256 signing of the message block.
//!
//! The MAC input is the plain concatenation
//! `app_id ++ channel ++ user ++ message`, with no separators. Field order is
//! part of the format.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

/// Signature output size.
pub const SIGNATURE_LENGTH: usize = 32;

/// Application certificate: the shared secret used as the signing key.
///
/// Never serialized into a token. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AppCertificate(String);

impl AppCertificate {
    pub fn new(certificate: impl Into<String>) -> Self {
        Self(certificate.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<&str> for AppCertificate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AppCertificate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for AppCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppCertificate([REDACTED])")
    }
}

/// Sign a message block for the given application and scope.
pub fn sign(
    certificate: &AppCertificate,
    app_id: &str,
    channel: &str,
    user: &str,
    message: &[u8],
) -> Result<[u8; SIGNATURE_LENGTH]> {
    let mut mac = HmacSha256::new_from_slice(certificate.as_bytes())?;
    mac.update(app_id.as_bytes());
    mac.update(channel.as_bytes());
    mac.update(user.as_bytes());
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ID: &str = "970CA35de60c44645bbae8a215061b33";
    const CERTIFICATE: &str = "5CFd2fd1755d40ecb72977518be15d3b";
    const CHANNEL: &str = "7d72365eb983485397e3e3f9d460bdda";

    fn message() -> Vec<u8> {
        hex::decode("4e61bc00af28375601000100af283756").unwrap()
    }

    #[test]
    fn test_known_signature() {
        let signature = sign(&CERTIFICATE.into(), APP_ID, CHANNEL, "", &message()).unwrap();
        assert_eq!(
            hex::encode(signature),
            "f335911b7b12920530378fde88576db338d5392be12b74ec12ecb11bc4557288"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let certificate = AppCertificate::new(CERTIFICATE);
        let first = sign(&certificate, APP_ID, CHANNEL, "42", &message()).unwrap();
        let second = sign(&certificate, APP_ID, CHANNEL, "42", &message()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_signature_binds_every_input() {
        let certificate = AppCertificate::new(CERTIFICATE);
        let base = sign(&certificate, APP_ID, CHANNEL, "42", &message()).unwrap();

        let other_key = sign(&"other".into(), APP_ID, CHANNEL, "42", &message()).unwrap();
        let other_user = sign(&certificate, APP_ID, CHANNEL, "43", &message()).unwrap();
        let other_channel = sign(&certificate, APP_ID, "x", "42", &message()).unwrap();
        let other_message = sign(&certificate, APP_ID, CHANNEL, "42", b"m").unwrap();

        for other in [other_key, other_user, other_channel, other_message] {
            assert_ne!(base, other);
        }
    }

    #[test]
    fn test_certificate_debug_is_redacted() {
        let certificate = AppCertificate::new(CERTIFICATE);
        let debug = format!("{certificate:?}");
        assert!(!debug.contains(CERTIFICATE));
        assert_eq!(debug, "AppCertificate([REDACTED])");
    }
}
