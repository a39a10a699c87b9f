//! CRC-32 checksums over the channel and user scope.
//!
//! These let a verifier reject a token presented for the wrong scope without
//! touching the certificate. They carry no cryptographic weight.

/// Standard (IEEE, reflected `0xEDB88320`) CRC-32 of `data`.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Checksums of the channel and user scope strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScopeChecksums {
    pub channel: u32,
    pub user: u32,
}

impl ScopeChecksums {
    pub fn compute(channel: &str, user: &str) -> Self {
        Self {
            channel: crc32(channel.as_bytes()),
            user: crc32(user.as_bytes()),
        }
    }

    /// True if both checksums match the given scope.
    pub fn matches(&self, channel: &str, user: &str) -> bool {
        *self == Self::compute(channel, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn test_scope_checksums() {
        let sums = ScopeChecksums::compute("7d72365eb983485397e3e3f9d460bdda", "2882341273");
        assert_eq!(sums.channel, 0x107d_48b7);
        assert_eq!(sums.user, 3_847_331_927);

        assert!(sums.matches("7d72365eb983485397e3e3f9d460bdda", "2882341273"));
        assert!(!sums.matches("7d72365eb983485397e3e3f9d460bdda", ""));
        assert!(!sums.matches("other", "2882341273"));
    }
}
