/// Privilege kinds with their stable wire codes.
///
/// The code space is open: tokens may carry codes this enum does not name,
/// and [`PrivilegeMap`](crate::PrivilegeMap) keeps those as raw entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::FromRepr,
)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
#[strum(serialize_all = "kebab-case")]
#[repr(u16)]
pub enum Privilege {
    JoinChannel = 1,
    PublishAudioStream = 2,
    PublishVideoStream = 3,
    PublishDataStream = 4,

    PublishAudioCdn = 5,
    PublishVideoCdn = 6,
    RequestPublishAudioStream = 7,
    RequestPublishVideoStream = 8,
    RequestPublishDataStream = 9,
    InvitePublishAudioStream = 10,
    InvitePublishVideoStream = 11,
    InvitePublishDataStream = 12,

    AdministrateChannel = 101,

    /// Log in to the real-time messaging service.
    LoginRtm = 1000,
}

impl Privilege {
    /// Wire code of this privilege.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl From<Privilege> for u16 {
    fn from(privilege: Privilege) -> u16 {
        privilege.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes() {
        let expected = [
            (Privilege::JoinChannel, 1),
            (Privilege::PublishAudioStream, 2),
            (Privilege::PublishVideoStream, 3),
            (Privilege::PublishDataStream, 4),
            (Privilege::PublishAudioCdn, 5),
            (Privilege::PublishVideoCdn, 6),
            (Privilege::RequestPublishAudioStream, 7),
            (Privilege::RequestPublishVideoStream, 8),
            (Privilege::RequestPublishDataStream, 9),
            (Privilege::InvitePublishAudioStream, 10),
            (Privilege::InvitePublishVideoStream, 11),
            (Privilege::InvitePublishDataStream, 12),
            (Privilege::AdministrateChannel, 101),
            (Privilege::LoginRtm, 1000),
        ];
        for (privilege, code) in expected {
            assert_eq!(privilege.code(), code);
            assert_eq!(Privilege::from_repr(code), Some(privilege));
        }
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(Privilege::from_repr(0), None);
        assert_eq!(Privilege::from_repr(13), None);
        assert_eq!(Privilege::from_repr(999), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Privilege::JoinChannel.to_string(), "join-channel");
        assert_eq!(Privilege::LoginRtm.to_string(), "login-rtm");
    }
}
