/// Session role of the token holder.
///
/// The set is closed: [`Role::from_repr`] returns `None` for any code other
/// than 0, 1, 2 and 101, so an unknown numeric role cannot reach the session
/// builders. Of the four, only [`Role::Subscriber`] is join-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[strum(serialize_all = "lowercase")]
#[repr(u16)]
pub enum Role {
    /// Communication-profile participant. Receives publish grants.
    Attendee = 0,

    /// Live-broadcast host.
    Publisher = 1,

    /// Live-broadcast audience. Join only.
    #[default]
    Subscriber = 2,

    Admin = 101,
}

impl Role {
    /// True if tokens for this role carry publish audio/video/data grants.
    pub fn can_publish(self) -> bool {
        matches!(self, Role::Attendee | Role::Publisher | Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::from_repr(0), Some(Role::Attendee));
        assert_eq!(Role::from_repr(1), Some(Role::Publisher));
        assert_eq!(Role::from_repr(2), Some(Role::Subscriber));
        assert_eq!(Role::from_repr(101), Some(Role::Admin));
        for code in [3, 100, 102, u16::MAX] {
            assert_eq!(Role::from_repr(code), None, "code {code}");
        }
    }

    #[test]
    fn test_publish_membership() {
        assert!(Role::Attendee.can_publish());
        assert!(Role::Publisher.can_publish());
        assert!(Role::Admin.can_publish());
        assert!(!Role::Subscriber.can_publish());
    }
}
