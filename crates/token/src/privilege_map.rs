//! Privilege map and its canonical encoding.
//!
//! ```txt
//! u16 count ++ count * (u16 privilege ++ u32 expire_at)
//! ```
//!
//! Entries are always written in ascending privilege order. The encoded map
//! is part of the signed message, so issuer and verifier must agree on the
//! order byte for byte.

use std::collections::BTreeMap;

use bytes::BytesMut;

use crate::{
    Privilege,
    error::{Result, TokenError},
    wire::{self, WireReader},
};

/// Encoded size of one map entry.
pub const ENTRY_LEN: usize = 2 + 4;

/// Privilege grants keyed by wire code, ordered by code.
///
/// Keys are raw `u16` codes so that kinds unknown to [`Privilege`] survive a
/// decode. A missing key means the privilege was never granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct PrivilegeMap(BTreeMap<u16, u32>);

impl PrivilegeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `privilege` until `expire_at`, replacing any earlier grant.
    pub fn insert(&mut self, privilege: Privilege, expire_at: u32) -> Option<u32> {
        self.0.insert(privilege.code(), expire_at)
    }

    /// Grant a privilege by raw code.
    pub fn insert_raw(&mut self, code: u16, expire_at: u32) -> Option<u32> {
        self.0.insert(code, expire_at)
    }

    pub fn get(&self, privilege: Privilege) -> Option<u32> {
        self.get_raw(privilege.code())
    }

    pub fn get_raw(&self, code: u16) -> Option<u32> {
        self.0.get(&code).copied()
    }

    /// Expiration of `privilege`, or `0` when it was never granted.
    pub fn expire_at(&self, privilege: Privilege) -> u32 {
        self.get(privilege).unwrap_or_default()
    }

    pub fn contains(&self, privilege: Privilege) -> bool {
        self.0.contains_key(&privilege.code())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw `(code, expire_at)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.0.iter().map(|(&code, &expire_at)| (code, expire_at))
    }

    /// Entries whose code names a known [`Privilege`].
    pub fn known(&self) -> impl Iterator<Item = (Privilege, u32)> + '_ {
        self.iter()
            .filter_map(|(code, expire_at)| Privilege::from_repr(code).map(|p| (p, expire_at)))
    }

    /// Number of bytes [`encode`](Self::encode) appends.
    pub fn encoded_len(&self) -> usize {
        2 + ENTRY_LEN * self.len()
    }

    /// Append the count and every entry in ascending code order.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<()> {
        let count = u16::try_from(self.len()).map_err(|_| TokenError::FieldTooLong {
            context: "privilege map",
            len: self.len(),
            limit: wire::MAX_FIELD_LEN,
        })?;
        buf.reserve(self.encoded_len());
        wire::put_u16(buf, count);
        for (code, expire_at) in self.iter() {
            wire::put_u16(buf, code);
            wire::put_u32(buf, expire_at);
        }
        Ok(())
    }

    /// Read a count and that many entries in wire order.
    ///
    /// Order on the wire is not checked. A repeated code keeps the last value.
    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self> {
        let count = reader.read_u16("privilege count")?;
        let mut map = Self::new();
        for _ in 0..count {
            let code = reader.read_u16("privilege code")?;
            let expire_at = reader.read_u32("privilege expiration")?;
            map.insert_raw(code, expire_at);
        }
        Ok(map)
    }
}

impl FromIterator<(Privilege, u32)> for PrivilegeMap {
    fn from_iter<I: IntoIterator<Item = (Privilege, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(p, e)| (p.code(), e)).collect())
    }
}

impl Extend<(Privilege, u32)> for PrivilegeMap {
    fn extend<I: IntoIterator<Item = (Privilege, u32)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(p, e)| (p.code(), e)));
    }
}
