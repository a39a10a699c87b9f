//! The signed message block ("M").
//!
//! ```txt
//! u32 salt ++ u32 issued_at ++ privilege map
//! ```

use bytes::{Bytes, BytesMut};

use crate::{
    PrivilegeMap,
    error::Result,
    wire::{self, WireReader},
};

/// Salt, issued timestamp and privilege grants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "arbitrary"), derive(arbitrary::Arbitrary))]
pub struct Message {
    salt: u32,
    issued_at: u32,
    privileges: PrivilegeMap,
}

impl Message {
    pub fn new(salt: u32, issued_at: u32, privileges: PrivilegeMap) -> Self {
        Self {
            salt,
            issued_at,
            privileges,
        }
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

    pub fn into_privileges(self) -> PrivilegeMap {
        self.privileges
    }

    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(8 + self.privileges.encoded_len());
        wire::put_u32(&mut buf, self.salt);
        wire::put_u32(&mut buf, self.issued_at);
        self.privileges.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(bytes);
        let salt = reader.read_u32("salt")?;
        let issued_at = reader.read_u32("issued timestamp")?;
        let privileges = PrivilegeMap::decode(&mut reader)?;
        Ok(Self::new(salt, issued_at, privileges))
    }
}
