//! The content block wrapped by the token's base64 segment.
//!
//! ```txt
//! u16 sig_len ++ signature ++ u32 crc_channel ++ u32 crc_user ++ u16 msg_len ++ message
//! ```
//!
//! The message is carried as opaque bytes; decode it with
//! [`Message::decode`](crate::message::Message::decode).

use bytes::{Bytes, BytesMut};

use crate::{
    ScopeChecksums,
    error::Result,
    wire::{self, WireReader},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    signature: Bytes,
    checksums: ScopeChecksums,
    message: Bytes,
}

impl Content {
    pub fn new(signature: Bytes, checksums: ScopeChecksums, message: Bytes) -> Self {
        Self {
            signature,
            checksums,
            message,
        }
    }

    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    pub fn checksums(&self) -> ScopeChecksums {
        self.checksums
    }

    /// Raw message block bytes.
    pub fn message(&self) -> &Bytes {
        &self.message
    }

    pub fn encode(&self) -> Result<Bytes> {
        let mut buf =
            BytesMut::with_capacity(2 + self.signature.len() + 8 + 2 + self.message.len());
        wire::put_bytes(&mut buf, &self.signature, "signature")?;
        wire::put_u32(&mut buf, self.checksums.channel);
        wire::put_u32(&mut buf, self.checksums.user);
        wire::put_bytes(&mut buf, &self.message, "message")?;
        Ok(buf.freeze())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(bytes);
        let signature = reader.read_bytes("signature")?;
        let channel = reader.read_u32("channel checksum")?;
        let user = reader.read_u32("user checksum")?;
        let message = reader.read_bytes("message")?;
        Ok(Self {
            signature: Bytes::copy_from_slice(signature),
            checksums: ScopeChecksums { channel, user },
            message: Bytes::copy_from_slice(message),
        })
    }
}
