//! Little-endian fixed-width integers and u16 length-prefixed byte strings.
//!
//! Writers append to a growable [`BytesMut`]. Reads go through
//! [`WireReader`], which bounds-checks every field before consuming it, so a
//! short buffer is reported as [`TokenError::Truncated`] instead of yielding
//! a silently shortened value.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, TokenError};

/// Largest payload a length-prefixed field can carry.
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

/// Append a little-endian `u16`.
#[inline]
pub fn put_u16(buf: &mut BytesMut, n: u16) {
    buf.put_u16_le(n);
}

/// Append a little-endian `u32`.
#[inline]
pub fn put_u32(buf: &mut BytesMut, n: u32) {
    buf.put_u32_le(n);
}

/// Append `bytes` preceded by its length as a `u16`.
///
/// An empty slice is written as a zero length with no payload.
pub fn put_bytes(buf: &mut BytesMut, bytes: &[u8], context: &'static str) -> Result<()> {
    let len = u16::try_from(bytes.len()).map_err(|_| TokenError::FieldTooLong {
        context,
        len: bytes.len(),
        limit: MAX_FIELD_LEN,
    })?;
    buf.put_u16_le(len);
    buf.put_slice(bytes);
    Ok(())
}

/// Cursor over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn ensure(&self, needed: usize, context: &'static str) -> Result<()> {
        if self.buf.len() < needed {
            return Err(TokenError::truncated(context, needed, self.buf.len()));
        }
        Ok(())
    }

    pub fn read_u16(&mut self, context: &'static str) -> Result<u16> {
        self.ensure(2, context)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn read_u32(&mut self, context: &'static str) -> Result<u32> {
        self.ensure(4, context)?;
        Ok(self.buf.get_u32_le())
    }

    /// Read a u16 length followed by exactly that many bytes.
    pub fn read_bytes(&mut self, context: &'static str) -> Result<&'a [u8]> {
        let len = usize::from(self.read_u16(context)?);
        let remaining = self.buf.len();
        let (field, rest) = self
            .buf
            .split_at_checked(len)
            .ok_or_else(|| TokenError::truncated(context, len, remaining))?;
        self.buf = rest;
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_integers_are_little_endian() {
        let mut buf = BytesMut::new();
        put_u16(&mut buf, 0x0102);
        put_u32(&mut buf, 0x0304_0506);
        assert_eq!(&buf[..], &[0x02, 0x01, 0x06, 0x05, 0x04, 0x03]);

        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_u16("a").unwrap(), 0x0102);
        assert_eq!(reader.read_u32("b").unwrap(), 0x0304_0506);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_empty_bytes_field() {
        let mut buf = BytesMut::new();
        put_bytes(&mut buf, b"", "empty").unwrap();
        assert_eq!(&buf[..], &[0x00, 0x00]);

        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_bytes("empty").unwrap(), b"");
    }

    #[test]
    fn test_bytes_field_layout() {
        let mut buf = BytesMut::new();
        put_bytes(&mut buf, b"abc", "field").unwrap();
        assert_eq!(&buf[..], &[0x03, 0x00, b'a', b'b', b'c']);
    }

    #[test]
    fn test_short_length_prefixed_read_is_an_error() {
        // Declares 5 bytes, carries 3.
        let buf = [0x05, 0x00, b'a', b'b', b'c'];
        let mut reader = WireReader::new(&buf);
        assert_matches!(
            reader.read_bytes("signature"),
            Err(TokenError::Truncated {
                context: "signature",
                needed: 5,
                remaining: 3
            })
        );
    }

    #[test]
    fn test_short_integer_reads() {
        let mut reader = WireReader::new(&[0x01]);
        assert_matches!(
            reader.read_u16("count"),
            Err(TokenError::Truncated {
                needed: 2,
                remaining: 1,
                ..
            })
        );

        let mut reader = WireReader::new(&[0x01, 0x02, 0x03]);
        assert_matches!(
            reader.read_u32("salt"),
            Err(TokenError::Truncated {
                needed: 4,
                remaining: 3,
                ..
            })
        );
    }

    #[test]
    fn test_oversized_field_is_rejected() {
        let big = vec![0u8; MAX_FIELD_LEN + 1];
        let mut buf = BytesMut::new();
        assert_matches!(
            put_bytes(&mut buf, &big, "message"),
            Err(TokenError::FieldTooLong { len, limit: MAX_FIELD_LEN, .. })
                if len == MAX_FIELD_LEN + 1
        );
        assert!(buf.is_empty());

        let max = vec![0u8; MAX_FIELD_LEN];
        assert!(put_bytes(&mut buf, &max, "message").is_ok());
        assert_eq!(buf.len(), 2 + MAX_FIELD_LEN);
    }
}
