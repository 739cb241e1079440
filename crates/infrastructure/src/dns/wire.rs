//! Bounded access to DNS message buffers.
//!
//! All multi-byte fields on the wire are big-endian. `get_u16`, `get_u32`
//! and `put_u16` are the only places that conversion happens; `Cursor` and
//! `Writer` are built on them and never step outside their buffer.

use ferrous_resolv_domain::WireError;

pub const HEADER_SIZE: usize = 12;
pub const QUERY_CAPACITY: usize = 512;
pub const RESPONSE_CAPACITY: usize = 512;

/// Type, class, TTL and RDATA length following a record's owner name.
pub const RR_FIXED_SIZE: usize = 10;

/// Header flag bits.
pub mod flags {
    pub const QR: u16 = 0x8000;
    pub const STANDARD_QUERY: u16 = 0x0000;
    pub const TC: u16 = 0x0200;
    pub const RD: u16 = 0x0100;
    pub const RCODE_MASK: u16 = 0x000f;
}

#[inline]
pub fn get_u16(buf: &[u8], pos: usize) -> Result<u16, WireError> {
    match buf.get(pos..pos + 2) {
        Some(&[hi, lo]) => Ok(u16::from_be_bytes([hi, lo])),
        _ => Err(WireError::Truncated),
    }
}

#[inline]
pub fn get_u32(buf: &[u8], pos: usize) -> Result<u32, WireError> {
    match buf.get(pos..pos + 4) {
        Some(&[a, b, c, d]) => Ok(u32::from_be_bytes([a, b, c, d])),
        _ => Err(WireError::Truncated),
    }
}

#[inline]
pub fn put_u16(buf: &mut [u8], pos: usize, value: u16) -> Result<(), WireError> {
    buf.get_mut(pos..pos + 2)
        .ok_or(WireError::BufferFull)?
        .copy_from_slice(&value.to_be_bytes());
    Ok(())
}

/// DNS message header (12 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Standard recursive query carrying a single question.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: flags::STANDARD_QUERY | flags::RD,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let fields = [
            self.id,
            self.flags,
            self.qdcount,
            self.ancount,
            self.nscount,
            self.arcount,
        ];
        for (i, field) in fields.into_iter().enumerate() {
            put_u16(buf, i * 2, field)?;
        }
        Ok(HEADER_SIZE)
    }

    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        Ok(Self {
            id: get_u16(buf, 0)?,
            flags: get_u16(buf, 2)?,
            qdcount: get_u16(buf, 4)?,
            ancount: get_u16(buf, 6)?,
            nscount: get_u16(buf, 8)?,
            arcount: get_u16(buf, 10)?,
        })
    }

    pub fn is_response(&self) -> bool {
        self.flags & flags::QR != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & flags::TC != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & flags::RCODE_MASK) as u8
    }
}

/// Read position over a borrowed message. Every advance is checked.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self, WireError> {
        let mut cursor = Self::new(buf);
        cursor.seek(pos)?;
        Ok(cursor)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn seek(&mut self, pos: usize) -> Result<(), WireError> {
        if pos > self.buf.len() {
            return Err(WireError::Truncated);
        }
        self.pos = pos;
        Ok(())
    }

    pub fn peek_u8(&self) -> Result<u8, WireError> {
        self.buf.get(self.pos).copied().ok_or(WireError::Truncated)
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        let value = get_u16(self.buf, self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        let value = get_u32(self.buf, self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        let slice = self
            .buf
            .get(self.pos..self.pos + len)
            .ok_or(WireError::Truncated)?;
        self.pos += len;
        Ok(slice)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), WireError> {
        self.read_slice(len).map(|_| ())
    }
}

/// Append position over a fixed-capacity output buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a mut [u8], pos: usize) -> Result<Self, WireError> {
        if pos > buf.len() {
            return Err(WireError::BufferFull);
        }
        Ok(Self { buf, pos })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn put_u8(&mut self, value: u8) -> Result<(), WireError> {
        *self.buf.get_mut(self.pos).ok_or(WireError::BufferFull)? = value;
        self.pos += 1;
        Ok(())
    }

    pub fn put_u16(&mut self, value: u16) -> Result<(), WireError> {
        put_u16(self.buf, self.pos, value)?;
        self.pos += 2;
        Ok(())
    }

    pub fn put_slice(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.buf
            .get_mut(self.pos..self.pos + bytes.len())
            .ok_or(WireError::BufferFull)?
            .copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}
