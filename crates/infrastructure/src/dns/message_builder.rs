//! DNS Message Builder
//!
//! Writes complete query datagrams straight into a caller-owned buffer:
//! header, one question, QTYPE and QCLASS.

use ferrous_resolv_domain::{RecordClass, RecordType, WireError};
use std::net::Ipv4Addr;

use super::name_codec;
use super::wire::{Header, Writer};

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a forward (A) query for `hostname`.
    ///
    /// `suffix` is appended to single-label names. Returns the datagram length.
    pub fn a_query(
        buf: &mut [u8],
        id: u16,
        hostname: &str,
        suffix: Option<&str>,
    ) -> Result<usize, WireError> {
        Self::build(buf, id, RecordType::A, |out| {
            name_codec::encode_question_name(out, hostname, suffix)
        })
    }

    /// Build a reverse (PTR) query for `address` under `in-addr.arpa`.
    pub fn ptr_query(buf: &mut [u8], id: u16, address: Ipv4Addr) -> Result<usize, WireError> {
        Self::build(buf, id, RecordType::PTR, |out| {
            name_codec::encode_ptr_name(out, address)
        })
    }

    fn build(
        buf: &mut [u8],
        id: u16,
        record_type: RecordType,
        encode_name: impl FnOnce(&mut Writer<'_>) -> Result<usize, WireError>,
    ) -> Result<usize, WireError> {
        let header_len = Header::query(id).encode(buf)?;

        let mut out = Writer::at(buf, header_len)?;
        encode_name(&mut out)?;
        out.put_u16(record_type.code())?;
        out.put_u16(RecordClass::IN.code())?;

        Ok(out.position())
    }
}
