//! Response Validator
//!
//! Decides whether a received datagram answers the outstanding query and
//! extracts the requested record. Anything that does not check out is a
//! `Rejection`: the datagram is dropped and the retry loop carries on.

use ferrous_resolv_domain::{RecordClass, RecordType, WireError};
use std::net::Ipv4Addr;
use thiserror::Error;

use super::name_codec;
use super::wire::{Cursor, Header, HEADER_SIZE, RR_FIXED_SIZE};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("datagram of {0} bytes carries no question")]
    TooShort(usize),

    #[error("transaction id {got:#06x} does not match {expected:#06x}")]
    IdMismatch { expected: u16, got: u16 },

    #[error("QR bit not set")]
    NotResponse,

    #[error("question count is {0}, expected 1")]
    QuestionCount(u16),

    #[error("answer section is empty")]
    NoAnswers,

    #[error("question section does not echo the query")]
    QuestionMismatch,

    #[error("malformed response: {0}")]
    Malformed(#[from] WireError),

    #[error("no usable {0} record in the answer section")]
    NoMatchingRecord(&'static str),
}

/// Fixed part of a resource record, read after its owner name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdlength: u16,
}

impl RecordHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, WireError> {
        if cursor.remaining() < RR_FIXED_SIZE {
            return Err(WireError::Truncated);
        }
        Ok(Self {
            rtype: cursor.read_u16()?,
            rclass: cursor.read_u16()?,
            ttl: cursor.read_u32()?,
            rdlength: cursor.read_u16()?,
        })
    }

    pub fn is(&self, record_type: RecordType) -> bool {
        self.rtype == record_type.code() && self.rclass == RecordClass::IN.code()
    }
}

pub struct ResponseValidator;

impl ResponseValidator {
    /// Checks header and question of `response` against `query`/`id`.
    ///
    /// On success returns the header and a cursor on the first answer record.
    pub fn answer_section<'a>(
        query: &[u8],
        response: &'a [u8],
        id: u16,
    ) -> Result<(Header, Cursor<'a>), Rejection> {
        if response.len() <= HEADER_SIZE {
            return Err(Rejection::TooShort(response.len()));
        }

        let header = Header::decode(response)?;
        if header.id != id {
            return Err(Rejection::IdMismatch {
                expected: id,
                got: header.id,
            });
        }
        if !header.is_response() {
            return Err(Rejection::NotResponse);
        }
        if header.qdcount != 1 {
            return Err(Rejection::QuestionCount(header.qdcount));
        }
        if header.ancount == 0 {
            return Err(Rejection::NoAnswers);
        }

        let mut cursor = Cursor::at(response, HEADER_SIZE)?;
        name_codec::skip_name(&mut cursor)?;
        cursor.skip(4)?;

        let question_end = cursor.position();
        let echoed = query
            .get(HEADER_SIZE..question_end)
            .is_some_and(|sent| sent == &response[HEADER_SIZE..question_end]);
        if !echoed {
            return Err(Rejection::QuestionMismatch);
        }

        Ok((header, cursor))
    }

    /// First IN A record with a 4-byte RDATA.
    pub fn address_answer(query: &[u8], response: &[u8], id: u16) -> Result<Ipv4Addr, Rejection> {
        let (header, mut cursor) = Self::answer_section(query, response, id)?;

        for _ in 0..header.ancount {
            name_codec::skip_name(&mut cursor)?;
            let record = RecordHeader::read(&mut cursor)?;
            let rdata = cursor.read_slice(usize::from(record.rdlength))?;

            if !record.is(RecordType::A) {
                continue;
            }
            if let &[a, b, c, d] = rdata {
                return Ok(Ipv4Addr::new(a, b, c, d));
            }
        }

        Err(Rejection::NoMatchingRecord(RecordType::A.as_str()))
    }

    /// First IN PTR record, decoded into `out`. Returns the name length.
    ///
    /// A PTR record whose name cannot be decoded rejects the whole datagram.
    pub fn name_answer(
        query: &[u8],
        response: &[u8],
        id: u16,
        out: &mut [u8],
    ) -> Result<usize, Rejection> {
        let (header, mut cursor) = Self::answer_section(query, response, id)?;

        for _ in 0..header.ancount {
            name_codec::skip_name(&mut cursor)?;
            let record = RecordHeader::read(&mut cursor)?;
            let rdata_start = cursor.position();
            cursor.skip(usize::from(record.rdlength))?;

            if record.is(RecordType::PTR) {
                return Ok(name_codec::copy_name(response, rdata_start, out)?);
            }
        }

        Err(Rejection::NoMatchingRecord(RecordType::PTR.as_str()))
    }
}
