#![allow(dead_code)]
use ferrous_resolv_domain::{ResolverSettings, RetryPolicy};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_PTR: u16 = 12;
pub const CLASS_IN: u16 = 1;

/// Uncompressed wire form of a dotted name.
pub fn wire_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

pub fn quick_policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_millis(50))
}

pub fn settings_for(server: SocketAddr) -> ResolverSettings {
    ResolverSettings {
        port: server.port(),
        attempts: 2,
        min_wait_ms: 200,
        ..ResolverSettings::with_nameserver(server.ip())
    }
}

/// Builds a response to a query produced by `MessageBuilder`.
///
/// The question is echoed from the query; answers carry a pointer to the
/// question name as their owner.
pub struct ResponseBuilder {
    query: Vec<u8>,
    id: Option<u16>,
    flags: u16,
    qdcount: u16,
    ancount: Option<u16>,
    answers: Vec<u8>,
    answer_count: u16,
}

impl ResponseBuilder {
    pub fn for_query(query: &[u8]) -> Self {
        Self {
            query: query.to_vec(),
            id: None,
            flags: 0x8180,
            qdcount: 1,
            ancount: None,
            answers: Vec::new(),
            answer_count: 0,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = Some(id);
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount = qdcount;
        self
    }

    /// Overrides the answer count written in the header.
    pub fn ancount(mut self, ancount: u16) -> Self {
        self.ancount = Some(ancount);
        self
    }

    pub fn record(mut self, rtype: u16, rclass: u16, rdata: &[u8]) -> Self {
        self.answers.extend_from_slice(&[0xc0, 0x0c]);
        self.answers.extend_from_slice(&rtype.to_be_bytes());
        self.answers.extend_from_slice(&rclass.to_be_bytes());
        self.answers.extend_from_slice(&300u32.to_be_bytes());
        self.answers
            .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.answers.extend_from_slice(rdata);
        self.answer_count += 1;
        self
    }

    pub fn a(self, address: Ipv4Addr) -> Self {
        self.record(TYPE_A, CLASS_IN, &address.octets())
    }

    pub fn ptr(self, name: &str) -> Self {
        self.record(TYPE_PTR, CLASS_IN, &wire_name(name))
    }

    pub fn build(self) -> Vec<u8> {
        let id = self
            .id
            .unwrap_or_else(|| u16::from_be_bytes([self.query[0], self.query[1]]));

        let mut out = Vec::with_capacity(512);
        out.extend_from_slice(&id.to_be_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&self.qdcount.to_be_bytes());
        out.extend_from_slice(&self.ancount.unwrap_or(self.answer_count).to_be_bytes());
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&self.query[12..]);
        out.extend_from_slice(&self.answers);
        out
    }
}
