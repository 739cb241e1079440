//! Retransmission loop over one name-server association.
//!
//! An `Exchange` owns the transport, the query/response buffer pair and the
//! transaction-id counter. Each lookup builds its query once, then runs up
//! to `max_attempts` rounds of write, wait `min_wait << attempt`, read one
//! datagram. The first datagram that validates ends the lookup. A send or
//! receive failure other than an expired wait ends it with no answer.

use ferrous_resolv_application::ports::DatagramTransport;
use ferrous_resolv_domain::{ResolveError, RetryPolicy};
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{debug, warn};

use super::message_builder::MessageBuilder;
use super::response_validator::{Rejection, ResponseValidator};
use super::wire::{Header, QUERY_CAPACITY, RESPONSE_CAPACITY};

enum Attempt<T> {
    Matched(T),
    TimedOut,
    Discarded {
        rejection: Rejection,
        header: Option<Header>,
    },
}

pub struct Exchange {
    transport: Box<dyn DatagramTransport>,
    server: SocketAddr,
    suffix: Option<String>,
    policy: RetryPolicy,
    last_id: u16,
    query: [u8; QUERY_CAPACITY],
    response: [u8; RESPONSE_CAPACITY],
}

impl Exchange {
    pub fn new(
        transport: Box<dyn DatagramTransport>,
        server: SocketAddr,
        suffix: Option<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            server,
            suffix,
            policy,
            last_id: fastrand::u16(..),
            query: [0; QUERY_CAPACITY],
            response: [0; RESPONSE_CAPACITY],
        }
    }

    /// Pins the counter so the next query carries `next_id`.
    pub fn with_next_id(mut self, next_id: u16) -> Self {
        self.last_id = next_id.wrapping_sub(1);
        self
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    pub fn lookup_address(&mut self, hostname: &str) -> Option<Ipv4Addr> {
        let id = self.next_id();
        let len = match MessageBuilder::a_query(&mut self.query, id, hostname, self.suffix.as_deref())
        {
            Ok(len) => len,
            Err(e) => {
                debug!(hostname = %hostname, error = %e, "Host name cannot be encoded");
                return None;
            }
        };

        debug!(hostname = %hostname, id, server = %self.server, "Sending A query");
        self.transact(id, len, |query, response| {
            ResponseValidator::address_answer(query, response, id)
        })
    }

    /// Reverse lookup of `address`; the name is written to `out`, which must
    /// hold at least `NAME_MAX` bytes. Returns the name length.
    pub fn lookup_name(&mut self, address: Ipv4Addr, out: &mut [u8]) -> Option<usize> {
        let id = self.next_id();
        let len = match MessageBuilder::ptr_query(&mut self.query, id, address) {
            Ok(len) => len,
            Err(e) => {
                debug!(address = %address, error = %e, "Reverse name cannot be encoded");
                return None;
            }
        };

        debug!(address = %address, id, server = %self.server, "Sending PTR query");
        self.transact(id, len, |query, response| {
            ResponseValidator::name_answer(query, response, id, out)
        })
    }

    fn next_id(&mut self) -> u16 {
        self.last_id = self.last_id.wrapping_add(1);
        self.last_id
    }

    fn transact<T>(
        &mut self,
        id: u16,
        len: usize,
        mut accept: impl FnMut(&[u8], &[u8]) -> Result<T, Rejection>,
    ) -> Option<T> {
        let query = &self.query[..len];

        for attempt in 0..self.policy.max_attempts {
            if let Err(e) = self.transport.write(query) {
                warn!(server = %self.server, error = %e, "Failed to send query");
                return None;
            }

            let timeout = self.policy.timeout_for(attempt);
            if let Err(e) = self.transport.set_timeout(timeout) {
                warn!(server = %self.server, error = %e, "Failed to arm receive timeout");
                return None;
            }

            let outcome = match self.transport.read(&mut self.response) {
                Ok(rlen) => {
                    let datagram = &self.response[..rlen.min(RESPONSE_CAPACITY)];
                    match accept(query, datagram) {
                        Ok(value) => Attempt::Matched(value),
                        Err(rejection) => Attempt::Discarded {
                            rejection,
                            header: Header::decode(datagram).ok(),
                        },
                    }
                }
                Err(ResolveError::TransportTimeout { .. }) => Attempt::TimedOut,
                Err(e) => {
                    warn!(server = %self.server, error = %e, "Failed to receive response");
                    return None;
                }
            };

            match outcome {
                Attempt::Matched(value) => {
                    debug!(id, attempt, "Response accepted");
                    return Some(value);
                }
                Attempt::TimedOut => debug!(
                    id,
                    attempt,
                    timeout_ms = timeout.as_millis() as u64,
                    "Attempt timed out"
                ),
                Attempt::Discarded {
                    rejection,
                    header: Some(header),
                } => debug!(
                    id,
                    attempt,
                    reason = %rejection,
                    rcode = header.rcode(),
                    truncated = header.is_truncated(),
                    "Discarding datagram"
                ),
                Attempt::Discarded {
                    rejection,
                    header: None,
                } => debug!(id, attempt, reason = %rejection, "Discarding datagram"),
            }
        }

        debug!(
            id,
            attempts = self.policy.max_attempts,
            server = %self.server,
            "No usable answer, giving up"
        );
        None
    }
}

impl Drop for Exchange {
    fn drop(&mut self) {
        self.transport.close();
    }
}
