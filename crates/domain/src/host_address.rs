use std::fmt;
use std::net::Ipv4Addr;

/// Address families accepted by `lookup_address_by_name`.
///
/// Only `Inet` is served; the others exist so callers can ask and be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    #[default]
    Inet,
    Inet6,
    Unspec,
}

/// Classification the address registry assigns to a host address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressState {
    /// Loopback addresses, usable immediately.
    Preferred,
    /// Multicast group this host has not joined.
    NonMember,
    /// Neighbour on a directly attached link, not yet resolved.
    Init,
    /// Reached through a router.
    Destination,
}

impl AddressState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressState::Preferred => "preferred",
            AddressState::NonMember => "non-member",
            AddressState::Init => "on-link",
            AddressState::Destination => "destination",
        }
    }
}

/// A long-lived, classified IPv4 host address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAddress {
    pub address: Ipv4Addr,
    pub state: AddressState,
    pub scope_id: u32,
    pub prefix_len: Option<u8>,
}

impl HostAddress {
    pub fn new(address: Ipv4Addr, state: AddressState, scope_id: u32) -> Self {
        Self {
            address,
            state,
            scope_id,
            prefix_len: None,
        }
    }

    pub fn with_prefix(mut self, prefix_len: u8) -> Self {
        self.prefix_len = Some(prefix_len);
        self
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.state.as_str())
    }
}
