use dashmap::DashMap;
use ferrous_resolv_application::ports::AddressRegistry;
use ferrous_resolv_domain::config::LinkSettings;
use ferrous_resolv_domain::{AddressState, HostAddress};
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

const LOOPBACK_PREFIX: u8 = 8;
const LOOPBACK_SCOPE: u32 = 1;

/// Scope id meaning "any interface" when matching on-link networks.
const ANY_SCOPE: u32 = 0;

/// Process-lifetime table of classified host addresses.
///
/// Entries are keyed by address and scope, created on first use and never
/// removed, so every lookup of the same pair hands out the same `Arc`.
///
/// The registry knows no attached networks of its own. Whoever builds it
/// declares them with [`with_link`](Self::with_link) or
/// [`from_links`](Self::from_links); without links no address is on-link.
#[derive(Default)]
pub struct InMemoryAddressRegistry {
    hosts: DashMap<(Ipv4Addr, u32), Arc<HostAddress>>,
    links: Vec<(Ipv4Network, u32)>,
}

impl InMemoryAddressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from configured links, rejecting malformed CIDRs.
    pub fn from_links(links: &[LinkSettings]) -> Result<Self, String> {
        let mut registry = Self::new();

        for link in links {
            let network: Ipv4Network = link
                .network
                .parse()
                .map_err(|e| format!("Invalid link network {}: {}", link.network, e))?;
            registry = registry.with_link(network, link.scope_id);
        }

        Ok(registry)
    }

    /// Declares a directly attached network reachable through interface `scope_id`.
    pub fn with_link(mut self, network: Ipv4Network, scope_id: u32) -> Self {
        self.links.push((network, scope_id));
        self
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Longest attached network holding `address` on interface `scope_id`,
    /// or on any interface when `scope_id` is 0.
    fn on_link(&self, address: Ipv4Addr, scope_id: u32) -> Option<(Ipv4Network, u32)> {
        self.links
            .iter()
            .filter(|(_, link_scope)| scope_id == ANY_SCOPE || *link_scope == scope_id)
            .filter(|(network, _)| network.contains(address))
            .max_by_key(|(network, _)| network.prefix())
            .copied()
    }

    fn classify(&self, address: Ipv4Addr, scope_id: u32) -> HostAddress {
        if address.is_loopback() {
            return HostAddress::new(address, AddressState::Preferred, LOOPBACK_SCOPE)
                .with_prefix(LOOPBACK_PREFIX);
        }
        if address.is_multicast() {
            return HostAddress::new(address, AddressState::NonMember, scope_id);
        }
        match self.on_link(address, scope_id) {
            Some((network, link_scope)) => {
                HostAddress::new(address, AddressState::Init, link_scope)
                    .with_prefix(network.prefix())
            }
            None => HostAddress::new(address, AddressState::Destination, scope_id),
        }
    }
}

impl AddressRegistry for InMemoryAddressRegistry {
    fn host_by_address(&self, address: Ipv4Addr, scope_id: u32) -> Arc<HostAddress> {
        if let Some(existing) = self.hosts.get(&(address, scope_id)) {
            return Arc::clone(existing.value());
        }

        self.hosts
            .entry((address, scope_id))
            .or_insert_with(|| {
                let host = self.classify(address, scope_id);
                debug!(
                    address = %address,
                    scope_id,
                    state = host.state.as_str(),
                    "Registered host address"
                );
                Arc::new(host)
            })
            .value()
            .clone()
    }
}
