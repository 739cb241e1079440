use ferrous_resolv_domain::HostAddress;
use std::net::Ipv4Addr;
use std::sync::Arc;

pub trait AddressRegistry: Send + Sync {
    /// Returns the registered object for `address` on interface `scope_id`,
    /// creating and classifying it on first use.
    fn host_by_address(&self, address: Ipv4Addr, scope_id: u32) -> Arc<HostAddress>;
}
