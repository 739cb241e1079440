use ferrous_resolv_domain::{HostAddress, ResolveError};
use std::net::IpAddr;
use std::sync::Arc;

/// Name/address lookups. `Ok(None)` means no usable answer was obtained.
pub trait HostResolver: Send + Sync {
    fn resolve_address(&self, hostname: &str) -> Result<Option<Arc<HostAddress>>, ResolveError>;

    fn resolve_hostname(&self, address: IpAddr) -> Result<Option<String>, ResolveError>;
}
