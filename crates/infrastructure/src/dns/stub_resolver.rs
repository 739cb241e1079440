//! Resolver façade.
//!
//! One `StubResolver` serves the whole process. Every lookup holds the
//! session lock from configuration check to final retry, so at most one
//! query is in flight at a time and the single buffer pair is never shared.
//! The association is opened on the first lookup after a name server is
//! configured and dropped as soon as the configuration goes away.

use ferrous_resolv_application::ports::{
    AddressRegistry, HostResolver, ResolverConfigSource, TransportConnector,
};
use ferrous_resolv_domain::{AddressFamily, HostAddress, ResolveError};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use super::exchange::Exchange;
use super::name_codec::NAME_MAX;
use super::transport::udp::UdpConnector;

pub struct StubResolver {
    config: Arc<dyn ResolverConfigSource>,
    connector: Arc<dyn TransportConnector>,
    registry: Arc<dyn AddressRegistry>,
    session: Mutex<Option<Exchange>>,
}

impl StubResolver {
    pub fn new(
        config: Arc<dyn ResolverConfigSource>,
        connector: Arc<dyn TransportConnector>,
        registry: Arc<dyn AddressRegistry>,
    ) -> Self {
        Self {
            config,
            connector,
            registry,
            session: Mutex::new(None),
        }
    }

    /// Resolver speaking plain UDP to the configured server.
    pub fn udp(config: Arc<dyn ResolverConfigSource>, registry: Arc<dyn AddressRegistry>) -> Self {
        Self::new(config, Arc::new(UdpConnector), registry)
    }

    /// Forward lookup. Only `AddressFamily::Inet` is served.
    pub fn lookup_address_by_name(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Option<Arc<HostAddress>>, ResolveError> {
        if family != AddressFamily::Inet {
            return Err(ResolveError::UnsupportedFamily);
        }

        let mut session = self.lock_session();
        let exchange = self.setup(&mut session)?;

        let found = exchange.lookup_address(hostname);
        debug!(hostname = %hostname, address = ?found, "Forward lookup finished");
        Ok(found.map(|address| self.registry.host_by_address(address, 0)))
    }

    /// Reverse lookup writing the name into `out`.
    ///
    /// `out` must hold at least `NAME_MAX` bytes; smaller buffers are refused
    /// before anything is sent. Returns the length of the name.
    pub fn lookup_name_by_address(
        &self,
        address: IpAddr,
        out: &mut [u8],
    ) -> Result<Option<usize>, ResolveError> {
        if out.len() < NAME_MAX {
            return Err(ResolveError::BufferTooSmall {
                capacity: out.len(),
                required: NAME_MAX,
            });
        }
        let IpAddr::V4(address) = address else {
            return Err(ResolveError::UnsupportedFamily);
        };

        let mut session = self.lock_session();
        let exchange = self.setup(&mut session)?;

        let found = exchange.lookup_name(address, out);
        debug!(address = %address, found = found.is_some(), "Reverse lookup finished");
        Ok(found)
    }

    /// Reverse lookup returning an owned name.
    pub fn lookup_hostname(&self, address: IpAddr) -> Result<Option<String>, ResolveError> {
        let mut buf = [0u8; NAME_MAX];
        let found = self.lookup_name_by_address(address, &mut buf)?;
        Ok(found.map(|len| String::from_utf8_lossy(&buf[..len]).into_owned()))
    }

    /// Registry object for `address`. DNS is not queried.
    pub fn host_by_address(&self, address: Ipv4Addr, scope_id: u32) -> Arc<HostAddress> {
        self.registry.host_by_address(address, scope_id)
    }

    pub fn is_connected(&self) -> bool {
        self.lock_session().is_some()
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Exchange>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn setup<'a>(&self, session: &'a mut Option<Exchange>) -> Result<&'a mut Exchange, ResolveError> {
        let Some(server) = self.config.name_server() else {
            if let Some(exchange) = session.take() {
                info!(server = %exchange.server(), "Name server unconfigured, closing association");
            }
            return Err(ResolveError::NotConfigured);
        };

        let exchange = match session.take() {
            Some(exchange) => exchange,
            None => {
                let transport = self.connector.connect(server)?;
                let suffix = self.config.search_suffix();
                let policy = self.config.retry_policy();
                info!(
                    server = %server,
                    suffix = ?suffix,
                    attempts = policy.max_attempts,
                    max_wait_ms = policy.total_wait().as_millis() as u64,
                    "Opened resolver association"
                );
                Exchange::new(transport, server, suffix, policy)
            }
        };

        Ok(session.insert(exchange))
    }
}

impl HostResolver for StubResolver {
    fn resolve_address(&self, hostname: &str) -> Result<Option<Arc<HostAddress>>, ResolveError> {
        self.lookup_address_by_name(hostname, AddressFamily::Inet)
    }

    fn resolve_hostname(&self, address: IpAddr) -> Result<Option<String>, ResolveError> {
        self.lookup_hostname(address)
    }
}
