use ferrous_resolv_domain::ResolveError;
use std::net::SocketAddr;
use std::time::Duration;

/// A connected datagram channel to one name server.
///
/// `read` blocks for at most the duration last passed to `set_timeout` and
/// reports an expired wait as `ResolveError::TransportTimeout`.
pub trait DatagramTransport: Send {
    fn write(&mut self, datagram: &[u8]) -> Result<usize, ResolveError>;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ResolveError>;

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), ResolveError>;

    fn close(&mut self);
}

/// Opens the association used by the resolver.
pub trait TransportConnector: Send + Sync {
    fn connect(&self, server: SocketAddr) -> Result<Box<dyn DatagramTransport>, ResolveError>;
}
