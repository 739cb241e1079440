mod address_registry;
mod datagram_transport;
mod host_resolver;
mod resolver_config_source;

pub use address_registry::AddressRegistry;
pub use datagram_transport::{DatagramTransport, TransportConnector};
pub use host_resolver::HostResolver;
pub use resolver_config_source::ResolverConfigSource;
