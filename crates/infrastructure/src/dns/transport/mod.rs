pub mod udp;

pub use udp::{UdpConnector, UdpTransport};
