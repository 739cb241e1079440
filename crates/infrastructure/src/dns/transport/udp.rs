//! Connected UDP association to one name server (RFC 1035 §4.2.1).
//!
//! The socket is bound to the wildcard address on an ephemeral port and
//! connected to the server, so the kernel drops datagrams from any other
//! peer. Reads block for at most the last timeout that was armed.

use ferrous_resolv_application::ports::{DatagramTransport, TransportConnector};
use ferrous_resolv_domain::ResolveError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;
use tracing::debug;

/// `set_read_timeout` rejects a zero duration.
const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);

pub struct UdpTransport {
    server: SocketAddr,
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    pub fn connect(server: SocketAddr) -> Result<Self, ResolveError> {
        let socket = open_socket(server).map_err(|e| {
            ResolveError::Transport(format!("Failed to open UDP association to {}: {}", server, e))
        })?;

        debug!(
            server = %server,
            local = ?socket.local_addr().ok(),
            "UDP association opened"
        );

        Ok(Self {
            server,
            socket: Some(socket),
        })
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    fn socket(&self) -> Result<&UdpSocket, ResolveError> {
        self.socket
            .as_ref()
            .ok_or_else(|| ResolveError::Transport(format!("Association to {} is closed", self.server)))
    }
}

fn open_socket(server: SocketAddr) -> io::Result<UdpSocket> {
    let (domain, wildcard) = match server {
        SocketAddr::V4(_) => (
            Domain::IPV4,
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        ),
        SocketAddr::V6(_) => (
            Domain::IPV6,
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        ),
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.bind(&wildcard.into())?;
    socket.connect(&server.into())?;

    Ok(socket.into())
}

impl DatagramTransport for UdpTransport {
    fn write(&mut self, datagram: &[u8]) -> Result<usize, ResolveError> {
        let server = self.server;
        self.socket()?
            .send(datagram)
            .map_err(|e| ResolveError::Transport(format!("Failed to send to {}: {}", server, e)))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ResolveError> {
        let server = self.server;
        self.socket()?.recv(buf).map_err(|e| match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                ResolveError::TransportTimeout { server }
            }
            _ => ResolveError::Transport(format!("Failed to receive from {}: {}", server, e)),
        })
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), ResolveError> {
        let server = self.server;
        self.socket()?
            .set_read_timeout(Some(timeout.max(MIN_READ_TIMEOUT)))
            .map_err(|e| {
                ResolveError::Transport(format!("Failed to set timeout for {}: {}", server, e))
            })
    }

    fn close(&mut self) {
        if self.socket.take().is_some() {
            debug!(server = %self.server, "UDP association closed");
        }
    }
}

/// Opens a [`UdpTransport`] per association.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpConnector;

impl TransportConnector for UdpConnector {
    fn connect(&self, server: SocketAddr) -> Result<Box<dyn DatagramTransport>, ResolveError> {
        Ok(Box::new(UdpTransport::connect(server)?))
    }
}
