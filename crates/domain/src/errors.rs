use std::net::SocketAddr;
use thiserror::Error;

/// Failures raised before a lookup puts anything on the wire.
///
/// A lookup that was sent but never answered usably is not an error: the
/// resolver reports it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No name server configured")]
    NotConfigured,

    #[error("Unsupported address family")]
    UnsupportedFamily,

    #[error("Output buffer too small: {capacity} bytes, need at least {required}")]
    BufferTooSmall { capacity: usize, required: usize },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: SocketAddr },
}

/// Errors from encoding or decoding DNS wire data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    #[error("Message truncated")]
    Truncated,

    #[error("Buffer full")]
    BufferFull,

    #[error("Empty label")]
    EmptyLabel,

    #[error("Label longer than 63 bytes")]
    LabelTooLong,

    #[error("Name exceeds maximum encoded length")]
    NameTooLong,

    #[error("Empty name")]
    EmptyName,

    #[error("Invalid label type {0:#04x}")]
    BadLabelType(u8),

    #[error("Compression pointer to offset {0} outside message")]
    PointerOutOfRange(usize),

    #[error("Too many compression pointers")]
    TooManyPointers,

    #[error("Output buffer smaller than maximum name size")]
    OutputTooSmall,
}
