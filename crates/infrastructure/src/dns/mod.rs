pub mod exchange;
pub mod message_builder;
pub mod name_codec;
pub mod response_validator;
pub mod stub_resolver;
pub mod transport;
pub mod wire;

pub use exchange::Exchange;
pub use message_builder::MessageBuilder;
pub use response_validator::{Rejection, ResponseValidator};
pub use stub_resolver::StubResolver;
pub use transport::udp::{UdpConnector, UdpTransport};
