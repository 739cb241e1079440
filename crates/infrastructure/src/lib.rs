//! Ferrous Resolv Infrastructure Layer
//!
//! DNS wire codec, the retransmission loop, the resolver façade and the
//! adapters behind the application ports.
pub mod config;
pub mod dns;
pub mod system;
