//! Ferrous Resolv Application Layer
//!
//! Ports the resolver core depends on. Adapters live in the infrastructure crate.
pub mod ports;
