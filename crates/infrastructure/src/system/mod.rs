pub mod address_registry;

pub use address_registry::InMemoryAddressRegistry;
