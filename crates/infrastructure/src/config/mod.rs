pub mod shared;

pub use shared::SharedResolverConfig;
