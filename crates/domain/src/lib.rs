//! Ferrous Resolv Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod host_address;
pub mod retry_policy;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverSettings};
pub use dns_record::{RecordClass, RecordType};
pub use errors::{ResolveError, WireError};
pub use host_address::{AddressFamily, AddressState, HostAddress};
pub use retry_policy::RetryPolicy;
