mod errors;
mod logging;
mod resolv_conf;
mod resolver;
mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::{LinkSettings, ResolverSettings, DNS_PORT};
pub use root::{CliOverrides, Config};
