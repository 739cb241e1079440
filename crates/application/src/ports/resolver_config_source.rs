use ferrous_resolv_domain::RetryPolicy;
use std::net::SocketAddr;

/// Current resolver configuration. Values may change, or the server may
/// disappear, between two calls.
pub trait ResolverConfigSource: Send + Sync {
    fn name_server(&self) -> Option<SocketAddr>;

    fn search_suffix(&self) -> Option<String>;

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }
}
