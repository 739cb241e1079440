use arc_swap::ArcSwapOption;
use ferrous_resolv_application::ports::ResolverConfigSource;
use ferrous_resolv_domain::{ResolverSettings, RetryPolicy};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Resolver settings that can be swapped or withdrawn while lookups run.
///
/// Readers take a snapshot per call. An open association keeps the suffix
/// and retry policy it was opened with.
#[derive(Default)]
pub struct SharedResolverConfig {
    current: ArcSwapOption<ResolverSettings>,
}

impl SharedResolverConfig {
    pub fn new(settings: ResolverSettings) -> Self {
        Self {
            current: ArcSwapOption::from_pointee(settings),
        }
    }

    /// No name server until [`replace`](Self::replace) is called.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn replace(&self, settings: ResolverSettings) {
        info!(
            nameserver = ?settings.nameserver,
            port = settings.port,
            search = ?settings.search,
            "Resolver configuration replaced"
        );
        self.current.store(Some(Arc::new(settings)));
    }

    pub fn clear(&self) {
        info!("Resolver configuration cleared");
        self.current.store(None);
    }

    pub fn current(&self) -> Option<Arc<ResolverSettings>> {
        self.current.load_full()
    }
}

impl ResolverConfigSource for SharedResolverConfig {
    fn name_server(&self) -> Option<SocketAddr> {
        self.current().and_then(|s| s.name_server())
    }

    fn search_suffix(&self) -> Option<String> {
        self.current()
            .and_then(|s| s.search_suffix().map(str::to_owned))
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.current()
            .map(|s| s.retry_policy())
            .unwrap_or_default()
    }
}
