use ferrous_resolv_application::ports::HostResolver;
use ferrous_resolv_domain::Config;
use ferrous_resolv_infrastructure::config::SharedResolverConfig;
use ferrous_resolv_infrastructure::dns::StubResolver;
use ferrous_resolv_infrastructure::system::InMemoryAddressRegistry;
use std::sync::Arc;
use tracing::info;

pub struct ResolverServices {
    pub resolver: Arc<dyn HostResolver>,
}

impl ResolverServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let shared = Arc::new(SharedResolverConfig::new(config.resolver.clone()));
        let registry = InMemoryAddressRegistry::from_links(&config.resolver.links)
            .map_err(|e| anyhow::anyhow!("Invalid link configuration: {}", e))?;
        let registry = Arc::new(registry);

        info!(
            nameserver = ?config.resolver.name_server(),
            search = ?config.resolver.search_suffix(),
            attempts = config.resolver.attempts,
            min_wait_ms = config.resolver.min_wait_ms,
            links = config.resolver.links.len(),
            "Resolver services ready"
        );

        let resolver: Arc<dyn HostResolver> = Arc::new(StubResolver::udp(shared, registry));

        Ok(Self { resolver })
    }
}
