use ferrous_authdns_application::services::{
    CnameResolver, FailoverDispatcher, LocalDelegationWalker, RootDelegationWalker, SystemFallback,
};
use ferrous_authdns_application::use_cases::ResolveRecordUseCase;
use ferrous_authdns_domain::Config;
use ferrous_authdns_infrastructure::dns::UdpDnsExchange;
use ferrous_authdns_infrastructure::system::{resolv_conf, SystemAddressLookup};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct DnsServices {
    pub resolve_record: Arc<ResolveRecordUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver_config = &config.resolver;
        let timeout = Duration::from_millis(resolver_config.query_timeout_ms);

        let exchange = UdpDnsExchange::new(timeout).with_port(resolver_config.port);
        let dispatcher = Arc::new(FailoverDispatcher::new(
            Arc::new(exchange),
            Arc::new(SystemAddressLookup::new(timeout)),
        ));

        let local_resolvers = Self::local_resolvers(config)?;
        info!(
            local_resolvers = local_resolvers.len(),
            root_hint = %resolver_config.root_hint.name,
            "Initializing authoritative resolver"
        );

        let resolver = CnameResolver::new(
            dispatcher.clone(),
            LocalDelegationWalker::new(dispatcher.clone(), &local_resolvers),
            RootDelegationWalker::new(dispatcher.clone(), &resolver_config.root_hint),
        );

        let mut use_case = ResolveRecordUseCase::new(Arc::new(resolver));
        if resolver_config.system_fallback {
            if local_resolvers.is_empty() {
                warn!("System fallback enabled but no local resolvers are available");
            }
            use_case = use_case.with_system_fallback(SystemFallback::new(dispatcher, &local_resolvers));
        }
        if let Some(deadline_ms) = resolver_config.deadline_ms {
            use_case = use_case.with_deadline(Duration::from_millis(deadline_ms));
        }

        Ok(Self {
            resolve_record: Arc::new(use_case),
        })
    }

    /// Configured list, or the host's resolv.conf when none is configured.
    fn local_resolvers(config: &Config) -> anyhow::Result<Vec<IpAddr>> {
        let configured = config.resolver.parsed_local_resolvers()?;
        if !configured.is_empty() {
            return Ok(configured);
        }
        Ok(resolv_conf::load_nameservers(&config.resolver.resolv_conf_path))
    }
}
