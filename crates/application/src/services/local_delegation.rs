use super::failover_dispatcher::FailoverDispatcher;
use super::nameserver_extractor::NameserverExtractor;
use ferrous_authdns_domain::domain_name::{check_depth, normalize, suffixes_most_specific_first};
use ferrous_authdns_domain::{Nameserver, NsInfo, QueryOptions, RecordType, ResolveError};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Asks the host's configured recursive resolvers for the NS set of the
/// domain and then of each parent zone, most specific first.
pub struct LocalDelegationWalker {
    dispatcher: Arc<FailoverDispatcher>,
    resolvers: Vec<Nameserver>,
}

impl LocalDelegationWalker {
    pub fn new(dispatcher: Arc<FailoverDispatcher>, resolvers: &[IpAddr]) -> Self {
        Self {
            dispatcher,
            resolvers: resolvers.iter().copied().map(Nameserver::at_address).collect(),
        }
    }

    /// `Ok(None)` when no resolver is configured or no suffix yields an NS set.
    #[instrument(skip(self))]
    pub async fn discover(&self, domain: &str) -> Result<Option<NsInfo>, ResolveError> {
        let domain = normalize(domain);
        check_depth(&domain)?;

        if self.resolvers.is_empty() {
            debug!("No local resolvers configured");
            return Ok(None);
        }

        for zone in suffixes_most_specific_first(&domain) {
            for resolver in &self.resolvers {
                let Some(served) = self
                    .dispatcher
                    .dispatch(
                        &zone,
                        RecordType::NS,
                        std::slice::from_ref(resolver),
                        QueryOptions::recursive(),
                    )
                    .await
                    .answered()
                else {
                    continue;
                };

                let nameservers =
                    NameserverExtractor::extract(&zone, served.message.delegation_records());
                if nameservers.is_empty() {
                    debug!(zone = %zone, resolver = %resolver, "No NS records for zone");
                    continue;
                }

                debug!(
                    zone = %zone,
                    resolver = %resolver,
                    nameservers = nameservers.len(),
                    "Zone cut found via local resolver"
                );
                return Ok(Some(NsInfo::new(zone, nameservers)));
            }
        }

        Ok(None)
    }
}
