use super::failover_dispatcher::FailoverDispatcher;
use super::nameserver_extractor::NameserverExtractor;
use ferrous_authdns_domain::domain_name::{check_depth, normalize, suffixes_least_specific_first};
use ferrous_authdns_domain::{Nameserver, NsInfo, QueryOptions, RecordType, ResolveError, RootHint};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Walks the delegation chain down from a root server, one label at a time.
pub struct RootDelegationWalker {
    dispatcher: Arc<FailoverDispatcher>,
    root: Nameserver,
}

impl RootDelegationWalker {
    pub fn new(dispatcher: Arc<FailoverDispatcher>, hint: &RootHint) -> Self {
        let root = Nameserver::unresolved(hint.name.clone())
            .with_ipv4(IpAddr::V4(hint.ipv4))
            .with_ipv6(IpAddr::V6(hint.ipv6));
        Self { dispatcher, root }
    }

    /// Most specific zone cut reached, or `Ok(None)` if not even the TLD
    /// answered.
    ///
    /// A step that fails (no usable reply, or no NS for the test zone) does
    /// not end the walk: the next label is added and the last good zone's
    /// nameservers are asked again.
    #[instrument(skip(self))]
    pub async fn discover(&self, domain: &str) -> Result<Option<NsInfo>, ResolveError> {
        let domain = normalize(domain);
        check_depth(&domain)?;

        let root = std::slice::from_ref(&self.root);
        let mut last_good: Option<NsInfo> = None;

        for zone in suffixes_least_specific_first(&domain) {
            let servers = last_good
                .as_ref()
                .map(|info| info.nameservers.as_slice())
                .unwrap_or(root);

            let served = self
                .dispatcher
                .dispatch(&zone, RecordType::NS, servers, QueryOptions::recursive())
                .await
                .answered();

            let Some(served) = served else {
                debug!(zone = %zone, "Delegation step failed, keeping last zone cut");
                continue;
            };

            let nameservers =
                NameserverExtractor::extract(&zone, served.message.delegation_records());
            if nameservers.is_empty() {
                debug!(zone = %zone, server = %served.nameserver, "No delegation for zone");
                continue;
            }

            debug!(
                zone = %zone,
                server = %served.nameserver,
                nameservers = nameservers.len(),
                "Zone cut found"
            );
            last_good = Some(NsInfo::new(zone, nameservers));
        }

        Ok(last_good)
    }
}
