use super::cname_resolver::RecordTarget;
use super::failover_dispatcher::FailoverDispatcher;
use ferrous_authdns_domain::domain_name::normalize;
use ferrous_authdns_domain::{DnsRecord, Nameserver, QueryOptions, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// Last-resort answer from the host's recursive resolvers, used when the
/// authoritative walk comes back empty-handed.
///
/// Records returned from here carry `ttl = 0`: they are not authoritative.
pub struct SystemFallback {
    dispatcher: Arc<FailoverDispatcher>,
    resolvers: Vec<Nameserver>,
}

impl SystemFallback {
    pub fn new(dispatcher: Arc<FailoverDispatcher>, resolvers: &[IpAddr]) -> Self {
        Self {
            dispatcher,
            resolvers: resolvers.iter().copied().map(Nameserver::at_address).collect(),
        }
    }

    pub async fn lookup(&self, domain: &str, target: &RecordTarget) -> Option<DnsRecord> {
        if self.resolvers.is_empty() {
            return None;
        }

        let domain = normalize(domain);
        let served = self
            .dispatcher
            .dispatch(
                &domain,
                target.record_type,
                &self.resolvers,
                QueryOptions::recursive(),
            )
            .await
            .answered()?;

        let first = served.message.answers.iter().find(|record| {
            record.record_type == target.record_type
                && (target.record_type != RecordType::CNAME || record.name == domain)
        })?;

        if !target.matches(first) {
            debug!(domain = %domain, data = %first.data, "System resolver answer does not match target");
            return None;
        }

        debug!(
            domain = %domain,
            record_type = %first.record_type,
            resolver = %served.nameserver,
            "Answered by system resolver"
        );
        Some(DnsRecord::new(domain, first.record_type, 0, first.data.clone()))
    }
}
