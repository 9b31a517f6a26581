use async_trait::async_trait;
use ferrous_authdns_domain::{DnsMessage, DomainError, QueryOptions, RecordType};
use std::net::IpAddr;

/// One query, one server, one reply.
///
/// Implementations open a fresh socket per call and release it on every exit
/// path. They never retry: failover belongs to the caller.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        server: IpAddr,
        options: QueryOptions,
    ) -> Result<DnsMessage, DomainError>;
}
