use async_trait::async_trait;
use ferrous_authdns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Forward lookup of a nameserver hostname through the host's resolver.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup_ipv4(&self, host: &str) -> Result<Option<Ipv4Addr>, DomainError>;

    async fn lookup_ipv6(&self, host: &str) -> Result<Option<Ipv6Addr>, DomainError>;
}
