use async_trait::async_trait;
use ferrous_authdns_application::ports::AddressLookup;
use ferrous_authdns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Nameserver hostname lookup through the host's own resolver
/// (`getaddrinfo` via `tokio::net::lookup_host`).
pub struct SystemAddressLookup {
    timeout: Duration,
}

impl SystemAddressLookup {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn resolve_all(&self, host: &str) -> Result<Vec<SocketAddr>, DomainError> {
        let target = format!("{}:0", host.trim_end_matches('.'));

        let addrs = tokio::time::timeout(self.timeout, tokio::net::lookup_host(&target))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: target.clone(),
            })?
            .map_err(|e| DomainError::LookupFailed {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        let addrs: Vec<SocketAddr> = addrs.collect();
        debug!(host = %host, found = addrs.len(), "System lookup");
        Ok(addrs)
    }
}

#[async_trait]
impl AddressLookup for SystemAddressLookup {
    async fn lookup_ipv4(&self, host: &str) -> Result<Option<Ipv4Addr>, DomainError> {
        let addrs = self.resolve_all(host).await?;
        Ok(addrs.into_iter().find_map(|addr| match addr.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        }))
    }

    async fn lookup_ipv6(&self, host: &str) -> Result<Option<Ipv6Addr>, DomainError> {
        let addrs = self.resolve_all(host).await?;
        Ok(addrs.into_iter().find_map(|addr| match addr.ip() {
            IpAddr::V6(ip) => Some(ip),
            IpAddr::V4(_) => None,
        }))
    }
}
