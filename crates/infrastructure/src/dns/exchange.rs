use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::UdpTransport;
use async_trait::async_trait;
use ferrous_authdns_application::ports::DnsExchange;
use ferrous_authdns_domain::{DnsMessage, DomainError, QueryOptions, RecordType};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// One query, one UDP datagram, one reply. No retries.
pub struct UdpDnsExchange {
    timeout: Duration,
    port: u16,
}

impl UdpDnsExchange {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            port: DEFAULT_DNS_PORT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

#[async_trait]
impl DnsExchange for UdpDnsExchange {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        server: IpAddr,
        options: QueryOptions,
    ) -> Result<DnsMessage, DomainError> {
        let (id, query_bytes) = MessageBuilder::build_query(name, record_type, options)?;
        let transport = UdpTransport::new(SocketAddr::new(server, self.port));

        debug!(
            domain = %name,
            record_type = %record_type,
            server = %server,
            id,
            recursion_desired = options.recursion_desired,
            "Sending query"
        );

        let response_bytes = transport.send(&query_bytes, self.timeout).await?;
        ResponseParser::parse(&response_bytes)
    }
}
