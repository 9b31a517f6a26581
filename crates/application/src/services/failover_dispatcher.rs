use crate::ports::{AddressLookup, DnsExchange};
use ferrous_authdns_domain::{
    AddressSource, DnsMessage, DomainError, Nameserver, QueryOptions, RecordType, ResponseCode,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// A response accepted from one candidate, tagged with who answered.
#[derive(Debug, Clone)]
pub struct ServedResponse {
    pub message: DnsMessage,
    pub nameserver: String,
    pub server: IpAddr,
}

#[derive(Debug, Clone)]
pub enum Dispatch {
    Answered(ServedResponse),

    /// No candidate answered, and at least one replied with a definitive
    /// error code. Carries the last such reply.
    Rejected {
        nameserver: String,
        server: IpAddr,
        rcode: ResponseCode,
    },

    /// No candidate produced a usable reply.
    Exhausted,
}

impl Dispatch {
    pub fn answered(self) -> Option<ServedResponse> {
        match self {
            Dispatch::Answered(served) => Some(served),
            _ => None,
        }
    }
}

/// Tries nameserver candidates strictly in order until one gives a usable
/// response.
pub struct FailoverDispatcher {
    exchange: Arc<dyn DnsExchange>,
    lookup: Arc<dyn AddressLookup>,
}

impl FailoverDispatcher {
    pub fn new(exchange: Arc<dyn DnsExchange>, lookup: Arc<dyn AddressLookup>) -> Self {
        Self { exchange, lookup }
    }

    pub async fn dispatch(
        &self,
        name: &str,
        record_type: RecordType,
        candidates: &[Nameserver],
        options: QueryOptions,
    ) -> Dispatch {
        let mut rejected: Option<(String, IpAddr, ResponseCode)> = None;

        for (position, nameserver) in candidates.iter().enumerate() {
            let Some(server) = self.resolve_address(nameserver).await else {
                debug!(nameserver = %nameserver, position, "No address available, skipping");
                continue;
            };

            let message = match self
                .exchange
                .query(name, record_type, server, options)
                .await
            {
                Ok(message) => message,
                Err(e) => {
                    debug!(
                        nameserver = %nameserver,
                        server = %server,
                        kind = Self::failure_kind(&e),
                        error = %e,
                        position,
                        "Failing over"
                    );
                    continue;
                }
            };

            if Self::is_usable(&message, record_type) {
                debug!(
                    domain = %name,
                    record_type = %record_type,
                    nameserver = %nameserver,
                    server = %server,
                    "Nameserver responded"
                );
                return Dispatch::Answered(ServedResponse {
                    message,
                    nameserver: nameserver.name.clone(),
                    server,
                });
            }

            debug!(
                domain = %name,
                nameserver = %nameserver,
                server = %server,
                rcode = %message.rcode,
                answers = message.answers.len(),
                "Unusable response, failing over"
            );
            if message.is_response && message.rcode.is_definitive_error() {
                rejected = Some((nameserver.name.clone(), server, message.rcode));
            }
        }

        warn!(
            domain = %name,
            record_type = %record_type,
            candidates = candidates.len(),
            "All nameservers failed"
        );

        match rejected {
            Some((nameserver, server, rcode)) => Dispatch::Rejected {
                nameserver,
                server,
                rcode,
            },
            None => Dispatch::Exhausted,
        }
    }

    /// IPv4 first, then IPv6. Lookup failures count as "no address".
    pub async fn resolve_address(&self, nameserver: &Nameserver) -> Option<IpAddr> {
        if let Some(ip) = self.resolve_ipv4(&nameserver.ipv4).await {
            return Some(ip);
        }
        self.resolve_ipv6(&nameserver.ipv6).await
    }

    async fn resolve_ipv4(&self, source: &AddressSource) -> Option<IpAddr> {
        match source {
            AddressSource::Known(ip) => Some(*ip),
            AddressSource::Unavailable => None,
            AddressSource::Lookup(host) => match self.lookup.lookup_ipv4(host).await {
                Ok(found) => found.map(IpAddr::V4),
                Err(e) => {
                    debug!(host = %host, error = %e, "IPv4 lookup failed");
                    None
                }
            },
        }
    }

    async fn resolve_ipv6(&self, source: &AddressSource) -> Option<IpAddr> {
        match source {
            AddressSource::Known(ip) => Some(*ip),
            AddressSource::Unavailable => None,
            AddressSource::Lookup(host) => match self.lookup.lookup_ipv6(host).await {
                Ok(found) => found.map(IpAddr::V6),
                Err(e) => {
                    debug!(host = %host, error = %e, "IPv6 lookup failed");
                    None
                }
            },
        }
    }

    fn failure_kind(error: &DomainError) -> &'static str {
        if error.is_timeout() {
            "timeout"
        } else if error.is_transport() {
            "network"
        } else {
            "decode"
        }
    }

    /// NOERROR with answers, or an authority-only referral for NS queries.
    pub fn is_usable(message: &DnsMessage, record_type: RecordType) -> bool {
        message.is_response
            && message.is_noerror()
            && (!message.answers.is_empty()
                || (record_type == RecordType::NS && !message.authorities.is_empty()))
    }
}
