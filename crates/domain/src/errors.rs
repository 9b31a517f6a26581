use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Failed to encode DNS query: {0}")]
    QueryEncoding(String),

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Transport failure talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Address lookup failed for {host}: {reason}")]
    LookupFailed { host: String, reason: String },
}

impl DomainError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TransportTimeout { .. })
    }

    /// Socket-level failures, as opposed to timeouts or undecodable replies.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportTimeout { .. } | Self::TransportIo { .. })
    }
}
