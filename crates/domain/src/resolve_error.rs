use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolveErrorCode {
    CnameLoop,
    Timeout,
    NoRecord,
    CnameMismatch,
    DnsError,
    MaxCnameStepsExceeded,
    NoAuthoritativeNs,
    DomainTooLong,
}

impl ResolveErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CnameLoop => "CNAME_LOOP",
            Self::Timeout => "TIMEOUT",
            Self::NoRecord => "NO_RECORD",
            Self::CnameMismatch => "CNAME_MISMATCH",
            Self::DnsError => "DNS_ERROR",
            Self::MaxCnameStepsExceeded => "MAX_CNAME_STEPS_EXCEEDED",
            Self::NoAuthoritativeNs => "NO_AUTHORITATIVE_NS",
            Self::DomainTooLong => "DOMAIN_TOO_LONG",
        }
    }
}

impl fmt::Display for ResolveErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only failure surfaced by the public resolver operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{code}: {message}")]
pub struct ResolveError {
    pub code: ResolveErrorCode,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ResolveError {
    pub fn new(code: ResolveErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            domain: None,
            details: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn domain_too_long(domain: &str, levels: usize, max: usize) -> Self {
        Self::new(
            ResolveErrorCode::DomainTooLong,
            format!("Domain level exceeds the limit of {}", max),
        )
        .with_domain(domain)
        .with_details(format!("levels={}", levels))
    }

    pub fn no_record(domain: &str, message: impl Into<String>) -> Self {
        Self::new(ResolveErrorCode::NoRecord, message).with_domain(domain)
    }

    pub fn no_authoritative_ns(domain: &str) -> Self {
        Self::new(
            ResolveErrorCode::NoAuthoritativeNs,
            format!("No authoritative nameservers found for {}", domain),
        )
        .with_domain(domain)
    }

    /// Whether the system-resolver fallback may still rescue this failure.
    pub fn allows_fallback(&self) -> bool {
        matches!(
            self.code,
            ResolveErrorCode::NoRecord
                | ResolveErrorCode::NoAuthoritativeNs
                | ResolveErrorCode::DnsError
        )
    }
}
