use crate::services::{CnameResolver, RecordTarget, ResolutionState, SystemFallback};
use ferrous_authdns_domain::domain_name::{normalize, same_name};
use ferrous_authdns_domain::{DnsRecord, NsInfo, RecordType, ResolveError, ResolveErrorCode};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Public entry points of the authoritative resolver.
///
/// Every call starts from a fresh `ResolutionState`; nothing is cached or
/// shared between calls.
pub struct ResolveRecordUseCase {
    resolver: Arc<CnameResolver>,
    fallback: Option<SystemFallback>,
    deadline: Option<Duration>,
}

impl ResolveRecordUseCase {
    pub fn new(resolver: Arc<CnameResolver>) -> Self {
        Self {
            resolver,
            fallback: None,
            deadline: None,
        }
    }

    pub fn with_system_fallback(mut self, fallback: SystemFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Succeeds only if the CNAME chain from `domain` ends at `expected_target`.
    #[instrument(skip(self))]
    pub async fn verify_cname(
        &self,
        domain: &str,
        expected_target: &str,
    ) -> Result<DnsRecord, ResolveError> {
        self.within_deadline(domain, self.verify_cname_inner(domain, expected_target))
            .await
    }

    #[instrument(skip(self))]
    pub async fn query_a(&self, domain: &str) -> Result<DnsRecord, ResolveError> {
        self.within_deadline(domain, self.query_type(domain, RecordType::A))
            .await
    }

    #[instrument(skip(self))]
    pub async fn query_aaaa(&self, domain: &str) -> Result<DnsRecord, ResolveError> {
        self.within_deadline(domain, self.query_type(domain, RecordType::AAAA))
            .await
    }

    #[instrument(skip(self))]
    pub async fn authoritative_nameservers(&self, domain: &str) -> Result<NsInfo, ResolveError> {
        self.within_deadline(domain, self.resolver.authoritative_nameservers(domain))
            .await
    }

    async fn verify_cname_inner(
        &self,
        domain: &str,
        expected_target: &str,
    ) -> Result<DnsRecord, ResolveError> {
        let expected = normalize(expected_target);
        let target = RecordTarget::with_value(RecordType::CNAME, expected.clone());
        let mut state = ResolutionState::new();

        let outcome = self.resolver.resolve(domain, &target, &mut state).await;

        match outcome {
            Ok(record) if same_name(&record.data, &expected) => {
                info!(domain = %domain, target = %record.data, "CNAME verified");
                Ok(record)
            }
            Ok(record) => Err(Self::mismatch(domain, &expected, &record.data)),
            Err(err) => match state.last_cname() {
                Some(last) if Self::chain_reached_dead_end(&err) => {
                    Err(Self::mismatch(domain, &expected, &last.data))
                }
                _ => self.fall_back(domain, &target, err).await,
            },
        }
    }

    async fn query_type(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<DnsRecord, ResolveError> {
        let target = RecordTarget::of_type(record_type);
        let mut state = ResolutionState::new();

        match self.resolver.resolve(domain, &target, &mut state).await {
            Ok(record) => {
                info!(domain = %domain, record_type = %record_type, data = %record.data, "Record resolved");
                Ok(record)
            }
            Err(err) => self.fall_back(domain, &target, err).await,
        }
    }

    async fn fall_back(
        &self,
        domain: &str,
        target: &RecordTarget,
        err: ResolveError,
    ) -> Result<DnsRecord, ResolveError> {
        let Some(fallback) = &self.fallback else {
            return Err(err);
        };
        if !err.allows_fallback() {
            return Err(err);
        }

        debug!(domain = %domain, code = %err.code, "Trying system resolver fallback");
        fallback.lookup(domain, target).await.ok_or(err)
    }

    async fn within_deadline<T, F>(&self, domain: &str, operation: F) -> Result<T, ResolveError>
    where
        F: Future<Output = Result<T, ResolveError>>,
    {
        let Some(deadline) = self.deadline else {
            return operation.await;
        };

        match tokio::time::timeout(deadline, operation).await {
            Ok(result) => result,
            Err(_) => {
                warn!(domain = %domain, deadline_ms = deadline.as_millis() as u64, "Resolution deadline exceeded");
                Err(ResolveError::new(
                    ResolveErrorCode::Timeout,
                    format!("Resolution exceeded {}ms", deadline.as_millis()),
                )
                .with_domain(domain))
            }
        }
    }

    /// The chain was followed at least once but went nowhere useful.
    fn chain_reached_dead_end(err: &ResolveError) -> bool {
        matches!(
            err.code,
            ResolveErrorCode::NoRecord
                | ResolveErrorCode::DnsError
                | ResolveErrorCode::NoAuthoritativeNs
        )
    }

    fn mismatch(domain: &str, expected: &str, actual: &str) -> ResolveError {
        ResolveError::new(
            ResolveErrorCode::CnameMismatch,
            format!("CNAME of {} points to {}, expected {}", domain, actual, expected),
        )
        .with_domain(domain)
        .with_details(format!("actual={}", actual))
    }
}
