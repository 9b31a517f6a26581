use super::failover_dispatcher::{Dispatch, FailoverDispatcher};
use super::local_delegation::LocalDelegationWalker;
use super::root_delegation::RootDelegationWalker;
use ferrous_authdns_domain::dns_record::filter_by_types;
use ferrous_authdns_domain::domain_name::{normalize, same_name};
use ferrous_authdns_domain::{
    DnsRecord, NsInfo, QueryOptions, RecordType, ResolveError, ResolveErrorCode, MAX_CNAME_STEPS,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// What a resolution is looking for: a record type, optionally with a
/// required data value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTarget {
    pub record_type: RecordType,
    pub value: Option<String>,
}

impl RecordTarget {
    pub fn of_type(record_type: RecordType) -> Self {
        Self {
            record_type,
            value: None,
        }
    }

    pub fn with_value(record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            record_type,
            value: Some(normalize(&value.into())),
        }
    }

    pub fn matches(&self, record: &DnsRecord) -> bool {
        record.record_type == self.record_type
            && self
                .value
                .as_deref()
                .map_or(true, |value| same_name(&record.data, value))
    }
}

/// Per-call CNAME bookkeeping. Created fresh for every top-level resolution.
#[derive(Debug, Default)]
pub struct ResolutionState {
    chain: Vec<String>,
    step: usize,
    last_cname: Option<DnsRecord>,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Names already left through a CNAME, in order.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// The last CNAME followed, if any.
    pub fn last_cname(&self) -> Option<&DnsRecord> {
        self.last_cname.as_ref()
    }

    /// Records the hop `current → cname.data`, enforcing loop and step limits.
    fn follow(&mut self, current: &str, cname: &DnsRecord) -> Result<String, ResolveError> {
        let next = normalize(&cname.data);

        if self.chain.iter().any(|seen| seen == current) {
            return Err(self.loop_error(current, &next));
        }
        self.chain.push(current.to_string());
        self.last_cname = Some(cname.clone());

        if self.chain.iter().any(|seen| *seen == next) {
            return Err(self.loop_error(current, &next));
        }

        if self.step + 1 > MAX_CNAME_STEPS {
            return Err(ResolveError::new(
                ResolveErrorCode::MaxCnameStepsExceeded,
                format!("CNAME chain exceeds {} steps", MAX_CNAME_STEPS),
            )
            .with_domain(current)
            .with_details(format!("chain: {} -> {}", self.chain.join(" -> "), next)));
        }

        self.step += 1;
        Ok(next)
    }

    fn loop_error(&self, current: &str, next: &str) -> ResolveError {
        ResolveError::new(
            ResolveErrorCode::CnameLoop,
            format!("CNAME loop detected: {} already visited", next),
        )
        .with_domain(current)
        .with_details(format!("chain: {} -> {}", self.chain.join(" -> "), next))
    }
}

/// Finds the authoritative servers for a name, asks them for the target
/// type and follows CNAMEs until the target is found.
pub struct CnameResolver {
    dispatcher: Arc<FailoverDispatcher>,
    local: LocalDelegationWalker,
    root: RootDelegationWalker,
}

impl CnameResolver {
    pub fn new(
        dispatcher: Arc<FailoverDispatcher>,
        local: LocalDelegationWalker,
        root: RootDelegationWalker,
    ) -> Self {
        Self {
            dispatcher,
            local,
            root,
        }
    }

    /// Local resolvers first, then the root walk.
    #[instrument(skip(self))]
    pub async fn authoritative_nameservers(&self, domain: &str) -> Result<NsInfo, ResolveError> {
        let found = match self.local.discover(domain).await? {
            Some(info) => Some(info),
            None => self.root.discover(domain).await?,
        };

        match found {
            Some(info) if !info.is_empty() => {
                debug!(zone = %info.zone, nameservers = info.nameservers.len(), "Authoritative nameservers");
                Ok(info)
            }
            _ => Err(ResolveError::no_authoritative_ns(domain)),
        }
    }

    pub async fn resolve(
        &self,
        domain: &str,
        target: &RecordTarget,
        state: &mut ResolutionState,
    ) -> Result<DnsRecord, ResolveError> {
        let mut current = normalize(domain);

        loop {
            let ns_info = self.authoritative_nameservers(&current).await?;

            let served = match self
                .dispatcher
                .dispatch(
                    &current,
                    target.record_type,
                    &ns_info.nameservers,
                    QueryOptions::recursive(),
                )
                .await
            {
                Dispatch::Answered(served) => served,
                Dispatch::Rejected {
                    nameserver, rcode, ..
                } => {
                    return Err(ResolveError::new(
                        ResolveErrorCode::DnsError,
                        format!("DNS server {} returned {}", nameserver, rcode),
                    )
                    .with_domain(current.as_str())
                    .with_details(format!("rcode={}", rcode)));
                }
                Dispatch::Exhausted => {
                    return Err(ResolveError::no_record(
                        &current,
                        format!(
                            "All authoritative servers for {} failed to answer {}",
                            ns_info.zone, target.record_type
                        ),
                    ));
                }
            };

            let message = served.message;
            if message.rcode.is_definitive_error() {
                return Err(ResolveError::new(
                    ResolveErrorCode::DnsError,
                    format!("DNS server {} returned {}", served.nameserver, message.rcode),
                )
                .with_domain(current.as_str())
                .with_details(format!("rcode={}", message.rcode)));
            }
            if !message.is_noerror() {
                return Err(ResolveError::new(ResolveErrorCode::DnsError, "Unknown DNS response")
                    .with_domain(current.as_str())
                    .with_details(format!("rcode={}", message.rcode)));
            }

            let records = filter_by_types(
                message.answer_records(),
                &[RecordType::CNAME, target.record_type],
            );

            // Records owned by other names (glue, unrelated chain links) never
            // answer for `current`.
            let owned: Vec<&DnsRecord> = records
                .iter()
                .filter(|r| r.is_owned_by(&current))
                .collect();

            if let Some(found) = owned.iter().copied().find(|r| target.matches(r)) {
                debug!(
                    domain = %current,
                    record_type = %found.record_type,
                    data = %found.data,
                    step = state.step(),
                    "Target record found"
                );
                return Ok(found.clone());
            }

            let Some(cname) = owned.iter().copied().find(|r| r.is_type(RecordType::CNAME)) else {
                return Err(ResolveError::no_record(
                    &current,
                    format!("No {} or CNAME record found for {}", target.record_type, current),
                ));
            };

            let next = state.follow(&current, cname)?;
            debug!(from = %current, to = %next, step = state.step(), "Following CNAME");
            current = next;
        }
    }
}
