#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_authdns_application::ports::{AddressLookup, DnsExchange};
use ferrous_authdns_application::services::{
    CnameResolver, FailoverDispatcher, LocalDelegationWalker, RootDelegationWalker, SystemFallback,
};
use ferrous_authdns_application::use_cases::ResolveRecordUseCase;
use ferrous_authdns_domain::{
    DnsMessage, DnsRecord, DomainError, QueryOptions, RecordType, ResponseCode, RootHint,
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub const ROOT_V4: Ipv4Addr = Ipv4Addr::new(198, 41, 0, 4);
pub const TLD_NS: &str = "a.gtld-servers.net";
pub const TLD_V4: &str = "192.5.6.30";
pub const EXAMPLE_NS: &str = "ns1.example.com";
pub const EXAMPLE_V4: &str = "192.0.2.53";

type QueryKey = (IpAddr, String, RecordType);

/// Scripted authoritative servers. Unscripted queries time out.
#[derive(Clone, Default)]
pub struct MockDnsExchange {
    responses: Arc<RwLock<HashMap<QueryKey, Result<DnsMessage, DomainError>>>>,
    calls: Arc<RwLock<Vec<QueryKey>>>,
    call_count: Arc<AtomicUsize>,
    latency: Arc<RwLock<Option<Duration>>>,
}

impl MockDnsExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, server: &str, name: &str, record_type: RecordType, message: DnsMessage) {
        self.responses
            .write()
            .unwrap()
            .insert(key(server, name, record_type), Ok(message));
    }

    pub fn set_error(&self, server: &str, name: &str, record_type: RecordType, error: DomainError) {
        self.responses
            .write()
            .unwrap()
            .insert(key(server, name, record_type), Err(error));
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.write().unwrap() = Some(latency);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<QueryKey> {
        self.calls.read().unwrap().clone()
    }

    pub fn servers_asked(&self, name: &str, record_type: RecordType) -> Vec<IpAddr> {
        self.calls()
            .into_iter()
            .filter(|(_, n, t)| n == name && *t == record_type)
            .map(|(server, _, _)| server)
            .collect()
    }
}

#[async_trait]
impl DnsExchange for MockDnsExchange {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        server: IpAddr,
        _options: QueryOptions,
    ) -> Result<DnsMessage, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls
            .write()
            .unwrap()
            .push((server, name.to_string(), record_type));

        let latency = *self.latency.read().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let scripted = self
            .responses
            .read()
            .unwrap()
            .get(&(server, name.to_string(), record_type))
            .cloned();
        scripted.unwrap_or_else(|| {
            Err(DomainError::TransportTimeout {
                server: server.to_string(),
            })
        })
    }
}

#[derive(Clone, Default)]
pub struct MockAddressLookup {
    ipv4: Arc<RwLock<HashMap<String, Result<Option<Ipv4Addr>, DomainError>>>>,
    ipv6: Arc<RwLock<HashMap<String, Result<Option<Ipv6Addr>, DomainError>>>>,
}

impl MockAddressLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ipv4(&self, host: &str, result: Result<Option<Ipv4Addr>, DomainError>) {
        self.ipv4.write().unwrap().insert(host.to_string(), result);
    }

    pub fn set_ipv6(&self, host: &str, result: Result<Option<Ipv6Addr>, DomainError>) {
        self.ipv6.write().unwrap().insert(host.to_string(), result);
    }
}

#[async_trait]
impl AddressLookup for MockAddressLookup {
    async fn lookup_ipv4(&self, host: &str) -> Result<Option<Ipv4Addr>, DomainError> {
        self.ipv4
            .read()
            .unwrap()
            .get(host)
            .cloned()
            .unwrap_or(Ok(None))
    }

    async fn lookup_ipv6(&self, host: &str) -> Result<Option<Ipv6Addr>, DomainError> {
        self.ipv6
            .read()
            .unwrap()
            .get(host)
            .cloned()
            .unwrap_or(Ok(None))
    }
}

fn key(server: &str, name: &str, record_type: RecordType) -> QueryKey {
    (server.parse().unwrap(), name.to_string(), record_type)
}

pub fn root_hint() -> RootHint {
    RootHint {
        name: "a.root-servers.net".to_string(),
        ipv4: ROOT_V4,
        ipv6: "2001:503:ba3e::2:30".parse().unwrap(),
    }
}

// ── Message builders ───────────────────────────────────────────────────────

/// NS set for `zone` in the authority section, glue A records in additionals.
pub fn referral(zone: &str, nameservers: &[(&str, &str)]) -> DnsMessage {
    let authorities = nameservers
        .iter()
        .map(|(name, _)| DnsRecord::new(zone, RecordType::NS, 172800, *name))
        .collect();
    let glue = nameservers
        .iter()
        .filter(|(_, ip)| !ip.is_empty())
        .map(|(name, ip)| DnsRecord::new(*name, RecordType::A, 172800, *ip))
        .collect();
    DnsMessage::response(0, ResponseCode::NoError)
        .with_authorities(authorities)
        .with_additionals(glue)
}

/// NS set for `zone` in the answer section, as a recursive resolver returns it.
pub fn ns_answer(zone: &str, nameservers: &[(&str, &str)]) -> DnsMessage {
    let referral = referral(zone, nameservers);
    DnsMessage::response(0, ResponseCode::NoError)
        .with_answers(referral.authorities)
        .with_additionals(referral.additionals)
}

pub fn answer(records: Vec<DnsRecord>) -> DnsMessage {
    DnsMessage::response(0, ResponseCode::NoError).with_answers(records)
}

pub fn a(name: &str, ip: &str) -> DnsRecord {
    DnsRecord::new(name, RecordType::A, 300, ip)
}

pub fn aaaa(name: &str, ip: &str) -> DnsRecord {
    DnsRecord::new(name, RecordType::AAAA, 300, ip)
}

pub fn cname(name: &str, target: &str) -> DnsRecord {
    DnsRecord::new(name, RecordType::CNAME, 300, target)
}

pub fn rcode(code: ResponseCode) -> DnsMessage {
    DnsMessage::response(0, code)
}

// ── Scenario wiring ────────────────────────────────────────────────────────

/// Root delegates `com` to the gTLD server, which delegates `example.com`
/// to ns1.example.com.
pub fn script_example_com(exchange: &MockDnsExchange) {
    exchange.set_response(
        &ROOT_V4.to_string(),
        "com",
        RecordType::NS,
        referral("com", &[(TLD_NS, TLD_V4)]),
    );
    exchange.set_response(
        TLD_V4,
        "example.com",
        RecordType::NS,
        referral("example.com", &[(EXAMPLE_NS, EXAMPLE_V4)]),
    );
}

pub struct Harness {
    pub exchange: MockDnsExchange,
    pub lookup: MockAddressLookup,
    pub dispatcher: Arc<FailoverDispatcher>,
    local_resolvers: Vec<IpAddr>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_local_resolvers(&[])
    }

    pub fn with_local_resolvers(resolvers: &[&str]) -> Self {
        let exchange = MockDnsExchange::new();
        let lookup = MockAddressLookup::new();
        let dispatcher = Arc::new(FailoverDispatcher::new(
            Arc::new(exchange.clone()),
            Arc::new(lookup.clone()),
        ));
        Self {
            exchange,
            lookup,
            dispatcher,
            local_resolvers: resolvers.iter().map(|r| r.parse().unwrap()).collect(),
        }
    }

    pub fn local_walker(&self) -> LocalDelegationWalker {
        LocalDelegationWalker::new(self.dispatcher.clone(), &self.local_resolvers)
    }

    pub fn root_walker(&self) -> RootDelegationWalker {
        RootDelegationWalker::new(self.dispatcher.clone(), &root_hint())
    }

    pub fn resolver(&self) -> Arc<CnameResolver> {
        Arc::new(CnameResolver::new(
            self.dispatcher.clone(),
            self.local_walker(),
            self.root_walker(),
        ))
    }

    pub fn use_case(&self) -> ResolveRecordUseCase {
        ResolveRecordUseCase::new(self.resolver())
    }

    pub fn use_case_with_fallback(&self) -> ResolveRecordUseCase {
        self.use_case().with_system_fallback(SystemFallback::new(
            self.dispatcher.clone(),
            &self.local_resolvers,
        ))
    }
}
