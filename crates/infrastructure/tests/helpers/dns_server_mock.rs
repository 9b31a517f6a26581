#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS};
use hickory_proto::rr::{Name, RData, Record};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Canned reply for one (name, type) question.
#[derive(Clone, Default)]
pub struct Zone {
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
    rcode: Option<ResponseCode>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_a(mut self, name: &str, ip: Ipv4Addr) -> Self {
        self.answers.push(Record::from_rdata(fqdn(name), 300, RData::A(A(ip))));
        self
    }

    pub fn answer_aaaa(mut self, name: &str, ip: Ipv6Addr) -> Self {
        self.answers
            .push(Record::from_rdata(fqdn(name), 300, RData::AAAA(AAAA(ip))));
        self
    }

    pub fn answer_cname(mut self, name: &str, target: &str) -> Self {
        self.answers.push(Record::from_rdata(
            fqdn(name),
            300,
            RData::CNAME(CNAME(fqdn(target))),
        ));
        self
    }

    /// Referral: NS in authority, glue A in additional.
    pub fn delegate(mut self, zone: &str, ns: &str, glue: Ipv4Addr) -> Self {
        self.authorities.push(Record::from_rdata(
            fqdn(zone),
            172800,
            RData::NS(NS(fqdn(ns))),
        ));
        self.additionals
            .push(Record::from_rdata(fqdn(ns), 172800, RData::A(A(glue))));
        self
    }

    pub fn rcode(mut self, rcode: ResponseCode) -> Self {
        self.rcode = Some(rcode);
        self
    }
}

fn fqdn(name: &str) -> Name {
    let mut name = Name::from_str(name).unwrap();
    name.set_fqdn(true);
    name
}

/// Loopback UDP server answering from a table keyed by lowercase
/// `(name, type)`. Unknown questions get REFUSED.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(
        port: u16,
        zones: HashMap<(String, &'static str), Zone>,
    ) -> Result<Self, std::io::Error> {
        Self::start_with(port, zones, false).await
    }

    /// Replies with a wrong transaction ID to every query.
    pub async fn start_mismatched(port: u16) -> Result<Self, std::io::Error> {
        Self::start_with(port, HashMap::new(), true).await
    }

    async fn start_with(
        port: u16,
        zones: HashMap<(String, &'static str), Zone>,
        mismatch_id: bool,
    ) -> Result<Self, std::io::Error> {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let socket = UdpSocket::bind(addr).await?;
        let local_addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&buf[..len], &zones, mismatch_id) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_response(
        query: &[u8],
        zones: &HashMap<(String, &'static str), Zone>,
        mismatch_id: bool,
    ) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        let question = request.queries().first()?.clone();

        let id = if mismatch_id {
            request.id().wrapping_add(1)
        } else {
            request.id()
        };
        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_recursion_desired(request.recursion_desired());
        response.add_query(question.clone());

        let name = question
            .name()
            .to_utf8()
            .trim_end_matches('.')
            .to_lowercase();
        let key = (name, record_type_key(question.query_type()));

        match zones.get(&key) {
            Some(zone) => {
                response.set_response_code(zone.rcode.unwrap_or(ResponseCode::NoError));
                for record in &zone.answers {
                    response.add_answer(record.clone());
                }
                for record in &zone.authorities {
                    response.add_name_server(record.clone());
                }
                for record in &zone.additionals {
                    response.add_additional(record.clone());
                }
            }
            None => {
                response.set_response_code(ResponseCode::Refused);
            }
        }

        response.to_vec().ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn record_type_key(record_type: hickory_proto::rr::RecordType) -> &'static str {
    use hickory_proto::rr::RecordType;
    match record_type {
        RecordType::A => "A",
        RecordType::AAAA => "AAAA",
        RecordType::NS => "NS",
        RecordType::CNAME => "CNAME",
        _ => "OTHER",
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
