#![allow(dead_code)]
use ferrous_authdns_domain::{DnsMessage, DnsRecord, RecordType, ResponseCode};

pub struct DnsRecordBuilder {
    name: String,
    record_type: RecordType,
    ttl: u32,
    data: String,
}

impl DnsRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com".to_string(),
            record_type: RecordType::A,
            ttl: 300,
            data: "93.184.216.34".to_string(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn data(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    pub fn build(self) -> DnsRecord {
        DnsRecord::new(self.name, self.record_type, self.ttl, self.data)
    }
}

impl Default for DnsRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn noerror() -> DnsMessage {
    DnsMessage::response(0x1234, ResponseCode::NoError)
}
