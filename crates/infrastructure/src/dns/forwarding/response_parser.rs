use super::record_type_map::RecordTypeMapper;
use ferrous_authdns_domain::domain_name::normalize;
use ferrous_authdns_domain::{DnsMessage, DnsRecord, DomainError, ResponseCode};
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a reply into a `DnsMessage`. Only A, AAAA, NS and CNAME records
    /// are kept; names are normalised.
    pub fn parse(response_bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = ResponseCode::from_u16(u16::from(message.response_code()));
        let parsed = DnsMessage {
            id: message.id(),
            is_response: message.message_type() == MessageType::Response,
            rcode,
            answers: Self::convert(message.answers()),
            authorities: Self::convert(message.name_servers()),
            additionals: Self::convert(message.additionals()),
        };

        debug!(
            id = parsed.id,
            rcode = %parsed.rcode,
            answers = parsed.answers.len(),
            authority = parsed.authorities.len(),
            additional = parsed.additionals.len(),
            "DNS response parsed"
        );

        Ok(parsed)
    }

    fn convert(records: &[Record]) -> Vec<DnsRecord> {
        records.iter().filter_map(Self::convert_record).collect()
    }

    fn convert_record(record: &Record) -> Option<DnsRecord> {
        let record_type = RecordTypeMapper::from_hickory(record.record_type())?;
        let data = match record.data() {
            RData::A(a) => a.0.to_string(),
            RData::AAAA(aaaa) => aaaa.0.to_string(),
            RData::NS(ns) => normalize(&ns.to_utf8()),
            RData::CNAME(canonical) => normalize(&canonical.to_utf8()),
            _ => return None,
        };

        Some(DnsRecord::new(
            normalize(&record.name().to_utf8()),
            record_type,
            record.ttl(),
            data,
        ))
    }
}
