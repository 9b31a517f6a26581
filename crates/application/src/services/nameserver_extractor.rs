use ferrous_authdns_domain::domain_name::normalize;
use ferrous_authdns_domain::{DnsRecord, Nameserver, RecordType, MAX_NAMESERVERS};
use std::net::IpAddr;

/// Builds the candidate nameserver list for a zone cut from a response.
pub struct NameserverExtractor;

impl NameserverExtractor {
    /// NS targets delegated for `zone`, in first-seen order, capped at
    /// `MAX_NAMESERVERS`. Glue A/AAAA records found in the same record set
    /// become known addresses; anything else is looked up on demand.
    pub fn extract<'a, I>(zone: &str, records: I) -> Vec<Nameserver>
    where
        I: IntoIterator<Item = &'a DnsRecord>,
    {
        let zone = normalize(zone);
        let records: Vec<&DnsRecord> = records.into_iter().collect();
        let mut nameservers: Vec<Nameserver> = Vec::with_capacity(MAX_NAMESERVERS);

        for record in records
            .iter()
            .filter(|r| r.record_type == RecordType::NS && normalize(&r.name) == zone)
        {
            if nameservers.len() == MAX_NAMESERVERS {
                break;
            }

            let target = normalize(&record.data);
            if target.is_empty() || nameservers.iter().any(|ns| ns.name == target) {
                continue;
            }

            let mut nameserver = Nameserver::unresolved(target.clone());
            if let Some(ip) = Self::glue(&records, &target, RecordType::A) {
                nameserver = nameserver.with_ipv4(ip);
            }
            if let Some(ip) = Self::glue(&records, &target, RecordType::AAAA) {
                nameserver = nameserver.with_ipv6(ip);
            }
            nameservers.push(nameserver);
        }

        nameservers
    }

    fn glue(records: &[&DnsRecord], host: &str, record_type: RecordType) -> Option<IpAddr> {
        records
            .iter()
            .filter(|r| r.record_type == record_type && normalize(&r.name) == host)
            .find_map(|r| r.data.parse::<IpAddr>().ok())
            .filter(|ip| match record_type {
                RecordType::A => ip.is_ipv4(),
                _ => ip.is_ipv6(),
            })
    }
}
