use super::RecordType;
use crate::domain_name::same_name;
use serde::Serialize;

/// Type-agnostic view of a string-valued record (A, AAAA, NS, CNAME).
///
/// `name` and, for NS/CNAME, `data` are kept in normalised form: lower-case
/// without the trailing root dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    pub ttl: u32,

    pub data: String,
}

impl DnsRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        ttl: u32,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data: data.into(),
        }
    }

    pub fn is_type(&self, record_type: RecordType) -> bool {
        self.record_type == record_type
    }

    /// Owner comparison ignores case and a trailing dot.
    pub fn is_owned_by(&self, name: &str) -> bool {
        same_name(&self.name, name)
    }
}

/// Keep only the records whose type is one of `types`, preserving order.
pub fn filter_by_types<'a, I>(records: I, types: &[RecordType]) -> Vec<DnsRecord>
where
    I: IntoIterator<Item = &'a DnsRecord>,
{
    records
        .into_iter()
        .filter(|record| types.contains(&record.record_type))
        .cloned()
        .collect()
}
