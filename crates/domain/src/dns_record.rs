mod record;
mod record_type;

pub use record::{filter_by_types, DnsRecord};
pub use record_type::RecordType;
