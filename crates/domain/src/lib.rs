//! Ferrous AuthDNS Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod limits;
pub mod nameserver;
pub mod query_options;
pub mod resolve_error;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig, RootHint};
pub use dns_message::{DnsMessage, ResponseCode};
pub use dns_record::{DnsRecord, RecordType};
pub use errors::DomainError;
pub use limits::{MAX_CNAME_STEPS, MAX_DOMAIN_LEVELS, MAX_NAMESERVERS};
pub use nameserver::{AddressSource, Nameserver, NsInfo};
pub use query_options::QueryOptions;
pub use resolve_error::{ResolveError, ResolveErrorCode};
