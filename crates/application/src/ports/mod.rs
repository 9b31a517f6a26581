mod address_lookup;
mod dns_exchange;

pub use address_lookup::AddressLookup;
pub use dns_exchange::DnsExchange;
