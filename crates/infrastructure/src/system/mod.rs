pub mod address_lookup;
pub mod resolv_conf;

pub use address_lookup::SystemAddressLookup;
