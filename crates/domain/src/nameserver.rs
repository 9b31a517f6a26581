use std::fmt;
use std::net::IpAddr;

/// Where a nameserver's address of one family comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSource {
    /// Known up front: glue from the referral, or a hard-coded hint.
    Known(IpAddr),

    /// Resolved on demand with a forward lookup of this hostname.
    Lookup(String),

    /// No address of this family exists.
    Unavailable,
}

/// One candidate server for a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nameserver {
    pub name: String,

    pub ipv4: AddressSource,

    pub ipv6: AddressSource,
}

impl Nameserver {
    /// A nameserver with no glue: both families are looked up by name.
    pub fn unresolved(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ipv4: AddressSource::Lookup(name.clone()),
            ipv6: AddressSource::Lookup(name.clone()),
            name,
        }
    }

    /// A nameserver reachable at a literal address, e.g. a local resolver.
    pub fn at_address(address: IpAddr) -> Self {
        let (ipv4, ipv6) = match address {
            IpAddr::V4(_) => (AddressSource::Known(address), AddressSource::Unavailable),
            IpAddr::V6(_) => (AddressSource::Unavailable, AddressSource::Known(address)),
        };
        Self {
            name: address.to_string(),
            ipv4,
            ipv6,
        }
    }

    pub fn with_ipv4(mut self, address: IpAddr) -> Self {
        self.ipv4 = AddressSource::Known(address);
        self
    }

    pub fn with_ipv6(mut self, address: IpAddr) -> Self {
        self.ipv6 = AddressSource::Known(address);
        self
    }
}

impl fmt::Display for Nameserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The nameservers currently known to be authoritative for `zone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsInfo {
    pub zone: String,

    pub nameservers: Vec<Nameserver>,
}

impl NsInfo {
    pub fn new(zone: impl Into<String>, nameservers: Vec<Nameserver>) -> Self {
        Self {
            zone: zone.into(),
            nameservers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nameservers.is_empty()
    }
}
