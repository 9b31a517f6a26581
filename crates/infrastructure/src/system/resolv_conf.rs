//! `/etc/resolv.conf` reader for the local recursive resolver list.

use resolv_conf::{Config as ResolveConfig, ScopedIp};
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, warn};

/// `nameserver` entries in file order. A missing or unreadable file gives
/// an empty list.
pub fn load_nameservers(path: impl AsRef<Path>) -> Vec<IpAddr> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let nameservers = parse_nameservers(&content);
            debug!(path = %path.display(), count = nameservers.len(), "Loaded system resolvers");
            nameservers
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read resolver configuration");
            Vec::new()
        }
    }
}

/// A file `resolv_conf` rejects gives an empty list, like a missing one.
pub fn parse_nameservers(content: &str) -> Vec<IpAddr> {
    match ResolveConfig::parse(content) {
        Ok(config) => config
            .nameservers
            .into_iter()
            .map(|nameserver| match nameserver {
                ScopedIp::V4(ip) => IpAddr::V4(ip),
                // Zone ids (fe80::1%eth0) are dropped.
                ScopedIp::V6(ip, _) => IpAddr::V6(ip),
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "Malformed resolver configuration");
            Vec::new()
        }
    }
}
