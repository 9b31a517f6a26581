use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::errors::ConfigError;

/// Bootstrap server for the root-path delegation walk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RootHint {
    pub name: String,

    pub ipv4: Ipv4Addr,

    pub ipv6: Ipv6Addr,
}

impl Default for RootHint {
    fn default() -> Self {
        Self {
            name: "a.root-servers.net".to_string(),
            ipv4: Ipv4Addr::new(198, 41, 0, 4),
            ipv6: Ipv6Addr::new(0x2001, 0x503, 0xba3e, 0, 0, 0, 0x2, 0x30),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Ceiling for a single UDP exchange.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Destination port of every exchange.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub root_hint: RootHint,

    /// Resolver addresses for the local delegation walk. Empty means read
    /// them from `resolv_conf_path`.
    #[serde(default)]
    pub local_resolvers: Vec<String>,

    #[serde(default = "default_resolv_conf_path")]
    pub resolv_conf_path: String,

    /// Retry through the local recursive resolvers when the authoritative
    /// walk finds nothing.
    #[serde(default)]
    pub system_fallback: bool,

    /// Wall-clock cap for one public operation. Unset means no cap.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            port: default_port(),
            root_hint: RootHint::default(),
            local_resolvers: Vec::new(),
            resolv_conf_path: default_resolv_conf_path(),
            system_fallback: false,
            deadline_ms: None,
        }
    }
}

impl ResolverConfig {
    /// Parse `local_resolvers`, accepting `%scope` suffixes on IPv6 literals.
    pub fn parsed_local_resolvers(&self) -> Result<Vec<IpAddr>, ConfigError> {
        self.local_resolvers
            .iter()
            .map(|raw| {
                let literal = raw.split('%').next().unwrap_or(raw).trim();
                literal.parse::<IpAddr>().map_err(|e| {
                    ConfigError::Validation(format!("Invalid local resolver '{}': {}", raw, e))
                })
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::Validation("port cannot be 0".to_string()));
        }

        if self.root_hint.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "root_hint.name cannot be empty".to_string(),
            ));
        }

        if self.deadline_ms == Some(0) {
            return Err(ConfigError::Validation(
                "deadline_ms must be greater than 0 when set".to_string(),
            ));
        }

        self.parsed_local_resolvers()?;
        Ok(())
    }
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_port() -> u16 {
    53
}

fn default_resolv_conf_path() -> String {
    "/etc/resolv.conf".to_string()
}
