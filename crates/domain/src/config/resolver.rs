use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::retry_policy::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

/// Standard DNS service port.
pub const DNS_PORT: u16 = 53;

/// Longest search suffix accepted, in presentation form.
const MAX_SUFFIX_LEN: usize = 253;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Name server queried for every lookup. `None` leaves the resolver unconfigured.
    #[serde(default)]
    pub nameserver: Option<IpAddr>,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Appended to single-label host names.
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Receive timeout of the first attempt; doubled on every retransmission.
    #[serde(default = "default_min_wait_ms")]
    pub min_wait_ms: u64,

    /// Directly attached IPv4 networks; addresses inside them classify as on-link.
    #[serde(default)]
    pub links: Vec<LinkSettings>,
}

/// One attached network and the interface scope it is reachable through.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LinkSettings {
    /// IPv4 network in CIDR form, e.g. `192.168.1.0/24`.
    pub network: String,

    #[serde(default = "default_link_scope")]
    pub scope_id: u32,
}

impl LinkSettings {
    pub fn validate(&self) -> Result<(), String> {
        let invalid = || format!("Invalid link network '{}'", self.network);

        let (address, prefix) = self.network.split_once('/').ok_or_else(invalid)?;
        address.parse::<Ipv4Addr>().map_err(|_| invalid())?;
        match prefix.parse::<u8>() {
            Ok(len) if len <= 32 => {}
            _ => return Err(invalid()),
        }
        if self.scope_id == 0 {
            return Err(format!("Link {} needs a non-zero scope_id", self.network));
        }
        Ok(())
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            nameserver: None,
            port: default_port(),
            search: None,
            attempts: default_attempts(),
            min_wait_ms: default_min_wait_ms(),
            links: Vec::new(),
        }
    }
}

impl ResolverSettings {
    pub fn with_nameserver(nameserver: IpAddr) -> Self {
        Self {
            nameserver: Some(nameserver),
            ..Self::default()
        }
    }

    pub fn name_server(&self) -> Option<SocketAddr> {
        self.nameserver.map(|ip| SocketAddr::new(ip, self.port))
    }

    /// The search suffix, ignoring an empty string.
    pub fn search_suffix(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.attempts, Duration::from_millis(self.min_wait_ms))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Name server port cannot be 0".to_string());
        }
        if !(1..=16).contains(&self.attempts) {
            return Err(format!(
                "attempts must be between 1 and 16, got {}",
                self.attempts
            ));
        }
        if self.min_wait_ms == 0 {
            return Err("min_wait_ms must be greater than 0".to_string());
        }
        if let Some(search) = &self.search {
            if search.is_empty() || search.len() > MAX_SUFFIX_LEN {
                return Err(format!("Invalid search suffix '{}'", search));
            }
        }
        for link in &self.links {
            link.validate()?;
        }
        Ok(())
    }
}

fn default_port() -> u16 {
    DNS_PORT
}

fn default_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_min_wait_ms() -> u64 {
    1000
}

fn default_link_scope() -> u32 {
    1
}
