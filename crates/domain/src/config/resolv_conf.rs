//! Import of the system `resolv.conf`.
//!
//! Only the directives meaningful to a single-server IPv4 stub resolver are
//! read: the first IPv4 `nameserver`, the last `domain`/`search` directive
//! (first entry only), and the `timeout:` and `attempts:` options.

use std::net::IpAddr;

use super::resolver::ResolverSettings;

impl ResolverSettings {
    pub fn from_resolv_conf(content: &str) -> Self {
        let mut settings = Self::default();

        for line in content.lines() {
            let line = line.split(['#', ';']).next().unwrap_or_default();
            let mut fields = line.split_whitespace();

            match fields.next() {
                Some("nameserver") => {
                    if settings.nameserver.is_some() {
                        continue;
                    }
                    if let Some(Ok(ip @ IpAddr::V4(_))) = fields.next().map(str::parse::<IpAddr>) {
                        settings.nameserver = Some(ip);
                    }
                }
                // domain and search override each other; the last one wins
                Some("domain") | Some("search") => {
                    settings.search = fields
                        .next()
                        .map(|s| s.trim_end_matches('.'))
                        .filter(|s| !s.is_empty())
                        .map(str::to_string);
                }
                Some("options") => {
                    for option in fields {
                        if let Some(secs) = option.strip_prefix("timeout:") {
                            if let Ok(secs) = secs.parse::<u64>() {
                                settings.min_wait_ms = secs.clamp(1, 30) * 1000;
                            }
                        } else if let Some(attempts) = option.strip_prefix("attempts:") {
                            if let Ok(attempts) = attempts.parse::<u32>() {
                                settings.attempts = attempts.clamp(1, 5);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        settings
    }
}
