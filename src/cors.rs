//! Cross-origin request policy.
//!
//! Development mode permits everything; production permits same-origin
//! requests, an explicit allow-list, and hosts under trusted suffixes.

use crate::config::{CorsConfig, Environment};

#[derive(Debug, Clone)]
pub struct OriginPolicy {
    environment: Environment,
    allowed_origins: Vec<String>,
    trusted_suffixes: Vec<String>,
}

impl OriginPolicy {
    pub fn new(environment: Environment, cors: &CorsConfig) -> Self {
        Self {
            environment,
            allowed_origins: cors.allowed_origins.clone(),
            trusted_suffixes: cors
                .trusted_suffixes
                .iter()
                .map(|s| normalize_suffix(s))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Decide whether a request with this `Origin` header may be served
    /// cross-origin. `None` means same-origin or a non-browser client.
    pub fn permits(&self, origin: Option<&str>) -> bool {
        if !self.environment.is_production() {
            tracing::debug!(origin = origin.unwrap_or("-"), "CORS: development mode, origin permitted");
            return true;
        }

        let Some(origin) = origin else {
            tracing::debug!("CORS: no origin header, request permitted");
            return true;
        };

        if self.allowed_origins.iter().any(|o| o == origin) {
            tracing::debug!(%origin, "CORS: origin on allow-list");
            return true;
        }

        if let Some(host) = origin_host(origin) {
            if self
                .trusted_suffixes
                .iter()
                .any(|suffix| host_matches_suffix(host, suffix))
            {
                tracing::debug!(%origin, "CORS: origin host under trusted suffix");
                return true;
            }
        }

        tracing::warn!(%origin, "CORS: origin denied");
        false
    }
}

/// Extract the hostname from an origin value (`scheme://host[:port]`).
fn origin_host(origin: &str) -> Option<&str> {
    let rest = origin
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(origin);
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(rest)
        .split(':')
        .next()
        .unwrap_or("");

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Suffix match on whole DNS labels, never substring containment.
fn host_matches_suffix(host: &str, suffix: &str) -> bool {
    host == suffix || host.ends_with(&format!(".{}", suffix))
}

fn normalize_suffix(suffix: &str) -> String {
    suffix
        .trim()
        .trim_start_matches("*.")
        .trim_start_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prod_policy() -> OriginPolicy {
        OriginPolicy::new(
            Environment::Production,
            &CorsConfig {
                allowed_origins: vec![
                    "https://faiz786-lada.github.io".to_string(),
                    "http://localhost:3000".to_string(),
                ],
                trusted_suffixes: vec!["github.io".to_string(), "onrender.com".to_string()],
            },
        )
    }

    fn dev_policy() -> OriginPolicy {
        OriginPolicy::new(
            Environment::Development,
            &CorsConfig {
                allowed_origins: vec![],
                trusted_suffixes: vec![],
            },
        )
    }

    #[test]
    fn development_permits_any_origin() {
        let policy = dev_policy();
        assert!(policy.permits(Some("https://anything.example")));
        assert!(policy.permits(Some("http://evil.test")));
        assert!(policy.permits(None));
    }

    #[test]
    fn production_permits_absent_origin() {
        assert!(prod_policy().permits(None));
    }

    #[test]
    fn production_permits_allow_listed_origins() {
        let policy = prod_policy();
        assert!(policy.permits(Some("https://faiz786-lada.github.io")));
        assert!(policy.permits(Some("http://localhost:3000")));
    }

    #[test]
    fn production_permits_hosts_under_trusted_suffix() {
        let policy = prod_policy();
        assert!(policy.permits(Some("https://someone-else.github.io")));
        assert!(policy.permits(Some("https://my-app.onrender.com")));
    }

    #[test]
    fn suffix_match_is_not_substring_match() {
        let policy = prod_policy();
        assert!(!policy.permits(Some("https://evil.github.io.attacker.com")));
        assert!(!policy.permits(Some("https://evilgithub.io")));
        assert!(!policy.permits(Some("https://github.io.evil.test")));
    }

    #[test]
    fn production_denies_unknown_origins() {
        let policy = prod_policy();
        assert!(!policy.permits(Some("https://evil.test")));
        assert!(!policy.permits(Some("http://localhost:9999")));
    }

    #[test]
    fn bare_suffix_as_host_is_permitted() {
        assert!(prod_policy().permits(Some("https://github.io")));
    }

    #[test]
    fn host_extraction_strips_scheme_and_port() {
        assert_eq!(origin_host("https://a.example:8443"), Some("a.example"));
        assert_eq!(origin_host("http://localhost:3000"), Some("localhost"));
        assert_eq!(origin_host("null"), Some("null"));
        assert_eq!(origin_host("https://"), None);
    }

    #[test]
    fn configured_wildcards_are_normalized() {
        let policy = OriginPolicy::new(
            Environment::Production,
            &CorsConfig {
                allowed_origins: vec![],
                trusted_suffixes: vec!["*.example.org".to_string()],
            },
        );
        assert!(policy.permits(Some("https://app.example.org")));
        assert!(!policy.permits(Some("https://evilexample.org")));
    }
}
