//! Request host parsing.
//!
//! Splits the HTTP `Host` header into the ordered subdomains and the
//! domain that tenant resolution works with. When the server is
//! configured with an application domain (e.g. `example.com`), any host
//! underneath it yields that domain and the leading labels as
//! subdomains; any other host is treated as a potential custom apex
//! domain.

/// The subdomain/domain decomposition of a request host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostParts {
    /// Leading host labels, outermost first (`["a", "b"]` for `a.b.example.com`).
    pub subdomains: Vec<String>,
    /// The domain the request targets (`example.com` or a custom apex).
    pub domain: String,
}

impl HostParts {
    /// Parses a `Host` header value against an optional application domain.
    ///
    /// The port suffix is ignored. With `app_domain` set, hosts equal to
    /// it or ending in it split at the boundary; other hosts fall back to
    /// the last two labels as the domain. Without `app_domain`, only the
    /// fallback applies.
    ///
    /// Returns `None` for an empty host.
    pub fn parse(host: &str, app_domain: Option<&str>) -> Option<HostParts> {
        let host = host.rsplit_once(':').map_or(host, |(name, port)| {
            // Only strip a real port suffix; IPv6 literals keep their colons.
            if port.chars().all(|c| c.is_ascii_digit()) {
                name
            } else {
                host
            }
        });
        let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() {
            return None;
        }

        if let Some(app_domain) = app_domain {
            let app_domain = app_domain.trim_end_matches('.').to_ascii_lowercase();
            if host == app_domain {
                return Some(HostParts {
                    subdomains: Vec::new(),
                    domain: app_domain,
                });
            }
            if let Some(prefix) = host.strip_suffix(&format!(".{app_domain}")) {
                return Some(HostParts {
                    subdomains: prefix.split('.').map(str::to_string).collect(),
                    domain: app_domain,
                });
            }
        }

        // Unknown suffix: assume the last two labels form the domain.
        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() <= 2 {
            return Some(HostParts {
                subdomains: Vec::new(),
                domain: host,
            });
        }
        let split = labels.len() - 2;
        Some(HostParts {
            subdomains: labels[..split].iter().map(|l| l.to_string()).collect(),
            domain: labels[split..].join("."),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(parts: &HostParts) -> Vec<&str> {
        parts.subdomains.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_apex_of_app_domain() {
        let parts = HostParts::parse("example.com", Some("example.com")).unwrap();
        assert!(parts.subdomains.is_empty());
        assert_eq!(parts.domain, "example.com");
    }

    #[test]
    fn test_subdomain_of_app_domain() {
        let parts = HostParts::parse("amazon.example.com", Some("example.com")).unwrap();
        assert_eq!(subs(&parts), ["amazon"]);
        assert_eq!(parts.domain, "example.com");
    }

    #[test]
    fn test_nested_subdomains_keep_order() {
        let parts = HostParts::parse("eu.amazon.example.com", Some("example.com")).unwrap();
        assert_eq!(subs(&parts), ["eu", "amazon"]);
    }

    #[test]
    fn test_custom_domain_outside_app_domain() {
        let parts = HostParts::parse("acme-corp.com", Some("example.com")).unwrap();
        assert!(parts.subdomains.is_empty());
        assert_eq!(parts.domain, "acme-corp.com");
    }

    #[test]
    fn test_custom_domain_with_www() {
        let parts = HostParts::parse("www.acme-corp.com", Some("example.com")).unwrap();
        assert_eq!(subs(&parts), ["www"]);
        assert_eq!(parts.domain, "acme-corp.com");
    }

    #[test]
    fn test_no_app_domain_uses_last_two_labels() {
        let parts = HostParts::parse("amazon.example.com", None).unwrap();
        assert_eq!(subs(&parts), ["amazon"]);
        assert_eq!(parts.domain, "example.com");
    }

    #[test]
    fn test_port_is_stripped() {
        let parts = HostParts::parse("amazon.example.com:8080", Some("example.com")).unwrap();
        assert_eq!(subs(&parts), ["amazon"]);
    }

    #[test]
    fn test_case_insensitive() {
        let parts = HostParts::parse("Amazon.Example.COM", Some("example.com")).unwrap();
        assert_eq!(subs(&parts), ["amazon"]);
        assert_eq!(parts.domain, "example.com");
    }

    #[test]
    fn test_empty_host() {
        assert_eq!(HostParts::parse("", Some("example.com")), None);
        assert_eq!(HostParts::parse("   ", None), None);
    }

    #[test]
    fn test_bare_host_without_dots() {
        let parts = HostParts::parse("localhost:3000", None).unwrap();
        assert!(parts.subdomains.is_empty());
        assert_eq!(parts.domain, "localhost");
    }
}
