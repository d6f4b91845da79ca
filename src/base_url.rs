//! Logical request origin: the [`BaseUrl`] value object and the
//! precedence chain that fills it from proxy headers.
//!
//! A server behind one or more reverse proxies cannot trust its own
//! transport-level scheme and `Host` header to describe the URL clients
//! actually used. [`BaseUrlResolver`] reconstructs that origin from the
//! `Forwarded` header (RFC 7239), the de-facto `X-Forwarded-*` family,
//! and finally the request itself. Which proxies are allowed to set
//! these headers is trust policy and out of scope here.

use std::fmt;

use http::header::{FORWARDED, HOST};
use http::HeaderMap;
use tracing::warn;

use crate::forwarded::{Forwarded, HopOrder};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PORT: &str = "x-forwarded-port";
const X_FORWARDED_PREFIX: &str = "x-forwarded-prefix";

/// The externally visible scheme/host/port/prefix a server should
/// consider itself reachable at.
///
/// Fields are only fully known once [`BaseUrlResolver::resolve`]
/// completes. The port is carried as an opaque string; numeric
/// validation, if any, is the caller's responsibility.
///
/// `Display` renders `scheme://host[:port][prefix]`, omitting the port
/// when it equals the scheme's conventional default (80 for `http`,
/// 443 for `https`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseUrl {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<String>,
    prefix: Option<String>,
}

impl BaseUrl {
    /// Resolved scheme, if any.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Resolved host, excluding any port.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Resolved port, as the opaque string a header supplied.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// Resolved path prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.scheme.is_some()
    }

    #[must_use]
    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    #[must_use]
    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self.scheme.as_deref().unwrap_or("");
        let host = self.host.as_deref().unwrap_or("");
        write!(f, "{scheme}://{host}")?;

        if let Some(port) = self.port.as_deref() {
            let default_port = if scheme.eq_ignore_ascii_case("https") {
                "443"
            } else {
                "80"
            };
            if port != default_port {
                write!(f, ":{port}")?;
            }
        }

        if let Some(prefix) = self.prefix.as_deref() {
            f.write_str(prefix)?;
        }

        Ok(())
    }
}

/// Precedence chain filling a [`BaseUrl`] from request headers.
///
/// Scheme, host, and port are each resolved independently, stopping at
/// the first source that supplies the field:
///
/// 1. the `Forwarded` header (`proto` for the scheme; `host` split into
///    name and port) - a malformed header is logged and treated as
///    absent, never surfaced to the caller;
/// 2. `X-Forwarded-Proto` / `X-Forwarded-Host` / `X-Forwarded-Port` for
///    whichever fields are still unset;
/// 3. the configured transport scheme and the request's `Host` header
///    (split into host and port; the port only fills a still-unset slot).
///
/// `X-Forwarded-Prefix` sits outside the chain and is taken verbatim
/// whenever present.
///
/// The resolver carries the process-wide [`HopOrder`] applied to every
/// `Forwarded` query, and the transport scheme used when no header
/// supplies one (`https` unless configured otherwise).
///
/// ```
/// use http::HeaderMap;
/// use waypoint::BaseUrlResolver;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("Forwarded", "host=forwarded-host;proto=http".parse().unwrap());
/// headers.insert("Host", "testing-host".parse().unwrap());
///
/// let url = BaseUrlResolver::new().resolve(&headers);
/// assert_eq!(url.to_string(), "http://forwarded-host");
/// ```
#[derive(Debug, Clone)]
pub struct BaseUrlResolver {
    hop_order: HopOrder,
    default_scheme: String,
}

impl Default for BaseUrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseUrlResolver {
    /// A resolver with appended hop order and an `https` scheme fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hop_order: HopOrder::Appended,
            default_scheme: "https".to_string(),
        }
    }

    /// Set the hop order used for every `Forwarded` query this resolver
    /// makes. Set once per process, not re-derived per call.
    #[must_use]
    pub fn hop_order(mut self, order: HopOrder) -> Self {
        self.hop_order = order;
        self
    }

    /// Set the transport-level scheme used when no header supplies one
    /// (e.g. `http` for a plain-text listener).
    #[must_use]
    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }

    /// Resolve the base URL from a request's headers.
    ///
    /// Never fails: header parse errors degrade to the next precedence
    /// source and a fully renderable [`BaseUrl`] is always returned.
    #[must_use]
    pub fn resolve(&self, headers: &HeaderMap) -> BaseUrl {
        let mut url = BaseUrl::default();

        // Try the Forwarded header first.
        if let Some(text) = header_str(headers, FORWARDED.as_str()) {
            match Forwarded::parse(text, self.hop_order) {
                Ok(forwarded) => {
                    url.scheme = forwarded.proto().map(str::to_string);
                    url.host = forwarded.host_name().map(str::to_string);
                    url.port = forwarded.host_port().map(str::to_string);
                }
                Err(error) => {
                    warn!(%error, header = text, "ignoring malformed Forwarded header");
                }
            }
        }

        // Fall back to X-Forwarded-* per field.
        if !url.has_scheme() {
            url.scheme = header_string(headers, X_FORWARDED_PROTO);
        }
        if !url.has_host() {
            url.host = header_string(headers, X_FORWARDED_HOST);
        }
        if !url.has_port() {
            url.port = header_string(headers, X_FORWARDED_PORT);
        }

        // The prefix is not part of the chain; verbatim when present.
        url.prefix = header_string(headers, X_FORWARDED_PREFIX);

        // Final fallback: the request's own transport scheme and Host.
        if !url.has_scheme() {
            url.scheme = Some(self.default_scheme.clone());
        }
        if !url.has_host() {
            if let Some(host) = header_str(headers, HOST.as_str()) {
                match host.split_once(':') {
                    Some((name, port)) => {
                        url.host = Some(name.to_string());
                        if !url.has_port() {
                            url.port = Some(port.to_string());
                        }
                    }
                    None => url.host = Some(host.to_string()),
                }
            }
        }

        url
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name).map(str::to_string)
}
