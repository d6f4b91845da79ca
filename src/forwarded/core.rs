//! Query object over a parsed `Forwarded` header.

use std::collections::HashMap;

use super::parser::{parse_pairs, ForwardedPair, ForwardedParseError};

/// Which end of the hop chain a token query should answer from.
///
/// Proxies conventionally *append* their element to the header, so the
/// hop recorded last is the one added most recently and queries return
/// the last value per token. Some deployments emit hops newest-first
/// instead; [`HopOrder::Reversed`] flips the selection to the first
/// value. The order is not inferable from the header text, so it must
/// be stated explicitly when parsing and is fixed for the lifetime of
/// the [`Forwarded`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HopOrder {
    /// Hops appear oldest-first; the last recorded value per token wins.
    #[default]
    Appended,
    /// Hops appear newest-first; the first recorded value per token wins.
    Reversed,
}

/// Parsed view of an RFC 7239 `Forwarded` header.
///
/// Pairs are grouped by lower-cased token across the *entire* header
/// (not per hop), preserving their relative order, and the value a
/// `get` returns is picked per the [`HopOrder`] given at parse time.
/// Immutable once built; re-parsing the same text yields a value with
/// identical query results.
///
/// ```
/// use waypoint::{Forwarded, HopOrder};
///
/// let fwd = Forwarded::parse(
///     "for=1.1.1.1;host=first.example, for=2.2.2.2;host=second.example",
///     HopOrder::Appended,
/// ).unwrap();
/// assert_eq!(fwd.host(), Some("second.example"));
/// assert_eq!(fwd.for_value(), Some("2.2.2.2"));
/// ```
#[derive(Debug, Clone)]
pub struct Forwarded {
    pairs_by_token: HashMap<String, Vec<ForwardedPair>>,
    order: HopOrder,
}

impl Forwarded {
    /// The RFC 7239 `by` token.
    pub const BY: &'static str = "by";
    /// The RFC 7239 `for` token.
    pub const FOR: &'static str = "for";
    /// The RFC 7239 `host` token.
    pub const HOST: &'static str = "host";
    /// The RFC 7239 `proto` token.
    pub const PROTO: &'static str = "proto";

    /// Parse header text into a query object.
    ///
    /// Fails with [`ForwardedParseError`] when any clause cannot be
    /// tokenized as `token=value`.
    pub fn parse(header: &str, order: HopOrder) -> Result<Self, ForwardedParseError> {
        let mut pairs_by_token: HashMap<String, Vec<ForwardedPair>> = HashMap::new();
        for pair in parse_pairs(header)? {
            pairs_by_token
                .entry(pair.token().to_ascii_lowercase())
                .or_default()
                .push(pair);
        }
        Ok(Self {
            pairs_by_token,
            order,
        })
    }

    /// All pairs recorded for a token, in header order across hops.
    /// Useful for walking the full chain (e.g. every `for=` hop).
    #[must_use]
    pub fn pairs(&self, token: &str) -> &[ForwardedPair] {
        self.pairs_by_token
            .get(&token.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The selected value for an arbitrary token, per the hop order.
    #[must_use]
    pub fn value_of(&self, token: &str) -> Option<&str> {
        let pairs = self.pairs_by_token.get(&token.to_ascii_lowercase())?;
        let pair = match self.order {
            HopOrder::Appended => pairs.last(),
            HopOrder::Reversed => pairs.first(),
        };
        pair.map(ForwardedPair::value)
    }

    /// Whether any hop carried the given token.
    #[must_use]
    pub fn has(&self, token: &str) -> bool {
        self.pairs_by_token
            .contains_key(&token.to_ascii_lowercase())
    }

    /// Selected `by` value (interface of the proxy), if any.
    #[must_use]
    pub fn by_value(&self) -> Option<&str> {
        self.value_of(Self::BY)
    }

    /// Selected `for` value (client the request is forwarded for), if any.
    #[must_use]
    pub fn for_value(&self) -> Option<&str> {
        self.value_of(Self::FOR)
    }

    /// Selected `host` value, including any embedded port.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.value_of(Self::HOST)
    }

    /// Selected `proto` value, if any.
    #[must_use]
    pub fn proto(&self) -> Option<&str> {
        self.value_of(Self::PROTO)
    }

    /// Host portion of the selected `host` value, excluding any port.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.host().map(|host| match host.split_once(':') {
            Some((name, _)) => name,
            None => host,
        })
    }

    /// Port portion of the selected `host` value, or `None` when the
    /// host carries no colon.
    #[must_use]
    pub fn host_port(&self) -> Option<&str> {
        self.host()
            .and_then(|host| host.split_once(':').map(|(_, port)| port))
    }

    #[must_use]
    pub fn has_by(&self) -> bool {
        self.has(Self::BY)
    }

    #[must_use]
    pub fn has_for(&self) -> bool {
        self.has(Self::FOR)
    }

    #[must_use]
    pub fn has_host(&self) -> bool {
        self.has(Self::HOST)
    }

    #[must_use]
    pub fn has_proto(&self) -> bool {
        self.has(Self::PROTO)
    }
}
