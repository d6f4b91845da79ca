//! Tokenizer for the RFC 7239 `Forwarded` header.
//!
//! Header text is cut into elements on commas (one element per proxy
//! hop), elements into clauses on semicolons, and each clause into a
//! `(token, value)` pair on its first `=`. Quoted values are unquoted.
//! A clause that cannot be tokenized fails the whole parse with a
//! structured error; the caller decides whether to log, ignore, or
//! escalate.

use std::fmt;

/// One `token=value` clause extracted from a `Forwarded` header.
///
/// The token is kept as written; matching is case-insensitive and
/// happens when pairs are grouped by [`Forwarded`](super::Forwarded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedPair {
    token: String,
    value: String,
}

impl ForwardedPair {
    /// The clause's key, as written in the header.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The clause's value, trimmed and unquoted.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Malformed `Forwarded` header syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardedParseError {
    /// A clause has no `=` separating token from value.
    MissingDelimiter {
        /// The offending clause text.
        clause: String,
    },
    /// A clause's token side is empty (e.g. `=value`).
    EmptyToken {
        /// The offending clause text.
        clause: String,
    },
    /// A quoted value opens or closes without its matching quote.
    UnbalancedQuote {
        /// The offending clause text.
        clause: String,
    },
}

impl fmt::Display for ForwardedParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardedParseError::MissingDelimiter { clause } => {
                write!(f, "Forwarded clause '{clause}' has no '=' delimiter")
            }
            ForwardedParseError::EmptyToken { clause } => {
                write!(f, "Forwarded clause '{clause}' has an empty token")
            }
            ForwardedParseError::UnbalancedQuote { clause } => {
                write!(f, "Forwarded clause '{clause}' has an unbalanced quote")
            }
        }
    }
}

impl std::error::Error for ForwardedParseError {}

/// Tokenize a whole `Forwarded` header into ordered pairs.
///
/// Pair order follows header order across all hops, which is what the
/// first/last value selection in [`Forwarded`](super::Forwarded) relies
/// on. Empty elements and clauses (stray commas/semicolons) are skipped.
pub(super) fn parse_pairs(header: &str) -> Result<Vec<ForwardedPair>, ForwardedParseError> {
    let mut pairs = Vec::new();

    for element in header.split(',') {
        for clause in element.split(';') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }

            let (token, value) =
                clause
                    .split_once('=')
                    .ok_or_else(|| ForwardedParseError::MissingDelimiter {
                        clause: clause.to_string(),
                    })?;
            let token = token.trim();
            if token.is_empty() {
                return Err(ForwardedParseError::EmptyToken {
                    clause: clause.to_string(),
                });
            }

            pairs.push(ForwardedPair {
                token: token.to_string(),
                value: unquote(value.trim(), clause)?,
            });
        }
    }

    Ok(pairs)
}

fn unquote(value: &str, clause: &str) -> Result<String, ForwardedParseError> {
    if let Some(rest) = value.strip_prefix('"') {
        match rest.strip_suffix('"') {
            Some(inner) => Ok(inner.to_string()),
            None => Err(ForwardedParseError::UnbalancedQuote {
                clause: clause.to_string(),
            }),
        }
    } else if value.ends_with('"') {
        Err(ForwardedParseError::UnbalancedQuote {
            clause: clause.to_string(),
        })
    } else {
        Ok(value.to_string())
    }
}
