//! # Forwarded Module
//!
//! Parsing and querying of the RFC 7239 `Forwarded` header
//! (<https://www.rfc-editor.org/rfc/rfc7239>).
//!
//! The header records, hop by hop, what each reverse proxy saw:
//!
//! ```text
//! Forwarded: for=1.1.1.1;host=first.example;proto=http, for=2.2.2.2;proto=https
//! ```
//!
//! The tokenizer turns the raw text into ordered `(token, value)` pairs
//! and is the only place syntax errors can arise; [`Forwarded`] groups the
//! pairs by token and answers "which hop's value applies" according to
//! an explicit [`HopOrder`]. Parsing is request-local, synchronous, and
//! bounded by header length; nothing here is shared between requests.
//!
//! This module does not validate token values (e.g. IP syntax of `for=`)
//! and does not decide which proxies are trusted to set the header; both
//! are the surrounding server's concern.

mod core;
mod parser;

pub use self::core::{Forwarded, HopOrder};
pub use self::parser::{ForwardedPair, ForwardedParseError};
