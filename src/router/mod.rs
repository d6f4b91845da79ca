//! # Router Module
//!
//! Path matching and route resolution. A [`RouteIndex`] maps an incoming
//! `(method, path, content type)` triple to the single registered
//! [`Route`] that should handle it.
//!
//! ## Overview
//!
//! The index is responsible for:
//! - Building a trie from registered route patterns at startup
//! - Matching incoming requests against literal and `{param}` segments
//! - Filtering a leaf's routes by method and content-type predicates
//! - Extracting path parameters from the matched URL
//!
//! ## Architecture
//!
//! Routing is split into a write phase and a read phase:
//!
//! 1. **Registration**: every declared route is inserted once, on a
//!    single thread, into an arena trie (one node per path segment,
//!    literal children plus one wildcard edge per node).
//!
//! 2. **Matching**: request paths walk the trie segment by segment,
//!    preferring literal children and committing without backtracking.
//!    The terminal leaf's routes are scanned in registration order for
//!    the first whose method/content-type predicate applies.
//!
//! After registration the trie is never mutated, so concurrent lookups
//! need no locking. [`SharedRouteIndex`] wraps the index in an atomic
//! swap for processes that rebuild and republish their table.

mod core;
mod route;
mod trie;


pub use self::core::{ParamVec, RouteIndex, RouteMatch, SharedRouteIndex, MAX_INLINE_PARAMS};
pub use self::route::Route;
