//! # waypoint
//!
//! **waypoint** is the routing and origin-resolution core of an HTTP
//! service: it maps an incoming request (method, path, negotiated
//! content type) to the correct registered handler across thousands of
//! routes, and it determines the *logical* origin of a request (scheme,
//! host, port, path prefix) when the request has crossed one or more
//! reverse proxies, per RFC 7239 (`Forwarded`) and the `X-Forwarded-*`
//! header family.
//!
//! ## Architecture
//!
//! Two independent subsystems that share no state:
//!
//! - **[`router`]** - an arena trie built once at startup and queried
//!   read-only at request time. One node per path segment; literal
//!   children are tried before the node's single wildcard edge, and a
//!   leaf's routes are filtered by method and content-type predicates
//!   in registration order.
//! - **[`forwarded`]** / **[`base_url`]** - a per-request parser for the
//!   `Forwarded` hop chain and the precedence policy (`Forwarded`, then
//!   `X-Forwarded-*`, then the request itself) that reconstructs the
//!   base URL clients actually used.
//! - **[`media`]** - wildcard-aware media ranges used by route content
//!   negotiation.
//!
//! Transport wiring, body (de)serialization, handler binding, and proxy
//! trust policy are the surrounding server's concern; this crate
//! consumes header text and produces a resolved [`Route`] or
//! [`BaseUrl`].
//!
//! ## Routing
//!
//! ```
//! use http::Method;
//! use waypoint::{MediaRange, Route, RouteIndex};
//!
//! let mut index = RouteIndex::new();
//! index.add(Route::new("/pets", "list_pets").method(Method::GET));
//! index.add(
//!     Route::new("/pets", "add_pet")
//!         .method(Method::POST)
//!         .accepts(MediaRange::new("application/json")),
//! );
//! index.add(Route::new("/pets/{id}", "get_pet").method(Method::GET));
//!
//! let m = index.find(&Method::GET, "/pets/42", None).unwrap();
//! assert_eq!(m.route.name(), "get_pet");
//! assert_eq!(m.path_param("id"), Some("42"));
//! ```
//!
//! The index is write-once-then-read-many: all `add` calls happen on a
//! single thread before the index is published, after which concurrent
//! lookups need no locking. [`SharedRouteIndex`] provides an atomic
//! copy-on-publish handle when the table must be rebuilt at runtime.
//!
//! ## Origin resolution
//!
//! ```
//! use http::HeaderMap;
//! use waypoint::BaseUrlResolver;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("X-Forwarded-Host", "x-host".parse().unwrap());
//! headers.insert("X-Forwarded-Proto", "http".parse().unwrap());
//! headers.insert("X-Forwarded-Port", "8888".parse().unwrap());
//!
//! let url = BaseUrlResolver::new().resolve(&headers);
//! assert_eq!(url.to_string(), "http://x-host:8888");
//! ```
//!
//! A malformed `Forwarded` header never aborts resolution; it is logged
//! and the chain degrades to the next source. Routing misses are plain
//! `None` values - the dispatch path stays panic- and exception-free.

pub mod base_url;
pub mod forwarded;
pub mod media;
pub mod router;

pub use base_url::{BaseUrl, BaseUrlResolver};
pub use forwarded::{Forwarded, ForwardedPair, ForwardedParseError, HopOrder};
pub use media::MediaRange;
pub use router::{ParamVec, Route, RouteIndex, RouteMatch, SharedRouteIndex};
