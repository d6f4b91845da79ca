//! Route index - hot path for request dispatch.
//!
//! The index is populated once during single-threaded startup and read
//! concurrently without locks afterwards. Nothing here mutates after
//! [`RouteIndex::add`] calls stop; [`SharedRouteIndex`] adds an atomic
//! copy-on-publish handle for processes that rebuild their table.

use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::route::Route;
use super::trie::{split_segments, Trie};
use crate::media::MediaRange;

/// Maximum number of extracted path parameters before heap allocation.
/// Most REST patterns have well under 8 parameter segments.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the match hot path.
///
/// Names are `Arc<str>` clones of the route's pattern parameters (known
/// at startup, O(1) to clone); values are per-request strings cut from
/// the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request against the index.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (shared with the index, never copied).
    pub route: Arc<Route>,
    /// Path parameters extracted from the URL (e.g. `{id}` -> `"123"`).
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get an extracted path parameter by name.
    ///
    /// Last write wins when a pattern repeats a parameter name at
    /// different depths.
    #[inline]
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Trie-backed index resolving `(method, path, content type)` to a route.
///
/// Registration (`add`) happens on a single thread at startup; lookups
/// (`find`, `find_all`) are read-only and safe to run unsynchronized
/// from any number of workers once the index has been published.
///
/// ```
/// use http::Method;
/// use waypoint::{Route, RouteIndex};
///
/// let mut index = RouteIndex::new();
/// index.add(Route::new("/pets/{id}", "get_pet").method(Method::GET));
///
/// let m = index.find(&Method::GET, "/pets/123", None).unwrap();
/// assert_eq!(m.route.name(), "get_pet");
/// assert_eq!(m.path_param("id"), Some("123"));
/// ```
#[derive(Debug)]
pub struct RouteIndex {
    trie: Trie,
    routes: Vec<Arc<Route>>,
}

impl Default for RouteIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            routes: Vec::new(),
        }
    }

    /// Register a route.
    ///
    /// An equivalent route registered twice yields two leaf entries; the
    /// first whose predicate accepts a request wins at match time, so
    /// registration order is significant and preserved.
    pub fn add(&mut self, route: Route) {
        let route = Arc::new(route);
        let segments = split_segments(route.pattern());
        self.trie.insert(&segments, Arc::clone(&route));
        debug!(
            pattern = route.pattern(),
            name = route.name(),
            "route registered"
        );
        self.routes.push(route);
    }

    /// Resolve a request to the first applicable route.
    ///
    /// Walks the trie (literal child first, wildcard second, no
    /// backtracking), then scans the leaf's routes in registration order
    /// for the first whose method set contains `method` and whose
    /// accepted types are compatible with `content_type`. A miss is a
    /// normal outcome, not an error.
    #[must_use]
    pub fn find(
        &self,
        method: &Method,
        path: &str,
        content_type: Option<&MediaRange>,
    ) -> Option<RouteMatch> {
        debug!(method = %method, path, "route match attempt");
        let segments = split_segments(path);

        let Some(leaf) = self.trie.lookup(&segments) else {
            warn!(method = %method, path, "no route matched");
            return None;
        };

        let Some(route) = leaf.iter().find(|r| r.applies_to(method, content_type)) else {
            warn!(
                method = %method,
                path,
                candidates = leaf.len(),
                "path matched but no route applies to method/content type"
            );
            return None;
        };

        let path_params = extract_params(route, &segments);
        debug!(
            method = %method,
            path,
            pattern = route.pattern(),
            name = route.name(),
            "route matched"
        );
        Some(RouteMatch {
            route: Arc::clone(route),
            path_params,
        })
    }

    /// Resolve a path to its full leaf route list, ignoring method and
    /// content type. Used for metadata/introspection, not dispatch.
    #[must_use]
    pub fn find_all(&self, path: &str) -> &[Arc<Route>] {
        let segments = split_segments(path);
        self.trie.lookup(&segments).unwrap_or(&[])
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the index holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All registered patterns, in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.pattern())
    }
}

/// Cut parameter values for `route` out of the request segments.
///
/// Names come from the matched route's own pattern, so two patterns with
/// different parameter names at the same trie position each report their
/// own names.
fn extract_params(route: &Route, segments: &[&str]) -> ParamVec {
    let mut params = ParamVec::new();
    for (index, name) in route.params() {
        if let Some(value) = segments.get(*index) {
            params.push((Arc::clone(name), (*value).to_string()));
        }
    }
    params
}

/// Lock-free published handle over a [`RouteIndex`].
///
/// Readers load a snapshot without blocking; replacing the table is an
/// atomic pointer swap of a freshly built index. The index itself is
/// never mutated after publication.
#[derive(Debug)]
pub struct SharedRouteIndex {
    inner: arc_swap::ArcSwap<RouteIndex>,
}

impl SharedRouteIndex {
    /// Publish an index built during startup.
    #[must_use]
    pub fn new(index: RouteIndex) -> Self {
        info!(routes = index.len(), "route index published");
        Self {
            inner: arc_swap::ArcSwap::from_pointee(index),
        }
    }

    /// Load the current snapshot. Cheap enough for the per-request path.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RouteIndex> {
        self.inner.load_full()
    }

    /// Atomically replace the published index with a rebuilt one.
    /// In-flight readers keep their previous snapshot.
    pub fn publish(&self, index: RouteIndex) {
        info!(routes = index.len(), "route index republished");
        self.inner.store(Arc::new(index));
    }
}
