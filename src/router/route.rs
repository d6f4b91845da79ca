//! Route descriptors and the match-time applicability predicate.

use std::sync::Arc;

use http::Method;

use crate::media::MediaRange;

/// An immutable route descriptor registered with a [`RouteIndex`].
///
/// A route is identified by its URL pattern, the set of HTTP methods it
/// allows, and its content-type constraints. Several routes may share a
/// pattern as long as their method/content-type predicates are disjoint;
/// the index keeps them in registration order and returns the first one
/// whose predicate accepts the request.
///
/// Patterns are `/`-separated templates where a `{name}` segment matches
/// exactly one path segment:
///
/// ```
/// use http::Method;
/// use waypoint::{MediaRange, Route};
///
/// let route = Route::new("/users/{id}", "get_user")
///     .method(Method::GET)
///     .accepts(MediaRange::new("application/json"));
/// assert!(route.applies_to(&Method::GET, Some(&MediaRange::new("application/json"))));
/// assert!(!route.applies_to(&Method::DELETE, None));
/// ```
///
/// [`RouteIndex`]: super::RouteIndex
#[derive(Debug, Clone)]
pub struct Route {
    pattern: String,
    name: String,
    methods: Vec<Method>,
    accepts: Vec<MediaRange>,
    produces: Vec<MediaRange>,
    /// Parameter names by pattern segment index; names are resolved from
    /// the pattern because the trie collapses all parameters at a given
    /// position into a single wildcard edge.
    params: Vec<(usize, Arc<str>)>,
}

impl Route {
    /// Create a route for `pattern`, identified by `name` (typically the
    /// handler the surrounding server will dispatch to).
    pub fn new(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let params = parameter_names(&pattern);
        Self {
            pattern,
            name: name.into(),
            methods: Vec::new(),
            accepts: Vec::new(),
            produces: Vec::new(),
            params,
        }
    }

    /// Allow an HTTP method. A route with no declared methods allows all.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Allow several HTTP methods at once.
    #[must_use]
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Constrain the request content types this route accepts.
    /// No constraints means any content type is accepted.
    #[must_use]
    pub fn accepts(mut self, range: MediaRange) -> Self {
        self.accepts.push(range);
        self
    }

    /// Declare a content type this route produces. Informational for
    /// introspection; not consulted by [`applies_to`](Self::applies_to).
    #[must_use]
    pub fn produces(mut self, range: MediaRange) -> Self {
        self.produces.push(range);
        self
    }

    /// The URL pattern this route was registered under.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The dispatch name supplied at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted media ranges, in declaration order.
    #[must_use]
    pub fn accepted_types(&self) -> &[MediaRange] {
        &self.accepts
    }

    /// Produced media ranges, in declaration order.
    #[must_use]
    pub fn produced_types(&self) -> &[MediaRange] {
        &self.produces
    }

    /// Whether this route applies to a request with the given method and
    /// content type.
    ///
    /// The method must be in the allowed set (empty set allows all) and
    /// the content type must be compatible with at least one accepted
    /// range. A request without a content type satisfies any constraint.
    #[must_use]
    pub fn applies_to(&self, method: &Method, content_type: Option<&MediaRange>) -> bool {
        self.allows_method(method) && self.accepts_content(content_type)
    }

    /// Whether `method` is in this route's allowed set.
    #[must_use]
    pub fn allows_method(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }

    fn accepts_content(&self, content_type: Option<&MediaRange>) -> bool {
        match content_type {
            None => true,
            Some(ct) => self.accepts.is_empty() || self.accepts.iter().any(|r| r.includes(ct)),
        }
    }

    /// Parameter names keyed by pattern segment index, used to extract
    /// values from a matched request path.
    pub(crate) fn params(&self) -> &[(usize, Arc<str>)] {
        &self.params
    }
}

/// Scan a pattern for `{name}` segments and record their positions.
fn parameter_names(pattern: &str) -> Vec<(usize, Arc<str>)> {
    super::trie::split_segments(pattern)
        .iter()
        .enumerate()
        .filter_map(|(i, segment)| {
            if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 1 {
                let name = segment.trim_start_matches('{').trim_end_matches('}');
                Some((i, Arc::from(name)))
            } else {
                None
            }
        })
        .collect()
}
