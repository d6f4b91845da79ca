//! Arena-based path trie backing the route index.
//!
//! One node per distinct path segment. Nodes live in a flat `Vec` and
//! refer to each other by index, so the whole structure is built during
//! the single-threaded registration phase and is trivially shareable
//! read-only afterwards.
//!
//! Lookup is an explicit two-step per segment: try the literal child,
//! fall back to the node's one wildcard edge. All parameter segments
//! (`{name}`) at a given position collapse into that single edge, which
//! avoids any sentinel-key collision with a literal segment. There is no
//! backtracking: once a segment commits to a child, a failure deeper in
//! the walk is a miss for the whole lookup.

use std::collections::HashMap;
use std::sync::Arc;

use super::route::Route;

type NodeId = usize;

#[derive(Debug, Default)]
struct Node {
    /// Literal children, keyed by exact segment text (case-sensitive).
    children: HashMap<String, NodeId>,
    /// The single wildcard edge; tried only when no literal child matches.
    wildcard: Option<NodeId>,
    /// Routes terminating at this node, in registration order.
    routes: Vec<Arc<Route>>,
}

#[derive(Debug)]
pub(super) struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub(super) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Walk/create nodes along `segments` and attach `route` to the
    /// terminal node's leaf list.
    pub(super) fn insert(&mut self, segments: &[&str], route: Arc<Route>) {
        let mut current: NodeId = 0;
        for segment in segments {
            current = if is_wildcard(segment) {
                match self.nodes[current].wildcard {
                    Some(id) => id,
                    None => {
                        let id = self.push_node();
                        self.nodes[current].wildcard = Some(id);
                        id
                    }
                }
            } else {
                match self.nodes[current].children.get(*segment) {
                    Some(&id) => id,
                    None => {
                        let id = self.push_node();
                        self.nodes[current]
                            .children
                            .insert((*segment).to_string(), id);
                        id
                    }
                }
            };
        }
        self.nodes[current].routes.push(route);
    }

    /// Walk `segments` and return the terminal leaf list, or `None` when
    /// the walk fails or ends on an interior node with no routes.
    pub(super) fn lookup(&self, segments: &[&str]) -> Option<&[Arc<Route>]> {
        let mut current: NodeId = 0;
        for segment in segments {
            let node = &self.nodes[current];
            current = match node.children.get(*segment) {
                Some(&id) => id,
                None => node.wildcard?,
            };
        }
        let routes = self.nodes[current].routes.as_slice();
        if routes.is_empty() {
            None
        } else {
            Some(routes)
        }
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(Node::default());
        self.nodes.len() - 1
    }
}

fn is_wildcard(segment: &str) -> bool {
    segment == "*" || (segment.starts_with('{') && segment.ends_with('}') && segment.len() > 1)
}

/// Split a path into segments: strip one leading slash, split on `/`,
/// and drop trailing empty segments. An empty path yields one
/// empty-string segment.
pub(crate) fn split_segments(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut segments: Vec<&str> = path.split('/').collect();
    while segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(pattern: &str) -> Arc<Route> {
        Arc::new(Route::new(pattern, pattern))
    }

    fn insert(trie: &mut Trie, pattern: &str) {
        let r = route(pattern);
        trie.insert(&split_segments(r.pattern()), Arc::clone(&r));
    }

    #[test]
    fn literal_walk_reaches_leaf() {
        let mut trie = Trie::new();
        insert(&mut trie, "/zoo/animals");
        let leaf = trie.lookup(&["zoo", "animals"]).expect("leaf");
        assert_eq!(leaf[0].pattern(), "/zoo/animals");
    }

    #[test]
    fn parameters_share_one_wildcard_edge() {
        let mut trie = Trie::new();
        insert(&mut trie, "/users/{user_id}/posts");
        insert(&mut trie, "/users/{id}/comments");
        // Both parameter names route through the same edge.
        assert!(trie.lookup(&["users", "1", "posts"]).is_some());
        assert!(trie.lookup(&["users", "1", "comments"]).is_some());
    }

    #[test]
    fn literal_child_wins_over_wildcard() {
        let mut trie = Trie::new();
        insert(&mut trie, "/users/{id}");
        insert(&mut trie, "/users/me");
        let leaf = trie.lookup(&["users", "me"]).expect("leaf");
        assert_eq!(leaf[0].pattern(), "/users/me");
    }

    #[test]
    fn committed_literal_walk_does_not_backtrack() {
        let mut trie = Trie::new();
        insert(&mut trie, "/users/profile/settings");
        insert(&mut trie, "/users/{id}");
        // "profile" commits to the literal child, whose node has no routes.
        assert!(trie.lookup(&["users", "profile"]).is_none());
    }

    #[test]
    fn interior_node_is_not_a_leaf() {
        let mut trie = Trie::new();
        insert(&mut trie, "/a/b/c");
        assert!(trie.lookup(&["a", "b"]).is_none());
    }

    #[test]
    fn splits_and_strips_single_leading_slash() {
        assert_eq!(split_segments("/users/123"), vec!["users", "123"]);
        assert_eq!(split_segments("users/123"), vec!["users", "123"]);
        assert_eq!(split_segments("/users/123/"), vec!["users", "123"]);
    }

    #[test]
    fn empty_path_is_one_empty_segment() {
        assert_eq!(split_segments(""), vec![""]);
        assert_eq!(split_segments("/"), vec![""]);
    }
}
