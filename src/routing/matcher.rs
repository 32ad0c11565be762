//! Route matching logic.
//!
//! # Responsibilities
//! - Split the request path into segments
//! - Compare segments against each route pattern (most specific first)
//! - Check the request method against the route's allowed set
//! - Bind placeholder segments to their names
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A path containing `//` never matches
//! - A single trailing slash is ignored, except that the raw path is tried
//!   first so the one trailing-slash route can see it
//! - Bound values are raw segments; `id` is never parsed as a number
//! - No regex to guarantee O(routes × segments) matching

use axum::http::Method;

use crate::routing::action::Action;
use crate::routing::router::{ResourceRouter, Route, RouteParams, Segment, ID};

/// Result of a successful match. Produced per request, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub action: Action,
    pub params: RouteParams,
}

impl RouteMatch {
    /// The bound `id`, or `None` when the route has no id or bound nothing.
    pub fn id(&self) -> Option<&str> {
        self.params.get(ID).map(String::as_str)
    }
}

impl ResourceRouter {
    /// Find the route for `(method, path)`.
    ///
    /// Returns `None` when nothing matches; the dispatcher turns that into a
    /// 404.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let rest = path.strip_prefix('/')?;
        if path.contains("//") {
            return None;
        }

        let raw: Vec<&str> = rest.split('/').collect();
        if let Some(found) = self.find(method, &raw) {
            return Some(found);
        }

        let trimmed = rest.strip_suffix('/')?;
        let segments: Vec<&str> = trimmed.split('/').collect();
        self.find(method, &segments)
    }

    fn find(&self, method: &Method, segments: &[&str]) -> Option<RouteMatch> {
        self.routes_by_specificity()
            .filter(|route| route.allows(method))
            .find_map(|route| {
                bind(route, segments).map(|params| RouteMatch {
                    action: route.action(),
                    params,
                })
            })
    }
}

fn bind(route: &Route, segments: &[&str]) -> Option<RouteParams> {
    let pattern = route.segments();
    if pattern.len() != segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected {
            Segment::Literal(literal) => {
                if literal != actual {
                    return None;
                }
            }
            Segment::Param(name) => {
                if actual.is_empty() {
                    return None;
                }
                params.insert(name.clone(), (*actual).to_string());
            }
            Segment::Trailing => {
                if !actual.is_empty() {
                    return None;
                }
            }
        }
    }
    Some(params)
}
