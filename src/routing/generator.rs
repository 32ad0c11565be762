//! Reverse URL generation.
//!
//! # Responsibilities
//! - Produce the canonical path for an action and its parameters
//! - Disambiguate multi-route actions with an optional method hint
//! - Append parameters not consumed by the pattern as a query string
//!
//! # Design Decisions
//! - Whatever is generated matches back to the same action and bindings
//! - Without a hint, the route bound to the action's conventional REST verb
//!   wins over the GET-based form route
//! - Among equally preferred routes, the one consuming more parameters wins,
//!   so `cors_preflight` with an `id` yields the item path

use axum::http::Method;
use url::form_urlencoded;

use crate::routing::action::Action;
use crate::routing::error::RoutingError;
use crate::routing::router::{ResourceRouter, Route, RouteParams, Segment};

impl ResourceRouter {
    /// Generate the path a client would use for `action`.
    ///
    /// `method` restricts the candidates to routes accepting that verb.
    /// Fails with [`RoutingError::NoRoute`] when no route for the action can
    /// be filled from `params`.
    pub fn generate(
        &self,
        action: Action,
        params: &RouteParams,
        method: Option<&Method>,
    ) -> Result<String, RoutingError> {
        let candidates = self
            .routes()
            .iter()
            .filter(|route| route.action() == action);

        self.generate_from(candidates, params, method, action.conventional_method())
            .ok_or_else(|| {
                RoutingError::NoRoute(format!(
                    "no route for action '{}' with params {:?}{}",
                    action,
                    params.keys().collect::<Vec<_>>(),
                    hint_suffix(method)
                ))
            })
    }

    /// Generate from a route name (`annotations`, `annotation`,
    /// `search_annotations`, `new_annotation`, `edit_annotation`).
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Result<String, RoutingError> {
        let candidates: Vec<&Route> = self
            .routes()
            .iter()
            .filter(|route| route.name() == Some(name))
            .collect();
        let conventional = candidates
            .first()
            .map(|route| route.action().conventional_method())
            .ok_or_else(|| RoutingError::NoRoute(format!("unknown route name '{}'", name)))?;

        self.generate_from(candidates.into_iter(), params, None, conventional)
            .ok_or_else(|| {
                RoutingError::NoRoute(format!(
                    "route '{}' needs params not in {:?}",
                    name,
                    params.keys().collect::<Vec<_>>()
                ))
            })
    }

    fn generate_from<'a>(
        &self,
        candidates: impl Iterator<Item = &'a Route>,
        params: &RouteParams,
        method: Option<&Method>,
        conventional: Method,
    ) -> Option<String> {
        let mut best: Option<(&Route, (bool, usize))> = None;
        for route in candidates {
            if !route.is_generable() {
                continue;
            }
            if method.is_some_and(|m| !route.allows(m)) {
                continue;
            }
            if !route.placeholders().all(|name| is_fillable(params, name)) {
                continue;
            }

            let score = (route.allows(&conventional), route.placeholders().count());
            // Strictly greater keeps the earliest declared route on ties.
            if best.as_ref().map_or(true, |(_, current)| score > *current) {
                best = Some((route, score));
            }
        }

        best.map(|(route, _)| self.render(route, params))
    }

    fn render(&self, route: &Route, params: &RouteParams) -> String {
        let mut path = String::new();
        let mut consumed = Vec::new();
        for segment in route.segments() {
            match segment {
                Segment::Literal(literal) => {
                    path.push('/');
                    path.push_str(literal);
                }
                Segment::Param(name) => {
                    path.push('/');
                    path.push_str(&params[name]);
                    consumed.push(name.as_str());
                }
                Segment::Trailing => path.push('/'),
            }
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (key, value) in params {
            if !consumed.contains(&key.as_str()) {
                query.append_pair(key, value);
                has_query = true;
            }
        }
        if has_query {
            path.push('?');
            path.push_str(&query.finish());
        }
        path
    }
}

/// A placeholder value must be a single non-empty path segment.
fn is_fillable(params: &RouteParams, name: &str) -> bool {
    params
        .get(name)
        .is_some_and(|value| !value.is_empty() && !value.contains('/'))
}

fn hint_suffix(method: Option<&Method>) -> String {
    method
        .map(|m| format!(" and method {}", m))
        .unwrap_or_default()
}
