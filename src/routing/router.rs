//! Route table construction.
//!
//! # Responsibilities
//! - Normalize the mount point and validate the resource name pair
//! - Build the fixed route set for one resource
//! - Order routes for matching by specificity
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Legacy form routes (`new`, `edit/{id}`, `delete/{id}`) are ordinary
//!   table entries, not special-cased branches
//! - Literal segments beat placeholders at the same position; declaration
//!   order only breaks ties between equally specific routes

use std::collections::BTreeMap;

use axum::http::Method;

use crate::config::ResourceConfig;
use crate::routing::action::Action;
use crate::routing::error::RoutingError;

/// Path parameters bound by a match or consumed by generation.
pub type RouteParams = BTreeMap<String, String>;

/// Name of the item placeholder.
pub const ID: &str = "id";

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly (case-sensitive).
    Literal(String),
    /// Binds any non-empty request segment to the given name.
    Param(String),
    /// Matches only the empty segment left by a trailing slash. Binds nothing.
    Trailing,
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            Segment::Literal(_) => 2,
            Segment::Trailing => 1,
            Segment::Param(_) => 0,
        }
    }
}

/// A single entry in the route table.
#[derive(Debug, Clone)]
pub struct Route {
    name: Option<String>,
    segments: Vec<Segment>,
    methods: Vec<Method>,
    action: Action,
    generable: bool,
}

impl Route {
    fn new(action: Action, segments: Vec<Segment>, methods: &[Method]) -> Self {
        Self {
            name: None,
            segments,
            methods: methods.to_vec(),
            action,
            generable: true,
        }
    }

    fn named(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Match-only routes are never produced by the generator.
    fn match_only(mut self) -> Self {
        self.generable = false;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn is_generable(&self) -> bool {
        self.generable
    }

    pub fn allows(&self, method: &Method) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    /// Names of the placeholders in this pattern, in path order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::rank).collect()
    }
}

/// Router for a single resource under a mount point.
///
/// Built once, then shared read-only by the matcher and generator.
#[derive(Debug, Clone)]
pub struct ResourceRouter {
    mount_point: String,
    singular: String,
    plural: String,
    /// Declaration order.
    routes: Vec<Route>,
    /// Indices into `routes`, most specific first.
    match_order: Vec<usize>,
}

impl ResourceRouter {
    /// Build the route table for `resource_name = (singular, plural)` under
    /// `mount_point`.
    ///
    /// A missing leading slash on the mount point is added. Fails if the
    /// mount point is empty or either resource name is empty or contains `/`.
    pub fn new(mount_point: &str, singular: &str, plural: &str) -> Result<Self, RoutingError> {
        let mount_segments = normalize_mount_point(mount_point)?;
        validate_name("singular", singular)?;
        validate_name("plural", plural)?;

        let mut base: Vec<Segment> = mount_segments
            .iter()
            .map(|s| Segment::Literal(s.clone()))
            .collect();
        base.push(Segment::Literal(plural.to_string()));

        let path = |tail: &[Segment]| -> Vec<Segment> {
            let mut segments = base.clone();
            segments.extend_from_slice(tail);
            segments
        };
        let lit = |s: &str| Segment::Literal(s.to_string());
        let id = || Segment::Param(ID.to_string());

        let routes = vec![
            // Collection
            Route::new(Action::Index, path(&[]), &[Method::GET]).named(plural.to_string()),
            Route::new(Action::Create, path(&[]), &[Method::POST]),
            Route::new(Action::Search, path(&[lit("search")]), &[Method::GET])
                .named(format!("search_{}", plural)),
            Route::new(Action::New, path(&[lit("new")]), &[Method::GET])
                .named(format!("new_{}", singular)),
            // Item
            Route::new(Action::Show, path(&[id()]), &[Method::GET]).named(singular.to_string()),
            Route::new(Action::Update, path(&[id()]), &[Method::PUT, Method::POST]),
            Route::new(Action::Delete, path(&[id()]), &[Method::DELETE]),
            // Verb-in-path routes for form clients without PUT/DELETE
            Route::new(Action::Edit, path(&[lit("edit"), id()]), &[Method::GET])
                .named(format!("edit_{}", singular)),
            Route::new(Action::Delete, path(&[lit("delete"), id()]), &[Method::GET]),
            // `{plural}/` resolves to delete with no id. Kept narrow: only this
            // route tolerates the trailing slash.
            Route::new(Action::Delete, path(&[Segment::Trailing]), &[Method::GET, Method::DELETE])
                .match_only(),
            // CORS preflight
            Route::new(Action::CorsPreflight, path(&[]), &[Method::OPTIONS]),
            Route::new(Action::CorsPreflight, path(&[id()]), &[Method::OPTIONS]),
        ];

        let mut match_order: Vec<usize> = (0..routes.len()).collect();
        // Stable sort keeps declaration order among equally specific routes.
        match_order.sort_by(|&a, &b| routes[b].specificity().cmp(&routes[a].specificity()));

        let mount_point = if mount_segments.is_empty() {
            String::new()
        } else {
            format!("/{}", mount_segments.join("/"))
        };

        tracing::debug!(
            mount_point = %mount_point,
            singular,
            plural,
            routes = routes.len(),
            "Route table built"
        );

        Ok(Self {
            mount_point,
            singular: singular.to_string(),
            plural: plural.to_string(),
            routes,
            match_order,
        })
    }

    /// Build from the `[resource]` configuration section.
    pub fn from_config(config: &ResourceConfig) -> Result<Self, RoutingError> {
        Self::new(&config.mount_point, &config.singular, &config.plural)
    }

    /// Normalized mount point: empty for the root mount, otherwise `/a/b`.
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// The `(singular, plural)` resource name.
    pub fn resource_name(&self) -> (&str, &str) {
        (&self.singular, &self.plural)
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Routes most specific first; the order the matcher tries them in.
    pub(crate) fn routes_by_specificity(&self) -> impl Iterator<Item = &Route> {
        self.match_order.iter().map(|&i| &self.routes[i])
    }
}

fn normalize_mount_point(mount_point: &str) -> Result<Vec<String>, RoutingError> {
    let trimmed = mount_point.trim();
    if trimmed.is_empty() {
        return Err(RoutingError::Configuration("mount point is empty".into()));
    }

    let inner = trimmed.trim_start_matches('/').trim_end_matches('/');
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    let segments: Vec<String> = inner.split('/').map(str::to_string).collect();
    if segments.iter().any(String::is_empty) {
        return Err(RoutingError::Configuration(format!(
            "mount point '{}' contains an empty segment",
            mount_point
        )));
    }
    Ok(segments)
}

fn validate_name(kind: &str, name: &str) -> Result<(), RoutingError> {
    if name.is_empty() {
        return Err(RoutingError::Configuration(format!(
            "{} resource name is empty",
            kind
        )));
    }
    if name.contains('/') {
        return Err(RoutingError::Configuration(format!(
            "{} resource name '{}' contains '/'",
            kind, name
        )));
    }
    Ok(())
}
