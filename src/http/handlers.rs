//! Action handlers.
//!
//! One function per routed action. Each takes the shared state and the
//! per-request context and returns a response or an [`ApiError`].

use axum::body::Bytes;
use axum::http::Method;
use axum::response::Response;
use serde_json::Value;

use crate::http::error::{ApiError, ApiResult};
use crate::http::request::Params;
use crate::http::response::{no_content, render_json, see_other};
use crate::http::server::AppState;
use crate::routing::{Action, RouteMatch, RouteParams};
use crate::store::{Fields, SearchQuery};

/// Parameters that control rendering and never become entity fields.
const RENDER_PARAMS: [&str; 2] = ["format", "callback"];

/// Parameters that control search and never become filters.
const SEARCH_PARAMS: [&str; 5] = ["all_fields", "offset", "limit", "format", "callback"];

/// Everything a handler needs from the request.
#[derive(Debug)]
pub struct RequestContext {
    pub route: RouteMatch,
    pub params: Params,
    /// Raw body when it was sent as `application/json`.
    pub json_body: Option<Bytes>,
}

impl RequestContext {
    fn callback(&self) -> Option<&str> {
        self.params.get("callback")
    }

    fn id(&self) -> ApiResult<&str> {
        self.route.id().ok_or(ApiError::NotFound)
    }

    /// The create/update payload: the `json` parameter, else a JSON body,
    /// else the plain parameters.
    fn payload(&self) -> ApiResult<Value> {
        if let Some(raw) = self.params.get("json") {
            return serde_json::from_str(raw)
                .map_err(|e| ApiError::BadRequest(format!("malformed json parameter: {}", e)));
        }
        if let Some(body) = &self.json_body {
            return serde_json::from_slice(body)
                .map_err(|e| ApiError::BadRequest(format!("malformed json body: {}", e)));
        }
        Ok(Value::Object(self.params.to_fields(&RENDER_PARAMS)))
    }
}

/// Invoke the handler for the matched action.
pub fn dispatch(state: &AppState, ctx: &RequestContext) -> ApiResult<Response> {
    match ctx.route.action {
        Action::Index => index(state, ctx),
        Action::Show => show(state, ctx),
        Action::Create => create(state, ctx),
        Action::Update => update(state, ctx),
        Action::Delete => delete(state, ctx),
        Action::Search => search(state, ctx),
        Action::CorsPreflight => Ok(cors_preflight()),
        // Form-display actions have no JSON representation.
        Action::New | Action::Edit => Err(ApiError::NotFound),
    }
}

fn index(state: &AppState, ctx: &RequestContext) -> ApiResult<Response> {
    let annotations = state.store.index(state.config.limits.index_limit)?;
    let body: Vec<Value> = annotations.iter().map(|a| a.as_value()).collect();
    render_json(&body, ctx.callback())
}

fn show(state: &AppState, ctx: &RequestContext) -> ApiResult<Response> {
    let annotation = state.store.show(ctx.id()?)?.ok_or(ApiError::NotFound)?;
    render_json(&annotation.as_value(), ctx.callback())
}

fn create(state: &AppState, ctx: &RequestContext) -> ApiResult<Response> {
    let items = match ctx.payload()? {
        Value::Object(fields) => vec![fields],
        Value::Array(values) if !values.is_empty() => values
            .into_iter()
            .map(|value| match value {
                Value::Object(fields) => Ok(fields),
                _ => Err(ApiError::BadRequest("list payload must hold objects".into())),
            })
            .collect::<ApiResult<Vec<Fields>>>()?,
        _ => {
            return Err(ApiError::BadRequest(
                "payload must be an object or a non-empty list of objects".into(),
            ))
        }
    };

    let mut last = None;
    for fields in items {
        last = Some(state.store.create(fields)?);
    }
    let created = last.ok_or_else(|| ApiError::Internal("nothing created".into()))?;

    tracing::info!(id = %created.id, "Annotation created");
    let params = RouteParams::from([("id".to_string(), created.id.clone())]);
    let location = state
        .router
        .generate(Action::Show, &params, Some(&Method::GET))?;
    see_other(&location)
}

fn update(state: &AppState, ctx: &RequestContext) -> ApiResult<Response> {
    let id = ctx.id()?;
    if state.store.show(id)?.is_none() {
        return Err(ApiError::NotFound);
    }

    let fields = match ctx.payload()? {
        Value::Object(fields) => fields,
        _ => return Err(ApiError::BadRequest("update payload must be an object".into())),
    };
    let updated = state.store.update(id, fields)?.ok_or(ApiError::NotFound)?;
    render_json(&updated.as_value(), ctx.callback())
}

fn delete(state: &AppState, ctx: &RequestContext) -> ApiResult<Response> {
    let id = ctx.id()?;
    match state.store.delete(id) {
        Ok(true) => {
            tracing::info!(id = %id, "Annotation deleted");
            Ok(no_content())
        }
        Ok(false) => Err(ApiError::NotFound),
        Err(err) => {
            tracing::error!(id = %id, error = %err, "Delete failed");
            Err(ApiError::Store(err))
        }
    }
}

fn search(state: &AppState, ctx: &RequestContext) -> ApiResult<Response> {
    let query = search_query(&ctx.params, state.config.limits.search_limit)?;
    let results = state.store.search(&query)?;
    render_json(&results, ctx.callback())
}

fn cors_preflight() -> Response {
    // The CORS headers themselves are added by middleware.
    no_content()
}

/// Build a search from request parameters.
///
/// A negative `limit` means unbounded; `all_fields` is on when present with
/// a non-empty value.
fn search_query(params: &Params, default_limit: usize) -> ApiResult<SearchQuery> {
    let offset = match params.get("offset") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ApiError::BadRequest(format!("bad offset '{}'", raw)))?,
        None => 0,
    };
    let limit = match params.get("limit") {
        Some(raw) => {
            let limit = raw
                .parse::<i64>()
                .map_err(|_| ApiError::BadRequest(format!("bad limit '{}'", raw)))?;
            usize::try_from(limit).ok()
        }
        None => Some(default_limit),
    };

    Ok(SearchQuery {
        filters: params.latest(&SEARCH_PARAMS),
        offset,
        limit,
        all_fields: params.get("all_fields").is_some_and(|v| !v.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_defaults() {
        let query = search_query(&Params::from_query(None), 100).unwrap();
        assert_eq!(query, SearchQuery {
            filters: vec![],
            offset: 0,
            limit: Some(100),
            all_fields: false,
        });
    }

    #[test]
    fn test_search_query_negative_limit_is_unbounded() {
        let query = search_query(&Params::from_query(Some("limit=-1")), 100).unwrap();
        assert_eq!(query.limit, None);
    }

    #[test]
    fn test_search_query_filters_skip_reserved() {
        let params = Params::from_query(Some(
            "uri=u&all_fields=1&offset=2&limit=5&callback=cb&format=json&user=levin",
        ));
        let query = search_query(&params, 100).unwrap();
        assert_eq!(
            query.filters,
            vec![("uri".to_string(), "u".to_string()), ("user".to_string(), "levin".to_string())]
        );
        assert_eq!(query.offset, 2);
        assert_eq!(query.limit, Some(5));
        assert!(query.all_fields);
    }

    #[test]
    fn test_search_query_rejects_garbage() {
        assert!(search_query(&Params::from_query(Some("limit=lots")), 100).is_err());
        assert!(search_query(&Params::from_query(Some("offset=-1")), 100).is_err());
    }

    #[test]
    fn test_empty_all_fields_is_off() {
        let query = search_query(&Params::from_query(Some("all_fields=")), 100).unwrap();
        assert!(!query.all_fields);
    }
}
