//! Logical actions a matched route resolves to.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;

use crate::routing::error::RoutingError;

/// The operation a route stands for, independent of the HTTP method used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    Show,
    New,
    Create,
    Edit,
    Update,
    Delete,
    Search,
    CorsPreflight,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Index,
        Action::Show,
        Action::New,
        Action::Create,
        Action::Edit,
        Action::Update,
        Action::Delete,
        Action::Search,
        Action::CorsPreflight,
    ];

    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::Show => "show",
            Action::New => "new",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Search => "search",
            Action::CorsPreflight => "cors_preflight",
        }
    }

    /// The REST verb a client is expected to use for this action.
    ///
    /// Generation prefers routes bound to this verb when the caller gives
    /// no method hint, so `delete` resolves to `DELETE {item}` rather than
    /// the GET-based form route.
    pub fn conventional_method(&self) -> Method {
        match self {
            Action::Create => Method::POST,
            Action::Update => Method::PUT,
            Action::Delete => Method::DELETE,
            Action::CorsPreflight => Method::OPTIONS,
            Action::Index | Action::Show | Action::New | Action::Edit | Action::Search => {
                Method::GET
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| RoutingError::NoRoute(format!("unknown action '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_is_no_route() {
        let err = "frobnicate".parse::<Action>().unwrap_err();
        assert!(matches!(err, RoutingError::NoRoute(_)));
    }

    #[test]
    fn test_conventional_methods() {
        assert_eq!(Action::Delete.conventional_method(), Method::DELETE);
        assert_eq!(Action::Update.conventional_method(), Method::PUT);
        assert_eq!(Action::Show.conventional_method(), Method::GET);
    }
}
