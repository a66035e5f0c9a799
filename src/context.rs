//! Per-request routing data stored in the request extensions.
//!
//! When a request is dispatched to a handler, the router stores the matched
//! variables and the matched route in [`Request::extensions`]. They can be
//! read anywhere downstream, in middleware or in the handler itself:
//!
//! ```rust
//! use muxrouter::{vars, Router};
//! use hyper::{Body, Request, Response};
//!
//! async fn article(req: Request<Body>) -> hyper::Result<Response<Body>> {
//!     let id = vars(&req).and_then(|vars| vars.get("id")).unwrap_or_default();
//!     Ok(Response::new(format!("article {}", id).into()))
//! }
//!
//! let mut router = Router::new();
//! router.handle("/articles/{id:[0-9]+}", article);
//! ```

use crate::route::RouteInfo;

use std::collections::hash_map::{self, HashMap};
use std::iter::FromIterator;
use std::sync::Arc;

use hyper::{Method, Request};

/// Route variables extracted from a request, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars(HashMap<String, String>);

impl Vars {
    /// Creates an empty set of variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the variable `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Sets `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the variables, returning the underlying map.
    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for Vars {
    fn from(map: HashMap<String, String>) -> Self {
        Vars(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Vars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Vars(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Vars {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Clone)]
struct CurrentRoute(Arc<RouteInfo>);

/// Methods of the routes sharing the matched route's path template.
#[derive(Clone)]
struct AllowedMethods(Vec<Method>);

/// Returns the route variables of the current request, if it was routed.
pub fn vars<B>(req: &Request<B>) -> Option<&Vars> {
    req.extensions().get::<Vars>()
}

/// Returns the route that matched the current request.
///
/// This is only set for requests dispatched to a matched route: fallback
/// handlers such as [`Router::not_found`](crate::Router::not_found) see `None`.
pub fn current_route<B>(req: &Request<B>) -> Option<&RouteInfo> {
    req.extensions()
        .get::<CurrentRoute>()
        .map(|current| current.0.as_ref())
}

/// Sets the route variables of `req`.
///
/// Intended for testing handlers in isolation, without going through a
/// router:
///
/// ```rust
/// use muxrouter::{set_url_vars, vars};
/// use hyper::{Body, Request};
///
/// let req = Request::new(Body::empty());
/// let req = set_url_vars(req, [("id", "42")].into_iter().collect());
/// assert_eq!(vars(&req).unwrap().get("id"), Some("42"));
/// ```
pub fn set_url_vars<B>(mut req: Request<B>, vars: Vars) -> Request<B> {
    req.extensions_mut().insert(vars);
    req
}

pub(crate) fn set_current_route<B>(req: &mut Request<B>, route: Arc<RouteInfo>) {
    req.extensions_mut().insert(CurrentRoute(route));
}

pub(crate) fn allowed_methods<B>(req: &Request<B>) -> Option<&[Method]> {
    req.extensions()
        .get::<AllowedMethods>()
        .map(|allowed| allowed.0.as_slice())
}

pub(crate) fn set_allowed_methods<B>(req: &mut Request<B>, methods: Vec<Method>) {
    req.extensions_mut().insert(AllowedMethods(methods));
}
