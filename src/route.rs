//! A [`Route`] is an ordered set of request matchers plus a handler.
//!
//! Routes are created through a [`Router`] and configured with chained builder
//! calls. The data needed to match and to build URLs lives in a shared
//! [`RouteInfo`], which is also what handlers see through
//! [`current_route`](crate::current_route).

use crate::context::Vars;
use crate::error::{Error, MatchError, Result};
use crate::matcher::{Matcher, MatcherFn, RequestView};
use crate::regexp::{RegexCompiler, RegexpKind, RegexpOptions, RouteRegexp};
use crate::router::{location, redirect, BoxHandler, Handler, Router};

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

use hyper::header::HeaderName;
use hyper::{Body, Method, Request, Response};
use regex::Regex;
use tracing::{trace, warn};

/// Transforms the variables passed to [`RouteInfo::url`] before the URL is
/// built.
pub type BuildVarsFn = Arc<dyn Fn(Vars) -> Vars + Send + Sync>;

type MetadataValue = Arc<dyn Any + Send + Sync>;

/// The templates compiled for a route.
#[derive(Clone, Default)]
pub(crate) struct RegexpGroup {
    pub(crate) host: Option<Arc<RouteRegexp>>,
    pub(crate) path: Option<Arc<RouteRegexp>>,
    pub(crate) queries: Vec<Arc<RouteRegexp>>,
}

/// Configuration shared between a router and the routes it creates.
///
/// Every route starts from a copy of its router's configuration, and a
/// subrouter starts from a copy of its parent route's, which is how matchers
/// and templates of a parent route apply to every route of a subrouter.
#[derive(Clone)]
pub(crate) struct RouteConf {
    pub(crate) strict_slash: bool,
    pub(crate) skip_clean: bool,
    pub(crate) use_encoded_path: bool,
    pub(crate) compiler: Arc<dyn RegexCompiler>,
    pub(crate) patterns: Arc<HashMap<String, String>>,
    pub(crate) matchers: Vec<Matcher>,
    pub(crate) regexp: RegexpGroup,
    pub(crate) build_scheme: Option<String>,
    pub(crate) build_vars: Option<BuildVarsFn>,
}

impl Default for RouteConf {
    fn default() -> Self {
        Self {
            strict_slash: false,
            skip_clean: false,
            use_encoded_path: false,
            compiler: Arc::new(Regex::new),
            patterns: Arc::default(),
            matchers: Vec::new(),
            regexp: RegexpGroup::default(),
            build_scheme: None,
            build_vars: None,
        }
    }
}

/// Everything a route knows except its handler: name, matchers, templates and
/// metadata.
#[derive(Clone)]
pub struct RouteInfo {
    name: Option<String>,
    err: Option<Error>,
    build_only: bool,
    metadata: HashMap<String, MetadataValue>,
    conf: RouteConf,
}

/// A URL built from a route, see [`RouteInfo::url`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteUrl {
    scheme: String,
    host: String,
    path: String,
    query: String,
}

impl RouteUrl {
    /// The scheme, empty unless the route has a host template.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The escaped path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl fmt::Display for RouteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.host.is_empty() {
            if !self.scheme.is_empty() {
                write!(f, "{}:", self.scheme)?;
            }
            write!(f, "//{}", self.host)?;
        }
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

/// The result of matching a request against a [`Router`] or a [`Route`].
pub struct RouteMatch<'a> {
    /// The matched route. `None` when a fallback handler was selected.
    pub route: Option<&'a Route>,
    /// The handler to dispatch to, wrapped by the middleware of every router
    /// the request went through.
    pub handler: Option<BoxHandler>,
    pub vars: Vars,
    /// Why no route matched. A fallback handler may still be set.
    pub error: Option<MatchError>,
    pub(crate) allowed: Vec<Method>,
    matched: bool,
}

impl<'a> RouteMatch<'a> {
    pub(crate) fn no_match(error: MatchError) -> Self {
        Self {
            route: None,
            handler: None,
            vars: Vars::new(),
            error: Some(error),
            allowed: Vec::new(),
            matched: false,
        }
    }

    pub(crate) fn fallback(handler: BoxHandler, error: MatchError) -> Self {
        Self {
            handler: Some(handler),
            matched: true,
            ..Self::no_match(error)
        }
    }

    /// Returns `true` if a route matched or a fallback handler was selected.
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// The methods of every route sharing the matched route's path template,
    /// among the routes of the router the matched route belongs to.
    ///
    /// Only filled in by [`Router::match_request`].
    pub fn allowed_methods(&self) -> &[Method] {
        &self.allowed
    }
}

impl fmt::Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route", &self.route.map(|route| &*route.info))
            .field("vars", &self.vars)
            .field("error", &self.error)
            .field("allowed", &self.allowed)
            .field("matched", &self.matched)
            .finish()
    }
}

/// A route: request matchers, a handler and optionally a nested router.
///
/// Builder methods return the route itself so calls can be chained:
///
/// ```rust
/// use muxrouter::Router;
/// use hyper::{Body, Request, Response};
///
/// let mut router = Router::new();
/// router
///     .path("/articles/{category}/{id:[0-9]+}")
///     .methods(&["GET", "HEAD"])
///     .handler_fn(|_req: Request<Body>| async { Ok(Response::new(Body::empty())) })
///     .name("article");
///
/// let url = router.named("article").unwrap()
///     .url(&["category", "technology", "id", "42"])
///     .unwrap();
/// assert_eq!(url.to_string(), "/articles/technology/42");
/// ```
///
/// Builder calls never fail. A malformed call stores an error on the route,
/// which is reported by [`RouteInfo::get_error`], URL building and the
/// template getters, and the route never matches.
pub struct Route {
    info: Arc<RouteInfo>,
    handler: Option<BoxHandler>,
    subrouter: Option<Router>,
}

impl Route {
    pub(crate) fn new(conf: RouteConf) -> Self {
        Self {
            info: Arc::new(RouteInfo {
                name: None,
                err: None,
                build_only: false,
                metadata: HashMap::new(),
                conf,
            }),
            handler: None,
            subrouter: None,
        }
    }

    pub(crate) fn info(&self) -> &Arc<RouteInfo> {
        &self.info
    }

    fn info_mut(&mut self) -> &mut RouteInfo {
        Arc::make_mut(&mut self.info)
    }

    /// Stores the first error reported by a builder call.
    fn fail(&mut self, err: Error) -> &mut Self {
        if self.info.err.is_none() {
            warn!(route = ?self.info.name, error = %err, "invalid route definition");
            self.info_mut().err = Some(err);
        }
        self
    }

    fn with_matcher(&mut self, matcher: Result<Matcher>) -> &mut Self {
        match matcher {
            Ok(matcher) => {
                if self.info.err.is_none() {
                    self.info_mut().conf.matchers.push(matcher);
                }
                self
            }
            Err(err) => self.fail(err),
        }
    }

    fn add_regexp_matcher(&mut self, tpl: &str, kind: RegexpKind) -> Result<()> {
        if self.info.err.is_some() {
            return Ok(());
        }

        let conf = &self.info.conf;
        let mut tpl = tpl.to_owned();
        if matches!(kind, RegexpKind::Path | RegexpKind::Prefix) {
            if !tpl.is_empty() && !tpl.starts_with('/') {
                return Err(Error::PathMustStartWithSlash(tpl));
            }
            if let Some(path) = &conf.regexp.path {
                tpl = format!("{}{}", path.template().trim_end_matches('/'), tpl);
            }
        }

        let options = RegexpOptions {
            strict_slash: conf.strict_slash,
            use_encoded_path: conf.use_encoded_path,
        };
        let rr = Arc::new(RouteRegexp::new(
            &tpl,
            kind,
            options,
            &*conf.compiler,
            &conf.patterns,
        )?);

        for query in &conf.regexp.queries {
            rr.unique_vars(query)?;
        }
        let other = match kind {
            RegexpKind::Host => &conf.regexp.path,
            _ => &conf.regexp.host,
        };
        if let Some(other) = other {
            rr.unique_vars(other)?;
        }

        let conf = &mut self.info_mut().conf;
        match kind {
            RegexpKind::Host => conf.regexp.host = Some(rr.clone()),
            RegexpKind::Query => conf.regexp.queries.push(rr.clone()),
            RegexpKind::Path | RegexpKind::Prefix => conf.regexp.path = Some(rr.clone()),
        }
        conf.matchers.push(Matcher::Regexp(rr));
        Ok(())
    }

    /// Sets the handler for the route.
    pub fn handler(&mut self, handler: impl Handler + 'static) -> &mut Self {
        if self.info.err.is_none() {
            self.handler = Some(Arc::new(handler));
        }
        self
    }

    /// Sets the handler for the route from an async function or closure.
    ///
    /// Same as [`Route::handler`], but lets the compiler infer the closure's
    /// argument type.
    pub fn handler_fn<F, R>(&mut self, f: F) -> &mut Self
    where
        F: Fn(Request<Body>) -> R + Send + Sync + 'static,
        R: Future<Output = hyper::Result<Response<Body>>> + Send + Sync + 'static,
    {
        self.handler(f)
    }

    pub fn get_handler(&self) -> Option<&BoxHandler> {
        self.handler.as_ref()
    }

    /// Returns the router created by [`Route::subrouter`], if any.
    pub fn get_subrouter(&self) -> Option<&Router> {
        self.subrouter.as_ref()
    }

    /// Sets the name of the route, used to build URLs.
    /// A route can only be named once.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if let Some(existing) = &self.info.name {
            let err = Error::NameAlreadySet(existing.clone(), name);
            return self.fail(err);
        }
        if self.info.err.is_none() {
            self.info_mut().name = Some(name);
        }
        self
    }

    /// The route is only used to build URLs and never matches requests.
    pub fn build_only(&mut self) -> &mut Self {
        self.info_mut().build_only = true;
        self
    }

    /// Adds a matcher for the URL host.
    ///
    /// The template may contain variables such as `{subdomain}.example.com`
    /// or `{subdomain:[a-z]+}.example.{tld}`. Without a `:` in its literal
    /// parts the template ignores the request port.
    pub fn host(&mut self, tpl: &str) -> &mut Self {
        let result = self.add_regexp_matcher(tpl, RegexpKind::Host);
        self.record(result)
    }

    /// Adds a matcher for the URL path.
    ///
    /// The template must be empty or start with a slash, and may contain
    /// variables such as `/articles/{category}/{id:[0-9]+}`. Variables use
    /// `[^/]+` unless a pattern is given. If the route already has a path
    /// template, the new one is appended to it.
    pub fn path(&mut self, tpl: &str) -> &mut Self {
        let result = self.add_regexp_matcher(tpl, RegexpKind::Path);
        self.record(result)
    }

    /// Adds a matcher for a URL path prefix.
    ///
    /// Strict slash never applies to prefixes, so `/static/` won't match
    /// `/static`. The prefix is usually the parent of a [`subrouter`](Self::subrouter).
    pub fn path_prefix(&mut self, tpl: &str) -> &mut Self {
        let result = self.add_regexp_matcher(tpl, RegexpKind::Prefix);
        self.record(result)
    }

    /// Adds a matcher for URL query values, as key/value pairs.
    ///
    /// Values are templates: `&["id", "{id:[0-9]+}"]`. An empty value matches
    /// any value of the key, but the key must be present.
    pub fn queries(&mut self, pairs: &[&str]) -> &mut Self {
        if pairs.len() % 2 != 0 {
            return self.fail(Error::OddPairs(pairs.len()));
        }
        for pair in pairs.chunks(2) {
            let result = self.add_regexp_matcher(&format!("{}={}", pair[0], pair[1]), RegexpKind::Query);
            if let Err(err) = result {
                return self.fail(err);
            }
        }
        self
    }

    /// Adds a matcher for request header values, as key/value pairs.
    /// An empty value only requires the header to be present.
    pub fn headers(&mut self, pairs: &[&str]) -> &mut Self {
        let matcher = header_pairs(pairs).map(|pairs| {
            Matcher::Headers(
                pairs
                    .into_iter()
                    .map(|(name, value)| (name, value.to_owned()))
                    .collect(),
            )
        });
        self.with_matcher(matcher)
    }

    /// Adds a matcher for request header values matched by regular
    /// expressions. The expressions are not anchored.
    pub fn headers_regexp(&mut self, pairs: &[&str]) -> &mut Self {
        let compiler = self.info.conf.compiler.clone();
        let matcher = header_pairs(pairs).and_then(|pairs| {
            pairs
                .into_iter()
                .map(|(name, pattern)| -> Result<(HeaderName, Regex)> {
                    Ok((name, compiler.compile(pattern)?))
                })
                .collect::<Result<Vec<_>>>()
                .map(Matcher::HeadersRegexp)
        });
        self.with_matcher(matcher)
    }

    /// Adds a matcher for HTTP methods. Methods are case-insensitive.
    pub fn methods(&mut self, methods: &[&str]) -> &mut Self {
        let matcher = methods
            .iter()
            .map(|method| {
                Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                    .map_err(|_| Error::InvalidMethod((*method).to_owned()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Matcher::Methods);
        self.with_matcher(matcher)
    }

    /// Adds a matcher for URL schemes. The first scheme is used when
    /// building URLs.
    pub fn schemes(&mut self, schemes: &[&str]) -> &mut Self {
        let schemes: Vec<String> = schemes.iter().map(|s| s.to_ascii_lowercase()).collect();
        if self.info.err.is_none() {
            if let Some(first) = schemes.first() {
                self.info_mut().conf.build_scheme = Some(first.clone());
            }
        }
        self.with_matcher(Ok(Matcher::Schemes(schemes)))
    }

    /// Adds a custom request predicate.
    pub fn matcher_func<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Request<Body>) -> bool + Send + Sync + 'static,
    {
        let f: MatcherFn = Arc::new(f);
        self.with_matcher(Ok(Matcher::Func(f)))
    }

    /// Adds a function transforming the variables passed to URL building.
    /// It runs after any function already set, including the ones
    /// inherited from parent routes.
    pub fn build_vars_func<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(Vars) -> Vars + Send + Sync + 'static,
    {
        let conf = &mut self.info_mut().conf;
        let f: BuildVarsFn = match conf.build_vars.take() {
            Some(old) => Arc::new(move |vars: Vars| f(old(vars))),
            None => Arc::new(f),
        };
        conf.build_vars = Some(f);
        self
    }

    /// Attaches `value` to the route under `key`, replacing any previous value.
    pub fn metadata<V>(&mut self, key: impl Into<String>, value: V) -> &mut Self
    where
        V: Any + Send + Sync,
    {
        self.info_mut().metadata.insert(key.into(), Arc::new(value));
        self
    }

    /// Returns a router nested under this route.
    ///
    /// Every route registered on it carries this route's matchers and
    /// templates as a mandatory prefix. Matchers added to this route after
    /// the call don't apply to the subrouter.
    ///
    /// ```rust
    /// use muxrouter::Router;
    ///
    /// let mut router = Router::new();
    /// let api = router.host("api.example.com").path_prefix("/v1").subrouter();
    /// api.path("/users/{id}").name("user");
    ///
    /// let url = router.named("user").unwrap().url(&["id", "42"]).unwrap();
    /// assert_eq!(url.to_string(), "http://api.example.com/v1/users/42");
    /// ```
    pub fn subrouter(&mut self) -> &mut Router {
        let conf = self.info.conf.clone();
        self.subrouter.get_or_insert_with(|| Router::with_conf(conf))
    }

    fn record(&mut self, result: Result<()>) -> &mut Self {
        match result {
            Ok(()) => self,
            Err(err) => self.fail(err),
        }
    }

    /// Routers nested under this route, as a subrouter or as its handler.
    pub(crate) fn nested_routers(&self) -> impl Iterator<Item = &Router> {
        self.subrouter
            .iter()
            .chain(self.handler.as_ref().and_then(|h| h.as_router()))
    }

    /// Matches `req` against this route alone.
    ///
    /// The handler of the result is not wrapped by any middleware.
    pub fn match_request(&self, req: &Request<Body>) -> RouteMatch<'_> {
        self.match_view(&RequestView::new(req))
    }

    pub(crate) fn match_view<'a>(&'a self, req: &RequestView<'_>) -> RouteMatch<'a> {
        if self.info.build_only || self.info.err.is_some() {
            return RouteMatch::no_match(MatchError::NotFound);
        }

        let mut method_mismatch = false;
        for matcher in &self.info.conf.matchers {
            if !matcher.matches(req) {
                if let Matcher::Methods(_) = matcher {
                    method_mismatch = true;
                    continue;
                }
                return RouteMatch::no_match(MatchError::NotFound);
            }
        }

        if let Some(router) = &self.subrouter {
            let mut m = router.match_view(req);
            if m.is_match() && method_mismatch {
                return RouteMatch::no_match(MatchError::MethodMismatch);
            }
            // a nested route without a handler dispatches to this route's
            if m.route.is_some() && m.handler.is_none() {
                m.handler = self.handler.clone();
            }
            return m;
        }

        if method_mismatch {
            return RouteMatch::no_match(MatchError::MethodMismatch);
        }

        let mut vars = Vars::new();
        let regexp = &self.info.conf.regexp;
        if let Some(host) = &regexp.host {
            host.extract(req, &mut vars);
        }
        if let Some(path) = &regexp.path {
            path.extract(req, &mut vars);
        }
        for query in &regexp.queries {
            query.extract(req, &mut vars);
        }

        let handler = match self.strict_slash_redirect(req) {
            Some(location) => Some(redirect(location)),
            None => self.handler.clone(),
        };

        trace!(route = ?self.info.name, path = %req.path(false), "matched route");
        RouteMatch {
            route: Some(self),
            handler,
            vars,
            error: None,
            allowed: Vec::new(),
            matched: true,
        }
    }

    /// Returns where to redirect `req` when its trailing slash disagrees with
    /// a strict-slash path template.
    fn strict_slash_redirect(&self, req: &RequestView<'_>) -> Option<String> {
        let path = self.info.conf.regexp.path.as_ref()?;
        if !path.options().strict_slash {
            return None;
        }

        let slash = req.path(path.options().use_encoded_path).ends_with('/');
        if slash == path.template().ends_with('/') {
            return None;
        }

        let uri = req.request().uri();
        let raw = uri.path();
        let target = if slash {
            // the slash is encoded, so there is no other form to redirect to
            raw.strip_suffix('/')?.to_owned()
        } else {
            format!("{}/", raw)
        };
        Some(location(uri, &target))
    }
}

impl Deref for Route {
    type Target = RouteInfo;

    fn deref(&self) -> &RouteInfo {
        &self.info
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("info", &self.info)
            .field("handler", &self.handler.is_some())
            .field("subrouter", &self.subrouter.is_some())
            .finish()
    }
}

fn header_pairs<'p>(pairs: &[&'p str]) -> Result<Vec<(HeaderName, &'p str)>> {
    if pairs.len() % 2 != 0 {
        return Err(Error::OddPairs(pairs.len()));
    }
    pairs
        .chunks(2)
        .map(|pair| {
            let name = HeaderName::from_bytes(pair[0].as_bytes())
                .map_err(|_| Error::InvalidHeaderName(pair[0].to_owned()))?;
            Ok((name, pair[1]))
        })
        .collect()
}

impl RouteInfo {
    fn check(&self) -> Result<()> {
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the first error stored by a builder call.
    pub fn get_error(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    pub fn is_build_only(&self) -> bool {
        self.build_only
    }

    /// Returns the path template used to match the route, including the
    /// templates of parent routes.
    pub fn get_path_template(&self) -> Result<&str> {
        self.check()?;
        self.conf
            .regexp
            .path
            .as_ref()
            .map(|path| path.template())
            .ok_or(Error::NoPath)
    }

    /// Returns the expanded regular expression used to match the path.
    pub fn get_path_regexp(&self) -> Result<&str> {
        self.check()?;
        self.conf
            .regexp
            .path
            .as_ref()
            .map(|path| path.regexp().as_str())
            .ok_or(Error::NoPath)
    }

    pub fn get_host_template(&self) -> Result<&str> {
        self.check()?;
        self.conf
            .regexp
            .host
            .as_ref()
            .map(|host| host.template())
            .ok_or(Error::NoHost)
    }

    /// Returns the query templates, as `key=value`.
    pub fn get_queries_templates(&self) -> Result<Vec<&str>> {
        self.check()?;
        let queries = &self.conf.regexp.queries;
        if queries.is_empty() {
            return Err(Error::NoQueries);
        }
        Ok(queries.iter().map(|query| query.template()).collect())
    }

    pub fn get_queries_regexp(&self) -> Result<Vec<&str>> {
        self.check()?;
        let queries = &self.conf.regexp.queries;
        if queries.is_empty() {
            return Err(Error::NoQueries);
        }
        Ok(queries.iter().map(|query| query.regexp().as_str()).collect())
    }

    /// Returns the methods of the first methods matcher.
    pub fn get_methods(&self) -> Result<&[Method]> {
        self.check()?;
        self.conf
            .matchers
            .iter()
            .find_map(|matcher| match matcher {
                Matcher::Methods(methods) => Some(methods.as_slice()),
                _ => None,
            })
            .ok_or(Error::NoMethods)
    }

    /// Returns the names of the variables declared by the host, path and
    /// query templates, in that order.
    pub fn get_var_names(&self) -> Result<Vec<&str>> {
        self.check()?;
        let regexp = &self.conf.regexp;
        Ok(regexp
            .host
            .iter()
            .chain(regexp.path.iter())
            .chain(regexp.queries.iter())
            .flat_map(|rr| rr.var_names())
            .map(String::as_str)
            .collect())
    }

    pub fn get_metadata(&self) -> &HashMap<String, Arc<dyn Any + Send + Sync>> {
        &self.metadata
    }

    /// Returns the metadata value stored under `key`.
    pub fn get_metadata_value<T: Any>(&self, key: &str) -> Result<&T> {
        let value = self
            .metadata
            .get(key)
            .ok_or_else(|| Error::MetadataKeyNotFound(key.to_owned()))?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| Error::MetadataTypeMismatch(key.to_owned()))
    }

    /// Returns the metadata value stored under `key`, or `fallback` if there
    /// is no value of type `T`.
    pub fn get_metadata_value_or<'a, T: Any>(&'a self, key: &str, fallback: &'a T) -> &'a T {
        self.get_metadata_value(key).unwrap_or(fallback)
    }

    fn prepare_vars(&self, pairs: &[&str]) -> Result<Vars> {
        if pairs.len() % 2 != 0 {
            return Err(Error::OddPairs(pairs.len()));
        }
        let vars: Vars = pairs.chunks(2).map(|pair| (pair[0], pair[1])).collect();
        Ok(match &self.conf.build_vars {
            Some(f) => f(vars),
            None => vars,
        })
    }

    /// Builds a URL for the route from variable name/value pairs.
    ///
    /// Every variable of the host, path and query templates must be given,
    /// and match its pattern. A route with a host template builds an
    /// absolute URL, with the scheme of [`Route::schemes`] or `http`.
    pub fn url(&self, pairs: &[&str]) -> Result<RouteUrl> {
        self.check()?;
        let values = self.prepare_vars(pairs)?;
        let regexp = &self.conf.regexp;

        let mut url = RouteUrl::default();
        if let Some(host) = &regexp.host {
            url.host = host.url(&values)?;
            url.scheme = self.build_scheme().to_owned();
        }
        if let Some(path) = &regexp.path {
            url.path = path.url(&values)?;
        }
        url.query = regexp
            .queries
            .iter()
            .map(|query| query.url(&values))
            .collect::<Result<Vec<_>>>()?
            .join("&");
        Ok(url)
    }

    /// Builds the scheme and host of a URL for the route.
    /// The route must have a host template.
    pub fn url_host(&self, pairs: &[&str]) -> Result<RouteUrl> {
        self.check()?;
        let host = self.conf.regexp.host.as_ref().ok_or(Error::NoHost)?;
        let values = self.prepare_vars(pairs)?;
        Ok(RouteUrl {
            scheme: self.build_scheme().to_owned(),
            host: host.url(&values)?,
            ..Default::default()
        })
    }

    /// Builds the path of a URL for the route.
    /// The route must have a path template.
    pub fn url_path(&self, pairs: &[&str]) -> Result<RouteUrl> {
        self.check()?;
        let path = self.conf.regexp.path.as_ref().ok_or(Error::NoPath)?;
        let values = self.prepare_vars(pairs)?;
        Ok(RouteUrl {
            path: path.url(&values)?,
            ..Default::default()
        })
    }

    fn build_scheme(&self) -> &str {
        self.conf.build_scheme.as_deref().unwrap_or("http")
    }
}

impl fmt::Debug for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteInfo")
            .field("name", &self.name)
            .field("err", &self.err)
            .field("build_only", &self.build_only)
            .field("matchers", &self.conf.matchers)
            .finish()
    }
}
