//! [`Router`](crate::Router) matches incoming requests against a list of
//! registered routes and calls the handler of the first route that matches.
//!
//! Routes are matched in registration order. A route can match on the URL
//! host, path, path prefix, scheme, query values, header values, request
//! method, or any custom predicate:
//!
//! ```rust,no_run
//! use muxrouter::{vars, Router};
//! use hyper::{Body, Request, Response};
//!
//! async fn index(_: Request<Body>) -> hyper::Result<Response<Body>> {
//!     Ok(Response::new("Hello, World!".into()))
//! }
//!
//! async fn article(req: Request<Body>) -> hyper::Result<Response<Body>> {
//!     let vars = vars(&req).unwrap();
//!     let body = format!("{} #{}", vars.get("category").unwrap(), vars.get("id").unwrap());
//!     Ok(Response::new(body.into()))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut router = Router::new();
//!     router.get("/", index);
//!     router.get("/articles/{category}/{id:[0-9]+}", article);
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await;
//! }
//! ```
//!
//! Templates contain variables of the form `{name}` or `{name:pattern}`. A
//! variable without a pattern matches anything up to the next slash in a path,
//! or up to the next dot in a host. Matched values are available to handlers
//! through [`vars`](crate::vars).
//!
//! Routes can be grouped under a [subrouter](crate::Route::subrouter), which
//! only runs its routes when the parent route matches:
//!
//! ```rust
//! use muxrouter::Router;
//! use hyper::{Body, Request, Response};
//!
//! async fn products(_: Request<Body>) -> hyper::Result<Response<Body>> {
//!     Ok(Response::new(Body::empty()))
//! }
//!
//! let mut router = Router::new();
//! let shop = router.host("www.example.com").path_prefix("/products").subrouter();
//! shop.get("/", products);
//! shop.get("/{key}", products);
//! ```
use crate::context::{set_allowed_methods, set_current_route, Vars};
use crate::error::MatchError;
use crate::matcher::RequestView;
use crate::middleware::Middleware;
use crate::path::clean;
use crate::regexp::{escape_path, RegexCompiler};
use crate::route::{Route, RouteConf, RouteMatch};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::{future, ready};
use hyper::header::{self, HeaderValue};
use hyper::service::Service;
use hyper::{Body, Method, Request, Response, StatusCode, Uri};
use percent_encoding::percent_decode_str;
use tracing::debug;

/// The future returned by a [`Handler`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = hyper::Result<Response<Body>>> + Send + Sync>>;

/// A shared, type-erased [`Handler`], as passed through [`Middleware`].
pub type BoxHandler = Arc<dyn Handler>;

/// Router dispatches requests to different handlers via configurable routes.
pub struct Router {
    routes: Vec<Route>,
    middlewares: Vec<Arc<dyn Middleware>>,
    not_found: Option<BoxHandler>,
    method_not_allowed: Option<BoxHandler>,
    conf: RouteConf,
}

/// What [`Router::walk`] does after visiting a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep walking, into the routers nested under the route if any.
    Continue,
    /// Don't walk into the routers nested under the route.
    SkipRouter,
}

impl Router {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_conf(conf: RouteConf) -> Self {
        Self {
            routes: Vec::new(),
            middlewares: Vec::new(),
            not_found: None,
            method_not_allowed: None,
            conf,
        }
    }

    /// Registers an empty route.
    pub fn new_route(&mut self) -> &mut Route {
        let idx = self.routes.len();
        self.routes.push(Route::new(self.conf.clone()));
        &mut self.routes[idx]
    }

    /// Registers a route matching `path` and dispatching to `handler`.
    /// ```rust
    /// use muxrouter::Router;
    /// use hyper::{Response, Body, Request};
    ///
    /// let mut router = Router::new();
    /// router.handle("/teapot", |_: Request<Body>| async {
    ///     Ok(Response::new(Body::from("I am a teapot!")))
    /// });
    /// ```
    pub fn handle(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.new_route().path(path).handler(handler)
    }

    /// Registers a route matching `path` and dispatching to an async function
    /// or closure, see [`Route::handler_fn`].
    pub fn handle_fn<F, R>(&mut self, path: &str, f: F) -> &mut Route
    where
        F: Fn(Request<Body>) -> R + Send + Sync + 'static,
        R: Future<Output = hyper::Result<Response<Body>>> + Send + Sync + 'static,
    {
        self.new_route().path(path).handler_fn(f)
    }

    /// Registers a new route with a host matcher, see [`Route::host`].
    pub fn host(&mut self, tpl: &str) -> &mut Route {
        self.new_route().host(tpl)
    }

    /// Registers a new route with a path matcher, see [`Route::path`].
    pub fn path(&mut self, tpl: &str) -> &mut Route {
        self.new_route().path(tpl)
    }

    /// Registers a new route with a path prefix matcher, see [`Route::path_prefix`].
    pub fn path_prefix(&mut self, tpl: &str) -> &mut Route {
        self.new_route().path_prefix(tpl)
    }

    /// Registers a new route with a methods matcher, see [`Route::methods`].
    pub fn methods(&mut self, methods: &[&str]) -> &mut Route {
        self.new_route().methods(methods)
    }

    /// Registers a new route with a schemes matcher, see [`Route::schemes`].
    pub fn schemes(&mut self, schemes: &[&str]) -> &mut Route {
        self.new_route().schemes(schemes)
    }

    /// Registers a new route with a headers matcher, see [`Route::headers`].
    pub fn headers(&mut self, pairs: &[&str]) -> &mut Route {
        self.new_route().headers(pairs)
    }

    /// Registers a new route with a queries matcher, see [`Route::queries`].
    pub fn queries(&mut self, pairs: &[&str]) -> &mut Route {
        self.new_route().queries(pairs)
    }

    /// Registers a new route with a custom matcher, see [`Route::matcher_func`].
    pub fn matcher_func<F>(&mut self, f: F) -> &mut Route
    where
        F: Fn(&Request<Body>) -> bool + Send + Sync + 'static,
    {
        self.new_route().matcher_func(f)
    }

    /// Registers a new route with a URL variables transform, see
    /// [`Route::build_vars_func`].
    pub fn build_vars_func<F>(&mut self, f: F) -> &mut Route
    where
        F: Fn(Vars) -> Vars + Send + Sync + 'static,
    {
        self.new_route().build_vars_func(f)
    }

    /// Register a handler for `GET` requests
    pub fn get(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.handle(path, handler).methods(&["GET"])
    }

    /// Register a handler for `HEAD` requests
    pub fn head(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.handle(path, handler).methods(&["HEAD"])
    }

    /// Register a handler for `OPTIONS` requests
    pub fn options(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.handle(path, handler).methods(&["OPTIONS"])
    }

    /// Register a handler for `POST` requests
    pub fn post(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.handle(path, handler).methods(&["POST"])
    }

    /// Register a handler for `PUT` requests
    pub fn put(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.handle(path, handler).methods(&["PUT"])
    }

    /// Register a handler for `PATCH` requests
    pub fn patch(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.handle(path, handler).methods(&["PATCH"])
    }

    /// Register a handler for `DELETE` requests
    pub fn delete(&mut self, path: &str, handler: impl Handler + 'static) -> &mut Route {
        self.handle(path, handler).methods(&["DELETE"])
    }

    /// Defines the trailing slash behavior of routes registered afterwards.
    ///
    /// When enabled, a route with the path `/path/` also matches `/path`, and
    /// a route with the path `/path` also matches `/path/`, and the request is
    /// redirected with status code 301 to the registered form. Path prefixes
    /// are not affected. Subrouters inherit the setting.
    pub fn strict_slash(&mut self, value: bool) -> &mut Self {
        self.conf.strict_slash = value;
        self
    }

    /// Disables path cleaning.
    ///
    /// By default the router redirects requests for paths containing `.`,
    /// `..` or doubled slashes to the cleaned path, with status code 301.
    /// When skipping, `/fetch/http://xkcd.com/534/` reaches the router as is.
    pub fn skip_clean(&mut self, value: bool) -> &mut Self {
        self.conf.skip_clean = value;
        self
    }

    /// Matches paths of routes registered afterwards against the raw,
    /// percent-encoded request path, so `/path/foo%2Fbar/to` matches
    /// `/path/{var}/to`.
    pub fn use_encoded_path(&mut self) -> &mut Self {
        self.conf.use_encoded_path = true;
        self
    }

    /// Sets the compiler used for the templates of routes registered
    /// afterwards, see [`RegexCompiler`](crate::RegexCompiler).
    pub fn regex_compiler(&mut self, compiler: impl RegexCompiler + 'static) -> &mut Self {
        self.conf.compiler = Arc::new(compiler);
        self
    }

    /// Registers `pattern` under `alias`, so templates of routes registered
    /// afterwards can use `{name:alias}`.
    ///
    /// ```rust
    /// use muxrouter::Router;
    ///
    /// let mut router = Router::new();
    /// router.register_pattern(
    ///     "uuid",
    ///     "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
    /// );
    /// let route = router.path("/orders/{id:uuid}");
    /// assert!(route.get_path_regexp().unwrap().contains("[0-9a-fA-F]{8}"));
    /// ```
    pub fn register_pattern(&mut self, alias: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.conf.patterns).insert(alias.into(), pattern.into());
        self
    }

    /// Configurable handler which is called when no matching route is
    /// found. Defaults to a plain `404 page not found`.
    pub fn not_found(&mut self, handler: impl Handler + 'static) -> &mut Self {
        self.not_found = Some(Arc::new(handler));
        self
    }

    /// Configurable handler which is called when a route matches everything
    /// but the request method. Defaults to an empty `405` response.
    pub fn method_not_allowed(&mut self, handler: impl Handler + 'static) -> &mut Self {
        self.method_not_allowed = Some(Arc::new(handler));
        self
    }

    /// Appends a middleware to the chain.
    ///
    /// Middleware run in registration order, the first registered being the
    /// outermost, and only for requests that matched a route of this router
    /// or of a nested router.
    pub fn use_middleware(&mut self, middleware: impl Middleware + 'static) -> &mut Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// The routes registered on this router, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the last route named `name`, anywhere in the route tree.
    pub fn named(&self, name: &str) -> Option<&Route> {
        let mut found = None;
        self.find_named(name, &mut found);
        found
    }

    /// Returns the methods of the routes of this router whose path template
    /// is `template`, in registration order and without duplicates.
    ///
    /// Routes without a methods matcher contribute nothing, and routes of
    /// nested routers are not considered.
    pub fn allowed_methods(&self, template: &str) -> Vec<&Method> {
        let mut allowed: Vec<&Method> = Vec::new();
        let siblings = self
            .routes
            .iter()
            .filter(|route| route.get_path_template().map_or(false, |t| t == template));
        for route in siblings {
            for method in route.get_methods().unwrap_or_default() {
                if !allowed.contains(&method) {
                    allowed.push(method);
                }
            }
        }
        allowed
    }

    fn find_named<'a>(&'a self, name: &str, found: &mut Option<&'a Route>) {
        for route in &self.routes {
            if route.get_name() == Some(name) {
                *found = Some(route);
            }
            for router in route.nested_routers() {
                router.find_named(name, found);
            }
        }
    }

    /// Walks the route tree depth-first, in registration order.
    ///
    /// `visit` receives each route, the router it belongs to, and the routes
    /// leading to that router. Returning [`Visit::SkipRouter`] skips the
    /// routers nested under the route; returning an error stops the walk.
    ///
    /// ```rust
    /// use muxrouter::{Router, Visit};
    /// use std::convert::Infallible;
    ///
    /// let mut router = Router::new();
    /// router.path("/").name("home");
    /// router.path_prefix("/admin").subrouter().path("/users").name("users");
    ///
    /// let mut templates = Vec::new();
    /// router
    ///     .walk(|route, _, ancestors| {
    ///         templates.push((route.get_path_template().unwrap().to_owned(), ancestors.len()));
    ///         Ok::<_, Infallible>(Visit::Continue)
    ///     })
    ///     .unwrap();
    /// assert_eq!(templates, [("/".into(), 0), ("/admin".into(), 0), ("/admin/users".into(), 1)]);
    /// ```
    pub fn walk<F, E>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&Route, &Router, &[&Route]) -> Result<Visit, E>,
    {
        let mut ancestors = Vec::new();
        self.walk_inner(&mut visit, &mut ancestors)
    }

    fn walk_inner<'a, F, E>(&'a self, visit: &mut F, ancestors: &mut Vec<&'a Route>) -> Result<(), E>
    where
        F: FnMut(&Route, &Router, &[&Route]) -> Result<Visit, E>,
    {
        for route in &self.routes {
            if visit(route, self, ancestors.as_slice())? == Visit::SkipRouter {
                continue;
            }

            for router in route.nested_routers() {
                ancestors.push(route);
                let result = router.walk_inner(visit, ancestors);
                ancestors.pop();
                result?;
            }
        }
        Ok(())
    }

    /// Matches `req` against the registered routes.
    ///
    /// When a route matches, the handler of the result is wrapped by the
    /// middleware of the router. Otherwise the result carries the reason and,
    /// if configured, the not-found or method-not-allowed handler.
    pub fn match_request(&self, req: &Request<Body>) -> RouteMatch<'_> {
        self.match_view(&RequestView::new(req))
    }

    pub(crate) fn match_view<'a>(&'a self, req: &RequestView<'_>) -> RouteMatch<'a> {
        let mut method_mismatch = false;
        for route in &self.routes {
            let mut m = route.match_view(req);
            if m.is_match() {
                let own = m.route.map_or(false, |matched| std::ptr::eq(matched, route));
                if own {
                    if let Ok(template) = route.get_path_template() {
                        m.allowed = self.allowed_methods(template).into_iter().cloned().collect();
                    }
                }
                if m.error.is_none() {
                    if let Some(handler) = m.handler.take() {
                        m.handler = Some(self.wrap(handler));
                    }
                }
                return m;
            }
            method_mismatch |= m.error == Some(MatchError::MethodMismatch);
        }

        if method_mismatch {
            return match &self.method_not_allowed {
                Some(handler) => RouteMatch::fallback(handler.clone(), MatchError::MethodMismatch),
                None => RouteMatch::no_match(MatchError::MethodMismatch),
            };
        }

        match &self.not_found {
            Some(handler) => RouteMatch::fallback(handler.clone(), MatchError::NotFound),
            None => RouteMatch::no_match(MatchError::NotFound),
        }
    }

    /// Wraps `handler` with the middleware chain.
    fn wrap(&self, handler: BoxHandler) -> BoxHandler {
        self.middlewares
            .iter()
            .rev()
            .fold(handler, |next, middleware| middleware.middleware(next))
    }

    /// Returns where to redirect `req` if its path isn't clean.
    fn clean_redirect(&self, req: &Request<Body>) -> Option<String> {
        let raw = req.uri().path();
        if self.conf.use_encoded_path {
            let cleaned = clean(raw);
            return (cleaned != raw).then(|| location(req.uri(), &cleaned));
        }

        let decoded = percent_decode_str(raw).decode_utf8_lossy();
        let cleaned = clean(&decoded);
        (cleaned != decoded).then(|| location(req.uri(), &escape_path(&cleaned)))
    }
}

/// The default router configuration
impl Default for Router {
    fn default() -> Self {
        Self::with_conf(RouteConf::default())
    }
}

/// Represents a HTTP handler function.
/// This trait is implemented for asynchronous functions that take a `Request` and return a
/// `Result<Response<Body>, hyper::Error>`
/// ```rust
/// # use muxrouter::Handler;
/// # use hyper::{Request, Response, Body};
/// async fn hello(_: Request<Body>) -> Result<Response<Body>, hyper::Error> {
///     Ok(Response::new(Body::empty()))
/// }
///
/// let handler: Box<dyn Handler> = Box::new(hello);
/// ```
///
/// A [`Router`] is a handler too, so a router can be mounted as the handler
/// of another router's route.
pub trait Handler: Send + Sync {
    fn handle(&self, req: Request<Body>) -> HandlerFuture;

    /// Returns the router behind this handler, if it is one.
    #[doc(hidden)]
    fn as_router(&self) -> Option<&Router> {
        None
    }
}

impl<F, R> Handler for F
where
    F: Fn(Request<Body>) -> R + Send + Sync,
    R: Future<Output = Result<Response<Body>, hyper::Error>> + Send + Sync + 'static,
{
    fn handle(&self, req: Request<Body>) -> HandlerFuture {
        Box::pin(self(req))
    }
}

impl Handler for Router {
    fn handle(&self, req: Request<Body>) -> HandlerFuture {
        Box::pin(self.serve(req))
    }

    fn as_router(&self) -> Option<&Router> {
        Some(self)
    }
}

/// Redirects every request to a fixed location with status code 301.
struct Redirect(String);

impl Handler for Redirect {
    fn handle(&self, _: Request<Body>) -> HandlerFuture {
        Box::pin(ResponseFut::from(ResponseFutKind::Redirect(self.0.clone())))
    }
}

pub(crate) fn redirect(location: String) -> BoxHandler {
    debug!(%location, "redirecting to the registered trailing slash form");
    Arc::new(Redirect(location))
}

/// Returns the URL of `uri` with its path replaced by `path`. The query is
/// kept, and so are the scheme and authority of absolute URIs.
pub(crate) fn location(uri: &Uri, path: &str) -> String {
    let mut location = String::with_capacity(path.len());
    if let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) {
        location.push_str(scheme);
        location.push_str("://");
        location.push_str(authority.as_str());
    }
    location.push_str(path);
    if let Some(query) = uri.query() {
        location.push('?');
        location.push_str(query);
    }
    location
}

#[doc(hidden)]
pub struct MakeRouterService(RouterService);

impl<T> Service<T> for MakeRouterService {
    type Response = RouterService;
    type Error = hyper::Error;
    type Future = future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        let service = self.0.clone();
        future::ok(service)
    }
}

#[doc(hidden)]
#[derive(Clone)]
pub struct RouterService(Arc<Router>);

impl RouterService {
    fn new(router: Router) -> Self {
        RouterService(Arc::new(router))
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response<Body>;
    type Error = hyper::Error;
    type Future = ResponseFut;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        self.0.serve(req)
    }
}

impl Router {
    /// Converts the `Router` into a `Service` which you can serve directly with `Hyper`.
    /// If you have an existing `Service` that you want to incorporate a `Router` into, see
    /// [`Router::serve`](crate::Router::serve).
    /// ```rust,no_run
    /// # use muxrouter::Router;
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// // Our router...
    /// let router = Router::new();
    ///
    /// // Convert it into a service...
    /// let service = router.into_service();
    ///
    /// // Serve with hyper
    /// hyper::Server::bind(&([127, 0, 0, 1], 3030).into())
    ///     .serve(service)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_service(self) -> MakeRouterService {
        MakeRouterService(RouterService::new(self))
    }

    /// An asynchronous function from a `Request` to a `Response`. You will generally not need to use
    /// this function directly, and instead use
    /// [`Router::into_service`](crate::Router::into_service). However, it may be useful when
    /// incorporating the router into a larger service.
    ///
    /// Unless [`skip_clean`](Router::skip_clean) is set, requests for unclean
    /// paths are redirected first. Matched requests carry their
    /// [`vars`](crate::vars) and [`current_route`](crate::current_route) in
    /// their extensions.
    /// ```rust,no_run
    /// # use muxrouter::Router;
    /// # use hyper::service::{make_service_fn, service_fn};
    /// # use hyper::{Request, Body, Server};
    /// # use std::convert::Infallible;
    /// # use std::sync::Arc;
    ///
    /// # async fn run() {
    /// let router = Arc::new(Router::new());
    ///
    /// let make_svc = make_service_fn(move |_| {
    ///     let router = router.clone();
    ///     async move {
    ///         Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
    ///             let router = router.clone();
    ///             async move { router.serve(req).await }
    ///         }))
    ///     }
    /// });
    ///
    /// let server = Server::bind(&([127, 0, 0, 1], 3000).into())
    ///     .serve(make_svc)
    ///     .await;
    /// # }
    /// ```
    pub fn serve(&self, mut req: Request<Body>) -> ResponseFut {
        if !self.conf.skip_clean {
            if let Some(location) = self.clean_redirect(&req) {
                debug!(%location, "redirecting to the clean path");
                return ResponseFutKind::Redirect(location).into();
            }
        }

        let RouteMatch {
            route,
            handler,
            vars,
            error,
            allowed,
            ..
        } = self.match_request(&req);

        let handler = match handler {
            Some(handler) => handler,
            None if error == Some(MatchError::MethodMismatch) => {
                debug!(method = %req.method(), path = %req.uri().path(), "method not allowed");
                return ResponseFutKind::MethodNotAllowed.into();
            }
            None => {
                debug!(method = %req.method(), path = %req.uri().path(), "no route found");
                return ResponseFutKind::NotFound.into();
            }
        };

        if let Some(route) = route {
            set_current_route(&mut req, route.info().clone());
            set_allowed_methods(&mut req, allowed);
        }
        req.extensions_mut().insert(vars);
        ResponseFutKind::Boxed(handler.handle(req)).into()
    }
}

pub struct ResponseFut {
    kind: ResponseFutKind,
}

impl From<ResponseFutKind> for ResponseFut {
    fn from(kind: ResponseFutKind) -> Self {
        Self { kind }
    }
}

enum ResponseFutKind {
    Boxed(HandlerFuture),
    Redirect(String),
    MethodNotAllowed,
    NotFound,
}

fn empty(status: StatusCode) -> Response<Body> {
    let mut res = Response::new(Body::empty());
    *res.status_mut() = status;
    res
}

impl Future for ResponseFut {
    type Output = hyper::Result<Response<Body>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let ready = match self.kind {
            ResponseFutKind::Boxed(ref mut fut) => ready!(fut.as_mut().poll(cx)),
            ResponseFutKind::Redirect(ref location) => {
                let mut res = empty(StatusCode::MOVED_PERMANENTLY);
                if let Ok(location) = HeaderValue::from_str(location) {
                    res.headers_mut().insert(header::LOCATION, location);
                }
                Ok(res)
            }
            ResponseFutKind::NotFound => {
                let mut res = Response::new(Body::from("404 page not found\n"));
                *res.status_mut() = StatusCode::NOT_FOUND;
                res.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                );
                res.headers_mut().insert(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                );
                Ok(res)
            }
            ResponseFutKind::MethodNotAllowed => Ok(empty(StatusCode::METHOD_NOT_ALLOWED)),
        };

        Poll::Ready(ready)
    }
}
