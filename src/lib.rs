//! # muxrouter
//!
//! muxrouter is a request router and dispatcher for [hyper](https://hyper.rs).
//!
//! It matches incoming requests against a list of registered routes and calls
//! the handler of the route that matches the URL or other conditions.
//!
//! ## Features
//!
//! **Requests can be matched on anything:** URL host, path, path prefix,
//! scheme, header and query values, HTTP method, or a custom predicate.
//! Routes are tried in registration order and the first one whose conditions
//! all hold wins.
//!
//! **Variables with optional regular expressions:** URL hosts, paths and query
//! values are templates such as `/articles/{category}/{id:[0-9]+}`. The values
//! matched by the variables are passed to the handler.
//!
//! **Reversible routes:** registered URLs can be built from a route and
//! variable values, which keeps references to resources in sync with the
//! routes.
//!
//! **Subrouters:** routes sharing conditions, a host or a path prefix for
//! example, can be grouped under a subrouter which is only tried when the
//! shared conditions match. Each router has its own middleware and fallback
//! handlers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use muxrouter::{vars, Router};
//! use hyper::{Body, Request, Response};
//!
//! async fn home(_: Request<Body>) -> hyper::Result<Response<Body>> {
//!     Ok(Response::new("Hello, World!".into()))
//! }
//!
//! async fn article(req: Request<Body>) -> hyper::Result<Response<Body>> {
//!     let vars = vars(&req).unwrap();
//!     Ok(Response::new(format!("Category: {}", vars.get("category").unwrap()).into()))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut router = Router::new();
//!     router.get("/", home);
//!     router.get("/articles/{category}/", article);
//!     router.get("/articles/{category}/{id:[0-9]+}", article).name("article");
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await;
//! }
//! ```
//!
//! ### Building URLs
//!
//! ```rust
//! use muxrouter::Router;
//!
//! let mut router = Router::new();
//! router
//!     .host("{subdomain}.example.com")
//!     .path("/articles/{category}/{id:[0-9]+}")
//!     .queries(&["filter", "{filter}"])
//!     .name("article");
//!
//! let url = router
//!     .named("article")
//!     .unwrap()
//!     .url(&["subdomain", "news", "category", "technology", "id", "42", "filter", "gorilla"])
//!     .unwrap();
//! assert_eq!(url.to_string(), "http://news.example.com/articles/technology/42?filter=gorilla");
//! ```
//!
//! ### Middleware
//!
//! Middleware wrap the handler of every matched route, see [`Middleware`].
//! Requests that don't match any route go to the not-found or
//! method-not-allowed handlers without running any middleware.

#![forbid(unsafe_code)]

mod context;
mod error;
mod matcher;
mod middleware;
mod regexp;
mod route;

#[doc(hidden)]
pub mod path;

#[doc(hidden)]
pub mod router;

#[doc(inline)]
pub use router::{BoxHandler, Handler, HandlerFuture, Router, Visit};

pub use context::{current_route, set_url_vars, vars, Vars};
pub use error::{Error, MatchError, Result};
pub use matcher::MatcherFn;
pub use middleware::{CorsMethodMiddleware, Middleware, RequestLogger};
pub use regexp::{RegexCache, RegexCompiler};
pub use route::{BuildVarsFn, Route, RouteInfo, RouteMatch, RouteUrl};
