//! Middleware wrapping the handlers of matched routes.

use crate::context::allowed_methods;
use crate::router::{BoxHandler, Handler, HandlerFuture};

use std::sync::Arc;
use std::time::Instant;

use hyper::header::{self, HeaderValue};
use hyper::{Body, Method, Request};
use tracing::info;

/// Wraps a handler into another handler.
///
/// Middleware are registered with [`Router::use_middleware`](crate::Router::use_middleware) and run, in
/// registration order, for every request that matched a route. Closures
/// taking and returning a [`BoxHandler`] are middleware:
///
/// ```rust
/// use muxrouter::{BoxHandler, Handler, Router};
/// use hyper::{Body, Request};
/// use std::sync::Arc;
///
/// let mut router = Router::new();
/// router.use_middleware(|next: BoxHandler| -> BoxHandler {
///     Arc::new(move |req: Request<Body>| {
///         println!("{} {}", req.method(), req.uri());
///         next.handle(req)
///     })
/// });
/// ```
pub trait Middleware: Send + Sync {
    fn middleware(&self, next: BoxHandler) -> BoxHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxHandler) -> BoxHandler + Send + Sync,
{
    fn middleware(&self, next: BoxHandler) -> BoxHandler {
        self(next)
    }
}

/// Sets the `Access-Control-Allow-Methods` response header to the methods of
/// every route sharing the path template of the matched route, among the
/// routes of the router the matched route belongs to.
///
/// For `OPTIONS` requests the header is only set when one of those routes
/// accepts `OPTIONS`. For other requests it is set whenever the routes
/// declare any method. The handler of the matched route always runs, and a
/// header it set is kept.
///
/// The routes are looked up when the request is dispatched, so the
/// middleware can be registered before or after the routes:
///
/// ```rust
/// use muxrouter::{CorsMethodMiddleware, Router};
/// use hyper::{Body, Request, Response};
///
/// async fn foo(_: Request<Body>) -> hyper::Result<Response<Body>> {
///     Ok(Response::new(Body::empty()))
/// }
///
/// let mut router = Router::new();
/// router.use_middleware(CorsMethodMiddleware::new());
/// router.handle("/foo", foo).methods(&["GET", "PUT", "PATCH"]);
/// router.handle("/foo", foo).methods(&["OPTIONS"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CorsMethodMiddleware;

impl CorsMethodMiddleware {
    pub fn new() -> Self {
        Self
    }

    fn allow_header(req: &Request<Body>) -> Option<HeaderValue> {
        let allowed = allowed_methods(req)?;
        if allowed.is_empty() {
            return None;
        }
        if *req.method() == Method::OPTIONS && !allowed.contains(&Method::OPTIONS) {
            return None;
        }

        let joined = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",");
        HeaderValue::from_str(&joined).ok()
    }
}

impl Middleware for CorsMethodMiddleware {
    fn middleware(&self, next: BoxHandler) -> BoxHandler {
        Arc::new(Cors { next })
    }
}

struct Cors {
    next: BoxHandler,
}

impl Handler for Cors {
    fn handle(&self, req: Request<Body>) -> HandlerFuture {
        let allow = CorsMethodMiddleware::allow_header(&req);
        let res = self.next.handle(req);
        Box::pin(async move {
            let mut res = res.await?;
            if let Some(allow) = allow {
                res.headers_mut()
                    .entry(header::ACCESS_CONTROL_ALLOW_METHODS)
                    .or_insert(allow);
            }
            Ok(res)
        })
    }
}

/// Emits an `info` event for every request reaching a handler, with the
/// method, the path and query, the response status and the latency.
///
/// ```rust
/// use muxrouter::{RequestLogger, Router};
///
/// let mut router = Router::new();
/// router.use_middleware(RequestLogger);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn middleware(&self, next: BoxHandler) -> BoxHandler {
        Arc::new(Logged { next })
    }
}

struct Logged {
    next: BoxHandler,
}

impl Handler for Logged {
    fn handle(&self, req: Request<Body>) -> HandlerFuture {
        let start = Instant::now();
        let method = req.method().clone();
        let path = match req.uri().path_and_query() {
            Some(path) => path.as_str().to_owned(),
            None => req.uri().path().to_owned(),
        };

        let res = self.next.handle(req);
        Box::pin(async move {
            let res = res.await?;
            info!(
                %method,
                %path,
                status = res.status().as_u16(),
                latency_ms = start.elapsed().as_secs_f64() * 1000.0,
                "request handled"
            );
            Ok(res)
        })
    }
}
