//! Request predicates a route is made of.

use crate::regexp::RouteRegexp;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use hyper::header::{HeaderMap, HeaderName, HOST};
use hyper::{Body, Method, Request};
use percent_encoding::percent_decode_str;
use regex::Regex;

/// A custom request predicate, see [`Route::matcher_func`](crate::Route::matcher_func).
pub type MatcherFn = Arc<dyn Fn(&Request<Body>) -> bool + Send + Sync>;

/// The request facets matchers look at, computed once per request.
pub(crate) struct RequestView<'r> {
    req: &'r Request<Body>,
    host: &'r str,
    path: Cow<'r, str>,
}

impl<'r> RequestView<'r> {
    pub(crate) fn new(req: &'r Request<Body>) -> Self {
        let host = match req.uri().authority() {
            // drop any userinfo
            Some(authority) => authority.as_str().rsplit('@').next().unwrap_or_default(),
            None => req
                .headers()
                .get(HOST)
                .and_then(|host| host.to_str().ok())
                .unwrap_or_default(),
        };

        Self {
            req,
            host,
            path: percent_decode_str(req.uri().path()).decode_utf8_lossy(),
        }
    }

    pub(crate) fn request(&self) -> &'r Request<Body> {
        self.req
    }

    pub(crate) fn method(&self) -> &Method {
        self.req.method()
    }

    /// The URI scheme, `http` when the request target isn't absolute.
    pub(crate) fn scheme(&self) -> &str {
        self.req.uri().scheme_str().unwrap_or("http")
    }

    pub(crate) fn host(&self) -> &str {
        self.host
    }

    /// The request path, percent-decoded unless `encoded` is set.
    pub(crate) fn path(&self, encoded: bool) -> &str {
        if encoded {
            self.req.uri().path()
        } else {
            &self.path
        }
    }

    pub(crate) fn raw_query(&self) -> &str {
        self.req.uri().query().unwrap_or_default()
    }

    pub(crate) fn headers(&self) -> &HeaderMap {
        self.req.headers()
    }
}

/// A single predicate contributing to a route's match decision.
#[derive(Clone)]
pub(crate) enum Matcher {
    /// A host, path, path prefix or query template.
    Regexp(Arc<RouteRegexp>),
    /// Header values compared exactly. An empty value only requires the
    /// header to be present.
    Headers(Vec<(HeaderName, String)>),
    /// Header values matched against unanchored regular expressions.
    HeadersRegexp(Vec<(HeaderName, Regex)>),
    Methods(Vec<Method>),
    /// Lowercase scheme names.
    Schemes(Vec<String>),
    Func(MatcherFn),
}

impl Matcher {
    pub(crate) fn matches(&self, req: &RequestView<'_>) -> bool {
        match self {
            Matcher::Regexp(regexp) => regexp.matches(req),
            Matcher::Headers(pairs) => pairs.iter().all(|(name, expected)| {
                let mut values = req.headers().get_all(name).iter().peekable();
                if values.peek().is_none() {
                    return false;
                }
                expected.is_empty() || values.any(|value| value.as_bytes() == expected.as_bytes())
            }),
            Matcher::HeadersRegexp(pairs) => pairs.iter().all(|(name, regex)| {
                req.headers()
                    .get_all(name)
                    .iter()
                    .filter_map(|value| value.to_str().ok())
                    .any(|value| regex.is_match(value))
            }),
            Matcher::Methods(methods) => methods.contains(req.method()),
            Matcher::Schemes(schemes) => {
                let scheme = req.scheme();
                schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
            }
            Matcher::Func(f) => f(req.request()),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Regexp(regexp) => f.debug_tuple("Regexp").field(&regexp.template()).finish(),
            Matcher::Headers(pairs) => f.debug_tuple("Headers").field(pairs).finish(),
            Matcher::HeadersRegexp(pairs) => f.debug_tuple("HeadersRegexp").field(pairs).finish(),
            Matcher::Methods(methods) => f.debug_tuple("Methods").field(methods).finish(),
            Matcher::Schemes(schemes) => f.debug_tuple("Schemes").field(schemes).finish(),
            Matcher::Func(_) => f.write_str("Func"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn request_view_facets() {
        let req = request("https://user@www.example.com:8080/a%20b/c?x=1");
        let view = RequestView::new(&req);
        assert_eq!(view.scheme(), "https");
        assert_eq!(view.host(), "www.example.com:8080");
        assert_eq!(view.path(false), "/a b/c");
        assert_eq!(view.path(true), "/a%20b/c");
        assert_eq!(view.raw_query(), "x=1");

        let req = Request::builder()
            .uri("/a")
            .header(HOST, "example.org")
            .body(Body::empty())
            .unwrap();
        let view = RequestView::new(&req);
        assert_eq!(view.scheme(), "http");
        assert_eq!(view.host(), "example.org");
        assert_eq!(view.raw_query(), "");
    }

    #[test]
    fn header_matchers() {
        let req = Request::builder()
            .uri("/")
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("X-Requested-With", "fetch")
            .body(Body::empty())
            .unwrap();
        let view = RequestView::new(&req);

        let name = |s: &str| HeaderName::from_bytes(s.as_bytes()).unwrap();
        let exact = |pairs: &[(&str, &str)]| {
            Matcher::Headers(
                pairs
                    .iter()
                    .map(|(k, v)| (name(k), v.to_string()))
                    .collect(),
            )
        };

        assert!(exact(&[("content-type", "application/json")]).matches(&view));
        assert!(exact(&[("x-requested-with", "fetch")]).matches(&view));
        assert!(exact(&[("content-type", "")]).matches(&view));
        assert!(!exact(&[("content-type", "application/JSON")]).matches(&view));
        assert!(!exact(&[("accept", "")]).matches(&view));
        assert!(!exact(&[("content-type", ""), ("accept", "")]).matches(&view));

        let re = Matcher::HeadersRegexp(vec![(
            name("content-type"),
            Regex::new("application/(text|json)").unwrap(),
        )]);
        assert!(re.matches(&view));
        let re = Matcher::HeadersRegexp(vec![(name("content-type"), Regex::new("^text/").unwrap())]);
        assert!(!re.matches(&view));
    }

    #[test]
    fn method_and_scheme_matchers() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("https://example.com/")
            .body(Body::empty())
            .unwrap();
        let view = RequestView::new(&req);

        assert!(Matcher::Methods(vec![Method::GET, Method::POST]).matches(&view));
        assert!(!Matcher::Methods(vec![Method::GET]).matches(&view));
        assert!(Matcher::Schemes(vec!["https".into()]).matches(&view));
        assert!(!Matcher::Schemes(vec!["http".into()]).matches(&view));

        let func = Matcher::Func(Arc::new(|req: &Request<Body>| req.uri().port().is_none()));
        assert!(func.matches(&view));
    }
}
