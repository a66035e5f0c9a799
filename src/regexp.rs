//! Route templates compiled into regular expressions.
//!
//! A template is a literal string with `{name}` or `{name:pattern}`
//! placeholders. Compiling it produces an anchored regular expression with one
//! named group per placeholder, plus a reverse template used to build URLs
//! from variable bindings.

use crate::context::Vars;
use crate::error::{Error, Result};
use crate::matcher::RequestView;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use regex::Regex;

/// Characters escaped when a path is written into a URL. `/` is kept.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped in a query value, like an HTML form would.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Compiles the regular expressions built from route templates.
///
/// Every template compiles one expression for the whole template and one per
/// placeholder, so applications registering many similar routes may want to
/// reuse compiled expressions, see [`RegexCache`]. The compiler is configured
/// on a [`Router`](crate::Router) before routes are registered; replacing it
/// while routes are being compiled is not supported.
///
/// Closures implement this trait:
///
/// ```rust
/// use muxrouter::Router;
///
/// let mut router = Router::default();
/// router.regex_compiler(|pattern: &str| regex::Regex::new(pattern));
/// ```
pub trait RegexCompiler: Send + Sync {
    /// Compiles `pattern`.
    fn compile(&self, pattern: &str) -> std::result::Result<Regex, regex::Error>;
}

impl<F> RegexCompiler for F
where
    F: Fn(&str) -> std::result::Result<Regex, regex::Error> + Send + Sync,
{
    fn compile(&self, pattern: &str) -> std::result::Result<Regex, regex::Error> {
        self(pattern)
    }
}

/// A [`RegexCompiler`] that memoizes compiled expressions.
///
/// The cache never evicts.
#[derive(Default)]
pub struct RegexCache {
    compiled: RwLock<HashMap<String, Regex>>,
}

impl RegexCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct expressions compiled so far.
    pub fn len(&self) -> usize {
        self.compiled.read().len()
    }

    /// Returns `true` if nothing was compiled yet.
    pub fn is_empty(&self) -> bool {
        self.compiled.read().is_empty()
    }
}

impl RegexCompiler for RegexCache {
    fn compile(&self, pattern: &str) -> std::result::Result<Regex, regex::Error> {
        if let Some(regex) = self.compiled.read().get(pattern) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(pattern)?;
        self.compiled
            .write()
            .insert(pattern.to_owned(), regex.clone());
        Ok(regex)
    }
}

impl fmt::Debug for RegexCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexCache")
            .field("len", &self.len())
            .finish()
    }
}

/// The request component a template is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegexpKind {
    Path,
    Prefix,
    Host,
    Query,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RegexpOptions {
    pub(crate) strict_slash: bool,
    pub(crate) use_encoded_path: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(usize),
}

/// A compiled route template.
#[derive(Debug)]
pub(crate) struct RouteRegexp {
    // The unmodified template.
    template: String,
    kind: RegexpKind,
    options: RegexpOptions,
    // Expanded regexp.
    regexp: Regex,
    // Reverse template.
    reverse: Vec<Segment>,
    // Variable names, in declaration order.
    var_names: Vec<String>,
    // Variable validators, used to explain URL building failures.
    var_regexps: Vec<Regex>,
    // The host template has no port, so the request port is ignored.
    wildcard_host_port: bool,
}

impl RouteRegexp {
    /// Compiles `tpl`.
    ///
    /// # Panics
    ///
    /// Panics if a placeholder pattern contains capturing groups: the
    /// template could never be reversed correctly.
    pub(crate) fn new(
        tpl: &str,
        kind: RegexpKind,
        mut options: RegexpOptions,
        compiler: &dyn RegexCompiler,
        aliases: &HashMap<String, String>,
    ) -> Result<Self> {
        let idxs = brace_indices(tpl)?;
        let template = tpl.to_owned();

        let default_pattern = match kind {
            RegexpKind::Query => ".*",
            RegexpKind::Host => "[^.]+",
            RegexpKind::Path | RegexpKind::Prefix => "[^/]+",
        };

        // only paths redirect on a trailing slash mismatch
        if kind != RegexpKind::Path {
            options.strict_slash = false;
        }

        let mut tpl = tpl;
        let mut end_slash = false;
        if options.strict_slash && tpl.ends_with('/') {
            tpl = &tpl[..tpl.len() - 1];
            end_slash = true;
        }

        let mut pattern = String::from("^");
        let mut reverse = Vec::with_capacity(idxs.len() * 2 + 1);
        let mut var_names = Vec::with_capacity(idxs.len());
        let mut var_regexps = Vec::with_capacity(idxs.len());
        let mut literal_has_port = false;
        let mut end = 0;

        for (i, &(start, stop)) in idxs.iter().enumerate() {
            let raw = &tpl[end..start];
            end = stop;

            let inner = &tpl[start + 1..stop - 1];
            let (name, patt) = inner.split_once(':').unwrap_or((inner, default_pattern));
            if name.is_empty() || patt.is_empty() {
                return Err(Error::MissingNameOrPattern(tpl[start..stop].to_owned()));
            }
            let patt = aliases.get(patt).map(String::as_str).unwrap_or(patt);

            // user names may contain hyphens, so groups get synthetic names
            pattern.push_str(&regex::escape(raw));
            pattern.push_str("(?P<v");
            pattern.push_str(&i.to_string());
            pattern.push('>');
            pattern.push_str(patt);
            pattern.push(')');

            literal_has_port |= raw.contains(':');
            if !raw.is_empty() {
                reverse.push(Segment::Literal(raw.to_owned()));
            }
            reverse.push(Segment::Var(i));

            var_names.push(name.to_owned());
            var_regexps.push(compiler.compile(&format!("^(?:{})$", patt))?);
        }

        let raw = &tpl[end..];
        literal_has_port |= raw.contains(':');
        pattern.push_str(&regex::escape(raw));
        if options.strict_slash {
            pattern.push_str("[/]?");
        }
        if kind == RegexpKind::Query {
            if let Some((_, "")) = template.split_once('=') {
                pattern.push_str(default_pattern);
            }
        }
        if kind != RegexpKind::Prefix {
            pattern.push('$');
        }

        let mut tail = raw.to_owned();
        if end_slash {
            tail.push('/');
        }
        if !tail.is_empty() {
            reverse.push(Segment::Literal(tail));
        }

        let regexp = compiler.compile(&pattern)?;
        if regexp.captures_len() - 1 != idxs.len() {
            panic!(
                "route {} contains capture groups in its regexp. \
                 Only non-capturing groups are accepted: e.g. (?:pattern) instead of (pattern)",
                template
            );
        }

        Ok(Self {
            template,
            kind,
            options,
            regexp,
            reverse,
            var_names,
            var_regexps,
            wildcard_host_port: kind == RegexpKind::Host && !literal_has_port,
        })
    }

    pub(crate) fn template(&self) -> &str {
        &self.template
    }

    pub(crate) fn options(&self) -> RegexpOptions {
        self.options
    }

    pub(crate) fn regexp(&self) -> &Regex {
        &self.regexp
    }

    pub(crate) fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// The text of the request this template is matched against.
    fn subject<'v>(&self, req: &'v RequestView<'_>) -> Option<Cow<'v, str>> {
        match self.kind {
            RegexpKind::Host => {
                let host = req.host();
                if self.wildcard_host_port {
                    // not strict on the port
                    if let Some(i) = host.find(':') {
                        return Some(Cow::Borrowed(&host[..i]));
                    }
                }
                Some(Cow::Borrowed(host))
            }
            RegexpKind::Query => {
                let key = self
                    .template
                    .split_once('=')
                    .map_or(self.template.as_str(), |(key, _)| key);
                find_first_query_key(req.raw_query(), key)
                    .map(|value| Cow::Owned(format!("{}={}", key, value)))
            }
            RegexpKind::Path | RegexpKind::Prefix => {
                Some(Cow::Borrowed(req.path(self.options.use_encoded_path)))
            }
        }
    }

    pub(crate) fn matches(&self, req: &RequestView<'_>) -> bool {
        self.subject(req)
            .map_or(false, |subject| self.regexp.is_match(&subject))
    }

    /// Stores the variables captured from the request into `vars`.
    pub(crate) fn extract(&self, req: &RequestView<'_>, vars: &mut Vars) {
        let subject = match self.subject(req) {
            Some(subject) => subject,
            None => return,
        };

        if let Some(captures) = self.regexp.captures(&subject) {
            for (i, name) in self.var_names.iter().enumerate() {
                if let Some(value) = captures.get(i + 1) {
                    vars.insert(name.clone(), value.as_str().to_owned());
                }
            }
        }
    }

    /// Builds this component of a URL from `values`.
    pub(crate) fn url(&self, values: &Vars) -> Result<String> {
        let mut built = String::new();
        for segment in &self.reverse {
            match segment {
                Segment::Literal(literal) => built.push_str(literal),
                Segment::Var(i) => {
                    let name = &self.var_names[*i];
                    let value = values
                        .get(name)
                        .ok_or_else(|| Error::MissingVariable(name.clone()))?;
                    if self.kind == RegexpKind::Query {
                        built.push_str(&query_escape(value));
                    } else {
                        built.push_str(value);
                    }
                }
            }
        }

        // The whole template is checked first, individual variables only to
        // report which one is wrong.
        if !self.regexp.is_match(&built) {
            for (name, validator) in self.var_names.iter().zip(&self.var_regexps) {
                let value = values.get(name).unwrap_or_default();
                if !validator.is_match(value) {
                    return Err(Error::VariableMismatch {
                        value: value.to_owned(),
                        expected: validator.as_str().to_owned(),
                    });
                }
            }
        }

        let encode = matches!(self.kind, RegexpKind::Path | RegexpKind::Prefix)
            && !self.options.use_encoded_path;
        if encode {
            return Ok(escape_path(&built));
        }
        Ok(built)
    }

    /// Checks that none of `other`'s variables is declared by this template.
    pub(crate) fn unique_vars(&self, other: &RouteRegexp) -> Result<()> {
        for name in &self.var_names {
            if other.var_names.contains(name) {
                return Err(Error::DuplicatedVariable(name.clone()));
            }
        }
        Ok(())
    }
}

/// Returns the byte offsets of the first-level `{...}` blocks of `s`, as
/// `(start, end)` with `end` past the closing brace.
fn brace_indices(s: &str) -> Result<Vec<(usize, usize)>> {
    let mut level = 0usize;
    let mut idx = 0;
    let mut idxs = Vec::new();

    for (i, b) in s.bytes().enumerate() {
        match b {
            b'{' => {
                level += 1;
                if level == 1 {
                    idx = i;
                }
            }
            b'}' => {
                if level == 0 {
                    return Err(Error::UnbalancedBraces(s.to_owned()));
                }
                level -= 1;
                if level == 0 {
                    idxs.push((idx, i + 1));
                }
            }
            _ => {}
        }
    }

    if level != 0 {
        return Err(Error::UnbalancedBraces(s.to_owned()));
    }
    Ok(idxs)
}

/// Returns the decoded value of the first `key` in a raw query string.
/// Pairs may be separated by `&` or `;`.
pub(crate) fn find_first_query_key(raw_query: &str, key: &str) -> Option<String> {
    raw_query
        .split(|c| c == '&' || c == ';')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (found, value) = pair.split_once('=').unwrap_or((pair, ""));
            // cannot possibly be key
            if found.len() < key.len() {
                return None;
            }
            if query_unescape(found) != key {
                return None;
            }
            Some(query_unescape(value))
        })
}

/// Percent-escapes a decoded path so it can be written into a URL.
pub(crate) fn escape_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}

fn query_unescape(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

fn query_escape(s: &str) -> String {
    // a literal '%' is escaped too, so every "%20" comes from a space
    utf8_percent_encode(s, QUERY_VALUE)
        .to_string()
        .replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(tpl: &str, kind: RegexpKind) -> Result<RouteRegexp> {
        compile_with(tpl, kind, RegexpOptions::default())
    }

    fn compile_with(tpl: &str, kind: RegexpKind, options: RegexpOptions) -> Result<RouteRegexp> {
        RouteRegexp::new(tpl, kind, options, &Regex::new, &HashMap::new())
    }

    fn values(pairs: &[(&str, &str)]) -> Vars {
        pairs.iter().copied().collect()
    }

    #[test]
    fn expands_templates() {
        let tests = [
            ("/111/", RegexpKind::Path, "^/111/$"),
            ("/", RegexpKind::Path, "^/$"),
            (
                "/{type:(?i:daily|mini|variety)}-{date:\\d{4,4}-\\d{2,2}-\\d{2,2}}",
                RegexpKind::Path,
                "^/(?P<v0>(?i:daily|mini|variety))\\-(?P<v1>\\d{4,4}-\\d{2,2}-\\d{2,2})$",
            ),
            (
                "/{v1:[0-9]*}{v2:[a-z]*}/{v3:[0-9]*}",
                RegexpKind::Path,
                "^/(?P<v0>[0-9]*)(?P<v1>[a-z]*)/(?P<v2>[0-9]*)$",
            ),
            ("/{v1}", RegexpKind::Prefix, "^/(?P<v0>[^/]+)"),
            ("{v1}.example.com", RegexpKind::Host, "^(?P<v0>[^.]+)\\.example\\.com$"),
            ("foo={v1}", RegexpKind::Query, "^foo=(?P<v0>.*)$"),
            ("foo=", RegexpKind::Query, "^foo=.*$"),
            ("foo=bar", RegexpKind::Query, "^foo=bar$"),
        ];

        for (tpl, kind, want) in tests.iter() {
            let rr = compile(tpl, *kind).unwrap();
            assert_eq!(rr.regexp().as_str(), *want, "template {:?}", tpl);
            assert_eq!(rr.template(), *tpl);
        }
    }

    #[test]
    fn strict_slash_only_applies_to_paths() {
        let strict = RegexpOptions {
            strict_slash: true,
            ..Default::default()
        };

        let path = compile_with("/111/", RegexpKind::Path, strict).unwrap();
        assert_eq!(path.regexp().as_str(), "^/111[/]?$");
        assert!(path.options().strict_slash);
        assert_eq!(path.url(&Vars::new()).unwrap(), "/111/");

        let prefix = compile_with("/static/", RegexpKind::Prefix, strict).unwrap();
        assert_eq!(prefix.regexp().as_str(), "^/static/");
        assert!(!prefix.options().strict_slash);
    }

    #[test]
    fn nested_quantifier_braces() {
        let rr = compile("aaa.{v1:[a-z]{3}}.ccc:1{v2:(?:23|4)}", RegexpKind::Host).unwrap();
        assert_eq!(rr.var_names(), ["v1", "v2"]);
        assert!(!rr.wildcard_host_port);

        let rr = compile("{v-1:[a-z]{3}}.{v-2:[a-z]{3}}", RegexpKind::Host).unwrap();
        assert_eq!(rr.var_names(), ["v-1", "v-2"]);
        assert!(rr.wildcard_host_port);
    }

    #[test]
    fn rejects_malformed_templates() {
        assert_eq!(
            compile("/{foo", RegexpKind::Path).unwrap_err(),
            Error::UnbalancedBraces("/{foo".into())
        );
        assert_eq!(
            compile("/foo}", RegexpKind::Path).unwrap_err(),
            Error::UnbalancedBraces("/foo}".into())
        );
        assert_eq!(
            compile("/{:[0-9]+}", RegexpKind::Path).unwrap_err(),
            Error::MissingNameOrPattern("{:[0-9]+}".into())
        );
        assert_eq!(
            compile("/{id:}", RegexpKind::Path).unwrap_err(),
            Error::MissingNameOrPattern("{id:}".into())
        );
        assert!(matches!(
            compile("/{id:[0-9}", RegexpKind::Path).unwrap_err(),
            Error::Regex(_)
        ));
    }

    #[test]
    #[should_panic(expected = "capture groups")]
    fn panics_on_capturing_groups() {
        let _ = compile("/{type:(promo|special)}/{promoId}.json", RegexpKind::Path);
    }

    #[test]
    fn registered_pattern_aliases() {
        let mut aliases = HashMap::new();
        aliases.insert("num".to_owned(), "[0-9]+".to_owned());
        let rr = RouteRegexp::new(
            "/item/{id:num}",
            RegexpKind::Path,
            RegexpOptions::default(),
            &Regex::new,
            &aliases,
        )
        .unwrap();
        assert_eq!(rr.regexp().as_str(), "^/item/(?P<v0>[0-9]+)$");
    }

    #[test]
    fn builds_urls() {
        let rr = compile("/{category:a|b/c}/{id:[0-9]+}", RegexpKind::Path).unwrap();
        assert_eq!(
            rr.url(&values(&[("category", "b/c"), ("id", "7")])).unwrap(),
            "/b/c/7"
        );
        assert_eq!(
            rr.url(&values(&[("category", "a")])).unwrap_err(),
            Error::MissingVariable("id".into())
        );
        assert_eq!(
            rr.url(&values(&[("category", "a"), ("id", "x")])).unwrap_err(),
            Error::VariableMismatch {
                value: "x".into(),
                expected: "^(?:[0-9]+)$".into()
            }
        );

        let rr = compile("/files/{name}", RegexpKind::Path).unwrap();
        assert_eq!(
            rr.url(&values(&[("name", "a b%")])).unwrap(),
            "/files/a%20b%25"
        );

        let encoded = RegexpOptions {
            use_encoded_path: true,
            ..Default::default()
        };
        let rr = compile_with("/v1/{v1}/v2", RegexpKind::Path, encoded).unwrap();
        assert_eq!(rr.url(&values(&[("v1", "1%2F2")])).unwrap(), "/v1/1%2F2/v2");

        let rr = compile("foo={v1}", RegexpKind::Query).unwrap();
        assert_eq!(
            rr.url(&values(&[("v1", "%bar& /=?")])).unwrap(),
            "foo=%25bar%26+%2F%3D%3F"
        );

        let rr = compile("foo=", RegexpKind::Query).unwrap();
        assert_eq!(rr.url(&Vars::new()).unwrap(), "foo=");
    }

    #[test]
    fn unique_vars() {
        let host = compile("{v1}.example.com", RegexpKind::Host).unwrap();
        let path = compile("/{v1}", RegexpKind::Path).unwrap();
        let other = compile("/{v2}", RegexpKind::Path).unwrap();
        assert_eq!(
            path.unique_vars(&host).unwrap_err(),
            Error::DuplicatedVariable("v1".into())
        );
        assert!(other.unique_vars(&host).is_ok());
    }

    #[test]
    fn finds_first_query_key() {
        let tests = [
            ("a=1&b=2", "a", Some("1")),
            ("a=1&b=2", "b", Some("2")),
            ("a=1&a=2&a=banana", "a", Some("1")),
            ("ascii=%3Ckey%3A+0x90%3E", "ascii", Some("<key: 0x90>")),
            ("a=1;b=2", "b", Some("2")),
            ("a=1&a=2;a=banana", "a", Some("1")),
            ("a==", "a", Some("=")),
            ("%20%3F&=%23&a=30", "a", Some("30")),
            ("flag&a=1", "flag", Some("")),
            ("aa=1", "a", None),
            ("", "a", None),
        ];

        for (query, key, want) in tests.iter() {
            assert_eq!(
                find_first_query_key(query, key).as_deref(),
                *want,
                "find_first_query_key({:?}, {:?})",
                query,
                key
            );
        }
    }

    #[test]
    fn regex_cache_reuses_expressions() {
        let cache = RegexCache::new();
        assert!(cache.is_empty());

        let first = compile_cached(&cache, "/metrics/{type}");
        let second = compile_cached(&cache, "/metrics/{type}");
        assert_eq!(first.regexp().as_str(), second.regexp().as_str());
        // the full pattern and the `[^/]+` validator
        assert_eq!(cache.len(), 2);
    }

    fn compile_cached(cache: &RegexCache, tpl: &str) -> RouteRegexp {
        RouteRegexp::new(
            tpl,
            RegexpKind::Path,
            RegexpOptions::default(),
            cache,
            &HashMap::new(),
        )
        .unwrap()
    }
}
