//! Canonical header extraction from transport variables.
//!
//! Gateways such as CGI or FastCGI hand a request over as a flat list of
//! variables (`HTTP_USER_AGENT`, `CONTENT_TYPE`, `REQUEST_URI`, ...). This
//! module rewrites those names into the canonical header casing used
//! everywhere else in the crate (`User-Agent`, `Content-Type`).

use base64::{Engine as _, engine::general_purpose};
use indexmap::IndexMap;
use std::borrow::Cow;

/// Canonical header name to value, in the order the headers were first seen.
/// Keys are unique, the last write wins.
pub type Headers = IndexMap<String, String>;

const HTTP_PREFIX: &str = "HTTP_";
const AUTHORIZATION: &str = "Authorization";

const REDIRECT_HTTP_AUTHORIZATION: &str = "REDIRECT_HTTP_AUTHORIZATION";
const PHP_AUTH_USER: &str = "PHP_AUTH_USER";
const PHP_AUTH_PW: &str = "PHP_AUTH_PW";
const PHP_AUTH_DIGEST: &str = "PHP_AUTH_DIGEST";

/// One raw transport variable.
///
/// Implemented for `(K, V)` tuples of string-like values and for references to
/// them, so `&HashMap<String, String>`, `Vec<(&str, &str)>` and
/// `&[(String, String)]` can all be passed where raw variables are expected.
pub trait RawVar {
    fn key(&self) -> &str;
    fn value(&self) -> &str;
}

impl<K: AsRef<str>, V: AsRef<str>> RawVar for (K, V) {
    #[inline]
    fn key(&self) -> &str {
        self.0.as_ref()
    }

    #[inline]
    fn value(&self) -> &str {
        self.1.as_ref()
    }
}

impl<P: RawVar + ?Sized> RawVar for &P {
    #[inline]
    fn key(&self) -> &str {
        (**self).key()
    }

    #[inline]
    fn value(&self) -> &str {
        (**self).value()
    }
}

/// Builds the canonical headers from raw transport variables.
///
/// Variables are applied in iteration order, so a later variable wins when two
/// raw names canonicalize to the same header. When no `Authorization` header
/// was produced, it is recovered from `REDIRECT_HTTP_AUTHORIZATION`, the
/// `PHP_AUTH_USER`/`PHP_AUTH_PW` basic credentials or `PHP_AUTH_DIGEST`, in
/// that order.
pub fn extract_headers<I>(raw_vars: I) -> Headers
where
    I: IntoIterator,
    I::Item: RawVar,
{
    let mut headers = Headers::new();
    let mut credentials = Credentials::default();

    for var in raw_vars {
        let (key, value) = (var.key(), var.value());
        credentials.observe(key, value);
        headers.insert(canonical_name(key).into_owned(), value.to_owned());
    }

    if !headers.contains_key(AUTHORIZATION)
        && let Some(authorization) = credentials.into_authorization()
    {
        headers.insert(AUTHORIZATION.to_owned(), authorization);
    }

    headers
}

/// Rewrites one transport variable name into its canonical header name.
///
/// `HTTP_X_FORWARDED_FOR` becomes `X-Forwarded-For`, `CONTENT_TYPE` and
/// `CONTENT_LENGTH` become `Content-Type` and `Content-Length`, and every
/// other name is returned untouched.
pub fn canonical_name(key: &str) -> Cow<'_, str> {
    if let Some(name) = key.strip_prefix(HTTP_PREFIX) {
        return Cow::Owned(name.split('_').map(title_case).collect::<Vec<_>>().join("-"));
    }

    match key {
        "CONTENT_TYPE" => Cow::Borrowed("Content-Type"),
        "CONTENT_LENGTH" => Cow::Borrowed("Content-Length"),
        _ => Cow::Borrowed(key),
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Looks a header up by name, ignoring ASCII case.
///
/// When several keys differ only in case, the one inserted first is returned.
pub fn find_header<'h>(headers: &'h Headers, name: &str) -> Option<&'h str> {
    headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
}

/// Returns the value of the header called `name`.
///
/// A raw variable with exactly that name is returned as is; otherwise the raw
/// variables are canonicalized with [`extract_headers`] and searched without
/// regard to case.
pub fn header_with_name<I>(name: &str, raw_vars: I) -> Option<String>
where
    I: IntoIterator,
    I::Item: RawVar,
{
    let vars = raw_vars.into_iter().collect::<Vec<_>>();

    if let Some(var) = vars.iter().rev().find(|var| var.key() == name) {
        return Some(var.value().to_owned());
    }

    let headers = extract_headers(&vars);
    find_header(&headers, name).map(ToOwned::to_owned)
}

/// Credentials seen while scanning the raw variables.
#[derive(Default)]
struct Credentials {
    redirect_authorization: Option<String>,
    user: Option<String>,
    password: Option<String>,
    digest: Option<String>,
}

impl Credentials {
    fn observe(&mut self, key: &str, value: &str) {
        let slot = match key {
            REDIRECT_HTTP_AUTHORIZATION => &mut self.redirect_authorization,
            PHP_AUTH_USER => &mut self.user,
            PHP_AUTH_PW => &mut self.password,
            PHP_AUTH_DIGEST => &mut self.digest,
            _ => return,
        };
        *slot = Some(value.to_owned());
    }

    fn into_authorization(self) -> Option<String> {
        if self.redirect_authorization.is_some() {
            return self.redirect_authorization;
        }

        if let Some(user) = self.user {
            let password = self.password.unwrap_or_default();
            let encoded = general_purpose::STANDARD.encode(format!("{user}:{password}"));
            return Some(format!("Basic {encoded}"));
        }

        self.digest
    }
}
