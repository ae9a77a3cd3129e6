//! The normalized view of one incoming request.

use crate::protocol::method::supported_method;
use crate::protocol::request::{
    Cookies, ExtraData, Headers, ParsedBody, RawVar, analyze_body, extract_cookies, extract_headers, find_header,
};
use crate::protocol::RequestError;
use http::Method;
use std::collections::BTreeMap;
use tracing::debug;

const REQUEST_METHOD: &str = "REQUEST_METHOD";
const REQUEST_URI: &str = "REQUEST_URI";
const CONTENT_TYPE: &str = "Content-Type";

/// An incoming request after normalization.
///
/// Built once per request from the transport variables and the raw body; the
/// headers, cookies and parsed body never change afterwards. Only the path
/// parameters (written by the matcher) and the [`ExtraData`] (written by
/// middleware) are mutable.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: String,
    headers: Headers,
    cookies: Cookies,
    raw_body: String,
    body: ParsedBody,
    params: BTreeMap<String, String>,
    extra: ExtraData,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Normalizes the transport variables and the raw body of a request.
    ///
    /// `REQUEST_METHOD` defaults to `GET` and `REQUEST_URI` to `/` when absent.
    ///
    /// # Errors
    /// Returns [`RequestError::InvalidMethod`] when `REQUEST_METHOD` is not a
    /// supported method.
    pub fn from_vars<I>(raw_vars: I, raw_body: impl Into<String>) -> Result<Self, RequestError>
    where
        I: IntoIterator,
        I::Item: RawVar,
    {
        let vars = raw_vars.into_iter().collect::<Vec<_>>();
        let lookup = |name: &str| vars.iter().rev().find(|var| var.key() == name).map(|var| var.value());

        let method = match lookup(REQUEST_METHOD) {
            Some(name) => supported_method(name).ok_or_else(|| RequestError::invalid_method(name))?,
            None => Method::GET,
        };
        let url = lookup(REQUEST_URI).unwrap_or("/").to_owned();

        let headers = extract_headers(&vars);
        let cookies = extract_cookies(&headers);
        let raw_body = raw_body.into();
        let body = analyze_body(find_header(&headers, CONTENT_TYPE), &raw_body);

        debug!(%method, url = %url, headers = headers.len(), cookies = cookies.len(), "request normalized");

        Ok(Self { method, url, headers, cookies, raw_body, body, params: BTreeMap::new(), extra: ExtraData::new() })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full request target, query string included.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request target without its query string.
    pub fn path(&self) -> &str {
        remove_queries(&self.url)
    }

    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, query)| query)
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Looks a header up by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn body(&self) -> &ParsedBody {
        &self.body
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Replaces the path parameters captured by the matcher.
    pub fn set_params(&mut self, params: BTreeMap<String, String>) -> &mut Self {
        self.params = params;
        self
    }

    pub fn extra(&self) -> &ExtraData {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut ExtraData {
        &mut self.extra
    }
}

/// Returns `url` up to, not including, its first `?`.
pub fn remove_queries(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Collects transport variables and a body, then normalizes them into a [`Request`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
    vars: Vec<(String, String)>,
    body: String,
}

impl RequestBuilder {
    fn new() -> Self {
        Self::default()
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    pub fn vars<I>(mut self, raw_vars: I) -> Self
    where
        I: IntoIterator,
        I::Item: RawVar,
    {
        self.vars.extend(raw_vars.into_iter().map(|var| (var.key().to_owned(), var.value().to_owned())));
        self
    }

    pub fn method(self, method: impl AsRef<str>) -> Self {
        self.var(REQUEST_METHOD, method.as_ref())
    }

    pub fn uri(self, uri: impl Into<String>) -> Self {
        self.var(REQUEST_URI, uri)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// # Errors
    /// See [`Request::from_vars`].
    pub fn build(self) -> Result<Request, RequestError> {
        Request::from_vars(self.vars, self.body)
    }
}
