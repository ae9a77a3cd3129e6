//! The per-request response builder.

use crate::protocol::ResponseError;
use crate::protocol::response::{CookieOptions, Payload};
use http::StatusCode;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

const CONTENT_TYPE: &str = "Content-Type";
const LOCATION: &str = "Location";
const SET_COOKIE: &str = "Set-Cookie";

/// Accumulates the status, headers, cookies and body of one response.
///
/// Every builder method returns `&mut Self` so calls chain. Once [`end`](Response::end)
/// has been called the response is sealed and further mutations are ignored.
///
/// # Example
/// ```
/// use micro_route_http::protocol::{CookieOptions, Response};
/// use serde_json::json;
///
/// let mut response = Response::new();
/// response.status(201).cookie("sid", "abc", CookieOptions::new().path("/")).json(json!({"id": 7}));
///
/// let dump = response.dump();
/// assert_eq!(dump.status_code, Some(201));
/// assert_eq!(dump.headers["Content-Type"], "application/json");
/// assert_eq!(dump.headers["Set-Cookie"], "sid=abc; Path=/;");
/// assert_eq!(dump.body, vec![r#"{"id":7}"#]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Response {
    status_code: Option<u16>,
    headers: BTreeMap<String, String>,
    body: Vec<String>,
    cookies: Vec<String>,
    ended: bool,
}

/// A snapshot of a [`Response`], for inspection and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dump {
    pub status_code: Option<u16>,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<String>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&mut self, code: u16) -> &mut Self {
        if self.writable("status") {
            self.status_code = Some(code);
        }
        self
    }

    /// Sets a header, replacing any header with the same name regardless of case.
    ///
    /// Setting `Set-Cookie` this way also records the value as an emitted cookie.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        if self.writable("header") {
            self.put_header(name.into(), value.into());
        }
        self
    }

    pub fn content_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.header(CONTENT_TYPE, value)
    }

    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        if self.writable("remove_header") {
            self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
            if name.eq_ignore_ascii_case(SET_COOKIE) {
                self.cookies.clear();
            }
        }
        self
    }

    /// Appends `content` to the body as one chunk, see [`Payload`].
    pub fn send(&mut self, content: impl Payload) -> &mut Self {
        if self.writable("send") {
            self.body.push(content.into_chunk());
        }
        self
    }

    /// Declares a JSON body, then appends `content` like [`send`](Response::send).
    pub fn json(&mut self, content: impl Payload) -> &mut Self {
        self.content_type(mime::APPLICATION_JSON.as_ref()).send(content)
    }

    /// Sets the status code and the `Location` header; `path` is used verbatim.
    pub fn redirect(&mut self, code: u16, path: impl Into<String>) -> &mut Self {
        self.status(code).header(LOCATION, path)
    }

    /// Sets a cookie, see [`CookieOptions::to_set_cookie`] for the format.
    pub fn cookie(&mut self, name: &str, value: &str, options: CookieOptions) -> &mut Self {
        self.header(SET_COOKIE, options.to_set_cookie(name, value))
    }

    /// Sets a cookie with an empty value.
    pub fn clear_cookie(&mut self, name: &str, options: CookieOptions) -> &mut Self {
        self.cookie(name, "", options)
    }

    /// Seals the response, later mutations are ignored.
    pub fn end(&mut self) -> &mut Self {
        self.ended = true;
        self
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Every `Set-Cookie` value emitted so far, oldest first.
    pub fn cookies(&self) -> &[String] {
        &self.cookies
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn dump(&self) -> Dump {
        Dump { status_code: self.status_code, headers: self.headers.clone(), body: self.body.clone() }
    }

    /// Converts the accumulated state into an `http::Response` for the transport.
    ///
    /// The status defaults to `200 OK`, every emitted cookie becomes its own
    /// `Set-Cookie` line and the body chunks are concatenated.
    ///
    /// # Errors
    /// Fails when the status code is out of range or a header name or value is
    /// not valid HTTP.
    pub fn into_http(self) -> Result<http::Response<String>, ResponseError> {
        let code = self.status_code.unwrap_or(StatusCode::OK.as_u16());
        let status = StatusCode::from_u16(code).map_err(|e| ResponseError::invalid_status(code, e))?;

        let mut builder = http::Response::builder().status(status);
        for (name, value) in self.headers.iter().filter(|(name, _)| !name.eq_ignore_ascii_case(SET_COOKIE)) {
            builder = builder.header(name.as_str(), value.as_str());
        }
        for cookie in &self.cookies {
            builder = builder.header(http::header::SET_COOKIE, cookie.as_str());
        }

        Ok(builder.body(self.body.concat())?)
    }

    fn put_header(&mut self, name: String, value: String) {
        if name.eq_ignore_ascii_case(SET_COOKIE) {
            self.cookies.push(value.clone());
        }
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value);
    }

    fn writable(&self, operation: &str) -> bool {
        if self.ended {
            warn!(operation, "response has ended, ignore the mutation");
        }
        !self.ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Json;
    use serde_json::json;

    fn full_options() -> CookieOptions {
        CookieOptions::new().domain("sub.example.com").path("/dir").max_age(0).secure(true).http_only(true)
    }

    #[test]
    fn test_new_response_is_empty() {
        let dump = Response::new().dump();

        assert_eq!(dump.status_code, None);
        assert!(dump.headers.is_empty());
        assert!(dump.body.is_empty());
    }

    #[test]
    fn test_send_empty_string() {
        let dump = Response::new().send("").dump();

        assert_eq!(dump.body.len(), 1);
        assert_eq!(dump.body[0], "");
        assert!(dump.headers.is_empty());
    }

    #[test]
    fn test_send_map_as_json() {
        let dump = Response::new().send(json!({"foo": "bar", "zoo": 1})).dump();

        assert_eq!(dump.body[0], r#"{"foo":"bar","zoo":1}"#);
    }

    #[test]
    fn test_send_record_as_json() {
        #[derive(Serialize)]
        struct Record {
            foo: &'static str,
            zoo: i32,
        }

        let dump = Response::new().send(Json(Record { foo: "bar", zoo: 1 })).dump();

        assert_eq!(dump.body[0], r#"{"foo":"bar","zoo":1}"#);
    }

    #[test]
    fn test_send_appends_chunks() {
        let dump = Response::new().send("a").send(2_u8).send("").send("c").dump();

        assert_eq!(dump.body, vec!["a", "2", "", "c"]);
    }

    #[test]
    fn test_json_adds_a_header() {
        let dump = Response::new().json("").dump();

        assert_eq!(dump.headers.len(), 1);
        assert_eq!(dump.headers["Content-Type"], "application/json");
        assert_eq!(dump.body, vec![""]);
    }

    #[test]
    fn test_json_serializes_structures() {
        let dump = Response::new().json(json!({"foo": "bar", "zoo": 1})).dump();
        assert_eq!(dump.body[0], r#"{"foo":"bar","zoo":1}"#);

        let dump = Response::new().json(Json(BTreeMap::from([("foo", "bar")]))).dump();
        assert_eq!(dump.body[0], r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_redirect() {
        let dump = Response::new().redirect(301, "/foo").dump();

        assert_eq!(dump.status_code, Some(301));
        assert_eq!(dump.headers.len(), 1);
        assert_eq!(dump.headers["Location"], "/foo");
    }

    #[test]
    fn test_cookie() {
        let dump = Response::new().cookie("foo", "bar", CookieOptions::new()).dump();

        assert_eq!(dump.headers.len(), 1);
        assert_eq!(dump.headers["Set-Cookie"], "foo=bar");
    }

    #[test]
    fn test_cookie_flags() {
        let secure = Response::new().cookie("foo", "bar", CookieOptions::new().secure(true)).dump();
        assert_eq!(secure.headers.len(), 1);
        assert_eq!(secure.headers["Set-Cookie"], "foo=bar; Secure;");

        let http_only = Response::new().cookie("foo", "bar", CookieOptions::new().http_only(true)).dump();
        assert_eq!(http_only.headers.len(), 1);
        assert_eq!(http_only.headers["Set-Cookie"], "foo=bar; HttpOnly;");
    }

    #[test]
    fn test_cookie_flags_from_loose_options() {
        for options in [json!({"secure": 1}), json!({"secure": true})] {
            let options = serde_json::from_value::<CookieOptions>(options).unwrap();
            let dump = Response::new().cookie("foo", "bar", options).dump();
            assert_eq!(dump.headers["Set-Cookie"], "foo=bar; Secure;");
        }

        for options in [json!({"httpOnly": 1}), json!({"httpOnly": true})] {
            let options = serde_json::from_value::<CookieOptions>(options).unwrap();
            let dump = Response::new().cookie("foo", "bar", options).dump();
            assert_eq!(dump.headers["Set-Cookie"], "foo=bar; HttpOnly;");
        }
    }

    #[test]
    fn test_cookie_with_all_options() {
        let dump = Response::new().cookie("foo", "bar", full_options()).dump();

        assert_eq!(dump.headers.len(), 1);
        assert_eq!(dump.headers["Set-Cookie"], "foo=bar; Domain=sub.example.com; Path=/dir; Max-Age=0; Secure; HttpOnly;");
    }

    #[test]
    fn test_clear_cookie() {
        let dump = Response::new().clear_cookie("foo", full_options()).dump();

        assert_eq!(dump.headers.len(), 1);
        assert_eq!(dump.headers["Set-Cookie"], "foo=; Domain=sub.example.com; Path=/dir; Max-Age=0; Secure; HttpOnly;");
    }

    #[test]
    fn test_last_cookie_wins_in_headers() {
        let mut response = Response::new();
        response.cookie("a", "1", CookieOptions::new()).cookie("b", "2", CookieOptions::new());

        assert_eq!(response.dump().headers["Set-Cookie"], "b=2");
        assert_eq!(response.cookies(), ["a=1", "b=2"]);
    }

    #[test]
    fn test_header_names_ignore_case() {
        let mut response = Response::new();
        response.header("content-type", "text/plain").content_type("text/html");

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.get_header("CONTENT-TYPE"), Some("text/html"));
        assert!(response.has_header("Content-Type"));

        response.remove_header("content-TYPE");
        assert!(!response.has_header("Content-Type"));
    }

    #[test]
    fn test_remove_set_cookie_forgets_cookies() {
        let mut response = Response::new();
        response.cookie("a", "1", CookieOptions::new()).remove_header("set-cookie");

        assert!(response.cookies().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_ended_response_ignores_mutations() {
        let mut response = Response::new();
        response.status(200).send("done").end();

        response.status(500).header("X-Late", "1").send("late").cookie("a", "1", CookieOptions::new());

        assert!(response.is_ended());
        assert_eq!(response.status_code(), Some(200));
        assert_eq!(response.body(), ["done"]);
        assert!(response.headers().is_empty());
        assert!(response.cookies().is_empty());
    }

    #[test]
    fn test_dump_serializes_camel_case() {
        let dump = Response::new().redirect(302, "/login").dump();

        assert_eq!(
            serde_json::to_value(dump).unwrap(),
            json!({"statusCode": 302, "headers": {"Location": "/login"}, "body": []})
        );
    }

    #[test]
    fn test_into_http() {
        let mut response = Response::new();
        response
            .status(404)
            .content_type("text/plain")
            .cookie("a", "1", CookieOptions::new())
            .cookie("b", "2", CookieOptions::new().http_only(true))
            .send("not ")
            .send("found");

        let response = response.into_http().unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "text/plain");
        let cookies =
            response.headers().get_all(http::header::SET_COOKIE).iter().map(|v| v.to_str().unwrap()).collect::<Vec<_>>();
        assert_eq!(cookies, ["a=1", "b=2; HttpOnly;"]);
        assert_eq!(response.body(), "not found");
    }

    #[test]
    fn test_into_http_defaults_to_ok() {
        let response = Response::new().into_http().unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().is_empty());
        assert_eq!(response.body(), "");
    }

    #[test]
    fn test_into_http_rejects_invalid_state() {
        let mut response = Response::new();
        response.status(42);
        assert!(matches!(response.into_http(), Err(ResponseError::InvalidStatus { code: 42, .. })));

        let mut response = Response::new();
        response.header("Bad Header", "x");
        assert!(matches!(response.into_http(), Err(ResponseError::Http { .. })));
    }
}
