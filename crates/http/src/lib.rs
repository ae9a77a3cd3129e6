//! Request normalization and response building for micro-route
//!
//! This crate turns the raw data a gateway hands over for one request into
//! structured, inspectable values, and collects what a handler wants to send
//! back. It performs no I/O: the transport owns the connection, this crate only
//! transforms data.
//!
//! # Features
//!
//! - Canonical header names from CGI style transport variables
//! - `Authorization` recovery from `REDIRECT_HTTP_AUTHORIZATION` and `PHP_AUTH_*` variables
//! - Cookie parsing from every `Cookie` header
//! - Content negotiated bodies (form, JSON) with a raw fallback instead of errors
//! - Per-request extra data for middleware
//! - Chainable response builder with JSON bodies, redirects and `Set-Cookie` serialization
//!
//! # Example
//!
//! ```
//! use micro_route_http::protocol::{CookieOptions, Request, Response};
//! use serde_json::json;
//!
//! let request = Request::from_vars(
//!     [
//!         ("REQUEST_METHOD", "POST"),
//!         ("REQUEST_URI", "/login?next=/home"),
//!         ("CONTENT_TYPE", "application/x-www-form-urlencoded"),
//!         ("HTTP_COOKIE", "theme=dark"),
//!     ],
//!     "user=alice&remember=1",
//! )
//! .unwrap();
//!
//! assert_eq!(request.path(), "/login");
//! assert_eq!(request.cookie("theme"), Some("dark"));
//! assert_eq!(request.body().clone().into_value(), json!({"user": "alice", "remember": "1"}));
//!
//! let mut response = Response::new();
//! response.cookie("sid", "s3cr3t", CookieOptions::new().http_only(true)).redirect(302, "/home");
//!
//! let dump = response.dump();
//! assert_eq!(dump.status_code, Some(302));
//! assert_eq!(dump.headers["Location"], "/home");
//! assert_eq!(dump.headers["Set-Cookie"], "sid=s3cr3t; HttpOnly;");
//! ```
//!
//! # Architecture
//!
//! Everything lives in [`protocol`]:
//!
//! - [`protocol::request`]: header, cookie and body normalization, [`protocol::Request`]
//! - [`protocol::response`]: [`protocol::Response`] and its cookie/payload helpers
//! - [`protocol::method`]: the supported HTTP methods
//!
//! # Error Handling
//!
//! - [`protocol::RequestError`]: the request method is not supported
//! - [`protocol::ResponseError`]: the response can't be converted into an `http::Response`
//!
//! Malformed bodies and cookies are not errors; the raw value is kept instead.

pub mod protocol;
