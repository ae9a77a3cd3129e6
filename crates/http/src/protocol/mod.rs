//! Request and response abstractions of the routing layer.
//!
//! # Architecture
//!
//! - **Methods** ([`method`]): the fixed set of supported HTTP methods
//!   - [`SUPPORTED_METHODS`]: `GET, POST, PUT, DELETE, OPTIONS, HEAD, PATCH`
//!
//! - **Request Normalization** ([`request`]): transport variables to structured data
//!   - [`extract_headers`]: canonical header names (`HTTP_USER_AGENT` to `User-Agent`)
//!   - [`extract_cookies`]: cookies of every `Cookie` header
//!   - [`analyze_body`]: content negotiated [`ParsedBody`]
//!   - [`Request`]: everything above for one request, plus its [`ExtraData`]
//!
//! - **Response Building** ([`response`]): per-request outgoing state
//!   - [`Response`]: chainable status/header/cookie/body builder
//!   - [`CookieOptions`]: `Set-Cookie` attributes
//!
//! - **Error Handling** ([`error`]):
//!   - [`RequestError`]: the request can't be normalized
//!   - [`ResponseError`]: the response can't be converted for the transport
//!
//! Body and cookie parsing never produce errors, they fall back to the raw
//! value instead.

pub mod method;
pub use method::SUPPORTED_METHODS;
pub use method::is_supported;
pub use method::supported_method;

pub mod request;
pub use request::Cookies;
pub use request::ExtraData;
pub use request::ExtraKey;
pub use request::Headers;
pub use request::ParsedBody;
pub use request::RawVar;
pub use request::Request;
pub use request::RequestBuilder;
pub use request::analyze_body;
pub use request::canonical_name;
pub use request::extract_cookies;
pub use request::extract_headers;
pub use request::find_header;
pub use request::header_with_name;
pub use request::remove_queries;

pub mod response;
pub use response::CookieOptions;
pub use response::Dump;
pub use response::Json;
pub use response::Payload;
pub use response::Response;

mod error;
pub use error::RequestError;
pub use error::ResponseError;
