//! Request normalization.
//!
//! Turns the raw transport variables and body of a request into canonical
//! [`Headers`], [`Cookies`] and a content negotiated [`ParsedBody`], bundled
//! in a [`Request`].

mod body;
mod cookies;
mod extra;
mod headers;
#[allow(clippy::module_inception, reason = "the request type lives next to its normalizers")]
mod request;

pub use body::ParsedBody;
pub use body::analyze_body;
pub use cookies::Cookies;
pub use cookies::extract_cookies;
pub use extra::ExtraData;
pub use extra::ExtraKey;
pub use headers::Headers;
pub use headers::RawVar;
pub use headers::canonical_name;
pub use headers::extract_headers;
pub use headers::find_header;
pub use headers::header_with_name;
pub use request::Request;
pub use request::RequestBuilder;
pub use request::remove_queries;
