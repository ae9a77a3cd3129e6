//! Response building.
//!
//! A [`Response`] collects the status code, headers, cookies and body chunks a
//! handler produces. [`Response::dump`] exposes the state for inspection and
//! [`Response::into_http`] hands it to the transport as an `http::Response`.

mod cookie;
mod payload;
#[allow(clippy::module_inception, reason = "the response type lives next to its cookie and payload helpers")]
mod response;

pub use cookie::CookieOptions;
pub use payload::Json;
pub use payload::Payload;
pub use response::Dump;
pub use response::Response;
