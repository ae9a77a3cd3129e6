//! The fixed set of HTTP methods a route can be registered under.

use http::Method;

/// Every method a route entry may carry, in registration order for `all()`.
pub const SUPPORTED_METHODS: [Method; 7] =
    [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS, Method::HEAD, Method::PATCH];

/// Returns true if `method` is one of [`SUPPORTED_METHODS`].
#[inline]
pub fn is_supported(method: &Method) -> bool {
    SUPPORTED_METHODS.contains(method)
}

/// Parses a method name, accepting only the supported set.
///
/// Matching is exact: `"get"` is a valid extension token for the `http` crate
/// but not one of the supported methods.
pub fn supported_method(name: &str) -> Option<Method> {
    Method::from_bytes(name.as_bytes()).ok().filter(is_supported)
}
