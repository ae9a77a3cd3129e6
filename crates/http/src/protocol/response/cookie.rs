use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Attributes of a `Set-Cookie` header.
///
/// Options can be built fluently or deserialized from loose key/value data
/// such as `{"domain": "example.com", "maxAge": 0, "secure": 1}`. Unknown keys
/// are ignored, `domain`/`path`/`maxAge` accept any scalar and the
/// `secure`/`httpOnly` flags accept any truthy value.
///
/// # Example
/// ```
/// use micro_route_http::protocol::CookieOptions;
///
/// let options = CookieOptions::new().path("/").http_only(true);
/// assert_eq!(options.to_set_cookie("sid", "abc"), "sid=abc; Path=/; HttpOnly;");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieOptions {
    #[serde(deserialize_with = "scalar_text")]
    domain: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    path: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    max_age: Option<String>,
    #[serde(deserialize_with = "truthy")]
    secure: bool,
    #[serde(deserialize_with = "truthy")]
    http_only: bool,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds.to_string());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Serializes a `Set-Cookie` value.
    ///
    /// Attributes always come in the order `Domain`, `Path`, `Max-Age`,
    /// `Secure`, `HttpOnly`, separated by `"; "`. A trailing `;` closes the
    /// value as soon as one attribute is present.
    pub fn to_set_cookie(&self, name: &str, value: &str) -> String {
        let mut cookie = format!("{name}={value}");
        let mut has_attribute = false;

        let mut push = |attribute: &str| {
            cookie.push_str("; ");
            cookie.push_str(attribute);
            has_attribute = true;
        };

        if let Some(domain) = &self.domain {
            push(&format!("Domain={domain}"));
        }
        if let Some(path) = &self.path {
            push(&format!("Path={path}"));
        }
        if let Some(max_age) = &self.max_age {
            push(&format!("Max-Age={max_age}"));
        }
        if self.secure {
            push("Secure");
        }
        if self.http_only {
            push("HttpOnly");
        }

        if has_attribute {
            cookie.push(';');
        }
        cookie
    }
}

/// Strings are kept, numbers and booleans are written out, `null` and
/// collections count as absent.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("1".to_owned()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// `false`, `null`, `0`, `""`, `"0"` and empty collections are false, anything else is true.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> CookieOptions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_without_options() {
        assert_eq!(CookieOptions::new().to_set_cookie("foo", "bar"), "foo=bar");
    }

    #[test]
    fn test_single_attribute() {
        assert_eq!(CookieOptions::new().domain("example.com").to_set_cookie("foo", "bar"), "foo=bar; Domain=example.com;");
        assert_eq!(CookieOptions::new().max_age(3600).to_set_cookie("foo", "bar"), "foo=bar; Max-Age=3600;");
    }

    #[test]
    fn test_attribute_order() {
        let options = CookieOptions::new().http_only(true).secure(true).max_age(0).path("/dir").domain("sub.example.com");

        assert_eq!(
            options.to_set_cookie("foo", "bar"),
            "foo=bar; Domain=sub.example.com; Path=/dir; Max-Age=0; Secure; HttpOnly;"
        );
    }

    #[test]
    fn test_deserialize_loose_options() {
        let options = options(json!({
            "domain": "sub.example.com",
            "path": "/dir",
            "maxAge": 0,
            "secure": true,
            "httpOnly": true,
            "sameSite": "Strict"
        }));

        assert_eq!(options, CookieOptions::new().domain("sub.example.com").path("/dir").max_age(0).secure(true).http_only(true));
    }

    #[test]
    fn test_deserialize_truthy_flags() {
        assert_eq!(options(json!({"secure": 1})), CookieOptions::new().secure(true));
        assert_eq!(options(json!({"secure": true})), CookieOptions::new().secure(true));
        assert_eq!(options(json!({"httpOnly": 1})), CookieOptions::new().http_only(true));
        assert_eq!(options(json!({"httpOnly": "yes"})), CookieOptions::new().http_only(true));

        assert_eq!(options(json!({"secure": 0})), CookieOptions::new());
        assert_eq!(options(json!({"secure": false})), CookieOptions::new());
        assert_eq!(options(json!({"secure": "0"})), CookieOptions::new());
        assert_eq!(options(json!({"secure": null})), CookieOptions::new());
        assert_eq!(options(json!({})), CookieOptions::new());
    }

    #[test]
    fn test_deserialize_scalar_attributes() {
        let loose = options(json!({"maxAge": "3600", "domain": 5}));
        assert_eq!(loose.to_set_cookie("foo", "bar"), "foo=bar; Domain=5; Max-Age=3600;");

        assert_eq!(options(json!({"maxAge": 3600})), CookieOptions::new().max_age(3600));
        assert_eq!(options(json!({"path": null, "domain": ["a"]})), CookieOptions::new());
    }
}
