//! Content negotiated request bodies.
//!
//! The declared media type selects a parser. Parsing never fails: when the
//! body does not decode, the raw text is handed back as [`ParsedBody::Raw`] so
//! a handler can still look at it.

use serde_json::{Map, Value};
use tracing::debug;

/// A request body after content negotiation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// The body exactly as received.
    Raw(String),
    /// An `application/x-www-form-urlencoded` body.
    Form(Map<String, Value>),
    /// An `application/json` body.
    Json(Value),
}

impl ParsedBody {
    #[inline]
    pub fn is_raw(&self) -> bool {
        matches!(self, ParsedBody::Raw(_))
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ParsedBody::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&Map<String, Value>> {
        match self {
            ParsedBody::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ParsedBody::Json(json) => Some(json),
            _ => None,
        }
    }

    /// Converts the body into a JSON value; a raw body becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            ParsedBody::Raw(raw) => Value::String(raw),
            ParsedBody::Form(form) => Value::Object(form),
            ParsedBody::Json(json) => json,
        }
    }
}

impl Default for ParsedBody {
    fn default() -> Self {
        ParsedBody::Raw(String::new())
    }
}

/// Parses `raw_body` according to `content_type`.
///
/// Only the media type is considered (`; charset=...` and other parameters
/// are ignored, case does not matter):
///
/// - no content type: [`ParsedBody::Raw`]
/// - `application/x-www-form-urlencoded`: [`ParsedBody::Form`], repeated keys
///   keep the last value, bracketed keys (`user[name]`, `tag[]`, `list[0]`)
///   build nested maps, and maps indexed `0..n` become arrays
/// - `application/json`: [`ParsedBody::Json`]; a body that decodes to `null`
///   is only accepted when it is literally `null`
/// - anything else, or a body that fails to decode: [`ParsedBody::Raw`]
pub fn analyze_body(content_type: Option<&str>, raw_body: &str) -> ParsedBody {
    let Some(content_type) = content_type else {
        return ParsedBody::Raw(raw_body.to_owned());
    };

    let media_type = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

    if media_type == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() {
        return match decode_form(raw_body) {
            Ok(form) => ParsedBody::Form(form),
            Err(e) => {
                debug!(cause = %e, "form body can't be decoded, keep the raw body");
                ParsedBody::Raw(raw_body.to_owned())
            }
        };
    }

    if media_type == mime::APPLICATION_JSON.essence_str() {
        return match serde_json::from_str::<Value>(raw_body) {
            Ok(Value::Null) if raw_body == "null" => ParsedBody::Json(Value::Null),
            Ok(Value::Null) => ParsedBody::Raw(raw_body.to_owned()),
            Ok(json) => ParsedBody::Json(json),
            Err(e) => {
                debug!(cause = %e, "json body can't be decoded, keep the raw body");
                ParsedBody::Raw(raw_body.to_owned())
            }
        };
    }

    ParsedBody::Raw(raw_body.to_owned())
}

fn decode_form(raw_body: &str) -> Result<Map<String, Value>, serde_urlencoded::de::Error> {
    let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(raw_body)?;

    let mut form = Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        match split_key(&key) {
            Some((name, path)) => assign(&mut form, name, &path, value),
            None => {
                form.insert(key, Value::String(value));
            }
        }
    }

    Ok(form.into_iter().map(|(key, value)| (key, into_lists(value))).collect())
}

/// Splits `user[address][]` into `user` and `["address", ""]`.
///
/// Keys without brackets, with an empty name or with an unclosed `[` are
/// plain keys and yield `None`.
fn split_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let open = key.find('[')?;
    let (name, mut rest) = key.split_at(open);
    if name.is_empty() {
        return None;
    }

    let mut path = Vec::new();
    while let Some(inner) = rest.strip_prefix('[') {
        let close = inner.find(']')?;
        path.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some((name, path))
}

/// Writes `value` at `name[path..]`, replacing scalars met on the way by
/// nested maps. An empty segment appends after the highest index.
fn assign(form: &mut Map<String, Value>, name: &str, path: &[&str], value: String) {
    let mut slot = form.entry(name).or_insert(Value::Null);
    for segment in path {
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Some(map) = slot.as_object_mut() else {
            return;
        };
        let key = if segment.is_empty() { next_index(map).to_string() } else { (*segment).to_owned() };
        slot = map.entry(key).or_insert(Value::Null);
    }
    *slot = Value::String(value);
}

fn next_index(map: &Map<String, Value>) -> u64 {
    map.keys().filter_map(|key| key.parse::<u64>().ok()).max().map_or(0, |max| max + 1)
}

/// Turns nested maps keyed `0..n` in order into arrays.
fn into_lists(value: Value) -> Value {
    let Value::Object(map) = value else {
        return value;
    };

    let is_list = !map.is_empty() && map.keys().enumerate().all(|(index, key)| *key == index.to_string());
    if is_list {
        Value::Array(map.into_iter().map(|(_, item)| into_lists(item)).collect())
    } else {
        Value::Object(map.into_iter().map(|(key, item)| (key, into_lists(item))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_without_content_type() {
        assert_eq!(analyze_body(None, r#"{"a":1}"#), ParsedBody::Raw(r#"{"a":1}"#.into()));
    }

    #[test]
    fn test_unknown_content_type() {
        assert_eq!(analyze_body(Some("text/plain"), "a=1"), ParsedBody::Raw("a=1".into()));
    }

    #[test]
    fn test_form_body() {
        let body = analyze_body(Some("application/x-www-form-urlencoded"), "name=John+Doe&zip=12345&city=S%C3%A3o");

        assert_eq!(body.into_value(), json!({"name": "John Doe", "zip": "12345", "city": "São"}));
    }

    #[test]
    fn test_form_body_keys() {
        let body = analyze_body(Some("application/x-www-form-urlencoded"), "a=1&a=2&tag[]=x&tag[]=y");

        let form = body.as_form().unwrap();
        assert_eq!(form["a"], json!("2"));
        assert_eq!(form["tag"], json!(["x", "y"]));
    }

    #[test]
    fn test_form_body_nested_keys() {
        let body = analyze_body(
            Some("application/x-www-form-urlencoded"),
            "user[name]=a&user[zip]=b&list[0]=x&list[1]=y&sparse[2]=z&grid[1][]=p&grid[1][]=q&user[name]=c",
        );

        assert_eq!(
            body.into_value(),
            json!({
                "user": {"name": "c", "zip": "b"},
                "list": ["x", "y"],
                "sparse": {"2": "z"},
                "grid": {"1": ["p", "q"]}
            })
        );
    }

    #[test]
    fn test_form_body_bracket_edge_cases() {
        let body = analyze_body(Some("application/x-www-form-urlencoded"), "a=1&a[b]=2&[x]=3&open[=4&tag%5B%5D=5");

        let form = body.as_form().unwrap();
        assert_eq!(form["a"], json!({"b": "2"}));
        assert_eq!(form["[x]"], json!("3"));
        assert_eq!(form["open["], json!("4"));
        assert_eq!(form["tag"], json!(["5"]));
    }

    #[test]
    fn test_empty_form_body() {
        let body = analyze_body(Some("application/x-www-form-urlencoded"), "");

        assert_eq!(body, ParsedBody::Form(Map::new()));
    }

    #[test]
    fn test_content_type_parameters_and_case() {
        let body = analyze_body(Some("Application/JSON; charset=utf-8"), r#"{"foo":"bar"}"#);

        assert_eq!(body, ParsedBody::Json(json!({"foo": "bar"})));
    }

    #[test]
    fn test_json_body() {
        let body = analyze_body(Some("application/json"), r#"[1, {"zoo": true}]"#);

        assert_eq!(body.as_json(), Some(&json!([1, {"zoo": true}])));
    }

    #[test]
    fn test_json_scalar_body() {
        assert_eq!(analyze_body(Some("application/json"), "12"), ParsedBody::Json(json!(12)));
        assert_eq!(analyze_body(Some("application/json"), "false"), ParsedBody::Json(json!(false)));
    }

    #[test]
    fn test_json_null_body() {
        assert_eq!(analyze_body(Some("application/json"), "null"), ParsedBody::Json(Value::Null));
        assert_eq!(analyze_body(Some("application/json"), " null "), ParsedBody::Raw(" null ".into()));
    }

    #[test]
    fn test_invalid_json_body() {
        let body = analyze_body(Some("application/json"), "{not json");

        assert!(body.is_raw());
        assert_eq!(body.as_raw(), Some("{not json"));
    }
}
