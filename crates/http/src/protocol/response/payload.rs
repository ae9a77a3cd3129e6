//! Conversion of handler output into response body chunks.

use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::error;

/// Anything that can be appended to a response body as one chunk.
///
/// Text is appended as is. Structured values (JSON objects and arrays, or any
/// `Serialize` type wrapped in [`Json`]) are serialized to compact JSON with
/// their keys in insertion order.
pub trait Payload {
    fn into_chunk(self) -> String;
}

/// Marks a `Serialize` value as structured content.
///
/// # Example
/// ```
/// use micro_route_http::protocol::{Json, Response};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Item {
///     foo: &'static str,
///     zoo: u32,
/// }
///
/// let mut response = Response::new();
/// response.send(Json(Item { foo: "bar", zoo: 1 }));
/// assert_eq!(response.dump().body, vec![r#"{"foo":"bar","zoo":1}"#]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Payload for Json<T> {
    fn into_chunk(self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|e| {
            error!(cause = %e, "can't serialize json payload, append an empty chunk");
            String::new()
        })
    }
}

impl Payload for String {
    #[inline]
    fn into_chunk(self) -> String {
        self
    }
}

impl Payload for &str {
    #[inline]
    fn into_chunk(self) -> String {
        self.to_owned()
    }
}

impl Payload for &String {
    #[inline]
    fn into_chunk(self) -> String {
        self.clone()
    }
}

impl Payload for Cow<'_, str> {
    #[inline]
    fn into_chunk(self) -> String {
        self.into_owned()
    }
}

/// `null` becomes an empty chunk and a JSON string its bare text.
impl Payload for Value {
    fn into_chunk(self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(text) => text,
            Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => self.to_string(),
        }
    }
}

impl Payload for &Value {
    fn into_chunk(self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => self.to_string(),
        }
    }
}

impl Payload for Map<String, Value> {
    fn into_chunk(self) -> String {
        Value::Object(self).to_string()
    }
}

macro_rules! display_payload {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Payload for $ty {
                #[inline]
                fn into_chunk(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_payload!(char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
