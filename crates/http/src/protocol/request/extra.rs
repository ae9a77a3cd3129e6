use serde::de::DeserializeOwned;
use serde_json::Value;
use indexmap::IndexMap;
use std::fmt;

/// Key of an [`ExtraData`] entry: either a name or an index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtraKey {
    Index(i64),
    Name(String),
}

impl From<&str> for ExtraKey {
    fn from(name: &str) -> Self {
        ExtraKey::Name(name.to_owned())
    }
}

impl From<String> for ExtraKey {
    fn from(name: String) -> Self {
        ExtraKey::Name(name)
    }
}

impl From<i64> for ExtraKey {
    fn from(index: i64) -> Self {
        ExtraKey::Index(index)
    }
}

impl From<i32> for ExtraKey {
    fn from(index: i32) -> Self {
        ExtraKey::Index(index.into())
    }
}

impl From<u32> for ExtraKey {
    fn from(index: u32) -> Self {
        ExtraKey::Index(index.into())
    }
}

impl fmt::Display for ExtraKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtraKey::Index(index) => write!(f, "{index}"),
            ExtraKey::Name(name) => f.write_str(name),
        }
    }
}

/// User defined values attached to one request.
///
/// Middleware computes something once (the authenticated user, a parsed
/// token, ...) and stores it here for the entries that run after it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraData {
    data: IndexMap<ExtraKey, Value>,
}

impl ExtraData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value in place.
    pub fn set(&mut self, key: impl Into<ExtraKey>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: impl Into<ExtraKey>) -> Option<&Value> {
        self.data.get(&key.into())
    }

    /// Reads the value under `key` as a `T`, `None` when absent or of another shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: impl Into<ExtraKey>) -> Option<T> {
        self.get(key).and_then(|value| T::deserialize(value).ok())
    }

    pub fn remove(&mut self, key: impl Into<ExtraKey>) -> Option<Value> {
        self.data.shift_remove(&key.into())
    }

    /// All entries, in the order they were first set.
    pub fn to_array(&self) -> &IndexMap<ExtraKey, Value> {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
