use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid http method: {method}")]
    InvalidMethod { method: String },
}

impl RouteError {
    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }
}
