use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("unsupported http method: {method}")]
    InvalidMethod { method: String },
}

impl RequestError {
    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }
}

/// Errors raised while turning a [`Response`](crate::protocol::Response) into an `http::Response`.
///
/// Building the response itself never fails; problems only surface once the
/// accumulated state has to satisfy the `http` crate's invariants.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("invalid status code {code}: {reason}")]
    InvalidStatus { code: u16, reason: String },

    #[error("http error: {source}")]
    Http {
        #[from]
        source: http::Error,
    },
}

impl ResponseError {
    pub fn invalid_status<S: ToString>(code: u16, reason: S) -> Self {
        Self::InvalidStatus { code, reason: reason.to_string() }
    }
}
