//! Query string extraction
//!
//! Parameters are read as an ordered list of pairs so a repeated key never
//! fails the request; the first occurrence wins. Anything axum rejects is
//! answered with the JSON error envelope rather than a plain-text body.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use tracing::debug;

use super::ApiError;

/// Raw query parameters in request order
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// First value supplied for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, owned
    pub fn first_owned(&self, key: &str) -> Option<String> {
        self.first(key).map(str::to_string)
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => Ok(Self(pairs)),
            Err(rejection) => {
                debug!("Rejected query string: {}", rejection.body_text());
                Err(ApiError::BadRequest(rejection.body_text()))
            }
        }
    }
}
