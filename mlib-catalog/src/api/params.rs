//! Shared query parameter parsing

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::error::{ApiError, ApiResult};

/// Decoded query string in request order
///
/// A repeated key resolves to its first occurrence, so `?page=1&page=2`
/// reads as page 1 instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value supplied for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|e| {
            tracing::warn!("Undecodable query string: {}", e);
            ApiError::BadRequest("Invalid query string".to_string())
        })?;
        Ok(Self::new(pairs))
    }
}

/// Parse a required numeric song id
pub fn parse_song_id(raw: Option<&str>) -> ApiResult<i64> {
    let raw = match raw {
        None | Some("") => {
            tracing::warn!("Missing songId parameter");
            return Err(ApiError::BadRequest("Missing songId parameter".to_string()));
        }
        Some(raw) => raw,
    };

    raw.parse::<i64>().map_err(|e| {
        tracing::warn!("Invalid songId parameter {:?}: {}", raw, e);
        ApiError::BadRequest("Invalid songId parameter".to_string())
    })
}
