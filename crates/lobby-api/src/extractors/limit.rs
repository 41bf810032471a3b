//! Message limit extractor
//!
//! Reads the optional `limit` query parameter of `GET /messages`.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

/// Raw query parameters
#[derive(Debug, Default, Deserialize)]
struct LimitParams {
    #[serde(default)]
    limit: Option<String>,
}

/// How many of the most recent visible messages to return
///
/// Parsing is lenient: a missing, zero, negative, or non-numeric value
/// means "no limit" rather than a client error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageLimit(pub Option<usize>);

impl MessageLimit {
    /// Interpret a raw `limit` value
    pub fn parse(raw: Option<&str>) -> Self {
        let limit = raw
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0);
        Self(limit)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MessageLimit
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<LimitParams>::try_from_uri(&parts.uri)
            .map(|Query(p)| p)
            .unwrap_or_default();

        Ok(MessageLimit::parse(params.limit.as_deref()))
    }
}
