//! Request handlers
//!
//! Handlers never reject: every outcome, success or failure, becomes a reply
//! here. Only filters (routing, auth, body parsing) produce rejections.

use crate::reply;
use crate::state::AppState;
use percent_encoding::percent_decode_str;
use pokebox_core::{ApiError, Identity, MAX_PAGE_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reply::Response;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `offset`/`limit` from the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub offset: u32,
    pub limit: u32,
}

impl PageBounds {
    /// Parse bounds, falling back to `offset = 0` and `default_limit`
    pub fn parse(query: &HashMap<String, String>, default_limit: u32) -> Result<Self, ApiError> {
        let offset = parse_bound(query, "offset")?.unwrap_or(0);
        let limit = parse_bound(query, "limit")?.unwrap_or(default_limit);
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(ApiError::BadInput(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        Ok(Self { offset, limit })
    }
}

fn parse_bound(query: &HashMap<String, String>, name: &str) -> Result<Option<u32>, ApiError> {
    query
        .get(name)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| ApiError::BadInput(format!("{name} must be a non-negative integer")))
        })
        .transpose()
}

/// Decode a raw path segment; warp hands segments over still percent-encoded
pub fn decode_segment(raw: &str) -> Result<String, ApiError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ApiError::BadInput(format!("path segment {raw:?} is not valid UTF-8")))
}

pub async fn get_creature(name: String, state: AppState) -> Result<Response, Infallible> {
    let name = match decode_segment(&name) {
        Ok(name) => name,
        Err(err) => return Ok(reply::error(&err)),
    };
    let result = state
        .aggregator
        .fetch_creature(&name)
        .await
        .map_err(ApiError::from);
    Ok(reply::outcome(result, StatusCode::OK))
}

pub async fn list_creatures(
    query: HashMap<String, String>,
    state: AppState,
) -> Result<Response, Infallible> {
    let bounds = match PageBounds::parse(&query, state.config.default_page_limit) {
        Ok(bounds) => bounds,
        Err(err) => return Ok(reply::error(&err)),
    };
    let result = state
        .aggregator
        .fetch_page(bounds.offset, bounds.limit)
        .await
        .map_err(ApiError::from);
    Ok(reply::outcome(result, StatusCode::OK))
}

pub async fn issue_token(request: TokenRequest, state: AppState) -> Result<Response, Infallible> {
    let result = Identity::new(request.username)
        .map(|identity| {
            tracing::info!(%identity, "token issued");
            TokenResponse {
                token: state.authority.issue(&identity),
            }
        })
        .map_err(|e| ApiError::BadInput(e.to_string()));
    Ok(reply::outcome(result, StatusCode::OK))
}

pub async fn list_entries(identity: Identity, state: AppState) -> Result<Response, Infallible> {
    let result = state.collection.list(&identity).await.map_err(ApiError::from);
    Ok(reply::outcome(result, StatusCode::OK))
}

pub async fn create_entry(
    identity: Identity,
    payload: Value,
    state: AppState,
) -> Result<Response, Infallible> {
    let result = state
        .collection
        .create(&identity, &payload)
        .await
        .map_err(ApiError::from);
    Ok(reply::outcome(result, StatusCode::CREATED))
}

pub async fn clear_entries(identity: Identity, state: AppState) -> Result<Response, Infallible> {
    Ok(match state.collection.clear_all(&identity).await {
        Ok(()) => reply::no_content(),
        Err(err) => reply::error(&err.into()),
    })
}

pub async fn get_entry(
    id: String,
    identity: Identity,
    state: AppState,
) -> Result<Response, Infallible> {
    let result = state
        .collection
        .get(&identity, &id)
        .await
        .map_err(ApiError::from);
    Ok(reply::outcome(result, StatusCode::OK))
}

pub async fn update_entry(
    id: String,
    identity: Identity,
    patch: Value,
    state: AppState,
) -> Result<Response, Infallible> {
    let result = state
        .collection
        .update(&identity, &id, &patch)
        .await
        .map_err(ApiError::from);
    Ok(reply::outcome(result, StatusCode::OK))
}

pub async fn delete_entry(
    id: String,
    identity: Identity,
    state: AppState,
) -> Result<Response, Infallible> {
    Ok(match state.collection.delete(&identity, &id).await {
        Ok(()) => reply::no_content(),
        Err(err) => reply::error(&err.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokebox_core::ErrorKind;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn bounds_default_when_absent() {
        let bounds = PageBounds::parse(&HashMap::new(), 20).unwrap();
        assert_eq!(bounds, PageBounds { offset: 0, limit: 20 });
    }

    #[test]
    fn bounds_parse_given_values() {
        let bounds = PageBounds::parse(&query(&[("offset", "40"), ("limit", "10")]), 20).unwrap();
        assert_eq!(bounds, PageBounds { offset: 40, limit: 10 });
    }

    #[test]
    fn segments_are_percent_decoded() {
        assert_eq!(decode_segment("mr%2Dmime").unwrap(), "mr-mime");
        assert_eq!(decode_segment("pikachu").unwrap(), "pikachu");
        assert_eq!(
            decode_segment("%FF").unwrap_err().kind(),
            ErrorKind::BadInput
        );
    }

    #[test]
    fn bad_bounds_are_bad_input() {
        for pairs in [
            vec![("offset", "-1")],
            vec![("offset", "abc")],
            vec![("limit", "0")],
            vec![("limit", "101")],
            vec![("limit", "2.5")],
        ] {
            let err = PageBounds::parse(&query(&pairs), 20).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadInput, "{pairs:?}");
        }
    }
}
