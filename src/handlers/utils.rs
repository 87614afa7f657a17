use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Addressable collections under `/api/:resource/:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Projects,
    Categories,
}

impl Resource {
    /// Match a path segment exactly; anything else is not a resource.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "projects" => Some(Resource::Projects),
            "categories" => Some(Resource::Categories),
            _ => None,
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            Resource::Projects => "projects",
            Resource::Categories => "categories",
        }
    }
}

/// Parse an `s_no` path segment. Only plain ASCII digits that fit in an i64 match.
pub fn parse_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Split a raw `/api/:resource/:id` pathname into its two segments, still percent-encoded.
pub fn record_segments(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix("/api/")?;
    let (resource, id) = rest.split_once('/')?;
    if id.contains('/') {
        return None;
    }
    Some((resource, id))
}

/// Resolve `/api/:resource/:id` or fall through to the not-found action.
pub fn resolve_record_path(resource: &str, id: &str) -> Result<(Resource, i64), ApiError> {
    match (Resource::from_segment(resource), parse_id(id)) {
        (Some(resource), Some(id)) => Ok((resource, id)),
        _ => Err(ApiError::route_not_found()),
    }
}

/// Decode a JSON request body. Unparsable input is a 500 carrying the parser message.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}
