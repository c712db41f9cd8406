//! `POST /parse-parameters`: parse health parameters from raw text.
//!
//! The text may come as a `text` query parameter, a JSON body
//! `{"text": "..."}`, or a raw `text/plain` body.

use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ParseParametersResponse;
use crate::models::HealthParameter;
use crate::pipeline::parameters;

#[derive(Deserialize)]
pub struct ParseQuery {
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct ParseBody {
    pub text: String,
}

pub async fn parse(
    Query(query): Query<ParseQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ParseParametersResponse>, ApiError> {
    let parameters = if let Some(text) = query.text {
        parameters::extract(&text)
    } else if body.is_empty() {
        return Err(ApiError::InvalidArgument("`text` is required".into()));
    } else if is_json(&headers) {
        let parsed: ParseBody = serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidArgument(format!("Invalid JSON body: {e}")))?;
        parameters::extract(&parsed.text)
    } else {
        parameters::extract_from_bytes(&body)?
    };

    Ok(Json(success(parameters)))
}

fn success(parameters: Vec<HealthParameter>) -> ParseParametersResponse {
    let count = parameters.len();
    tracing::info!(count, "Parsed health parameters");
    ParseParametersResponse::ok(
        parameters,
        format!("Successfully parsed {count} health parameters"),
    )
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
}
