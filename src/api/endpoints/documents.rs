//! `POST /process-document`: upload → text → health parameters in one call.
//!
//! Any failure after the upload is read (unsupported type, OCR/PDF errors)
//! is reported as `success: false` rather than an HTTP error.

use axum::extract::{Multipart, State};
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ParseParametersResponse, Upload};
use crate::pipeline::import::resolve_category;
use crate::pipeline::parameters;

pub async fn process(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ParseParametersResponse>, ApiError> {
    let upload = Upload::from_multipart(multipart).await?;
    let request_id = Uuid::new_v4();

    let (category, source) = resolve_category(
        upload.content_type.as_deref(),
        upload.file_name.as_deref(),
        &upload.bytes,
    );

    tracing::info!(
        %request_id,
        file_name = upload.file_name.as_deref().unwrap_or(""),
        content_type = upload.content_type.as_deref().unwrap_or(""),
        category = category.as_str(),
        ?source,
        size = upload.bytes.len(),
        "Processing document"
    );

    if !category.is_supported() {
        return Ok(Json(failed(request_id, "File must be an image or PDF")));
    }

    let extracted = match ctx.extract_text(upload.bytes, category).await {
        Ok(extracted) => extracted,
        Err(e) => return Ok(Json(failed(request_id, &e.to_string()))),
    };

    let found = parameters::extract(&extracted.text);
    tracing::info!(
        %request_id,
        source = extracted.source.as_str(),
        count = found.len(),
        "Document processed"
    );

    let message = format!(
        "Successfully processed document and found {} health parameters",
        found.len()
    );
    Ok(Json(ParseParametersResponse::ok(found, message)))
}

fn failed(request_id: Uuid, cause: &str) -> ParseParametersResponse {
    tracing::error!(%request_id, cause, "Error processing document");
    ParseParametersResponse::failed(format!("Failed to process document: {cause}"))
}
