//! `POST /extract-text/image` and `POST /extract-text/pdf`.
//!
//! A wrong content type is a client error (400). Once the upload is accepted,
//! extraction failures come back as `success: false` with the cause in
//! `message`.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ExtractTextResponse, Upload};
use crate::pipeline::import::{category_from_mime, FileCategory};

/// `POST /extract-text/image`: OCR an uploaded image.
pub async fn image(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, ApiError> {
    let upload = Upload::from_multipart(multipart).await?;
    require_category(&upload, FileCategory::Image, "File must be an image")?;
    Ok(Json(extract(&ctx, upload, FileCategory::Image, "image").await))
}

/// `POST /extract-text/pdf`: read the text layer of an uploaded PDF.
pub async fn pdf(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, ApiError> {
    let upload = Upload::from_multipart(multipart).await?;
    require_category(&upload, FileCategory::Pdf, "File must be a PDF")?;
    Ok(Json(extract(&ctx, upload, FileCategory::Pdf, "PDF").await))
}

fn require_category(
    upload: &Upload,
    expected: FileCategory,
    message: &str,
) -> Result<(), ApiError> {
    let declared = upload.content_type.as_deref().map(category_from_mime);
    if declared == Some(expected) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(message.to_string()))
    }
}

async fn extract(
    ctx: &ApiContext,
    upload: Upload,
    category: FileCategory,
    label: &str,
) -> ExtractTextResponse {
    let size = upload.bytes.len();
    match ctx.extract_text(upload.bytes, category).await {
        Ok(extracted) => {
            tracing::info!(
                category = category.as_str(),
                size,
                text_len = extracted.text.len(),
                "Text extracted"
            );
            ExtractTextResponse::ok(
                extracted.text,
                format!("Text extracted successfully from {label}"),
            )
        }
        Err(e) => {
            tracing::error!(category = category.as_str(), size, error = %e, "Error extracting text");
            ExtractTextResponse::failed(format!("Failed to extract text from {label}: {e}"))
        }
    }
}
