//! Shared state and response bodies for the API layer.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::models::HealthParameter;
use crate::pipeline::extraction::{DocumentTextExtractor, ExtractedText, ExtractionError};
use crate::pipeline::import::FileCategory;

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub extractor: Arc<DocumentTextExtractor>,
}

impl ApiContext {
    pub fn new(extractor: DocumentTextExtractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }

    /// Run text extraction on a blocking thread.
    pub async fn extract_text(
        &self,
        bytes: Bytes,
        category: FileCategory,
    ) -> Result<ExtractedText, ExtractionError> {
        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || extractor.extract(&bytes, category))
            .await
            .map_err(|e| ExtractionError::TaskFailed(e.to_string()))?
    }
}

/// An uploaded file pulled out of a multipart body.
#[derive(Debug)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Upload {
    /// Read the `file` field, skipping any other fields.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            return Ok(Self {
                file_name,
                content_type,
                bytes,
            });
        }
        Err(ApiError::BadRequest(format!(
            "Missing '{UPLOAD_FIELD}' field in multipart body"
        )))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractTextResponse {
    pub text: String,
    pub success: bool,
    pub message: String,
}

impl ExtractTextResponse {
    pub fn ok(text: String, message: String) -> Self {
        Self {
            text,
            success: true,
            message,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            text: String::new(),
            success: false,
            message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseParametersResponse {
    pub parameters: Vec<HealthParameter>,
    pub success: bool,
    pub message: String,
}

impl ParseParametersResponse {
    pub fn ok(parameters: Vec<HealthParameter>, message: String) -> Self {
        Self {
            parameters,
            success: true,
            message,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            parameters: Vec::new(),
            success: false,
            message,
        }
    }
}
