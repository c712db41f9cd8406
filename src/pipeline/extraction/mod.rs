pub mod normalize;
pub mod ocr;
pub mod orchestrator;
pub mod pdf;
pub mod types;

pub use normalize::*;
pub use ocr::*;
pub use orchestrator::*;
pub use pdf::*;
pub use types::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Tesseract OCR initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("OCR is not available on this server")]
    OcrUnavailable,

    #[error("Tessdata not found at: {0}")]
    TessdataNotFound(PathBuf),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("No text found in {0}")]
    NoTextFound(&'static str),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}
