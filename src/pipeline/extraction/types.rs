use super::ExtractionError;

/// Where the text of a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Embedded text layer of a digital PDF.
    PdfTextLayer,
    /// OCR over an uploaded image.
    Ocr,
    /// The upload itself was UTF-8 text.
    Upload,
}

impl TextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PdfTextLayer => "pdf_text_layer",
            Self::Ocr => "ocr",
            Self::Upload => "upload",
        }
    }
}

/// Normalized document text, ready for parameter parsing.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub source: TextSource,
    pub text: String,
    /// Pages read (1 for images and text uploads).
    pub pages: usize,
    /// 0.0..=1.0. OCR reports its own mean confidence; for PDFs this is the
    /// share of pages that carried a text layer.
    pub confidence: f32,
}

/// Raw text of one PDF page, 1-based.
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub number: usize,
    pub text: String,
}

impl PdfPage {
    /// Scanned pages come back from the text layer empty or nearly so.
    pub fn has_text(&self) -> bool {
        self.text.chars().filter(|c| c.is_alphanumeric()).count() >= 3
    }
}

#[derive(Debug)]
pub struct OcrOutput {
    pub text: String,
    pub confidence: f32,
}

/// Image → text. Implementations must be shareable across request tasks.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8]) -> Result<OcrOutput, ExtractionError>;
}

/// PDF → per-page text layer.
pub trait PdfExtractor: Send + Sync {
    fn pages(&self, pdf: &[u8]) -> Result<Vec<PdfPage>, ExtractionError>;
}
