use std::path::{Path, PathBuf};

use super::types::{OcrEngine, OcrOutput};
use super::ExtractionError;

/// Tesseract OCR engine, English only.
/// Built only with the `ocr` feature (links libtesseract).
#[cfg(feature = "ocr")]
pub struct TesseractOcr {
    tessdata_dir: PathBuf,
}

#[cfg(feature = "ocr")]
impl TesseractOcr {
    pub fn new(tessdata_dir: &Path) -> Result<Self, ExtractionError> {
        if !has_english_data(tessdata_dir) {
            return Err(ExtractionError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }
        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
        })
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &[u8]) -> Result<OcrOutput, ExtractionError> {
        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?;

        let mut tess = tesseract::Tesseract::new(Some(tessdata_str), Some("eng"))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?
            .set_image_from_mem(image)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let confidence = tess.mean_text_conf().max(0) as f32 / 100.0;

        Ok(OcrOutput { text, confidence })
    }
}

/// Build the OCR engine for this process, if one can be initialized.
///
/// Returns `None` when no English traineddata can be found; image uploads
/// then fail with `OcrUnavailable` while PDFs and plain text keep working.
#[cfg(feature = "ocr")]
pub fn default_ocr_engine(tessdata_override: Option<&Path>) -> Option<Box<dyn OcrEngine>> {
    let Some(dir) = find_tessdata_dir(tessdata_override) else {
        tracing::warn!("Tesseract data not found, images will not be OCR'd");
        return None;
    };
    match TesseractOcr::new(&dir) {
        Ok(engine) => {
            tracing::info!(tessdata = %dir.display(), "Tesseract OCR initialized");
            Some(Box::new(engine))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Tesseract OCR unavailable");
            None
        }
    }
}

/// Without the `ocr` feature there is no engine to build.
#[cfg(not(feature = "ocr"))]
pub fn default_ocr_engine(_tessdata_override: Option<&Path>) -> Option<Box<dyn OcrEngine>> {
    tracing::info!("Built without the `ocr` feature, image OCR unavailable");
    None
}

/// Locate a tessdata directory: explicit override, then `TESSDATA_PREFIX`,
/// then common system paths.
pub fn find_tessdata_dir(tessdata_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = tessdata_override {
        if has_english_data(dir) {
            return Some(dir.to_path_buf());
        }
        tracing::warn!(path = %dir.display(), "Configured tessdata has no eng.traineddata");
    }

    if let Ok(path) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&path);
        if has_english_data(&p) {
            return Some(p);
        }
    }

    let candidates = [
        "/usr/share/tesseract-ocr/5/tessdata",
        "/usr/share/tesseract-ocr/4.00/tessdata",
        "/usr/share/tessdata",
        "/usr/local/share/tessdata",
        "/opt/homebrew/share/tessdata",
    ];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| has_english_data(p))
}

fn has_english_data(dir: &Path) -> bool {
    dir.join("eng.traineddata").exists()
}

/// Returns canned text; stands in for Tesseract in tests.
pub struct MockOcrEngine {
    pub text: String,
    pub confidence: f32,
}

impl MockOcrEngine {
    pub fn new(text: &str, confidence: f32) -> Self {
        Self {
            text: text.to_string(),
            confidence,
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image: &[u8]) -> Result<OcrOutput, ExtractionError> {
        Ok(OcrOutput {
            text: self.text.clone(),
            confidence: self.confidence,
        })
    }
}
