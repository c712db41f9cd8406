use super::normalize::normalize_text;
use super::pdf::PdfTextExtractor;
use super::types::{ExtractedText, OcrEngine, PdfExtractor, TextSource};
use super::ExtractionError;
use crate::pipeline::import::FileCategory;

/// Turns uploaded document bytes into text for parameter parsing.
///
/// All methods block (OCR and PDF decoding are CPU-bound); async callers
/// should run them on a blocking thread.
pub struct DocumentTextExtractor {
    ocr: Option<Box<dyn OcrEngine>>,
    pdf: Box<dyn PdfExtractor>,
}

impl DocumentTextExtractor {
    pub fn new(ocr: Option<Box<dyn OcrEngine>>, pdf: Box<dyn PdfExtractor>) -> Self {
        Self { ocr, pdf }
    }

    /// pdf-extract for PDFs, plus whatever OCR engine is given.
    pub fn with_ocr(ocr: Option<Box<dyn OcrEngine>>) -> Self {
        Self::new(ocr, Box::new(PdfTextExtractor))
    }

    pub fn ocr_available(&self) -> bool {
        self.ocr.is_some()
    }

    pub fn extract_image(&self, image: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let engine = self.ocr.as_ref().ok_or(ExtractionError::OcrUnavailable)?;
        let output = engine.recognize(image)?;

        let text = normalize_text(&output.text);
        if text.is_empty() {
            return Err(ExtractionError::NoTextFound("image"));
        }

        tracing::info!(
            text_len = text.len(),
            confidence = output.confidence,
            "OCR text extracted"
        );

        Ok(ExtractedText {
            source: TextSource::Ocr,
            text,
            pages: 1,
            confidence: output.confidence,
        })
    }

    /// Pages without a text layer are skipped; the rest are joined with
    /// newlines.
    pub fn extract_pdf(&self, pdf: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let pages = self.pdf.pages(pdf)?;
        let total = pages.len();

        let with_text: Vec<&str> = pages
            .iter()
            .filter(|p| p.has_text())
            .map(|p| p.text.as_str())
            .collect();
        if with_text.len() < total {
            tracing::debug!(
                total,
                skipped = total - with_text.len(),
                "PDF pages without a text layer"
            );
        }

        let text = normalize_text(&with_text.join("\n"));
        if text.is_empty() {
            return Err(ExtractionError::NoTextFound("PDF"));
        }

        let confidence = with_text.len() as f32 / total as f32;
        tracing::info!(text_len = text.len(), pages = total, "PDF text extracted");

        Ok(ExtractedText {
            source: TextSource::PdfTextLayer,
            text,
            pages: total,
            confidence,
        })
    }

    /// Non-UTF-8 uploads are rejected.
    pub fn extract_plain_text(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let raw = std::str::from_utf8(bytes)
            .map_err(|e| ExtractionError::UnsupportedFormat(format!("text is not UTF-8: {e}")))?;
        let text = normalize_text(raw);
        if text.is_empty() {
            return Err(ExtractionError::NoTextFound("text file"));
        }
        Ok(ExtractedText {
            source: TextSource::Upload,
            text,
            pages: 1,
            confidence: 1.0,
        })
    }

    pub fn extract(
        &self,
        bytes: &[u8],
        category: FileCategory,
    ) -> Result<ExtractedText, ExtractionError> {
        match category {
            FileCategory::Image => self.extract_image(bytes),
            FileCategory::Pdf => self.extract_pdf(bytes),
            FileCategory::PlainText => self.extract_plain_text(bytes),
            FileCategory::Unsupported => Err(ExtractionError::UnsupportedFormat(
                "File must be an image or PDF".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::ocr::MockOcrEngine;
    use crate::pipeline::extraction::pdf::tests::make_test_pdf_pages;
    use crate::pipeline::extraction::types::PdfPage;

    /// Serves fixed page texts regardless of input.
    struct FixedPdf(Vec<&'static str>);

    impl PdfExtractor for FixedPdf {
        fn pages(&self, _pdf: &[u8]) -> Result<Vec<PdfPage>, ExtractionError> {
            Ok(self
                .0
                .iter()
                .zip(1..)
                .map(|(text, number)| PdfPage {
                    number,
                    text: text.to_string(),
                })
                .collect())
        }
    }

    fn with_mock_ocr(text: &str) -> DocumentTextExtractor {
        DocumentTextExtractor::with_ocr(Some(Box::new(MockOcrEngine::new(text, 0.88))))
    }

    #[test]
    fn image_goes_through_ocr() {
        let extractor = with_mock_ocr("  Hemoglobin:  13.5 g/dL  \n");
        let result = extractor.extract_image(b"png").unwrap();
        assert_eq!(result.text, "Hemoglobin: 13.5 g/dL");
        assert_eq!(result.source, TextSource::Ocr);
        assert!((result.confidence - 0.88).abs() < f32::EPSILON);
    }

    #[test]
    fn image_without_engine_is_unavailable() {
        let extractor = DocumentTextExtractor::with_ocr(None);
        assert!(!extractor.ocr_available());
        let err = extractor.extract_image(b"png").unwrap_err();
        assert!(matches!(err, ExtractionError::OcrUnavailable));
    }

    #[test]
    fn blank_ocr_output_is_no_text() {
        let extractor = with_mock_ocr("   \n  ");
        let err = extractor.extract_image(b"png").unwrap_err();
        assert!(matches!(err, ExtractionError::NoTextFound("image")));
    }

    #[test]
    fn pdf_skips_pages_without_text() {
        let pdf = FixedPdf(vec!["Glucose: 90", "", "WBC: 6.0"]);
        let extractor = DocumentTextExtractor::new(None, Box::new(pdf));
        let result = extractor.extract_pdf(b"%PDF").unwrap();
        assert_eq!(result.text, "Glucose: 90\nWBC: 6.0");
        assert_eq!(result.pages, 3);
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn scanned_pdf_is_no_text() {
        let extractor = DocumentTextExtractor::new(None, Box::new(FixedPdf(vec!["", "  "])));
        let err = extractor.extract_pdf(b"%PDF").unwrap_err();
        assert!(matches!(err, ExtractionError::NoTextFound("PDF")));
    }

    #[test]
    fn real_pdf_through_dispatch() {
        let pdf = make_test_pdf_pages(&["Creatinine 0.9", "Platelets 310"]);
        let extractor = DocumentTextExtractor::with_ocr(None);
        let result = extractor.extract(&pdf, FileCategory::Pdf).unwrap();
        assert_eq!(result.source, TextSource::PdfTextLayer);
        assert!(result.text.contains("Creatinine"));
        assert!(result.text.contains("Platelets"));
    }

    #[test]
    fn plain_text_must_be_utf8() {
        let extractor = DocumentTextExtractor::with_ocr(None);
        assert_eq!(
            extractor.extract_plain_text(b"Hb 12.1").unwrap().source,
            TextSource::Upload
        );
        let err = extractor.extract_plain_text(&[0xC3, 0x28]).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn unsupported_category_is_rejected() {
        let extractor = with_mock_ocr("Glucose 95");
        let err = extractor
            .extract(b"PK\x03\x04", FileCategory::Unsupported)
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported format: File must be an image or PDF");
    }
}
