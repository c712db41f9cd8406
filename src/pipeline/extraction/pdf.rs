use super::types::{PdfExtractor, PdfPage};
use super::ExtractionError;

/// Reads the embedded text layer of digital PDFs with pdf-extract.
///
/// No rendering or OCR fallback: scanned pages yield empty text.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn pages(&self, pdf: &[u8]) -> Result<Vec<PdfPage>, ExtractionError> {
        if !pdf.starts_with(b"%PDF") {
            return Err(ExtractionError::PdfParsing("missing %PDF header".into()));
        }

        let texts = pdf_extract::extract_text_from_mem_by_pages(pdf)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        Ok(texts
            .into_iter()
            .zip(1..)
            .map(|(text, number)| PdfPage { number, text })
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object, Stream};

    /// One-page PDF showing `text` in Helvetica.
    pub(crate) fn make_test_pdf(text: &str) -> Vec<u8> {
        make_test_pdf_pages(&[text])
    }

    /// One page per entry; each line of an entry is drawn on its own row.
    pub(crate) fn make_test_pdf_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let kids: Vec<Object> = pages
            .iter()
            .map(|page_text| {
                let mut ops = String::from("BT /F1 11 Tf 72 720 Td 14 TL ");
                for line in page_text.lines() {
                    ops.push_str(&format!("({line}) Tj T* "));
                }
                ops.push_str("ET");
                let content_id = doc.add_object(Stream::new(dictionary! {}, ops.into_bytes()));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                    "Contents" => content_id,
                    "Resources" => dictionary! {
                        "Font" => dictionary! { "F1" => font_id },
                    },
                })
                .into()
            })
            .collect();

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn reads_text_layer() {
        let pdf = make_test_pdf("Hemoglobin 13.5 g/dL");
        let pages = PdfTextExtractor.pages(&pdf).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert!(pages[0].text.contains("Hemoglobin"), "got: {}", pages[0].text);
    }

    #[test]
    fn pages_are_numbered_in_order() {
        let pdf = make_test_pdf_pages(&["Glucose 92 mg/dL", "Triglycerides 140"]);
        let pages = PdfTextExtractor.pages(&pdf).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].number, 2);
        assert!(pages[0].text.contains("Glucose"));
        assert!(pages[1].text.contains("Triglycerides"));
    }

    #[test]
    fn non_pdf_is_rejected() {
        let err = PdfTextExtractor.pages(b"Glucose 95").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfParsing(_)));
    }
}
