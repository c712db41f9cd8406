use std::path::Path;

/// Broad file categories we handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Pdf,
    Image,
    PlainText,
    Unsupported,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::PlainText => "plain_text",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Where the category of an upload was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    ContentType,
    FileName,
    MagicBytes,
}

/// Map a MIME type to a file category.
pub fn category_from_mime(mime: &str) -> FileCategory {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if essence.starts_with("image/") {
        FileCategory::Image
    } else if essence == "application/pdf" {
        FileCategory::Pdf
    } else if essence == "text/plain" {
        FileCategory::PlainText
    } else {
        FileCategory::Unsupported
    }
}

/// Detect a file category from magic bytes.
pub fn sniff_category(bytes: &[u8]) -> FileCategory {
    match bytes {
        // PDF: starts with %PDF
        [0x25, 0x50, 0x44, 0x46, ..] => FileCategory::Pdf,
        // JPEG: starts with FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => FileCategory::Image,
        // PNG: starts with 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => FileCategory::Image,
        // TIFF: little-endian (49 49 2A 00) or big-endian (4D 4D 00 2A)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => FileCategory::Image,
        // GIF87a / GIF89a
        [b'G', b'I', b'F', b'8', ..] => FileCategory::Image,
        _ if is_likely_text(bytes) => FileCategory::PlainText,
        _ => FileCategory::Unsupported,
    }
}

/// Resolve the category of an upload.
///
/// The declared content type wins; a missing or generic
/// (`application/octet-stream`) one falls back to the file name extension,
/// then to magic bytes.
pub fn resolve_category(
    content_type: Option<&str>,
    file_name: Option<&str>,
    bytes: &[u8],
) -> (FileCategory, CategorySource) {
    if let Some(mime) = content_type.filter(|m| !is_generic_mime(m)) {
        return (category_from_mime(mime), CategorySource::ContentType);
    }

    if let Some(guessed) = file_name.and_then(|n| mime_guess::from_path(Path::new(n)).first()) {
        let category = category_from_mime(guessed.essence_str());
        if category.is_supported() {
            return (category, CategorySource::FileName);
        }
    }

    (sniff_category(bytes), CategorySource::MagicBytes)
}

fn is_generic_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or("").trim();
    essence.is_empty() || essence.eq_ignore_ascii_case("application/octet-stream")
}

/// Valid UTF-8 and mostly printable within the first 4 KiB.
fn is_likely_text(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    let head = &bytes[..bytes.len().min(4096)];
    let text = match std::str::from_utf8(head) {
        Ok(t) => t,
        // A multi-byte character may straddle the cut
        Err(e) if e.error_len().is_none() => match std::str::from_utf8(&head[..e.valid_up_to()]) {
            Ok(t) => t,
            Err(_) => return false,
        },
        Err(_) => return false,
    };

    let total = text.chars().count().max(1);
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .count();
    printable as f64 / total as f64 > 0.80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_mapping() {
        assert_eq!(category_from_mime("image/png"), FileCategory::Image);
        assert_eq!(category_from_mime("image/jpeg"), FileCategory::Image);
        assert_eq!(category_from_mime("application/pdf"), FileCategory::Pdf);
        assert_eq!(category_from_mime("text/plain; charset=utf-8"), FileCategory::PlainText);
        assert_eq!(category_from_mime("APPLICATION/PDF"), FileCategory::Pdf);
        assert_eq!(category_from_mime("application/zip"), FileCategory::Unsupported);
    }

    #[test]
    fn sniff_pdf() {
        assert_eq!(sniff_category(b"%PDF-1.4\n..."), FileCategory::Pdf);
    }

    #[test]
    fn sniff_images() {
        assert_eq!(sniff_category(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), FileCategory::Image);
        assert_eq!(
            sniff_category(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            FileCategory::Image
        );
        assert_eq!(sniff_category(&[0x49, 0x49, 0x2A, 0x00, 0x08]), FileCategory::Image);
        assert_eq!(sniff_category(b"GIF89a"), FileCategory::Image);
    }

    #[test]
    fn sniff_plain_text() {
        assert_eq!(sniff_category(b"Glucose: 95 mg/dL\n"), FileCategory::PlainText);
    }

    #[test]
    fn sniff_binary_is_unsupported() {
        assert_eq!(sniff_category(&[0x00, 0x01, 0x02, 0x03, 0x04]), FileCategory::Unsupported);
        assert_eq!(sniff_category(&[]), FileCategory::Unsupported);
    }

    #[test]
    fn declared_content_type_wins() {
        let (category, source) = resolve_category(Some("application/pdf"), Some("scan.png"), b"");
        assert_eq!(category, FileCategory::Pdf);
        assert_eq!(source, CategorySource::ContentType);
    }

    #[test]
    fn octet_stream_falls_back_to_file_name() {
        let (category, source) =
            resolve_category(Some("application/octet-stream"), Some("report.pdf"), b"");
        assert_eq!(category, FileCategory::Pdf);
        assert_eq!(source, CategorySource::FileName);
    }

    #[test]
    fn unknown_name_falls_back_to_magic_bytes() {
        let (category, source) = resolve_category(None, Some("upload.bin"), &[0xFF, 0xD8, 0xFF]);
        assert_eq!(category, FileCategory::Image);
        assert_eq!(source, CategorySource::MagicBytes);
    }

    #[test]
    fn category_flags() {
        assert!(!FileCategory::Unsupported.is_supported());
        assert_eq!(FileCategory::PlainText.as_str(), "plain_text");
    }
}
