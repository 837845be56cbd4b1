use lopdf::Document as PdfDocument;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported file type: {0} (expected .txt or .pdf)")]
    UnsupportedFileType(String),

    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Pdf,
}

impl FileKind {
    fn from_mime(mime: &str) -> Option<Self> {
        // Strip parameters like "; charset=utf-8"
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence {
            "text/plain" => Some(FileKind::PlainText),
            "application/pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }

    /// Resolve the upload type: declared content type, then extension, then magic bytes.
    pub fn detect(
        file_name: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<Self, DocumentError> {
        if let Some(kind) = content_type.and_then(Self::from_mime) {
            return Ok(kind);
        }

        if let Some(name) = file_name {
            if let Some(kind) = mime_guess::from_path(Path::new(name))
                .first()
                .and_then(|mime| Self::from_mime(mime.essence_str()))
            {
                return Ok(kind);
            }
        }

        if let Some(kind) = infer::get(data).and_then(|t| Self::from_mime(t.mime_type())) {
            return Ok(kind);
        }

        Err(DocumentError::UnsupportedFileType(
            file_name
                .or(content_type)
                .unwrap_or("unknown")
                .to_string(),
        ))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::PlainText => "text/plain",
            FileKind::Pdf => "application/pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub file_type: FileKind,
    pub pages: Option<usize>,
    pub char_count: usize,
}

pub struct DocumentParser;

impl DocumentParser {
    /// Turn uploaded bytes into document text.
    pub fn parse_bytes(data: &[u8], kind: FileKind) -> Result<ParsedDocument, DocumentError> {
        let (content, pages) = match kind {
            FileKind::PlainText => (Self::parse_text(data)?, None),
            FileKind::Pdf => {
                let (content, pages) = Self::parse_pdf(data)?;
                (content, Some(pages))
            }
        };

        let metadata = DocumentMetadata {
            file_type: kind,
            pages,
            char_count: content.chars().count(),
        };

        debug!(
            "Parsed {} characters ({}, pages: {:?})",
            metadata.char_count,
            kind.as_str(),
            pages
        );

        Ok(ParsedDocument { content, metadata })
    }

    /// Detect the type and parse in one step.
    pub fn parse_upload(
        file_name: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<ParsedDocument, DocumentError> {
        let kind = FileKind::detect(file_name, content_type, data)?;
        Self::parse_bytes(data, kind)
    }

    fn parse_text(data: &[u8]) -> Result<String, DocumentError> {
        Ok(String::from_utf8(data.to_vec())?)
    }

    /// Pages in page order, joined with '\n'. Any failing page fails the whole document.
    fn parse_pdf(data: &[u8]) -> Result<(String, usize), DocumentError> {
        let doc = PdfDocument::load_mem(data)?;
        let pages = doc.get_pages();

        let mut page_texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            page_texts.push(doc.extract_text(&[*page_num])?);
        }

        Ok((page_texts.join("\n"), pages.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = PdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
    fn test_detect_by_content_type() {
        assert_eq!(
            FileKind::detect(None, Some("text/plain; charset=utf-8"), b"").unwrap(),
            FileKind::PlainText
        );
        assert_eq!(
            FileKind::detect(Some("x.bin"), Some("application/pdf"), b"").unwrap(),
            FileKind::Pdf
        );
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            FileKind::detect(Some("lease.TXT"), Some("application/octet-stream"), b"").unwrap(),
            FileKind::PlainText
        );
        assert_eq!(
            FileKind::detect(Some("contract.pdf"), None, b"").unwrap(),
            FileKind::Pdf
        );
    }

    #[test]
    fn test_detect_by_magic_bytes() {
        assert_eq!(
            FileKind::detect(Some("upload"), None, b"%PDF-1.5\n%...").unwrap(),
            FileKind::Pdf
        );
    }

    #[test]
    fn test_detect_rejects_other_types() {
        let err = FileKind::detect(Some("terms.docx"), None, b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFileType(name) if name == "terms.docx"));
    }

    #[test]
    fn test_plain_text_verbatim() {
        let text = "Section 1: Déjà vu clause.\r\n";
        let parsed = DocumentParser::parse_bytes(text.as_bytes(), FileKind::PlainText).unwrap();

        assert_eq!(parsed.content, text);
        assert_eq!(parsed.metadata.pages, None);
        assert_eq!(parsed.metadata.char_count, text.chars().count());
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let err = DocumentParser::parse_bytes(&[0xff, 0xfe, 0x00], FileKind::PlainText).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidUtf8(_)));
    }

    #[test]
    fn test_malformed_pdf_is_error() {
        let err = DocumentParser::parse_bytes(b"definitely not a pdf", FileKind::Pdf).unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_)));
    }

    #[test]
    fn test_pdf_pages_in_order() {
        let pdf = build_pdf(&["Section 1: Payment", "Section 2: Termination"]);
        let parsed = DocumentParser::parse_upload(Some("contract.pdf"), None, &pdf).unwrap();

        assert_eq!(parsed.metadata.pages, Some(2));
        let first = parsed.content.find("Payment").expect("page 1 text");
        let second = parsed.content.find("Termination").expect("page 2 text");
        assert!(first < second);
    }
}
