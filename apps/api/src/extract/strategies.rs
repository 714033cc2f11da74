//! Concrete extraction backends: pdf-extract, lopdf, and a zip-based DOCX
//! reader. Each is individually optional; the extractor skips any that fail.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DocKind, ExtractionStrategy};

/// Primary PDF backend via `pdf_extract::extract_text_from_mem`.
pub struct PdfExtractStrategy;

impl ExtractionStrategy for PdfExtractStrategy {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn kind(&self) -> DocKind {
        DocKind::Pdf
    }

    fn attempt(&self, data: &[u8]) -> anyhow::Result<String> {
        let text = pdf_extract::extract_text_from_mem(data)?;
        Ok(text)
    }
}

/// Fallback PDF backend: lopdf per-page extraction. Handles some documents
/// pdf-extract chokes on; pages that fail individually are skipped.
pub struct LopdfStrategy;

impl ExtractionStrategy for LopdfStrategy {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn kind(&self) -> DocKind {
        DocKind::Pdf
    }

    fn attempt(&self, data: &[u8]) -> anyhow::Result<String> {
        let doc = lopdf::Document::load_mem(data)?;
        let mut pages = Vec::new();
        for (&page_no, _) in doc.get_pages().iter() {
            match doc.extract_text(&[page_no]) {
                Ok(text) if !text.trim().is_empty() => pages.push(text),
                _ => {}
            }
        }
        Ok(pages.join("\n"))
    }
}

/// DOCX backend: reads `word/document.xml` out of the ZIP container and
/// strips the WordprocessingML markup down to paragraph-per-line text.
pub struct DocxStrategy;

impl ExtractionStrategy for DocxStrategy {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn kind(&self) -> DocKind {
        DocKind::Docx
    }

    fn attempt(&self, data: &[u8]) -> anyhow::Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
        let mut entry = archive.by_name("word/document.xml")?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(document_xml_to_text(&xml))
    }
}

/// Cheap check for a DOCX payload inside a ZIP container, used when the
/// filename gives no hint.
pub fn looks_like_docx(data: &[u8]) -> bool {
    zip::ZipArchive::new(Cursor::new(data))
        .map(|mut a| a.by_name("word/document.xml").is_ok())
        .unwrap_or(false)
}

static XML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Converts WordprocessingML to plain text: paragraph ends become newlines,
/// remaining tags are dropped, and the standard XML entities are unescaped.
fn document_xml_to_text(xml: &str) -> String {
    let text = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", "\t")
        .replace("<w:br/>", "\n");
    let text = XML_TAG_RE.replace_all(&text, "");
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
