//! Multi-strategy document text extraction.
//!
//! A prioritized list of `ExtractionStrategy` implementations is tried in
//! order; the first non-blank result wins. Individual strategy failures are
//! logged and skipped so a missing or broken backend never aborts extraction.
//! Total failure surfaces as an empty string, never an error; the caller then
//! offers the manual paste fallback.
//!
//! The strategy list is built once at startup from an injected
//! `ExtractorCapabilities`, so tests can swap in fake strategies.

pub mod strategies;

use tracing::{debug, info};

use strategies::{DocxStrategy, LopdfStrategy, PdfExtractStrategy};

/// Document format a strategy can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Pdf,
    Docx,
    Unknown,
}

/// A single extraction backend. `attempt` either returns text (possibly
/// blank) or an error; both blank output and errors advance to the next
/// strategy.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn kind(&self) -> DocKind;
    fn attempt(&self, data: &[u8]) -> anyhow::Result<String>;
}

/// Which extraction backends are enabled. Built from config at startup
/// instead of module-level flags so the strategy list stays testable.
#[derive(Debug, Clone, Copy)]
pub struct ExtractorCapabilities {
    pub pdf_extract: bool,
    pub lopdf: bool,
    pub docx: bool,
}

impl Default for ExtractorCapabilities {
    fn default() -> Self {
        Self {
            pdf_extract: true,
            lopdf: true,
            docx: true,
        }
    }
}

/// Best-effort text extractor over a fixed strategy list.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Builds the production strategy list from the capability set, in
    /// priority order: pdf-extract, lopdf, docx.
    pub fn new(caps: ExtractorCapabilities) -> Self {
        let mut strategies: Vec<Box<dyn ExtractionStrategy>> = Vec::new();
        if caps.pdf_extract {
            strategies.push(Box::new(PdfExtractStrategy));
        }
        if caps.lopdf {
            strategies.push(Box::new(LopdfStrategy));
        }
        if caps.docx {
            strategies.push(Box::new(DocxStrategy));
        }
        info!(
            "Extractor initialized with {} strategies: [{}]",
            strategies.len(),
            strategies
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self { strategies }
    }

    /// Builds an extractor over an explicit strategy list. Used by tests.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extracts best-effort plain text from `data`. Never fails outward:
    /// every internal error degrades to trying the next strategy, and total
    /// failure returns an empty string.
    pub fn extract(&self, data: &[u8], filename: &str) -> String {
        if data.is_empty() {
            return String::new();
        }

        match sniff_kind(data, filename) {
            DocKind::Pdf => self.run(data, DocKind::Pdf),
            DocKind::Docx => self.run(data, DocKind::Docx),
            DocKind::Unknown => {
                // Ambiguous format: PDF strategies first, then DOCX.
                let text = self.run(data, DocKind::Pdf);
                if !text.trim().is_empty() {
                    return text;
                }
                self.run(data, DocKind::Docx)
            }
        }
    }

    fn run(&self, data: &[u8], kind: DocKind) -> String {
        for strategy in self.strategies.iter().filter(|s| s.kind() == kind) {
            match strategy.attempt(data) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(
                        "Strategy '{}' extracted {} chars",
                        strategy.name(),
                        text.len()
                    );
                    return text;
                }
                Ok(_) => {
                    debug!("Strategy '{}' returned blank text, skipping", strategy.name());
                }
                Err(e) => {
                    debug!("Strategy '{}' failed: {e}, skipping", strategy.name());
                }
            }
        }
        String::new()
    }
}

/// Sniffs the document kind from the filename extension or byte signature.
pub fn sniff_kind(data: &[u8], filename: &str) -> DocKind {
    let name = filename.to_lowercase();
    if name.ends_with(".pdf") || data.starts_with(b"%PDF") {
        return DocKind::Pdf;
    }
    if name.ends_with(".docx") {
        return DocKind::Docx;
    }
    // DOCX files are ZIP containers; bare PK magic without an extension is
    // still ambiguous (could be any archive), so only claim Docx when the
    // word/ payload is present.
    if data.starts_with(b"PK\x03\x04") && strategies::looks_like_docx(data) {
        return DocKind::Docx;
    }
    DocKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStrategy;
    impl ExtractionStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn kind(&self) -> DocKind {
            DocKind::Pdf
        }
        fn attempt(&self, _data: &[u8]) -> anyhow::Result<String> {
            anyhow::bail!("parse error")
        }
    }

    struct BlankStrategy;
    impl ExtractionStrategy for BlankStrategy {
        fn name(&self) -> &'static str {
            "blank"
        }
        fn kind(&self) -> DocKind {
            DocKind::Pdf
        }
        fn attempt(&self, _data: &[u8]) -> anyhow::Result<String> {
            Ok("   \n ".to_string())
        }
    }

    struct FixedStrategy(&'static str);
    impl ExtractionStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn kind(&self) -> DocKind {
            DocKind::Pdf
        }
        fn attempt(&self, _data: &[u8]) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_fallback_past_failing_strategy() {
        let extractor = Extractor::with_strategies(vec![
            Box::new(FailingStrategy),
            Box::new(FixedStrategy("recovered text")),
        ]);
        let out = extractor.extract(b"%PDF-1.4 junk", "resume.pdf");
        assert_eq!(out, "recovered text");
    }

    #[test]
    fn test_fallback_past_blank_strategy() {
        let extractor = Extractor::with_strategies(vec![
            Box::new(BlankStrategy),
            Box::new(FixedStrategy("later text")),
        ]);
        let out = extractor.extract(b"%PDF-1.4 junk", "resume.pdf");
        assert_eq!(out, "later text");
    }

    #[test]
    fn test_total_failure_yields_empty_string() {
        let extractor =
            Extractor::with_strategies(vec![Box::new(FailingStrategy), Box::new(BlankStrategy)]);
        let out = extractor.extract(b"%PDF-1.4 junk", "resume.pdf");
        assert_eq!(out, "");
    }

    #[test]
    fn test_first_success_wins() {
        let extractor = Extractor::with_strategies(vec![
            Box::new(FixedStrategy("first")),
            Box::new(FixedStrategy("second")),
        ]);
        let out = extractor.extract(b"%PDF-1.4 junk", "resume.pdf");
        assert_eq!(out, "first");
    }

    #[test]
    fn test_empty_input_yields_empty_string() {
        let extractor = Extractor::with_strategies(vec![Box::new(FixedStrategy("text"))]);
        assert_eq!(extractor.extract(b"", "resume.pdf"), "");
    }

    #[test]
    fn test_sniff_pdf_by_extension() {
        assert_eq!(sniff_kind(b"junk", "resume.PDF"), DocKind::Pdf);
    }

    #[test]
    fn test_sniff_pdf_by_magic() {
        assert_eq!(sniff_kind(b"%PDF-1.7", "upload.bin"), DocKind::Pdf);
    }

    #[test]
    fn test_sniff_docx_by_extension() {
        assert_eq!(sniff_kind(b"PK\x03\x04", "resume.docx"), DocKind::Docx);
    }

    #[test]
    fn test_sniff_unknown() {
        assert_eq!(sniff_kind(b"hello", "notes.txt"), DocKind::Unknown);
    }

    #[test]
    fn test_ambiguous_format_falls_through_to_docx_strategies() {
        struct DocxFixed;
        impl ExtractionStrategy for DocxFixed {
            fn name(&self) -> &'static str {
                "docx-fixed"
            }
            fn kind(&self) -> DocKind {
                DocKind::Docx
            }
            fn attempt(&self, _data: &[u8]) -> anyhow::Result<String> {
                Ok("docx text".to_string())
            }
        }
        let extractor =
            Extractor::with_strategies(vec![Box::new(FailingStrategy), Box::new(DocxFixed)]);
        let out = extractor.extract(b"mystery bytes", "upload.bin");
        assert_eq!(out, "docx text");
    }
}
