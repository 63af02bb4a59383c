pub mod analysis;
mod block;
pub mod config;
pub mod error;
mod fence;
mod inline;
pub mod language;
mod parser;
pub mod report;
pub mod store;
mod typst;

pub use analysis::{AnalysisResult, Tab};
pub use block::{Block, Document, List, Span};
pub use config::Config;
pub use error::{AnalysisError, ConfigError, ExportError, StoreError};
pub use report::Report;

use log::{debug, trace};
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Render markdown-subset text into a document of blocks.
///
/// Total over all inputs and free of side effects.
pub fn render(content: &str) -> Document {
    let document = parser::parse(content);
    trace!("Rendered {} bytes into {} blocks", content.len(), document.len());
    document
}

/// Convert markdown-subset text to Typst markup using the default config.
pub fn markdown_to_typst(content: &str) -> String {
    markdown_to_typst_with_config(content, &Config::default())
}

/// Convert markdown-subset text to Typst markup with a custom config.
pub fn markdown_to_typst_with_config(content: &str, config: &Config) -> String {
    typst::blocks_to_typst(&render(content), config)
}

/// Convert a report to Typst markup.
pub fn report_to_typst(report: &Report, config: &Config) -> String {
    report::to_typst(report, config)
}

/// Convert a report to PDF bytes.
pub fn report_to_pdf(report: &Report, config: &Config) -> Result<Vec<u8>, ExportError> {
    compile_pdf(report_to_typst(report, config))
}

/// Convert a report to SVG pages.
pub fn report_to_svg(report: &Report, config: &Config) -> Result<SvgDocument, ExportError> {
    compile_svg(report_to_typst(report, config))
}

/// Compile Typst markup to a paged document, using only the embedded fonts.
fn compile_document(markup: String) -> Result<PagedDocument, ExportError> {
    debug!("Compiling {} bytes of Typst markup", markup.len());

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(markup)
        .search_fonts_with(font_options)
        .build();

    engine
        .compile()
        .output
        .map_err(|e| ExportError::Compile(format!("{:?}", e)))
}

/// Compile Typst markup to PDF bytes.
pub fn compile_pdf(markup: String) -> Result<Vec<u8>, ExportError> {
    let doc = compile_document(markup)?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| ExportError::Pdf(format!("{:?}", e)))
}

/// Result of rendering to SVG pages.
pub struct SvgDocument {
    pub pages: Vec<String>,
    pub width_pt: f64,
    pub height_pt: f64,
}

/// Compile Typst markup to one SVG string per page.
pub fn compile_svg(markup: String) -> Result<SvgDocument, ExportError> {
    let doc = compile_document(markup)?;

    let pages: Vec<String> = doc.pages.iter().map(typst_svg::svg).collect();

    // Get dimensions from first page (assuming all pages same size)
    let (width_pt, height_pt) = if let Some(first_page) = doc.pages.first() {
        let size = first_page.frame.size();
        (size.x.to_pt(), size.y.to_pt())
    } else {
        (595.0, 842.0) // A4 default
    };

    Ok(SvgDocument {
        pages,
        width_pt,
        height_pt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKDOWN: &str = "\
# The **i**th element
## Uses `xs[i]` and a**b**c
Indexing:
  - nested note
  + plus note
  3. enum-looking
* item with **bold** and `code`
1. first
2. second

Specials: # * _ @ $ \\ ` < > [ ] / ~ = - + // /* */ \"quoted\" 'single' {braces} (parens)
**x**.y and **f**(z) and **a**[b]
= not a heading
```rust
let s = \"```\\\\\";
```
```c++
int x;
```";

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            explanation: MARKDOWN.to_string(),
            predicted_output: "Error: index out of range\n\t at line 3 \"x\"".to_string(),
            bugs_and_errors: "### Bug\n* Off-by-one in `xs[len]`".to_string(),
            corrected_code: "xs[len - 1]".to_string(),
        }
    }

    #[test]
    fn markdown_compiles_to_pdf() {
        let pdf = compile_pdf(markdown_to_typst(MARKDOWN)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn markdown_compiles_to_svg() {
        let svg = compile_svg(markdown_to_typst(MARKDOWN)).unwrap();
        assert!(!svg.pages.is_empty());
        assert!(svg.pages[0].contains("<svg"));
    }

    #[test]
    fn report_compiles_to_pdf_and_svg() {
        let analysis = analysis();
        let report = Report {
            language: "cpp",
            code: "xs[len]",
            analysis: &analysis,
        };
        let config = Config::default();

        let pdf = report_to_pdf(&report, &config).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let svg = report_to_svg(&report, &config).unwrap();
        assert!(!svg.pages.is_empty());
        assert!(svg.width_pt > 0.0 && svg.height_pt > 0.0);
    }

    #[test]
    fn empty_report_sections_compile() {
        let analysis = AnalysisResult {
            explanation: String::new(),
            predicted_output: String::new(),
            bugs_and_errors: "**".to_string(),
            corrected_code: "x".to_string(),
        };
        let report = Report {
            language: "unknown-tag",
            code: "x",
            analysis: &analysis,
        };
        assert!(report_to_pdf(&report, &Config::default()).is_ok());
    }
}
