use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

use crate::block::Document;
use crate::config::Config;
use crate::error::RenderError;
use crate::typst;

/// Turns a styled document into PDF bytes. Owns page geometry, fonts,
/// wrapping and pagination.
pub trait RenderAdapter: Send + Sync {
    fn render(&self, doc: &Document, stylesheet: Option<&str>) -> Result<Vec<u8>, RenderError>;
}

/// Renders through Typst with the fonts embedded in the binary.
#[derive(Debug, Clone)]
pub struct TypstRenderer {
    config: Config,
}

impl TypstRenderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The Typst markup this renderer would compile.
    pub fn markup(&self, doc: &Document, stylesheet: Option<&str>) -> String {
        typst::document_to_typst(doc, &self.config, stylesheet)
    }

    fn compile(&self, markup: String) -> Result<PagedDocument, RenderError> {
        let font_options = TypstKitFontOptions::new()
            .include_embedded_fonts(true)
            .include_system_fonts(self.config.font.system_fonts);

        let engine = TypstEngine::builder()
            .main_file(markup)
            .search_fonts_with(font_options)
            .build();

        let compiled = engine.compile();
        let output: Result<PagedDocument, _> = compiled.output;
        for warning in &compiled.warnings {
            tracing::debug!(message = %warning.message, "typst warning");
        }
        output.map_err(|e| RenderError::Compile(format!("{:?}", e)))
    }
}

impl RenderAdapter for TypstRenderer {
    fn render(&self, doc: &Document, stylesheet: Option<&str>) -> Result<Vec<u8>, RenderError> {
        let markup = self.markup(doc, stylesheet);
        let paged = self.compile(markup)?;
        tracing::debug!(pages = paged.pages.len(), "typst layout complete");

        typst_pdf::pdf(&paged, &PdfOptions::default())
            .map_err(|e| RenderError::Export(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn renders_a_pdf() {
        let doc = parse("# Weekly\n\nHello **world**, see [site](https://example.com).\n---\n- one\n- `two`\n*bye*").unwrap();
        let pdf = TypstRenderer::new(Config::compiled_default()).render(&doc, None).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn bad_stylesheet_rule_fails_to_compile() {
        let doc = parse("text").unwrap();
        let err = TypstRenderer::new(Config::default())
            .render(&doc, Some("#set text(size: \"huge\")"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Compile(_)));
    }

    #[test]
    fn css_stylesheet_still_renders() {
        let doc = parse("# Issue 12\n\nBody text.").unwrap();
        let css = "body { font-family: Georgia; }\nh1 {\n  color: #1e3a8a;\n}";
        let pdf = TypstRenderer::new(Config::default()).render(&doc, Some(css)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
