mod block;
mod classify;
pub mod config;
mod error;
pub mod inline;
mod parser;
pub mod render;
pub mod server;
pub mod style;
mod typst;

pub use block::{Block, BlockStyle, Document, Span, StyledBlock};
pub use classify::{Classified, LineKind, classify};
pub use config::Config;
pub use error::{ConvertError, RenderError};
pub use render::{RenderAdapter, TypstRenderer};

/// Parse markdown text into a styled document.
pub fn parse(markdown: &str) -> Result<Document, ConvertError> {
    parser::parse(markdown)
}

/// Convert markdown to Typst markup with the given config.
pub fn markdown_to_typst(
    markdown: &str,
    stylesheet: Option<&str>,
    config: &Config,
) -> Result<String, ConvertError> {
    let doc = parse(markdown)?;
    Ok(typst::document_to_typst(&doc, config, stylesheet))
}

/// Convert markdown to PDF bytes with any render adapter.
pub fn markdown_to_pdf(
    markdown: &str,
    stylesheet: Option<&str>,
    renderer: &dyn RenderAdapter,
) -> Result<Vec<u8>, ConvertError> {
    let doc = parse(markdown)?;
    Ok(renderer.render(&doc, stylesheet)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl RenderAdapter for Echo {
        fn render(&self, doc: &Document, stylesheet: Option<&str>) -> Result<Vec<u8>, RenderError> {
            Ok(format!("{} blocks, sheet {:?}", doc.len(), stylesheet).into_bytes())
        }
    }

    #[test]
    fn markdown_to_pdf_hands_document_to_renderer() {
        let out = markdown_to_pdf("# A\n\nb", Some("#set text(size: 12pt)"), &Echo).unwrap();
        assert_eq!(out, b"3 blocks, sheet Some(\"#set text(size: 12pt)\")");
    }

    #[test]
    fn empty_markdown_never_reaches_renderer() {
        assert!(matches!(markdown_to_pdf(" \n ", None, &Echo), Err(ConvertError::EmptyInput)));
        assert!(matches!(
            markdown_to_typst("", None, &Config::default()),
            Err(ConvertError::EmptyInput)
        ));
    }

    #[test]
    fn markdown_to_typst_keeps_rules_and_drops_css() {
        let markup = markdown_to_typst(
            "hello",
            Some("p { margin: 0 }\n#set text(size: 12pt)"),
            &Config::default(),
        )
        .unwrap();
        assert!(markup.contains("#set text(size: 12pt)\n"));
        assert!(!markup.contains("margin: 0 }"));
        assert!(markup.contains("#\"hello\""));
    }
}
