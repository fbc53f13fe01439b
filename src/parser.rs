use crate::block::{Block, Document, Span, StyledBlock};
use crate::classify::{LineKind, classify};
use crate::error::ConvertError;
use crate::inline;
use crate::style;

const BULLET: &str = "• ";

/// Parse markdown text into a styled document, one block per input line.
///
/// Blank input is rejected up front, before any line is looked at.
pub fn parse(markdown: &str) -> Result<Document, ConvertError> {
    if markdown.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let blocks = markdown
        .split('\n')
        .map(|line| {
            let block = parse_line(line);
            let style = style::style_for(&block);
            StyledBlock { block, style }
        })
        .collect();

    Ok(Document { blocks })
}

fn parse_line(line: &str) -> Block {
    let classified = classify(line);
    match classified.kind {
        LineKind::Spacer => Block::Spacer,
        LineKind::Divider => Block::Divider,
        LineKind::Heading(level) => Block::Heading {
            level,
            content: inline::resolve(classified.text),
        },
        LineKind::ListItem => Block::ListItem {
            content: with_bullet(inline::resolve(classified.text)),
        },
        LineKind::ItalicParagraph => Block::ItalicParagraph {
            content: inline::resolve(classified.text),
        },
        LineKind::Paragraph => Block::Paragraph {
            content: inline::resolve(classified.text),
        },
    }
}

fn with_bullet(mut spans: Vec<Span>) -> Vec<Span> {
    match spans.first_mut() {
        Some(Span::Text(text)) => text.insert_str(0, BULLET),
        _ => spans.insert(0, Span::Text(BULLET.to_string())),
    }
    spans
}
