use crate::block::{Block, BlockStyle, Document, Span, StyledBlock};
use crate::config::Config;
use crate::style::{Alignment, DIVIDER_COLOR, FontStyle, FontWeight, StyleDescriptor};

/// Convert a document to Typst markup.
///
/// All user text is emitted as Typst string literals, so it is never parsed
/// as markup. The Typst rules found in `stylesheet` are placed after the
/// preamble and may override any of its rules; everything else in it is
/// skipped.
pub fn document_to_typst(doc: &Document, config: &Config, stylesheet: Option<&str>) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);

    if let Some(sheet) = stylesheet {
        emit_style_rules(sheet, &mut out);
    }

    let blocks = &doc.blocks;
    let mut i = 0;
    while i < blocks.len() {
        if matches!(blocks[i].block, Block::Heading { .. }) {
            // Keep a heading on the same page as the content after it
            let end = keep_with_next_end(blocks, i);
            out.push_str("#block(breakable: false)[\n");
            for styled in &blocks[i..end] {
                emit_block(styled, &mut out);
            }
            out.push_str("]\n\n");
            i = end;
        } else {
            emit_block(&blocks[i], &mut out);
            i += 1;
        }
    }

    out
}

/// One past the last block grouped with the heading at `start`: any spacers
/// after it plus the first content block, unless that is another heading.
fn keep_with_next_end(blocks: &[StyledBlock], start: usize) -> usize {
    let mut end = start + 1;
    while end < blocks.len() && matches!(blocks[end].block, Block::Spacer) {
        end += 1;
    }
    match blocks.get(end).map(|b| &b.block) {
        Some(Block::Heading { .. }) | None => end,
        Some(_) => end + 1,
    }
}

fn emit_preamble(config: &Config, out: &mut String) {
    let page = &config.page;
    let numbering = if page.numbers { "\"1\"" } else { "none" };
    out.push_str(&format!(
        "#set page(paper: {}, margin: (top: {}, bottom: {}, x: {}), numbering: {})\n",
        string_literal(&page.paper),
        page.margin_top,
        page.margin_bottom,
        page.margin_x,
        numbering,
    ));
    out.push_str(&format!(
        "#set text(font: {}, size: 11pt)\n",
        string_literal(&config.font.family)
    ));
    out.push_str(&format!(
        "#show raw: set text(font: {})\n",
        string_literal(&config.font.code_family)
    ));
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    out.push_str(&format!(
        "#show link: set text(fill: rgb({}))\n",
        string_literal(&config.links.color)
    ));
    if config.links.underline {
        out.push_str("#show link: underline\n");
    }
    out.push('\n');
}

/// Copy the `#set`, `#show` and `#let` rules and comments of a stylesheet.
/// Other lines (CSS, stray text) are not Typst and are dropped with a warning.
fn emit_style_rules(sheet: &str, out: &mut String) {
    let mut skipped = 0;
    for line in sheet.lines() {
        let rule = line.trim();
        if rule.is_empty() {
            continue;
        }
        if is_style_rule(rule) {
            out.push_str(rule);
            out.push('\n');
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        tracing::warn!("Skipped {} stylesheet lines that are not Typst style rules", skipped);
    }
    out.push('\n');
}

fn is_style_rule(line: &str) -> bool {
    line.starts_with("//") || ["#set ", "#show ", "#let "].iter().any(|p| line.starts_with(p))
}

fn emit_block(styled: &StyledBlock, out: &mut String) {
    match (&styled.block, styled.style) {
        (Block::Divider, BlockStyle::Gap(gap)) => {
            out.push_str(&format!(
                "#block(above: {gap}pt, below: {gap}pt)[#line(length: 100%, stroke: 0.5pt + rgb(\"{}\"))]\n\n",
                DIVIDER_COLOR
            ));
        }
        (block, BlockStyle::Text(style)) => emit_text_block(block.spans(), style, out),
        (_, BlockStyle::Gap(gap)) => {
            out.push_str(&format!("#v({}pt)\n\n", gap));
        }
    }
}

fn emit_text_block(spans: &[Span], style: &StyleDescriptor, out: &mut String) {
    out.push_str(&format!(
        "#block(above: {}pt, below: {}pt, inset: (left: {}pt))[",
        style.space_before, style.space_after, style.left_indent
    ));
    match style.alignment {
        Alignment::Left => out.push_str("#set align(left); "),
        Alignment::Center => out.push_str("#set align(center); "),
        Alignment::Justify => out.push_str("#set par(justify: true); "),
    }

    let weight = match style.weight {
        FontWeight::Regular => "regular",
        FontWeight::Bold => "bold",
    };
    let font_style = match style.style {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
    };
    out.push_str(&format!(
        "#text(size: {}pt, fill: rgb({}), weight: \"{}\", style: \"{}\")[",
        style.font_size,
        string_literal(style.color),
        weight,
        font_style
    ));
    spans_to_typst(spans, out);
    out.push_str("]]\n\n");
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_typst(span, out);
    }
}

fn span_to_typst(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => {
            out.push('#');
            out.push_str(&string_literal(text));
        }
        Span::Bold(text) => {
            out.push_str("#strong(");
            out.push_str(&string_literal(text));
            out.push(')');
        }
        Span::Italic(text) => {
            out.push_str("#emph(");
            out.push_str(&string_literal(text));
            out.push(')');
        }
        Span::Code(text) => {
            out.push_str("#raw(");
            out.push_str(&string_literal(text));
            out.push(')');
        }
        Span::Link { text, url } => {
            out.push_str("#link(");
            out.push_str(&string_literal(url));
            out.push_str(")[#");
            out.push_str(&string_literal(text));
            out.push(']');
        }
    }
}

/// Quote `text` as a Typst string literal.
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn body(markdown: &str) -> String {
        let doc = parse(markdown).unwrap();
        let full = document_to_typst(&doc, &Config::default(), None);
        // Drop the preamble, which ends at the first blank line
        let start = full.find("\n\n").unwrap() + 2;
        full[start..].to_string()
    }

    #[test]
    fn paragraph() {
        assert_eq!(
            body("Hello world"),
            "#block(above: 0pt, below: 10pt, inset: (left: 0pt))[#set par(justify: true); \
             #text(size: 11pt, fill: rgb(\"#000000\"), weight: \"regular\", style: \"normal\")[#\"Hello world\"]]\n\n"
        );
    }

    #[test]
    fn heading_keeps_with_next_block() {
        let out = body("# Title\n\nSome text.\nMore.");
        assert!(out.starts_with("#block(breakable: false)[\n#block(above: 0pt, below: 30pt"));
        let group_end = out.find("]\n\n#block(above: 0pt, below: 10pt").unwrap();
        let group = &out[..group_end];
        assert!(group.contains("#v(8.5pt)"));
        assert!(group.contains("#\"Some text.\""));
        assert!(!group.contains("#\"More.\""));
    }

    #[test]
    fn consecutive_headings_are_grouped_separately() {
        let out = body("# A\n## B\ntext");
        assert_eq!(out.matches("#block(breakable: false)[").count(), 2);
    }

    #[test]
    fn inline_spans() {
        let out = body("**b** *i* `c` [l](https://x.io/\"q\")");
        assert!(out.contains(
            "#strong(\"b\")#\" \"#emph(\"i\")#\" \"#raw(\"c\")#\" \"#link(\"https://x.io/\\\"q\\\"\")[#\"l\"]"
        ));
    }

    #[test]
    fn text_is_never_markup() {
        let out = body("a #let x = 1 // not a comment \\ done");
        assert!(out.contains("[#\"a #let x = 1 // not a comment \\\\ done\"]"));
    }

    #[test]
    fn divider_and_spacer() {
        assert_eq!(
            body("---\n"),
            "#block(above: 6pt, below: 6pt)[#line(length: 100%, stroke: 0.5pt + rgb(\"#60a5fa\"))]\n\n#v(8.5pt)\n\n"
        );
    }

    #[test]
    fn italic_paragraph_uses_italic_style() {
        assert!(body("*quiet note*").contains("style: \"italic\")[#\"quiet note\"]"));
    }

    #[test]
    fn preamble_follows_config() {
        let mut config = Config::default();
        config.page.numbers = true;
        config.page.paper = "us-letter".to_string();
        config.links.underline = false;
        let doc = parse("x").unwrap();
        let out = document_to_typst(&doc, &config, None);
        assert!(out.contains("paper: \"us-letter\""));
        assert!(out.contains("numbering: \"1\""));
        assert!(!out.contains("#show link: underline"));
    }

    #[test]
    fn stylesheet_is_appended_after_preamble() {
        let doc = parse("x").unwrap();
        let sheet = "// house style\n#set text(size: 12pt)\n#show strong: set text(fill: red)";
        let out = document_to_typst(&doc, &Config::default(), Some(sheet));
        let sheet_at = out.find(sheet).unwrap();
        assert!(sheet_at > out.find("#set page(").unwrap());
        assert!(sheet_at < out.find("#block(").unwrap());
    }

    #[test]
    fn css_lines_are_skipped() {
        let doc = parse("x").unwrap();
        let sheet = "#set text(size: 12pt)\nbody {\n  color: red;\n}\n  #show emph: set text(fill: blue)";
        let out = document_to_typst(&doc, &Config::default(), Some(sheet));
        assert!(out.contains("#set text(size: 12pt)\n#show emph: set text(fill: blue)\n"));
        assert!(!out.contains("color: red"));
        assert!(!out.contains("body {"));
    }
}
