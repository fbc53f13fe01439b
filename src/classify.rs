/// Block category of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Spacer,
    Heading(u8),
    Divider,
    ListItem,
    ItalicParagraph,
    Paragraph,
}

/// A classified line: its category and the text left after the category's
/// leading marker was stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub kind: LineKind,
    pub text: &'a str,
}

/// Classify one line. Rules are tried in order and the first match wins, since
/// the prefixes overlap (`# ` is a prefix of nothing else, but `*` is both a
/// bullet and an emphasis delimiter).
pub fn classify(line: &str) -> Classified<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Classified { kind: LineKind::Spacer, text: "" };
    }

    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Classified { kind: LineKind::Heading(level), text: rest.trim() };
        }
    }

    if line.starts_with("---") {
        return Classified { kind: LineKind::Divider, text: "" };
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Classified { kind: LineKind::ListItem, text: rest.trim() };
    }

    if let Some(inner) = whole_line_italic(line) {
        return Classified { kind: LineKind::ItalicParagraph, text: inner };
    }

    Classified { kind: LineKind::Paragraph, text: line }
}

/// `*text*` with exactly one marker on each side and none inside. Lines like
/// `**bold**` or `*a* and *b*` are left to inline resolution.
fn whole_line_italic(line: &str) -> Option<&str> {
    if line.len() <= 2 {
        return None;
    }
    let inner = line.strip_prefix('*')?.strip_suffix('*')?;
    if inner.contains('*') {
        return None;
    }
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", LineKind::Heading(1), "Title")]
    #[case("## Section", LineKind::Heading(2), "Section")]
    #[case("### Sub", LineKind::Heading(3), "Sub")]
    #[case("#   Padded  ", LineKind::Heading(1), "Padded")]
    #[case("#### Deep", LineKind::Paragraph, "#### Deep")]
    #[case("#NoSpace", LineKind::Paragraph, "#NoSpace")]
    #[case("---", LineKind::Divider, "")]
    #[case("----- trailing", LineKind::Divider, "")]
    #[case("- item", LineKind::ListItem, "item")]
    #[case("* item", LineKind::ListItem, "item")]
    #[case("*whole line*", LineKind::ItalicParagraph, "whole line")]
    #[case("*a*", LineKind::ItalicParagraph, "a")]
    #[case("plain words", LineKind::Paragraph, "plain words")]
    fn classifies_by_prefix(#[case] line: &str, #[case] kind: LineKind, #[case] text: &str) {
        assert_eq!(classify(line), Classified { kind, text });
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\r")]
    fn blank_lines_are_spacers(#[case] line: &str) {
        assert_eq!(classify(line).kind, LineKind::Spacer);
    }

    #[test]
    fn bullet_wins_over_whole_line_italic() {
        // Starts with `*` and ends with `*`, but the bullet prefix comes first.
        let classified = classify("* starred item*");
        assert_eq!(classified.kind, LineKind::ListItem);
        assert_eq!(classified.text, "starred item*");
    }

    #[rstest]
    #[case("*")]
    #[case("**")]
    #[case("**bold**")]
    #[case("*a* and *b*")]
    #[case("*unterminated")]
    fn not_whole_line_italic(#[case] line: &str) {
        assert_eq!(classify(line).kind, LineKind::Paragraph);
    }
}
