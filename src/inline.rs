//! Inline markup resolution.
//!
//! A single left-to-right scan turns `**bold**`, `*italic*`, `[label](url)`
//! and `` `code` `` into [`Span`]s. Anything that does not form a complete
//! pair stays in the surrounding text verbatim, so resolution cannot fail and
//! never drops a character other than the delimiters of a recognized span.
//!
//! Emphasis delimiters must be exactly one or two markers long: a `*` that
//! touches another `*` is never read as a single-marker delimiter, and an
//! emphasis run may not contain `*`. For nested emphasis this means the
//! innermost complete pair wins and the outer markers stay literal:
//! `**a *b* c**` gives `"**a "`, italic `"b"`, `" c**"`.

use crate::block::Span;

/// Resolve inline markup in `text` into an ordered span sequence.
pub fn resolve(text: &str) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let matched = match bytes[i] {
            b'*' => match_bold(bytes, i).or_else(|| match_italic(bytes, i)),
            b'[' => match_link(bytes, i),
            b'`' => match_code(bytes, i),
            _ => None,
        };

        match matched {
            Some(found) => {
                push_text(&mut spans, &text[plain_start..i]);
                spans.push(found.into_span(text));
                i = found.end;
                plain_start = found.end;
            }
            None => i += 1,
        }
    }

    push_text(&mut spans, &text[plain_start..]);
    spans
}

fn push_text(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Text(text.to_string()));
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Bold,
    Italic,
    Code,
    Link { url_start: usize, url_end: usize },
}

/// A recognized span: `text_start..text_end` is the displayed text, `end` is
/// one past the closing delimiter. All boundaries sit on ASCII delimiters, so
/// slicing the source at them is always valid UTF-8.
#[derive(Debug, Clone, Copy)]
struct Match {
    kind: Kind,
    text_start: usize,
    text_end: usize,
    end: usize,
}

impl Match {
    fn into_span(self, source: &str) -> Span {
        let text = source[self.text_start..self.text_end].to_string();
        match self.kind {
            Kind::Bold => Span::Bold(text),
            Kind::Italic => Span::Italic(text),
            Kind::Code => Span::Code(text),
            Kind::Link { url_start, url_end } => Span::Link {
                text,
                url: source[url_start..url_end].to_string(),
            },
        }
    }
}

fn is_star(bytes: &[u8], i: usize) -> bool {
    bytes.get(i) == Some(&b'*')
}

fn is_space(bytes: &[u8], i: usize) -> bool {
    bytes.get(i).is_some_and(|b| b.is_ascii_whitespace())
}

/// Emphasis run of `width` markers starting at `open`.
fn match_emphasis(bytes: &[u8], open: usize, width: usize, kind: Kind) -> Option<Match> {
    let text_start = open + width;

    // Opener: exactly `width` markers, followed by non-space content.
    if (open > 0 && is_star(bytes, open - 1))
        || !(open..text_start).all(|j| is_star(bytes, j))
        || is_star(bytes, text_start)
        || text_start >= bytes.len()
        || is_space(bytes, text_start)
    {
        return None;
    }

    // The first marker after the opener must close the run.
    let close = text_start + bytes[text_start..].iter().position(|&b| b == b'*')?;
    let end = close + width;
    if !(close..end).all(|j| is_star(bytes, j)) || is_star(bytes, end) || is_space(bytes, close - 1) {
        return None;
    }

    Some(Match { kind, text_start, text_end: close, end })
}

fn match_bold(bytes: &[u8], i: usize) -> Option<Match> {
    match_emphasis(bytes, i, 2, Kind::Bold)
}

fn match_italic(bytes: &[u8], i: usize) -> Option<Match> {
    match_emphasis(bytes, i, 1, Kind::Italic)
}

fn match_code(bytes: &[u8], i: usize) -> Option<Match> {
    let text_start = i + 1;
    let close = text_start + bytes.get(text_start..)?.iter().position(|&b| b == b'`')?;
    if close == text_start {
        return None;
    }
    Some(Match { kind: Kind::Code, text_start, text_end: close, end: close + 1 })
}

/// `[label](target)`: non-empty label without brackets, immediately followed
/// by a non-empty, whitespace-free target in parentheses.
fn match_link(bytes: &[u8], i: usize) -> Option<Match> {
    let text_start = i + 1;
    let label_len = bytes.get(text_start..)?.iter().position(|&b| b == b']' || b == b'[')?;
    let text_end = text_start + label_len;
    if label_len == 0 || bytes[text_end] != b']' || bytes.get(text_end + 1) != Some(&b'(') {
        return None;
    }

    let url_start = text_end + 2;
    let url_len = bytes.get(url_start..)?.iter().position(|&b| b == b')')?;
    let url_end = url_start + url_len;
    if url_len == 0 || bytes[url_start..url_end].iter().any(u8::is_ascii_whitespace) {
        return None;
    }

    Some(Match {
        kind: Kind::Link { url_start, url_end },
        text_start,
        text_end,
        end: url_end + 1,
    })
}
