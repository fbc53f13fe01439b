use crate::style::StyleDescriptor;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
}

impl Span {
    /// The displayed text of the span, without any markup.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text)
            | Span::Bold(text)
            | Span::Italic(text)
            | Span::Code(text)
            | Span::Link { text, .. } => text,
        }
    }
}

/// Block-level elements, one per input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Span> },
    Paragraph { content: Vec<Span> },
    /// A whole line wrapped in single emphasis markers.
    ItalicParagraph { content: Vec<Span> },
    /// Bullet-prefixed line; the bullet glyph is part of `content`.
    ListItem { content: Vec<Span> },
    Divider,
    /// A blank input line.
    Spacer,
}

impl Block {
    /// Inline spans carried by the block. Empty for `Divider` and `Spacer`.
    pub fn spans(&self) -> &[Span] {
        match self {
            Block::Heading { content, .. }
            | Block::Paragraph { content }
            | Block::ItalicParagraph { content }
            | Block::ListItem { content } => content,
            Block::Divider | Block::Spacer => &[],
        }
    }

    /// Concatenated span text, markup stripped.
    pub fn plain_text(&self) -> String {
        self.spans().iter().map(Span::text).collect()
    }

    /// Short category name, used for logging and `inspect` output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { level: 1, .. } => "heading-1",
            Block::Heading { level: 2, .. } => "heading-2",
            Block::Heading { .. } => "heading-3",
            Block::Paragraph { .. } => "paragraph",
            Block::ItalicParagraph { .. } => "italic",
            Block::ListItem { .. } => "list-item",
            Block::Divider => "divider",
            Block::Spacer => "spacer",
        }
    }
}

/// How a block is laid out: text blocks get a full descriptor, divider and
/// spacer only a vertical gap in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockStyle {
    Text(&'static StyleDescriptor),
    Gap(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledBlock {
    pub block: Block,
    pub style: BlockStyle,
}

/// Ordered sequence of styled blocks. Order equals input line order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<StyledBlock>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyledBlock> {
        self.blocks.iter()
    }
}
