//! Fixed visual styles for each block category.
//!
//! The catalog is a `static` table: it is built at compile time and shared
//! read-only by every conversion.

use crate::block::{Block, BlockStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Visual configuration for a text-carrying block. Lengths are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleDescriptor {
    pub font_size: f32,
    /// Hex colour, `#rrggbb`.
    pub color: &'static str,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

/// Catalog entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Title,
    Section,
    Subsection,
    Body,
    Emphasis,
}

/// Vertical gap for a blank line (0.3cm).
pub const SPACER_GAP_PT: f32 = 8.5;

/// Gap above and below a divider rule.
pub const DIVIDER_GAP_PT: f32 = 6.0;

/// Colour of the divider rule.
pub const DIVIDER_COLOR: &str = "#60a5fa";

const BODY_COLOR: &str = "#000000";

pub struct StyleCatalog {
    title: StyleDescriptor,
    section: StyleDescriptor,
    subsection: StyleDescriptor,
    body: StyleDescriptor,
    emphasis: StyleDescriptor,
}

pub static CATALOG: StyleCatalog = StyleCatalog {
    title: StyleDescriptor {
        font_size: 24.0,
        color: "#1e3a8a",
        alignment: Alignment::Center,
        space_before: 0.0,
        space_after: 30.0,
        left_indent: 0.0,
        weight: FontWeight::Bold,
        style: FontStyle::Normal,
    },
    section: StyleDescriptor {
        font_size: 18.0,
        color: "#1e40af",
        alignment: Alignment::Left,
        space_before: 20.0,
        space_after: 12.0,
        left_indent: 10.0,
        weight: FontWeight::Bold,
        style: FontStyle::Normal,
    },
    subsection: StyleDescriptor {
        font_size: 14.0,
        color: "#2563eb",
        alignment: Alignment::Left,
        space_before: 15.0,
        space_after: 10.0,
        left_indent: 0.0,
        weight: FontWeight::Bold,
        style: FontStyle::Normal,
    },
    body: StyleDescriptor {
        font_size: 11.0,
        color: BODY_COLOR,
        alignment: Alignment::Justify,
        space_before: 0.0,
        space_after: 10.0,
        left_indent: 0.0,
        weight: FontWeight::Regular,
        style: FontStyle::Normal,
    },
    emphasis: StyleDescriptor {
        font_size: 11.0,
        color: BODY_COLOR,
        alignment: Alignment::Justify,
        space_before: 0.0,
        space_after: 10.0,
        left_indent: 0.0,
        weight: FontWeight::Regular,
        style: FontStyle::Italic,
    },
};

impl StyleCatalog {
    pub fn descriptor(&self, role: StyleRole) -> &StyleDescriptor {
        match role {
            StyleRole::Title => &self.title,
            StyleRole::Section => &self.section,
            StyleRole::Subsection => &self.subsection,
            StyleRole::Body => &self.body,
            StyleRole::Emphasis => &self.emphasis,
        }
    }
}

/// Catalog role for a text-carrying block; `None` for divider and spacer.
pub fn role_for(block: &Block) -> Option<StyleRole> {
    match block {
        Block::Heading { level: 1, .. } => Some(StyleRole::Title),
        Block::Heading { level: 2, .. } => Some(StyleRole::Section),
        Block::Heading { .. } => Some(StyleRole::Subsection),
        Block::Paragraph { .. } | Block::ListItem { .. } => Some(StyleRole::Body),
        Block::ItalicParagraph { .. } => Some(StyleRole::Emphasis),
        Block::Divider | Block::Spacer => None,
    }
}

/// Style attached to `block` by the document builder.
pub fn style_for(block: &Block) -> BlockStyle {
    match role_for(block) {
        Some(role) => BlockStyle::Text(CATALOG.descriptor(role)),
        None if matches!(block, Block::Divider) => BlockStyle::Gap(DIVIDER_GAP_PT),
        None => BlockStyle::Gap(SPACER_GAP_PT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Block::Heading { level: 1, content: vec![] }, StyleRole::Title)]
    #[case(Block::Heading { level: 2, content: vec![] }, StyleRole::Section)]
    #[case(Block::Heading { level: 3, content: vec![] }, StyleRole::Subsection)]
    #[case(Block::Paragraph { content: vec![] }, StyleRole::Body)]
    #[case(Block::ListItem { content: vec![] }, StyleRole::Body)]
    #[case(Block::ItalicParagraph { content: vec![] }, StyleRole::Emphasis)]
    fn text_blocks_map_to_roles(#[case] block: Block, #[case] role: StyleRole) {
        assert_eq!(role_for(&block), Some(role));
        assert_eq!(style_for(&block), BlockStyle::Text(CATALOG.descriptor(role)));
    }

    #[test]
    fn divider_and_spacer_carry_gaps() {
        assert_eq!(style_for(&Block::Divider), BlockStyle::Gap(DIVIDER_GAP_PT));
        assert_eq!(style_for(&Block::Spacer), BlockStyle::Gap(SPACER_GAP_PT));
    }

    #[test]
    fn title_is_centered_and_largest() {
        let title = CATALOG.descriptor(StyleRole::Title);
        assert_eq!(title.alignment, Alignment::Center);
        for role in [StyleRole::Section, StyleRole::Subsection, StyleRole::Body] {
            assert!(CATALOG.descriptor(role).font_size < title.font_size);
        }
    }

    #[test]
    fn emphasis_differs_from_body_only_in_style() {
        let body = CATALOG.descriptor(StyleRole::Body);
        let emphasis = CATALOG.descriptor(StyleRole::Emphasis);
        assert_eq!(emphasis.style, FontStyle::Italic);
        assert_eq!(
            StyleDescriptor { style: FontStyle::Normal, ..*emphasis },
            *body
        );
    }
}
