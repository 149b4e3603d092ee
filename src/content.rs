//! Page content model and line layout.
//!
//! The page is an ordered list of typed blocks laid out as a single vertical
//! column of terminal lines. Layout is pure: blocks map to line extents, and
//! extents map to visibility fractions against a scroll window. The reveal
//! layer consumes those fractions; the view renders the extents.

use serde::Serialize;

/// Lines the contact form occupies: three fields, a submit button,
/// a confirmation panel row, and one spacing row.
pub const FORM_HEIGHT: usize = 6;

// ============================================================================
// BLOCKS
// ============================================================================

/// Content block categories.
///
/// Every kind except the contact form participates in reveal animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// Small uppercase label introducing a section.
    SectionLabel,
    /// Page or section heading.
    Heading,
    /// Body text.
    Paragraph,
    /// A named skill with a one-line description.
    SkillCard,
    /// A hobby entry.
    HobbyItem,
    /// The contact form. Interactive, never animated.
    ContactForm,
}

impl BlockKind {
    /// Whether blocks of this kind fade/slide in on first visibility.
    pub fn animates(self) -> bool {
        !matches!(self, BlockKind::ContactForm)
    }
}

/// One unit of page content.
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    /// Text lines. Empty for the contact form (rendered from form state).
    pub lines: Vec<String>,
}

impl Block {
    pub fn new(kind: BlockKind, lines: &[&str]) -> Self {
        Block {
            kind,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Height in terminal lines, including one spacing row below the block.
    pub fn height(&self) -> usize {
        match self.kind {
            BlockKind::ContactForm => FORM_HEIGHT,
            _ => self.lines.len() + 1,
        }
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// The whole page: a title plus ordered blocks.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    /// The built-in personal page content.
    pub fn builtin() -> Self {
        Page {
            title: "termfolio".to_string(),
            blocks: vec![
                Block::new(BlockKind::Heading, &["Alex Reyes"]),
                Block::new(
                    BlockKind::Paragraph,
                    &["Systems engineer. I build small, durable software."],
                ),
                Block::new(BlockKind::SectionLabel, &["ABOUT"]),
                Block::new(
                    BlockKind::Paragraph,
                    &[
                        "I care about tools that stay fast and legible for years.",
                        "Most of my work lives in the terminal, close to the data.",
                    ],
                ),
                Block::new(BlockKind::SectionLabel, &["SKILLS"]),
                Block::new(
                    BlockKind::SkillCard,
                    &["Rust", "CLI tools, TUIs, and long-running services."],
                ),
                Block::new(
                    BlockKind::SkillCard,
                    &["Storage", "Embedded key-value stores and file formats."],
                ),
                Block::new(
                    BlockKind::SkillCard,
                    &["Networking", "Protocol plumbing and backpressure-aware servers."],
                ),
                Block::new(
                    BlockKind::SkillCard,
                    &["Profiling", "Finding the slow part before rewriting the fast part."],
                ),
                Block::new(BlockKind::SectionLabel, &["HOBBIES"]),
                Block::new(BlockKind::HobbyItem, &["Film photography, mostly expired stock."]),
                Block::new(BlockKind::HobbyItem, &["Repairing mechanical keyboards."]),
                Block::new(BlockKind::HobbyItem, &["Long rides on short notice."]),
                Block::new(BlockKind::SectionLabel, &["CONTACT"]),
                Block::new(
                    BlockKind::Paragraph,
                    &["Want to talk? Fill in the form below and hit Enter."],
                ),
                Block::new(BlockKind::ContactForm, &[]),
            ],
        }
    }

    /// Index of the contact form block, if the page has one.
    pub fn form_index(&self) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.kind == BlockKind::ContactForm)
    }

    /// Total page height in lines.
    pub fn total_height(&self) -> usize {
        self.blocks.iter().map(Block::height).sum()
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// The line range a block occupies: [start, start + height).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub start: usize,
    pub height: usize,
}

impl Extent {
    pub fn end(&self) -> usize {
        self.start + self.height
    }
}

/// Lay the page out as contiguous line extents, one per block.
pub fn layout(page: &Page) -> Vec<Extent> {
    let mut extents = Vec::with_capacity(page.blocks.len());
    let mut cursor = 0;
    for block in &page.blocks {
        let height = block.height();
        extents.push(Extent { start: cursor, height });
        cursor += height;
    }
    extents
}

/// Fraction of an extent inside the window [scroll, scroll + viewport).
///
/// Returns 0.0 for zero-height extents or empty viewports.
pub fn visible_fraction(extent: Extent, scroll: usize, viewport: usize) -> f32 {
    if extent.height == 0 || viewport == 0 {
        return 0.0;
    }
    let window_end = scroll + viewport;
    let top = extent.start.max(scroll);
    let bottom = extent.end().min(window_end);
    if bottom <= top {
        return 0.0;
    }
    (bottom - top) as f32 / extent.height as f32
}

// ============================================================================
// TESTS
// ============================================================================
