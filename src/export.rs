//! Page export formatting.
//!
//! Pure functions — (Page, OutputFormat) → String.
//! No I/O, no side effects.

use crate::content::{BlockKind, Page};

/// Output format for the export command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable plain text.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Format the page for output.
pub fn format_page(page: &Page, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(page),
        OutputFormat::Json => format_json(page),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(page: &Page) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n\n", page.title));

    for block in &page.blocks {
        match block.kind {
            BlockKind::SectionLabel => {
                for line in &block.lines {
                    out.push_str(&format!("## {}\n", line));
                }
            }
            BlockKind::Heading => {
                for line in &block.lines {
                    out.push_str(&format!("# {}\n", line));
                }
            }
            BlockKind::Paragraph => {
                for line in &block.lines {
                    out.push_str(line);
                    out.push('\n');
                }
            }
            BlockKind::SkillCard | BlockKind::HobbyItem => {
                let mut lines = block.lines.iter();
                if let Some(first) = lines.next() {
                    out.push_str(&format!("  - {}\n", first));
                }
                for rest in lines {
                    out.push_str(&format!("    {}\n", rest));
                }
            }
            BlockKind::ContactForm => {
                out.push_str("  [contact form]\n");
            }
        }
        out.push('\n');
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(page: &Page) -> String {
    // Page is a plain serde tree; serialization cannot fail.
    serde_json::to_string_pretty(page).unwrap_or_else(|_| "{}".to_string())
}

// ============================================================================
// TESTS
// ============================================================================
