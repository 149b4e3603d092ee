//! Pure rendering: map App state to ratatui widget trees.
//!
//! Layout is a fixed three-row frame: header, content viewport, help line.
//! Content rendering walks the block extents that intersect the scroll
//! window, applies each block's reveal opacity/offset, and splices the
//! live form rows into the form block's extent. The only effect is
//! Frame::render_widget() writing to the terminal buffer.

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::content::BlockKind;
use crate::form::{ContactForm, Field};

use super::state::{App, Focus};
use super::theme::{self, Theme};

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole frame.
pub fn render(app: &App, frame: &mut Frame) {
    let theme = theme::palette(app.mode);
    let area = frame.area();

    // Root restyle: the active palette covers the entire frame
    frame.buffer_mut().set_style(area, theme.base());

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_header(app, &theme), chunks[0]);
    frame.render_widget(render_content(app, &theme), chunks[1]);
    frame.render_widget(render_help(app, &theme), chunks[2]);
}

// ============================================================================
// CHROME
// ============================================================================

/// Header: site title on the left, mode glyph and name on the right.
fn render_header(app: &App, theme: &Theme) -> Paragraph<'static> {
    let title = app.page.title.clone();
    let right = format!("{} {}", theme::mode_glyph(app.mode), app.mode);

    let width = app.size.0 as usize;
    let used = title.chars().count() + right.chars().count();
    let pad = " ".repeat(width.saturating_sub(used + 1));

    Paragraph::new(Line::from(vec![
        Span::styled(title, theme.title()),
        Span::raw(pad),
        Span::styled(right, theme.help()),
    ]))
}

/// Help line showing the keybindings for the current focus.
fn render_help(app: &App, theme: &Theme) -> Paragraph<'static> {
    let help_text = match app.focus {
        Focus::Page => "[j/k] scroll  [t] theme  [Tab] contact form  [q] quit",
        Focus::Field(_) => "[Tab/Shift-Tab] fields  [Enter] send  [Esc] back to page",
    };
    Paragraph::new(Span::styled(help_text, theme.help()))
}

// ============================================================================
// CONTENT
// ============================================================================

/// Render the scroll window over the page.
fn render_content(app: &App, theme: &Theme) -> Paragraph<'static> {
    let viewport = app.content_height();
    let window_end = app.scroll + viewport;
    let mut rows: Vec<Line<'static>> = vec![Line::default(); viewport];

    for (index, block) in app.page.blocks.iter().enumerate() {
        let extent = app.extents[index];
        if extent.end() <= app.scroll || extent.start >= window_end {
            continue;
        }

        if block.kind == BlockKind::ContactForm {
            for (li, line) in form_rows(&app.form, app.focus, theme).into_iter().enumerate() {
                place(&mut rows, extent.start + li, app.scroll, window_end, line);
            }
            continue;
        }

        let opacity = app.reveals.opacity(index);
        if opacity == 0.0 {
            continue;
        }
        let offset = app.reveals.offset(index);

        for (li, text) in block.lines.iter().enumerate() {
            let row = extent.start + offset + li;
            let line = block_line(block.kind, li, text, theme, opacity);
            place(&mut rows, row, app.scroll, window_end, line);
        }
    }

    Paragraph::new(rows)
}

/// Put a line at an absolute page row if it falls inside the window.
fn place(
    rows: &mut [Line<'static>],
    row: usize,
    scroll: usize,
    window_end: usize,
    line: Line<'static>,
) {
    if row >= scroll && row < window_end {
        rows[row - scroll] = line;
    }
}

/// Style one line of a content block at the given reveal opacity.
fn block_line(
    kind: BlockKind,
    line_index: usize,
    text: &str,
    theme: &Theme,
    opacity: f32,
) -> Line<'static> {
    let (prefix, target, bold) = match kind {
        BlockKind::Heading => ("", theme.accent, true),
        BlockKind::SectionLabel => ("", theme.muted, true),
        BlockKind::Paragraph => ("", theme.fg, false),
        BlockKind::SkillCard if line_index == 0 => ("▸ ", theme.fg, true),
        BlockKind::SkillCard => ("  ", theme.muted, false),
        BlockKind::HobbyItem => ("• ", theme.fg, false),
        // Handled by form_rows
        BlockKind::ContactForm => ("", theme.fg, false),
    };

    Line::from(Span::styled(
        format!("{}{}", prefix, text),
        theme.revealed(target, opacity, bold),
    ))
}

// ============================================================================
// CONTACT FORM
// ============================================================================

/// The form block's rows: three fields, the submit button, the panel row,
/// and a spacing row. Always [`crate::content::FORM_HEIGHT`] lines so the
/// page layout never shifts.
fn form_rows(form: &ContactForm, focus: Focus, theme: &Theme) -> Vec<Line<'static>> {
    let mut rows = Vec::with_capacity(crate::content::FORM_HEIGHT);

    for field in [Field::Name, Field::Email, Field::Message] {
        rows.push(field_row(form, field, focus, theme));
    }
    rows.push(button_row(form, theme));
    rows.push(panel_row(form, theme));
    rows.push(Line::default());

    rows
}

fn field_row(form: &ContactForm, field: Field, focus: Focus, theme: &Theme) -> Line<'static> {
    let focused = focus == Focus::Field(field);

    let label_style = if focused {
        theme.title()
    } else {
        theme.help()
    };
    let value_style = theme.base();

    let mut spans = vec![
        Span::styled(format!("{:<8}", field.label()), label_style),
        Span::styled("│ ", Style::new().fg(theme.border)),
        Span::styled(form.value(field).to_string(), value_style),
    ];
    if focused {
        spans.push(Span::styled(
            "▏",
            Style::new().fg(theme.accent),
        ));
    }

    Line::from(spans)
}

fn button_row(form: &ContactForm, theme: &Theme) -> Line<'static> {
    let button = form.button();

    let style = if button.success {
        Style::new()
            .fg(theme.success)
            .add_modifier(Modifier::BOLD)
    } else if button.enabled {
        Style::new()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        theme.help()
    };

    Line::from(Span::styled(format!("[ {} ]", button.label), style))
}

fn panel_row(form: &ContactForm, theme: &Theme) -> Line<'static> {
    match form.panel() {
        Some(text) => Line::from(Span::styled(
            text,
            Style::new().fg(theme.success),
        )),
        None => Line::default(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
