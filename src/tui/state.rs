//! TUI state algebra: pure types, zero effects.
//!
//! One `App` owns the three independent behavior components (display mode,
//! contact form, reveal tracker) plus the scroll position they hang off.
//! The transition layer (update) and the rendering layer (view) both program
//! against these types; the effects boundary (run) owns the terminal and the
//! preference store.

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::content::{layout, Extent, Page};
use crate::form::{ContactForm, Field, Schedule};
use crate::prefs::ThemeMode;
use crate::reveal::RevealTracker;

/// Animation tick cadence. The tick thread produces at this rate and the
/// reveal tracker advances by exactly this much per tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Rows reserved outside the content viewport (header + help line).
pub const CHROME_ROWS: u16 = 2;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Producers: the key-reader thread (`Key`, `Resize`), the tick thread
/// (`Tick`), and one short-lived timer thread per scheduled form transition
/// (`FormTimer`).
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Terminal resized to (width, height).
    Resize(u16, u16),
    /// Animation tick, every [`TICK_INTERVAL`].
    Tick,
    /// A scheduled form transition came due.
    FormTimer { generation: u32 },
}

// ============================================================================
// FOCUS
// ============================================================================

/// What keyboard input currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Scrolling the page.
    Page,
    /// Editing a contact-form field.
    Field(Field),
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// The page content. Fixed for the life of the app.
    pub page: Page,
    /// Line extents, one per block, derived from the page once.
    pub extents: Vec<Extent>,
    /// First content line currently at the top of the viewport.
    pub scroll: usize,
    /// Terminal size (width, height).
    pub size: (u16, u16),
    /// Active display mode.
    pub mode: ThemeMode,
    /// Reveal state per block.
    pub reveals: RevealTracker,
    /// The contact form and its submission machine.
    pub form: ContactForm,
    /// Keyboard focus.
    pub focus: Focus,
    /// Set to true when the app should exit on the next loop turn.
    pub should_quit: bool,
}

impl App {
    /// Build the app around a page, a resolved mode, and the terminal size.
    pub fn new(page: Page, mode: ThemeMode, size: (u16, u16)) -> Self {
        let extents = layout(&page);
        let animates: Vec<bool> = page.blocks.iter().map(|b| b.kind.animates()).collect();
        App {
            page,
            extents,
            scroll: 0,
            size,
            mode,
            reveals: RevealTracker::new(&animates),
            form: ContactForm::new(),
            focus: Focus::Page,
            should_quit: false,
        }
    }

    /// Lines available for page content (terminal height minus chrome).
    pub fn content_height(&self) -> usize {
        self.size.1.saturating_sub(CHROME_ROWS) as usize
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.page
            .total_height()
            .saturating_sub(self.content_height())
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions; the mapping depends on
/// focus, because printable keys are text while a field is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Scroll the page up one line.
    ScrollUp,
    /// Scroll the page down one line.
    ScrollDown,
    /// Scroll up a viewport.
    PageUp,
    /// Scroll down a viewport.
    PageDown,
    /// Invert the display mode.
    ToggleTheme,
    /// Move focus into the contact form.
    EnterForm,
    /// Focus the next form field.
    NextField,
    /// Focus the previous form field.
    PrevField,
    /// Return focus to page scrolling.
    LeaveForm,
    /// Request form submission.
    Submit,
    /// Type into the focused field.
    Insert(char),
    /// Delete from the focused field.
    Backspace,
    /// Quit the application.
    Quit,
}

// ============================================================================
// EFFECTS
// ============================================================================

/// Side effect requested by a pure transition.
///
/// Pure code never executes these — it only describes them.
/// The effects boundary interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Spawn a timer that delivers `FormTimer` after the schedule's delay.
    ScheduleFormTimer(Schedule),
    /// Write the mode through the preference store.
    PersistTheme(ThemeMode),
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SubmitState;

    fn app() -> App {
        App::new(Page::builtin(), ThemeMode::Dark, (80, 24))
    }

    #[test]
    fn new_app_starts_at_the_top_in_page_focus() {
        let app = app();
        assert_eq!(app.scroll, 0);
        assert_eq!(app.focus, Focus::Page);
        assert!(!app.should_quit);
        assert_eq!(*app.form.state(), SubmitState::Idle);
    }

    #[test]
    fn extents_cover_every_block() {
        let app = app();
        assert_eq!(app.extents.len(), app.page.blocks.len());
        assert_eq!(app.reveals.len(), app.page.blocks.len());
    }

    #[test]
    fn content_height_excludes_the_chrome() {
        let app = app();
        assert_eq!(app.content_height(), 22);
    }

    #[test]
    fn max_scroll_clamps_to_zero_for_tall_viewports() {
        let app = App::new(Page::builtin(), ThemeMode::Dark, (80, 500));
        assert_eq!(app.max_scroll(), 0);
    }

    #[test]
    fn max_scroll_leaves_the_last_page_visible() {
        let app = app();
        assert_eq!(
            app.max_scroll(),
            app.page.total_height() - app.content_height()
        );
    }
}
