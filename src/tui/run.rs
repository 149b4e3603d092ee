//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and owns the injected preference store. Kept minimal — all intelligence
//! lives in the pure layers.
//!
//! Architecture: producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key and resize events
//! - Tick thread: animation heartbeat at a fixed cadence
//! - Timer threads: one per scheduled form transition; sleep, send, exit
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::content::Page;
use crate::form::Schedule;
use crate::platform::detect_background;
use crate::prefs::{resolve_initial, PrefStore};

use super::state::{Action, App, AppEvent, Effect, Focus, TICK_INTERVAL};
use super::update::{handle_background_event, observe_viewport, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// The mapping depends on focus: while a form field is being edited,
/// printable keys are text, not commands. Returns None for keys that
/// don't map to any action.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        return None;
    }

    match focus {
        Focus::Page => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Tab => Some(Action::EnterForm),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Focus::Field(_) => match key.code {
            KeyCode::Esc => Some(Action::LeaveForm),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Insert(c)),
            _ => None,
        },
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards keys and resizes.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(Event::Resize(w, h)) => {
                    if tx.send(AppEvent::Resize(w, h)).is_err() {
                        break;
                    }
                }
                Ok(_) => {} // ignore mouse, focus, paste
                Err(_) => break,
            }
        }
    });
}

/// Spawn the animation heartbeat.
fn spawn_ticker(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            thread::sleep(TICK_INTERVAL);
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
}

/// Spawn one timer for a scheduled form transition.
///
/// The generation travels with the event; the form drops it if stale.
fn spawn_form_timer(schedule: Schedule, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        thread::sleep(schedule.delay);
        let _ = tx.send(AppEvent::FormTimer {
            generation: schedule.generation,
        });
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop.
///
/// This is the main entry point for the TUI. It resolves the initial
/// display mode through the injected store (persisting the resolution, so
/// the store always reflects what is on screen), sets up the terminal, and
/// runs the event loop until the user quits.
pub fn run(mut store: PrefStore) -> io::Result<()> {
    let mode = resolve_initial(store.get(), detect_background().prefers_light());
    store.set(mode)?;

    install_panic_hook();
    let size = crossterm::terminal::size()?;
    let mut terminal = setup_terminal()?;

    let mut app = App::new(Page::builtin(), mode, size);
    // Initial intersection pass: whatever starts on screen begins revealing
    observe_viewport(&mut app);

    let (tx, rx) = mpsc::channel::<AppEvent>();

    // Spawn producer threads
    spawn_key_reader(tx.clone());
    spawn_ticker(tx.clone());

    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        let effect = match event {
            AppEvent::Key(key) => match map_key(key, app.focus) {
                Some(action) => update(&mut app, &action),
                None => None,
            },
            background_event => handle_background_event(&mut app, background_event),
        };

        if let Some(effect) = effect {
            handle_effect(effect, &mut store, &tx);
        }
    }

    restore_terminal()?;
    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Execute a side effect requested by a pure transition.
fn handle_effect(effect: Effect, store: &mut PrefStore, tx: &mpsc::Sender<AppEvent>) {
    match effect {
        Effect::ScheduleFormTimer(schedule) => {
            spawn_form_timer(schedule, tx.clone());
        }
        Effect::PersistTheme(mode) => {
            // A failed write must not undo the on-screen mode; the next
            // toggle retries anyway
            let _ = store.set(mode);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
