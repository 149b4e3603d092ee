//! Pure state transitions: (App, Action) → optional Effect.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Actions mutate the model in place and describe any side effect for the
//! boundary to execute; background events (ticks, timers, resizes) come in
//! through a separate handler, as in the event loop's producer split.

use crate::content::visible_fraction;
use crate::form::Field;

use super::state::{Action, App, AppEvent, Effect, Focus, TICK_INTERVAL};

/// Apply a user action.
///
/// Returns the side effect the boundary should run, if any.
pub fn update(app: &mut App, action: &Action) -> Option<Effect> {
    match action {
        Action::ScrollUp => {
            app.scroll = app.scroll.saturating_sub(1);
            observe_viewport(app);
            None
        }
        Action::ScrollDown => {
            app.scroll = (app.scroll + 1).min(app.max_scroll());
            observe_viewport(app);
            None
        }
        Action::PageUp => {
            app.scroll = app.scroll.saturating_sub(app.content_height());
            observe_viewport(app);
            None
        }
        Action::PageDown => {
            app.scroll = (app.scroll + app.content_height()).min(app.max_scroll());
            observe_viewport(app);
            None
        }
        Action::ToggleTheme => {
            app.mode = app.mode.inverted();
            Some(Effect::PersistTheme(app.mode))
        }
        Action::EnterForm => {
            app.focus = Focus::Field(Field::Name);
            // Bring the form (the last block) into view
            app.scroll = app.max_scroll();
            observe_viewport(app);
            None
        }
        Action::NextField => {
            if let Focus::Field(field) = app.focus {
                app.focus = Focus::Field(field.next());
            }
            None
        }
        Action::PrevField => {
            if let Focus::Field(field) = app.focus {
                app.focus = Focus::Field(field.prev());
            }
            None
        }
        Action::LeaveForm => {
            app.focus = Focus::Page;
            None
        }
        Action::Submit => app.form.submit().map(Effect::ScheduleFormTimer),
        Action::Insert(c) => {
            if let Focus::Field(field) = app.focus {
                app.form.push_char(field, *c);
            }
            None
        }
        Action::Backspace => {
            if let Focus::Field(field) = app.focus {
                app.form.backspace(field);
            }
            None
        }
        Action::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Apply a non-key event from a producer thread.
pub fn handle_background_event(app: &mut App, event: AppEvent) -> Option<Effect> {
    match event {
        AppEvent::Tick => {
            app.reveals.tick(TICK_INTERVAL);
            None
        }
        AppEvent::FormTimer { generation } => app
            .form
            .timer_elapsed(generation)
            .map(Effect::ScheduleFormTimer),
        AppEvent::Resize(w, h) => {
            app.size = (w, h);
            app.scroll = app.scroll.min(app.max_scroll());
            observe_viewport(app);
            None
        }
        // Key events are routed through map_key → update, not here
        AppEvent::Key(_) => None,
    }
}

/// Report every block's visible fraction to the reveal tracker.
///
/// Called once at startup and after every scroll or resize. The tracker
/// itself enforces the threshold and the one-shot behavior.
pub fn observe_viewport(app: &mut App) {
    let viewport = app.content_height();
    for (index, extent) in app.extents.iter().enumerate() {
        let fraction = visible_fraction(*extent, app.scroll, viewport);
        app.reveals.observe(index, fraction);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Page;
    use crate::form::{SubmitState, RESET_DELAY, SEND_DELAY};
    use crate::prefs::ThemeMode;
    use crate::reveal::RevealPhase;

    fn app() -> App {
        App::new(Page::builtin(), ThemeMode::Dark, (80, 24))
    }

    fn fill_form(app: &mut App) {
        app.form.name = "Ada".into();
        app.form.email = "ada@example.com".into();
        app.form.message = "Hello".into();
    }

    // -- Scrolling --

    #[test]
    fn scroll_up_at_top_stays() {
        let mut app = app();
        update(&mut app, &Action::ScrollUp);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn scroll_down_clamps_at_max() {
        let mut app = app();
        let max = app.max_scroll();
        for _ in 0..1000 {
            update(&mut app, &Action::ScrollDown);
        }
        assert_eq!(app.scroll, max);
    }

    #[test]
    fn page_down_then_page_up_round_trips() {
        let mut app = app();
        update(&mut app, &Action::PageDown);
        assert_eq!(app.scroll, app.content_height().min(app.max_scroll()));
        update(&mut app, &Action::PageUp);
        assert_eq!(app.scroll, 0);
    }

    // -- Theme --

    #[test]
    fn toggle_theme_inverts_and_persists() {
        let mut app = app();
        let effect = update(&mut app, &Action::ToggleTheme);
        assert_eq!(app.mode, ThemeMode::Light);
        assert_eq!(effect, Some(Effect::PersistTheme(ThemeMode::Light)));
    }

    #[test]
    fn toggle_theme_twice_returns_to_the_original_mode() {
        let mut app = app();
        update(&mut app, &Action::ToggleTheme);
        update(&mut app, &Action::ToggleTheme);
        assert_eq!(app.mode, ThemeMode::Dark);
    }

    // -- Focus --

    #[test]
    fn enter_form_focuses_name_and_scrolls_to_the_bottom() {
        let mut app = app();
        update(&mut app, &Action::EnterForm);
        assert_eq!(app.focus, Focus::Field(Field::Name));
        assert_eq!(app.scroll, app.max_scroll());
    }

    #[test]
    fn field_cycling_and_leave() {
        let mut app = app();
        update(&mut app, &Action::EnterForm);
        update(&mut app, &Action::NextField);
        assert_eq!(app.focus, Focus::Field(Field::Email));
        update(&mut app, &Action::PrevField);
        assert_eq!(app.focus, Focus::Field(Field::Name));
        update(&mut app, &Action::LeaveForm);
        assert_eq!(app.focus, Focus::Page);
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut app = app();
        update(&mut app, &Action::EnterForm);
        update(&mut app, &Action::Insert('H'));
        update(&mut app, &Action::Insert('i'));
        assert_eq!(app.form.name, "Hi");
        update(&mut app, &Action::Backspace);
        assert_eq!(app.form.name, "H");
    }

    #[test]
    fn typing_without_field_focus_is_ignored() {
        let mut app = app();
        update(&mut app, &Action::Insert('x'));
        assert!(app.form.name.is_empty());
    }

    // -- Form submission through the app --

    #[test]
    fn submit_with_empty_fields_schedules_nothing() {
        let mut app = app();
        assert_eq!(update(&mut app, &Action::Submit), None);
        assert_eq!(*app.form.state(), SubmitState::Idle);
    }

    #[test]
    fn submit_schedules_the_send_timer() {
        let mut app = app();
        fill_form(&mut app);
        let effect = update(&mut app, &Action::Submit);
        match effect {
            Some(Effect::ScheduleFormTimer(schedule)) => {
                assert_eq!(schedule.delay, SEND_DELAY);
            }
            other => panic!("Expected a scheduled timer, got {:?}", other),
        }
        assert_eq!(*app.form.state(), SubmitState::Sending);
    }

    #[test]
    fn form_timer_chain_runs_the_whole_cycle() {
        let mut app = app();
        fill_form(&mut app);
        let send = match update(&mut app, &Action::Submit) {
            Some(Effect::ScheduleFormTimer(s)) => s,
            other => panic!("Expected a scheduled timer, got {:?}", other),
        };

        let reset = match handle_background_event(
            &mut app,
            AppEvent::FormTimer { generation: send.generation },
        ) {
            Some(Effect::ScheduleFormTimer(s)) => s,
            other => panic!("Expected the reset timer, got {:?}", other),
        };
        assert_eq!(reset.delay, RESET_DELAY);
        assert!(matches!(app.form.state(), SubmitState::Sent { .. }));

        let done = handle_background_event(
            &mut app,
            AppEvent::FormTimer { generation: reset.generation },
        );
        assert_eq!(done, None);
        assert_eq!(*app.form.state(), SubmitState::Idle);
    }

    #[test]
    fn stale_form_timer_is_dropped() {
        let mut app = app();
        fill_form(&mut app);
        update(&mut app, &Action::Submit);

        let effect = handle_background_event(&mut app, AppEvent::FormTimer { generation: 99 });
        assert_eq!(effect, None);
        assert_eq!(*app.form.state(), SubmitState::Sending);
    }

    // -- Reveals --

    #[test]
    fn startup_observation_reveals_only_the_first_screenful() {
        let mut app = app();
        observe_viewport(&mut app);

        // First block is at the top: armed
        assert_ne!(app.reveals.phase(0), RevealPhase::Hidden);

        // A block past the viewport stays hidden
        let below: Vec<usize> = app
            .extents
            .iter()
            .enumerate()
            .filter(|(_, e)| e.start >= app.content_height())
            .map(|(i, _)| i)
            .collect();
        assert!(!below.is_empty());
        for i in below {
            if app.page.blocks[i].kind.animates() {
                assert_eq!(app.reveals.phase(i), RevealPhase::Hidden);
            }
        }
    }

    #[test]
    fn scrolling_to_the_bottom_reveals_everything() {
        let mut app = app();
        observe_viewport(&mut app);
        while app.scroll < app.max_scroll() {
            update(&mut app, &Action::ScrollDown);
        }
        for i in 0..app.reveals.len() {
            assert_ne!(app.reveals.phase(i), RevealPhase::Hidden, "block {}", i);
        }
    }

    #[test]
    fn revealed_blocks_do_not_revert_after_scrolling_away() {
        let mut app = app();
        observe_viewport(&mut app);
        // Finish the initial animations
        for _ in 0..20 {
            handle_background_event(&mut app, AppEvent::Tick);
        }
        assert_eq!(app.reveals.phase(0), RevealPhase::Shown);

        // Scroll the first block far out of view
        update(&mut app, &Action::PageDown);
        assert_eq!(app.reveals.phase(0), RevealPhase::Shown);
    }

    #[test]
    fn resize_clamps_scroll_and_reobserves() {
        let mut app = app();
        update(&mut app, &Action::PageDown);
        let tall = app.page.total_height() as u16 + 10;
        handle_background_event(&mut app, AppEvent::Resize(80, tall));
        assert_eq!(app.scroll, 0);
        // Everything fits now, so everything is observed visible
        for i in 0..app.reveals.len() {
            assert_ne!(app.reveals.phase(i), RevealPhase::Hidden);
        }
    }

    #[test]
    fn quit_sets_the_flag() {
        let mut app = app();
        update(&mut app, &Action::Quit);
        assert!(app.should_quit);
    }
}
