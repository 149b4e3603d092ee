//! Contact form submission state machine.
//!
//! Pure types, zero effects. Submission never goes anywhere: the machine
//! walks Idle -> Sending -> Sent -> Idle on a pair of scheduled delays, and
//! the button/panel renderings are derived views of the current state.
//!
//! Scheduled transitions are generation-stamped. Every accepted submission
//! bumps the generation and tags its timers with it; a timer arriving with
//! any other generation is stale and dropped. That makes a pending reset
//! from an earlier cycle harmless: it can fire, but it cannot revert state
//! it no longer owns.

use std::time::Duration;

/// Delay between submission and the sent confirmation.
pub const SEND_DELAY: Duration = Duration::from_millis(1500);

/// How long the sent confirmation stays up before reverting to idle.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

// ============================================================================
// TYPES
// ============================================================================

/// The three required text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// Next field in tab order.
    pub fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    /// Previous field in tab order.
    pub fn prev(self) -> Field {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }
}

/// Where the submission cycle currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Sending,
    /// Confirmation up; carries the submitter's name for the panel text.
    Sent { name: String },
}

/// A transition the effects layer should schedule: deliver a timer event
/// with this generation after this delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub delay: Duration,
    pub generation: u32,
}

/// Derived rendering of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
    /// Render with the success style (sent confirmation).
    pub success: bool,
}

// ============================================================================
// FORM
// ============================================================================

/// The contact form: three fields plus the submission machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    state: SubmitState,
    generation: u32,
}

impl Default for ContactForm {
    fn default() -> Self {
        ContactForm {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            state: SubmitState::Idle,
            generation: 0,
        }
    }
}

impl ContactForm {
    pub fn new() -> Self {
        ContactForm::default()
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Current value of a field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Append a character to a field.
    pub fn push_char(&mut self, field: Field, c: char) {
        self.value_mut(field).push(c);
    }

    /// Delete the last character of a field.
    pub fn backspace(&mut self, field: Field) {
        self.value_mut(field).pop();
    }

    /// Request submission.
    ///
    /// A silent no-op unless the machine is Idle and all three fields are
    /// non-empty; empty fields produce no feedback at all. On acceptance
    /// the machine enters Sending and asks for the send-delay timer.
    pub fn submit(&mut self) -> Option<Schedule> {
        if self.state != SubmitState::Idle {
            return None;
        }
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return None;
        }

        self.generation += 1;
        self.state = SubmitState::Sending;
        Some(Schedule {
            delay: SEND_DELAY,
            generation: self.generation,
        })
    }

    /// A scheduled timer fired.
    ///
    /// Stale generations are dropped. A current-generation timer advances
    /// Sending -> Sent (clearing the fields, scheduling the reset) or
    /// Sent -> Idle.
    pub fn timer_elapsed(&mut self, generation: u32) -> Option<Schedule> {
        if generation != self.generation {
            return None;
        }

        match self.state {
            SubmitState::Sending => {
                let name = std::mem::take(&mut self.name);
                self.email.clear();
                self.message.clear();
                self.state = SubmitState::Sent { name };
                Some(Schedule {
                    delay: RESET_DELAY,
                    generation: self.generation,
                })
            }
            SubmitState::Sent { .. } => {
                self.state = SubmitState::Idle;
                None
            }
            SubmitState::Idle => None,
        }
    }

    /// How the submit button should render right now.
    pub fn button(&self) -> ButtonView {
        match self.state {
            SubmitState::Idle => ButtonView {
                label: "Send Message",
                enabled: true,
                success: false,
            },
            SubmitState::Sending => ButtonView {
                label: "Sending...",
                enabled: false,
                success: false,
            },
            SubmitState::Sent { .. } => ButtonView {
                label: "Message Sent!",
                enabled: false,
                success: true,
            },
        }
    }

    /// Confirmation panel text, visible only while Sent.
    pub fn panel(&self) -> Option<String> {
        match &self.state {
            SubmitState::Sent { name } => {
                Some(format!("Thanks {}, I'll get back to you shortly.", name))
            }
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.name = "Ada".into();
        form.email = "ada@example.com".into();
        form.message = "Hello there".into();
        form
    }

    // -- Empty-field gating --

    #[test]
    fn submit_with_empty_name_changes_nothing() {
        let mut form = filled_form();
        form.name.clear();
        let before = form.clone();

        assert_eq!(form.submit(), None);
        assert_eq!(form, before);
        assert_eq!(form.button().label, "Send Message");
        assert!(form.button().enabled);
        assert_eq!(form.panel(), None);
    }

    #[test]
    fn submit_with_empty_email_changes_nothing() {
        let mut form = filled_form();
        form.email.clear();
        assert_eq!(form.submit(), None);
        assert_eq!(*form.state(), SubmitState::Idle);
    }

    #[test]
    fn submit_with_empty_message_changes_nothing() {
        let mut form = filled_form();
        form.message.clear();
        assert_eq!(form.submit(), None);
        assert_eq!(*form.state(), SubmitState::Idle);
    }

    #[test]
    fn presence_check_does_not_require_an_address_shape() {
        // "not an email" passes: the check is non-empty, nothing more
        let mut form = filled_form();
        form.email = "not an email".into();
        assert!(form.submit().is_some());
    }

    #[test]
    fn whitespace_only_fields_count_as_present() {
        let mut form = filled_form();
        form.name = " ".into();
        assert!(form.submit().is_some());
    }

    // -- The full cycle --

    #[test]
    fn full_cycle_walks_idle_sending_sent_idle() {
        let mut form = filled_form();

        // Submit: immediately Sending, button disabled
        let send = form.submit().expect("submit accepted");
        assert_eq!(send.delay, SEND_DELAY);
        assert_eq!(*form.state(), SubmitState::Sending);
        assert_eq!(form.button().label, "Sending...");
        assert!(!form.button().enabled);
        assert_eq!(form.panel(), None);

        // First timer: Sent, panel up with the name, fields cleared
        let reset = form.timer_elapsed(send.generation).expect("reset scheduled");
        assert_eq!(reset.delay, RESET_DELAY);
        assert_eq!(form.button().label, "Message Sent!");
        assert!(!form.button().enabled);
        assert!(form.button().success);
        assert_eq!(
            form.panel().unwrap(),
            "Thanks Ada, I'll get back to you shortly."
        );
        assert!(form.name.is_empty());
        assert!(form.email.is_empty());
        assert!(form.message.is_empty());

        // Second timer: back to the exact idle rendering
        assert_eq!(form.timer_elapsed(reset.generation), None);
        assert_eq!(*form.state(), SubmitState::Idle);
        assert_eq!(
            form.button(),
            ButtonView {
                label: "Send Message",
                enabled: true,
                success: false
            }
        );
        assert_eq!(form.panel(), None);
    }

    #[test]
    fn submit_while_sending_is_ignored() {
        let mut form = filled_form();
        form.submit().unwrap();

        form.name = "Eve".into();
        form.email = "eve@example.com".into();
        form.message = "again".into();
        assert_eq!(form.submit(), None);
        assert_eq!(*form.state(), SubmitState::Sending);
    }

    #[test]
    fn submit_while_sent_is_ignored() {
        let mut form = filled_form();
        let send = form.submit().unwrap();
        form.timer_elapsed(send.generation).unwrap();

        form.name = "Eve".into();
        form.email = "e@e".into();
        form.message = "x".into();
        assert_eq!(form.submit(), None);
        assert!(matches!(form.state(), SubmitState::Sent { .. }));
    }

    // -- Stale timers --

    #[test]
    fn stale_timer_from_an_earlier_cycle_is_dropped() {
        let mut form = filled_form();

        // Cycle 1 runs to completion; its reset Schedule is "still pending"
        let send1 = form.submit().unwrap();
        let reset1 = form.timer_elapsed(send1.generation).unwrap();
        form.timer_elapsed(reset1.generation);
        assert_eq!(*form.state(), SubmitState::Idle);

        // Cycle 2 starts
        form.name = "Grace".into();
        form.email = "grace@example.com".into();
        form.message = "hi".into();
        let send2 = form.submit().unwrap();
        assert_eq!(*form.state(), SubmitState::Sending);

        // A late duplicate of cycle 1's timer cannot revert cycle 2
        assert_eq!(form.timer_elapsed(reset1.generation), None);
        assert_eq!(*form.state(), SubmitState::Sending);

        // Cycle 2 proceeds normally
        form.timer_elapsed(send2.generation).unwrap();
        assert!(matches!(form.state(), SubmitState::Sent { .. }));
    }

    #[test]
    fn timer_in_idle_state_is_a_noop() {
        let mut form = ContactForm::new();
        assert_eq!(form.timer_elapsed(0), None);
        assert_eq!(*form.state(), SubmitState::Idle);
    }

    // -- Editing --

    #[test]
    fn push_and_backspace_edit_the_focused_field() {
        let mut form = ContactForm::new();
        form.push_char(Field::Name, 'A');
        form.push_char(Field::Name, 'd');
        form.push_char(Field::Name, 'a');
        form.backspace(Field::Email); // empty field, no-op
        assert_eq!(form.value(Field::Name), "Ada");

        form.backspace(Field::Name);
        assert_eq!(form.value(Field::Name), "Ad");
    }

    #[test]
    fn tab_order_cycles_through_all_fields() {
        assert_eq!(Field::Name.next(), Field::Email);
        assert_eq!(Field::Email.next(), Field::Message);
        assert_eq!(Field::Message.next(), Field::Name);
        assert_eq!(Field::Name.prev(), Field::Message);
        // next/prev are inverses
        for f in [Field::Name, Field::Email, Field::Message] {
            assert_eq!(f.next().prev(), f);
        }
    }
}
