use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::application::{ChoiceGroup, FieldKind, FormField, TARGET_SEGMENTS, TOTAL_STEPS, YES_NO};

use super::app::{App, AppAction, Control};

impl App {
    /// Handle a key event for the active panel
    pub fn handle_key(&mut self, event: KeyEvent) -> AppAction {
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return AppAction::Quit;
        }

        // Only quitting is left once the application went through
        if self.wizard.is_completed() {
            if matches!(event.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                self.should_quit = true;
                return AppAction::Quit;
            }
            return AppAction::None;
        }

        let before = self.wizard.current_step();
        match event.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Esc => {
                self.wizard.prev_step(&mut self.screen);
                self.sync_focus(before);
            }
            KeyCode::Enter => {
                if self.wizard.current_step() == TOTAL_STEPS {
                    let payload = self.wizard.begin_submission(&mut self.screen);
                    self.sync_focus(before);
                    if let Some(payload) = payload {
                        return AppAction::Submit(payload);
                    }
                } else {
                    self.wizard.next_step(&mut self.screen);
                    self.sync_focus(before);
                }
            }
            KeyCode::F(n) if (1..=TOTAL_STEPS as u8).contains(&n) => {
                self.wizard.go_to_step(n as usize, &mut self.screen);
                self.sync_focus(before);
            }
            KeyCode::Left => self.cycle(false),
            KeyCode::Right => self.cycle(true),
            KeyCode::Char(' ') if self.toggles_on_space() => self.toggle(),
            KeyCode::Char(c) => self.type_char(c),
            KeyCode::Backspace => self.backspace(),
            _ => {}
        }
        AppAction::None
    }

    /// Handle paste event: first line only, into the focused text entry
    pub fn handle_paste(&mut self, text: &str) {
        let clean = text.split(['\r', '\n']).next().unwrap_or("").trim();
        if clean.is_empty() {
            return;
        }
        match self.focused() {
            Some(Control::Field(field)) if is_text(field) => {
                tracing::debug!("[paste] {} ({} chars)", field.name(), clean.chars().count());
                self.wizard.form.value_mut(field).push_str(clean);
                self.wizard.on_field_input(field, &mut self.screen);
            }
            Some(Control::Verification) => {
                self.wizard.form.verification_token = Some(clean.to_string());
            }
            _ => {}
        }
    }

    fn toggles_on_space(&self) -> bool {
        match self.focused() {
            Some(Control::WhatsApp | Control::Group(_)) => true,
            Some(Control::Field(_)) | Some(Control::Verification) | None => false,
        }
    }

    fn type_char(&mut self, c: char) {
        match self.focused() {
            Some(Control::Field(field)) if is_text(field) => {
                self.wizard.form.value_mut(field).push(c);
                self.wizard.on_field_input(field, &mut self.screen);
            }
            Some(Control::Verification) => {
                self.wizard
                    .form
                    .verification_token
                    .get_or_insert_with(String::new)
                    .push(c);
            }
            _ => {}
        }
    }

    fn backspace(&mut self) {
        match self.focused() {
            Some(Control::Field(field)) if is_text(field) => {
                self.wizard.form.value_mut(field).pop();
                self.wizard.on_field_input(field, &mut self.screen);
            }
            Some(Control::Verification) => {
                if let Some(token) = self.wizard.form.verification_token.as_mut() {
                    token.pop();
                    if token.is_empty() {
                        self.wizard.form.verification_token = None;
                    }
                }
            }
            _ => {}
        }
    }

    /// Left/Right: step through select options, radio choices or the segment cursor
    fn cycle(&mut self, forward: bool) {
        match self.focused() {
            Some(Control::Field(field)) => {
                if let FieldKind::Select(options) = field.kind() {
                    let current = self.wizard.form.value(field);
                    let next = cycle_option(options, current, forward);
                    self.wizard.form.set_value(field, next);
                    self.wizard.on_field_input(field, &mut self.screen);
                }
            }
            Some(Control::Group(ChoiceGroup::CurrentEnglishTraining)) => {
                let form = &mut self.wizard.form;
                let current = form.current_english_training.as_deref().unwrap_or("");
                form.current_english_training =
                    Some(cycle_option(YES_NO, current, forward).to_string());
            }
            Some(Control::Group(ChoiceGroup::DemoCall)) => {
                let form = &mut self.wizard.form;
                let current = form.demo_call.as_deref().unwrap_or("");
                form.demo_call = Some(cycle_option(YES_NO, current, forward).to_string());
            }
            Some(Control::Group(ChoiceGroup::TargetSegments)) => {
                let len = TARGET_SEGMENTS.len();
                self.segment_cursor = if forward {
                    (self.segment_cursor + 1) % len
                } else {
                    (self.segment_cursor + len - 1) % len
                };
            }
            _ => {}
        }
    }

    /// Space: flip the focused checkbox, or select the focused radio/segment
    fn toggle(&mut self) {
        let focused = self.focused();
        let segment = self.highlighted_segment();
        let form = &mut self.wizard.form;
        match focused {
            Some(Control::WhatsApp) => form.is_whatsapp = !form.is_whatsapp,
            Some(Control::Group(group @ (ChoiceGroup::AgreeToTerms | ChoiceGroup::Authority))) => {
                let checked = form.is_checked(group);
                form.set_checked(group, !checked);
            }
            Some(Control::Group(ChoiceGroup::TargetSegments)) => form.toggle_segment(segment),
            Some(Control::Group(ChoiceGroup::CurrentEnglishTraining)) => {
                if form.current_english_training.is_none() {
                    form.current_english_training = Some(YES_NO[0].to_string());
                }
            }
            Some(Control::Group(ChoiceGroup::DemoCall)) => {
                if form.demo_call.is_none() {
                    form.demo_call = Some(YES_NO[0].to_string());
                }
            }
            _ => {}
        }
    }
}

fn is_text(field: FormField) -> bool {
    !matches!(field.kind(), FieldKind::Select(_))
}

/// Next option after `current`, wrapping; an unset value starts at either end
fn cycle_option<'a>(options: &[&'a str], current: &str, forward: bool) -> &'a str {
    if options.is_empty() {
        return "";
    }
    let len = options.len();
    let idx = match options.iter().position(|o| *o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ErrorTarget, FormState, JOB_TITLES};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn focus_on(app: &mut App, control: Control) {
        app.focus = app.controls().iter().position(|c| *c == control).unwrap();
    }

    /// App positioned on `step` with every earlier step filled in
    fn app_on_step(step: usize) -> App {
        let mut app = App::new(FormState::sample());
        app.wizard.go_to_step(step, &mut app.screen);
        app.sync_focus(1);
        assert_eq!(app.wizard.current_step(), step);
        app
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_cycle_option() {
        let opts = ["a", "b", "c"];
        assert_eq!(cycle_option(&opts, "", true), "a");
        assert_eq!(cycle_option(&opts, "", false), "c");
        assert_eq!(cycle_option(&opts, "c", true), "a");
        assert_eq!(cycle_option(&opts, "a", false), "c");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new(FormState::new());
        let action = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, AppAction::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_runs_live_validation() {
        let mut app = App::new(FormState::new());
        app.handle_key(key(KeyCode::Enter));
        let target = ErrorTarget::Field(FormField::FirstName);
        assert!(app.screen.error(target).is_some());
        // focus moved to the first failing control
        assert_eq!(app.focused(), Some(Control::Field(FormField::FirstName)));

        type_str(&mut app, "J");
        assert!(app.screen.error(target).is_some());
        type_str(&mut app, "o");
        assert_eq!(app.wizard.form.value(FormField::FirstName), "Jo");
        assert!(app.screen.error(target).is_none());

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.wizard.form.value(FormField::FirstName), "J");
    }

    #[test]
    fn test_select_cycles_with_arrows() {
        let mut app = App::new(FormState::new());
        focus_on(&mut app, Control::Field(FormField::JobTitle));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.wizard.form.value(FormField::JobTitle), JOB_TITLES[0]);
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(
            app.wizard.form.value(FormField::JobTitle),
            JOB_TITLES[JOB_TITLES.len() - 2]
        );
        // typing into a select does nothing
        type_str(&mut app, "x");
        assert_ne!(app.wizard.form.value(FormField::JobTitle), "x");
    }

    #[test]
    fn test_space_toggles_whatsapp() {
        let mut app = App::new(FormState::new());
        focus_on(&mut app, Control::WhatsApp);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.wizard.form.is_whatsapp);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.wizard.form.is_whatsapp);
    }

    #[test]
    fn test_space_in_text_field_types() {
        let mut app = App::new(FormState::new());
        focus_on(&mut app, Control::Field(FormField::FirstName));
        type_str(&mut app, "Mary Ann");
        assert_eq!(app.wizard.form.value(FormField::FirstName), "Mary Ann");
    }

    #[test]
    fn test_segments_cursor_and_toggle() {
        let mut app = app_on_step(3);
        app.wizard.form.target_segments.clear();
        focus_on(&mut app, Control::Group(ChoiceGroup::TargetSegments));

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.wizard.form.target_segments, vec![TARGET_SEGMENTS[1]]);

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(
            app.wizard.form.target_segments,
            vec![TARGET_SEGMENTS[0], TARGET_SEGMENTS[1]]
        );
    }

    #[test]
    fn test_esc_goes_back_without_validation() {
        let mut app = app_on_step(3);
        app.wizard.form = FormState::new();
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.wizard.current_step(), 2);
        assert!(!app.screen.has_errors());
    }

    #[test]
    fn test_function_key_jump_blocked() {
        let mut app = App::new(FormState::new());
        app.handle_key(key(KeyCode::F(4)));
        assert_eq!(app.wizard.current_step(), 1);
        assert!(app.screen.has_errors());
    }

    #[test]
    fn test_paste_first_line_only() {
        let mut app = App::new(FormState::new());
        focus_on(&mut app, Control::Field(FormField::Email));
        app.handle_paste("jane@example.com\nsecond line");
        assert_eq!(app.wizard.form.value(FormField::Email), "jane@example.com");
    }

    #[test]
    fn test_enter_on_final_step_requests_submit_once() {
        let mut app = app_on_step(5);
        app.wizard.form.verification_token = None;
        focus_on(&mut app, Control::Verification);
        app.handle_paste("token-123");

        let action = app.handle_key(key(KeyCode::Enter));
        match action {
            AppAction::Submit(payload) => assert_eq!(payload.turnstile_response, "token-123"),
            other => panic!("expected submit, got {:?}", other),
        }
        assert!(app.screen.loading);
        assert_eq!(app.handle_key(key(KeyCode::Enter)), AppAction::None);
    }

    #[test]
    fn test_enter_on_final_step_blocked_without_token() {
        let mut app = app_on_step(5);
        app.wizard.form.verification_token = None;
        assert_eq!(app.handle_key(key(KeyCode::Enter)), AppAction::None);
        assert!(app.screen.error(ErrorTarget::Verification).is_some());
        assert_eq!(app.focused(), Some(Control::Verification));
    }
}
