//! Interactive wizard state: controller, screen and focus

use crate::application::{
    ApplicationPayload, ApplicationWizard, ChoiceGroup, FormField, FormState, SubmissionOutcome, SubmitResponse,
    TARGET_SEGMENTS, TOTAL_STEPS, step_fields, step_groups,
};
use crate::error::TransportError;

use super::screen::Screen;

/// A focusable control on the active panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Field(FormField),
    /// "This number is on WhatsApp" checkbox
    WhatsApp,
    Group(ChoiceGroup),
    /// Security verification token entry
    Verification,
}

/// What the runner should do after a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    None,
    /// Send this payload; report back through `App::on_submission_result`
    Submit(ApplicationPayload),
    Quit,
}

pub struct App {
    pub wizard: ApplicationWizard,
    pub screen: Screen,
    /// Index into `controls()` for the active step
    pub focus: usize,
    /// Highlighted option in the target-segment list
    pub segment_cursor: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(form: FormState) -> Self {
        let mut app = Self {
            wizard: ApplicationWizard::with_form(form),
            screen: Screen::new(),
            focus: 0,
            segment_cursor: 0,
            should_quit: false,
        };
        app.wizard.render(&mut app.screen);
        app
    }

    /// Focusable controls of the active step, top to bottom
    pub fn controls(&self) -> Vec<Control> {
        controls_for(self.wizard.current_step())
    }

    pub fn focused(&self) -> Option<Control> {
        self.controls().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let len = self.controls().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    pub fn focus_prev(&mut self) {
        let len = self.controls().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }

    /// Reset focus after the wizard changed step
    pub(super) fn sync_focus(&mut self, previous_step: usize) {
        if self.wizard.current_step() != previous_step {
            self.focus = 0;
            self.segment_cursor = 0;
        }
        // Land on the first control that is showing an error
        if let Some(pos) = self.controls().iter().position(|c| self.control_has_error(*c)) {
            self.focus = pos;
        }
    }

    pub fn control_has_error(&self, control: Control) -> bool {
        use crate::application::ErrorTarget;
        let target = match control {
            Control::Field(field) => ErrorTarget::Field(field),
            Control::Group(group) => ErrorTarget::Group(group),
            Control::Verification => ErrorTarget::Verification,
            Control::WhatsApp => return false,
        };
        self.screen.error(target).is_some()
    }

    /// Apply the result of a submission started by `AppAction::Submit`
    pub fn on_submission_result(
        &mut self,
        result: Result<SubmitResponse, TransportError>,
    ) -> SubmissionOutcome {
        let before = self.wizard.current_step();
        let outcome = self.wizard.finish_submission(result, &mut self.screen);
        self.sync_focus(before);
        outcome
    }

    /// Segment under the cursor in the multi-select list
    pub fn highlighted_segment(&self) -> &'static str {
        TARGET_SEGMENTS[self.segment_cursor.min(TARGET_SEGMENTS.len() - 1)]
    }
}

/// Focus order for a step: its fields, the WhatsApp box after the phone
/// number, its choice groups, then the verification entry on the last step
pub fn controls_for(step: usize) -> Vec<Control> {
    let mut controls = Vec::new();
    for &field in step_fields(step) {
        controls.push(Control::Field(field));
        if field == FormField::Phone {
            controls.push(Control::WhatsApp);
        }
    }

    controls.extend(step_groups(step).iter().map(|g| Control::Group(*g)));

    if step == TOTAL_STEPS {
        controls.push(Control::Verification);
    }
    controls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_for_steps() {
        let step1 = controls_for(1);
        let phone = step1
            .iter()
            .position(|c| *c == Control::Field(FormField::Phone))
            .unwrap();
        assert_eq!(step1[phone + 1], Control::WhatsApp);

        assert!(controls_for(2).contains(&Control::Group(ChoiceGroup::CurrentEnglishTraining)));
        assert!(controls_for(3).contains(&Control::Group(ChoiceGroup::TargetSegments)));

        let step5 = controls_for(5);
        assert_eq!(step5.last(), Some(&Control::Verification));
        assert!(step5.contains(&Control::Group(ChoiceGroup::DemoCall)));
        assert!(controls_for(0).is_empty());
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = App::new(FormState::new());
        let len = app.controls().len();
        app.focus_prev();
        assert_eq!(app.focus, len - 1);
        app.focus_next();
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn test_new_app_renders_first_step() {
        let app = App::new(FormState::new());
        assert_eq!(app.screen.panel, Some(1));
        assert!(app.screen.buttons.next);
        assert_eq!(app.screen.labels[0], "Personal Information (0%)");
    }
}
