use std::collections::{BTreeMap, BTreeSet};

use super::form::FormState;
use super::types::*;
use super::validators;
use super::view::{ErrorTarget, NavButtons, StepMarker, WizardView};

/// Partnership application wizard state
#[derive(Debug, Clone)]
pub struct ApplicationWizard {
    /// Active step, always within `1..=TOTAL_STEPS`
    pub(super) step: usize,
    /// Steps whose most recent validation run passed
    pub(super) validated_steps: BTreeSet<usize>,
    pub form: FormState,
    /// A submission request is in flight
    pub(super) submitting: bool,
    /// Server accepted the application
    pub(super) completed: bool,
}

impl Default for ApplicationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationWizard {
    pub fn new() -> Self {
        Self::with_form(FormState::new())
    }

    pub fn with_form(form: FormState) -> Self {
        Self {
            step: 1,
            validated_steps: BTreeSet::new(),
            form,
            submitting: false,
            completed: false,
        }
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn validated_steps(&self) -> &BTreeSet<usize> {
        &self.validated_steps
    }

    pub fn is_validated(&self, step: usize) -> bool {
        self.validated_steps.contains(&step)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_final_step(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    /// Validate every field and group owned by `step`.
    ///
    /// Non-silent runs write messages and attention cues to `view` and refresh
    /// tick marks. Silent runs make no view calls. Both update
    /// `validated_steps`. Unknown steps count as valid and change nothing.
    pub fn validate_step(&mut self, step: usize, silent: bool, view: &mut dyn WizardView) -> bool {
        if !(1..=TOTAL_STEPS).contains(&step) {
            return true;
        }

        let mut is_valid = true;

        for &field in step_fields(step) {
            let error = validators::validate_field(field, self.form.value(field));
            if !silent {
                report(view, ErrorTarget::Field(field), &error);
            }
            if !error.is_empty() {
                is_valid = false;
            }
        }

        for &group in step_groups(step) {
            let error = self.form.group_message(group);
            if !silent && group != ChoiceGroup::DemoCall {
                report(view, ErrorTarget::Group(group), &error);
            }
            if !error.is_empty() {
                is_valid = false;
            }
        }

        // The challenge token is only checked on real validation runs
        if step == TOTAL_STEPS && !silent {
            let error =
                validators::validate_verification_token(self.form.verification_token.as_deref());
            report(view, ErrorTarget::Verification, &error);
            if !error.is_empty() {
                is_valid = false;
            }
        }

        if is_valid {
            self.validated_steps.insert(step);
        } else {
            self.validated_steps.remove(&step);
        }
        tracing::debug!(step, is_valid, silent, "step validated");

        if !silent {
            self.refresh_ticks(view);
        }

        is_valid
    }

    /// Silent validation with no view attached
    pub fn precheck_step(&mut self, step: usize) -> bool {
        self.validate_step(step, true, &mut super::view::NullView)
    }

    /// Re-project every piece of step-dependent UI
    pub fn render(&self, view: &mut dyn WizardView) {
        view.show_panel(self.step);
        view.set_buttons(NavButtons {
            prev: self.step > 1,
            next: self.step < TOTAL_STEPS,
            submit: self.step == TOTAL_STEPS,
        });
        view.set_progress(self.progress_percent());

        for step in 1..=TOTAL_STEPS {
            let title = step_title(step);
            if step == self.step {
                let pct = (step - 1) as f64 / (TOTAL_STEPS - 1) as f64 * 100.0;
                view.set_step_label(step, &format!("{} ({}%)", title, pct.round() as u32));
            } else {
                view.set_step_label(step, title);
            }

            let marker = if step < self.step {
                StepMarker::Completed
            } else if step == self.step {
                StepMarker::Active
            } else {
                StepMarker::Upcoming
            };
            view.set_step_marker(step, marker);
        }

        self.refresh_ticks(view);
    }

    /// A validated step shows a tick unless it is the active one
    pub fn refresh_ticks(&self, view: &mut dyn WizardView) {
        for step in 1..=TOTAL_STEPS {
            view.set_tick(step, self.shows_tick(step));
        }
    }

    pub fn shows_tick(&self, step: usize) -> bool {
        self.validated_steps.contains(&step) && step != self.step
    }

    /// Progress fill for the active step, in percent
    pub fn progress_percent(&self) -> f64 {
        (self.step - 1) as f64 / (TOTAL_STEPS - 1) as f64 * 100.0
    }

    /// Live validation: clear a field's error as soon as its value is valid
    pub fn on_field_input(&self, field: FormField, view: &mut dyn WizardView) {
        if validators::validate_field(field, self.form.value(field)).is_empty() {
            view.show_error(ErrorTarget::Field(field), "");
        }
    }

    /// Display a server error map and move to the earliest step it touches.
    ///
    /// Returns the step navigated to, if any key belongs to a step.
    pub fn apply_server_errors(
        &mut self,
        errors: &BTreeMap<String, String>,
        view: &mut dyn WizardView,
    ) -> Option<usize> {
        for (name, message) in errors {
            if let Some(field) = FormField::from_name(name) {
                view.show_error(ErrorTarget::Field(field), message);
            } else if let Some(group) = ChoiceGroup::from_name(name) {
                view.show_error(ErrorTarget::Group(group), message);
            } else {
                tracing::warn!(field = %name, "server error for unknown field: {}", message);
            }
        }

        let target = (1..=TOTAL_STEPS).find(|&step| {
            step_fields(step)
                .iter()
                .any(|f| errors.contains_key(f.name()))
                || step_groups(step)
                    .iter()
                    .any(|g| errors.contains_key(g.name()))
        })?;

        self.set_step(target, view);
        Some(target)
    }

    /// Move to `step` and re-render
    pub(super) fn set_step(&mut self, step: usize, view: &mut dyn WizardView) {
        self.step = step.clamp(1, TOTAL_STEPS);
        self.render(view);
        view.scroll_into_view();
    }
}

/// Show or clear a message, flagging the control when it failed
fn report(view: &mut dyn WizardView, target: ErrorTarget, error: &str) {
    view.show_error(target, error);
    if !error.is_empty() {
        view.flag_attention(target);
    }
}
