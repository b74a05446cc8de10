//! Plain-text view for headless runs

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::application::{
    ErrorTarget, NavButtons, StepMarker, ToastKind, WizardView, step_title,
};

/// Collects what the wizard would show so it can be printed afterwards
#[derive(Debug, Default)]
pub struct ConsoleView {
    pub errors: BTreeMap<ErrorTarget, String>,
    pub step: usize,
    pub toasts: Vec<(String, ToastKind)>,
    pub success: Option<Option<String>>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline errors grouped by the step that owns them
    pub fn error_report(&self) -> String {
        let mut by_step: BTreeMap<usize, Vec<(String, &str)>> = BTreeMap::new();
        for (target, message) in &self.errors {
            let (step, name) = match target {
                ErrorTarget::Field(field) => (field.step(), field.name()),
                ErrorTarget::Group(group) => (group.step(), group.name()),
                ErrorTarget::Verification => (crate::application::TOTAL_STEPS, "verification"),
            };
            by_step
                .entry(step)
                .or_default()
                .push((name.to_string(), message.as_str()));
        }

        let mut out = String::new();
        for (step, errors) in by_step {
            let _ = writeln!(out, "Step {} - {}", step, step_title(step));
            for (name, message) in errors {
                let _ = writeln!(out, "  {:<24} {}", name, message);
            }
        }
        out
    }
}

impl WizardView for ConsoleView {
    fn show_error(&mut self, target: ErrorTarget, message: &str) {
        if message.is_empty() {
            self.errors.remove(&target);
        } else {
            self.errors.insert(target, message.to_string());
        }
    }

    fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn flag_attention(&mut self, _target: ErrorTarget) {}

    fn show_panel(&mut self, step: usize) {
        self.step = step;
    }

    fn set_buttons(&mut self, _buttons: NavButtons) {}

    fn set_progress(&mut self, _percent: f64) {}

    fn set_step_label(&mut self, _step: usize, _label: &str) {}

    fn set_step_marker(&mut self, _step: usize, _marker: StepMarker) {}

    fn set_tick(&mut self, _step: usize, _ticked: bool) {}

    fn set_loading(&mut self, loading: bool) {
        tracing::debug!(loading, "loading state");
    }

    fn show_success(&mut self, reference: Option<&str>) {
        self.success = Some(reference.map(str::to_string));
    }

    fn toast(&mut self, message: &str, kind: ToastKind) {
        self.toasts.push((message.to_string(), kind));
    }

    fn scroll_into_view(&mut self) {}
}
