//! Terminal projection of the wizard
//!
//! `Screen` is what the controller writes into through [`WizardView`]; the
//! renderer only reads it.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::application::{
    ErrorTarget, NavButtons, StepMarker, TOTAL_STEPS, ToastKind, WizardView, step_title,
};

/// How long a toast stays up
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

/// How long a failed control stays highlighted
pub const ATTENTION_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Screen {
    errors: BTreeMap<ErrorTarget, String>,
    attention: BTreeMap<ErrorTarget, Instant>,
    pub panel: Option<usize>,
    pub buttons: NavButtons,
    pub progress: f64,
    pub labels: [String; TOTAL_STEPS],
    pub markers: [StepMarker; TOTAL_STEPS],
    pub ticks: [bool; TOTAL_STEPS],
    pub loading: bool,
    /// Set once the server accepted; holds the reference number if one came back
    pub success: Option<Option<String>>,
    pub toast: Option<Toast>,
    /// Consumed by the renderer to reset panel scroll
    pub scroll_requested: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
            attention: BTreeMap::new(),
            panel: Some(1),
            buttons: NavButtons::default(),
            progress: 0.0,
            labels: std::array::from_fn(|i| step_title(i + 1).to_string()),
            markers: [StepMarker::Upcoming; TOTAL_STEPS],
            ticks: [false; TOTAL_STEPS],
            loading: false,
            success: None,
            toast: None,
            scroll_requested: false,
        }
    }

    /// Inline message shown under `target`, if any
    pub fn error(&self, target: ErrorTarget) -> Option<&str> {
        self.errors.get(&target).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether `target` is still inside its attention window at `now`
    pub fn is_flagged(&self, target: ErrorTarget, now: Instant) -> bool {
        self.attention
            .get(&target)
            .is_some_and(|at| now.saturating_duration_since(*at) < ATTENTION_DURATION)
    }

    pub fn is_completed(&self) -> bool {
        self.success.is_some()
    }

    /// Drop expired toasts and attention cues
    pub fn tick(&mut self, now: Instant) {
        if let Some(toast) = &self.toast
            && now.saturating_duration_since(toast.shown_at) >= TOAST_DURATION
        {
            self.toast = None;
        }
        self.attention
            .retain(|_, at| now.saturating_duration_since(*at) < ATTENTION_DURATION);
    }

    fn slot(step: usize) -> Option<usize> {
        (1..=TOTAL_STEPS).contains(&step).then(|| step - 1)
    }
}

impl WizardView for Screen {
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

    fn flag_attention(&mut self, target: ErrorTarget) {
        self.attention.insert(target, Instant::now());
    }

    fn show_panel(&mut self, step: usize) {
        self.panel = Some(step);
    }

    fn set_buttons(&mut self, buttons: NavButtons) {
        self.buttons = buttons;
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent.clamp(0.0, 100.0);
    }

    fn set_step_label(&mut self, step: usize, label: &str) {
        if let Some(i) = Self::slot(step) {
            self.labels[i] = label.to_string();
        }
    }

    fn set_step_marker(&mut self, step: usize, marker: StepMarker) {
        if let Some(i) = Self::slot(step) {
            self.markers[i] = marker;
        }
    }

    fn set_tick(&mut self, step: usize, ticked: bool) {
        if let Some(i) = Self::slot(step) {
            self.ticks[i] = ticked;
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn show_success(&mut self, reference: Option<&str>) {
        self.success = Some(reference.map(str::to_string));
        self.panel = None;
        self.buttons = NavButtons::default();
        self.errors.clear();
    }

    fn toast(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        });
    }

    fn scroll_into_view(&mut self) {
        self.scroll_requested = true;
    }
}
