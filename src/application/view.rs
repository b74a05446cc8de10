//! Rendering interface between the wizard controller and whatever displays it.
//!
//! The controller never touches a screen directly: every projection (panels,
//! progress, ticks, inline errors, toasts) goes through [`WizardView`].

use super::types::{ChoiceGroup, FormField};

/// Where an inline error message is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorTarget {
    Field(FormField),
    Group(ChoiceGroup),
    Verification,
}

/// Visibility of the navigation controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavButtons {
    pub prev: bool,
    pub next: bool,
    pub submit: bool,
}

/// Position of a step relative to the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMarker {
    Completed,
    Active,
    #[default]
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

pub trait WizardView {
    /// Display `message` under `target`; an empty message clears it
    fn show_error(&mut self, target: ErrorTarget, message: &str);

    /// Remove every displayed inline error
    fn clear_errors(&mut self);

    /// Brief attention cue on a failing control
    fn flag_attention(&mut self, target: ErrorTarget);

    /// Make `step` the only visible panel
    fn show_panel(&mut self, step: usize);

    fn set_buttons(&mut self, buttons: NavButtons);

    /// Progress fill, 0.0..=100.0
    fn set_progress(&mut self, percent: f64);

    fn set_step_label(&mut self, step: usize, label: &str);

    fn set_step_marker(&mut self, step: usize, marker: StepMarker);

    /// Show the checkmark (true) or the numeral (false) for `step`
    fn set_tick(&mut self, step: usize, ticked: bool);

    fn set_loading(&mut self, loading: bool);

    /// Hide navigation, progress and panels; show the terminal success view
    fn show_success(&mut self, reference: Option<&str>);

    fn toast(&mut self, message: &str, kind: ToastKind);

    /// Bring the form container into view
    fn scroll_into_view(&mut self);
}

/// View that discards everything; used for silent pre-checks
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl WizardView for NullView {
    fn show_error(&mut self, _target: ErrorTarget, _message: &str) {}
    fn clear_errors(&mut self) {}
    fn flag_attention(&mut self, _target: ErrorTarget) {}
    fn show_panel(&mut self, _step: usize) {}
    fn set_buttons(&mut self, _buttons: NavButtons) {}
    fn set_progress(&mut self, _percent: f64) {}
    fn set_step_label(&mut self, _step: usize, _label: &str) {}
    fn set_step_marker(&mut self, _step: usize, _marker: StepMarker) {}
    fn set_tick(&mut self, _step: usize, _ticked: bool) {}
    fn set_loading(&mut self, _loading: bool) {}
    fn show_success(&mut self, _reference: Option<&str>) {}
    fn toast(&mut self, _message: &str, _kind: ToastKind) {}
    fn scroll_into_view(&mut self) {}
}
