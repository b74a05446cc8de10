//! Partnership Application Wizard
//!
//! A 5-step application form: personal information, institution details,
//! partnership details, business experience and agreement. Handles per-field
//! and per-group validation, step navigation, submission and reconciliation
//! of server-side errors. Nothing in here draws; see [`view::WizardView`].

mod client;
mod form;
mod navigation;
mod payload;
mod submit;
mod types;
pub mod validators;
pub mod view;
mod wizard;


pub use client::{ApplicationClient, HttpApplicationClient};
#[cfg(test)]
pub use client::MockApplicationClient;
pub use form::FormState;
pub use payload::{ApplicationPayload, SubmitResponse};
pub use submit::{
    FALLBACK_REJECTION_MSG, NETWORK_ERROR_MSG, SubmissionOutcome, submit_application,
};
pub use types::*;
pub use view::{ErrorTarget, NavButtons, NullView, StepMarker, ToastKind, WizardView};
pub use wizard::ApplicationWizard;
