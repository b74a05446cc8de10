use super::client::ApplicationClient;
use super::payload::{ApplicationPayload, SubmitResponse};
use super::types::TOTAL_STEPS;
use super::view::{ToastKind, WizardView};
use super::wizard::ApplicationWizard;
use crate::error::TransportError;

pub const FALLBACK_REJECTION_MSG: &str = "Please fix the errors and try again.";
pub const NETWORK_ERROR_MSG: &str =
    "Network error - please check your connection and try again.";

/// How a submission attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Local validation failed, or a request was already in flight; nothing was sent
    Blocked,
    /// Server accepted the application
    Accepted { reference: Option<String> },
    /// Server rejected the application; `step` is where the wizard moved to
    Rejected {
        message: String,
        step: Option<usize>,
    },
    /// No usable response
    Unreachable(String),
}

impl ApplicationWizard {
    /// First half of a submission: validate the final step, enter the loading
    /// state and hand back the request body.
    ///
    /// Returns `None` without touching the network when validation fails or a
    /// submission is already in flight.
    pub fn begin_submission(&mut self, view: &mut dyn WizardView) -> Option<ApplicationPayload> {
        if self.submitting || self.completed {
            tracing::debug!("submission ignored: already in flight or completed");
            return None;
        }
        if !self.validate_step(TOTAL_STEPS, false, view) {
            return None;
        }

        self.submitting = true;
        view.set_loading(true);
        Some(self.form.collect())
    }

    /// Second half of a submission: apply the server's verdict.
    /// The loading state is reverted on every path.
    pub fn finish_submission(
        &mut self,
        result: Result<SubmitResponse, TransportError>,
        view: &mut dyn WizardView,
    ) -> SubmissionOutcome {
        let outcome = match result {
            Ok(resp) if resp.success => {
                tracing::info!(reference = ?resp.reference_number, "application accepted");
                self.completed = true;
                view.show_success(resp.reference_number.as_deref());
                view.scroll_into_view();
                SubmissionOutcome::Accepted {
                    reference: resp.reference_number,
                }
            }
            Ok(resp) => {
                view.clear_errors();
                let step = match resp.errors.as_ref() {
                    Some(errors) => self.apply_server_errors(errors, view),
                    None => None,
                };
                let message = resp
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| FALLBACK_REJECTION_MSG.to_string());
                tracing::warn!(?step, "application rejected: {}", message);
                view.toast(&message, ToastKind::Error);
                SubmissionOutcome::Rejected { message, step }
            }
            Err(e) => {
                tracing::error!("submission error: {}", e);
                view.toast(NETWORK_ERROR_MSG, ToastKind::Error);
                SubmissionOutcome::Unreachable(e.to_string())
            }
        };

        self.submitting = false;
        view.set_loading(false);
        outcome
    }
}

/// Validate, send and reconcile in one go
pub async fn submit_application(
    wizard: &mut ApplicationWizard,
    client: &dyn ApplicationClient,
    view: &mut dyn WizardView,
) -> SubmissionOutcome {
    let Some(payload) = wizard.begin_submission(view) else {
        return SubmissionOutcome::Blocked;
    };
    let result = client.submit(&payload).await;
    wizard.finish_submission(result, view)
}
