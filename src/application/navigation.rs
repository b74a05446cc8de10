use super::types::TOTAL_STEPS;
use super::view::WizardView;
use super::wizard::ApplicationWizard;

impl ApplicationWizard {
    /// Advance one step if the current step validates.
    /// Returns true when the wizard moved.
    pub fn next_step(&mut self, view: &mut dyn WizardView) -> bool {
        if !self.validate_step(self.step, false, view) {
            tracing::debug!(step = self.step, "[next_step] blocked by validation");
            return false;
        }
        if self.step >= TOTAL_STEPS {
            return false;
        }
        let target = self.step + 1;
        tracing::debug!("[next_step] {} → {}", self.step, target);
        self.set_step(target, view);
        true
    }

    /// Go back one step. Never validates. Returns false on step 1.
    pub fn prev_step(&mut self, view: &mut dyn WizardView) -> bool {
        if self.step <= 1 {
            return false;
        }
        let target = self.step - 1;
        self.set_step(target, view);
        true
    }

    /// Jump straight to `target`, as a click on a step circle does.
    ///
    /// Going back is always allowed. Going forward validates the current step
    /// and every step before `target`, in order, and stops on the first one
    /// that fails. Returns the step the wizard ends up on.
    pub fn go_to_step(&mut self, target: usize, view: &mut dyn WizardView) -> usize {
        if !(1..=TOTAL_STEPS).contains(&target) || target == self.step {
            return self.step;
        }

        if target < self.step {
            self.set_step(target, view);
            return self.step;
        }

        for step in self.step..target {
            if !self.validate_step(step, false, view) {
                tracing::debug!(target, failed = step, "[go_to_step] stopped on failing step");
                self.set_step(step, view);
                return self.step;
            }
        }

        self.set_step(target, view);
        self.step
    }
}
