//! The wizard state machine.
//!
//! States are step indices `0..step_count`. The only transitions are a
//! validated forward submit and an explicit retreat; the index never leaves
//! the valid range.

use crate::error::{HookError, WizardError};
use crate::step::{FieldErrors, FieldValues, FinalSubmit, StepDefinition};

/// Result of submitting the active step.
#[derive(Debug, PartialEq)]
pub enum StepOutcome<T> {
    /// Validation failed; nothing changed.
    Invalid(FieldErrors),
    /// The step's own submit hook failed; nothing changed.
    HookFailed(HookError),
    /// Values were merged and the wizard moved to `index`.
    Advanced { index: usize },
    /// The last step was submitted; carries the final handler's output.
    Completed(T),
}

/// Overwrite `target` field-wise with `values`. Fields absent from `values`
/// keep their current value.
pub fn merge_into(target: &mut FieldValues, values: FieldValues) {
    for (name, value) in values {
        target.insert(name, value);
    }
}

/// Multi-step form driver.
pub struct Wizard<H: FinalSubmit> {
    steps: Vec<StepDefinition>,
    current_index: usize,
    snapshot: FieldValues,
    initial_values: FieldValues,
    extra_display_steps: usize,
    handler: H,
}

impl<H: FinalSubmit> Wizard<H> {
    /// Build a wizard positioned on the first step with `initial_values` as
    /// the snapshot.
    pub fn new(
        steps: Vec<StepDefinition>,
        initial_values: FieldValues,
        handler: H,
    ) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Wizard {
            steps,
            current_index: 0,
            snapshot: initial_values.clone(),
            initial_values,
            extra_display_steps: 0,
            handler,
        })
    }

    /// Count `extra` additional steps in [`Wizard::progress_label`], for
    /// flows that show more screens after the wizard itself.
    pub fn with_extra_display_steps(mut self, extra: usize) -> Self {
        self.extra_display_steps = extra;
        self
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_index == self.steps.len() - 1
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current_index]
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn snapshot(&self) -> &FieldValues {
        &self.snapshot
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Merge `values` and move forward one step. On the last step only the
    /// merge happens.
    pub fn advance(&mut self, values: FieldValues) {
        merge_into(&mut self.snapshot, values);
        self.current_index = (self.current_index + 1).min(self.steps.len() - 1);
        tracing::debug!(index = self.current_index, "wizard advanced");
    }

    /// Merge the in-progress `values` and move back one step, so going back
    /// never loses edits.
    pub fn retreat(&mut self, values: FieldValues) {
        merge_into(&mut self.snapshot, values);
        self.current_index = self.current_index.saturating_sub(1);
        tracing::debug!(index = self.current_index, "wizard retreated");
    }

    /// Validate and submit the active step.
    ///
    /// The validator and hook see the snapshot merged with `values`. A
    /// failing hook blocks the transition. On the last step the merged
    /// snapshot goes to the final handler together with the step count.
    pub async fn submit_current_step(&mut self, values: FieldValues) -> StepOutcome<H::Output> {
        let mut merged = self.snapshot.clone();
        merge_into(&mut merged, values.clone());

        let step = &self.steps[self.current_index];
        let errors = step.validate(&merged);
        if !errors.is_empty() {
            tracing::debug!(
                index = self.current_index,
                fields = errors.len(),
                "step validation failed"
            );
            return StepOutcome::Invalid(errors);
        }

        if let Some(hook) = step.hook.clone() {
            if let Err(err) = hook.on_submit(&merged).await {
                tracing::warn!(index = self.current_index, error = %err, "step hook failed");
                return StepOutcome::HookFailed(err);
            }
        }

        if self.is_last_step() {
            self.snapshot = merged;
            let output = self
                .handler
                .submit(&self.snapshot, self.steps.len())
                .await;
            return StepOutcome::Completed(output);
        }

        self.advance(values);
        StepOutcome::Advanced {
            index: self.current_index,
        }
    }

    /// Discard collected values and return to the first step.
    pub fn reset(&mut self) {
        self.snapshot = self.initial_values.clone();
        self.current_index = 0;
    }

    /// `"Step x of y"`, counting any extra display steps in `y`.
    pub fn progress_label(&self) -> String {
        format!(
            "Step {} of {}",
            self.current_index + 1,
            self.steps.len() + self.extra_display_steps
        )
    }

    /// Label for the forward button: the submit label on the last step,
    /// the next label elsewhere.
    pub fn primary_label(&self) -> Option<&str> {
        let labels = &self.current_step().labels;
        let label = if self.is_last_step() {
            labels.submit.as_deref()
        } else {
            labels.next.as_deref()
        };
        label.filter(|l| !l.is_empty())
    }

    /// Label for the back button, only offered past the first step.
    pub fn previous_label(&self) -> Option<&str> {
        if self.current_index == 0 {
            return None;
        }
        self.current_step()
            .labels
            .previous
            .as_deref()
            .filter(|l| !l.is_empty())
    }
}
