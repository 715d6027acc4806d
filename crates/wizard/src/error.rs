/// Errors raised while constructing a wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// A wizard needs at least one step to have a valid current index.
    #[error("a wizard needs at least one step")]
    NoSteps,
}

/// Failure reported by a per-step submit hook.
///
/// A failing hook keeps the wizard on the current step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("step {step} submit hook failed: {message}")]
pub struct HookError {
    pub step: usize,
    pub message: String,
}

impl HookError {
    pub fn new(step: usize, message: impl Into<String>) -> Self {
        HookError {
            step,
            message: message.into(),
        }
    }
}
