//! Multi-step form engine.
//!
//! A [`Wizard`] walks an ordered list of [`StepDefinition`]s, collecting the
//! values each step submits into a running snapshot. Forward transitions
//! happen only after the active step validates; the last step hands the full
//! snapshot to a caller-supplied [`FinalSubmit`] handler.
//!
//! The engine does no I/O of its own. Rendering, field input and network
//! calls all live with the caller.

mod engine;
mod error;
mod step;

pub use engine::{merge_into, StepOutcome, Wizard};
pub use error::{HookError, WizardError};
pub use step::{
    FieldErrors, FieldKind, FieldSpec, FieldValues, FinalSubmit, StepDefinition, StepHook,
    StepLabels, Validator,
};
