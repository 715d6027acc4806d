//! Step descriptors and the seams a wizard calls out through.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HookError;

/// Field name → value. Used both for one step's submission and for the
/// accumulated snapshot across steps.
pub type FieldValues = BTreeMap<String, serde_json::Value>;

/// Field name → user-facing validation message.
pub type FieldErrors = BTreeMap<String, String>;

/// How a field is collected. Front ends decide what each kind looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Sensitive input such as a password. Kept verbatim, never trimmed.
    Secret,
    /// A local file reference (path plus metadata).
    File,
}

/// One field a step collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn secret(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Secret)
    }

    pub fn file(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::File)
    }

    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

/// Navigation and heading text for a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLabels {
    pub header: Option<String>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub submit: Option<String>,
    pub content_under_button: Option<String>,
}

/// Validation rule set for a step.
///
/// Receives the snapshot merged with the step's current values so rules can
/// compare fields (e.g. a password confirmation). An empty map means valid.
pub trait Validator: Send + Sync {
    fn validate(&self, values: &FieldValues) -> FieldErrors;
}

/// Side effect run when a step validates, before the wizard moves on.
#[async_trait]
pub trait StepHook: Send + Sync {
    async fn on_submit(&self, values: &FieldValues) -> Result<(), HookError>;
}

/// Handler for the last step: receives every collected value and the total
/// number of steps.
#[async_trait]
pub trait FinalSubmit: Send + Sync {
    type Output: Send;

    async fn submit(&self, values: &FieldValues, step_count: usize) -> Self::Output;
}

/// A single wizard step. Identified by its position, not by a key.
#[derive(Clone, Default)]
pub struct StepDefinition {
    pub fields: Vec<FieldSpec>,
    pub validator: Option<Arc<dyn Validator>>,
    pub hook: Option<Arc<dyn StepHook>>,
    pub labels: StepLabels,
}

impl StepDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn hook(mut self, hook: impl StepHook + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn header(mut self, text: &str) -> Self {
        self.labels.header = Some(text.to_string());
        self
    }

    pub fn next_label(mut self, text: &str) -> Self {
        self.labels.next = Some(text.to_string());
        self
    }

    pub fn previous_label(mut self, text: &str) -> Self {
        self.labels.previous = Some(text.to_string());
        self
    }

    pub fn submit_label(mut self, text: &str) -> Self {
        self.labels.submit = Some(text.to_string());
        self
    }

    pub fn content_under_button(mut self, text: &str) -> Self {
        self.labels.content_under_button = Some(text.to_string());
        self
    }

    /// Run this step's validator, if any.
    pub fn validate(&self, values: &FieldValues) -> FieldErrors {
        match &self.validator {
            Some(v) => v.validate(values),
            None => FieldErrors::new(),
        }
    }
}

impl std::fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("fields", &self.fields)
            .field("has_validator", &self.validator.is_some())
            .field("has_hook", &self.hook.is_some())
            .field("labels", &self.labels)
            .finish()
    }
}
