//! The three-step diner sign-up form.

use openmeal_wizard::{FieldSpec, FieldValues, FinalSubmit, StepDefinition, Wizard};
use serde_json::Value;

use crate::error::SignupError;
use crate::rules::{BasicInfoRules, UploadRules};

/// Screens shown after the wizard itself (the success view).
pub const EXTRA_DISPLAY_STEPS: usize = 1;

pub const TERMS_STEP: usize = 1;
pub const UPLOAD_STEP: usize = 2;

/// Empty strings for the text fields, `null` for the upload.
pub fn initial_values() -> FieldValues {
    let mut values = FieldValues::new();
    for name in ["name", "email", "phone", "password", "passwordConfirm"] {
        values.insert(name.to_string(), Value::String(String::new()));
    }
    values.insert("uploadedFiles".to_string(), Value::Null);
    values
}

pub fn diner_steps() -> Vec<StepDefinition> {
    let basic_info = StepDefinition::new()
        .field(FieldSpec::text("name", "Full Name"))
        .field(FieldSpec::text("email", "Email"))
        .field(FieldSpec::text("phone", "Phone Number"))
        .field(FieldSpec::secret("password", "Password"))
        .field(FieldSpec::secret("passwordConfirm", "Confirm Password"))
        .validator(BasicInfoRules)
        .header("Create a Diner Account")
        .next_label("Next")
        .previous_label("Previous")
        .content_under_button("Already have an account? Sign in here");

    let terms = StepDefinition::new()
        .header("Terms of Use")
        .next_label("I Agree")
        .previous_label("Previous");

    let upload = StepDefinition::new()
        .field(FieldSpec::file("uploadedFiles", "Photo ID"))
        .validator(UploadRules)
        .header("Upload Your ID")
        .submit_label("Sign Up")
        .previous_label("Previous");

    vec![basic_info, terms, upload]
}

/// Wizard over [`diner_steps`] starting from [`initial_values`].
pub fn diner_wizard<H: FinalSubmit>(handler: H) -> Result<Wizard<H>, SignupError> {
    let wizard = Wizard::new(diner_steps(), initial_values(), handler)?;
    Ok(wizard.with_extra_display_steps(EXTRA_DISPLAY_STEPS))
}
