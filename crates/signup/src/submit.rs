//! Final submit for the diner sign-up wizard: upload the photo ID, then
//! create the account with the stored image name.

use std::borrow::Cow;

use async_trait::async_trait;
use openmeal_client::{
    ApiClient, DinerSignUp, ImageUpload, Outcome, Session, UploadImageKind,
    CONTACT_SUPPORT_MESSAGE,
};
use openmeal_wizard::{FieldValues, FinalSubmit};
use serde_json::json;

use crate::upload::files_in;

pub const SUCCESS_TOAST: &str =
    "You've been signed up!  Please follow the directions above to complete the process.";

pub const UPLOAD_REQUIRED: &str = "Please upload a photo ID";

/// What the sign-up attempt produced, plus the wizard length for the
/// trailing success view.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpResult {
    pub outcome: Outcome,
    pub total_steps: usize,
}

impl SignUpResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Toast text for the result. A failure shows whatever the server sent
    /// and falls back to the support contact line only when it sent nothing.
    pub fn toast(&self) -> Cow<'_, str> {
        match &self.outcome {
            Outcome::Success(_) => Cow::Borrowed(SUCCESS_TOAST),
            Outcome::Failure(_) => self
                .outcome
                .user_message()
                .unwrap_or(Cow::Borrowed(CONTACT_SUPPORT_MESSAGE)),
        }
    }

    /// Lines of the page shown after a successful sign-up.
    pub fn success_view(&self) -> Vec<String> {
        let last = self.total_steps + 1;
        vec![
            "Thank You for Your Interest in Becoming an OpenMeal Diner!".to_string(),
            format!("Step {} of {}", last, last),
            "Next, we'd like to ask you to complete the following application.".to_string(),
            "It will take about 20 minutes to complete, and we will get back to you within 48 hours."
                .to_string(),
            "Once you've applied and approved as a requester, you will be able to place orders."
                .to_string(),
            "If you've already applied, we'll be in touch shortly. Thank you for your patience!"
                .to_string(),
        ]
    }
}

/// Submits the collected diner form through an [`ApiClient`].
#[derive(Clone)]
pub struct DinerSignUpHandler {
    client: ApiClient,
}

impl DinerSignUpHandler {
    pub fn new(client: ApiClient) -> Self {
        DinerSignUpHandler { client }
    }

    async fn sign_up(&self, values: &FieldValues) -> Outcome {
        let files = files_in(values.get("uploadedFiles"));
        let Some(file) = files.first() else {
            return Outcome::Failure(json!({ "errorMessage": UPLOAD_REQUIRED }));
        };

        let bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %file.path, error = %e, "could not read photo ID");
                return Outcome::Failure(json!({
                    "error": e.to_string(),
                    "errorMessage": format!("Could not read {}", file.path),
                }));
            }
        };

        let upload = ImageUpload::new(bytes, &file.mime_type, UploadImageKind::Item)
            .with_extension(&file.extension());
        let uploaded = self.client.upload_image(&Session::new(), &upload).await;
        if !uploaded.is_success() {
            return uploaded;
        }
        let Some(file_name) = uploaded.str_field("file_name").map(str::to_string) else {
            tracing::warn!("image upload response has no file_name");
            return Outcome::Failure(uploaded.into_payload());
        };

        let request = DinerSignUp {
            name: field(values, "name"),
            email: field(values, "email"),
            phone: digits_only(&field(values, "phone")),
            password: field(values, "password"),
            image_url: file_name.clone(),
        };
        let outcome = self.client.sign_up_diner(&request).await;
        if !outcome.is_success() {
            tracing::warn!(file_name = %file_name, "diner sign-up failed; uploaded image left in storage");
        }
        outcome
    }
}

#[async_trait]
impl FinalSubmit for DinerSignUpHandler {
    type Output = SignUpResult;

    async fn submit(&self, values: &FieldValues, step_count: usize) -> SignUpResult {
        SignUpResult {
            outcome: self.sign_up(values).await,
            total_steps: step_count,
        }
    }
}

fn field(values: &FieldValues, name: &str) -> String {
    values
        .get(name)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}
