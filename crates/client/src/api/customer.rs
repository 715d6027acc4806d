//! Customer account calls.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{establish_session, json_body, ApiClient, OtpConfirmation};
use crate::endpoint::Endpoint;
use crate::outcome::Outcome;
use crate::request::{Body, RequestDescriptor};
use crate::session::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl ApiClient {
    /// GET `/api/customer`
    pub async fn get_customer(&self, session: &Session) -> Outcome {
        self.perform(RequestDescriptor::get(Endpoint::Customer).authenticated(), session)
            .await
    }

    /// POST `/api/customer/password`
    pub async fn update_password(&self, session: &Session, update: &PasswordUpdate) -> Outcome {
        self.perform(
            RequestDescriptor::post(Endpoint::UpdatePassword, json_body(update)).authenticated(),
            session,
        )
        .await
    }

    /// POST `/api/customer/password/generate-otp`
    pub async fn request_otp(&self) -> Outcome {
        self.perform_anonymous(RequestDescriptor::post(Endpoint::GenerateOtp, Body::Empty))
            .await
    }

    /// POST `/api/customer/password/verify-otp`
    ///
    /// On success the returned token establishes `session`.
    pub async fn verify_otp(&self, session: &mut Session, data: &OtpConfirmation) -> Outcome {
        let outcome = self
            .perform_anonymous(RequestDescriptor::post(Endpoint::VerifyOtp, json_body(data)))
            .await;
        establish_session(session, outcome)
    }

    /// POST `/api/customer/password/reset`
    pub async fn reset_password(&self, email: &str) -> Outcome {
        self.perform_anonymous(RequestDescriptor::post(
            Endpoint::ResetPassword,
            Body::Json(json!({ "email": email })),
        ))
        .await
    }
}
