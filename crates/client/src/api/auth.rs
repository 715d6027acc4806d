//! Sign-in and sign-up calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{establish_session, json_body, ApiClient};
use crate::endpoint::Endpoint;
use crate::outcome::Outcome;
use crate::request::{Body, RequestDescriptor};
use crate::session::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSignUp {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One-time password plus the address it was sent to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpConfirmation {
    pub otp: String,
    pub email: String,
}

/// Diner account request. `image_url` is the storage name returned by a
/// prior image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DinerSignUp {
    pub name: String,
    pub email: String,
    /// Digits only.
    pub phone: String,
    pub password: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

impl ApiClient {
    /// POST `/api/login`
    pub async fn login(&self, email: &str, password: &str) -> Outcome {
        let body = json_body(&Credentials {
            email: email.to_string(),
            password: password.to_string(),
        });
        self.perform_anonymous(RequestDescriptor::post(Endpoint::Login, body))
            .await
    }

    /// POST `/api/signup/customer`
    pub async fn sign_up_customer(&self, data: &CustomerSignUp) -> Outcome {
        self.perform_anonymous(RequestDescriptor::post(
            Endpoint::SignUpCustomer,
            json_body(data),
        ))
        .await
    }

    /// POST `/api/signup/recipient`
    ///
    /// Confirms a recipient's one-time password. On success the returned
    /// token establishes `session`.
    pub async fn confirm_recipient_otp(
        &self,
        session: &mut Session,
        data: &OtpConfirmation,
    ) -> Outcome {
        let outcome = self
            .perform_anonymous(RequestDescriptor::post(
                Endpoint::SignUpRecipient,
                json_body(data),
            ))
            .await;
        establish_session(session, outcome)
    }

    /// POST `/api/signup/diner`
    pub async fn sign_up_diner(&self, data: &DinerSignUp) -> Outcome {
        self.perform_anonymous(RequestDescriptor::post(
            Endpoint::SignUpDiner,
            json_body(data),
        ))
        .await
    }

    /// POST `/api/signup/restaurant`
    ///
    /// The restaurant form is free-form; its fields go through untouched.
    pub async fn sign_up_restaurant(&self, data: &Value) -> Outcome {
        self.perform_anonymous(RequestDescriptor::post(
            Endpoint::SignUpRestaurant,
            Body::Json(data.clone()),
        ))
        .await
    }
}
