//! The OpenMeal API client.
//!
//! Every operation issues exactly one request through [`ApiClient::perform`]
//! and returns an [`Outcome`]; nothing is retried and nothing is written
//! into shared state except the caller's [`Session`] on the two one-time
//! password sign-in paths.

mod admin;
mod auth;
mod customer;
mod media;
mod menu;
mod recipient;
mod restaurant;

pub use admin::{RecipientApproval, RecipientEdit};
pub use auth::{Credentials, CustomerSignUp, DinerSignUp, OtpConfirmation};
pub use customer::PasswordUpdate;
pub use media::{ImageUpload, Payment};
pub use menu::MenuItem;
pub use recipient::RecipientResponses;
pub use restaurant::{OrderRequest, PickupTime};

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::config::ClientConfig;
use crate::outcome::{classify, LoadingStage, Outcome};
use crate::request::{Body, RequestDescriptor};
use crate::session::Session;
use crate::transport::{HttpRequest, Transport, UreqTransport};

/// Header carrying the raw session token.
pub const AUTH_HEADER: &str = "AUTH_TOKEN";

/// Client for the OpenMeal backend. Cheap to clone; clones share the
/// transport.
#[derive(Clone)]
pub struct ApiClient {
    api_url: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client using the `ureq` transport configured from `config`.
    pub fn new(config: &ClientConfig) -> Self {
        ApiClient {
            api_url: config.api_url.clone(),
            transport: Arc::new(UreqTransport::new(config.timeout)),
        }
    }

    /// Client sending through a caller-supplied transport.
    pub fn with_transport(api_url: &str, transport: Arc<dyn Transport>) -> Self {
        ApiClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Turn a descriptor into a wire request. The session token is attached
    /// only when the descriptor asks for auth and the session has one.
    pub fn build_request(&self, descriptor: &RequestDescriptor, session: &Session) -> HttpRequest {
        let mut headers = vec![(
            "Content-Type".to_string(),
            descriptor.content_type().header_value(),
        )];

        if descriptor.needs_auth {
            match session.access_token() {
                Some(token) => headers.push((AUTH_HEADER.to_string(), token.to_string())),
                None => tracing::debug!(
                    endpoint = %descriptor.endpoint,
                    "authenticated call without a session token"
                ),
            }
        }

        HttpRequest {
            method: descriptor.method,
            url: format!("{}{}", self.api_url, descriptor.endpoint.path()),
            headers,
            body: descriptor.body.encode(),
        }
    }

    /// Issue one call and classify its result. Never fails: transport errors
    /// become the generic failure payload.
    pub async fn perform(&self, descriptor: RequestDescriptor, session: &Session) -> Outcome {
        let request = self.build_request(&descriptor, session);
        tracing::debug!(method = %request.method, url = %request.url, "calling API");

        match self.transport.send(request).await {
            Ok(response) => {
                let outcome = classify(response.status, &response.body);
                tracing::debug!(
                    endpoint = %descriptor.endpoint,
                    status = response.status,
                    "response received"
                );
                if !outcome.is_success() {
                    tracing::warn!(
                        endpoint = %descriptor.endpoint,
                        status = response.status,
                        error_message = outcome.error_message().unwrap_or_default(),
                        "API call failed"
                    );
                }
                outcome
            }
            Err(err) => {
                tracing::warn!(endpoint = %descriptor.endpoint, error = %err, "API unreachable");
                Outcome::generic_failure()
            }
        }
    }

    /// [`ApiClient::perform`] that also drives a loading stage: `Loading`
    /// before the call, the terminal stage after it, on every path.
    pub async fn perform_tracked(
        &self,
        descriptor: RequestDescriptor,
        session: &Session,
        stage: &mut LoadingStage,
    ) -> Outcome {
        *stage = LoadingStage::Loading;
        let outcome = self.perform(descriptor, session).await;
        *stage = LoadingStage::from(&outcome);
        outcome
    }

    async fn perform_anonymous(&self, descriptor: RequestDescriptor) -> Outcome {
        self.perform(descriptor, &Session::default()).await
    }
}

/// JSON body from a request type. The request types are plain structs with
/// string keys, so conversion cannot fail.
fn json_body<T: Serialize>(value: &T) -> Body {
    Body::Json(serde_json::to_value(value).unwrap_or(Value::Null))
}

/// On success, take the `token` from the payload and establish `session`
/// from it. A token that does not decode turns the outcome into a failure
/// with no payload and leaves the session alone.
fn establish_session(session: &mut Session, outcome: Outcome) -> Outcome {
    if !outcome.is_success() {
        return outcome;
    }

    let Some(token) = outcome.str_field("token").map(str::to_string) else {
        tracing::warn!("sign-in response carries no token");
        return Outcome::Failure(Value::Null);
    };

    match session.establish_from_token(&token, OffsetDateTime::now_utc()) {
        Ok(()) => outcome,
        Err(err) => {
            tracing::warn!(error = %err, "could not decode sign-in token");
            Outcome::Failure(Value::Null)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::endpoint::Endpoint;
    use crate::error::TransportError;
    use crate::outcome::generic_failure_payload;
    use crate::request::Method;
    use serde_json::json;

    #[tokio::test]
    async fn url_joins_base_and_path() {
        let (client, transport) = client();
        transport.push_json(200, json!([]));
        client
            .perform(RequestDescriptor::get(Endpoint::Metrics), &Session::new())
            .await;
        let req = transport.last_request().unwrap();
        assert_eq!(req.url, "http://api.test/api/metric");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn auth_header_only_when_requested() {
        let (client, transport) = client();
        let session = signed_in();
        transport.push_json(200, json!({})).push_json(200, json!({}));

        client
            .perform(RequestDescriptor::get(Endpoint::Restaurants), &session)
            .await;
        client
            .perform(
                RequestDescriptor::get(Endpoint::Customer).authenticated(),
                &session,
            )
            .await;

        let requests = transport.requests();
        assert_eq!(requests[0].header(AUTH_HEADER), None);
        assert_eq!(requests[1].header(AUTH_HEADER), session.access_token());
    }

    #[tokio::test]
    async fn missing_token_sends_without_header() {
        let (client, transport) = client();
        transport.push_json(401, json!({"error": "not logged in"}));
        let outcome = client
            .perform(
                RequestDescriptor::get(Endpoint::Customer).authenticated(),
                &Session::new(),
            )
            .await;
        assert_eq!(transport.last_request().unwrap().header(AUTH_HEADER), None);
        assert_eq!(outcome, Outcome::Failure(json!({"error": "not logged in"})));
    }

    #[tokio::test]
    async fn transport_error_yields_generic_payload() {
        let (client, transport) = client();
        transport.push_error(TransportError::Timeout("30s".into()));
        let outcome = client
            .perform(RequestDescriptor::get(Endpoint::Metrics), &Session::new())
            .await;
        assert_eq!(outcome, Outcome::Failure(generic_failure_payload()));
    }

    #[tokio::test]
    async fn tracked_call_ends_in_terminal_stage() {
        let (client, transport) = client();
        transport.push_json(201, json!({})).push_json(500, json!({}));
        let mut stage = LoadingStage::NotAttempted;

        client
            .perform_tracked(
                RequestDescriptor::get(Endpoint::Metrics),
                &Session::new(),
                &mut stage,
            )
            .await;
        assert_eq!(stage, LoadingStage::Succeeded);

        client
            .perform_tracked(
                RequestDescriptor::get(Endpoint::Metrics),
                &Session::new(),
                &mut stage,
            )
            .await;
        assert_eq!(stage, LoadingStage::Failed);

        // exhausted script: unreachable server still ends in Failed
        client
            .perform_tracked(
                RequestDescriptor::get(Endpoint::Metrics),
                &Session::new(),
                &mut stage,
            )
            .await;
        assert_eq!(stage, LoadingStage::Failed);
    }

    #[test]
    fn establish_session_ignores_failures() {
        let mut session = Session::new();
        let failure = Outcome::Failure(json!({"errorMessage": "bad otp"}));
        assert_eq!(establish_session(&mut session, failure.clone()), failure);
        assert!(!session.is_logged_in());
    }

    #[test]
    fn establish_session_without_token_fails_silently() {
        let mut session = Session::new();
        let outcome = establish_session(&mut session, Outcome::Success(json!({"ok": true})));
        assert_eq!(outcome, Outcome::Failure(Value::Null));
        assert!(!session.is_logged_in());
    }
}
