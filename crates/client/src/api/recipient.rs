//! Recipient calls. All require a signed-in recipient.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ApiClient;
use crate::endpoint::Endpoint;
use crate::outcome::Outcome;
use crate::request::{Body, RequestDescriptor};
use crate::session::Session;

/// Answers to the recipient questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientResponses {
    pub status: String,
    pub resp1: String,
    pub resp2: String,
    pub resp3: String,
}

impl ApiClient {
    /// GET `/api/recipient/approval`
    pub async fn recipient_approval_status(&self, session: &Session) -> Outcome {
        self.perform(
            RequestDescriptor::get(Endpoint::RecipientApproval).authenticated(),
            session,
        )
        .await
    }

    /// GET `/api/recipient/credits`
    pub async fn recipient_credits(&self, session: &Session) -> Outcome {
        self.perform(
            RequestDescriptor::get(Endpoint::RecipientCredits).authenticated(),
            session,
        )
        .await
    }

    /// GET `/api/recipient/orders`
    pub async fn recipient_orders(&self, session: &Session) -> Outcome {
        self.perform(
            RequestDescriptor::get(Endpoint::RecipientOrders).authenticated(),
            session,
        )
        .await
    }

    /// GET `/api/recipient/responses`
    pub async fn recipient_responses(&self, session: &Session) -> Outcome {
        self.perform(
            RequestDescriptor::get(Endpoint::RecipientResponses).authenticated(),
            session,
        )
        .await
    }

    /// POST `/api/recipient/responses`
    pub async fn submit_recipient_responses(
        &self,
        session: &Session,
        responses: &RecipientResponses,
    ) -> Outcome {
        let body = Body::Json(json!({ "responses": responses }));
        self.perform(
            RequestDescriptor::post(Endpoint::RecipientResponses, body).authenticated(),
            session,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client, signed_in};
    use super::*;
    use crate::request::Method;

    #[tokio::test]
    async fn responses_are_wrapped() {
        let (client, transport) = client();
        transport.push_json(200, json!({}));
        client
            .submit_recipient_responses(
                &signed_in(),
                &RecipientResponses {
                    status: "submitted".into(),
                    resp1: "a".into(),
                    resp2: "b".into(),
                    resp3: "c".into(),
                },
            )
            .await;

        let req = transport.last_request().unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(
            req.json_body(),
            Some(json!({"responses": {"status": "submitted", "resp1": "a", "resp2": "b", "resp3": "c"}}))
        );
    }

    #[tokio::test]
    async fn reads_are_authenticated_gets() {
        let (client, transport) = client();
        let session = signed_in();
        for _ in 0..4 {
            transport.push_json(200, json!({}));
        }
        client.recipient_approval_status(&session).await;
        client.recipient_credits(&session).await;
        client.recipient_orders(&session).await;
        client.recipient_responses(&session).await;

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/api/recipient/approval",
                "http://api.test/api/recipient/credits",
                "http://api.test/api/recipient/orders",
                "http://api.test/api/recipient/responses",
            ]
        );
        assert!(transport
            .requests()
            .iter()
            .all(|r| r.method == Method::Get && r.header("AUTH_TOKEN").is_some()));
    }
}
