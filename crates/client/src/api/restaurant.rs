//! Restaurant listing and order lifecycle calls.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{json_body, ApiClient};
use crate::endpoint::{Endpoint, OrderFilter};
use crate::outcome::Outcome;
use crate::request::{Body, RequestDescriptor};
use crate::session::Session;

/// Pickup slot chosen by the recipient. `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickupTime {
    pub text: String,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub amount: f64,
    /// Menu items as the restaurant's menu returned them.
    pub meal_items: Vec<Value>,
    #[serde(rename = "pickupTime")]
    pub pickup_time: PickupTime,
    #[serde(rename = "useExtraCredit")]
    pub use_extra_credit: bool,
}

impl ApiClient {
    /// GET `/api/restaurant`
    pub async fn restaurants(&self) -> Outcome {
        self.perform_anonymous(RequestDescriptor::get(Endpoint::Restaurants))
            .await
    }

    /// GET `/api/restaurant/{id}`
    pub async fn restaurant(&self, session: &Session, id: &str) -> Outcome {
        let endpoint = Endpoint::Restaurant { id: id.to_string() };
        self.perform(RequestDescriptor::get(endpoint).authenticated(), session)
            .await
    }

    /// GET `/api/restaurant/id`, the restaurant owned by the signed-in user.
    pub async fn restaurant_id(&self, session: &Session) -> Outcome {
        self.perform(
            RequestDescriptor::get(Endpoint::RestaurantId).authenticated(),
            session,
        )
        .await
    }

    /// GET `/api/restaurant/{id}/active` or `/api/restaurant/{id}/inactive`
    pub async fn restaurant_orders(
        &self,
        session: &Session,
        id: &str,
        filter: OrderFilter,
    ) -> Outcome {
        let endpoint = Endpoint::RestaurantOrders {
            id: id.to_string(),
            filter,
        };
        self.perform(RequestDescriptor::get(endpoint).authenticated(), session)
            .await
    }

    /// POST `/api/restaurant/{id}/order`
    pub async fn create_order(
        &self,
        session: &Session,
        restaurant_id: &str,
        order: &OrderRequest,
    ) -> Outcome {
        let endpoint = Endpoint::CreateOrder {
            restaurant_id: restaurant_id.to_string(),
        };
        self.perform(
            RequestDescriptor::post(endpoint, json_body(order)).authenticated(),
            session,
        )
        .await
    }

    /// POST `/api/restaurant/{rid}/order/{oid}` with the pickup code the
    /// recipient presented.
    pub async fn complete_order(
        &self,
        session: &Session,
        restaurant_id: &str,
        order_id: &str,
        pickup_code: &str,
    ) -> Outcome {
        let endpoint = Endpoint::CompleteOrder {
            restaurant_id: restaurant_id.to_string(),
            order_id: order_id.to_string(),
        };
        let body = Body::Json(json!({ "pickup_code": pickup_code }));
        self.perform(RequestDescriptor::post(endpoint, body).authenticated(), session)
            .await
    }

    /// DELETE `/api/restaurant/cancel/{id}`
    pub async fn cancel_order(&self, session: &Session, order_id: &str) -> Outcome {
        let endpoint = Endpoint::CancelOrder {
            order_id: order_id.to_string(),
        };
        self.perform(RequestDescriptor::delete(endpoint).authenticated(), session)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client, signed_in};
    use super::*;
    use crate::request::Method;

    #[tokio::test]
    async fn order_body_uses_mixed_backend_keys() {
        let (client, transport) = client();
        transport.push_json(200, json!({"pickupCode": "A1B2"}));

        let order = OrderRequest {
            amount: 12.5,
            meal_items: vec![json!({"name": "Soup", "baseCost": 12.5})],
            pickup_time: PickupTime {
                text: "5:30 PM".into(),
                timestamp: Some(1_700_000_000_000),
            },
            use_extra_credit: false,
        };
        let outcome = client.create_order(&signed_in(), "7", &order).await;

        assert_eq!(outcome.str_field("pickupCode"), Some("A1B2"));
        let req = transport.last_request().unwrap();
        assert_eq!(req.url, "http://api.test/api/restaurant/7/order");
        assert_eq!(
            req.json_body(),
            Some(json!({
                "amount": 12.5,
                "meal_items": [{"name": "Soup", "baseCost": 12.5}],
                "pickupTime": {"text": "5:30 PM", "timestamp": 1_700_000_000_000i64},
                "useExtraCredit": false
            }))
        );
    }

    #[tokio::test]
    async fn complete_and_cancel() {
        let (client, transport) = client();
        let session = signed_in();
        transport.push_json(200, json!({})).push_json(200, json!({}));

        client.complete_order(&session, "7", "99", "A1B2").await;
        client.cancel_order(&session, "99").await;

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://api.test/api/restaurant/7/order/99");
        assert_eq!(requests[0].json_body(), Some(json!({"pickup_code": "A1B2"})));
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].url, "http://api.test/api/restaurant/cancel/99");
        assert_eq!(requests[1].body, None);
    }

    #[tokio::test]
    async fn public_listing_needs_no_session() {
        let (client, transport) = client();
        transport.push_json(200, json!([{"id": 1, "name": "Cafe"}]));
        let outcome = client.restaurants().await;
        assert_eq!(outcome.payload(), &json!([{"id": 1, "name": "Cafe"}]));
        assert_eq!(transport.last_request().unwrap().header("AUTH_TOKEN"), None);
    }

    #[tokio::test]
    async fn orders_filter_picks_route() {
        let (client, transport) = client();
        transport.push_json(200, json!([]));
        client
            .restaurant_orders(&signed_in(), "3", OrderFilter::Active)
            .await;
        assert_eq!(
            transport.last_request().unwrap().url,
            "http://api.test/api/restaurant/3/active"
        );
    }
}
