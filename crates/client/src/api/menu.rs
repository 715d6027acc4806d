//! Menu management for restaurant accounts.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ApiClient;
use crate::endpoint::Endpoint;
use crate::outcome::Outcome;
use crate::request::{Body, RequestDescriptor};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub base_cost: f64,
    pub category: String,
}

impl MenuItem {
    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl ApiClient {
    /// GET `/api/menu/{restaurant_id}`
    pub async fn menu_items(&self, session: &Session, restaurant_id: &str) -> Outcome {
        let endpoint = Endpoint::Menu {
            restaurant_id: restaurant_id.to_string(),
        };
        self.perform(RequestDescriptor::get(endpoint).authenticated(), session)
            .await
    }

    /// POST `/api/menu/add`
    pub async fn add_menu_item(&self, session: &Session, item: &MenuItem) -> Outcome {
        let body = Body::Json(json!({ "menu_item": item.to_value() }));
        self.perform(
            RequestDescriptor::post(Endpoint::AddMenuItem, body).authenticated(),
            session,
        )
        .await
    }

    /// PUT `/api/menu/update`
    ///
    /// Replaces the item. Customizations are always sent empty.
    pub async fn update_menu_item(
        &self,
        session: &Session,
        menu_item_id: i64,
        item: &MenuItem,
        available: bool,
    ) -> Outcome {
        let mut updated = item.to_value();
        if let Value::Object(fields) = &mut updated {
            fields.insert("customizations".into(), json!([]));
            fields.insert("available".into(), Value::Bool(available));
        }
        let body = Body::Json(json!({
            "menu_item_id": menu_item_id,
            "updated_menu_item": updated,
        }));
        self.perform(
            RequestDescriptor::put(Endpoint::UpdateMenuItem, body).authenticated(),
            session,
        )
        .await
    }

    /// POST `/api/menu/delete`
    pub async fn delete_menu_item(&self, session: &Session, menu_item_id: i64) -> Outcome {
        let body = Body::Json(json!({ "menu_item_id": menu_item_id }));
        self.perform(
            RequestDescriptor::post(Endpoint::DeleteMenuItem, body).authenticated(),
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

    fn soup() -> MenuItem {
        MenuItem {
            name: "Soup".into(),
            description: "Lentil".into(),
            image_url: "soup.png".into(),
            base_cost: 8.0,
            category: "Mains".into(),
        }
    }

    #[tokio::test]
    async fn add_wraps_item() {
        let (client, transport) = client();
        transport.push_json(200, json!({}));
        client.add_menu_item(&signed_in(), &soup()).await;
        assert_eq!(
            transport.last_request().unwrap().json_body(),
            Some(json!({"menu_item": {
                "name": "Soup",
                "description": "Lentil",
                "imageUrl": "soup.png",
                "baseCost": 8.0,
                "category": "Mains"
            }}))
        );
    }

    #[tokio::test]
    async fn update_adds_customizations_and_availability() {
        let (client, transport) = client();
        transport.push_json(200, json!({}));
        client.update_menu_item(&signed_in(), 12, &soup(), false).await;

        let req = transport.last_request().unwrap();
        assert_eq!(req.method, Method::Put);
        let body = req.json_body().unwrap();
        assert_eq!(body["menu_item_id"], json!(12));
        assert_eq!(body["updated_menu_item"]["customizations"], json!([]));
        assert_eq!(body["updated_menu_item"]["available"], json!(false));
        assert_eq!(body["updated_menu_item"]["imageUrl"], json!("soup.png"));
    }

    #[tokio::test]
    async fn delete_is_a_post() {
        let (client, transport) = client();
        transport.push_json(200, json!({}));
        client.delete_menu_item(&signed_in(), 4).await;
        let req = transport.last_request().unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url, "http://api.test/api/menu/delete");
        assert_eq!(req.json_body(), Some(json!({"menu_item_id": 4})));
    }
}
