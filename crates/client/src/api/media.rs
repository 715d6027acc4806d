//! Image uploads, payments and public metrics.

use serde::{Deserialize, Serialize};

use super::{json_body, ApiClient};
use crate::endpoint::{Endpoint, UploadImageKind};
use crate::outcome::Outcome;
use crate::request::{Body, MultipartForm, RequestDescriptor};
use crate::session::Session;

/// File name for the `image` part. The backend picks the stored name.
const UPLOAD_FILENAME: &str = "blob";

/// An image to upload. The optional extension is sent as its own text part.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub kind: UploadImageKind,
    pub file_extension: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, mime_type: &str, kind: UploadImageKind) -> Self {
        ImageUpload {
            bytes,
            mime_type: mime_type.to_string(),
            kind,
            file_extension: None,
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.file_extension = Some(extension.to_string());
        self
    }

    fn form(&self) -> MultipartForm {
        let form = MultipartForm::new().file(
            "image",
            UPLOAD_FILENAME,
            &self.mime_type,
            self.bytes.clone(),
        );
        match &self.file_extension {
            Some(ext) => form.text("fileExtension", ext),
            None => form,
        }
    }
}

/// Card payment tokenized by the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub nonce: String,
    pub buyer_verification_token: String,
    pub total: f64,
}

impl ApiClient {
    /// POST `/api/upload_image_url` for items, `/api/recipient/upload-id`
    /// for recipient ids. Only the latter carries the session token.
    ///
    /// A successful payload carries the stored `file_name`.
    pub async fn upload_image(&self, session: &Session, upload: &ImageUpload) -> Outcome {
        let mut descriptor = RequestDescriptor::post(
            Endpoint::UploadImage(upload.kind),
            Body::Multipart(upload.form()),
        );
        if upload.kind == UploadImageKind::Id {
            descriptor = descriptor.authenticated();
        }
        self.perform(descriptor, session).await
    }

    /// GET `/api/metric`
    pub async fn metrics(&self) -> Outcome {
        self.perform_anonymous(RequestDescriptor::get(Endpoint::Metrics))
            .await
    }

    /// POST `/api/payment`
    pub async fn send_payment(&self, payment: &Payment) -> Outcome {
        self.perform_anonymous(RequestDescriptor::post(Endpoint::Payment, json_body(payment)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client, signed_in};
    use super::*;
    use crate::request::MULTIPART_BOUNDARY;
    use serde_json::json;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[tokio::test]
    async fn item_upload_is_anonymous_multipart() {
        let (client, transport) = client();
        transport.push_json(200, json!({"file_name": "f0e1.png"}));

        let upload = ImageUpload::new(vec![0x89, b'P', b'N', b'G'], "image/png", UploadImageKind::Item)
            .with_extension("png");
        let outcome = client.upload_image(&signed_in(), &upload).await;

        assert_eq!(outcome.str_field("file_name"), Some("f0e1.png"));
        let req = transport.last_request().unwrap();
        assert_eq!(req.url, "http://api.test/api/upload_image_url");
        assert_eq!(req.header("AUTH_TOKEN"), None);
        assert_eq!(
            req.header("Content-Type"),
            Some(format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY).as_str())
        );
        let body = req.body.unwrap();
        assert!(contains(&body, b"name=\"image\"; filename=\"blob\""));
        assert!(contains(&body, b"Content-Type: image/png"));
        assert!(contains(&body, b"name=\"fileExtension\"\r\n\r\npng\r\n"));
    }

    #[tokio::test]
    async fn id_upload_is_authenticated_and_extension_optional() {
        let (client, transport) = client();
        transport.push_json(200, json!({"file_name": "id.jpeg"}));
        let session = signed_in();

        let upload = ImageUpload::new(vec![1, 2, 3], "image/jpeg", UploadImageKind::Id);
        client.upload_image(&session, &upload).await;

        let req = transport.last_request().unwrap();
        assert_eq!(req.url, "http://api.test/api/recipient/upload-id");
        assert_eq!(req.header("AUTH_TOKEN"), session.access_token());
        assert!(!contains(&req.body.unwrap(), b"fileExtension"));
    }

    #[tokio::test]
    async fn payment_goes_to_payment_route() {
        let (client, transport) = client();
        transport.push_json(201, json!({"status": "COMPLETED"}));
        let outcome = client
            .send_payment(&Payment {
                nonce: "cnon:abc".into(),
                buyer_verification_token: "verf:1".into(),
                total: 25.0,
            })
            .await;
        assert!(outcome.is_success());
        let req = transport.last_request().unwrap();
        assert_eq!(req.url, "http://api.test/api/payment");
        assert_eq!(
            req.json_body(),
            Some(json!({"nonce": "cnon:abc", "buyerVerificationToken": "verf:1", "total": 25.0}))
        );
    }

    #[tokio::test]
    async fn metrics_failure_without_body_is_generic() {
        let (client, transport) = client();
        transport.push_raw(503, b"");
        let outcome = client.metrics().await;
        assert_eq!(outcome, Outcome::generic_failure());
    }
}
