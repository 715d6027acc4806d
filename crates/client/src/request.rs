//! Request descriptors and body encoding.

use std::fmt;

use crate::endpoint::Endpoint;

/// Boundary used for every multipart body. Never appears in JSON or in the
/// text parts this client builds.
pub const MULTIPART_BOUNDARY: &str = "openmeal-boundary-7f3a9c1e";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Parse a method name, case-insensitively.
    pub fn parse(s: &str) -> Option<Method> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Multipart,
}

impl ContentType {
    /// Value for the `Content-Type` header.
    pub fn header_value(&self) -> String {
        match self {
            ContentType::Json => "application/json".to_string(),
            ContentType::Multipart => {
                format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    File {
        name: String,
        filename: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
    Text {
        name: String,
        value: String,
    },
}

/// A `multipart/form-data` body, parts kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, filename: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(Part::File {
            name: name.to_string(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        });
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(Part::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Encode with [`MULTIPART_BOUNDARY`].
    pub fn encode(&self) -> Vec<u8> {
        let boundary = MULTIPART_BOUNDARY;
        let mut body: Vec<u8> = Vec::new();

        for part in &self.parts {
            match part {
                Part::File {
                    name,
                    filename,
                    mime_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {mime_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!(
                            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                        )
                        .as_bytes(),
                    );
                }
            }
        }

        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

impl Body {
    pub fn content_type(&self) -> ContentType {
        match self {
            Body::Multipart(_) => ContentType::Multipart,
            Body::Empty | Body::Json(_) => ContentType::Json,
        }
    }

    /// Bytes to put on the wire; `None` for an empty body.
    pub fn encode(&self) -> Option<Vec<u8>> {
        match self {
            Body::Empty => None,
            Body::Json(value) => Some(value.to_string().into_bytes()),
            Body::Multipart(form) => Some(form.encode()),
        }
    }
}

/// Everything needed to issue one backend call. Built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub endpoint: Endpoint,
    pub method: Method,
    pub needs_auth: bool,
    pub body: Body,
}

impl RequestDescriptor {
    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(endpoint, Method::Get, Body::Empty)
    }

    pub fn delete(endpoint: Endpoint) -> Self {
        Self::new(endpoint, Method::Delete, Body::Empty)
    }

    pub fn post(endpoint: Endpoint, body: Body) -> Self {
        Self::new(endpoint, Method::Post, body)
    }

    pub fn put(endpoint: Endpoint, body: Body) -> Self {
        Self::new(endpoint, Method::Put, body)
    }

    fn new(endpoint: Endpoint, method: Method, body: Body) -> Self {
        RequestDescriptor {
            endpoint,
            method,
            needs_auth: false,
            body,
        }
    }

    /// Mark the request as carrying the session token.
    pub fn authenticated(mut self) -> Self {
        self.needs_auth = true;
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.body.content_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!(Method::parse("delete"), Some(Method::Delete));
        assert_eq!(Method::parse("Put"), Some(Method::Put));
        assert_eq!(Method::parse("PATCH"), None);
    }

    #[test]
    fn multipart_encoding_layout() {
        let form = MultipartForm::new()
            .file("image", "blob", "application/octet-stream", vec![1, 2, 3])
            .text("fileExtension", "png");
        let encoded = form.encode();

        let mut expected = Vec::new();
        expected.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"blob\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                b = MULTIPART_BOUNDARY
            )
            .as_bytes(),
        );
        expected.extend_from_slice(&[1, 2, 3]);
        expected.extend_from_slice(
            format!(
                "\r\n--{b}\r\nContent-Disposition: form-data; name=\"fileExtension\"\r\n\r\npng\r\n--{b}--\r\n",
                b = MULTIPART_BOUNDARY
            )
            .as_bytes(),
        );
        assert_eq!(encoded, expected);
    }

    #[test]
    fn content_type_follows_body() {
        let json = RequestDescriptor::post(Endpoint::Login, Body::Json(json!({})));
        assert_eq!(json.content_type(), ContentType::Json);

        let form = RequestDescriptor::post(
            Endpoint::UploadImage(crate::UploadImageKind::Item),
            Body::Multipart(MultipartForm::new()),
        );
        assert_eq!(form.content_type(), ContentType::Multipart);
        assert!(form
            .content_type()
            .header_value()
            .ends_with(MULTIPART_BOUNDARY));
    }

    #[test]
    fn empty_body_encodes_to_none() {
        assert_eq!(Body::Empty.encode(), None);
        assert_eq!(
            Body::Json(json!({"a": 1})).encode(),
            Some(br#"{"a":1}"#.to_vec())
        );
    }

    #[test]
    fn authenticated_sets_flag() {
        let req = RequestDescriptor::get(Endpoint::Customer).authenticated();
        assert!(req.needs_auth);
        assert_eq!(req.method, Method::Get);
    }
}
