//! HTTP request and response types described as plain data.
//!
//! # Design
//! The request builder produces `HttpRequest` values without touching the
//! network, so every encoding rule can be checked in isolation. The
//! `Transport` is the only place that turns an `HttpRequest` into I/O and an
//! `HttpResponse` back into data.
//!
//! Response bodies are kept as raw bytes. The client never interprets a
//! payload; `text` and `json` are conveniences for the caller.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Binary content attached to a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A single part of a multipart form. Repeated names are allowed and sent
/// in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, blob: Blob },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `multipart/form-data`; the boundary is chosen by the transport.
    Multipart(Vec<FormPart>),
    /// `application/json` object.
    Json(serde_json::Value),
}

impl RequestBody {
    /// All text values sent under `name`, in order.
    pub fn form_values(&self, name: &str) -> Vec<&str> {
        match self {
            RequestBody::Multipart(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
                    _ => None,
                })
                .collect(),
            RequestBody::Json(_) => Vec::new(),
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is fully qualified. `headers` holds only per-request headers; the
/// session's auth header lives on the transport that sends it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    /// Sent without the session's auth headers (upload/download links).
    pub anonymous: bool,
    /// What the transport logs: the unfilled path template for server
    /// endpoints, the origin for absolute links. Holds no ids, share tokens
    /// or query values.
    pub route: String,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First header value matching `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response("{}");
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn json_body_decodes() {
        let value: serde_json::Value = response(r#"{"email":"a@b.c"}"#).json().unwrap();
        assert_eq!(value["email"], "a@b.c");
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        let err = response("pong").json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }

    #[test]
    fn form_values_keeps_repeated_keys_in_order() {
        let body = RequestBody::Multipart(vec![
            FormPart::Text { name: "username".into(), value: "a".into() },
            FormPart::Text { name: "permission".into(), value: "r".into() },
            FormPart::Text { name: "username".into(), value: "b".into() },
        ]);
        assert_eq!(body.form_values("username"), vec!["a", "b"]);
        assert!(RequestBody::Json(serde_json::json!({})).form_values("username").is_empty());
    }
}
