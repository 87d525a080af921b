//! The HTTP sender behind a session.
//!
//! # Design
//! A `Transport` wraps a `reqwest::Client` whose default headers carry the
//! session's authorization (`Authorization: Token ...` or `X-CSRFToken`).
//! Cloning is cheap and shares the connection pool, so each issued call
//! keeps the transport it was built with even if the caller logs in again
//! meanwhile.
//!
//! Cancellation is cooperative: `send` races the request against a
//! `CancellationToken` and drops the in-flight request future when the token
//! fires, which lets reqwest abort the connection.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::http::{FormPart, HttpRequest, HttpResponse, RequestBody};
use crate::settings::ClientSettings;

#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    default_headers: HeaderMap,
    cookies: Option<Arc<Jar>>,
}

impl Transport {
    /// A transport with no default auth headers.
    pub fn bare(settings: &ClientSettings) -> Result<Self, ApiError> {
        Self::build(settings, HeaderMap::new(), None)
    }

    /// A transport sending `Authorization: Token <token>` on every request.
    pub fn with_token(settings: &ClientSettings, token: &str) -> Result<Self, ApiError> {
        let mut value = HeaderValue::from_str(&format!("Token {token}"))?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::AUTHORIZATION, value);
        Self::build(settings, headers, None)
    }

    /// A transport sending `X-CSRFToken` and the cookies held in `jar`.
    pub fn with_csrf(
        settings: &ClientSettings,
        csrf_token: &str,
        jar: Arc<Jar>,
    ) -> Result<Self, ApiError> {
        let mut value = HeaderValue::from_str(csrf_token)?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-csrftoken"), value);
        Self::build(settings, headers, Some(jar))
    }

    fn build(
        settings: &ClientSettings,
        default_headers: HeaderMap,
        cookies: Option<Arc<Jar>>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(default_headers.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if settings.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(jar) = &cookies {
            builder = builder.cookie_provider(Arc::clone(jar));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            client,
            default_headers,
            cookies,
        })
    }

    /// Value of a header this transport adds to every request.
    pub fn default_header(&self, name: &str) -> Option<&str> {
        self.default_headers
            .get(name)
            .and_then(|v| v.to_str().ok())
    }

    /// The cookie jar used in host-delegated mode.
    pub fn cookie_jar(&self) -> Option<&Arc<Jar>> {
        self.cookies.as_ref()
    }

    /// Sends `request`. Non-2xx responses become `ApiError::Response`.
    ///
    /// When `cancel` fires before the call settles, the result is
    /// `ApiError::Cancelled`, including when it was already cancelled.
    pub async fn send(
        &self,
        request: &HttpRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<HttpResponse, ApiError> {
        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        log::debug!("{} {} cancelled", request.method.as_str(), request.route);
                        Err(ApiError::Cancelled)
                    }
                    result = self.dispatch(request) => result,
                }
            }
            None => self.dispatch(request).await,
        }
    }

    async fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method.as_str(), request.route);

        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            None => builder,
            Some(RequestBody::Json(value)) => builder.body(serde_json::to_vec(value)?),
            Some(RequestBody::Multipart(parts)) => builder.multipart(form(parts)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        if !(200..300).contains(&status) {
            log::debug!("{} {} -> {status}", request.method.as_str(), request.route);
            return Err(ApiError::Response {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn form(parts: &[FormPart]) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File { name, blob } => {
                let mut file = Part::bytes(blob.bytes.clone()).file_name(blob.file_name.clone());
                if let Some(content_type) = &blob.content_type {
                    file = file.mime_str(content_type)?;
                }
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_transport_carries_authorization_header() {
        let transport = Transport::with_token(&ClientSettings::default(), "abc123").unwrap();
        assert_eq!(transport.default_header("authorization"), Some("Token abc123"));
        assert!(transport.cookie_jar().is_none());
    }

    #[test]
    fn csrf_transport_carries_csrf_header_and_jar() {
        let jar = Arc::new(Jar::default());
        let transport =
            Transport::with_csrf(&ClientSettings::default(), "csrf-1", Arc::clone(&jar)).unwrap();
        assert_eq!(transport.default_header("X-CSRFToken"), Some("csrf-1"));
        assert_eq!(transport.default_header("authorization"), None);
        assert!(transport.cookie_jar().is_some());
    }

    #[test]
    fn bare_transport_has_no_auth_headers() {
        let transport = Transport::bare(&ClientSettings::default()).unwrap();
        assert_eq!(transport.default_header("authorization"), None);
        assert_eq!(transport.default_header("x-csrftoken"), None);
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = Transport::with_token(&ClientSettings::default(), "bad\ntoken").unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn already_cancelled_token_fails_without_sending() {
        let transport = Transport::bare(&ClientSettings::default()).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        // Port 9 (discard) is never contacted because the token wins the race.
        let request = HttpRequest {
            method: crate::http::HttpMethod::Get,
            url: "http://127.0.0.1:9/api2/search/".to_string(),
            headers: Vec::new(),
            body: None,
            anonymous: false,
            route: "/api2/search/".to_string(),
        };
        let err = transport.send(&request, Some(token)).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
