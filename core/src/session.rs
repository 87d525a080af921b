//! Authentication state and request execution.
//!
//! # Design
//! A `Session` is an immutable snapshot. `login`, `relogin` and the `init_*`
//! constructors return a new `Session` instead of mutating one in place, and
//! every call is issued from a snapshot: the returned future owns a clone of
//! that snapshot's transport. A login that completes while earlier calls
//! are in flight therefore never redirects them, and a failed login leaves
//! the caller's existing snapshot untouched.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use reqwest::cookie::Jar;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::api::account;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::settings::ClientSettings;
use crate::transport::Transport;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Which authorization the session's transport carries.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// No token and no transport.
    Unauthenticated,
    /// `Authorization: Token <token>`.
    Token(String),
    /// `X-CSRFToken` plus the host page's cookies; no token held locally.
    HostDelegated,
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Unauthenticated => f.write_str("Unauthenticated"),
            AuthMode::Token(_) => f.write_str("Token(<redacted>)"),
            AuthMode::HostDelegated => f.write_str("HostDelegated"),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Clone)]
pub struct Session {
    server: String,
    credentials: Option<Credentials>,
    mode: AuthMode,
    transport: Option<Transport>,
    bare: Transport,
    settings: ClientSettings,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("server", &self.server)
            .field("credentials", &self.credentials)
            .field("mode", &self.mode)
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}

impl Session {
    /// Sets up a session from values obtained out of band. A transport is
    /// built only when both `server` and `token` are non-empty; no request
    /// is sent.
    pub fn init_with_token(
        server: &str,
        credentials: Option<Credentials>,
        token: Option<&str>,
        settings: Option<ClientSettings>,
    ) -> Result<Self, ApiError> {
        let settings = settings.unwrap_or_default();
        let bare = Transport::bare(&settings)?;
        match token.filter(|t| !t.is_empty()) {
            Some(token) if !server.is_empty() => {
                let transport = Transport::with_token(&settings, token)?;
                Ok(Self {
                    server: server.to_string(),
                    credentials,
                    mode: AuthMode::Token(token.to_string()),
                    transport: Some(transport),
                    bare,
                    settings,
                })
            }
            _ => Ok(Self {
                server: server.to_string(),
                credentials,
                mode: AuthMode::Unauthenticated,
                transport: None,
                bare,
                settings,
            }),
        }
    }

    /// Sets up a session for a client embedded in the service's own web
    /// pages. One trailing `/` is stripped from `site_root`. Requests carry
    /// `X-CSRFToken` and whatever cookies `cookies` holds; a fresh jar is
    /// used when none is given.
    pub fn init_for_host_delegated(
        site_root: &str,
        csrf_token: &str,
        cookies: Option<Arc<Jar>>,
        settings: Option<ClientSettings>,
    ) -> Result<Self, ApiError> {
        let settings = settings.unwrap_or_default();
        let server = site_root.strip_suffix('/').unwrap_or(site_root).to_string();
        let jar = cookies.unwrap_or_default();
        let transport = Transport::with_csrf(&settings, csrf_token, jar)?;
        Ok(Self {
            server,
            credentials: None,
            mode: AuthMode::HostDelegated,
            transport: Some(transport),
            bare: Transport::bare(&settings)?,
            settings,
        })
    }

    /// Exchanges credentials for a token and returns a token-authenticated
    /// session. A 4xx rejection surfaces as `ApiError::Auth`; a 5xx stays
    /// `ApiError::Response`.
    pub async fn login(
        server: &str,
        username: &str,
        password: &str,
        settings: Option<ClientSettings>,
    ) -> Result<Self, ApiError> {
        let settings = settings.unwrap_or_default();
        let bare = Transport::bare(&settings)?;
        let credentials = Credentials::new(username, password);
        let token = exchange_token(&bare, server, &credentials).await?;
        let transport = Transport::with_token(&settings, &token)?;
        Ok(Self {
            server: server.to_string(),
            credentials: Some(credentials),
            mode: AuthMode::Token(token),
            transport: Some(transport),
            bare,
            settings,
        })
    }

    /// Repeats the login exchange with the stored credentials. `self` is
    /// left as it was whatever the outcome.
    pub async fn relogin(&self) -> Result<Self, ApiError> {
        let credentials = self
            .credentials
            .clone()
            .ok_or(ApiError::MissingCredentials)?;
        let token = exchange_token(&self.bare, &self.server, &credentials).await?;
        let transport = Transport::with_token(&self.settings, &token)?;
        Ok(Self {
            server: self.server.clone(),
            credentials: Some(credentials),
            mode: AuthMode::Token(token),
            transport: Some(transport),
            bare: self.bare.clone(),
            settings: self.settings.clone(),
        })
    }

    /// Checks that the current token or host session is still accepted.
    /// A failure means the caller should authenticate again.
    pub async fn ping(&self) -> Result<HttpResponse, ApiError> {
        self.execute(&account::auth_ping()).await
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn mode(&self) -> &AuthMode {
        &self.mode
    }

    pub fn token(&self) -> Option<&str> {
        match &self.mode {
            AuthMode::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The authenticated transport, absent until a token or host context
    /// is configured.
    pub fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    /// Stores a cookie for the server in the host-delegated cookie jar,
    /// typically the service's `sessionid`.
    pub fn add_cookie(&self, cookie: &str) -> Result<(), ApiError> {
        let jar = self
            .transport
            .as_ref()
            .and_then(Transport::cookie_jar)
            .ok_or(ApiError::NotInitialized)?;
        let url = url::Url::parse(&self.server).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        jar.add_cookie_str(cookie, &url);
        Ok(())
    }

    /// Creates a token for a cancellable call such as a search. Call
    /// `cancel()` on it (or a clone) to abort the call.
    pub fn cancel_source(&self) -> CancellationToken {
        CancellationToken::new()
    }

    /// Builds the request `endpoint` describes against this server.
    pub fn request(&self, endpoint: &Endpoint) -> HttpRequest {
        endpoint.build(&self.server)
    }

    /// Issues `endpoint`. The request and transport are captured now; the
    /// returned future does not borrow the session.
    pub fn execute(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send + 'static {
        self.issue(endpoint, None)
    }

    /// Like `execute`, failing with `ApiError::Cancelled` once `cancel`
    /// fires.
    pub fn execute_cancellable(
        &self,
        endpoint: &Endpoint,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send + 'static {
        self.issue(endpoint, Some(cancel.clone()))
    }

    fn issue(
        &self,
        endpoint: &Endpoint,
        cancel: Option<CancellationToken>,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send + 'static {
        let request = self.request(endpoint);
        let transport = if request.anonymous {
            Ok(self.bare.clone())
        } else {
            self.transport.clone().ok_or(ApiError::NotInitialized)
        };
        async move { transport?.send(&request, cancel).await }
    }
}

async fn exchange_token(
    bare: &Transport,
    server: &str,
    credentials: &Credentials,
) -> Result<String, ApiError> {
    log::debug!("requesting auth token for {}", credentials.username);
    let request = account::auth_token(&credentials.username, &credentials.password).build(server);

    let response = bare.send(&request, None).await.map_err(|e| match e {
        ApiError::Response { status, body } if (400..500).contains(&status) => {
            ApiError::Auth { status, body }
        }
        other => other,
    })?;
    let TokenResponse { token } = response.json()?;
    log::debug!("auth token issued for {}", credentials.username);
    Ok(token)
}
