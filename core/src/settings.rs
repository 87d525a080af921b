use serde::{Deserialize, Serialize};

/// Behaviour of the HTTP clients a session builds. Fixed once the session
/// exists; a new login builds new clients from the same settings.
///
/// ```
/// # use seafile_core::ClientSettings;
/// let settings: ClientSettings = serde_json::from_str(r#"{"timeoutSecs": 30}"#).unwrap();
/// assert_eq!(settings.timeout_secs, Some(30));
/// assert_eq!(settings.user_agent, ClientSettings::default().user_agent);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
    /// Skip TLS certificate validation, for self-hosted test servers.
    pub accept_invalid_certs: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: concat!("seafile-core/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            accept_invalid_certs: false,
        }
    }
}
