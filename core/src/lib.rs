//! Async client core for the Seafile file-sync and sharing service.
//!
//! # Overview
//! The crate turns logical calls (list a directory, create a share link,
//! upload a file) into HTTP requests against a Seafile server and hands the
//! raw responses back. It does not model response payloads; callers parse
//! the bytes with `HttpResponse::json` into whatever shape they need.
//!
//! # Design
//! - `api::*` functions are pure: each returns an `Endpoint` describing the
//!   verb, path, query and body of one server operation.
//! - `Endpoint::build` is the only place requests are assembled, so query
//!   encoding, optional-field omission and body shape are uniform.
//! - `Session` is an immutable authentication snapshot. `login` returns a
//!   new snapshot; in-flight calls keep the transport they were issued with.
//! - `Transport` wraps a `reqwest::Client` with the session's default
//!   headers and is the single I/O boundary.
//! - Cancellation uses `CancellationToken`; a cancelled call fails with
//!   `ApiError::Cancelled`, distinct from network failures.
//!
//! ```no_run
//! use seafile_core::{api::repos, Session};
//!
//! # async fn run() -> Result<(), seafile_core::ApiError> {
//! let session = Session::login("https://cloud.example.com", "a@x.com", "secret", None).await?;
//! let response = session.execute(&repos::list_repos(&["mine"])).await?;
//! let repos: serde_json::Value = response.json()?;
//! # let _ = repos;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod encoding;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod session;
pub mod settings;
pub mod transport;

pub use endpoint::{BodyKind, Endpoint};
pub use error::ApiError;
pub use http::{Blob, FormPart, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use session::{AuthMode, Credentials, Session};
pub use settings::ClientSettings;
pub use tokio_util::sync::CancellationToken;
pub use transport::Transport;
