//! A small fake of the Seafile web API used by the client's integration
//! tests. It implements just enough of the auth model (tokens, CSRF plus
//! session cookie) and a handful of routes that echo what they received so
//! tests can assert on the wire format.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Multipart, Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const USERNAME: &str = "alice@example.com";
pub const PASSWORD: &str = "secret";
pub const CSRF_TOKEN: &str = "csrf-test-token";
/// Identity reported for requests authenticated by CSRF token and cookie.
pub const HOST_USER: &str = "host@example.com";
/// Logging in as this user answers 503, as a server behind a failed proxy.
pub const OUTAGE_USER: &str = "outage@example.com";
pub const FILE_CONTENT: &[u8] = b"hello from seafile";
/// How long `/api2/search/` stalls before answering.
pub const SEARCH_DELAY: Duration = Duration::from_secs(5);
/// How long `/api/v2.1/activities/` stalls before answering.
pub const ACTIVITY_DELAY: Duration = Duration::from_millis(300);

/// Issued tokens, mapped to the user they belong to.
pub type Tokens = Arc<RwLock<HashMap<String, String>>>;

#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

pub fn app() -> Router {
    let tokens: Tokens = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api2/auth-token/", post(obtain_token))
        .route("/api2/auth/ping/", get(ping))
        .route("/api2/account/info/", get(account_info))
        .route("/api2/search/", get(slow_search))
        .route("/api/v2.1/activities/", get(slow_activities))
        .route("/api/v2.1/repos/", get(list_repos))
        .route("/api/v2.1/share-links/", post(create_share_link))
        .route("/api/v2.1/groups/{id}/", put(update_group))
        .route("/api2/repos/{repo_id}/file/", get(download_link))
        .route("/api2/repos/{repo_id}/upload-link/", get(upload_link))
        .route("/seafhttp/files/{token}/{name}", get(file_content))
        .route("/seafhttp/upload-api/{token}", post(upload))
        .route("/ajax/get_popup_notices/", get(popup_notices))
        .with_state(tokens)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("mock seafile listening on {addr}");
    }
    axum::serve(listener, app()).await
}

/// Resolves the caller from `Authorization: Token ...` or from the CSRF
/// header plus a `sessionid` cookie.
async fn current_user(tokens: &Tokens, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = header_str(headers, header::AUTHORIZATION.as_str())
        .and_then(|v| v.strip_prefix("Token "))
    {
        return tokens.read().await.get(token).cloned();
    }
    let csrf_ok = header_str(headers, "x-csrftoken") == Some(CSRF_TOKEN);
    let has_session = header_str(headers, header::COOKIE.as_str())
        .is_some_and(|c| c.split(';').any(|kv| kv.trim().starts_with("sessionid=")));
    (csrf_ok && has_session).then(|| HOST_USER.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Invalid token"})),
    )
        .into_response()
}

fn base_url(headers: &HeaderMap) -> String {
    let host = header_str(headers, header::HOST.as_str()).unwrap_or("127.0.0.1");
    format!("http://{host}")
}

async fn obtain_token(State(tokens): State<Tokens>, Json(input): Json<TokenRequest>) -> Response {
    if input.username == OUTAGE_USER {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response();
    }
    if input.username != USERNAME || input.password != PASSWORD {
        log::info!("rejected login for {}", input.username);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Unable to login with provided credentials."]})),
        )
            .into_response();
    }
    let token = Uuid::new_v4().simple().to_string();
    tokens.write().await.insert(token.clone(), input.username);
    Json(json!({ "token": token })).into_response()
}

async fn ping(State(tokens): State<Tokens>, headers: HeaderMap) -> Response {
    match current_user(&tokens, &headers).await {
        Some(_) => Json("pong").into_response(),
        None => unauthorized(),
    }
}

async fn account_info(State(tokens): State<Tokens>, headers: HeaderMap) -> Response {
    match current_user(&tokens, &headers).await {
        Some(email) => Json(json!({ "email": email, "usage": 0, "total": -2 })).into_response(),
        None => unauthorized(),
    }
}

async fn slow_search(State(tokens): State<Tokens>, headers: HeaderMap) -> Response {
    if current_user(&tokens, &headers).await.is_none() {
        return unauthorized();
    }
    tokio::time::sleep(SEARCH_DELAY).await;
    Json(json!({ "total": 0, "results": [] })).into_response()
}

/// Reports the caller resolved when the request arrived, after a delay.
async fn slow_activities(State(tokens): State<Tokens>, headers: HeaderMap) -> Response {
    let Some(email) = current_user(&tokens, &headers).await else {
        return unauthorized();
    };
    tokio::time::sleep(ACTIVITY_DELAY).await;
    Json(json!({ "events": [], "email": email })).into_response()
}

/// Echoes the raw query string so callers can check its encoding.
async fn list_repos(
    State(tokens): State<Tokens>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if current_user(&tokens, &headers).await.is_none() {
        return unauthorized();
    }
    Json(json!({ "repos": [], "query": query })).into_response()
}

async fn create_share_link(
    State(tokens): State<Tokens>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if current_user(&tokens, &headers).await.is_none() {
        return unauthorized();
    }
    match read_form(multipart).await {
        Ok(fields) => Json(json!({ "fields": fields })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Requires a JSON body; echoes it with the group id.
async fn update_group(
    State(tokens): State<Tokens>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if current_user(&tokens, &headers).await.is_none() {
        return unauthorized();
    }
    Json(json!({ "id": id, "body": body })).into_response()
}

#[derive(Deserialize)]
struct PathQuery {
    p: String,
}

async fn download_link(
    State(tokens): State<Tokens>,
    Path(repo_id): Path<String>,
    headers: HeaderMap,
    axum::extract::Query(query): axum::extract::Query<PathQuery>,
) -> Response {
    if current_user(&tokens, &headers).await.is_none() {
        return unauthorized();
    }
    let name = query.p.rsplit('/').next().unwrap_or_default().to_string();
    if name.is_empty() {
        return (StatusCode::NOT_FOUND, Json(json!({"error_msg": "File not found"}))).into_response();
    }
    log::info!("download link for {repo_id}:{}", query.p);
    let link = format!("{}/seafhttp/files/{}/{name}", base_url(&headers), Uuid::new_v4().simple());
    Json(link).into_response()
}

async fn upload_link(
    State(tokens): State<Tokens>,
    Path(_repo_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if current_user(&tokens, &headers).await.is_none() {
        return unauthorized();
    }
    let link = format!("{}/seafhttp/upload-api/{}", base_url(&headers), Uuid::new_v4().simple());
    Json(link).into_response()
}

/// File server links are pre-authorized; a session header here means the
/// client leaked credentials to the wrong host.
fn rejects_session_headers(headers: &HeaderMap) -> Option<Response> {
    let leaked = headers.contains_key(header::AUTHORIZATION) || headers.contains_key("x-csrftoken");
    leaked.then(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error_msg": "unexpected credentials"})),
        )
            .into_response()
    })
}

async fn file_content(Path((_token, _name)): Path<(String, String)>, headers: HeaderMap) -> Response {
    if let Some(rejection) = rejects_session_headers(&headers) {
        return rejection;
    }
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        FILE_CONTENT,
    )
        .into_response()
}

async fn upload(
    Path(_token): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Some(rejection) = rejects_session_headers(&headers) {
        return rejection;
    }
    let mut parent_dir = String::new();
    let mut files = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return e.into_response(),
        };
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return e.into_response(),
        };
        match (name.as_str(), file_name) {
            ("parent_dir", _) => parent_dir = String::from_utf8_lossy(&bytes).into_owned(),
            ("file", Some(file_name)) => files.push(json!({
                "name": file_name,
                "size": bytes.len(),
            })),
            _ => {}
        }
    }
    if parent_dir.is_empty() || files.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "parent_dir and file are required"})),
        )
            .into_response();
    }
    let files: Vec<Value> = files
        .into_iter()
        .map(|mut f| {
            f["parent_dir"] = json!(parent_dir);
            f
        })
        .collect();
    Json(files).into_response()
}

async fn popup_notices(State(tokens): State<Tokens>, headers: HeaderMap) -> Response {
    if header_str(&headers, "x-requested-with") != Some("XMLHttpRequest") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if current_user(&tokens, &headers).await.is_none() {
        return unauthorized();
    }
    Json(json!({ "notice_html": "", "unseen_count": 0 })).into_response()
}

/// Collects text fields as `[name, value]` pairs in arrival order.
async fn read_form(
    mut multipart: Multipart,
) -> Result<Vec<(String, String)>, axum::extract::multipart::MultipartError> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await?;
        fields.push((name, value));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_request_requires_both_fields() {
        let input: TokenRequest =
            serde_json::from_str(r#"{"username":"a","password":"b"}"#).unwrap();
        assert_eq!(input.username, "a");
        assert!(serde_json::from_str::<TokenRequest>(r#"{"username":"a"}"#).is_err());
    }

    #[tokio::test]
    async fn csrf_needs_session_cookie() {
        let tokens: Tokens = Arc::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-csrftoken", CSRF_TOKEN.parse().unwrap());
        assert_eq!(current_user(&tokens, &headers).await, None);

        headers.insert(header::COOKIE, "lang=en; sessionid=abc".parse().unwrap());
        assert_eq!(current_user(&tokens, &headers).await.as_deref(), Some(HOST_USER));
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let tokens: Tokens = Arc::default();
        tokens.write().await.insert("good".into(), USERNAME.into());

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Token bad".parse().unwrap());
        assert_eq!(current_user(&tokens, &headers).await, None);

        headers.insert(header::AUTHORIZATION, "Token good".parse().unwrap());
        assert_eq!(current_user(&tokens, &headers).await.as_deref(), Some(USERNAME));
    }

    #[test]
    fn base_url_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "127.0.0.1:4000".parse().unwrap());
        assert_eq!(base_url(&headers), "http://127.0.0.1:4000");
    }
}
