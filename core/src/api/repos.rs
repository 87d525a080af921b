//! Libraries (repos): creation, listing, settings and search.

use crate::endpoint::Endpoint;

/// Creates a repo owned by the caller.
pub fn create_mine_repo(name: &str, desc: Option<&str>, password: Option<&str>) -> Endpoint {
    Endpoint::post("/api2/repos/")
        .query("from", "web")
        .field("name", name)
        .opt_field("desc", desc)
        .opt_field("passwd", password)
        .plain_params()
}

pub fn create_group_repo(
    group_id: u64,
    repo_name: &str,
    password: Option<&str>,
    permission: &str,
) -> Endpoint {
    Endpoint::post("/api/v2.1/groups/{}/libraries/")
        .id(group_id)
        .field("repo_name", repo_name)
        .opt_field("password", password)
        .field("permission", permission)
}

pub fn create_public_repo(
    name: &str,
    desc: Option<&str>,
    password: Option<&str>,
    permission: &str,
) -> Endpoint {
    Endpoint::post("/api2/repos/public/")
        .field("name", name)
        .opt_field("desc", desc)
        .opt_field("passwd", password)
        .field("permission", permission)
        .plain_params()
}

/// Lists repos of the given types (`mine`, `shared`, `group`, `public`).
/// An empty slice lists every type.
pub fn list_repos(types: &[&str]) -> Endpoint {
    let endpoint = Endpoint::get("/api/v2.1/repos/");
    if types.is_empty() {
        return endpoint;
    }
    endpoint.query_list("type", types.iter().copied())
}

pub fn get_repo_info(repo_id: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/").id(repo_id)
}

pub fn get_repo_history_limit(repo_id: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/history-limit/").id(repo_id)
}

pub fn set_repo_history_limit(repo_id: &str, keep_days: i64) -> Endpoint {
    Endpoint::put("/api2/repos/{}/history-limit/")
        .id(repo_id)
        .field("keep_days", keep_days)
}

pub fn delete_repo(repo_id: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/repos/{}/").id(repo_id)
}

pub fn rename_repo(repo_id: &str, new_name: &str) -> Endpoint {
    Endpoint::post("/api2/repos/{}/")
        .id(repo_id)
        .query("op", "rename")
        .field("repo_name", new_name)
}

pub fn transfer_repo(repo_id: &str, owner: &str) -> Endpoint {
    Endpoint::put("/api2/repos/{}/owner/")
        .id(repo_id)
        .field("owner", owner)
}

/// Unlocks an encrypted repo for the current session.
pub fn set_repo_decrypt_password(repo_id: &str, password: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/repos/{}/set-password/")
        .id(repo_id)
        .field("password", password)
}

pub fn list_deleted_repos() -> Endpoint {
    Endpoint::get("/api/v2.1/deleted-repos/")
}

pub fn restore_deleted_repo(repo_id: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/deleted-repos/").field("repo_id", repo_id)
}

/// Full-text search parameters. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub q: &'a str,
    pub search_repo: Option<&'a str>,
    pub search_path: Option<&'a str>,
    pub search_ftypes: Option<&'a str>,
    pub ftype: &'a [&'a str],
    pub input_fexts: Option<&'a str>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Usually issued with `Session::execute_cancellable` so a newer search can
/// abort the previous one.
pub fn search_files(query: &SearchQuery<'_>) -> Endpoint {
    let endpoint = Endpoint::get("/api2/search/")
        .query("q", query.q)
        .opt_query("search_repo", query.search_repo)
        .opt_query("search_path", query.search_path)
        .opt_query("search_ftypes", query.search_ftypes);
    let endpoint = if query.ftype.is_empty() {
        endpoint
    } else {
        endpoint.query_list("ftype", query.ftype.iter().copied())
    };
    endpoint
        .opt_query("input_fexts", query.input_fexts)
        .opt_query("page", query.page)
        .opt_query("per_page", query.per_page)
}
