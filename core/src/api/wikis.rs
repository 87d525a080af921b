//! Wikis.

use crate::endpoint::Endpoint;

/// Lists wikis of the given types; an empty slice lists all.
pub fn list_wikis(types: &[&str]) -> Endpoint {
    let endpoint = Endpoint::get("/api/v2.1/wikis/");
    if types.is_empty() {
        return endpoint;
    }
    endpoint.query_list("type", types.iter().copied())
}

/// Creates a wiki, either backed by a new repo or by `repo_id`.
pub fn add_wiki(use_exist_repo: bool, name: &str, repo_id: Option<&str>) -> Endpoint {
    Endpoint::post("/api/v2.1/wikis/")
        .field("use_exist_repo", use_exist_repo)
        .opt_field("repo_id", repo_id)
        .field("name", name)
}

pub fn rename_wiki(slug: &str, name: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/wikis/{}/")
        .segment(slug)
        .field("wiki_name", name)
}

pub fn update_wiki_permission(slug: &str, permission: &str) -> Endpoint {
    Endpoint::put("/api/v2.1/wikis/{}/")
        .segment(slug)
        .field("permission", permission)
        .plain_params()
}

pub fn delete_wiki(slug: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/wikis/{}/").segment(slug)
}

pub fn get_wiki_file_content(slug: &str, path: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/wikis/{}/content/")
        .segment(slug)
        .query("p", path)
}
