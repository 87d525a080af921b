//! Repo tags and the file tags that reference them.

use crate::endpoint::Endpoint;

pub fn list_repo_tags(repo_id: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/repo-tags/").id(repo_id)
}

pub fn create_repo_tag(repo_id: &str, name: &str, color: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/repos/{}/repo-tags/")
        .id(repo_id)
        .field("name", name)
        .field("color", color)
}

pub fn update_repo_tag(repo_id: &str, repo_tag_id: u64, name: &str, color: &str) -> Endpoint {
    Endpoint::put("/api/v2.1/repos/{}/repo-tags/{}/")
        .id(repo_id)
        .id(repo_tag_id)
        .field("name", name)
        .field("color", color)
        .plain_params()
}

pub fn delete_repo_tag(repo_id: &str, repo_tag_id: u64) -> Endpoint {
    Endpoint::delete("/api/v2.1/repos/{}/repo-tags/{}/")
        .id(repo_id)
        .id(repo_tag_id)
}

pub fn list_tagged_files(repo_id: &str, repo_tag_id: u64) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/tagged-files/{}/")
        .id(repo_id)
        .id(repo_tag_id)
}

pub fn list_file_tags(repo_id: &str, file_path: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/file-tags/")
        .id(repo_id)
        .query("file_path", file_path)
}

pub fn add_file_tag(repo_id: &str, file_path: &str, repo_tag_id: u64) -> Endpoint {
    Endpoint::post("/api/v2.1/repos/{}/file-tags/")
        .id(repo_id)
        .field("file_path", file_path)
        .field("repo_tag_id", repo_tag_id)
}

pub fn delete_file_tag(repo_id: &str, file_tag_id: u64) -> Endpoint {
    Endpoint::delete("/api/v2.1/repos/{}/file-tags/{}/")
        .id(repo_id)
        .id(file_tag_id)
}
