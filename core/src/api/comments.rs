//! File comments.

use crate::endpoint::Endpoint;

/// `resolved` filters by state when given.
pub fn list_comments(repo_id: &str, path: &str, resolved: Option<bool>) -> Endpoint {
    Endpoint::get("/api2/repos/{}/file/comments/")
        .id(repo_id)
        .query("p", path)
        .opt_query("resolved", resolved)
}

pub fn post_comment(repo_id: &str, path: &str, comment: &str, detail: Option<&str>) -> Endpoint {
    Endpoint::post("/api2/repos/{}/file/comments/")
        .id(repo_id)
        .query("p", path)
        .field("comment", comment)
        .opt_field("detail", detail)
}

pub fn get_comments_number(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/file/comments/counts/")
        .id(repo_id)
        .query("p", path)
}

pub fn update_comment(
    repo_id: &str,
    comment_id: u64,
    resolved: bool,
    detail: Option<&str>,
) -> Endpoint {
    Endpoint::put("/api2/repos/{}/file/comments/{}/")
        .id(repo_id)
        .id(comment_id)
        .field("resolved", resolved)
        .opt_field("detail", detail)
        .plain_params()
}

pub fn delete_comment(repo_id: &str, comment_id: u64) -> Endpoint {
    Endpoint::delete("/api2/repos/{}/file/comments/{}/")
        .id(repo_id)
        .id(comment_id)
}
