//! Drafts, reviews, reviewers and review comments.

use crate::endpoint::Endpoint;

pub fn get_repo_draft_review_counts(repo_id: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repo/{}/draft-review-counts/").id(repo_id)
}

pub fn list_repo_drafts(repo_id: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repo/{}/drafts/").id(repo_id)
}

/// Open reviews under the repo.
pub fn list_repo_reviews(repo_id: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repo/{}/reviews/").id(repo_id)
}

pub fn get_draft(draft_id: u64) -> Endpoint {
    Endpoint::get("/api/v2.1/drafts/{}/").id(draft_id)
}

// The listing route has no trailing slash on the server.
pub fn list_drafts() -> Endpoint {
    Endpoint::get("/api/v2.1/drafts")
}

pub fn create_draft(repo_id: &str, file_path: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/drafts/")
        .field("repo_id", repo_id)
        .field("file_path", file_path)
}

pub fn delete_draft(draft_id: u64) -> Endpoint {
    Endpoint::delete("/api/v2.1/drafts/{}/").id(draft_id)
}

pub fn publish_draft(draft_id: u64) -> Endpoint {
    Endpoint::put("/api/v2.1/drafts/{}/")
        .id(draft_id)
        .field("operation", "publish")
        .plain_params()
}

pub fn create_draft_review(draft_id: u64) -> Endpoint {
    Endpoint::post("/api/v2.1/reviews/")
        .field("draft_id", draft_id)
        .plain_params()
}

pub fn create_file_review(repo_id: &str, file_path: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/file-review/")
        .field("repo_id", repo_id)
        .field("file_path", file_path)
}

/// `status` is `open`, `finished` or `closed`.
pub fn list_reviews(status: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/reviews/").query("status", status)
}

pub fn update_review_status(review_id: u64, status: &str) -> Endpoint {
    Endpoint::put("/api/v2.1/review/{}/")
        .id(review_id)
        .field("status", status)
        .plain_params()
}

pub fn list_reviewers(review_id: u64) -> Endpoint {
    Endpoint::get("/api/v2.1/review/{}/reviewer/").id(review_id)
}

pub fn add_reviewers(review_id: u64, reviewers: &[&str]) -> Endpoint {
    Endpoint::post("/api/v2.1/review/{}/reviewer/")
        .id(review_id)
        .field_list("reviewer", reviewers.iter().copied())
}

pub fn delete_reviewer(review_id: u64, reviewer: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/review/{}/reviewer/")
        .id(review_id)
        .query("username", reviewer)
}

pub fn list_review_comments(
    review_id: u64,
    page: u32,
    per_page: u32,
    avatar_size: u32,
) -> Endpoint {
    Endpoint::get("/api2/review/{}/comments/")
        .id(review_id)
        .query("page", page)
        .query("per_page", per_page)
        .query("avatar_size", avatar_size)
}

pub fn add_review_comment(review_id: u64, comment: &str, detail: Option<&str>) -> Endpoint {
    Endpoint::post("/api2/review/{}/comments/")
        .id(review_id)
        .field("comment", comment)
        .opt_field("detail", detail)
}

pub fn update_review_comment(
    review_id: u64,
    comment_id: u64,
    resolved: bool,
    detail: Option<&str>,
) -> Endpoint {
    Endpoint::put("/api2/review/{}/comment/{}/")
        .id(review_id)
        .id(comment_id)
        .field("resolved", resolved)
        .opt_field("detail", detail)
        .plain_params()
}

pub fn delete_review_comment(review_id: u64, comment_id: u64) -> Endpoint {
    Endpoint::delete("/api2/review/{}/comment/{}/")
        .id(review_id)
        .id(comment_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RequestBody;
    use serde_json::json;

    const SERVER: &str = "https://x.com";

    #[test]
    fn list_drafts_has_no_trailing_slash() {
        assert_eq!(list_drafts().build(SERVER).url, "https://x.com/api/v2.1/drafts");
    }

    #[test]
    fn review_comments_are_paged() {
        let req = list_review_comments(4, 2, 25, 64).build(SERVER);
        assert_eq!(
            req.url,
            "https://x.com/api2/review/4/comments/?page=2&per_page=25&avatar_size=64"
        );
    }

    #[test]
    fn draft_review_is_json() {
        let req = create_draft_review(11).build(SERVER);
        assert_eq!(req.body, Some(RequestBody::Json(json!({"draft_id": 11}))));
    }

    #[test]
    fn delete_reviewer_encodes_username() {
        let req = delete_reviewer(4, "a b@x.com").build(SERVER);
        assert_eq!(
            req.url,
            "https://x.com/api/v2.1/review/4/reviewer/?username=a%20b%40x.com"
        );
    }
}
