//! Single-file operations, upload/download links and related files.

use crate::endpoint::Endpoint;
use crate::http::{Blob, HttpMethod};

pub fn get_file_info(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/file/detail/")
        .id(repo_id)
        .query("p", path)
}

pub fn get_file_history(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/file/history/")
        .id(repo_id)
        .query("p", path)
}

/// Paged file history.
pub fn list_file_history_records(repo_id: &str, path: &str, page: u32, per_page: u32) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/file/new_history/")
        .id(repo_id)
        .query("path", path)
        .query("page", page)
        .query("per_page", per_page)
}

pub fn get_file_revision(repo_id: &str, commit_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/file/revision/")
        .id(repo_id)
        .query("p", path)
        .query("commit_id", commit_id)
}

pub fn get_file_metadata(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/file/metadata/")
        .id(repo_id)
        .query("p", path)
}

/// Returns a one-time download URL. `reuse=1` keeps the link valid across
/// a CORS preflight.
pub fn get_file_download_link(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/file/")
        .id(repo_id)
        .query("p", path)
        .query("reuse", 1)
}

/// Fetches file content from a link returned by `get_file_download_link`.
pub fn get_file_content(download_link: &str) -> Endpoint {
    Endpoint::absolute(HttpMethod::Get, download_link)
}

pub fn create_file(repo_id: &str, path: &str, is_draft: bool) -> Endpoint {
    Endpoint::post("/api/v2.1/repos/{}/file/")
        .id(repo_id)
        .query("p", path)
        .field("operation", "create")
        .field("is_draft", is_draft)
}

pub fn rename_file(repo_id: &str, path: &str, new_name: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/repos/{}/file/")
        .id(repo_id)
        .query("p", path)
        .field("operation", "rename")
        .field("newname", new_name)
}

pub fn revert_file(repo_id: &str, path: &str, commit_id: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/repos/{}/file/")
        .id(repo_id)
        .query("p", path)
        .field("operation", "revert")
        .field("commit_id", commit_id)
}

pub fn lock_file(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::put("/api2/repos/{}/file/")
        .id(repo_id)
        .field("p", path)
        .field("operation", "lock")
        .plain_params()
}

pub fn unlock_file(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::put("/api2/repos/{}/file/")
        .id(repo_id)
        .field("p", path)
        .field("operation", "unlock")
        .plain_params()
}

pub fn delete_file(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::delete("/api2/repos/{}/file/")
        .id(repo_id)
        .query("p", path)
}

pub fn get_upload_link(repo_id: &str, dir: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/upload-link/")
        .id(repo_id)
        .query("p", dir)
        .query("from", "web")
}

pub fn get_update_link(repo_id: &str, dir: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/update-link/")
        .id(repo_id)
        .query("p", dir)
}

/// Bytes of `file_name` already received, for resuming an upload.
pub fn get_file_uploaded_bytes(repo_id: &str, parent_dir: &str, file_name: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/file-uploaded-bytes/")
        .id(repo_id)
        .query("parent_dir", parent_dir)
        .query("file_name", file_name)
}

/// Uploads `file` through a link from `get_upload_link`.
pub fn upload_file(
    upload_link: &str,
    parent_dir: &str,
    relative_path: Option<&str>,
    file: Blob,
) -> Endpoint {
    Endpoint::absolute(HttpMethod::Post, upload_link)
        .field("parent_dir", parent_dir)
        .opt_field("relative_path", relative_path)
        .blob("file", file)
}

/// Replaces the content of `file_path` through a link from
/// `get_update_link`.
pub fn update_file(update_link: &str, file_path: &str, file_name: &str, data: Vec<u8>) -> Endpoint {
    Endpoint::absolute(HttpMethod::Post, update_link)
        .field("target_file", file_path)
        .field("filename", file_name)
        .blob("file", Blob::new(file_name, data).with_content_type("text/plain"))
}

/// An internal (login-required) link to a file.
pub fn get_internal_link(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/smart-link/")
        .query("repo_id", repo_id)
        .query("path", path)
        .query("is_dir", false)
}

pub fn list_related_files(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/related-files/")
        .query("repo_id", repo_id)
        .query("file_path", path)
}

pub fn add_related_file(
    o_repo_id: &str,
    r_repo_id: &str,
    o_path: &str,
    r_path: &str,
) -> Endpoint {
    Endpoint::post("/api/v2.1/related-files/")
        .field("o_repo_id", o_repo_id)
        .field("r_repo_id", r_repo_id)
        .field("o_path", o_path)
        .field("r_path", r_path)
}

pub fn delete_related_file(repo_id: &str, path: &str, related_id: u64) -> Endpoint {
    Endpoint::delete("/api/v2.1/related-files/{}/")
        .id(related_id)
        .field("repo_id", repo_id)
        .field("file_path", path)
        .plain_params()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{FormPart, RequestBody};
    use serde_json::json;

    const SERVER: &str = "https://x.com";

    #[test]
    fn download_link_requests_reuse() {
        let req = get_file_download_link("r1", "/a/b c.txt").build(SERVER);
        assert_eq!(
            req.url,
            "https://x.com/api2/repos/r1/file/?p=%2Fa%2Fb%20c.txt&reuse=1"
        );
        assert!(!req.anonymous);
    }

    #[test]
    fn file_content_uses_link_verbatim_and_anonymously() {
        let link = "https://files.x.com/seafhttp/files/abc/b%20c.txt";
        let req = get_file_content(link).build(SERVER);
        assert_eq!(req.url, link);
        assert!(req.anonymous);
    }

    #[test]
    fn lock_sends_plain_params() {
        let req = lock_file("r1", "/a.md").build(SERVER);
        assert_eq!(req.url, "https://x.com/api2/repos/r1/file/");
        assert_eq!(
            req.body,
            Some(RequestBody::Json(json!({"p": "/a.md", "operation": "lock"})))
        );
    }

    #[test]
    fn update_file_attaches_text_blob() {
        let req = update_file("https://up.x.com/update-api/tok", "/a.md", "a.md", b"# hi".to_vec())
            .build(SERVER);
        assert!(req.anonymous);
        match req.body.unwrap() {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 3);
                match &parts[2] {
                    FormPart::File { name, blob } => {
                        assert_eq!(name, "file");
                        assert_eq!(blob.file_name, "a.md");
                        assert_eq!(blob.content_type.as_deref(), Some("text/plain"));
                        assert_eq!(blob.bytes, b"# hi");
                    }
                    other => panic!("expected file part, got {other:?}"),
                }
            }
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[test]
    fn create_file_stringifies_draft_flag() {
        let req = create_file("r1", "/n.md", true).build(SERVER);
        let body = req.body.unwrap();
        assert_eq!(body.form_values("operation"), vec!["create"]);
        assert_eq!(body.form_values("is_draft"), vec!["true"]);
    }
}
