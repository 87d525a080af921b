//! Directories, batch dirent operations and zip downloads.

use crate::encoding::colon_join;
use crate::endpoint::Endpoint;

/// Optional flags for `list_dir`. Unset flags are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDirOptions<'a> {
    pub recursive: bool,
    /// `d` for directories only, `f` for files only.
    pub entry_type: Option<&'a str>,
    pub with_thumbnail: bool,
    pub with_parents: bool,
}

pub fn list_dir(repo_id: &str, path: &str, options: &ListDirOptions<'_>) -> Endpoint {
    let mut endpoint = Endpoint::get("/api/v2.1/repos/{}/dir/")
        .id(repo_id)
        .query("p", path);
    if options.recursive {
        endpoint = endpoint.query("recursive", 1);
    }
    if let Some(t) = options.entry_type.filter(|t| !t.is_empty()) {
        endpoint = endpoint.query("t", t);
    }
    if options.with_thumbnail {
        endpoint = endpoint.query("with_thumbnail", true);
    }
    if options.with_parents {
        endpoint = endpoint.query("with_parents", true);
    }
    endpoint
}

pub fn list_wiki_dir(slug: &str, path: &str, with_parents: bool) -> Endpoint {
    let endpoint = Endpoint::get("/api/v2.1/wikis/{}/dir/")
        .segment(slug)
        .query("p", path);
    if with_parents {
        endpoint.query("with_parents", true)
    } else {
        endpoint
    }
}

pub fn get_dir_info(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/dir/detail/")
        .id(repo_id)
        .query("path", path)
}

pub fn get_dir_metadata(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api2/repos/{}/dir/metadata/")
        .id(repo_id)
        .query("p", path)
}

pub fn create_dir(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::post("/api2/repos/{}/dir/")
        .id(repo_id)
        .query("p", path)
        .field("operation", "mkdir")
}

pub fn rename_dir(repo_id: &str, path: &str, new_name: &str) -> Endpoint {
    Endpoint::post("/api2/repos/{}/dir/")
        .id(repo_id)
        .query("p", path)
        .field("operation", "rename")
        .field("newname", new_name)
}

pub fn delete_dir(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::delete("/api2/repos/{}/dir/")
        .id(repo_id)
        .query("p", path)
}

fn batch(
    template: &'static str,
    repo_id: &str,
    dst_repo_id: &str,
    dst_dir: &str,
    parent_dir: &str,
    names: &[&str],
) -> Endpoint {
    Endpoint::post(template)
        .id(repo_id)
        .query("p", parent_dir)
        .field("dst_repo", dst_repo_id)
        .field("dst_dir", dst_dir)
        .field("file_names", colon_join(names))
}

/// Copies `names` from `parent_dir` into `dst_dir` of `dst_repo_id`.
pub fn copy_dirents(
    repo_id: &str,
    dst_repo_id: &str,
    dst_dir: &str,
    parent_dir: &str,
    names: &[&str],
) -> Endpoint {
    batch(
        "/api2/repos/{}/fileops/copy/",
        repo_id,
        dst_repo_id,
        dst_dir,
        parent_dir,
        names,
    )
}

pub fn move_dirents(
    repo_id: &str,
    dst_repo_id: &str,
    dst_dir: &str,
    parent_dir: &str,
    names: &[&str],
) -> Endpoint {
    batch(
        "/api2/repos/{}/fileops/move/",
        repo_id,
        dst_repo_id,
        dst_dir,
        parent_dir,
        names,
    )
}

pub fn delete_dirents(repo_id: &str, parent_dir: &str, names: &[&str]) -> Endpoint {
    Endpoint::post("/api2/repos/{}/fileops/delete/")
        .id(repo_id)
        .query("p", parent_dir)
        .field("file_names", colon_join(names))
}

/// Starts a server-side zip of `dirents` under `parent_dir`.
pub fn zip_download(repo_id: &str, parent_dir: &str, dirents: &[&str]) -> Endpoint {
    Endpoint::get("/api/v2.1/repos/{}/zip-task/")
        .id(repo_id)
        .query("parent_dir", parent_dir)
        .query_list("dirents", dirents.iter().copied())
}

pub fn query_zip_progress(zip_token: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/query-zip-progress/").query("token", zip_token)
}

pub fn cancel_zip_task(zip_token: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/cancel-zip-task/").field("token", zip_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: &str = "https://x.com";

    #[test]
    fn list_dir_sends_only_set_flags() {
        let req = list_dir("r1", "/", &ListDirOptions::default()).build(SERVER);
        assert_eq!(req.url, "https://x.com/api/v2.1/repos/r1/dir/?p=%2F");

        let options = ListDirOptions {
            recursive: true,
            entry_type: Some("d"),
            with_thumbnail: true,
            with_parents: false,
        };
        let req = list_dir("r1", "/a", &options).build(SERVER);
        assert_eq!(
            req.url,
            "https://x.com/api/v2.1/repos/r1/dir/?p=%2Fa&recursive=1&t=d&with_thumbnail=true"
        );
    }

    #[test]
    fn batch_copy_colon_joins_names() {
        let req = copy_dirents("src", "dst", "/target dir", "/from", &["a.txt", "b", "c d.md"])
            .build(SERVER);
        assert_eq!(req.url, "https://x.com/api2/repos/src/fileops/copy/?p=%2Ffrom");
        let body = req.body.unwrap();
        assert_eq!(body.form_values("file_names"), vec!["a.txt:b:c d.md"]);
        assert_eq!(body.form_values("dst_repo"), vec!["dst"]);
        assert_eq!(body.form_values("dst_dir"), vec!["/target dir"]);
    }

    #[test]
    fn batch_delete_has_only_names() {
        let req = delete_dirents("r1", "/", &["x", "y"]).build(SERVER);
        let body = req.body.unwrap();
        assert_eq!(body.form_values("file_names"), vec!["x:y"]);
        assert!(body.form_values("dst_repo").is_empty());
    }

    #[test]
    fn zip_download_repeats_dirents() {
        let req = zip_download("r1", "/p q", &["a", "b&c"]).build(SERVER);
        assert_eq!(
            req.url,
            "https://x.com/api/v2.1/repos/r1/zip-task/?parent_dir=%2Fp%20q&dirents=a&dirents=b%26c"
        );
    }
}
