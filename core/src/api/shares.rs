//! Share links, upload links, and repo/folder shares to users and groups.

use crate::endpoint::Endpoint;

/// Recipient kind for folder share listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareType {
    User,
    Group,
}

impl ShareType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareType::User => "user",
            ShareType::Group => "group",
        }
    }
}

/// Who a whole repo is shared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget<'a> {
    User(&'a str),
    Group(u64),
    Public,
}

impl ShareTarget<'_> {
    fn share_type(&self) -> &'static str {
        match self {
            ShareTarget::User(_) => "personal",
            ShareTarget::Group(_) => "group",
            ShareTarget::Public => "public",
        }
    }
}

/// Recipients of a folder share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients<'a> {
    Users(&'a [&'a str]),
    Groups(&'a [u64]),
}

pub fn list_share_links() -> Endpoint {
    Endpoint::get("/api/v2.1/share-links/")
}

pub fn list_repo_share_links(repo_id: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/share-links/").query("repo_id", repo_id)
}

/// Share links of one file or folder.
pub fn get_share_link(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/share-links/")
        .query("repo_id", repo_id)
        .query("path", path)
}

/// `permissions` is the server's JSON permission object, passed through.
pub fn create_share_link(
    repo_id: &str,
    path: &str,
    password: Option<&str>,
    expire_days: Option<u32>,
    permissions: Option<&str>,
) -> Endpoint {
    Endpoint::post("/api/v2.1/share-links/")
        .field("path", path)
        .field("repo_id", repo_id)
        .opt_field("permissions", permissions)
        .opt_field("password", password)
        .opt_field("expire_days", expire_days)
}

pub fn delete_share_link(token: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/share-links/{}/").id(token)
}

pub fn list_upload_links() -> Endpoint {
    Endpoint::get("/api/v2.1/upload-links/")
}

pub fn get_upload_links(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::get("/api/v2.1/upload-links/")
        .query("repo_id", repo_id)
        .query("path", path)
}

pub fn create_upload_link(repo_id: &str, path: &str, password: Option<&str>) -> Endpoint {
    Endpoint::post("/api/v2.1/upload-links/")
        .field("path", path)
        .field("repo_id", repo_id)
        .opt_field("password", password)
}

pub fn delete_upload_link(token: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/upload-links/{}/").id(token)
}

/// Stores a file reached through a share link into one of the caller's
/// repos.
pub fn save_shared_file(repo_id: &str, path: &str, shared_token: &str) -> Endpoint {
    Endpoint::post("/share/link/save/")
        .query("t", shared_token)
        .field("dst_repo", repo_id)
        .field("dst_path", path)
        .field("s_token", shared_token)
}

/// Users or groups a folder is shared with.
pub fn list_shared_items(repo_id: &str, path: &str, share_type: ShareType) -> Endpoint {
    Endpoint::get("/api2/repos/{}/dir/shared_items/")
        .id(repo_id)
        .query("p", path)
        .query("share_type", share_type.as_str())
}

/// Shares a folder with users or groups. Each recipient is a separate form
/// field.
pub fn share_folder(repo_id: &str, path: &str, permission: &str, to: Recipients<'_>) -> Endpoint {
    let endpoint = Endpoint::put("/api2/repos/{}/dir/shared_items/")
        .id(repo_id)
        .query("p", path);
    match to {
        Recipients::Users(users) => endpoint
            .field("share_type", ShareType::User.as_str())
            .field("permission", permission)
            .field_list("username", users.iter().copied()),
        Recipients::Groups(groups) => endpoint
            .field("share_type", ShareType::Group.as_str())
            .field("permission", permission)
            .field_list("group_id", groups.iter().copied()),
    }
}

pub fn delete_share_to_user(repo_id: &str, path: &str, username: &str) -> Endpoint {
    Endpoint::delete("/api2/repos/{}/dir/shared_items/")
        .id(repo_id)
        .query("p", path)
        .query("share_type", ShareType::User.as_str())
        .query("username", username)
}

/// Sent as POST because the legacy route has no PUT handler.
pub fn update_share_to_user_permission(
    repo_id: &str,
    path: &str,
    username: &str,
    permission: &str,
) -> Endpoint {
    Endpoint::post("/api2/repos/{}/dir/shared_items/")
        .id(repo_id)
        .query("p", path)
        .query("share_type", ShareType::User.as_str())
        .query("username", username)
        .field("permission", permission)
}

pub fn delete_share_to_group(repo_id: &str, path: &str, group_id: u64) -> Endpoint {
    Endpoint::delete("/api2/repos/{}/dir/shared_items/")
        .id(repo_id)
        .query("p", path)
        .query("share_type", ShareType::Group.as_str())
        .query("group_id", group_id)
}

pub fn update_share_to_group_permission(
    repo_id: &str,
    path: &str,
    group_id: u64,
    permission: &str,
) -> Endpoint {
    Endpoint::post("/api2/repos/{}/dir/shared_items/")
        .id(repo_id)
        .query("p", path)
        .query("share_type", ShareType::Group.as_str())
        .query("group_id", group_id)
        .field("permission", permission)
}

pub fn list_shared_folders() -> Endpoint {
    Endpoint::get("/api/v2.1/shared-folders/")
}

/// Repos shared with the caller.
pub fn list_be_shared_repos() -> Endpoint {
    Endpoint::get("/api2/beshared-repos/")
}

/// Drops a repo someone shared with the caller. `from` is the sharer's
/// email for personal shares.
pub fn leave_shared_repo(repo_id: &str, share_type: &str, from: Option<&str>) -> Endpoint {
    Endpoint::delete("/api2/beshared-repos/{}/")
        .id(repo_id)
        .query("share_type", share_type)
        .opt_query("from", from)
}

pub fn leave_shared_group_owned_repo(repo_id: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/group-owned-libraries/user-share-in-libraries/{}/").id(repo_id)
}

pub fn list_shareable_groups() -> Endpoint {
    Endpoint::get("/api/v2.1/shareable-groups/")
}

/// Repos the caller has shared out.
pub fn list_shared_repos() -> Endpoint {
    Endpoint::get("/api/v2.1/shared-repos/")
}

/// Legacy listing of shared repos.
pub fn get_shared_repos() -> Endpoint {
    Endpoint::get("/api2/shared-repos/")
}

/// Changes the permission of a repo share; `ShareTarget::Public` also turns
/// an owned repo into a public one.
pub fn update_repo_share_permission(
    repo_id: &str,
    permission: &str,
    target: ShareTarget<'_>,
) -> Endpoint {
    let endpoint = Endpoint::put("/api/v2.1/shared-repos/{}/")
        .id(repo_id)
        .field("permission", permission)
        .field("share_type", target.share_type());
    let endpoint = match target {
        ShareTarget::User(user) => endpoint.field("user", user),
        ShareTarget::Group(group_id) => endpoint.field("group_id", group_id),
        ShareTarget::Public => endpoint,
    };
    endpoint.plain_params()
}

pub fn unshare_repo(repo_id: &str, target: ShareTarget<'_>) -> Endpoint {
    let endpoint = Endpoint::delete("/api/v2.1/shared-repos/{}/")
        .id(repo_id)
        .query("share_type", target.share_type());
    match target {
        ShareTarget::User(user) => endpoint.query("user", user),
        ShareTarget::Group(group_id) => endpoint.query("group_id", group_id),
        ShareTarget::Public => endpoint,
    }
}
