//! Groups, group membership and group-owned libraries.

use crate::endpoint::Endpoint;

pub fn list_groups(with_repos: bool) -> Endpoint {
    Endpoint::get("/api/v2.1/groups/").query("with_repos", u8::from(with_repos))
}

pub fn get_group(group_id: u64) -> Endpoint {
    Endpoint::get("/api/v2.1/groups/{}/").id(group_id)
}

pub fn create_group(name: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/groups/").field("name", name)
}

pub fn rename_group(group_id: u64, name: &str) -> Endpoint {
    Endpoint::put("/api/v2.1/groups/{}/")
        .id(group_id)
        .field("name", name)
        .plain_params()
}

pub fn transfer_group(group_id: u64, owner: &str) -> Endpoint {
    Endpoint::put("/api/v2.1/groups/{}/")
        .id(group_id)
        .field("owner", owner)
        .plain_params()
}

pub fn delete_group(group_id: u64) -> Endpoint {
    Endpoint::delete("/api/v2.1/groups/{}/").id(group_id)
}

pub fn list_group_repos(group_id: u64) -> Endpoint {
    Endpoint::get("/api/v2.1/groups/{}/libraries/").id(group_id)
}

pub fn list_group_members(group_id: u64, is_admin: bool, avatar_size: u32) -> Endpoint {
    Endpoint::get("/api/v2.1/groups/{}/members/")
        .id(group_id)
        .query("avatar_size", avatar_size)
        .query("is_admin", is_admin)
}

pub fn add_group_member(group_id: u64, username: &str) -> Endpoint {
    Endpoint::post("/api/v2.1/groups/{}/members/")
        .id(group_id)
        .field("email", username)
        .plain_params()
}

/// The server expects the emails as one comma-separated value.
pub fn add_group_members(group_id: u64, usernames: &[&str]) -> Endpoint {
    Endpoint::post("/api/v2.1/groups/{}/members/bulk/")
        .id(group_id)
        .field("emails", usernames.join(","))
}

pub fn delete_group_member(group_id: u64, username: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/groups/{}/members/{}/")
        .id(group_id)
        .segment(username)
}

/// Removes the caller from the group; same route as deleting a member.
pub fn quit_group(group_id: u64, username: &str) -> Endpoint {
    delete_group_member(group_id, username)
}

pub fn set_group_admin(group_id: u64, username: &str, is_admin: bool) -> Endpoint {
    Endpoint::put("/api/v2.1/groups/{}/members/{}/")
        .id(group_id)
        .segment(username)
        .field("is_admin", is_admin)
        .plain_params()
}

/// `permission` defaults to `rw`.
pub fn create_group_owned_library(
    group_id: u64,
    repo_name: &str,
    permission: Option<&str>,
) -> Endpoint {
    Endpoint::post("/api/v2.1/groups/{}/group-owned-libraries/")
        .id(group_id)
        .field("name", repo_name)
        .field("permission", permission.unwrap_or("rw"))
}

pub fn delete_group_owned_library(group_id: u64, repo_id: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/groups/{}/group-owned-libraries/{}/")
        .id(group_id)
        .id(repo_id)
}

pub fn share_group_owned_repo_to_users(
    repo_id: &str,
    permission: &str,
    usernames: &[&str],
) -> Endpoint {
    Endpoint::post("/api/v2.1/group-owned-libraries/{}/user-share/")
        .id(repo_id)
        .field("permission", permission)
        .field_list("username", usernames.iter().copied())
}

pub fn modify_group_owned_repo_user_permission(
    repo_id: &str,
    permission: &str,
    username: &str,
) -> Endpoint {
    Endpoint::put("/api/v2.1/group-owned-libraries/{}/user-share/")
        .id(repo_id)
        .field("permission", permission)
        .field("username", username)
}

pub fn delete_group_owned_repo_user_share(repo_id: &str, username: &str) -> Endpoint {
    Endpoint::delete("/api/v2.1/group-owned-libraries/{}/user-share/")
        .id(repo_id)
        .field("username", username)
        .plain_params()
}

pub fn share_group_owned_repo_to_groups(
    repo_id: &str,
    permission: &str,
    group_ids: &[u64],
) -> Endpoint {
    Endpoint::post("/api/v2.1/group-owned-libraries/{}/group-share/")
        .id(repo_id)
        .field("permission", permission)
        .field_list("group_id", group_ids.iter().copied())
}

pub fn modify_group_owned_repo_group_permission(
    repo_id: &str,
    permission: &str,
    group_id: u64,
) -> Endpoint {
    Endpoint::put("/api/v2.1/group-owned-libraries/{}/group-share/")
        .id(repo_id)
        .field("permission", permission)
        .field("group_id", group_id)
}

pub fn delete_group_owned_repo_group_share(repo_id: &str, group_id: u64) -> Endpoint {
    Endpoint::delete("/api/v2.1/group-owned-libraries/{}/group-share/")
        .id(repo_id)
        .field("group_id", group_id)
        .plain_params()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, RequestBody};
    use serde_json::json;

    const SERVER: &str = "https://x.com";

    #[test]
    fn list_groups_sends_numeric_flag() {
        let req = list_groups(true).build(SERVER);
        assert_eq!(req.url, "https://x.com/api/v2.1/groups/?with_repos=1");
        let req = list_groups(false).build(SERVER);
        assert_eq!(req.url, "https://x.com/api/v2.1/groups/?with_repos=0");
    }

    #[test]
    fn member_routes_encode_username() {
        let req = quit_group(5, "john+doe@example.com").build(SERVER);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(
            req.url,
            "https://x.com/api/v2.1/groups/5/members/john%2Bdoe%40example.com/"
        );
    }

    #[test]
    fn bulk_add_joins_emails_with_commas() {
        let req = add_group_members(2, &["a@x.com", "b@x.com"]).build(SERVER);
        assert_eq!(req.body.unwrap().form_values("emails"), vec!["a@x.com,b@x.com"]);
    }

    #[test]
    fn share_to_users_repeats_username_field() {
        let req = share_group_owned_repo_to_users("r1", "rw", &["a", "b", "c"]).build(SERVER);
        let body = req.body.unwrap();
        assert_eq!(body.form_values("permission"), vec!["rw"]);
        assert_eq!(body.form_values("username"), vec!["a", "b", "c"]);
    }

    #[test]
    fn unshare_sends_json_body_on_delete() {
        let req = delete_group_owned_repo_group_share("r1", 9).build(SERVER);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.body, Some(RequestBody::Json(json!({"group_id": 9}))));
    }

    #[test]
    fn group_owned_library_defaults_to_read_write() {
        let req = create_group_owned_library(1, "Team", None).build(SERVER);
        assert_eq!(req.body.unwrap().form_values("permission"), vec!["rw"]);
        let req = create_group_owned_library(1, "Team", Some("r")).build(SERVER);
        assert_eq!(req.body.unwrap().form_values("permission"), vec!["r"]);
    }
}
