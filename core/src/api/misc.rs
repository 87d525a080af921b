//! Notifications, devices, activities, avatars, thumbnails and user search.

use crate::endpoint::Endpoint;

pub fn list_popup_notices() -> Endpoint {
    Endpoint::get("/ajax/get_popup_notices/").xhr()
}

/// Marks all notifications as seen.
pub fn update_notifications() -> Endpoint {
    Endpoint::put("/api/v2.1/notifications/")
}

pub fn get_unseen_notification_count() -> Endpoint {
    Endpoint::get("/api/v2.1/notifications/")
}

pub fn list_linked_devices() -> Endpoint {
    Endpoint::get("/api2/devices/")
}

pub fn unlink_device(platform: &str, device_id: &str) -> Endpoint {
    Endpoint::delete("/api2/devices/")
        .field("platform", platform)
        .field("device_id", device_id)
        .plain_params()
}

pub fn list_activities(page: u32, avatar_size: u32) -> Endpoint {
    Endpoint::get("/api/v2.1/activities/")
        .query("page", page)
        .query("avatar_size", avatar_size)
}

pub fn get_user_avatar(username: &str, size: u32) -> Endpoint {
    Endpoint::get("/api2/avatars/user/{}/resized/{}/")
        .segment(username)
        .id(size)
}

pub fn create_thumbnail(repo_id: &str, path: &str, size: u32) -> Endpoint {
    Endpoint::get("/thumbnail/{}/create/")
        .id(repo_id)
        .query("path", path)
        .query("size", size)
        .xhr()
}

pub fn search_users(q: &str) -> Endpoint {
    Endpoint::get("/api2/search-user/").query("q", q)
}
