use crate::endpoint::Endpoint;

pub fn list_starred() -> Endpoint {
    Endpoint::get("/api2/starredfiles/")
}

pub fn star_file(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::post("/api2/starredfiles/")
        .field("repo_id", repo_id)
        .field("p", path)
}

pub fn unstar_file(repo_id: &str, path: &str) -> Endpoint {
    Endpoint::delete("/api2/starredfiles/")
        .query("repo_id", repo_id)
        .query("p", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstar_uses_query_not_body() {
        let req = unstar_file("r1", "/a b.md").build("https://x.com");
        assert_eq!(req.url, "https://x.com/api2/starredfiles/?repo_id=r1&p=%2Fa%20b.md");
        assert!(req.body.is_none());
    }
}
