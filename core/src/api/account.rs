use crate::endpoint::Endpoint;

/// Credential exchange. `Session::login` sends this without auth headers.
pub fn auth_token(username: &str, password: &str) -> Endpoint {
    Endpoint::post("/api2/auth-token/")
        .field("username", username)
        .field("password", password)
        .plain_params()
}

pub fn auth_ping() -> Endpoint {
    Endpoint::get("/api2/auth/ping/")
}

pub fn account_info() -> Endpoint {
    Endpoint::get("/api2/account/info/")
}
