//! Verify endpoint builds against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector names a catalog function, its arguments and the request it
//! must produce. Bodies are compared structurally: multipart forms as
//! ordered `[name, value]` pairs, plain params as JSON objects.

use seafile_core::api::{account, dirs, files, groups, misc, repos, reviews, shares, starred, wikis};
use seafile_core::encoding::encode_component;
use seafile_core::{Endpoint, FormPart, HttpMethod, HttpRequest, RequestBody};
use serde_json::{json, Value};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn s<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_else(|| panic!("missing string arg {key}"))
}

fn opt_s<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn n(args: &Value, key: &str) -> u64 {
    args[key].as_u64().unwrap_or_else(|| panic!("missing numeric arg {key}"))
}

fn list<'a>(args: &'a Value, key: &str) -> Vec<&'a str> {
    args[key]
        .as_array()
        .unwrap_or_else(|| panic!("missing list arg {key}"))
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect()
}

/// Maps a vector's `call` onto the catalog function it names.
fn endpoint_for(call: &str, args: &Value) -> Endpoint {
    match call {
        "list_repos" => repos::list_repos(&list(args, "types")),
        "list_wikis" => wikis::list_wikis(&list(args, "types")),
        "search_files" => {
            let ftype = list(args, "ftype");
            let query = repos::SearchQuery {
                q: s(args, "q"),
                ftype: &ftype,
                per_page: args.get("per_page").and_then(Value::as_u64).map(|p| p as u32),
                ..Default::default()
            };
            repos::search_files(&query)
        }
        "zip_download" => dirs::zip_download(
            s(args, "repo_id"),
            s(args, "parent_dir"),
            &list(args, "dirents"),
        ),
        "get_file_download_link" => files::get_file_download_link(s(args, "repo_id"), s(args, "path")),
        "delete_group_member" => groups::delete_group_member(n(args, "group_id"), s(args, "username")),
        "unstar_file" => starred::unstar_file(s(args, "repo_id"), s(args, "path")),
        "create_thumbnail" => misc::create_thumbnail(
            s(args, "repo_id"),
            s(args, "path"),
            n(args, "size") as u32,
        ),
        "create_share_link" => shares::create_share_link(
            s(args, "repo_id"),
            s(args, "path"),
            opt_s(args, "password"),
            args.get("expire_days").and_then(Value::as_u64).map(|d| d as u32),
            opt_s(args, "permissions"),
        ),
        "copy_dirents" => dirs::copy_dirents(
            s(args, "repo_id"),
            s(args, "dst_repo_id"),
            s(args, "dst_dir"),
            s(args, "parent_dir"),
            &list(args, "names"),
        ),
        "add_group_members" => groups::add_group_members(n(args, "group_id"), &list(args, "usernames")),
        "add_reviewers" => reviews::add_reviewers(n(args, "review_id"), &list(args, "reviewers")),
        "add_wiki" => wikis::add_wiki(
            args["use_exist_repo"].as_bool().unwrap(),
            s(args, "name"),
            opt_s(args, "repo_id"),
        ),
        "rename_group" => groups::rename_group(n(args, "group_id"), s(args, "name")),
        "create_mine_repo" => {
            repos::create_mine_repo(s(args, "name"), opt_s(args, "desc"), opt_s(args, "password"))
        }
        "unlink_device" => misc::unlink_device(s(args, "platform"), s(args, "device_id")),
        "auth_token" => account::auth_token(s(args, "username"), s(args, "password")),
        other => panic!("no catalog mapping for {other}"),
    }
}

/// Renders the body the way vectors spell it.
fn body_as_vector(body: &Option<RequestBody>) -> Value {
    match body {
        None => Value::Null,
        Some(RequestBody::Json(value)) => json!({ "json": value }),
        Some(RequestBody::Multipart(parts)) => {
            let form: Vec<Value> = parts
                .iter()
                .map(|part| match part {
                    FormPart::Text { name, value } => json!([name, value]),
                    FormPart::File { name, blob } => json!([name, { "file": blob.file_name }]),
                })
                .collect();
            json!({ "form": form })
        }
    }
}

fn check_request(name: &str, server: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.url,
        format!("{server}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    assert_eq!(body_as_vector(&req.body), expected["body"], "{name}: body");
    assert!(!req.anonymous, "{name}: server endpoints carry session auth");
}

fn run_request_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let server = vectors["server"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = endpoint_for(case["call"].as_str().unwrap(), &case["args"]);
        let req = endpoint.build(server);
        check_request(name, server, &req, &case["expected_request"]);
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn encoding_test_vectors() {
    let raw = include_str!("../../test-vectors/encoding.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        assert_eq!(encode_component(input), case["expected"].as_str().unwrap(), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Paths and queries
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    run_request_vectors(include_str!("../../test-vectors/queries.json"));
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[test]
fn body_test_vectors() {
    run_request_vectors(include_str!("../../test-vectors/bodies.json"));
}
