// tests/providers.rs

//! Provider tests against a fake transport: request shapes, wire-key
//! translation and the listing quirks of both resource kinds.

mod common;

use common::FakeTransport;
use nexctl::blobstores::BlobstoreProvider;
use nexctl::roles::RoleProvider;
use nexctl::{Blobstore, Ensure, Role, compute_plan};
use serde_json::json;

fn reader_role() -> Role {
    Role {
        id: "reader".to_string(),
        name: None,
        description: Some("read access".to_string()),
        source: None,
        read_only: None,
        privileges: Some(vec!["nx-repository-view-raw-*-read".to_string()]),
        roles: None,
    }
}

#[test]
fn role_get_snake_cases_wire_keys() {
    let transport = FakeTransport::new();
    transport.respond(
        "GET",
        "security/roles",
        200,
        r#"[{"id": "reader", "name": "reader", "readOnly": true, "privileges": ["p1"], "roles": []}]"#,
    );

    let roles = RoleProvider::new(&transport).get(&[]).unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, "reader");
    assert_eq!(roles[0].read_only, Some(true));
    assert_eq!(roles[0].privileges.as_deref(), Some(&["p1".to_string()][..]));
}

#[test]
fn role_get_ignores_names_filter() {
    let transport = FakeTransport::new();
    transport.respond(
        "GET",
        "security/roles",
        200,
        r#"[{"id": "a"}, {"id": "b"}]"#,
    );

    // The listing endpoint is fetched in full regardless of the filter
    let roles = RoleProvider::new(&transport)
        .get(&["a".to_string()])
        .unwrap();
    assert_eq!(roles.len(), 2);
}

#[test]
fn role_get_continues_past_http_error() {
    let transport = FakeTransport::new();
    transport.respond("GET", "security/roles", 503, "[]");

    // The error is logged, the (valid) body still parses
    let roles = RoleProvider::new(&transport).get(&[]).unwrap();
    assert!(roles.is_empty());
}

#[test]
fn role_get_propagates_malformed_json() {
    let transport = FakeTransport::new();
    transport.respond("GET", "security/roles", 200, "<html>proxy error</html>");

    assert!(RoleProvider::new(&transport).get(&[]).is_err());
}

#[test]
fn role_create_posts_with_merged_name() {
    let transport = FakeTransport::new();
    transport.respond("POST", "security/roles", 200, "{}");

    RoleProvider::new(&transport)
        .create("reader", &reader_role())
        .unwrap();

    let posts = transport.requests_for("POST");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "security/roles");
    let body = posts[0].body.as_ref().unwrap();
    assert_eq!(body["name"], json!("reader"));
    assert_eq!(body["description"], json!("read access"));
}

#[test]
fn role_update_puts_camel_case_with_both_ids() {
    let transport = FakeTransport::new();
    transport.respond("PUT", "security/roles/reader", 200, "{}");

    let mut role = reader_role();
    role.read_only = Some(false);
    RoleProvider::new(&transport).update("reader", &role).unwrap();

    let puts = transport.requests_for("PUT");
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, "security/roles/reader");
    let body = puts[0].body.as_ref().unwrap();
    assert_eq!(body["name"], json!("reader"));
    assert_eq!(body["id"], json!("reader"));
    assert_eq!(body["readOnly"], json!(false));
    assert!(body.get("read_only").is_none());
}

#[test]
fn role_delete_targets_id() {
    let transport = FakeTransport::new();
    transport.respond("DELETE", "security/roles/legacy", 204, "");

    RoleProvider::new(&transport).delete("legacy").unwrap();

    let deletes = transport.requests_for("DELETE");
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].path, "security/roles/legacy");
}

#[test]
fn blobstore_get_filters_names_and_lowercases_type() {
    let transport = FakeTransport::new();
    transport.respond(
        "GET",
        "blobstores",
        200,
        r#"[{"name": "a", "type": "File"}, {"name": "b", "type": "File"}, {"name": "c", "type": "S3"}]"#,
    );
    transport.respond("GET", "blobstores/file/a", 200, r#"{"path": "/data/a"}"#);
    transport.respond(
        "GET",
        "blobstores/s3/c",
        200,
        r#"{"bucketConfiguration": {"bucket": {"name": "c"}}}"#,
    );

    let names = vec!["a".to_string(), "c".to_string()];
    let stores = BlobstoreProvider::new(&transport).get(&names).unwrap();

    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].name, "a");
    assert_eq!(stores[0].store_type, "file");
    assert_eq!(stores[0].attributes["path"], json!("/data/a"));
    assert_eq!(stores[1].store_type, "s3");

    // no detail fetch for the unrequested store
    let gets = transport.requests_for("GET");
    assert!(!gets.iter().any(|r| r.path == "blobstores/file/b"));
}

#[test]
fn blobstore_get_skips_failing_detail_fetches() {
    let transport = FakeTransport::new();
    transport.respond(
        "GET",
        "blobstores",
        200,
        r#"[{"name": "a", "type": "File"}, {"name": "x", "type": "Azure"}]"#,
    );
    transport.respond("GET", "blobstores/file/a", 200, r#"{"path": "/data/a"}"#);
    // blobstores/azure/x is unstubbed -> 404 -> skipped

    let names = vec!["a".to_string(), "x".to_string()];
    let stores = BlobstoreProvider::new(&transport).get(&names).unwrap();

    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].name, "a");
}

#[test]
fn blobstore_create_posts_to_typed_route() {
    let transport = FakeTransport::new();
    transport.respond("POST", "blobstores/file", 204, "");

    let store = Blobstore {
        name: "default".to_string(),
        store_type: "file".to_string(),
        attributes: json!({"path": "/nexus-data/blobs/default"}),
    };
    BlobstoreProvider::new(&transport)
        .create("default", &store)
        .unwrap();

    let posts = transport.requests_for("POST");
    assert_eq!(posts[0].path, "blobstores/file");
    let body = posts[0].body.as_ref().unwrap();
    assert_eq!(body["name"], json!("default"));
    assert_eq!(body["path"], json!("/nexus-data/blobs/default"));
}

#[test]
fn blobstore_update_and_delete_routes() {
    let transport = FakeTransport::new();
    transport.respond("PUT", "blobstores/file/default", 204, "");
    transport.respond("DELETE", "blobstores/old", 204, "");

    let store = Blobstore {
        name: "default".to_string(),
        store_type: "file".to_string(),
        attributes: json!({"path": "/data"}),
    };
    let provider = BlobstoreProvider::new(&transport);
    provider.update("default", &store).unwrap();
    provider.delete("old").unwrap();

    assert_eq!(transport.requests_for("PUT")[0].path, "blobstores/file/default");
    assert_eq!(transport.requests_for("DELETE")[0].path, "blobstores/old");
}

#[test]
fn fetched_state_feeds_the_planner() {
    let transport = FakeTransport::new();
    transport.respond(
        "GET",
        "security/roles",
        200,
        r#"[{"id": "reader", "description": "stale", "privileges": ["p1"]}]"#,
    );

    let current = RoleProvider::new(&transport).get(&[]).unwrap();

    let desired_role = Role {
        description: Some("fresh".to_string()),
        privileges: None,
        ..reader_role()
    };
    let desired = [(Ensure::Present, &desired_role)];
    let plan = compute_plan(&desired, &current, |c, d| nexctl::roles::insync(c, d));

    assert_eq!(plan.actions.len(), 1);
    assert_eq!(plan.actions[0].name(), "reader");
}
