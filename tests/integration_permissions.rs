mod common;

use axum::http::StatusCode;
use common::{codes, request, setup_test_app};
use pawhub_core::permissions::all_permissions;
use pawhub_db::AdminDirectory;
use serde_json::{Value, json};

async fn allowed(app: &common::TestApp, token: &str, required: Value) -> bool {
    let (status, body) = app
        .post(
            "/api/permissions/check",
            Some(token),
            json!({ "required": required }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body["allowed"].as_bool().unwrap()
}

#[tokio::test]
async fn test_check_single_and_any_of() {
    let app = setup_test_app();
    let admin = app.create_admin("groomer", Some("shop:read,pets:write")).await;
    let token = app.token_for(&admin);

    assert!(allowed(&app, &token, json!("shop:products:read")).await);
    assert!(allowed(&app, &token, json!("pets:categories:write")).await);
    assert!(!allowed(&app, &token, json!("members:read")).await);
    assert!(allowed(&app, &token, json!(["members:read", "pets:appointments:write"])).await);
    assert!(!allowed(&app, &token, json!(["members:read", "finance:read"])).await);
}

#[tokio::test]
async fn test_check_sentinel_and_empty_list() {
    let app = setup_test_app();
    let root = app.create_admin("root", Some("111")).await;
    let member = app.create_admin("member-admin", Some("members:read")).await;

    let root_token = app.token_for(&root);
    assert!(allowed(&app, &root_token, json!("settings:delete")).await);
    assert!(allowed(&app, &root_token, json!("anything:not:real")).await);
    assert!(allowed(&app, &root_token, json!("")).await);
    assert!(allowed(&app, &root_token, json!([])).await);

    let member_token = app.token_for(&member);
    assert!(!allowed(&app, &member_token, json!([])).await);
}

#[tokio::test]
async fn test_check_without_privileges_denies() {
    let app = setup_test_app();
    let admin = app.create_admin("new-hire", None).await;
    let token = app.token_for(&admin);

    assert!(!allowed(&app, &token, json!("members:read")).await);
    assert!(!allowed(&app, &token, json!(["shop:read", "pets:read"])).await);
}

#[tokio::test]
async fn test_check_requires_session() {
    let app = setup_test_app();
    let (status, _) = app
        .post(
            "/api/permissions/check",
            None,
            json!({ "required": "members:read" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_menu_is_gated_by_permissions() {
    let app = setup_test_app();
    let admin = app.create_admin("vet", Some("pets:write")).await;
    let token = app.token_for(&admin);

    let (status, body) = app.get("/api/permissions/menu", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let sections = body.as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["key"], "pets");

    let items: Vec<&str> = sections[0]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    assert_eq!(items, vec!["pets", "pets-categories", "pets-appointments"]);
}

#[tokio::test]
async fn test_menu_for_super_admin_has_every_section() {
    let app = setup_test_app();
    let admin = app.create_admin("root", Some("111")).await;
    let token = app.token_for(&admin);

    let (_, body) = app.get("/api/permissions/menu", Some(&token)).await;
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|section| section["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["members", "shop", "pets", "forum", "finance", "settings"]
    );
}

#[tokio::test]
async fn test_catalog_unauthorized_vs_forbidden() {
    let app = setup_test_app();
    let shopkeeper = app.create_admin("shopkeeper", Some("shop:read")).await;
    let role_editor = app
        .create_admin("role-editor", Some("settings:roles:read"))
        .await;

    let (status, body) = app.get("/api/permissions/catalog", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, body) = app
        .get("/api/permissions/catalog", Some(&app.token_for(&shopkeeper)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Access denied. Missing required permission: settings:roles:read"
    );

    let (status, body) = app
        .get("/api/permissions/catalog", Some(&app.token_for(&role_editor)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), all_permissions().len());
    assert_eq!(entries[0]["code"], "111");
}

#[tokio::test]
async fn test_expand_preview() {
    let app = setup_test_app();
    let admin = app
        .create_admin("role-editor", Some("settings:roles:read"))
        .await;
    let token = app.token_for(&admin);

    let (status, body) = app
        .post(
            "/api/permissions/expand",
            Some(&token),
            json!({ "privileges": "general" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["privileges"], "general");
    assert_eq!(body["is_super_admin"], false);
    assert_eq!(
        codes(&body["permissions"]),
        vec!["members:read", "shop:read", "general"]
    );

    let (status, body) = app
        .post(
            "/api/permissions/expand",
            Some(&token),
            json!({ "privileges": "111" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_super_admin"], true);

    let (status, _) = app
        .post(
            "/api/permissions/expand",
            Some(&token),
            json!({ "privileges": "shop:read,<script>" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_expand_is_guarded() {
    let app = setup_test_app();
    let admin = app.create_admin("groomer", Some("pets:read")).await;

    let (status, _) = app
        .post(
            "/api/permissions/expand",
            Some(&app.token_for(&admin)),
            json!({ "privileges": "111" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_stale_cache_entry_is_not_used() {
    let app = setup_test_app();
    let admin = app.create_admin("moderator", Some("shop:read")).await;
    let token = app.token_for(&admin);

    app.cache.preload(&admin).await;

    // Privileges changed behind the API's back
    app.directory
        .update_privileges(admin.id, Some("forum:read"))
        .await
        .unwrap();

    assert!(!allowed(&app, &token, json!("shop:read")).await);
    assert!(allowed(&app, &token, json!("forum:articles:read")).await);
    assert_eq!(
        app.cache.peek(admin.id).await.unwrap().raw_privileges,
        "forum:read"
    );
}

#[tokio::test]
async fn test_reload_rebuilds_cache() {
    let app = setup_test_app();
    let admin = app.create_admin("accountant", Some("finance:transactions:read")).await;
    let token = app.token_for(&admin);

    let (status, body) = app
        .send(request("POST", "/api/permissions/reload", Some(&token), None))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        codes(&body["permissions"]),
        vec!["finance:transactions:read"]
    );

    let cached = app.cache.peek(admin.id).await.unwrap();
    assert_eq!(cached.raw_privileges, "finance:transactions:read");
}
