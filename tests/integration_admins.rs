mod common;

use axum::http::StatusCode;
use common::{codes, setup_test_app};
use pawhub_db::AdminDirectory;
use serde_json::json;

#[tokio::test]
async fn test_get_admin_privileges() {
    let app = setup_test_app();
    let editor = app.create_admin("role-editor", Some("settings:roles:read")).await;
    let target = app.create_admin("treasurer", Some("donation")).await;

    let (status, body) = app
        .get(
            &format!("/api/admins/{}/privileges", target.id),
            Some(&app.token_for(&editor)),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin_id"], target.id);
    assert_eq!(body["privileges"], "donation");
    assert_eq!(
        codes(&body["permissions"]),
        vec!["finance:read", "finance:transactions:read", "donation"]
    );
}

#[tokio::test]
async fn test_update_privileges_invalidates_target_cache() {
    let app = setup_test_app();
    let editor = app.create_admin("role-admin", Some("settings:roles:write")).await;
    let target = app.create_admin("groomer", Some("shop:read")).await;
    let target_token = app.token_for(&target);

    let (status, body) = app.get("/api/auth/me", Some(&target_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(codes(&body["permissions"]).contains(&"shop:products:read"));
    assert!(app.cache.peek(target.id).await.is_some());

    let (status, body) = app
        .put(
            &format!("/api/admins/{}/privileges", target.id),
            Some(&app.token_for(&editor)),
            json!({ "privileges": "pets:categories:write" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["privileges"], "pets:categories:write");
    assert_eq!(
        codes(&body["permissions"]),
        vec!["pets:categories:read", "pets:categories:write"]
    );
    assert!(app.cache.peek(target.id).await.is_none());

    let (_, body) = app.get("/api/auth/me", Some(&target_token)).await;
    let permissions = codes(&body["permissions"]);
    assert!(!permissions.contains(&"shop:products:read"));
    assert!(permissions.contains(&"pets:categories:write"));
}

#[tokio::test]
async fn test_read_only_editor_cannot_update() {
    let app = setup_test_app();
    let editor = app.create_admin("auditor", Some("settings:roles:read")).await;
    let target = app.create_admin("groomer", Some("shop:read")).await;
    let token = app.token_for(&editor);
    let uri = format!("/api/admins/{}/privileges", target.id);

    let (status, _) = app.get(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .put(&uri, Some(&token), json!({ "privileges": "111" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Access denied. Missing required permission: settings:roles:write"
    );
}

#[tokio::test]
async fn test_update_without_session_is_unauthorized() {
    let app = setup_test_app();
    let target = app.create_admin("groomer", Some("shop:read")).await;

    let (status, _) = app
        .put(
            &format!("/api/admins/{}/privileges", target.id),
            None,
            json!({ "privileges": "111" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_unknown_admin_is_not_found() {
    let app = setup_test_app();
    let editor = app.create_admin("root", Some("111")).await;

    let (status, body) = app
        .put(
            "/api/admins/9999/privileges",
            Some(&app.token_for(&editor)),
            json!({ "privileges": "shop:read" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Administrator 9999 not found");
}

#[tokio::test]
async fn test_update_rejects_malformed_privileges() {
    let app = setup_test_app();
    let editor = app.create_admin("root", Some("111")).await;
    let target = app.create_admin("groomer", Some("shop:read")).await;

    let (status, _) = app
        .put(
            &format!("/api/admins/{}/privileges", target.id),
            Some(&app.token_for(&editor)),
            json!({ "privileges": "shop:read;pets:write" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_blank_privileges_revoke_everything() {
    let app = setup_test_app();
    let editor = app.create_admin("root", Some("111")).await;
    let target = app.create_admin("role-editor", Some("settings:roles:read")).await;
    let target_token = app.token_for(&target);

    let (status, _) = app.get("/api/permissions/catalog", Some(&target_token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .put(
            &format!("/api/admins/{}/privileges", target.id),
            Some(&app.token_for(&editor)),
            json!({ "privileges": "  " }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["privileges"].is_null());
    assert!(codes(&body["permissions"]).is_empty());

    // Still a valid session, but no longer allowed
    let (status, _) = app.get("/api/permissions/catalog", Some(&target_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get("/api/auth/me", Some(&target_token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_only_super_admin_grants_full_access() {
    let app = setup_test_app();
    let editor = app.create_admin("role-admin", Some("settings:roles:write")).await;
    let root = app.create_admin("root", Some("111")).await;
    let uri = format!("/api/admins/{}/privileges", editor.id);

    for privileges in ["111", "shop:read,111"] {
        let (status, body) = app
            .put(&uri, Some(&app.token_for(&editor)), json!({ "privileges": privileges }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only a super administrator can grant full access");
    }

    let unchanged = app.directory.find_by_id(editor.id).await.unwrap().unwrap();
    assert_eq!(unchanged.privileges.as_deref(), Some("settings:roles:write"));

    let (status, body) = app
        .put(&uri, Some(&app.token_for(&root)), json!({ "privileges": "111" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["privileges"], "111");
}
