//! HTTP-level integration tests for idea endpoints, including generation
//! and the status lifecycle.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_idea, create_project, delete_auth, get_auth, post_auth, post_json_auth,
    put_json_auth, token_for,
};
use posty_ai::TextTask;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn list_ideas(test: &common::TestApp, token: &str, project_id: &str) -> Vec<serde_json::Value> {
    let response =
        get_auth(test.app(), &format!("/api/v1/projects/{project_id}/ideas"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].as_array().unwrap().clone()
}

async fn idea_row(pool: &PgPool, id: &str) -> (String, String) {
    sqlx::query_as("SELECT idea_text, status FROM ideas WHERE id = $1::uuid")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_idea_starts_new(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;

    let response = post_json_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas"),
        json!({"idea_text": "  Why onboarding matters  "}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "new");
    assert_eq!(json["data"]["idea_text"], "Why onboarding matters");
    assert_eq!(json["data"]["project_id"], project_id.as_str());
    assert!(json["data"]["image_url"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_idea_validation(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;

    for body in [json!({}), json!({"idea_text": "   "})] {
        let response = post_json_auth(
            test.app(),
            &format!("/api/v1/projects/{project_id}/ideas"),
            body,
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_idea_in_foreign_project_is_404(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let alice = token_for(Uuid::new_v4());
    let bob = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &alice, json!({"name": "Acme"})).await;

    let response = post_json_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas"),
        json!({"idea_text": "Sneaky"}),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(list_ideas(&test, &alice, &project_id).await.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_ideas_newest_first_and_scoped(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let alice = token_for(Uuid::new_v4());
    let bob = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &alice, json!({"name": "Acme"})).await;
    create_idea(&test, &alice, &project_id, "First").await;
    create_idea(&test, &alice, &project_id, "Second").await;

    let ideas = list_ideas(&test, &alice, &project_id).await;
    let texts: Vec<&str> = ideas.iter().map(|i| i["idea_text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["Second", "First"]);

    assert!(list_ideas(&test, &bob, &project_id).await.is_empty());
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_ideas_inserts_up_to_five_new(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;

    let response = post_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas/generate"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let ideas = json["data"].as_array().unwrap();
    assert_eq!(ideas.len(), 5);
    assert!(ideas.iter().all(|i| i["status"] == "new"));
    assert_eq!(ideas[0]["idea_text"], "Onboarding mistakes");
    assert_eq!(list_ideas(&test, &token, &project_id).await.len(), 5);

    let request = test.text.last_request();
    assert_eq!(request.task, TextTask::Ideas);
    assert!(request.json_schema.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_ideas_skips_duplicates_of_previous(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    create_idea(&test, &token, &project_id, "Pricing myths").await;
    test.text
        .set_ideas(r#"{"ideas": ["pricing  MYTHS", "Fresh angle", "fresh angle", "Another take"]}"#);

    let response = post_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas/generate"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let texts: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["idea_text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Fresh angle", "Another take"]);

    let prompt = test.text.last_request().prompt;
    assert!(prompt.contains("Pricing myths"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_ideas_excludes_archived_from_previous(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    let archived = create_idea(&test, &token, &project_id, "Old archived idea").await;
    create_idea(&test, &token, &project_id, "Live idea").await;
    delete_auth(test.app(), &format!("/api/v1/ideas/{archived}"), &token).await;

    post_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas/generate"),
        &token,
    )
    .await;

    let prompt = test.text.last_request().prompt;
    assert!(prompt.contains("Live idea"));
    assert!(!prompt.contains("Old archived idea"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_ideas_with_nothing_usable_inserts_nothing(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    test.text.set_ideas(r#"{"ideas": ["", "   ", "1."]}"#);

    let response = post_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas/generate"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "GENERATION_FAILED");
    assert!(list_ideas(&test, &token, &project_id).await.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_ideas_with_malformed_json_inserts_nothing(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;

    for reply in [r#"{"ideas": ["Alpha", "Beta""#, r#"{"ideas": "Alpha"}"#] {
        test.text.set_ideas(reply);
        let response = post_auth(
            test.app(),
            &format!("/api/v1/projects/{project_id}/ideas/generate"),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "reply: {reply}");
        assert_eq!(body_json(response).await["code"], "GENERATION_FAILED");
    }

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ideas")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_ideas_upstream_failure_is_500(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    test.text.fail_all();

    let response = post_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas/generate"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "GENERATION_FAILED");
    assert!(!json["error"].as_str().unwrap().contains("fake upstream"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_ideas_for_foreign_project_is_404(pool: PgPool) {
    let test = common::build_test_app(pool).await;
    let alice = token_for(Uuid::new_v4());
    let bob = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &alice, json!({"name": "Acme"})).await;

    let response = post_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas/generate"),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(test.text.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Update / lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_idea_text_and_status(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    let id = create_idea(&test, &token, &project_id, "Draft hook").await;

    let response = put_json_auth(
        test.app(),
        &format!("/api/v1/ideas/{id}"),
        json!({"idea_text": "Sharper hook", "status": "ready"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let (text, status) = idea_row(&pool, &id).await;
    assert_eq!(text, "Sharper hook");
    assert_eq!(status, "ready");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_can_move_backwards(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    let id = create_idea(&test, &token, &project_id, "Idea").await;

    for status in ["posted", "new", "archived", "content_generated"] {
        let response = put_json_auth(
            test.app(),
            &format!("/api/v1/ideas/{id}"),
            json!({"status": status}),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(idea_row(&pool, &id).await.1, status);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_idea_without_fields_is_400_and_mutates_nothing(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    let id = create_idea(&test, &token, &project_id, "Untouched").await;

    let response =
        put_json_auth(test.app(), &format!("/api/v1/ideas/{id}"), json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MISSING_FIELDS");

    assert_eq!(idea_row(&pool, &id).await, ("Untouched".to_string(), "new".to_string()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_idea_with_invalid_status_is_400(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    let id = create_idea(&test, &token, &project_id, "Idea").await;

    let response = put_json_auth(
        test.app(),
        &format!("/api/v1/ideas/{id}"),
        json!({"status": "published"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(idea_row(&pool, &id).await.1, "new");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_idea_of_other_user_affects_nothing(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let alice = token_for(Uuid::new_v4());
    let bob = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &alice, json!({"name": "Acme"})).await;
    let id = create_idea(&test, &alice, &project_id, "Mine").await;

    put_json_auth(
        test.app(),
        &format!("/api/v1/ideas/{id}"),
        json!({"idea_text": "Hijacked", "status": "posted"}),
        &bob,
    )
    .await;

    assert_eq!(idea_row(&pool, &id).await, ("Mine".to_string(), "new".to_string()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_archive_keeps_row(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let token = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &token, json!({"name": "Acme"})).await;
    let id = create_idea(&test, &token, &project_id, "Keep me").await;

    let response = delete_auth(test.app(), &format!("/api/v1/ideas/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(idea_row(&pool, &id).await, ("Keep me".to_string(), "archived".to_string()));
    let ideas = list_ideas(&test, &token, &project_id).await;
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0]["status"], "archived");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_archive_of_other_user_is_silent_noop(pool: PgPool) {
    let test = common::build_test_app(pool.clone()).await;
    let alice = token_for(Uuid::new_v4());
    let bob = token_for(Uuid::new_v4());
    let project_id = create_project(&test, &alice, json!({"name": "Acme"})).await;
    let id = create_idea(&test, &alice, &project_id, "Mine").await;

    let response = delete_auth(test.app(), &format!("/api/v1/ideas/{id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(idea_row(&pool, &id).await.1, "new");
}
