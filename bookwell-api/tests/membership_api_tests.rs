//! Integration tests for memberships and community-plan associations

mod helpers;

use axum::http::StatusCode;
use helpers::{
    make_request, membership_count, seed_community, seed_plan, seed_user, setup_test_server,
    TestServer,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn membership_body(user_id: Uuid, community_id: Uuid, plan_id: Uuid) -> Value {
    json!({
        "description": "Annual membership",
        "start_date": "2024-01-01",
        "end_date": "2024-12-31",
        "community_id": community_id,
        "user_id": user_id,
        "plan_id": plan_id,
    })
}

async fn associate_plan(server: &TestServer, community_id: Uuid, plan_id: Uuid) {
    let (status, _) = make_request(
        &server.app,
        "POST",
        "/community-plans",
        Some(json!({ "community_id": community_id, "plan_id": plan_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn create_membership_with_association_succeeds() {
    let server = setup_test_server().await;
    let user_id = seed_user(&server.store).await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    associate_plan(&server, community_id, plan_id).await;

    let (status, body) = make_request(
        &server.app,
        "POST",
        "/memberships",
        Some(membership_body(user_id, community_id, plan_id)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["user_id"], user_id.to_string());
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn create_membership_without_association_is_a_precondition_failure() {
    let server = setup_test_server().await;
    let user_id = seed_user(&server.store).await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    // No /community-plans call: the association is missing

    let (status, _) = make_request(
        &server.app,
        "POST",
        "/memberships",
        Some(membership_body(user_id, community_id, plan_id)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(membership_count(&server.store).await, 0);
}

#[tokio::test]
async fn create_membership_with_unknown_user_fails() {
    let server = setup_test_server().await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    associate_plan(&server, community_id, plan_id).await;

    let (status, _) = make_request(
        &server.app,
        "POST",
        "/memberships",
        Some(membership_body(Uuid::new_v4(), community_id, plan_id)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_membership_with_inverted_dates_is_rejected() {
    let server = setup_test_server().await;
    let user_id = seed_user(&server.store).await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    associate_plan(&server, community_id, plan_id).await;

    let (status, _) = make_request(
        &server.app,
        "POST",
        "/memberships",
        Some(json!({
            "start_date": "2024-12-31",
            "end_date": "2024-01-01",
            "community_id": community_id,
            "user_id": user_id,
            "plan_id": plan_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_community_plan_association_conflicts() {
    let server = setup_test_server().await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    associate_plan(&server, community_id, plan_id).await;

    let (status, _) = make_request(
        &server.app,
        "POST",
        "/community-plans",
        Some(json!({ "community_id": community_id, "plan_id": plan_id })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn community_plan_with_unknown_community_fails() {
    let server = setup_test_server().await;
    let plan_id = seed_plan(&server.store).await;

    let (status, _) = make_request(
        &server.app,
        "POST",
        "/community-plans",
        Some(json!({ "community_id": Uuid::new_v4(), "plan_id": plan_id })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_create_rolls_back_when_an_item_fails() {
    let server = setup_test_server().await;
    let user_id = seed_user(&server.store).await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    associate_plan(&server, community_id, plan_id).await;

    // Second item references a nonexistent user
    let (status, _) = make_request(
        &server.app,
        "POST",
        "/memberships/bulk",
        Some(json!({
            "memberships": [
                membership_body(user_id, community_id, plan_id),
                membership_body(Uuid::new_v4(), community_id, plan_id),
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(membership_count(&server.store).await, 0);
}

#[tokio::test]
async fn bulk_create_applies_all_items() {
    let server = setup_test_server().await;
    let user_a = seed_user(&server.store).await;
    let user_b = seed_user(&server.store).await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    associate_plan(&server, community_id, plan_id).await;

    let (status, body) = make_request(
        &server.app,
        "POST",
        "/memberships/bulk",
        Some(json!({
            "memberships": [
                membership_body(user_a, community_id, plan_id),
                membership_body(user_b, community_id, plan_id),
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap()["memberships"].as_array().unwrap().len(), 2);
    assert_eq!(membership_count(&server.store).await, 2);
}

#[tokio::test]
async fn bulk_create_rejects_empty_list() {
    let server = setup_test_server().await;

    let (status, _) = make_request(
        &server.app,
        "POST",
        "/memberships/bulk",
        Some(json!({ "memberships": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_and_delete_membership_round_trip() {
    let server = setup_test_server().await;
    let user_id = seed_user(&server.store).await;
    let community_id = seed_community(&server.store).await;
    let plan_id = seed_plan(&server.store).await;
    associate_plan(&server, community_id, plan_id).await;

    let (status, body) = make_request(
        &server.app,
        "POST",
        "/memberships",
        Some(membership_body(user_id, community_id, plan_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let membership_id = body.unwrap()["id"].as_str().unwrap().to_string();

    let (status, body) = make_request(
        &server.app,
        "GET",
        &format!("/memberships/{membership_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["description"], "Annual membership");

    let (status, _) = make_request(
        &server.app,
        "DELETE",
        &format!("/memberships/{membership_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = make_request(
        &server.app,
        "GET",
        &format!("/memberships/{membership_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
