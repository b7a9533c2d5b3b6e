mod common;

use axum::http::StatusCode;
use common::{id_of, spawn_app};
use serde_json::json;

#[tokio::test]
async fn tweets_are_listed_newest_first_with_like_counts() {
    let app = spawn_app().await;
    let (ana_id, ana_token) = app.sign_up("ana").await;
    let (_, bob_token) = app.sign_up("bob").await;

    let first = app
        .post_json("/api/v1/tweets", &ana_token, json!({ "content": "hello" }))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["data"]["ownerId"], ana_id.as_str());
    app.post_json("/api/v1/tweets", &ana_token, json!({ "content": "again" }))
        .await;

    app.patch(
        &format!("/api/v1/likes/t/{}", id_of(&first.body["data"])),
        &bob_token,
    )
    .await;

    let listed = app
        .get(&format!("/api/v1/tweets/user/{ana_id}"), &bob_token)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let tweets = listed.body["data"].as_array().unwrap();
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0]["content"], "again");
    assert_eq!(tweets[0]["likesCount"], 0);
    assert_eq!(tweets[1]["content"], "hello");
    assert_eq!(tweets[1]["likesCount"], 1);
}

#[tokio::test]
async fn tweet_content_is_required() {
    let app = spawn_app().await;
    let (_, token) = app.sign_up("ana").await;

    let blank = app
        .post_json("/api/v1/tweets", &token, json!({ "content": "  " }))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .send(common::json_request(
            axum::http::Method::POST,
            "/api/v1/tweets",
            Some(&token),
            Some(json!("just a string")),
        ))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["success"], false);
}

#[tokio::test]
async fn only_author_can_update_or_delete_a_tweet() {
    let app = spawn_app().await;
    let (_, ana_token) = app.sign_up("ana").await;
    let (_, bob_token) = app.sign_up("bob").await;

    let tweet = app
        .post_json("/api/v1/tweets", &ana_token, json!({ "content": "draft" }))
        .await;
    let uri = format!("/api/v1/tweets/{}", id_of(&tweet.body["data"]));

    let foreign_update = app
        .patch_json(&uri, &bob_token, json!({ "content": "mine now" }))
        .await;
    assert_eq!(foreign_update.status, StatusCode::UNAUTHORIZED);

    let foreign_delete = app.delete(&uri, &bob_token).await;
    assert_eq!(foreign_delete.status, StatusCode::UNAUTHORIZED);

    let updated = app
        .patch_json(&uri, &ana_token, json!({ "content": "final" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["content"], "final");

    let deleted = app.delete(&uri, &ana_token).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app.delete(&uri, &ana_token).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_tweets_for_unknown_user_is_not_found() {
    let app = spawn_app().await;
    let (_, token) = app.sign_up("ana").await;

    let unknown = app
        .get(&format!("/api/v1/tweets/user/{}", uuid::Uuid::now_v7()), &token)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let invalid = app.get("/api/v1/tweets/user/ana", &token).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}
