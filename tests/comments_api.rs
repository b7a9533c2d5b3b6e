mod common;

use axum::http::StatusCode;
use common::{id_of, spawn_app};
use serde_json::json;

#[tokio::test]
async fn comments_are_listed_newest_first_with_owner_and_likes() {
    let app = spawn_app().await;
    let (_, ana_token) = app.sign_up("ana").await;
    let (_, bob_token) = app.sign_up("bob").await;
    let video_id = id_of(&app.upload_video(&ana_token, "Talk").await);
    let uri = format!("/api/v1/comments/{video_id}");

    let first = app.post_json(&uri, &bob_token, json!({ "content": "  first  " })).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["data"]["content"], "first");
    assert_eq!(first.body["data"]["videoId"], video_id.as_str());
    let first_id = id_of(&first.body["data"]);

    app.post_json(&uri, &ana_token, json!({ "content": "second" })).await;
    app.patch(&format!("/api/v1/likes/c/{first_id}"), &ana_token).await;

    let listed = app.get(&format!("{uri}?limit=1"), &bob_token).await;
    assert_eq!(listed.status, StatusCode::OK);
    let data = &listed.body["data"];
    assert_eq!(data["totalDocs"], 2);
    assert_eq!(data["docs"][0]["content"], "second");
    assert_eq!(data["docs"][0]["owner"]["username"], "ana");

    let page_two = app.get(&format!("{uri}?limit=1&page=2"), &bob_token).await;
    let comment = &page_two.body["data"]["docs"][0];
    assert_eq!(comment["content"], "first");
    assert_eq!(comment["likesCount"], 1);
    assert_eq!(page_two.body["data"]["hasNextPage"], false);
}

#[tokio::test]
async fn comment_requires_content_and_visible_video() {
    let app = spawn_app().await;
    let (_, ana_token) = app.sign_up("ana").await;
    let (_, bob_token) = app.sign_up("bob").await;
    let video_id = id_of(&app.upload_video(&ana_token, "Talk").await);
    let uri = format!("/api/v1/comments/{video_id}");

    let blank = app.post_json(&uri, &bob_token, json!({ "content": "   " })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let missing = app.post_json(&uri, &bob_token, json!({})).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .post_json(
            &format!("/api/v1/comments/{}", uuid::Uuid::now_v7()),
            &bob_token,
            json!({ "content": "hello" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    app.patch(&format!("/api/v1/videos/toggle/publish/{video_id}"), &ana_token)
        .await;
    let hidden = app.post_json(&uri, &bob_token, json!({ "content": "hello" })).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let hidden_list = app.get(&uri, &bob_token).await;
    assert_eq!(hidden_list.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_author_can_edit_a_comment() {
    let app = spawn_app().await;
    let (_, ana_token) = app.sign_up("ana").await;
    let (_, bob_token) = app.sign_up("bob").await;
    let video_id = id_of(&app.upload_video(&ana_token, "Talk").await);

    let comment = app
        .post_json(
            &format!("/api/v1/comments/{video_id}"),
            &bob_token,
            json!({ "content": "nice" }),
        )
        .await;
    let comment_uri = format!("/api/v1/comments/{}", id_of(&comment.body["data"]));

    let by_video_owner = app
        .patch_json(&comment_uri, &ana_token, json!({ "content": "edited by ana" }))
        .await;
    assert_eq!(by_video_owner.status, StatusCode::UNAUTHORIZED);

    let by_author = app
        .patch_json(&comment_uri, &bob_token, json!({ "content": "very nice" }))
        .await;
    assert_eq!(by_author.status, StatusCode::OK);
    assert_eq!(by_author.body["data"]["content"], "very nice");
}

#[tokio::test]
async fn author_or_video_owner_can_delete_a_comment() {
    let app = spawn_app().await;
    let (_, ana_token) = app.sign_up("ana").await;
    let (_, bob_token) = app.sign_up("bob").await;
    let (_, cleo_token) = app.sign_up("cleo").await;
    let video_id = id_of(&app.upload_video(&ana_token, "Talk").await);
    let uri = format!("/api/v1/comments/{video_id}");

    let first = app.post_json(&uri, &bob_token, json!({ "content": "one" })).await;
    let second = app.post_json(&uri, &bob_token, json!({ "content": "two" })).await;
    let first_uri = format!("/api/v1/comments/{}", id_of(&first.body["data"]));
    let second_uri = format!("/api/v1/comments/{}", id_of(&second.body["data"]));

    let stranger = app.delete(&first_uri, &cleo_token).await;
    assert_eq!(stranger.status, StatusCode::UNAUTHORIZED);

    let by_author = app.delete(&first_uri, &bob_token).await;
    assert_eq!(by_author.status, StatusCode::OK);

    let by_video_owner = app.delete(&second_uri, &ana_token).await;
    assert_eq!(by_video_owner.status, StatusCode::OK);

    let again = app.delete(&second_uri, &ana_token).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let listed = app.get(&uri, &ana_token).await;
    assert_eq!(listed.body["data"]["totalDocs"], 0);
}
