mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::Value;

#[tokio::test]
async fn subscribe_then_unsubscribe() {
    let app = spawn_app().await;
    let (ana_id, _) = app.sign_up("ana").await;
    let (bob_id, bob_token) = app.sign_up("bob").await;
    let uri = format!("/api/v1/subscriptions/c/{ana_id}");

    let subscribed = app.post(&uri, &bob_token).await;
    assert_eq!(subscribed.status, StatusCode::OK);
    let created = &subscribed.body["data"]["newSubscription"];
    assert_eq!(created["subscriberId"], bob_id.as_str());
    assert_eq!(created["channelId"], ana_id.as_str());
    assert_eq!(subscribed.body["data"]["oldSubscription"], Value::Null);

    let unsubscribed = app.post(&uri, &bob_token).await;
    assert_eq!(unsubscribed.status, StatusCode::OK);
    assert_eq!(unsubscribed.body["data"]["newSubscription"], Value::Null);
    assert_eq!(
        unsubscribed.body["data"]["oldSubscription"]["id"],
        created["id"]
    );

    let listed = app.get(&uri, &bob_token).await;
    assert_eq!(listed.body["data"]["subscriberCount"], 0);
}

#[tokio::test]
async fn cannot_subscribe_to_self_or_unknown_channel() {
    let app = spawn_app().await;
    let (ana_id, ana_token) = app.sign_up("ana").await;

    let own = app
        .post(&format!("/api/v1/subscriptions/c/{ana_id}"), &ana_token)
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .post(
            &format!("/api/v1/subscriptions/c/{}", uuid::Uuid::now_v7()),
            &ana_token,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let invalid = app.post("/api/v1/subscriptions/c/ana", &ana_token).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn subscriber_and_channel_lists_carry_counts() {
    let app = spawn_app().await;
    let (ana_id, _) = app.sign_up("ana").await;
    let (bob_id, bob_token) = app.sign_up("bob").await;
    let (_, cleo_token) = app.sign_up("cleo").await;

    app.post(&format!("/api/v1/subscriptions/c/{ana_id}"), &bob_token)
        .await;
    app.post(&format!("/api/v1/subscriptions/c/{ana_id}"), &cleo_token)
        .await;
    app.post(&format!("/api/v1/subscriptions/c/{bob_id}"), &cleo_token)
        .await;

    let subscribers = app
        .get(&format!("/api/v1/subscriptions/c/{ana_id}"), &bob_token)
        .await;
    assert_eq!(subscribers.status, StatusCode::OK);
    let data = &subscribers.body["data"];
    assert_eq!(data["subscriberCount"], 2);
    let names: Vec<&str> = data["subscribers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["subscriber"]["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["cleo", "bob"]);

    let channels = app
        .get(&format!("/api/v1/subscriptions/u/{bob_id}"), &cleo_token)
        .await;
    let data = &channels.body["data"];
    assert_eq!(data["channelsCount"], 1);
    assert_eq!(data["channels"][0]["channel"]["username"], "ana");
    assert_eq!(data["channels"][0]["channel"]["subscriberCount"], 2);

    let nobody = app
        .get(
            &format!("/api/v1/subscriptions/u/{}", uuid::Uuid::now_v7()),
            &cleo_token,
        )
        .await;
    assert_eq!(nobody.status, StatusCode::NOT_FOUND);
}
