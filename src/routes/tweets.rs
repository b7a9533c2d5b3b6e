use axum::extract::{Path, State};

use crate::{
    db,
    error::AppError,
    extract::{parse_id, ApiJson},
    middleware::auth::AuthUser,
    models::*,
    response::ApiResponse,
    routes::AppState,
};

fn required_content(req: &ContentRequest) -> Result<&str, AppError> {
    req.trimmed()
        .ok_or_else(|| AppError::BadRequest("Tweet content is required".to_string()))
}

async fn find_owned(state: &AppState, auth: &AuthUser, tweet_id: &str, action: &str) -> Result<Tweet, AppError> {
    let tweet = db::tweets::find_by_id(&state.pool, tweet_id)
        .await?
        .ok_or_else(|| AppError::not_found("Tweet"))?;
    auth.ensure_owner(&tweet.owner_id, action)?;
    Ok(tweet)
}

/// `POST /tweets`: `{ "content": "..." }`
pub async fn create_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ContentRequest>,
) -> Result<ApiResponse<Tweet>, AppError> {
    let content = required_content(&req)?;

    let id = uuid::Uuid::now_v7().to_string();
    let tweet = db::tweets::create(&state.pool, &id, auth.id(), content).await?;

    tracing::info!(tweet_id = %tweet.id, owner_id = %auth.id(), "Tweet created");
    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

/// `GET /tweets/user/{userId}`: 최신순, 좋아요 수 포함
pub async fn user_tweets(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<TweetWithLikes>>, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    if db::users::find_by_id(&state.pool, &user_id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }

    let tweets = db::tweets::list_by_owner(&state.pool, &user_id).await?;
    Ok(ApiResponse::ok(tweets, "Tweets fetched successfully"))
}

pub async fn update_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(tweet_id): Path<String>,
    ApiJson(req): ApiJson<ContentRequest>,
) -> Result<ApiResponse<Tweet>, AppError> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;
    let content = required_content(&req)?;
    let tweet = find_owned(&state, &auth, &tweet_id, "update this tweet").await?;

    let updated = db::tweets::update_content(&state.pool, &tweet.id, content).await?;

    tracing::info!(tweet_id = %updated.id, "Tweet updated");
    Ok(ApiResponse::ok(updated, "Tweet updated successfully"))
}

pub async fn delete_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(tweet_id): Path<String>,
) -> Result<ApiResponse<Tweet>, AppError> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;
    let tweet = find_owned(&state, &auth, &tweet_id, "delete this tweet").await?;

    db::tweets::delete(&state.pool, &tweet.id).await?;

    tracing::info!(tweet_id = %tweet.id, "Tweet deleted");
    Ok(ApiResponse::ok(tweet, "Tweet deleted successfully"))
}
