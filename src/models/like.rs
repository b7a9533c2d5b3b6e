//! # 좋아요(Like) 모델 정의
//!
//! 좋아요 한 행은 영상, 댓글, 트윗 중 정확히 하나를 가리킵니다.
//! 어떤 대상인지는 `LikeTarget`으로 구분합니다.

use serde::Serialize;

use crate::models::video::{VideoCard, VideoCardRow};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: String,
    pub liked_by: String,
    pub video_id: Option<String>,
    pub comment_id: Option<String>,
    pub tweet_id: Option<String>,
    pub created_at: String,
}

/// 좋아요 대상 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Video,
    Comment,
    Tweet,
}

impl LikeTarget {
    /// `likes` 테이블에서 이 대상을 가리키는 컬럼 이름
    pub fn column(self) -> &'static str {
        match self {
            LikeTarget::Video => "video_id",
            LikeTarget::Comment => "comment_id",
            LikeTarget::Tweet => "tweet_id",
        }
    }

    /// 대상이 저장된 테이블 이름
    pub fn table(self) -> &'static str {
        match self {
            LikeTarget::Video => "videos",
            LikeTarget::Comment => "comments",
            LikeTarget::Tweet => "tweets",
        }
    }

    /// 에러/로그 메시지용 이름
    pub fn label(self) -> &'static str {
        match self {
            LikeTarget::Video => "video",
            LikeTarget::Comment => "comment",
            LikeTarget::Tweet => "tweet",
        }
    }
}

/// 좋아요 토글 결과
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    /// 토글 이후 상태: true면 방금 좋아요를 눌렀고, false면 취소했음
    pub is_liked: bool,
    /// 생성되었거나 삭제된 좋아요
    pub like: Like,
}

/// 좋아요한 영상 목록의 한 항목
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideo {
    pub liked_at: String,
    pub video: VideoCard,
}

/// `likes JOIN videos JOIN users` 결과 한 행
#[derive(Debug, sqlx::FromRow)]
pub struct LikedVideoRow {
    pub liked_at: String,
    #[sqlx(flatten)]
    pub video: VideoCardRow,
}

impl From<LikedVideoRow> for LikedVideo {
    fn from(row: LikedVideoRow) -> Self {
        Self {
            liked_at: row.liked_at,
            video: row.video.into(),
        }
    }
}
