//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 리소스의 데이터 타입을 담당합니다:
//! - `user`: 사용자, 토큰, 채널 프로필
//! - `video`: 영상과 영상 목록 쿼리
//! - `comment`: 댓글
//! - `like`: 좋아요 (영상/댓글/트윗)
//! - `subscription`: 채널 구독
//! - `playlist`: 플레이리스트
//! - `tweet`: 트윗
//! - `dashboard`: 채널 통계
//! - `page`: 페이지네이션 공통 타입
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Video`처럼 짧게 접근합니다.

pub mod comment;
pub mod dashboard;
pub mod like;
pub mod page;
pub mod playlist;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;

pub use comment::*;
pub use dashboard::*;
pub use like::*;
pub use page::*;
pub use playlist::*;
pub use subscription::*;
pub use tweet::*;
pub use user::*;
pub use video::*;
