//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `users`: 사용자 CRUD, refresh 토큰 해시, 채널 프로필
//! - `videos`: 영상 CRUD, 목록 검색/정렬, 조회수와 시청 기록
//! - `comments`: 댓글 CRUD
//! - `likes`: 영상/댓글/트윗 좋아요
//! - `subscriptions`: 채널 구독
//! - `playlists`: 플레이리스트와 담긴 영상
//! - `tweets`: 트윗 CRUD
//! - `dashboard`: 채널 통계
//!
//! 모듈마다 `find_by_id`, `create`, `delete`처럼 같은 이름의 함수가 있으므로
//! 재공개하지 않고 `db::videos::find_by_id`처럼 모듈 경로로 호출합니다.

pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;
