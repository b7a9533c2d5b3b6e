//! # 영상 데이터베이스 쿼리 모듈
//!
//! `videos` 테이블과 `watch_history` 테이블에 대한 쿼리 함수들입니다.
//!
//! 응답에 작성자 정보가 필요한 조회는 `videos v JOIN users u`로 한 번에 가져와
//! `VideoCardRow`로 받은 뒤 `VideoCard`로 변환합니다.
//!
//! ## 공개 여부(is_published)
//! 비공개 영상은 소유자에게만 보여야 합니다. 목록 쿼리마다
//! `(v.is_published = 1 OR v.owner_id = ?)` 조건으로 이를 걸러냅니다.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

/// `VideoCardRow`로 받을 SELECT 컬럼 목록
const CARD_COLUMNS: &str = r#"
    v.id, v.video_file, v.thumbnail, v.title, v.description, v.duration, v.views,
    v.is_published, v.created_at, v.updated_at,
    u.id AS owner_id, u.username AS owner_username,
    u.full_name AS owner_full_name, u.avatar AS owner_avatar
"#;

pub async fn create(pool: &SqlitePool, id: &str, new_video: &NewVideo) -> Result<Video, AppError> {
    sqlx::query(
        r#"
        INSERT INTO videos (id, owner_id, video_file, thumbnail, title, description, duration)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&new_video.owner_id)
    .bind(&new_video.video_file)
    .bind(&new_video.thumbnail)
    .bind(&new_video.title)
    .bind(&new_video.description)
    .bind(new_video.duration)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created video".to_string()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Video>, AppError> {
    let video = sqlx::query_as::<_, Video>(
        r#"
        SELECT id, owner_id, video_file, thumbnail, title, description, duration, views,
               is_published, created_at, updated_at
        FROM videos
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

/// 작성자 요약이 붙은 영상 하나
pub async fn find_card(pool: &SqlitePool, id: &str) -> Result<Option<VideoCard>, AppError> {
    let sql = format!(
        "SELECT {} FROM videos v JOIN users u ON u.id = v.owner_id WHERE v.id = ?",
        CARD_COLUMNS
    );

    let row = sqlx::query_as::<_, VideoCardRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(VideoCard::from))
}

/// 공개 영상 목록 (검색/작성자 필터/정렬/페이지네이션)
///
/// 반환값: (현재 페이지 영상들, 조건에 맞는 전체 개수)
///
/// ## 동적 쿼리 구성
/// WHERE 조건은 필터가 있을 때만 덧붙이고, 바인딩 값도 같은 순서로 모읍니다.
/// ORDER BY 컬럼은 `SortBy::column()`이 돌려주는 고정 문자열만 들어가므로
/// 사용자 입력이 SQL에 그대로 섞이지 않습니다.
/// 같은 값끼리는 `v.id`로 한 번 더 정렬해서 페이지 경계가 흔들리지 않게 합니다.
pub async fn list(
    pool: &SqlitePool,
    filter: &VideoFilter,
    params: PageParams,
) -> Result<(Vec<VideoCard>, i64), AppError> {
    let mut conditions = String::from("v.is_published = 1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(owner_id) = &filter.owner_id {
        conditions.push_str(" AND v.owner_id = ?");
        bindings.push(owner_id.clone());
    }

    if let Some(search) = &filter.search {
        // instr()는 LIKE와 달리 %, _ 를 특수문자로 해석하지 않습니다.
        conditions.push_str(
            " AND (instr(lower(v.title), ?) > 0 OR instr(lower(v.description), ?) > 0)",
        );
        let needle = search.to_lowercase();
        bindings.push(needle.clone());
        bindings.push(needle);
    }

    let count_sql = format!(
        "SELECT COUNT(*) FROM videos v JOIN users u ON u.id = v.owner_id WHERE {}",
        conditions
    );
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for value in &bindings {
        count_query = count_query.bind(value);
    }
    let total = count_query.fetch_one(pool).await?;

    let direction = filter.sort_type.keyword();
    let list_sql = format!(
        "SELECT {} FROM videos v JOIN users u ON u.id = v.owner_id WHERE {} \
         ORDER BY {} {}, v.id {} LIMIT ? OFFSET ?",
        CARD_COLUMNS,
        conditions,
        filter.sort_by.column(),
        direction,
        direction
    );
    let mut list_query = sqlx::query_as::<_, VideoCardRow>(&list_sql);
    for value in &bindings {
        list_query = list_query.bind(value);
    }
    let rows = list_query
        .bind(params.limit)
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

    Ok((rows.into_iter().map(VideoCard::from).collect(), total))
}

/// 한 채널의 영상 목록 (최신순). `include_unpublished`가 false면 공개 영상만
pub async fn list_by_owner(
    pool: &SqlitePool,
    owner_id: &str,
    include_unpublished: bool,
) -> Result<Vec<VideoCard>, AppError> {
    let sql = format!(
        "SELECT {} FROM videos v JOIN users u ON u.id = v.owner_id \
         WHERE v.owner_id = ? AND (v.is_published = 1 OR ?) \
         ORDER BY v.created_at DESC, v.id DESC",
        CARD_COLUMNS
    );

    let rows = sqlx::query_as::<_, VideoCardRow>(&sql)
        .bind(owner_id)
        .bind(include_unpublished)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(VideoCard::from).collect())
}

/// 제목/설명/썸네일 부분 수정. None인 값은 유지합니다.
pub async fn update(pool: &SqlitePool, id: &str, changes: &VideoChanges) -> Result<Video, AppError> {
    sqlx::query(
        r#"
        UPDATE videos
        SET title = COALESCE(?, title),
            description = COALESCE(?, description),
            thumbnail = COALESCE(?, thumbnail),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(&changes.thumbnail)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("Video"))
}

pub async fn set_published(pool: &SqlitePool, id: &str, is_published: bool) -> Result<Video, AppError> {
    sqlx::query(
        r#"
        UPDATE videos
        SET is_published = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(is_published)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("Video"))
}

/// 영상 삭제. 댓글, 좋아요, 플레이리스트 항목, 시청 기록은 FK CASCADE로 함께 지워집니다.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM videos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn increment_views(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE videos SET views = views + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// 시청 기록에 영상을 추가합니다.
///
/// 이미 본 영상이면 지우고 다시 넣어서 rowid가 가장 커지게 합니다.
/// (시청 기록은 rowid 역순 = 최근 시청 순으로 조회)
pub async fn record_watch(pool: &SqlitePool, user_id: &str, video_id: &str) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM watch_history WHERE user_id = ? AND video_id = ?")
        .bind(user_id)
        .bind(video_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("INSERT INTO watch_history (user_id, video_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(video_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// 사용자의 시청 기록 (최근 시청 순). 그 사이 비공개로 바뀐 남의 영상은 제외합니다.
pub async fn watch_history(pool: &SqlitePool, user_id: &str) -> Result<Vec<VideoCard>, AppError> {
    let sql = format!(
        "SELECT {} FROM watch_history wh \
         JOIN videos v ON v.id = wh.video_id \
         JOIN users u ON u.id = v.owner_id \
         WHERE wh.user_id = ? AND (v.is_published = 1 OR v.owner_id = wh.user_id) \
         ORDER BY wh.rowid DESC",
        CARD_COLUMNS
    );

    let rows = sqlx::query_as::<_, VideoCardRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(VideoCard::from).collect())
}
