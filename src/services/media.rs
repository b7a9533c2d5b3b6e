//! # 미디어 저장소
//!
//! 업로드된 이미지/영상을 디스크에 저장하고 공개 URL을 돌려줍니다.
//! 저장된 파일은 `main.rs`에서 `ServeDir`로 `MEDIA_BASE_URL` 아래에 서빙됩니다.
//!
//! ## 저장 경로
//! ```text
//! {UPLOADS_PATH}/{kind}/{uuid}-{slug}.{ext}
//! 예: data/uploads/videos/0190c3b2-...-holiday-clip.mp4
//!     → URL: /media/videos/0190c3b2-...-holiday-clip.mp4
//! ```
//!
//! 파일 교체/삭제 시 이전 파일 정리는 "최선 노력(best-effort)"입니다.
//! 정리에 실패해도 요청은 성공으로 처리하고 경고 로그만 남깁니다.

use std::path::{Component, Path, PathBuf};

use tokio::fs;

use crate::{error::AppError, services::form::UploadedFile, services::probe};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "webm", "mkv"];
/// mvhd 박스로 재생 시간을 읽을 수 있는 확장자
const MP4_FAMILY: &[&str] = &["mp4", "m4v", "mov"];

/// 저장할 미디어 종류: 종류마다 하위 디렉토리와 허용 확장자가 다릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Avatar,
    CoverImage,
    Thumbnail,
    Video,
}

impl MediaKind {
    fn dir(self) -> &'static str {
        match self {
            MediaKind::Avatar => "avatars",
            MediaKind::CoverImage => "covers",
            MediaKind::Thumbnail => "thumbnails",
            MediaKind::Video => "videos",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Video => VIDEO_EXTENSIONS,
            _ => IMAGE_EXTENSIONS,
        }
    }
}

/// 저장이 끝난 파일 정보
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub url: String,
    /// 영상이고 MP4 계열이면 헤더에서 읽은 재생 시간(초)
    pub duration: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 업로드 파일을 저장하고 공개 URL을 반환합니다.
    ///
    /// 허용되지 않은 확장자면 400을 반환합니다.
    pub async fn store(&self, kind: MediaKind, file: &UploadedFile) -> Result<StoredMedia, AppError> {
        let (stem, ext) = split_file_name(&file.file_name);
        if !kind.allowed_extensions().contains(&ext.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unsupported file type '.{}'. Supported: {}",
                ext,
                kind.allowed_extensions().join(", ")
            )));
        }

        let slug = match slug::slugify(stem) {
            s if s.is_empty() => "file".to_string(),
            s => s,
        };
        let stored_name = format!("{}-{}.{}", uuid::Uuid::now_v7(), slug, ext);

        let dir = self.root.join(kind.dir());
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(&stored_name), &file.bytes).await?;

        let duration = (kind == MediaKind::Video && MP4_FAMILY.contains(&ext.as_str()))
            .then(|| probe::mp4_duration_secs(&file.bytes))
            .flatten();

        let url = format!("{}/{}/{}", self.base_url, kind.dir(), stored_name);
        tracing::debug!(%url, bytes = file.bytes.len(), "Stored media file");

        Ok(StoredMedia { url, duration })
    }

    /// URL에 해당하는 파일을 지웁니다. 이 저장소의 URL이 아니면 무시합니다.
    pub async fn remove(&self, url: &str) {
        let Some(path) = self.path_for(url) else {
            tracing::debug!(%url, "Skipping removal of media outside the store");
            return;
        };

        if let Err(e) = fs::remove_file(&path).await {
            tracing::warn!(%url, error = %e, "Failed to remove media file");
        }
    }

    /// 공개 URL → 디스크 경로. 저장소 밖을 가리키는 경로(`..` 등)는 None
    fn path_for(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
        let relative = Path::new(relative);

        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        safe.then(|| self.root.join(relative))
    }
}

/// "My Clip.MP4" → ("My Clip", "mp4")
fn split_file_name(file_name: &str) -> (&str, String) {
    // 경로가 포함된 파일 이름이 와도 마지막 부분만 사용합니다.
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext.to_lowercase()),
        None => (base, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn upload(name: &str, bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn split_file_name_lowercases_extension() {
        assert_eq!(split_file_name("My Clip.MP4"), ("My Clip", "mp4".to_string()));
        assert_eq!(split_file_name("../../etc/passwd"), ("passwd", String::new()));
        assert_eq!(split_file_name("a.b.png"), ("a.b", "png".to_string()));
    }

    #[tokio::test]
    async fn store_then_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "/media/");

        let stored = store
            .store(MediaKind::Avatar, &upload("Me At Beach.PNG", b"png-bytes"))
            .await
            .unwrap();

        assert!(stored.url.starts_with("/media/avatars/"));
        assert!(stored.url.ends_with("-me-at-beach.png"));
        assert_eq!(stored.duration, None);

        let path = store.path_for(&stored.url).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");

        store.remove(&stored.url).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn rejects_wrong_extension_for_kind() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path(), "/media");

        let err = store
            .store(MediaKind::Video, &upload("clip.png", b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn foreign_or_escaping_urls_have_no_path() {
        let store = MediaStore::new("/srv/uploads", "/media");
        assert!(store.path_for("https://cdn.example.com/a.png").is_none());
        assert!(store.path_for("/media/../secret").is_none());
        assert!(store.path_for("/media/avatars/a.png").is_some());
    }
}
