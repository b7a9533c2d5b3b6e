//! # multipart/form-data 파싱
//!
//! 회원가입, 영상 업로드, 아바타 변경처럼 파일과 텍스트가 섞인 요청을
//! 한 번에 읽어 `MultipartForm`으로 모아 둡니다.
//!
//! - 파일 필드(파일 이름이 붙은 필드)는 `files`에, 나머지는 `fields`에 들어갑니다.
//! - 같은 이름의 필드가 여러 번 오면 첫 번째만 사용합니다 (필드당 파일 1개).
//! - 크기가 0인 파일은 보내지 않은 것으로 취급합니다.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};

use crate::error::AppError;

/// 업로드된 파일 하나
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 클라이언트가 보낸 원본 파일 이름
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// multipart 스트림을 끝까지 읽어 필드와 파일을 분류합니다.
    pub async fn parse(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    if bytes.is_empty() || form.files.contains_key(&name) {
                        continue;
                    }
                    form.files.insert(name, UploadedFile { file_name, bytes });
                }
                None => {
                    let text = field.text().await?;
                    form.fields.entry(name).or_insert(text);
                }
            }
        }

        Ok(form)
    }

    /// 앞뒤 공백을 제거한 텍스트 필드. 없거나 비어 있으면 None
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// 파일 필드를 꺼냅니다 (소유권 이동)
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

// 핸들러 매개변수로 바로 받을 수 있도록 추출기로 만듭니다.
// multipart가 아닌 요청은 AppError::BadRequest(400) 봉투로 거절됩니다.
impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Self::parse(multipart).await
    }
}
