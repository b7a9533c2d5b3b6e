//! # 서비스 모듈
//!
//! HTTP나 DB와 직접 관계없는 보조 로직입니다.
//! - `form`: multipart/form-data 요청을 필드와 파일로 모으는 추출기
//! - `media`: 업로드 파일 저장소 (디스크 저장, 공개 URL, 정리)
//! - `probe`: MP4 헤더에서 재생 시간 읽기

pub mod form;
pub mod media;
pub mod probe;
