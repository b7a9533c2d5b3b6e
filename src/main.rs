//! # VidTube 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 업로드 디렉토리 생성
//! 6. 라우터 조립 (`vidtube::build_router`)
//! 7. HTTP 서버 시작 (Ctrl+C로 정상 종료)

use std::path::Path;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidtube::{config::Config, routes::AppState, services::media::MediaStore};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 시스템 환경변수만으로 실행할 수 있습니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 vidtube, tower_http, axum 모듈을 debug 레벨로 출력
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidtube=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting VidTube server on {}:{}", config.host, config.port);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    let uploads_path = Path::new(&config.uploads_path);
    if !uploads_path.exists() {
        tokio::fs::create_dir_all(uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path);
    }

    let state = AppState::new(
        pool,
        config.auth.clone(),
        MediaStore::new(&config.uploads_path, &config.media_base_url),
    );
    let app = vidtube::build_router(state, &config)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ctrl+C를 받으면 새 연결 수락을 멈추고 진행 중인 요청이 끝나길 기다립니다.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // 시그널을 받을 수 없으면 종료 신호 없이 계속 실행합니다.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
