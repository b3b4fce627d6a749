use std::net::SocketAddr;

use anyhow::Context;
use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::config::AppConfig;
use todo_api::domain::repository::TodoRepository;
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::{postgres_repo::PostgresTodoRepository, sqlite_repo::SqliteTodoRepository, Backend};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let backend = Backend::from_url(&config.database_url)
        .context("DATABASE_URL must use a sqlite: or postgres(ql):// scheme")?;
    tracing::info!(?backend, "connecting to database");
    match backend {
        Backend::Sqlite => serve(SqliteTodoRepository::connect(&config.database_url).await?, config.bind_addr).await,
        Backend::Postgres => serve(PostgresTodoRepository::connect(&config.database_url).await?, config.bind_addr).await,
    }
}

async fn serve<R: TodoRepository + Clone>(repo: R, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("creating tables");
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let router = routing::app(todos::router(todos::AppState { service }));

    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
