//! Album server: album views under /album, REST resource under /api/albums.
//!
//! Run from repo root: `cargo run -p album-server`
//! Without `DATABASE_URL` albums are kept in memory.

use album_routes::{app, connect, AlbumService, AppState, InMemoryAlbumService, PgAlbumService, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("album_routes=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let service: Arc<dyn AlbumService> = match settings.database_url.as_deref() {
        Some(url) => Arc::new(PgAlbumService::new(connect(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set, albums are kept in memory");
            Arc::new(InMemoryAlbumService::new())
        }
    };

    let bind_addr = settings.bind_addr;
    let state = AppState::new(service, settings);
    state.routes.validate()?;

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("album server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
