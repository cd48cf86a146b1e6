mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::features::uploads::{routes as uploads_routes, UploadService};
use crate::modules::storage::{ObjectStore, S3Client};
use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Application router: upload routes, `/health`, request ids and tracing.
fn build_app(upload_service: Arc<UploadService>, max_body_size: usize) -> Router {
    Router::new()
        .merge(uploads_routes(upload_service, max_body_size))
        .route("/health", get(health_check))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Outermost, so the id exists before the span and the propagation layer run
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // RUST_LOG may come from .env
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing or invalid configuration is fatal
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded successfully (tokio_worker_threads={})",
        worker_threads
    );

    let store: Arc<dyn ObjectStore> = Arc::new(
        S3Client::new(&config.storage)
            .map_err(|e| anyhow::anyhow!("Failed to initialize S3 client: {}", e))?,
    );

    let upload_service = Arc::new(UploadService::new(Arc::clone(&store), &config.storage));
    tracing::info!("Upload service initialized for bucket: {}", store.container());

    let app = build_app(upload_service, config.app.max_request_body_size);

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use uuid::Uuid;

    use crate::shared::test_helpers::{test_storage_config, RecordingStore};

    fn server() -> TestServer {
        let store = Arc::new(RecordingStore::new());
        let service = Arc::new(UploadService::new(store, &test_storage_config()));
        TestServer::new(build_app(service, 1024 * 1024)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = server();
        let response = server.get("/health").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_generated_request_id_is_uuid_v7() {
        let server = server();
        let response = server.get("/").await;

        response.assert_status_ok();
        let header = response.header("x-request-id");
        let id = Uuid::parse_str(header.to_str().unwrap()).unwrap();
        assert_eq!(id.get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let server = server();
        let response = server
            .get("/health")
            .add_header("x-request-id", "client-supplied-42")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("x-request-id").to_str().unwrap(),
            "client-supplied-42"
        );
    }
}
