//! axumサーバー起動・シャットダウンハンドリング

use crate::common::error::{DeskError, DeskResult};
use crate::AppState;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// axumサーバーを起動し、Ctrl+C / SIGTERM まで待機する
pub async fn run(state: AppState, bind_addr: &str) -> DeskResult<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| DeskError::Config(format!("Failed to bind to {}: {}", bind_addr, e)))?;

    info!("Tourdesk server listening on {}", bind_addr);
    serve_until(state, listener, shutdown_signal()).await
}

/// バインド済みのリスナーで `shutdown` が完了するまで配信する
///
/// 接続元アドレスを `ConnectInfo<SocketAddr>` として各リクエストに付与する。
pub async fn serve_until<F>(state: AppState, listener: TcpListener, shutdown: F) -> DeskResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = crate::api::create_app(state);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| DeskError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
///
/// シグナルハンドラーの登録に失敗した場合、そのシグナルは待たない。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
