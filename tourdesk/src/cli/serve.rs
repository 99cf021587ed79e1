//! serve サブコマンド
//!
//! APIサーバーを起動します。

use crate::config::ServerConfig;
use clap::Args;

/// serve サブコマンドの引数
///
/// 未指定の項目は環境変数（`TOURDESK_HOST` / `TOURDESK_PORT`）の値を使う。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

/// サーバーを起動し、停止するまで待機する
pub async fn execute(args: &ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?.with_listen(args.host.clone(), args.port);
    tracing::debug!(?config, "Loaded server configuration");
    let state = crate::bootstrap::initialize(&config).await?;
    crate::server::run(state, &config.bind_addr()).await?;
    Ok(())
}
