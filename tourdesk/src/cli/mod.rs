//! CLI module for tourdesk
//!
//! サーバー起動と運用向けトークン発行のサブコマンド。

pub mod issue_token;
pub mod serve;

use clap::{Parser, Subcommand};

/// Tourdesk - travel agency admin backend
#[derive(Parser, Debug)]
#[command(name = "tourdesk")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    TOURDESK_HOST                       Bind address (default: 0.0.0.0)
    TOURDESK_PORT                       Listen port (default: 5000)
    TOURDESK_DATABASE_URL               Database URL (default: sqlite:data/tourdesk.db)
    TOURDESK_JWT_SECRET                 JWT signing key (required, legacy: JWT_SECRET)
    TOURDESK_CORS_ORIGINS               Comma separated allowed origins
    TOURDESK_CORS_ORIGIN_PATTERN        Regex for allowed origins
    TOURDESK_AUDIT_CAPTURE_LIMIT_BYTES  Max response size inspected for activity logs
    TOURDESK_LOG_LEVEL                  Log level (default: info)
    TOURDESK_LOG_FORMAT                 "json" for JSON logs
    TOURDESK_LOG_DIR                    Directory for daily rotated log files
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),
    /// Mint a signed access token with the configured secret
    IssueToken(issue_token::IssueTokenArgs),
}
