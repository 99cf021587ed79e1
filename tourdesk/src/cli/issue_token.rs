//! issue-token サブコマンド
//!
//! 設定済みのシークレットでアクセストークンを発行する（運用・開発用）。

use crate::auth::jwt::{create_jwt, TokenSubject, DEFAULT_JWT_EXPIRATION_HOURS};
use crate::common::auth::UserRole;
use anyhow::Context;
use clap::Args;

/// issue-token サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct IssueTokenArgs {
    /// Subject (user id)
    #[arg(long)]
    pub sub: String,

    /// Role: customer, admin or editor
    #[arg(long)]
    pub role: UserRole,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Token lifetime in hours
    #[arg(long, default_value_t = DEFAULT_JWT_EXPIRATION_HOURS)]
    pub ttl_hours: i64,

    /// Signing secret
    #[arg(long, env = "TOURDESK_JWT_SECRET", hide_env_values = true)]
    pub secret: String,
}

/// トークンを生成して返す
pub fn execute(args: &IssueTokenArgs) -> anyhow::Result<String> {
    anyhow::ensure!(!args.sub.trim().is_empty(), "--sub must not be empty");
    anyhow::ensure!(args.ttl_hours > 0, "--ttl-hours must be positive");

    let subject = TokenSubject {
        sub: args.sub.trim().to_string(),
        name: args.name.clone(),
        email: args.email.clone(),
        role: args.role,
    };
    create_jwt(&subject, &args.secret, args.ttl_hours).context("Failed to sign token")
}
