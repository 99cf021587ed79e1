//! Tourdesk Server Entry Point

use clap::Parser;
use tourdesk::cli::{serve::ServeArgs, Cli, Commands};
use tourdesk::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::IssueToken(args)) => {
            let token = tourdesk::cli::issue_token::execute(&args)?;
            println!("{}", token);
            Ok(())
        }
        Some(Commands::Serve(args)) => {
            let _log_guard = logging::init()?;
            tourdesk::cli::serve::execute(&args).await
        }
        None => {
            // サブコマンドなしはserveとして扱う
            let _log_guard = logging::init()?;
            tourdesk::cli::serve::execute(&ServeArgs::default()).await
        }
    }
}
