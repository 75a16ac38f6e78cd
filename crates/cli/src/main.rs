mod config;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use config::Settings;
use domain::{CleanupError, UserId};
use platform::HostConfig;

/// Reassign all authored content to a placeholder user, prune every other
/// user from each site, then delete them network-wide. Irreversible, no dry-run.
#[derive(Parser)]
#[command(name = "reclaim")]
#[command(about = "Network-wide content reassignment and user cleanup")]
struct Cli {
    /// User ID that receives all reassigned content and site ownership
    #[arg(long = "to", value_name = "USER_ID")]
    to: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    // 校验在任何改动之前完成；这里只管"参数长什么样"，
    // 用户是否真实存在由 workflow 再向平台确认
    let placeholder = resolve_placeholder(cli.to)?;

    let settings = Settings::new().context("Failed to load configuration")?;

    let host = platform::build_host(HostConfig {
        base_url: settings.host.base_url,
        token: settings.host.token,
        timeout_secs: settings.host.timeout_secs,
    })?;

    let report = workflow::run_cleanup(host.as_ref(), placeholder).await?;

    info!(
        "Run finished: {} posts reassigned, {} users deleted, {} deletions failed",
        report.posts_reassigned(),
        report.users_deleted(),
        report.deletions_failed()
    );

    Ok(())
}

fn resolve_placeholder(raw: Option<String>) -> Result<UserId, CleanupError> {
    let raw = raw.ok_or(CleanupError::MissingPlaceholder)?;
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(UserId::new(id)),
        _ => Err(CleanupError::InvalidPlaceholder(raw)),
    }
}
