mod drivers;
mod traits;

pub use drivers::rest::RestDriver;
pub use traits::NetworkHost;

use anyhow::Result;
use std::time::Duration;
use tracing::info;

/// 连接平台 Admin API 所需的全部配置。
#[derive(Clone)]
pub struct HostConfig {
    pub base_url: String,
    pub token: String,
    pub timeout_secs: u64,
}

pub fn build_host(config: HostConfig) -> Result<Box<dyn NetworkHost>> {
    info!("Connecting to network host at {}", config.base_url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    Ok(Box::new(RestDriver::new(client, config)))
}
