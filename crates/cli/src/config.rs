use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub host: HostSettings,
}

#[derive(Deserialize, Clone)]
pub struct HostSettings {
    pub base_url: String,
    pub token: String,
    pub timeout_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("host.base_url", "http://127.0.0.1:8080")?
            .set_default("host.token", "")?
            .set_default("host.timeout_secs", 30)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("RECLAIM_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("RECLAIM_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
