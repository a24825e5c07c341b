use anyhow::Context;
use dnsrelay_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let source = path
        .map(str::to_string)
        .or_else(Config::get_config_path)
        .unwrap_or_else(|| "built-in defaults".to_string());

    Config::load(path, overrides)
        .with_context(|| format!("failed to load configuration from {source}"))
}
