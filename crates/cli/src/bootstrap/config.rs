use ferrous_authdns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        query_timeout_ms = config.resolver.query_timeout_ms,
        port = config.resolver.port,
        root_hint = %config.resolver.root_hint.name,
        system_fallback = config.resolver.system_fallback,
        "Configuration loaded"
    );

    Ok(config)
}
