use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file {:?}", config_path))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file {:?}", config_path))?;

    config.validate()?;

    Ok(config)
}

/// Load the NAT bootstrap payload named by the configuration.
///
/// The payload is opaque to the planner and attached to the instance
/// verbatim. An absent path yields an empty payload so the instance
/// node keeps the same shape either way. Relative paths resolve against
/// the configuration file's directory.
pub fn load_bootstrap_payload(config: &Config, config_path: &Path) -> Result<String> {
    let script = match config.nat.as_ref().and_then(|n| n.bootstrap_script.as_ref()) {
        Some(script) => script,
        None => return Ok(String::new()),
    };

    let resolved = if script.is_relative() {
        config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(script)
    } else {
        script.clone()
    };

    info!("Loading NAT bootstrap payload from: {:?}", resolved);
    std::fs::read_to_string(&resolved)
        .wrap_err_with(|| format!("Failed to read bootstrap script {:?}", resolved))
}
