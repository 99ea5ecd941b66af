//! `smartchip config`: Settings management commands.

use super::{CmdResult, load_settings};
use smartchip_config::AppConfig;

pub fn show() -> CmdResult {
    let config = load_settings()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> CmdResult {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
