pub mod compute;
pub mod config_cmd;
pub mod merchants;
pub mod presets;
pub mod validate;

use smartchip_config::AppConfig;
use std::io::Read;
use tracing::debug;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Read a JSON document from `path`, or stdin when the path is absent or `-`.
pub fn read_input(path: Option<&str>) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = match path {
        None | Some("-") => {
            debug!("Reading input from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => {
            debug!(path, "Reading input file");
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))?
        }
    };
    serde_json::from_str(&text).map_err(|e| format!("Invalid JSON input: {e}").into())
}

pub fn load_settings() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let settings = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    debug!(
        merchants_path = ?settings.merchants_path,
        include_demo = settings.include_demo_merchants,
        channel = %settings.default_channel,
        "Loaded settings"
    );
    Ok(settings)
}
