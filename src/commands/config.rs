use owo_colors::OwoColorize;
use serde_json::json;

use crate::config::Config;
use crate::error::Result;

use super::print_json;

/// Show the effective configuration
pub fn cmd_config_show(config: &Config, json: bool) -> Result<()> {
    if json {
        let mut value = serde_json::to_value(config)?;
        value["config_file"] = json!(Config::config_path().to_string_lossy());
        return print_json(&value);
    }

    println!("{}\n", "Configuration:".cyan().bold());
    print!("{}", config.to_yaml()?);
    println!(
        "\n{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    );
    Ok(())
}

/// Print the path of the config file
pub fn cmd_config_path() -> Result<()> {
    println!("{}", Config::config_path().display());
    Ok(())
}
