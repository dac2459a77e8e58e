//! Config command: dump and path.

use crate::config::AppConfig;
use crate::error::ServerResult;

/// Prints the effective configuration as TOML.
pub fn dump(config: &AppConfig) -> ServerResult<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Prints the default configuration file path.
pub fn path() -> ServerResult<()> {
    println!("{}", AppConfig::default_path().display());
    Ok(())
}
