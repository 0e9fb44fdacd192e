//! Config command handlers.

use anyhow::{Result, bail};
use guestnest_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    if !config::Config::init_at(&config_path)? {
        bail!("Config file already exists at {}", config_path.display());
    }
    println!("Created config at {}", config_path.display());
    Ok(())
}
