//! config command - Get or list configuration values

use anyhow::{bail, Context as _, Result};

use super::load_config;
use crate::core::config::Config;
use crate::engine::Context;

/// Print one effective configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;
    let config = load_config(ctx, &cwd)?;

    match config.get(key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => bail!(
            "Unknown configuration key: {} (known keys: {})",
            key,
            Config::KEYS.join(", ")
        ),
    }
}

/// List all effective configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;
    let config = load_config(ctx, &cwd)?;

    println!("# Effective Configuration");
    for key in Config::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }

    Ok(())
}
