//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name of the config inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given
/// 2. `$XDG_CONFIG_HOME/flixx/config.toml` when the variable is non-empty
/// 3. `~/.config/flixx/config.toml`
///
/// # Errors
///
/// Returns an error if neither `--dir`, `XDG_CONFIG_HOME`, nor `HOME` is available.
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    config_path_from(dir, xdg.as_deref(), home.as_deref())
}

fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    if let Some(x) = xdg.filter(|x| !x.as_os_str().is_empty()) {
        return Ok(x.join("flixx").join(CONFIG_FILE));
    }
    let home = home.context("HOME environment variable is not set")?;
    Ok(home.join(".config").join("flixx").join(CONFIG_FILE))
}
