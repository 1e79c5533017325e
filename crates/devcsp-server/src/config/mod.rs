//! Dev-server config loader (strict parsing).

pub mod schema;

use std::fs;

use devcsp_core::error::{CspError, Result};

pub use schema::{AppOverride, AppSection, DevServerConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<DevServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CspError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DevServerConfig> {
    let cfg: DevServerConfig = serde_yaml::from_str(s)
        .map_err(|e| CspError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
