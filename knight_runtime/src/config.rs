//! Configuration loading.
//!
//! A JSON file supplies `RelaxConfig`; missing fields take their defaults,
//! unknown fields are rejected.

use std::fs;
use std::path::Path;

use knight_relax::board::validate_board_size;
use knight_relax::domain::RelaxConfig;
use knight_relax::error::Result;
use tracing::debug;

/// Read and validate a configuration file.
pub fn load_config(path: &Path) -> Result<RelaxConfig> {
    let data = fs::read_to_string(path)?;
    let config = RelaxConfig::from_json_str(&data)?;
    validate_board_size(config.board_size)?;
    debug!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}
