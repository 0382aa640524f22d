//! Rules file loading.

use std::path::Path;

use nova_core::config::GameRules;

use crate::error::HostError;

/// Load rules from a JSON file, or the defaults when no file is given.
/// Missing fields fall back to their defaults; the result is validated.
pub fn load_rules(path: Option<&Path>) -> Result<GameRules, HostError> {
    let Some(path) = path else {
        return Ok(GameRules::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| HostError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&text, path)?;
    tracing::info!(path = %path.display(), "loaded rules");
    Ok(rules)
}

pub fn parse_rules(text: &str, path: &Path) -> Result<GameRules, HostError> {
    let rules: GameRules = serde_json::from_str(text).map_err(|source| HostError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    rules.validate().map_err(|source| HostError::ConfigInvalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(rules)
}
