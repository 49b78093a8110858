//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{KindpushConfig, apply_config_value};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<KindpushConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting, returning the
/// updated configuration.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<KindpushConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
