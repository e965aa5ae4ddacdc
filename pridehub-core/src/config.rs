use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{StoreError, ValidationError};

/// Process-scoped configuration, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Redis connection URL. Overridden by `REDIS_URL` when set.
    #[serde(default = "default_store_url")]
    pub url: String,
    /// Key prefix for every stored document.
    #[serde(default = "default_key_prefix")]
    pub prefix: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            prefix: default_key_prefix(),
        }
    }
}

fn default_store_url() -> String {
    "redis://127.0.0.1/".to_string()
}

fn default_key_prefix() -> String {
    "pridehub".to_string()
}

impl CoreConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ValidationError> {
        let mut config: CoreConfig = toml::from_str(text)
            .map_err(|err| ValidationError::single("config", "config.parse", err.to_string()))?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub async fn load(path: &Path) -> Result<Self, ValidationError> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let mut config = Self::default();
                config.apply_env();
                Ok(config)
            }
            Err(err) => Err(ValidationError::single("config", "config.io", err.to_string())),
        }
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("REDIS_URL")
            && !url.is_empty()
        {
            self.store.url = url;
        }
    }

    /// Open the configured Redis-backed store.
    pub async fn open_store(&self) -> Result<crate::store::RedisStore, StoreError> {
        crate::store::RedisStore::connect(&self.store.url, self.store.prefix.clone()).await
    }
}
