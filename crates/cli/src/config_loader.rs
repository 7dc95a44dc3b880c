use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Toml},
    Figment,
};
use gex_core::EngineConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/Gex.toml";
pub const ENV_PREFIX: &str = "GEX_";

/// Layers engine configuration: base TOML, optional profile TOML,
/// `GEX_`-prefixed environment variables, then a sibling JSON file for any
/// keys still unset.
///
/// Nested keys use a double underscore in the environment, e.g.
/// `GEX_SCORING__FRIDAY_DECAY_WEIGHT=0.35`.
pub struct ConfigLoader {
    path: PathBuf,
    profile: Option<String>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            profile: None,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// `config/Gex.toml` → `config/Gex.<profile>.toml`
    fn profile_path(&self, profile: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "Gex".into(), |s| s.to_string_lossy());
        self.sibling(&format!("{stem}.{profile}.toml"))
    }

    fn json_path(&self) -> PathBuf {
        self.path.with_extension("json")
    }

    fn sibling(&self, name: &str) -> PathBuf {
        self.path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(name)
    }

    fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Toml::file(&self.path));
        if let Some(profile) = &self.profile {
            figment = figment.merge(Toml::file(self.profile_path(profile)));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file(self.json_path()))
    }

    /// Loads the engine configuration. Missing files are skipped; unset keys
    /// fall back to the engine defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file or variable cannot be parsed.
    pub fn load(&self) -> Result<EngineConfig> {
        let config: EngineConfig = self
            .figment()
            .extract()
            .with_context(|| format!("loading config from {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            profile = ?self.profile,
            "Config loaded"
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}
