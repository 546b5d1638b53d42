use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::adapter::HeuristicOptions;
use crate::adapter::heuristic::DEFAULT_MAX_LOOKAHEAD;
use crate::language::LanguageTag;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AliasConfig {
    /// Bytes a heuristic adapter may scan for one declaration
    pub max_lookahead: Option<usize>,
    /// File extension (without dot) to language tag
    pub extensions: BTreeMap<String, String>,
    /// Extra gitignore-style patterns skipped during directory walks
    pub exclude: Vec<String>,
    /// Worker threads for multi-file extraction
    pub jobs: Option<usize>,
}

impl AliasConfig {
    /// The config written by `aliasbot init`
    pub fn starter() -> Self {
        Self {
            max_lookahead: Some(DEFAULT_MAX_LOOKAHEAD),
            extensions: BTreeMap::from([
                ("h".to_string(), LanguageTag::Cpp.to_string()),
                ("mjs".to_string(), LanguageTag::JavaScript.to_string()),
            ]),
            exclude: Vec::new(),
            jobs: None,
        }
    }

    pub fn heuristic_options(&self) -> HeuristicOptions {
        let mut options = HeuristicOptions::default();
        if let Some(max_lookahead) = self.max_lookahead {
            options.max_lookahead = max_lookahead;
        }
        options
    }

    /// Language for `path`: configured extension overrides first, then built-in detection
    pub fn language_for(&self, path: &Path) -> crate::Result<Option<LanguageTag>> {
        let extension = path.extension().and_then(|e| e.to_str());
        if let Some(tag) = extension.and_then(|ext| self.extensions.get(&ext.to_ascii_lowercase())) {
            return tag.parse().map(Some);
        }
        Ok(LanguageTag::from_path(path))
    }

    /// Check that every extension override names a supported language
    pub fn validate(&self) -> anyhow::Result<()> {
        for (extension, tag) in &self.extensions {
            tag.parse::<LanguageTag>()
                .map_err(|e| anyhow::anyhow!("extension override '{}': {}", extension, e))?;
        }
        if self.max_lookahead == Some(0) {
            anyhow::bail!("max_lookahead must be greater than zero");
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("aliasbot.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<AliasConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: AliasConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &AliasConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
