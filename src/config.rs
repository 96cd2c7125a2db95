use crate::corrector::{Dictionary, IgnoreSet};
use crate::region::RegionKind;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCAL_CONFIG: &str = ".spellfix.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lowercase words never corrected.
    #[serde(default)]
    pub ignore_words: Vec<String>,

    /// Region kinds left untouched, detected in priority order.
    #[serde(default = "default_protect")]
    pub protect: Vec<RegionKind>,

    /// Extra `misspelling->correction` files layered over the built-in list.
    #[serde(default)]
    pub dictionaries: Vec<PathBuf>,

    /// File extensions picked up when walking directories.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_protect() -> Vec<RegionKind> {
    RegionKind::PRIORITY.to_vec()
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string(), "mdx".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_words: Vec::new(),
            protect: default_protect(),
            dictionaries: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        ignore_words: Option<String>,
        dictionaries: Vec<PathBuf>,
        protect: Vec<RegionKind>,
    ) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            debug!(path = %local_path.display(), "loading local config");
            config = config.merge(Self::from_file(&local_path)?);
        }

        // Apply CLI overrides
        if let Some(words) = ignore_words {
            config
                .ignore_words
                .extend(IgnoreSet::parse(&words).words().iter().cloned());
        }
        config.dictionaries.extend(dictionaries);
        if !protect.is_empty() {
            config.protect = protect;
        }

        config.protect = RegionKind::normalize(&config.protect);
        Ok(config)
    }

    /// Read a TOML config. Relative dictionary paths resolve against the
    /// file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            for dict in &mut config.dictionaries {
                if dict.is_relative() {
                    *dict = base.join(&*dict);
                }
            }
        }

        Ok(config)
    }

    fn merge(mut self, other: Self) -> Self {
        // Word lists and dictionaries accumulate; the rest overrides when not default
        self.ignore_words.extend(other.ignore_words);
        self.dictionaries.extend(other.dictionaries);
        if other.protect != default_protect() {
            self.protect = other.protect;
        }
        if other.extensions != default_extensions() {
            self.extensions = other.extensions;
        }
        self
    }

    pub fn ignore_set(&self) -> IgnoreSet {
        self.ignore_words.iter().collect()
    }

    pub fn dictionary(&self) -> Result<Dictionary> {
        Dictionary::load(&self.dictionaries).context("Failed to load dictionary")
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
