//! Workspace configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level lessonkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonkitConfig {
    /// Directory holding module content files.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Directory holding sequence catalogs.
    #[serde(default = "default_sequences_dir")]
    pub sequences_dir: PathBuf,
    /// Static resource list appended after module videos.
    #[serde(default)]
    pub resources_file: Option<PathBuf>,
    /// Ordered ids of every module the library shows. Defaults to every
    /// module found in `content_dir`.
    #[serde(default)]
    pub modules: Option<Vec<String>>,
    /// Output format for `lessonkit resources`.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content/modules")
}
fn default_sequences_dir() -> PathBuf {
    PathBuf::from("./content/sequences")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for LessonkitConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            sequences_dir: default_sequences_dir(),
            resources_file: None,
            modules: None,
            default_format: default_format(),
        }
    }
}

impl LessonkitConfig {
    /// Resolve relative paths against `base` (the config file's directory).
    fn rebase(&mut self, base: &Path) {
        let join = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.content_dir = join(&self.content_dir);
        self.sequences_dir = join(&self.sequences_dir);
        self.resources_file = self.resources_file.as_deref().map(join);
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `lessonkit.toml` in the current directory
/// 2. `~/.config/lessonkit/config.toml`
///
/// Relative paths in a config file are resolved against its directory.
/// Environment variable override: `LESSONKIT_CONTENT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<LessonkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lessonkit.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = toml::from_str::<LessonkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            config.content_dir = resolve_path(&config.content_dir);
            config.sequences_dir = resolve_path(&config.sequences_dir);
            config.resources_file = config.resources_file.as_deref().map(resolve_path);
            if let Some(base) = path.parent() {
                config.rebase(base);
            }
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => LessonkitConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("LESSONKIT_CONTENT_DIR") {
        config.content_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lessonkit"))
}
