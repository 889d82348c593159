//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProcTreeError, ProcTreeResult};

use super::types::{AnimationMode, ColorMode, Config};

pub const PROJECT_CONFIG_FILE: &str = ".proctree.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    UnknownKey {
        key: String,
        file: PathBuf,
        line: Option<usize>,
        suggestion: Option<String>,
    },
    /// A discovered config file that could not be loaded; the next layer was used.
    Skipped { file: PathBuf, reason: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownKey {
                key,
                file,
                line,
                suggestion,
            } => {
                write!(f, "unknown config key '{key}' in {}", file.display())?;
                if let Some(line) = line {
                    write!(f, ":{line}")?;
                }
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{suggestion}'?)")?;
                }
                Ok(())
            }
            ConfigWarning::Skipped { file, reason } => {
                write!(f, "ignoring config {}: {reason}", file.display())
            }
        }
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ProcTreeResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ProcTreeError::ConfigParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning::UnknownKey {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config, then user config, then defaults; env overrides on top.
///
/// A file that fails to load is skipped in favour of the next layer and
/// reported as [`ConfigWarning::Skipped`].
pub fn load_or_default(project_root: Option<&Path>) -> (Config, Vec<ConfigWarning>) {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    let mut skipped = Vec::new();
    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match load_with_warnings(&candidate) {
            Ok((config, warnings)) => {
                skipped.extend(warnings);
                return (with_env_overrides(config), skipped);
            }
            Err(err) => {
                let reason = match err {
                    ProcTreeError::ConfigParse { message, .. } => message,
                    other => other.to_string(),
                };
                skipped.push(ConfigWarning::Skipped {
                    file: candidate,
                    reason,
                });
            }
        }
    }

    (with_env_overrides(Config::default()), skipped)
}

/// `<config_dir>/proctree/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("proctree").join("config.toml"))
}

/// Apply environment variable overrides (PROCTREE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

fn apply_env_overrides(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(color) = get_env("PROCTREE_COLOR") {
        match color.to_lowercase().as_str() {
            "always" => config.output.color = ColorMode::Always,
            "never" => config.output.color = ColorMode::Never,
            "auto" => config.output.color = ColorMode::Auto,
            _ => {}
        }
    }

    if let Some(animation) = get_env("PROCTREE_ANIMATION") {
        match animation.to_lowercase().as_str() {
            "always" => config.output.animation = AnimationMode::Always,
            "never" => config.output.animation = AnimationMode::Never,
            "auto" => config.output.animation = AnimationMode::Auto,
            _ => {}
        }
    }

    if let Some(val) = get_env("PROCTREE_UNICODE") {
        config.output.unicode = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(ms) = get_env("PROCTREE_REFRESH_MS").and_then(|v| v.trim().parse().ok()) {
        config.tree.refresh_interval_ms = ms;
    }

    if let Some(tail) = get_env("PROCTREE_LOG_TAIL").and_then(|v| v.trim().parse().ok()) {
        config.tree.log_tail = tail;
    }

    if let Some(level) = get_env("PROCTREE_LOG").filter(|v| !v.trim().is_empty()) {
        config.logging.default = level.trim().to_string();
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "output",
        "color",
        "animation",
        "unicode",
        "spinner",
        "tree",
        "refresh_interval_ms",
        "log_tail",
        "indent",
        "logging",
        "default",
        "file",
        "modules",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (candidate, levenshtein(unknown, candidate)))
        .min_by_key(|&(_, dist)| dist)
        .filter(|&(_, dist)| dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
pub(super) fn apply_env_for_test(config: Config, env: &[(&str, &str)]) -> Config {
    apply_env_overrides(config, |key| {
        env.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
}
