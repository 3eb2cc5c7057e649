//! Configuration loading from `pyproject.toml` (`[tool.docgen]`) or a
//! standalone `.docgen.toml`.

use std::path::Path;

use tracing::{debug, warn};

use crate::docblock::{DocStyle, DEFAULT_LOOKAHEAD, DEFAULT_MARKER};
use crate::error::{DocgenError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "pyproject.toml";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/";
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Known keys in the docgen table for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["model", "url", "marker", "indent", "lookahead", "max_attempts"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocgenConfig {
    pub model: String,
    pub url: String,
    pub marker: String,
    pub indent: String,
    pub lookahead: usize,
    pub max_attempts: usize,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            url: DEFAULT_URL.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            indent: "    ".to_string(),
            lookahead: DEFAULT_LOOKAHEAD,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl DocgenConfig {
    /// Block style for this configuration.
    pub fn doc_style(&self, generation_aware: bool) -> DocStyle {
        DocStyle {
            marker: self.marker.clone(),
            indent_unit: self.indent.clone(),
            lookahead: self.lookahead,
            generation_aware,
        }
    }
}

/// Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn warn_unknown_keys(table: &toml::Table) {
    for key in table.keys().filter(|k| !KNOWN_CONFIG_KEYS.contains(&k.as_str())) {
        let suggestion = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k));
        match suggestion {
            Some(suggestion) if edit_distance(key, suggestion) <= 3 => {
                warn!(key = key.as_str(), suggestion = *suggestion, "Unknown docgen config key, did you mean '{suggestion}'?");
            }
            _ => {
                warn!(
                    key = key.as_str(),
                    "Unknown docgen config key (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }
    }
}

/// Load configuration from `path`, or from `pyproject.toml` in the working
/// directory when `path` is `None`.
///
/// A missing default file yields defaults; a missing explicit file is an error.
/// `pyproject.toml` is read from its `[tool.docgen]` table, any other file from
/// its top level.
pub fn load_docgen_config(path: Option<&Path>) -> Result<DocgenConfig> {
    let explicit = path.is_some();
    let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));

    if !explicit && !path.exists() {
        debug!("No {DEFAULT_CONFIG_FILE} found, using default config");
        return Ok(DocgenConfig::default());
    }
    let content = std::fs::read_to_string(path).map_err(|e| DocgenError::io(path, e))?;
    parse_docgen_config(path, &content)
}

/// Parse configuration text read from `path`.
pub fn parse_docgen_config(path: &Path, content: &str) -> Result<DocgenConfig> {
    let root: toml::Table = content.parse().map_err(|e: toml::de::Error| DocgenError::config(path, e.message()))?;

    let is_pyproject = path.file_name().is_some_and(|name| name == DEFAULT_CONFIG_FILE);
    let table = if is_pyproject {
        match root.get("tool").and_then(|t| t.get("docgen")) {
            Some(toml::Value::Table(table)) => table.clone(),
            Some(_) => return Err(DocgenError::config(path, "[tool.docgen] must be a table")),
            None => {
                debug!(path = %path.display(), "No [tool.docgen] table, using default config");
                return Ok(DocgenConfig::default());
            }
        }
    } else {
        root
    };

    warn_unknown_keys(&table);
    let mut config = DocgenConfig::default();

    if let Some(model) = string_key(path, &table, "model")? {
        config.model = model;
    }
    if let Some(url) = string_key(path, &table, "url")? {
        config.url = url;
    }
    if let Some(marker) = string_key(path, &table, "marker")? {
        if marker.trim().is_empty() {
            return Err(DocgenError::config(path, "marker must not be empty"));
        }
        config.marker = marker;
    }
    match table.get("indent") {
        None => {}
        Some(toml::Value::Integer(n)) if (1..=16).contains(n) => config.indent = " ".repeat(*n as usize),
        Some(toml::Value::String(s)) if !s.is_empty() && s.chars().all(|c| c == ' ' || c == '\t') => {
            config.indent = s.clone();
        }
        Some(_) => {
            return Err(DocgenError::config(path, "indent must be 1-16 spaces or a whitespace string"));
        }
    }
    if let Some(lookahead) = count_key(path, &table, "lookahead")? {
        config.lookahead = lookahead;
    }
    if let Some(attempts) = count_key(path, &table, "max_attempts")? {
        config.max_attempts = attempts;
    }

    debug!(path = %path.display(), model = config.model.as_str(), "Loaded docgen config");
    Ok(config)
}

fn string_key(path: &Path, table: &toml::Table, key: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DocgenError::config(path, format!("{key} must be a string"))),
    }
}

fn count_key(path: &Path, table: &toml::Table, key: &str) -> Result<Option<usize>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::Integer(n)) if *n >= 1 => Ok(Some(*n as usize)),
        Some(_) => Err(DocgenError::config(path, format!("{key} must be a positive integer"))),
    }
}
