use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Default file suffix of candidate source files.
pub const DEFAULT_EXTENSION: &str = ".dart";

/// Settings file structure (`--config`).
///
/// Every key is optional; missing keys fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSettings {
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub match_mode: MatchMode,

    #[serde(default)]
    pub rule: RewriteRule,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for FixSettings {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            match_mode: MatchMode::default(),
            rule: RewriteRule::default(),
            exclude: Vec::new(),
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// How the argument of a deprecated call is delimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Argument runs up to the first `)`. Nested parentheses truncate it.
    #[default]
    Literal,

    /// Argument runs up to the `)` that closes the call.
    Balanced,
}

/// The method rename applied to every match.
///
/// `.<deprecated>(<ARG>)` becomes `.<replacement>(<label>: <ARG>)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    #[serde(default = "default_deprecated")]
    pub deprecated: String,

    #[serde(default = "default_replacement")]
    pub replacement: String,

    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for RewriteRule {
    fn default() -> Self {
        Self {
            deprecated: default_deprecated(),
            replacement: default_replacement(),
            label: default_label(),
        }
    }
}

fn default_deprecated() -> String {
    "withOpacity".to_string()
}

fn default_replacement() -> String {
    "withValues".to_string()
}

fn default_label() -> String {
    "alpha".to_string()
}

impl RewriteRule {
    /// Substring whose presence marks a file as a candidate, e.g. `withOpacity(`.
    pub fn trigger(&self) -> String {
        format!("{}(", self.deprecated)
    }
}

/// Exclusion file structure (`--exclude-file`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Ordered set of paths that are discovered but never rewritten.
///
/// Membership is exact string equality; no path normalization is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    paths: IndexSet<String>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every path from `paths`, keeping first-seen order.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
