//! Data models for opacity-fix.
//!
//! - [`FixSettings`]: Extension, match mode, rewrite rule and exclusions loaded from the settings file
//! - [`RewriteRule`]: The deprecated method, its replacement and the named parameter label
//! - [`MatchMode`]: Literal (first `)`) or balanced argument matching
//! - [`ExclusionConfig`] / [`ExclusionList`]: Paths that are discovered but never rewritten

pub mod config;

pub use config::{
    DEFAULT_EXTENSION, ExclusionConfig, ExclusionList, FixSettings, MatchMode, RewriteRule,
};
