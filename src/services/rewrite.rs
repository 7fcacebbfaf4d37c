use super::MigrationError;
use crate::models::{MatchMode, RewriteRule};
use camino::Utf8Path;
use regex::{Captures, Regex};
use std::fs;
use std::ops::Range;

/// A deprecated call located by balanced matching
#[derive(Debug, Clone, PartialEq, Eq)]
struct CallSpan {
    /// Byte range of the whole call, from the leading `.` through the closing `)`
    call: Range<usize>,
    /// Byte range of the argument between the parentheses
    arg: Range<usize>,
}

/// An open `(` awaiting its `)` during balanced matching
enum OpenParen {
    /// Opened by a deprecated call whose leading `.` is at this byte offset
    Call(usize),
    Plain,
}

/// Service for rewriting deprecated calls in source files
///
/// # Fields
///
/// The literal pattern is compiled once at construction:
///
/// - `call_pattern`: `\.withOpacity\(([^)]+)\)` for the default rule
///   - Capture 1 is the argument, up to the first `)`
///   - Example match: ".withOpacity(0.3)"
///
/// Balanced mode does not use the regex; it makes one forward scan for
/// `call_prefix` (`.withOpacity(`), pairing parentheses on an explicit stack.
pub struct RewriteService {
    rule: RewriteRule,
    mode: MatchMode,
    dry_run: bool,

    /// Regex for `.<deprecated>(<ARG>)` in literal mode
    call_pattern: Regex,

    /// `.<deprecated>(`, the start of every call in balanced mode
    call_prefix: String,

    /// `.<replacement>(<label>: `, written in place of `call_prefix`
    replacement_prefix: String,
}

impl RewriteService {
    /// Create a RewriteService for `rule` in the given matching mode
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::InvalidRule`] when a method name or the label is empty.
    pub fn new(rule: RewriteRule, mode: MatchMode) -> Result<Self, MigrationError> {
        if rule.deprecated.is_empty() || rule.replacement.is_empty() || rule.label.is_empty() {
            return Err(MigrationError::InvalidRule(format!(
                "method names and label must be non-empty (got {:?} -> {:?}, label {:?})",
                rule.deprecated, rule.replacement, rule.label
            )));
        }

        let call_pattern = Regex::new(&format!(
            r"\.{}\(([^)]+)\)",
            regex::escape(&rule.deprecated)
        ))
        .map_err(|e| MigrationError::InvalidRule(e.to_string()))?;

        Ok(Self {
            call_prefix: format!(".{}(", rule.deprecated),
            replacement_prefix: format!(".{}({}: ", rule.replacement, rule.label),
            rule,
            mode,
            dry_run: false,
            call_pattern,
        })
    }

    /// Report counts without writing files back
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Rewrite every match in `content`
    ///
    /// # Returns
    /// The rewritten text and the number of calls replaced
    pub fn rewrite_text(&self, content: &str) -> (String, usize) {
        match self.mode {
            MatchMode::Literal => self.rewrite_literal(content),
            MatchMode::Balanced => self.rewrite_balanced(content),
        }
    }

    /// Arguments the active mode captures, in order
    ///
    /// Balanced mode only reports top-level calls; nested calls are part of
    /// their enclosing argument.
    pub fn captured_arguments<'a>(&self, content: &'a str) -> Vec<&'a str> {
        match self.mode {
            MatchMode::Literal => self
                .call_pattern
                .captures_iter(content)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect(),
            MatchMode::Balanced => {
                let mut args = Vec::new();
                let mut outer_end = 0;
                for span in self.balanced_spans(content) {
                    if span.call.start >= outer_end {
                        outer_end = span.call.end;
                        args.push(&content[span.arg]);
                    }
                }
                args
            }
        }
    }

    /// Rewrite one file in place
    ///
    /// The file is only written when at least one call was replaced, and never
    /// in dry-run mode.
    ///
    /// # Returns
    /// The number of calls replaced
    pub fn rewrite_file(&self, path: &Utf8Path) -> Result<usize, MigrationError> {
        let content = fs::read_to_string(path).map_err(|source| MigrationError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (new_content, count) = self.rewrite_text(&content);
        if count == 0 {
            tracing::debug!("No matches in {}", path);
            return Ok(0);
        }

        if self.dry_run {
            tracing::debug!("Dry run, not writing {} ({} matches)", path, count);
            return Ok(count);
        }

        fs::write(path, new_content).map_err(|source| MigrationError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Wrote {} ({} replacements)", path, count);
        Ok(count)
    }

    /// Rewrite one file, logging any error and treating it as zero replacements
    ///
    /// Convenience for callers that only want a count. The migration pass calls
    /// [`rewrite_file`](Self::rewrite_file) instead so it can record failures.
    pub fn fix_file(&self, path: &Utf8Path) -> usize {
        match self.rewrite_file(path) {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("{}", e);
                0
            }
        }
    }

    fn replacement_for(&self, arg: &str) -> String {
        format!("{}{})", self.replacement_prefix, arg)
    }

    fn rewrite_literal(&self, content: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = self
            .call_pattern
            .replace_all(content, |caps: &Captures<'_>| {
                count += 1;
                self.replacement_for(&caps[1])
            })
            .into_owned();
        (rewritten, count)
    }

    fn rewrite_balanced(&self, content: &str) -> (String, usize) {
        let spans = self.balanced_spans(content);
        if spans.is_empty() {
            return (content.to_string(), 0);
        }

        let mut out =
            String::with_capacity(content.len() + spans.len() * self.replacement_prefix.len());
        let mut cursor = 0;

        // Only the call prefix changes; the argument and its closing `)` are
        // copied through, so nested calls need no separate pass
        for span in &spans {
            out.push_str(&content[cursor..span.call.start]);
            out.push_str(&self.replacement_prefix);
            cursor = span.arg.start;
        }
        out.push_str(&content[cursor..]);

        (out, spans.len())
    }

    /// Every closed call with a non-empty argument, nested calls included,
    /// ordered by start offset
    fn balanced_spans(&self, content: &str) -> Vec<CallSpan> {
        let bytes = content.as_bytes();
        let prefix = self.call_prefix.as_bytes();
        let mut open = Vec::new();
        let mut spans = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'.' if bytes[i..].starts_with(prefix) => {
                    open.push(OpenParen::Call(i));
                    i += prefix.len();
                    continue;
                }
                b'(' => open.push(OpenParen::Plain),
                // A `)` with nothing open is stray text
                b')' => {
                    if let Some(OpenParen::Call(start)) = open.pop() {
                        let arg_start = start + prefix.len();
                        if i > arg_start {
                            spans.push(CallSpan {
                                call: start..i + 1,
                                arg: arg_start..i,
                            });
                        }
                    }
                }
                _ => {}
            }
            i += 1;
        }

        // Calls still open at end of input never balanced and are left as is
        spans.sort_unstable_by_key(|span| span.call.start);
        spans
    }
}
