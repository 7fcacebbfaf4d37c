//! Integration tests for RewriteService
//!
//! These tests verify:
//! - In-place rewriting and replacement counts
//! - No write when nothing matches, and idempotence of a second run
//! - Dry-run mode
//! - Balanced matching on deeply nested and never-closed calls
//! - Error reporting for unreadable files
//! - The replacement count property over generated inputs

use camino::{Utf8Path, Utf8PathBuf};
use opacity_fix::services::{MigrationError, RewriteService};
use opacity_fix::{MatchMode, RewriteRule};
use proptest::prelude::*;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn service(mode: MatchMode) -> RewriteService {
    RewriteService::new(RewriteRule::default(), mode).unwrap()
}

fn create_file(content: &str) -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().join("colors.dart")).unwrap();
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

#[test]
fn test_rewrite_file_single_call() {
    let (_temp_dir, path) = create_file("Color c = base.withOpacity(0.3);");

    let count = service(MatchMode::Literal).rewrite_file(&path).unwrap();

    assert_eq!(count, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Color c = base.withValues(alpha: 0.3);"
    );
}

#[test]
fn test_rewrite_file_multiple_calls() {
    let content = "\
final a = Colors.black.withOpacity(0.1);
final b = theme.primaryColor.withOpacity(opacity);
final c = Colors.white.withOpacity(isActive ? 0.9 : 0.4);
";
    let (_temp_dir, path) = create_file(content);

    let count = service(MatchMode::Literal).rewrite_file(&path).unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\
final a = Colors.black.withValues(alpha: 0.1);
final b = theme.primaryColor.withValues(alpha: opacity);
final c = Colors.white.withValues(alpha: isActive ? 0.9 : 0.4);
"
    );
}

#[test]
fn test_second_run_is_noop() {
    let (_temp_dir, path) = create_file("a.withOpacity(0.2); b.withOpacity(0.8);");
    let service = service(MatchMode::Literal);

    assert_eq!(service.rewrite_file(&path).unwrap(), 2);
    let after_first = fs::read_to_string(&path).unwrap();
    let modified_first = fs::metadata(&path).unwrap().modified().unwrap();

    assert_eq!(service.rewrite_file(&path).unwrap(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified_first);
}

#[test]
fn test_no_match_leaves_file_untouched() {
    let (_temp_dir, path) = create_file("final c = base.withValues(alpha: 0.3);");
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    assert_eq!(service(MatchMode::Literal).rewrite_file(&path).unwrap(), 0);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
}

#[test]
fn test_dry_run_does_not_write() {
    let original = "x.withOpacity(0.5)";
    let (_temp_dir, path) = create_file(original);

    let count = service(MatchMode::Literal)
        .with_dry_run(true)
        .rewrite_file(&path)
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_missing_file_is_read_error() {
    let service = service(MatchMode::Literal);
    let path = Utf8Path::new("/definitely/not/here/colors.dart");

    let err = service.rewrite_file(path).unwrap_err();
    assert!(matches!(err, MigrationError::Read { .. }));
    assert!(err.to_string().contains("colors.dart"));

    assert_eq!(service.fix_file(path), 0);
}

#[test]
fn test_nested_argument_literal_regression() {
    let (_temp_dir, path) = create_file("widget.withOpacity(computeAlpha(x, 0.5)) + 1");
    let service = service(MatchMode::Literal);

    assert_eq!(
        service.captured_arguments("widget.withOpacity(computeAlpha(x, 0.5)) + 1"),
        vec!["computeAlpha(x, 0.5"]
    );
    assert_eq!(service.rewrite_file(&path).unwrap(), 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "widget.withValues(alpha: computeAlpha(x, 0.5)) + 1"
    );
}

#[test]
fn test_nested_call_balanced_vs_literal() {
    let input = "a.withOpacity(b.withOpacity(0.5).opacity)";

    let (literal, literal_count) = service(MatchMode::Literal).rewrite_text(input);
    assert_eq!(literal, "a.withValues(alpha: b.withOpacity(0.5).opacity)");
    assert_eq!(literal_count, 1);

    let (balanced, balanced_count) = service(MatchMode::Balanced).rewrite_text(input);
    assert_eq!(balanced, "a.withValues(alpha: b.withValues(alpha: 0.5).opacity)");
    assert_eq!(balanced_count, 2);
}

#[test]
fn test_balanced_unclosed_calls_left_untouched() {
    let input = "a.withOpacity(f(".repeat(20_000);
    let (out, count) = service(MatchMode::Balanced).rewrite_text(&input);
    assert_eq!(count, 0);
    assert_eq!(out, input);
}

#[test]
fn test_balanced_long_unclosed_run_is_linear() {
    // ~300 KB of calls that never close
    let input = "x.withOpacity((".repeat(20_000);

    let started = Instant::now();
    let (out, count) = service(MatchMode::Balanced).rewrite_text(&input);

    assert_eq!(count, 0);
    assert_eq!(out, input);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_balanced_deep_nesting_in_file() {
    let depth = 50_000;
    let (_temp_dir, path) = create_file(&format!(
        "{}0.5{}",
        "a.withOpacity(".repeat(depth),
        ")".repeat(depth)
    ));

    let count = service(MatchMode::Balanced).rewrite_file(&path).unwrap();

    assert_eq!(count, depth);
    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("withOpacity("));
    assert!(content.starts_with("a.withValues(alpha: a.withValues(alpha: "));
}

fn plain_argument() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_. ?:*+-]{1,12}"
}

fn filler() -> impl Strategy<Value = String> {
    // No '.' so filler cannot start a call of its own
    "[a-zA-Z0-9_ ;=\n]{0,16}"
}

proptest! {
    #[test]
    fn prop_all_plain_calls_replaced(
        parts in proptest::collection::vec((filler(), plain_argument()), 0..8),
        tail in filler(),
    ) {
        let mut input = String::new();
        let mut expected = String::new();
        for (text, arg) in &parts {
            input.push_str(&format!("{}.withOpacity({})", text, arg));
            expected.push_str(&format!("{}.withValues(alpha: {})", text, arg));
        }
        input.push_str(&tail);
        expected.push_str(&tail);

        for mode in [MatchMode::Literal, MatchMode::Balanced] {
            let (out, count) = service(mode).rewrite_text(&input);
            prop_assert_eq!(count, parts.len());
            prop_assert_eq!(&out, &expected);

            let (again, second) = service(mode).rewrite_text(&out);
            prop_assert_eq!(second, 0);
            prop_assert_eq!(&again, &out);
        }
    }
}
