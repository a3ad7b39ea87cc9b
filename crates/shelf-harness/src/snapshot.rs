#![forbid(unsafe_code)]

//! Plain-text rendering of a layout, and snapshot comparison.
//!
//! One line per shelf: index, drawn position, width and members. Members
//! carry a style marker (`+` matching, `-` non-matching, `*` highest group,
//! `.` muted). Hidden shelves print as `hidden`; labels follow the shelves.
//!
//! Snapshot files live under `tests/snapshots/<name>.snap`; set `BLESS=1` to
//! write the current output.

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use shelf_layout::{ItemStyle, LayoutEngine, Phase};

fn style_marker(style: ItemStyle) -> &'static str {
    match style {
        ItemStyle::Neutral => "",
        ItemStyle::Matching => "+",
        ItemStyle::NonMatching => "-",
        ItemStyle::Highest => "*",
        ItemStyle::Muted => ".",
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Capturing => "capturing",
        Phase::Mutating => "mutating",
        Phase::AnimatingDual => "animating",
        Phase::Settling => "settling",
    }
}

/// Round for display; never prints `-0`.
fn px(value: f32) -> f32 {
    value.round() + 0.0
}

/// Render the engine's current picture as text.
pub fn render_layout(engine: &LayoutEngine) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "phase: {}", phase_name(engine.phase()));

    for (shelf, container) in engine.registry().shelves().iter().zip(engine.containers()) {
        if !shelf.is_visible() {
            let _ = writeln!(out, "shelf {:>2} hidden", shelf.index());
            continue;
        }
        let members: Vec<String> = shelf
            .items()
            .iter()
            .map(|id| {
                let marker = engine.item(id).map_or("", |item| style_marker(item.style));
                format!("{id}{marker}")
            })
            .collect();
        let _ = write!(
            out,
            "shelf {:>2} ({}, {}) w={} [{}]",
            shelf.index(),
            px(container.position.x),
            px(container.position.y),
            px(container.width),
            members.join(" ")
        );
        if let Some(key) = shelf.group_key() {
            let _ = write!(out, " <{key}>");
        }
        out.push('\n');
    }

    for label in engine.labels() {
        let _ = writeln!(out, "label {:>2}: {}", label.shelf, label.text);
    }
    out
}

/// Machine-readable form of [`render_layout`].
pub fn layout_json(engine: &LayoutEngine) -> Value {
    let shelves: Vec<Value> = engine
        .registry()
        .shelves()
        .iter()
        .zip(engine.containers())
        .map(|(shelf, container)| {
            json!({
                "index": shelf.index(),
                "visible": shelf.is_visible(),
                "group": shelf.group_key(),
                "x": px(container.position.x),
                "y": px(container.position.y),
                "width": px(container.width),
                "items": shelf.items(),
            })
        })
        .collect();
    let labels: Vec<Value> = engine
        .labels()
        .iter()
        .map(|label| {
            json!({
                "shelf": label.shelf,
                "key": label.key,
                "rank": label.rank,
                "text": label.text,
            })
        })
        .collect();
    json!({
        "phase": phase_name(engine.phase()),
        "shelves": shelves,
        "labels": labels,
    })
}

// ============================================================================
// Match Modes & Normalization
// ============================================================================

/// Comparison mode for snapshot testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-exact string comparison.
    Exact,
    /// Trim trailing whitespace on each line before comparing.
    TrimTrailing,
}

fn normalize(text: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Exact => text.to_string(),
        MatchMode::TrimTrailing => text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Line-by-line diff: ` ` shared, `-` only in `expected`, `+` only in
/// `actual`. Empty when the inputs are identical.
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    let max_lines = expected_lines.len().max(actual_lines.len());
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..max_lines {
        match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(e), Some(a)) if e == a => {
                let _ = writeln!(out, " {e}");
            }
            (Some(e), Some(a)) => {
                let _ = writeln!(out, "-{e}");
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (Some(e), None) => {
                let _ = writeln!(out, "-{e}");
                has_diff = true;
            }
            (None, Some(a)) => {
                let _ = writeln!(out, "+{a}");
                has_diff = true;
            }
            (None, None) => {}
        }
    }

    if has_diff { out } else { String::new() }
}

// ============================================================================
// Snapshot Assertion
// ============================================================================

fn snapshot_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("snapshots")
        .join(format!("{name}.snap"))
}

fn is_bless() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Assert that `actual` matches the stored snapshot `name`.
///
/// # Panics
///
/// * If the snapshot file does not exist and `BLESS=1` is not set.
/// * If the text does not match the stored snapshot.
pub fn assert_text_snapshot(name: &str, actual: &str, base_dir: &str, mode: MatchMode) {
    let path = snapshot_path(Path::new(base_dir), name);

    if is_bless() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("failed to create {}: {e}", parent.display()));
        }
        std::fs::write(&path, actual)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
        return;
    }

    match std::fs::read_to_string(&path) {
        Ok(expected) => {
            let expected = normalize(&expected, mode);
            let actual = normalize(actual, mode);
            if expected != actual {
                panic!(
                    "\n=== Snapshot mismatch: '{name}' ===\nFile: {}\nMode: {mode:?}\n\
                     Set BLESS=1 to update.\n\nDiff (- expected, + actual):\n{}",
                    path.display(),
                    diff_text(&expected, &actual)
                );
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            panic!(
                "\n=== No snapshot found: '{name}' ===\nExpected at: {}\n\
                 Run with BLESS=1 to create it.\n\nActual output:\n{actual}",
                path.display()
            );
        }
        Err(e) => panic!("Failed to read snapshot '{}': {e}", path.display()),
    }
}

/// Assert that a layout rendering matches a stored snapshot.
///
/// Uses `CARGO_MANIFEST_DIR` to locate the snapshot directory.
#[macro_export]
macro_rules! assert_layout_snapshot {
    ($name:expr, $engine:expr) => {
        $crate::snapshot::assert_text_snapshot(
            $name,
            &$crate::snapshot::render_layout($engine),
            env!("CARGO_MANIFEST_DIR"),
            $crate::snapshot::MatchMode::TrimTrailing,
        )
    };
}
