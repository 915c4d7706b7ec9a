//! Stage 4: category-specific structural rewriting.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::category::Category;
use crate::stage1_normalize::is_blank;

// ========== Git status ==========

static RE_USE_HINT_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s*\(use "[^"]+"\s+[^)]+\)"#).unwrap());
static RE_USE_HINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\s*\(use "[^"]+"\)"#).unwrap());

static RE_ON_BRANCH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*On branch \S+\s*$").unwrap());
static RE_YOUR_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Your branch is [^.]+\.\s*$").unwrap());
static RE_NOTHING_TO_COMMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*nothing to commit,?\s*").unwrap());
static RE_TREE_CLEAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*working tree clean\s*$").unwrap());

/// Long-form status phrase → short status code, checked in order.
const STATUS_CODES: &[(&str, char)] = &[
    ("modified:", 'M'),
    ("deleted:", 'D'),
    ("new file:", 'A'),
    ("renamed:", 'R'),
    ("copied:", 'C'),
    ("type changed:", 'T'),
];

static STATUS_RES: LazyLock<Vec<(Regex, char)>> = LazyLock::new(|| {
    STATUS_CODES
        .iter()
        .map(|(phrase, code)| {
            let pattern = format!(r"(?i){}\s+(.+)", regex::escape(phrase));
            (Regex::new(&pattern).unwrap(), *code)
        })
        .collect()
});

/// `        modified:   src/app.ts` → `M src/app.ts`
pub fn compact_status_line(line: &str) -> Option<String> {
    STATUS_RES.iter().find_map(|(re, code)| {
        re.captures(line)
            .map(|caps| format!("{code} {}", caps[1].trim()))
    })
}

fn strip_branch_banners(line: &str) -> String {
    let line = RE_ON_BRANCH.replace(line, "");
    let line = RE_YOUR_BRANCH.replace(&line, "");
    let line = RE_NOTHING_TO_COMMIT.replace(&line, "");
    RE_TREE_CLEAN.replace(&line, "").into_owned()
}

/// Compact `git status` long format into short status codes.
pub fn compact_git_status(output: &str) -> String {
    let mut result = Vec::new();
    for line in output.split('\n') {
        let line = RE_USE_HINT_ARGS.replace_all(line, "");
        let line = RE_USE_HINT.replace_all(&line, "");

        if let Some(short) = compact_status_line(&line) {
            result.push(short);
            continue;
        }
        let line = strip_branch_banners(&line);
        if !is_blank(&line) {
            result.push(line);
        }
    }
    result.join("\n")
}

// ========== Pytest ==========

static RE_PASSED_PROGRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[\w/_.]+\s+PASSED\s*\[").unwrap());
static RE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^=+$").unwrap());

const FAILURE_CONTEXT_PREFIXES: &[&str] = &["assert", "E ", ">", "FAILED", "ERROR"];

/// Scanner state while walking pytest output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureScan {
    #[default]
    Normal,
    InFailureBlock,
}

fn is_failure_trigger(line: &str) -> bool {
    line.contains("FAILED") || line.contains("ERROR") || line.to_lowercase().contains("error:")
}

fn keep_outside_failure(line: &str) -> bool {
    if line.contains("PASSED") || RE_PASSED_PROGRESS.is_match(line) {
        return false;
    }
    let trimmed = line.trim();
    if RE_SEPARATOR.is_match(trimmed) || trimmed.starts_with("collected") {
        return false;
    }
    let lower = line.to_lowercase();
    // Permissive catch-all: unknown summary lines survive.
    let summary = lower.contains("failed") || lower.contains("error") || !lower.contains("passed");
    summary && !trimmed.is_empty()
}

impl FailureScan {
    /// Advance over one line. Returns the next state and whether the line is kept.
    pub fn step(self, line: &str) -> (FailureScan, bool) {
        if is_failure_trigger(line) {
            return (Self::InFailureBlock, true);
        }
        match self {
            Self::InFailureBlock => {
                let ends_block = !is_blank(line) && !line.starts_with(' ');
                if ends_block {
                    let marker = FAILURE_CONTEXT_PREFIXES.iter().any(|p| line.starts_with(p));
                    (Self::Normal, marker)
                } else {
                    (Self::InFailureBlock, true)
                }
            }
            Self::Normal => (Self::Normal, keep_outside_failure(line)),
        }
    }
}

/// Drop passing tests and collection chatter; keep failures, tracebacks and summaries.
pub fn compact_pytest_output(output: &str) -> String {
    let mut state = FailureScan::default();
    let mut result = Vec::new();
    for line in output.split('\n') {
        let (next, keep) = state.step(line);
        if keep {
            result.push(line);
        }
        state = next;
    }
    result.join("\n")
}

// ========== Docker / compose ==========

static RE_HEX_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([a-f0-9]{12})\b").unwrap());
static RE_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").unwrap());
static RE_TABLE_HEADERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^\s*CONTAINER ID\s+IMAGE", r"^\s*REPOSITORY\s+TAG", r"^\s*NAMESPACE\s+NAME"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Shorten 12-char hex IDs to 7 chars, drop table headers and absolute timestamps.
pub fn compact_container_output(output: &str) -> String {
    let mut result = Vec::new();
    for line in output.split('\n') {
        let line = RE_HEX_ID.replace_all(line, |caps: &Captures| caps[1][..7].to_string());
        if RE_TABLE_HEADERS.iter().any(|re| re.is_match(&line)) {
            continue;
        }
        let line = RE_TIMESTAMP.replace_all(&line, "");
        if !is_blank(&line) {
            result.push(line.into_owned());
        }
    }
    result.join("\n")
}

/// Dispatch to the category's compactor; categories without one pass through.
pub fn compact(text: &str, category: Category) -> String {
    if text.is_empty() {
        return String::new();
    }
    match category.compactor() {
        Some(compactor) => compactor(text),
        None => text.to_string(),
    }
}
