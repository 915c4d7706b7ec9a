//! Stage 2: drop boilerplate lines by pattern.
//!
//! All patterns are searched (not anchored unless the pattern says so) and
//! matched case-insensitively.

use regex::Regex;
use std::sync::LazyLock;

use crate::category::Category;

/// Boilerplate dropped for every category.
const UNIVERSAL: &[&str] = &[
    r"^\s*$",
    // Separators
    r"^=+$",
    r"^-+$",
    r"^\++$",
    r"^\*+$",
    r"^~+$",
    r"^#+$",
    // Progress verbs
    r"^\s*(Using|Fetching|Downloading|Installing|Building|Compiling|Processing|Analyzing|Checking|Validating|Verifying|Resolving|Preparing|Generating|Creating|Updating|Removing|Cleaning|Unpacking|Configuring|Setting up)",
    r"^\s*\d+%\s*\|.*\|",
    r"^\s*\d+%\s+complete",
    r"^\s*\[\d+/\d+\]",
    // Log levels
    r"^\s*WARN\s*:",
    r"^\s*INFO\s*:",
    r"^\s*DEBUG\s*:",
    r"^\s*TRACE\s*:",
    r"^\s*notice\s*:",
    r"^\s*verbose\s*:",
    // Timing
    r"^\s*Done in\s+\d+",
    r"^\s*Completed in\s+\d+",
    r"^\s*Finished in\s+\d+",
    r"^\s*Took\s+\d+",
    r"^\s*Time:\s+\d+",
    r"^\s*Duration:\s+\d+",
    r"^\s*real\s+\d+m\d+",
    r"^\s*user\s+\d+m\d+",
    r"^\s*sys\s+\d+m\d+",
    r"^\s*\.{3,}$",
    // Status chatter
    r"^\s*please wait",
    r"^\s*loading",
    r"^\s*spinning up",
    r"^\s*starting",
    r"^\s*initializing",
    r"^\s*running",
    // Package managers
    r"^npm warn",
    r"^npm notice",
    r"^yarn warn",
    r"^pnpm warn",
    r"^warning:",
    r"^deprecation",
    r"^deprecated",
    r"up to date",
    r"already installed",
    r"nothing to do",
    r"no changes",
    r"skipping",
    // Bare verdicts
    r"^\s*ok\s*$",
    r"^\s*success\s*$",
    r"^\s*pass\s*$",
    r"^\s*passed\s*$",
    r"^\s*fail\s*$",
    r"^\s*failed\s*$",
    r"^\s*error:\s*$",
    r"^\s*funding\s+message",
    r"^\s*audited\b",
    // Build tools and test runners
    r"Compiling\s+",
    r"Finished\s+dev",
    r"Running\s+unittests",
    r"^\s*test\s+result:\s+ok",
    r"^\s*\d+\s+passed",
    r"^\s*\d+\s+tests?\s+ran",
    // Help pointers
    r"^See `",
    r"^Run `",
    r"^Try `",
];

/// File status changes, dropped everywhere except git.
const STATUS_CHANGES: &[&str] =
    &[r"^\s*(created|deleted|modified|changed|added|removed|updated|copied|moved|renamed):"];

const DOCKER: &[&str] = &[r"^\s*CONTAINER ID", r"^\s*IMAGE\s+COMMAND", r"^\s*NAMESPACE"];

const DOCKER_COMPOSE: &[&str] = &[
    r"^\s*NAME\s+COMMAND",
    r"Network\s+\S+\s+created",
    r"Container\s+\S+\s+(Started|Created)",
];

const NODEJS: &[&str] = &[
    r"^\s*up to date",
    r"^\s*audited",
    r"^\s*funding",
    r"^added \d+ packages",
    r"^removed \d+ packages",
    r"^changed \d+ packages",
    r"^\s*packages:",
    r"^\s*auditing",
];

const PYTHON: &[&str] = &[
    r"^\s*==",
    r"^\s*---",
    r"^collected \d+ items",
    r"^=\d+ passed",
    r"^=\d+ failed",
    r"^=\d+ skipped",
    r"^\s*PASSED\s*\[",
    r"^\s*passed\s*$",
];

const RUST: &[&str] = &[
    r"^\s*Compiling",
    r"^\s*Finished",
    r"^\s*Running\b",
    r"^\s*Downloading",
];

// Branch banners are also rewritten by the git compactor.
const GIT: &[&str] = &[r"^\s*$", r"^\s*On branch", r"^\s*Your branch"];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
        .collect()
}

pub static UNIVERSAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(UNIVERSAL));
pub static STATUS_CHANGE_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(STATUS_CHANGES));
pub static DOCKER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(DOCKER));
pub static DOCKER_COMPOSE_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(DOCKER_COMPOSE));
pub static NODEJS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(NODEJS));
pub static PYTHON_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(PYTHON));
pub static RUST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(RUST));
pub static GIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(GIT));

/// Whether a line carries no information for the given category.
pub fn is_boilerplate(line: &str, category: Category) -> bool {
    let status_changes: &[Regex] = if category.keeps_status_changes() {
        &[]
    } else {
        STATUS_CHANGE_PATTERNS.as_slice()
    };

    UNIVERSAL_PATTERNS
        .iter()
        .chain(category.extra_patterns())
        .chain(status_changes)
        .any(|re| re.is_match(line))
}

/// Keep the lines that are not boilerplate, preserving order.
pub fn filter_lines<S: AsRef<str>>(lines: &[S], category: Category) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !is_boilerplate(line, category))
        .map(str::to_string)
        .collect()
}
