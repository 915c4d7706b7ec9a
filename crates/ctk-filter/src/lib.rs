//! CTK Filter: 4-stage cleanup pipeline for captured command output.
//!
//! Stages:
//! 1. Normalize: strip ANSI sequences and box glyphs, collapse blank runs
//! 2. Filter: drop boilerplate lines (universal + per-category patterns)
//! 3. Dedup: collapse runs of near-identical lines into one counted line
//! 4. Compact: category-specific rewriting (git status, pytest, docker)
//!
//! Every stage is a pure function of its input and the static pattern tables.

pub mod category;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod stage1_normalize;
pub mod stage2_filter;
pub mod stage3_dedup;
pub mod stage4_compact;

pub use category::Category;
pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use pipeline::{filter_output, filter_output_for, FilterReport, OutputFilter};
