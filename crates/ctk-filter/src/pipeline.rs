//! Filter pipeline. Runs the 4 stages in order, then a final blank-line collapse.

use serde::Serialize;
use tracing::debug;

use crate::category::Category;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::{stage1_normalize, stage2_filter, stage3_dedup, stage4_compact};

/// Filtered output with statistics.
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub output: String,
    pub category: String,
    pub original_len: usize,
    pub filtered_len: usize,
    pub lines_in: usize,
    pub lines_out: usize,
    pub reduction_pct: f64,
    pub stages_applied: Vec<String>,
}

impl FilterReport {
    fn empty(category: Category) -> Self {
        Self {
            output: String::new(),
            category: category.label().to_string(),
            original_len: 0,
            filtered_len: 0,
            lines_in: 0,
            lines_out: 0,
            reduction_pct: 0.0,
            stages_applied: Vec::new(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 { return 1.0; }
        self.filtered_len as f64 / self.original_len as f64
    }

    /// Rough token savings at ~4 bytes per token.
    pub fn estimated_tokens_saved(&self) -> usize {
        self.original_len.saturating_sub(self.filtered_len) / 4
    }
}

fn line_count(text: &str) -> usize {
    text.lines().count()
}

/// The output filter. Pattern tables are static; only the dedup threshold varies.
#[derive(Debug, Clone, Default)]
pub struct OutputFilter {
    pub config: FilterConfig,
}

impl OutputFilter {
    pub fn new(config: FilterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_threshold(threshold: f64) -> Result<Self> {
        Self::new(FilterConfig::default().with_threshold(threshold))
    }

    /// Filter output and return only the cleaned text.
    pub fn filter(&self, output: &str, category: Category) -> String {
        self.run(output, category).output
    }

    /// Run all stages over `output`.
    pub fn run(&self, output: &str, category: Category) -> FilterReport {
        if output.is_empty() {
            return FilterReport::empty(category);
        }
        let mut stages = Vec::new();

        let normalized = stage1_normalize::normalize(output);
        let lines: Vec<&str> = normalized.split('\n').collect();
        stages.push("normalize".to_string());
        debug!(category = %category, stage = "normalize", lines = lines.len());

        let filtered = stage2_filter::filter_lines(&lines, category);
        stages.push("filter".to_string());
        debug!(category = %category, stage = "filter", lines = filtered.len());

        let deduped = stage3_dedup::deduplicate(&filtered, self.config.similarity_threshold);
        stages.push("dedup".to_string());
        debug!(category = %category, stage = "dedup", lines = deduped.len());

        let compacted = stage4_compact::compact(&deduped.join("\n"), category);
        if category.compactor().is_some() {
            stages.push("compact".to_string());
            debug!(category = %category, stage = "compact", lines = line_count(&compacted));
        }

        let compacted_lines: Vec<&str> = compacted.split('\n').collect();
        let result = stage1_normalize::collapse_blank_lines(&compacted_lines);
        stages.push("finalize".to_string());

        let original_len = output.len();
        let filtered_len = result.len();
        let reduction_pct = (original_len as f64 - filtered_len as f64) / original_len as f64 * 100.0;
        debug!(
            category = %category,
            original_len,
            filtered_len,
            reduction_pct,
            "filtered output"
        );

        FilterReport {
            lines_in: line_count(output),
            lines_out: line_count(&result),
            output: result,
            category: category.label().to_string(),
            original_len,
            filtered_len,
            reduction_pct,
            stages_applied: stages,
        }
    }
}

/// Filter captured output for a category label. Unknown labels get the universal filter only.
pub fn filter_output(output: &str, category: &str) -> String {
    filter_output_for(output, Category::from_label(category))
}

pub fn filter_output_for(output: &str, category: Category) -> String {
    OutputFilter::default().filter(output, category)
}
