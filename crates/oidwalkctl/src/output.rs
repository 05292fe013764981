//! Output formatting: a short terminal summary or the JSON hand-off.

use crate::cli::Cli;
use oidwalk_common::catalog::Catalog;
use oidwalk_common::survey::{FailedRoot, SurveyReport, SurveyStats, Untranslated};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// Settings the template generator applies to every item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    pub update_interval: String,
    pub discovery_interval: String,
    pub history: String,
    pub trends: String,
}

impl From<&Cli> for TemplateSettings {
    fn from(cli: &Cli) -> Self {
        Self {
            update_interval: cli.update_interval.clone(),
            discovery_interval: cli.discovery_interval.clone(),
            history: cli.history.clone(),
            trends: cli.trends.clone(),
        }
    }
}

/// Pass counters and failures, without the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub stats: SurveyStats,
    pub failed_roots: Vec<FailedRoot>,
    pub untranslated: Vec<Untranslated>,
}

/// Document consumed by the template generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub template: TemplateSettings,
    pub catalog: Catalog,
    pub report: PassReport,
}

impl Handoff {
    pub fn new(template: TemplateSettings, report: SurveyReport) -> Self {
        Self {
            template,
            catalog: report.catalog,
            report: PassReport {
                stats: report.stats,
                failed_roots: report.failed_roots,
                untranslated: report.untranslated,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Human summary of a pass.
pub fn render_summary(report: &SurveyReport) -> String {
    let catalog = &report.catalog;
    let mut lines = vec![
        format!("{}", "[SUMMARY]".bold()),
        format!("  OIDs registered: {}", report.stats.registered),
        format!("  Scalars:         {}", catalog.scalars.len()),
        format!("  Tables:          {}", catalog.table_count()),
        format!("  Columns:         {}", catalog.column_count()),
    ];

    let anomalies = catalog.anomalies.len();
    if anomalies > 0 {
        lines.push(format!("  Anomalies:       {}", anomalies.yellow()));
    } else {
        lines.push(format!("  Anomalies:       {}", anomalies));
    }

    if !report.untranslated.is_empty() {
        lines.push(format!("  Untranslated:    {}", report.untranslated.len().yellow()));
    }

    if !report.failed_roots.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", "[FAILED ROOTS]".bright_red()));
        for failed in &report.failed_roots {
            lines.push(format!("  * {}: {}", failed.root, failed.reason));
        }
    }

    if anomalies > 0 {
        lines.push(String::new());
        lines.push(format!("{}", "[ANOMALIES]".yellow()));
        for anomaly in &catalog.anomalies {
            lines.push(format!("  * {}", anomaly));
        }
    }

    lines.join("\n")
}

pub fn display_error(message: &str) {
    eprintln!("[ERROR] {}", message.red());
}
