//! One discovery pass over an agent.
//!
//! For each root: walk, register the response lines, translate the newly
//! accepted OIDs with bounded concurrency, then feed the translations to the
//! catalog builder in registration order. Translation completion order never
//! leaks into the catalog.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::config::ToolSettings;
use crate::error::ToolError;
use crate::oid::OidPath;
use crate::registry::{OidRegistry, RegisterOutcome};
use crate::rules::NamingRules;
use crate::snmp::WalkRequest;
use crate::tools::{SnmpTools, Translation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Default translate calls in flight
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Values an agent returns instead of data at the edge of its MIB view.
const EXCEPTION_VALUES: &[&str] = &[
    "No Such Object",
    "No Such Instance",
    "No more variables left",
];

/// Line counters for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyStats {
    pub lines_seen: usize,
    pub discarded: usize,
    pub duplicates: usize,
    /// Lines carrying an SNMP exception value instead of data
    pub exceptions: usize,
    pub registered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRoot {
    pub root: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Untranslated {
    pub oid: OidPath,
    pub reason: String,
}

/// Everything a pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub catalog: Catalog,
    pub stats: SurveyStats,
    pub failed_roots: Vec<FailedRoot>,
    pub untranslated: Vec<Untranslated>,
}

impl SurveyReport {
    /// Nothing usable came back and at least one root failed.
    pub fn all_roots_failed(&self, roots: usize) -> bool {
        roots > 0 && self.failed_roots.len() == roots
    }
}

/// Runs a pass against one set of collaborators.
pub struct Survey {
    tools: Arc<dyn SnmpTools>,
    concurrency: usize,
    rules: NamingRules,
}

impl Survey {
    pub fn new(tools: Arc<dyn SnmpTools>) -> Self {
        Self {
            tools,
            concurrency: DEFAULT_CONCURRENCY,
            rules: NamingRules::default(),
        }
    }

    /// Take the concurrency limit from tool settings.
    pub fn with_settings(self, settings: &ToolSettings) -> Self {
        self.with_concurrency(settings.effective_concurrency())
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_rules(mut self, rules: NamingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Walk every root in order and build one catalog.
    ///
    /// Never fails as a whole: unreachable roots and untranslatable OIDs are
    /// recorded in the report and the pass continues.
    pub async fn run(&self, request: &WalkRequest, roots: &[String]) -> SurveyReport {
        let mut registry = OidRegistry::new();
        let mut builder = CatalogBuilder::with_rules(self.rules.clone());
        let mut report = SurveyReport::default();

        for root in roots {
            let walk = request.with_root(root);
            let output = match self.tools.walk(&walk).await {
                Ok(output) => output,
                Err(e) => {
                    warn!("Walk of {} failed: {}", root, e);
                    report.failed_roots.push(FailedRoot {
                        root: root.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let pending = register_lines(&mut registry, &output, &mut report.stats);
            info!("Root {}: {} new OIDs", root, pending.len());

            for (oid, result) in self.translate_all(pending).await {
                match result {
                    Ok(translation) => {
                        builder.ingest(&oid, &translation);
                    }
                    Err(e) => {
                        warn!("Metadata unavailable for {}: {}", oid, e);
                        report.untranslated.push(Untranslated {
                            oid,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        report.stats.discarded = registry.discarded();
        report.stats.duplicates = registry.duplicates();
        report.stats.registered = registry.len();
        report.catalog = builder.finish();

        info!(
            "Pass done: {} OIDs, {} scalars, {} tables, {} anomalies, {} failed roots",
            report.stats.registered,
            report.catalog.scalars.len(),
            report.catalog.table_count(),
            report.catalog.anomalies.len(),
            report.failed_roots.len()
        );
        report
    }

    /// Translate in parallel, return results in input order.
    async fn translate_all(
        &self,
        oids: Vec<OidPath>,
    ) -> Vec<(OidPath, Result<Translation, ToolError>)> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set = JoinSet::new();

        for (index, oid) in oids.iter().cloned().enumerate() {
            let tools = Arc::clone(&self.tools);
            let semaphore = Arc::clone(&semaphore);
            join_set.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => tools.translate(&oid).await,
                    Err(e) => Err(ToolError::TaskFailed(e.to_string())),
                };
                (index, result)
            });
        }

        let mut slots: Vec<Option<Result<Translation, ToolError>>> = vec![None; oids.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => warn!("Translate task failed: {}", e),
            }
        }

        oids.into_iter()
            .zip(slots)
            .map(|(oid, slot)| {
                let result = slot.unwrap_or_else(|| {
                    Err(ToolError::TaskFailed("translate task did not complete".to_string()))
                });
                (oid, result)
            })
            .collect()
    }
}

/// Register one walk's lines; returns the OIDs that are new to this pass.
fn register_lines(registry: &mut OidRegistry, output: &str, stats: &mut SurveyStats) -> Vec<OidPath> {
    let mut pending = Vec::new();
    for line in output.lines() {
        stats.lines_seen += 1;
        if is_exception(line) {
            stats.exceptions += 1;
            continue;
        }
        if let RegisterOutcome::Accepted(oid) = registry.register(line) {
            pending.push(oid);
        }
    }
    pending
}

/// `.1.3.6.1.2.1.99 = No Such Object available on this agent at this OID`
fn is_exception(line: &str) -> bool {
    match line.split_once(" = ") {
        Some((_, value)) => EXCEPTION_VALUES.iter().any(|e| value.starts_with(e)),
        None => false,
    }
}
