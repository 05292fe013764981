//! External tool seam: subtree walks and OID translation.
//!
//! Production code uses [`RealSnmpTools`], which runs the net-snmp command
//! line tools. Tests use [`FakeSnmpTools`] with pre-configured responses, so
//! no agent and no MIB files are needed.

use crate::config::ToolSettings;
use crate::error::ToolError;
use crate::oid::{OidPath, SymbolicPath};
use crate::snmp::WalkRequest;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Translator output for one OID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Full symbolic name (`snmptranslate -Of`)
    pub full_name: SymbolicPath,
    /// Definition block (`snmptranslate -Td -OS`); empty when unavailable
    pub definition: String,
}

#[async_trait]
pub trait SnmpTools: Send + Sync {
    /// Walk one subtree and return the raw response text.
    ///
    /// `Ok("")` means the subtree had nothing to return; a failed query is
    /// always an `Err`.
    async fn walk(&self, request: &WalkRequest) -> Result<String, ToolError>;

    /// Resolve a numeric OID to its full name and definition block.
    async fn translate(&self, oid: &OidPath) -> Result<Translation, ToolError>;
}

// ============================================================================
// Real tools (net-snmp binaries)
// ============================================================================

pub struct RealSnmpTools {
    settings: ToolSettings,
}

impl RealSnmpTools {
    pub fn new(settings: ToolSettings) -> Self {
        Self { settings }
    }
}

impl Default for RealSnmpTools {
    fn default() -> Self {
        Self::new(ToolSettings::default())
    }
}

#[async_trait]
impl SnmpTools for RealSnmpTools {
    async fn walk(&self, request: &WalkRequest) -> Result<String, ToolError> {
        debug!(
            "Walking {} from {} (SNMPv{})",
            request.target(),
            request.root,
            request.version
        );
        run_tool(
            &self.settings.snmpwalk,
            &request.walk_args(),
            self.settings.effective_walk_timeout(),
        )
        .await
    }

    async fn translate(&self, oid: &OidPath) -> Result<Translation, ToolError> {
        let program = &self.settings.snmptranslate;
        let secs = self.settings.effective_translate_timeout();
        let dotted = oid.to_dotted();

        let full = run_tool(program, &["-Of".to_string(), dotted.clone()], secs).await?;
        let full = full.trim();
        let full_name: SymbolicPath = full.parse().map_err(|_| ToolError::Unparseable {
            program: program.clone(),
            output: full.to_string(),
        })?;

        // A missing definition only costs metadata, the name is enough to classify.
        let args = ["-Td".to_string(), "-OS".to_string(), dotted];
        let definition = match run_tool(program, &args, secs).await {
            Ok(text) => text.trim_end().to_string(),
            Err(e) => {
                warn!("No definition for {}: {}", oid, e);
                String::new()
            }
        };

        Ok(Translation {
            full_name,
            definition,
        })
    }
}

/// Run a tool directly (no shell) with a timeout and capture stdout.
async fn run_tool(program: &str, args: &[String], timeout_secs: u64) -> Result<String, ToolError> {
    let start = Instant::now();
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);

    let output = match timeout(Duration::from_secs(timeout_secs), command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(ToolError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            })
        }
        Err(_) => {
            return Err(ToolError::Timeout {
                program: program.to_string(),
                secs: timeout_secs,
            })
        }
    };

    debug!(
        "{} finished in {}ms with {:?}",
        program,
        start.elapsed().as_millis(),
        output.status.code()
    );

    if !output.status.success() {
        return Err(ToolError::NonZeroExit {
            program: program.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ============================================================================
// Fake tools (testing)
// ============================================================================

/// Pre-configured walk and translate responses.
///
/// Walks are keyed by root, translations by OID. Unconfigured roots and
/// OIDs fail with a non-zero exit, like the real tools do for unknown input.
#[derive(Debug, Default, Clone)]
pub struct FakeSnmpTools {
    walks: HashMap<String, Result<String, ToolError>>,
    translations: HashMap<OidPath, Result<Translation, ToolError>>,
    delays: HashMap<OidPath, Duration>,
    translate_calls: Arc<AtomicUsize>,
}

impl FakeSnmpTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_walk(mut self, root: &str, output: &str) -> Self {
        self.walks.insert(root.to_string(), Ok(output.to_string()));
        self
    }

    pub fn with_walk_failure(mut self, root: &str, error: ToolError) -> Self {
        self.walks.insert(root.to_string(), Err(error));
        self
    }

    /// Register a translation. Panics on malformed test input.
    pub fn with_translation(mut self, oid: &str, full_name: &str, definition: &str) -> Self {
        let translation = Translation {
            full_name: full_name.parse().expect("valid symbolic name"),
            definition: definition.to_string(),
        };
        self.translations
            .insert(oid.parse().expect("valid OID"), Ok(translation));
        self
    }

    pub fn with_translation_failure(mut self, oid: &str, error: ToolError) -> Self {
        self.translations
            .insert(oid.parse().expect("valid OID"), Err(error));
        self
    }

    /// Delay the translation of one OID, to shuffle completion order.
    pub fn with_translate_delay(mut self, oid: &str, delay: Duration) -> Self {
        self.delays.insert(oid.parse().expect("valid OID"), delay);
        self
    }

    /// Number of translate calls made so far.
    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnmpTools for FakeSnmpTools {
    async fn walk(&self, request: &WalkRequest) -> Result<String, ToolError> {
        self.walks
            .get(&request.root)
            .cloned()
            .unwrap_or_else(|| {
                Err(ToolError::NonZeroExit {
                    program: "snmpwalk".to_string(),
                    code: Some(1),
                    stderr: format!("Timeout: No Response from {}", request.target()),
                })
            })
    }

    async fn translate(&self, oid: &OidPath) -> Result<Translation, ToolError> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(oid) {
            tokio::time::sleep(*delay).await;
        }
        self.translations.get(oid).cloned().unwrap_or_else(|| {
            Err(ToolError::NonZeroExit {
                program: "snmptranslate".to_string(),
                code: Some(2),
                stderr: format!("Unknown object identifier: {}", oid),
            })
        })
    }
}
