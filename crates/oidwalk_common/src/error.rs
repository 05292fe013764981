//! Error types for oidwalk.

use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration problems. These are the only fatal errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("SNMP version '{0}' not recognized (expected 1, 2c or 3)")]
    InvalidVersion(String),

    #[error("Security level '{0}' not recognized (expected noAuthNoPriv, authNoPriv or authPriv)")]
    InvalidSecurityLevel(String),

    #[error("SNMPv3 requires {0}")]
    MissingCredential(&'static str),

    #[error("Credentials do not match SNMP version {0}")]
    CredentialMismatch(String),
}

/// Failure of an external collaborator call.
///
/// Kept distinct from an empty result: a walk that returns no lines with a
/// zero exit status is an exhausted subtree, not a `ToolError`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("{program} could not be started: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} exited with {}: {stderr}", exit_label(.code))]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("{program} returned unusable output: '{output}'")]
    Unparseable { program: String, output: String },

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
