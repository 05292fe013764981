//! Command line surface.
//!
//! Flags follow the net-snmp tools where they overlap (`-v`, `-c`), plus the
//! template settings that are only handed through to the generator.

use clap::Parser;
use oidwalk_common::error::ConfigError;
use oidwalk_common::snmp::{
    Credentials, SecurityLevel, SnmpVersion, UsmParams, WalkRequest, DEFAULT_AGENT,
    DEFAULT_COMMUNITY, DEFAULT_PORT, DEFAULT_ROOT,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oidwalkctl")]
#[command(about = "Walk an SNMP agent and classify its OIDs into scalars and table columns")]
#[command(version)]
pub struct Cli {
    /// SNMP version (1, 2c or 3)
    #[arg(short = 'v', long = "snmp-version", default_value = "2c")]
    pub snmp_version: SnmpVersion,

    /// Community string (v1/v2c)
    #[arg(short = 'c', long, default_value = DEFAULT_COMMUNITY)]
    pub community: String,

    /// Agent address
    #[arg(short = 'a', long, default_value = DEFAULT_AGENT)]
    pub agent: String,

    /// Agent UDP port
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// v3 security level (noAuthNoPriv, authNoPriv, authPriv)
    #[arg(long, default_value = "noAuthNoPriv")]
    pub sec_level: SecurityLevel,

    /// v3 context name
    #[arg(long)]
    pub context: Option<String>,

    /// v3 security name
    #[arg(long)]
    pub sec_name: Option<String>,

    /// v3 authentication protocol (MD5, SHA, ...)
    #[arg(long)]
    pub auth_protocol: Option<String>,

    /// v3 authentication passphrase
    #[arg(long)]
    pub auth_pass: Option<String>,

    /// v3 privacy protocol (DES, AES, ...)
    #[arg(long)]
    pub priv_protocol: Option<String>,

    /// v3 privacy passphrase
    #[arg(long)]
    pub priv_pass: Option<String>,

    /// Item update interval for the generated template
    #[arg(long, default_value = "1m")]
    pub update_interval: String,

    /// Discovery rule interval for the generated template
    #[arg(long, default_value = "1h")]
    pub discovery_interval: String,

    /// History storage period for the generated template
    #[arg(long, default_value = "1w")]
    pub history: String,

    /// Trend storage period for the generated template
    #[arg(long, default_value = "365d")]
    pub trends: String,

    /// Config file (default: $XDG_CONFIG_HOME/oidwalk/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the JSON hand-off document instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Translate calls in flight (overrides config)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Log level (overrides config, RUST_LOG wins over both)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Subtrees to walk, numeric or symbolic
    #[arg(default_value = DEFAULT_ROOT)]
    pub roots: Vec<String>,
}

impl Cli {
    /// Build and validate the walk request for the first root.
    pub fn walk_request(&self) -> Result<WalkRequest, ConfigError> {
        let credentials = match self.snmp_version {
            SnmpVersion::V3 => Credentials::Usm(UsmParams {
                level: self.sec_level,
                context: self.context.clone(),
                sec_name: self.sec_name.clone(),
                auth_protocol: self.auth_protocol.clone(),
                auth_pass: self.auth_pass.clone(),
                priv_protocol: self.priv_protocol.clone(),
                priv_pass: self.priv_pass.clone(),
            }),
            SnmpVersion::V1 | SnmpVersion::V2c => Credentials::Community(self.community.clone()),
        };

        let request = WalkRequest {
            version: self.snmp_version,
            credentials,
            agent: self.agent.clone(),
            port: self.port,
            root: self
                .roots
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_ROOT.to_string()),
        };
        request.validate()?;
        Ok(request)
    }
}
