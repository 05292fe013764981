//! Walk request model: protocol version, credentials and target.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default agent address
pub const DEFAULT_AGENT: &str = "127.0.0.1";

/// Default agent port
pub const DEFAULT_PORT: u16 = 161;

/// Default v1/v2c community
pub const DEFAULT_COMMUNITY: &str = "public";

/// Default walk root: the whole tree
pub const DEFAULT_ROOT: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnmpVersion {
    #[serde(rename = "1")]
    V1,
    #[default]
    #[serde(rename = "2c")]
    V2c,
    #[serde(rename = "3")]
    V3,
}

impl SnmpVersion {
    /// Value passed to `-v`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2c => "2c",
            Self::V3 => "3",
        }
    }
}

impl FromStr for SnmpVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::V1),
            "2c" | "2C" => Ok(Self::V2c),
            "3" => Ok(Self::V3),
            other => Err(ConfigError::InvalidVersion(other.to_string())),
        }
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SNMPv3 USM security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SecurityLevel {
    #[default]
    #[serde(rename = "noAuthNoPriv")]
    NoAuthNoPriv,
    #[serde(rename = "authNoPriv")]
    AuthNoPriv,
    #[serde(rename = "authPriv")]
    AuthPriv,
}

impl SecurityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAuthNoPriv => "noAuthNoPriv",
            Self::AuthNoPriv => "authNoPriv",
            Self::AuthPriv => "authPriv",
        }
    }

    fn needs_auth(&self) -> bool {
        matches!(self, Self::AuthNoPriv | Self::AuthPriv)
    }

    fn needs_priv(&self) -> bool {
        matches!(self, Self::AuthPriv)
    }
}

impl FromStr for SecurityLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "noauthnopriv" => Ok(Self::NoAuthNoPriv),
            "authnopriv" => Ok(Self::AuthNoPriv),
            "authpriv" => Ok(Self::AuthPriv),
            _ => Err(ConfigError::InvalidSecurityLevel(s.to_string())),
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SNMPv3 user-based security parameters.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UsmParams {
    pub level: SecurityLevel,
    pub context: Option<String>,
    pub sec_name: Option<String>,
    pub auth_protocol: Option<String>,
    pub auth_pass: Option<String>,
    pub priv_protocol: Option<String>,
    pub priv_pass: Option<String>,
}

// Passphrases stay out of logs.
impl fmt::Debug for UsmParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("UsmParams")
            .field("level", &self.level)
            .field("context", &self.context)
            .field("sec_name", &self.sec_name)
            .field("auth_protocol", &self.auth_protocol)
            .field("auth_pass", &redact(&self.auth_pass))
            .field("priv_protocol", &self.priv_protocol)
            .field("priv_pass", &redact(&self.priv_pass))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// v1 / v2c community string
    Community(String),
    Usm(UsmParams),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Community(_) => f.write_str("Community(***)"),
            Self::Usm(params) => f.debug_tuple("Usm").field(params).finish(),
        }
    }
}

/// Everything the walk collaborator needs for one subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRequest {
    pub version: SnmpVersion,
    pub credentials: Credentials,
    pub agent: String,
    pub port: u16,
    /// Numeric or symbolic root, passed through untouched
    pub root: String,
}

impl Default for WalkRequest {
    fn default() -> Self {
        Self {
            version: SnmpVersion::default(),
            credentials: Credentials::Community(DEFAULT_COMMUNITY.to_string()),
            agent: DEFAULT_AGENT.to_string(),
            port: DEFAULT_PORT,
            root: DEFAULT_ROOT.to_string(),
        }
    }
}

impl WalkRequest {
    /// Same agent and credentials, different subtree.
    pub fn with_root(&self, root: &str) -> Self {
        Self {
            root: root.to_string(),
            ..self.clone()
        }
    }

    /// `agent:port` as the net-snmp tools expect it.
    pub fn target(&self) -> String {
        format!("{}:{}", self.agent, self.port)
    }

    /// Check that the credentials fit the protocol version.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.version, &self.credentials) {
            (SnmpVersion::V1 | SnmpVersion::V2c, Credentials::Community(_)) => Ok(()),
            (SnmpVersion::V3, Credentials::Usm(usm)) => {
                if usm.sec_name.as_deref().map_or(true, str::is_empty) {
                    return Err(ConfigError::MissingCredential("a security name"));
                }
                if usm.level.needs_auth() && usm.auth_pass.is_none() {
                    return Err(ConfigError::MissingCredential(
                        "an authentication passphrase for this security level",
                    ));
                }
                if usm.level.needs_priv() && usm.priv_pass.is_none() {
                    return Err(ConfigError::MissingCredential(
                        "a privacy passphrase for this security level",
                    ));
                }
                Ok(())
            }
            (version, _) => Err(ConfigError::CredentialMismatch(version.to_string())),
        }
    }

    /// Arguments for `snmpwalk`, numeric OID output (`-On`).
    pub fn walk_args(&self) -> Vec<String> {
        let mut args = vec!["-v".to_string(), self.version.as_str().to_string()];

        match &self.credentials {
            Credentials::Community(community) => {
                args.push("-c".to_string());
                args.push(community.clone());
            }
            Credentials::Usm(usm) => {
                args.push("-l".to_string());
                args.push(usm.level.as_str().to_string());
                if let Some(context) = &usm.context {
                    args.push("-n".to_string());
                    args.push(context.clone());
                }
                if let Some(name) = &usm.sec_name {
                    args.push("-u".to_string());
                    args.push(name.clone());
                }
                if usm.level.needs_auth() {
                    if let Some(proto) = &usm.auth_protocol {
                        args.push("-a".to_string());
                        args.push(proto.clone());
                    }
                    if let Some(pass) = &usm.auth_pass {
                        args.push("-A".to_string());
                        args.push(pass.clone());
                    }
                }
                if usm.level.needs_priv() {
                    if let Some(proto) = &usm.priv_protocol {
                        args.push("-x".to_string());
                        args.push(proto.clone());
                    }
                    if let Some(pass) = &usm.priv_pass {
                        args.push("-X".to_string());
                        args.push(pass.clone());
                    }
                }
            }
        }

        args.push("-On".to_string());
        args.push(self.target());
        args.push(self.root.clone());
        args
    }
}
