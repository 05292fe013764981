//! Numeric and symbolic OID paths.
//!
//! Both path kinds are non-empty segment sequences. Comparison, prefix checks
//! and truncation work on segments, never on raw substrings, so `.1.3.6.1.2`
//! is not considered a prefix of `.1.3.6.1.20`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a dotted string could not be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OidParseError {
    #[error("empty path")]
    Empty,

    #[error("empty segment in '{0}'")]
    EmptySegment(String),

    #[error("invalid numeric arc '{arc}' in '{input}'")]
    InvalidArc { input: String, arc: String },
}

/// A numeric object identifier, rendered as `.1.3.6.1.2.1.1.1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OidPath {
    arcs: Vec<u32>,
}

impl OidPath {
    /// Build a path from arcs. Returns `None` for an empty arc list.
    pub fn from_arcs(arcs: Vec<u32>) -> Option<Self> {
        if arcs.is_empty() {
            None
        } else {
            Some(Self { arcs })
        }
    }

    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Number of numeric arcs (the `.` root is not counted).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// The first `count` arcs, or `None` when `count` is zero or too large.
    pub fn prefix(&self, count: usize) -> Option<Self> {
        if count == 0 || count > self.arcs.len() {
            return None;
        }
        Some(Self {
            arcs: self.arcs[..count].to_vec(),
        })
    }

    /// Whether `self` is a segment-wise prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.arcs.starts_with(&self.arcs)
    }

    /// Dotted rendering with a leading dot.
    pub fn to_dotted(&self) -> String {
        let mut out = String::with_capacity(self.arcs.len() * 4);
        for arc in &self.arcs {
            out.push('.');
            out.push_str(&arc.to_string());
        }
        out
    }
}

impl FromStr for OidPath {
    type Err = OidParseError;

    /// Accepts `.1.3.6.1` and `1.3.6.1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body.strip_prefix('.').unwrap_or(body);
        if body.is_empty() {
            return Err(OidParseError::Empty);
        }

        let mut arcs = Vec::new();
        for part in body.split('.') {
            if part.is_empty() {
                return Err(OidParseError::EmptySegment(s.to_string()));
            }
            let arc = part.parse::<u32>().map_err(|_| OidParseError::InvalidArc {
                input: s.to_string(),
                arc: part.to_string(),
            })?;
            arcs.push(arc);
        }
        Ok(Self { arcs })
    }
}

impl TryFrom<String> for OidPath {
    type Error = OidParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OidPath> for String {
    fn from(oid: OidPath) -> Self {
        oid.to_dotted()
    }
}

impl fmt::Display for OidPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

/// A symbolic full name as printed by `snmptranslate -Of`, e.g.
/// `.iso.org.dod.internet.mgmt.mib-2.system.sysDescr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolicPath {
    segments: Vec<String>,
}

impl SymbolicPath {
    /// Build a path from segments. Returns `None` for an empty list.
    pub fn from_segments(segments: Vec<String>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The first `count` segments, or `None` when `count` is zero or too large.
    pub fn prefix(&self, count: usize) -> Option<Self> {
        if count == 0 || count > self.segments.len() {
            return None;
        }
        Some(Self {
            segments: self.segments[..count].to_vec(),
        })
    }

    pub fn to_dotted(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('.');
            out.push_str(segment);
        }
        out
    }
}

impl FromStr for SymbolicPath {
    type Err = OidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body.strip_prefix('.').unwrap_or(body);
        if body.is_empty() {
            return Err(OidParseError::Empty);
        }

        let mut segments = Vec::new();
        for part in body.split('.') {
            if part.is_empty() {
                return Err(OidParseError::EmptySegment(s.to_string()));
            }
            segments.push(part.to_string());
        }
        Ok(Self { segments })
    }
}

impl TryFrom<String> for SymbolicPath {
    type Error = OidParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SymbolicPath> for String {
    fn from(path: SymbolicPath) -> Self {
        path.to_dotted()
    }
}

impl fmt::Display for SymbolicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}
