//! Ordered set of OIDs seen during a pass.
//!
//! Walk output is fed in line by line. Only lines that start with a dotted
//! numeric OID are accepted; everything else (banners, wrapped string values,
//! agent diagnostics) is discarded. Each OID is accepted at most once.

use crate::oid::OidPath;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// Leading dotted OID, terminated by whitespace, `=` or end of line.
static OID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((?:\.[0-9]+)+)(?:\s|=|$)").unwrap());

/// What happened to one response line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new OID, now pending classification
    Accepted(OidPath),
    /// Already registered earlier in the pass
    Duplicate(OidPath),
    /// Line does not start with a numeric OID
    Malformed,
}

impl RegisterOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Pull the leading numeric OID out of a `snmpwalk -On` line.
pub fn extract_oid(line: &str) -> Option<OidPath> {
    let caps = OID_TOKEN.captures(line)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Registration-ordered, duplicate-free set of OIDs.
#[derive(Debug, Default)]
pub struct OidRegistry {
    order: Vec<OidPath>,
    seen: HashSet<OidPath>,
    discarded: usize,
    duplicates: usize,
}

impl OidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the OID at the start of a response line.
    pub fn register(&mut self, line: &str) -> RegisterOutcome {
        match extract_oid(line) {
            Some(oid) => self.register_oid(oid),
            None => {
                self.discarded += 1;
                debug!("Discarding line: '{}'", line);
                RegisterOutcome::Malformed
            }
        }
    }

    /// Register an already-parsed OID.
    pub fn register_oid(&mut self, oid: OidPath) -> RegisterOutcome {
        if self.seen.insert(oid.clone()) {
            self.order.push(oid.clone());
            RegisterOutcome::Accepted(oid)
        } else {
            self.duplicates += 1;
            debug!("Skipping duplicate OID {}", oid);
            RegisterOutcome::Duplicate(oid)
        }
    }

    pub fn contains(&self, oid: &OidPath) -> bool {
        self.seen.contains(oid)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered OIDs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OidPath> {
        self.order.iter()
    }

    /// Lines rejected because they did not start with an OID.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Lines whose OID had already been registered.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
