//! Structural anomalies found while classifying.
//!
//! An anomaly is not an error: the pass keeps going, and the anomaly is kept
//! in the catalog so the operator can see which OIDs did not fit the naming
//! convention.

use crate::oid::{OidPath, SymbolicPath};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// A table marker was found but the OID is too short to hold the
    /// conventional column root. The entry is not placed in any table.
    ShortColumnOid {
        oid: OidPath,
        full_name: SymbolicPath,
        table_segment: String,
        level: usize,
        needed_arcs: usize,
        available_arcs: usize,
    },
    /// The entry was classified but no grouping label could be derived.
    NoGroupLabel {
        oid: OidPath,
        full_name: SymbolicPath,
        levels: usize,
    },
}

impl Anomaly {
    pub fn oid(&self) -> &OidPath {
        match self {
            Self::ShortColumnOid { oid, .. } | Self::NoGroupLabel { oid, .. } => oid,
        }
    }

    /// Whether the entry was left out of the catalog's scalars and tables.
    pub fn excludes_entry(&self) -> bool {
        matches!(self, Self::ShortColumnOid { .. })
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortColumnOid {
                oid,
                table_segment,
                needed_arcs,
                available_arcs,
                ..
            } => write!(
                f,
                "{} under table '{}' has {} arc(s), column root needs {}",
                oid, table_segment, available_arcs, needed_arcs
            ),
            Self::NoGroupLabel {
                oid,
                full_name,
                levels,
            } => write!(
                f,
                "{} ({}) is too shallow to strip {} level(s) for a group label",
                oid, full_name, levels
            ),
        }
    }
}
