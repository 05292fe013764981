//! Scalar vs. table-column classification.
//!
//! MIBs name conceptual tables `somethingTable`, their rows `somethingEntry`
//! and put columns directly under the entry. The classifier relies on that
//! naming habit only: the first symbolic segment whose upper-cased text ends
//! with `TABLE` marks the table, and the column root sits two levels below
//! it. Anything without such a segment is a scalar.

use crate::anomaly::Anomaly;
use crate::oid::{OidPath, SymbolicPath};
use crate::rules::NamingRules;

/// Outcome of classifying one OID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Scalar,
    Column {
        /// Schema-level OID shared by every row instance of the column
        column_oid: OidPath,
        table_oid: OidPath,
        /// Symbolic name of the column root, when the full name reaches that deep
        column_name: Option<SymbolicPath>,
        /// Scan index of the table segment
        level: usize,
    },
}

impl Classification {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar)
    }
}

/// Index of the first segment naming a table, if any.
pub fn table_level(full_name: &SymbolicPath, rules: &NamingRules) -> Option<usize> {
    full_name
        .segments()
        .iter()
        .position(|segment| segment.to_uppercase().ends_with(rules.table_suffix))
}

/// Classify `oid` from its symbolic full name.
///
/// Pure function of its inputs. Returns [`Anomaly::ShortColumnOid`] instead
/// of a truncated column root when the OID is too short for the convention.
pub fn classify(
    oid: &OidPath,
    full_name: &SymbolicPath,
    rules: &NamingRules,
) -> Result<Classification, Anomaly> {
    let Some(level) = table_level(full_name, rules) else {
        return Ok(Classification::Scalar);
    };

    let needed_arcs = rules.column_arcs(level);
    let short = || Anomaly::ShortColumnOid {
        oid: oid.clone(),
        full_name: full_name.clone(),
        table_segment: full_name.segments()[level].clone(),
        level,
        needed_arcs,
        available_arcs: oid.len(),
    };

    let column_oid = oid.prefix(needed_arcs).ok_or_else(short)?;
    let table_oid = column_oid
        .prefix(rules.table_arcs(level))
        .ok_or_else(short)?;

    Ok(Classification::Column {
        column_name: full_name.prefix(needed_arcs),
        column_oid,
        table_oid,
        level,
    })
}
