//! Level trimming over numeric and symbolic paths.
//!
//! Grouping labels are found by cutting trailing levels off a symbolic full
//! name and reading the segment left at the end.

use crate::oid::{OidPath, SymbolicPath};
use crate::rules::NamingRules;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// Cutting `levels` segments would leave nothing (or less than nothing).
    #[error("cannot remove {levels} level(s) from a path of {available} segment(s)")]
    TooShallow { levels: usize, available: usize },
}

/// A non-empty, dotted segment sequence that can be cut from the end.
pub trait Hierarchy: Sized {
    type Segment;

    fn depth(&self) -> usize;

    /// Keep the first `count` segments.
    fn keep(&self, count: usize) -> Option<Self>;

    fn last_segment(&self) -> Option<Self::Segment>;

    /// Remove `levels` trailing segments.
    ///
    /// Fails instead of under-trimming when the path is not deep enough to
    /// keep at least one segment.
    fn truncate(&self, levels: usize) -> Result<Self, HierarchyError> {
        let available = self.depth();
        if levels >= available {
            return Err(HierarchyError::TooShallow { levels, available });
        }
        self.keep(available - levels)
            .ok_or(HierarchyError::TooShallow { levels, available })
    }
}

impl Hierarchy for OidPath {
    type Segment = u32;

    fn depth(&self) -> usize {
        self.len()
    }

    fn keep(&self, count: usize) -> Option<Self> {
        self.prefix(count)
    }

    fn last_segment(&self) -> Option<u32> {
        self.arcs().last().copied()
    }
}

impl Hierarchy for SymbolicPath {
    type Segment = String;

    fn depth(&self) -> usize {
        self.len()
    }

    fn keep(&self, count: usize) -> Option<Self> {
        self.prefix(count)
    }

    fn last_segment(&self) -> Option<String> {
        self.segments().last().cloned()
    }
}

/// Dotted segment count of a short symbol: `sysDescr` is 1, `sysDescr.0` is 2.
pub fn symbol_depth(short_symbol: &str) -> usize {
    short_symbol.split('.').filter(|s| !s.is_empty()).count()
}

/// Grouping label for a scalar.
///
/// The full name is cut by as many levels as the short symbol spans, so the
/// instance suffix (`.0`) and the leaf itself are both removed.
pub fn scalar_group(
    full_name: &SymbolicPath,
    short_symbol: Option<&str>,
    rules: &NamingRules,
) -> Result<String, HierarchyError> {
    let levels = short_symbol
        .map(symbol_depth)
        .filter(|depth| *depth > 0)
        .unwrap_or(rules.default_scalar_group_depth);
    group_label(full_name, levels)
}

/// Grouping label for a column: the node above its table.
pub fn column_group(
    column_full_name: &SymbolicPath,
    rules: &NamingRules,
) -> Result<String, HierarchyError> {
    group_label(column_full_name, rules.column_group_depth)
}

fn group_label(path: &SymbolicPath, levels: usize) -> Result<String, HierarchyError> {
    let trimmed = path.truncate(levels)?;
    trimmed.last_segment().ok_or(HierarchyError::TooShallow {
        levels,
        available: path.depth(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> SymbolicPath {
        s.parse().unwrap()
    }

    #[test]
    fn test_truncate_oid() {
        let oid: OidPath = ".1.3.6.1.2.1.2.2.1.2".parse().unwrap();
        assert_eq!(oid.truncate(2).unwrap().to_dotted(), ".1.3.6.1.2.1.2.2");
        assert_eq!(oid.truncate(0).unwrap(), oid);
        assert_eq!(oid.truncate(2).unwrap().last_segment(), Some(2));
    }

    #[test]
    fn test_truncate_rejects_over_trim() {
        let oid: OidPath = ".1.3".parse().unwrap();
        assert_eq!(
            oid.truncate(2),
            Err(HierarchyError::TooShallow {
                levels: 2,
                available: 2
            })
        );
        assert!(oid.truncate(5).is_err());
    }

    #[test]
    fn test_symbol_depth() {
        assert_eq!(symbol_depth("sysDescr"), 1);
        assert_eq!(symbol_depth("sysDescr.0"), 2);
        assert_eq!(symbol_depth("ifDescr.1"), 2);
        assert_eq!(symbol_depth(""), 0);
    }

    #[test]
    fn test_scalar_group_without_instance() {
        let rules = NamingRules::default();
        let name = sym(".iso.org.dod.internet.mgmt.mib-2.system.sysDescr");
        assert_eq!(scalar_group(&name, Some("sysDescr"), &rules).unwrap(), "system");
        assert_eq!(scalar_group(&name, None, &rules).unwrap(), "system");
    }

    #[test]
    fn test_scalar_group_with_instance_suffix() {
        let rules = NamingRules::default();
        let name = sym(".iso.org.dod.internet.mgmt.mib-2.system.sysDescr.0");
        assert_eq!(
            scalar_group(&name, Some("sysDescr.0"), &rules).unwrap(),
            "system"
        );
    }

    #[test]
    fn test_scalar_group_empty_symbol_uses_default_depth() {
        let rules = NamingRules::default();
        let name = sym(".iso.org.dod.internet.mgmt.mib-2.system.sysUpTime");
        assert_eq!(scalar_group(&name, Some(""), &rules).unwrap(), "system");
    }

    #[test]
    fn test_scalar_group_too_shallow() {
        let rules = NamingRules::default();
        let name = sym(".iso");
        assert!(scalar_group(&name, Some("iso"), &rules).is_err());
    }

    #[test]
    fn test_column_group() {
        let rules = NamingRules::default();
        let name = sym(".iso.org.dod.internet.mgmt.mib-2.interfaces.ifTable.ifEntry.ifDescr");
        assert_eq!(column_group(&name, &rules).unwrap(), "interfaces");
    }
}
