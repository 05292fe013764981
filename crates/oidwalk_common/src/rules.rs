//! Naming-convention constants used by classification and grouping.
//!
//! These encode how MIB authors conventionally name and nest tables
//! (`fooTable` → `fooEntry` → `fooColumn`). They are fixed rules matching that
//! convention, not values derived from the MIB syntax, and the output of a
//! run depends on them being exactly these values.

/// Upper-cased suffix that marks a symbolic segment as a table node.
pub const TABLE_SUFFIX: &str = "TABLE";

/// Segment count of a column root on the rooted path, counted from the
/// matched table segment's scan index. The rooted path counts the leading
/// `.` tree root as segment zero, so a column root holds `level + 3` arcs.
pub const COLUMN_ROOT_OFFSET: usize = 4;

/// Levels between a column node and its table node (column → entry → table).
pub const COLUMN_TO_TABLE_DEPTH: usize = 2;

/// Levels a column's symbolic name is truncated by to reach the grouping label.
pub const COLUMN_GROUP_DEPTH: usize = 3;

/// Grouping depth for a scalar whose short symbol could not be resolved.
pub const DEFAULT_SCALAR_GROUP_DEPTH: usize = 1;

/// The rule set handed to the classifier and hierarchy helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRules {
    pub table_suffix: &'static str,
    pub column_root_offset: usize,
    pub column_to_table_depth: usize,
    pub column_group_depth: usize,
    pub default_scalar_group_depth: usize,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            table_suffix: TABLE_SUFFIX,
            column_root_offset: COLUMN_ROOT_OFFSET,
            column_to_table_depth: COLUMN_TO_TABLE_DEPTH,
            column_group_depth: COLUMN_GROUP_DEPTH,
            default_scalar_group_depth: DEFAULT_SCALAR_GROUP_DEPTH,
        }
    }
}

impl NamingRules {
    /// Numeric arcs in a column root for a table marker found at scan `level`.
    pub fn column_arcs(&self, level: usize) -> usize {
        // The rooted path's segment zero is the `.` root, which carries no arc.
        (level + self.column_root_offset).saturating_sub(1)
    }

    /// Numeric arcs in the table root for a table marker found at scan `level`.
    pub fn table_arcs(&self, level: usize) -> usize {
        self.column_arcs(level)
            .saturating_sub(self.column_to_table_depth)
    }
}
