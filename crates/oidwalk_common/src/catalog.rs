//! Catalog of monitorable items built from translated OIDs.

use crate::anomaly::Anomaly;
use crate::classifier::{classify, Classification};
use crate::definition::{self, Definition, ValueMapEntry};
use crate::hierarchy::{column_group, scalar_group, HierarchyError};
use crate::oid::{OidPath, SymbolicPath};
use crate::rules::NamingRules;
use crate::tools::Translation;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// A standalone value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarItem {
    pub oid: OidPath,
    pub symbol: Option<String>,
    pub module: Option<String>,
    /// Grouping label ("application")
    pub app_name: Option<String>,
    pub full_name: SymbolicPath,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_map: Option<Vec<ValueMapEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textual_convention: Option<String>,
}

/// One column of a conceptual table, registered once per schema position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnItem {
    pub column_oid: OidPath,
    pub table_oid: OidPath,
    pub symbol: Option<String>,
    pub module: Option<String>,
    pub app_name: Option<String>,
    /// Symbolic name of the column root (of the first row instance when the
    /// translator's name did not reach the column depth)
    pub full_name: SymbolicPath,
    pub description: Option<String>,
    pub value_map: Option<Vec<ValueMapEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textual_convention: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifiedEntry {
    Scalar(ScalarItem),
    Column(ColumnItem),
}

impl ClassifiedEntry {
    /// The scalar OID or the column root OID.
    pub fn oid(&self) -> &OidPath {
        match self {
            Self::Scalar(s) => &s.oid,
            Self::Column(c) => &c.column_oid,
        }
    }

    pub fn app_name(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.app_name.as_deref(),
            Self::Column(c) => c.app_name.as_deref(),
        }
    }
}

/// Scalars, table columns keyed by table OID, and structural anomalies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub scalars: Vec<ScalarItem>,
    pub tables: BTreeMap<OidPath, Vec<ColumnItem>>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.tables.is_empty() && self.anomalies.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Columns of one table, in insertion order.
    pub fn columns(&self, table_oid: &OidPath) -> &[ColumnItem] {
        self.tables.get(table_oid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All entries: scalars first, then columns table by table.
    pub fn entries(&self) -> impl Iterator<Item = ClassifiedEntry> + '_ {
        self.scalars
            .iter()
            .cloned()
            .map(ClassifiedEntry::Scalar)
            .chain(
                self.tables
                    .values()
                    .flatten()
                    .cloned()
                    .map(ClassifiedEntry::Column),
            )
    }
}

/// What [`CatalogBuilder::ingest`] did with one OID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Added(ClassifiedEntry),
    /// Another row instance of a column that is already in the catalog
    KnownColumn(OidPath),
    /// Did not fit the naming convention; recorded as an anomaly
    Flagged,
}

/// Assembles a [`Catalog`] one translated OID at a time.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    rules: NamingRules,
    catalog: Catalog,
    known_columns: HashSet<OidPath>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: NamingRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Classify one newly registered OID and add it to the catalog.
    pub fn ingest(&mut self, oid: &OidPath, translation: &Translation) -> IngestOutcome {
        let definition = definition::parse(&translation.definition);

        match classify(oid, &translation.full_name, &self.rules) {
            Err(anomaly) => {
                warn!("Structural anomaly: {}", anomaly);
                self.catalog.anomalies.push(anomaly);
                IngestOutcome::Flagged
            }
            Ok(Classification::Scalar) => {
                let group = scalar_group(&translation.full_name, definition.symbol(), &self.rules);
                let app_name = self.group_or_flag(oid, &translation.full_name, group);
                let item = scalar_item(oid, translation, definition, app_name);
                info!(
                    "Scalar {} ({}) in group {}",
                    item.oid,
                    item.symbol.as_deref().unwrap_or("?"),
                    item.app_name.as_deref().unwrap_or("-")
                );
                self.catalog.scalars.push(item.clone());
                IngestOutcome::Added(ClassifiedEntry::Scalar(item))
            }
            Ok(Classification::Column {
                column_oid,
                table_oid,
                column_name,
                ..
            }) => {
                if !self.known_columns.insert(column_oid.clone()) {
                    debug!("{} is another row of column {}", oid, column_oid);
                    return IngestOutcome::KnownColumn(column_oid);
                }

                let full_name = column_name.unwrap_or_else(|| translation.full_name.clone());
                let group = column_group(&full_name, &self.rules);
                let app_name = self.group_or_flag(oid, &full_name, group);
                let item = ColumnItem {
                    column_oid,
                    table_oid: table_oid.clone(),
                    symbol: definition.symbol().map(strip_instance),
                    module: definition.module().map(str::to_string),
                    app_name,
                    full_name,
                    description: definition.description,
                    value_map: definition.value_map,
                    textual_convention: definition.textual_convention,
                };
                info!("Table {} column {}", table_oid, item.column_oid);
                self.catalog
                    .tables
                    .entry(table_oid)
                    .or_default()
                    .push(item.clone());
                IngestOutcome::Added(ClassifiedEntry::Column(item))
            }
        }
    }

    pub fn finish(self) -> Catalog {
        self.catalog
    }

    fn group_or_flag(
        &mut self,
        oid: &OidPath,
        full_name: &SymbolicPath,
        group: Result<String, HierarchyError>,
    ) -> Option<String> {
        match group {
            Ok(label) => Some(label),
            Err(HierarchyError::TooShallow { levels, .. }) => {
                let anomaly = Anomaly::NoGroupLabel {
                    oid: oid.clone(),
                    full_name: full_name.clone(),
                    levels,
                };
                warn!("Structural anomaly: {}", anomaly);
                self.catalog.anomalies.push(anomaly);
                None
            }
        }
    }
}

fn scalar_item(
    oid: &OidPath,
    translation: &Translation,
    definition: Definition,
    app_name: Option<String>,
) -> ScalarItem {
    ScalarItem {
        oid: oid.clone(),
        symbol: definition.symbol().map(str::to_string),
        module: definition.module().map(str::to_string),
        app_name,
        full_name: translation.full_name.clone(),
        description: definition.description,
        value_map: definition.value_map,
        textual_convention: definition.textual_convention,
    }
}

/// `ifDescr.1` -> `ifDescr`
fn strip_instance(symbol: &str) -> String {
    symbol.split('.').next().unwrap_or(symbol).to_string()
}
