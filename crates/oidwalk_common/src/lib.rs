//! oidwalk common - OID classification engine.
//!
//! Turns a numeric SNMP walk into a catalog of scalars and table columns,
//! grouped by their MIB subtree and annotated with definition metadata.

pub mod anomaly;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod definition;
pub mod error;
pub mod hierarchy;
pub mod oid;
pub mod registry;
pub mod rules;
pub mod snmp;
pub mod survey;
pub mod tools;

pub use anomaly::Anomaly;
pub use catalog::{Catalog, CatalogBuilder, ClassifiedEntry, ColumnItem, IngestOutcome, ScalarItem};
pub use classifier::{classify, Classification};
pub use config::{Config, LogConfig, ToolSettings};
pub use definition::{Definition, ModuleSymbol, ValueMapEntry};
pub use error::{ConfigError, ToolError};
pub use hierarchy::{Hierarchy, HierarchyError};
pub use oid::{OidParseError, OidPath, SymbolicPath};
pub use registry::{OidRegistry, RegisterOutcome};
pub use rules::NamingRules;
pub use snmp::{Credentials, SecurityLevel, SnmpVersion, UsmParams, WalkRequest};
pub use survey::{FailedRoot, Survey, SurveyReport, SurveyStats, Untranslated};
pub use tools::{FakeSnmpTools, RealSnmpTools, SnmpTools, Translation};
