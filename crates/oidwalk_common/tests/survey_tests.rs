//! End-to-end tests for a discovery pass.
//!
//! Tests verify:
//! - Scalars and columns are classified and grouped from walk output
//! - Garbage lines and duplicates never reach the catalog
//! - Failed roots and untranslatable OIDs are isolated
//! - Output is deterministic regardless of translation completion order

use oidwalk_common::anomaly::Anomaly;
use oidwalk_common::error::ToolError;
use oidwalk_common::oid::OidPath;
use oidwalk_common::snmp::WalkRequest;
use oidwalk_common::survey::Survey;
use oidwalk_common::tools::FakeSnmpTools;
use std::sync::Arc;
use std::time::Duration;

const MIB2: &str = ".iso.org.dod.internet.mgmt.mib-2";

fn oid(s: &str) -> OidPath {
    s.parse().unwrap()
}

fn roots(list: &[&str]) -> Vec<String> {
    list.iter().map(|r| r.to_string()).collect()
}

/// Agent with two system scalars and a two-row interface table.
fn small_agent() -> FakeSnmpTools {
    let walk = "\
.1.3.6.1.2.1.1.1.0 = STRING: \"Linux router 5.15\"
.1.3.6.1.2.1.1.5.0 = STRING: \"edge-01\"
.1.3.6.1.2.1.2.2.1.2.1 = STRING: \"lo\"
.1.3.6.1.2.1.2.2.1.2.2 = STRING: \"eth0\"
.1.3.6.1.2.1.2.2.1.8.1 = INTEGER: up(1)
.1.3.6.1.2.1.2.2.1.8.2 = INTEGER: down(2)";

    FakeSnmpTools::new()
        .with_walk(".", walk)
        .with_translation(
            ".1.3.6.1.2.1.1.1.0",
            &format!("{}.system.sysDescr.0", MIB2),
            "SNMPv2-MIB::sysDescr.0\nsysDescr OBJECT-TYPE\n  SYNTAX\tDisplayString (SIZE (0..255))\n  DESCRIPTION\t\"A textual description of the entity <hw>.\"",
        )
        .with_translation(
            ".1.3.6.1.2.1.1.5.0",
            &format!("{}.system.sysName.0", MIB2),
            "SNMPv2-MIB::sysName.0\n  DESCRIPTION\t\"An administratively-assigned name.\"",
        )
        .with_translation(
            ".1.3.6.1.2.1.2.2.1.2.1",
            &format!("{}.interfaces.ifTable.ifEntry.ifDescr.1", MIB2),
            "IF-MIB::ifDescr.1\n  DESCRIPTION\t\"Interface description.\"",
        )
        .with_translation(
            ".1.3.6.1.2.1.2.2.1.2.2",
            &format!("{}.interfaces.ifTable.ifEntry.ifDescr.2", MIB2),
            "IF-MIB::ifDescr.2\n  DESCRIPTION\t\"Interface description.\"",
        )
        .with_translation(
            ".1.3.6.1.2.1.2.2.1.8.1",
            &format!("{}.interfaces.ifTable.ifEntry.ifOperStatus.1", MIB2),
            "IF-MIB::ifOperStatus.1\n  SYNTAX\tINTEGER { up(1), down(2), testing(3) }",
        )
        .with_translation(
            ".1.3.6.1.2.1.2.2.1.8.2",
            &format!("{}.interfaces.ifTable.ifEntry.ifOperStatus.2", MIB2),
            "IF-MIB::ifOperStatus.2\n  SYNTAX\tINTEGER { up(1), down(2), testing(3) }",
        )
}

#[tokio::test]
async fn test_scalar_classified_and_grouped() {
    let survey = Survey::new(Arc::new(small_agent()));
    let report = survey.run(&WalkRequest::default(), &roots(&["."])).await;

    let scalars = &report.catalog.scalars;
    assert_eq!(scalars.len(), 2);
    assert_eq!(scalars[0].oid, oid(".1.3.6.1.2.1.1.1.0"));
    assert_eq!(scalars[0].app_name.as_deref(), Some("system"));
    assert_eq!(scalars[0].symbol.as_deref(), Some("sysDescr.0"));
    assert_eq!(scalars[0].module.as_deref(), Some("SNMPv2-MIB"));
    assert_eq!(
        scalars[0].description.as_deref(),
        Some("A textual description of the entity &lt;hw&gt;.")
    );
    assert_eq!(scalars[1].app_name.as_deref(), Some("system"));
}

#[tokio::test]
async fn test_table_columns_collapse_rows() {
    let survey = Survey::new(Arc::new(small_agent()));
    let report = survey.run(&WalkRequest::default(), &roots(&["."])).await;

    assert_eq!(report.catalog.table_count(), 1);
    let columns = report.catalog.columns(&oid(".1.3.6.1.2.1.2.2"));
    assert_eq!(columns.len(), 2);

    assert_eq!(columns[0].column_oid, oid(".1.3.6.1.2.1.2.2.1.2"));
    assert_eq!(columns[0].symbol.as_deref(), Some("ifDescr"));
    assert_eq!(columns[0].app_name.as_deref(), Some("interfaces"));

    let status = &columns[1];
    assert_eq!(status.column_oid, oid(".1.3.6.1.2.1.2.2.1.8"));
    let labels: Vec<(&str, i64)> = status
        .value_map
        .as_ref()
        .unwrap()
        .iter()
        .map(|e| (e.label.as_str(), e.value))
        .collect();
    assert_eq!(labels, vec![("up", 1), ("down", 2), ("testing", 3)]);

    for column in columns {
        assert!(column.table_oid.is_prefix_of(&column.column_oid));
        assert_eq!(column.column_oid.len(), column.table_oid.len() + 2);
    }
    assert!(report.catalog.anomalies.is_empty());
}

#[tokio::test]
async fn test_garbage_lines_and_duplicates_are_counted() {
    let walk = "\
Created directory: /var/lib/snmp/cert_indexes
.1.3.6.1.2.1.1.5.0 = STRING: \"edge-01\"
not an oid at all
.1.3.6.1.2.1.1.5.0 = STRING: \"edge-01\"";
    let tools = FakeSnmpTools::new().with_walk(".", walk).with_translation(
        ".1.3.6.1.2.1.1.5.0",
        &format!("{}.system.sysName.0", MIB2),
        "SNMPv2-MIB::sysName.0",
    );
    let report = Survey::new(Arc::new(tools))
        .run(&WalkRequest::default(), &roots(&["."]))
        .await;

    assert_eq!(report.stats.lines_seen, 4);
    assert_eq!(report.stats.discarded, 2);
    assert_eq!(report.stats.duplicates, 1);
    assert_eq!(report.stats.registered, 1);
    assert_eq!(report.catalog.scalars.len(), 1);
}

#[tokio::test]
async fn test_overlapping_roots_translate_once() {
    let line = ".1.3.6.1.2.1.1.5.0 = STRING: \"edge-01\"";
    let tools = FakeSnmpTools::new()
        .with_walk(".1.3.6.1.2.1", line)
        .with_walk(".1.3.6.1.2.1.1", line)
        .with_translation(
            ".1.3.6.1.2.1.1.5.0",
            &format!("{}.system.sysName.0", MIB2),
            "SNMPv2-MIB::sysName.0",
        );
    let tools = Arc::new(tools);
    let report = Survey::new(tools.clone())
        .run(
            &WalkRequest::default(),
            &roots(&[".1.3.6.1.2.1", ".1.3.6.1.2.1.1"]),
        )
        .await;

    assert_eq!(tools.translate_calls(), 1);
    assert_eq!(report.catalog.scalars.len(), 1);
    assert_eq!(report.stats.duplicates, 1);
}

#[tokio::test]
async fn test_failed_root_does_not_stop_pass() {
    let tools = small_agent().with_walk_failure(
        ".1.3.6.1.4.1",
        ToolError::Timeout {
            program: "snmpwalk".to_string(),
            secs: 60,
        },
    );
    let report = Survey::new(Arc::new(tools))
        .run(&WalkRequest::default(), &roots(&[".1.3.6.1.4.1", "."]))
        .await;

    assert_eq!(report.failed_roots.len(), 1);
    assert_eq!(report.failed_roots[0].root, ".1.3.6.1.4.1");
    assert!(report.failed_roots[0].reason.contains("timed out"));
    assert_eq!(report.catalog.scalars.len(), 2);
    assert!(!report.all_roots_failed(2));
}

#[tokio::test]
async fn test_empty_walk_is_exhausted_subtree() {
    let tools = FakeSnmpTools::new().with_walk(".1.3.6.1.4.1.99999", "");
    let report = Survey::new(Arc::new(tools))
        .run(&WalkRequest::default(), &roots(&[".1.3.6.1.4.1.99999"]))
        .await;

    assert!(report.failed_roots.is_empty());
    assert!(report.catalog.is_empty());
    assert_eq!(report.stats.registered, 0);
}

#[tokio::test]
async fn test_untranslated_oid_is_reported_not_classified() {
    let walk = "\
.1.3.6.1.2.1.1.5.0 = STRING: \"edge-01\"
.1.3.6.1.4.1.99999.1.0 = INTEGER: 7";
    let tools = FakeSnmpTools::new()
        .with_walk(".", walk)
        .with_translation(
            ".1.3.6.1.2.1.1.5.0",
            &format!("{}.system.sysName.0", MIB2),
            "SNMPv2-MIB::sysName.0",
        )
        .with_translation_failure(
            ".1.3.6.1.4.1.99999.1.0",
            ToolError::Timeout {
                program: "snmptranslate".to_string(),
                secs: 10,
            },
        );
    let report = Survey::new(Arc::new(tools))
        .run(&WalkRequest::default(), &roots(&["."]))
        .await;

    assert_eq!(report.catalog.scalars.len(), 1);
    assert_eq!(report.untranslated.len(), 1);
    assert_eq!(report.untranslated[0].oid, oid(".1.3.6.1.4.1.99999.1.0"));
}

#[tokio::test]
async fn test_order_is_stable_under_uneven_latency() {
    let fast = Survey::new(Arc::new(small_agent()))
        .with_concurrency(1)
        .run(&WalkRequest::default(), &roots(&["."]))
        .await;

    let slow_first = small_agent()
        .with_translate_delay(".1.3.6.1.2.1.1.1.0", Duration::from_millis(40))
        .with_translate_delay(".1.3.6.1.2.1.2.2.1.2.1", Duration::from_millis(20));
    let parallel = Survey::new(Arc::new(slow_first))
        .with_concurrency(8)
        .run(&WalkRequest::default(), &roots(&["."]))
        .await;

    assert_eq!(fast.catalog, parallel.catalog);
    assert_eq!(
        serde_json::to_string(&fast.catalog).unwrap(),
        serde_json::to_string(&parallel.catalog).unwrap()
    );
}

#[tokio::test]
async fn test_short_column_oid_flagged() {
    let tools = FakeSnmpTools::new()
        .with_walk(".", ".1.3.6.1.4.1.9.9.1 = INTEGER: 1")
        .with_translation(
            ".1.3.6.1.4.1.9.9.1",
            ".iso.org.dod.internet.private.enterprises.cisco.ciscoMgmt.fooTable",
            "",
        );
    let report = Survey::new(Arc::new(tools))
        .run(&WalkRequest::default(), &roots(&["."]))
        .await;

    assert_eq!(report.catalog.anomalies.len(), 1);
    assert!(matches!(
        report.catalog.anomalies[0],
        Anomaly::ShortColumnOid { .. }
    ));
    assert!(report.catalog.tables.is_empty());
    assert!(report.catalog.scalars.is_empty());
}

#[tokio::test]
async fn test_exception_values_are_skipped() {
    let walk = ".1.3.6.1.2.1.1.1 = No Such Object available on this agent at this OID";
    let tools = Arc::new(FakeSnmpTools::new().with_walk(".1.3.6.1.2.1.1.1", walk));
    let report = Survey::new(tools.clone())
        .run(&WalkRequest::default(), &roots(&[".1.3.6.1.2.1.1.1"]))
        .await;

    assert_eq!(report.stats.exceptions, 1);
    assert_eq!(report.stats.registered, 0);
    assert_eq!(tools.translate_calls(), 0);
}
