//! Field extraction from `snmptranslate -Td -OS` definition blocks.
//!
//! The translator prints loosely structured text:
//!
//! ```text
//! IF-MIB::ifAdminStatus
//! ifAdminStatus OBJECT-TYPE
//!   -- FROM       IF-MIB
//!   SYNTAX        INTEGER {up(1), down(2), testing(3)}
//!   MAX-ACCESS    read-write
//!   STATUS        current
//!   DESCRIPTION   "The desired state of the interface."
//! ::= { iso(1) org(3) dod(6) internet(1) mgmt(2) mib-2(1) interfaces(2) ifTable(2) ifEntry(1) 7 }
//! ```
//!
//! Every field is optional and independent of the others. The grammar lives
//! only in this module so it can be swapped without touching classification.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static MODULE_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^\s:]+)::(\S+)").unwrap());

static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"DESCRIPTION\s+"([^"]*)""#).unwrap());

static INTEGER_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SYNTAX\s+INTEGER\s*\{([^}]*)\}").unwrap());

static ENUM_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{}()\s,]+)\s*\(\s*(-?[0-9]+)\s*\)").unwrap());

static TEXTUAL_CONVENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)TEXTUAL CONVENTION[ \t]+(\S[^\r\n]*)").unwrap());

/// `MODULE::symbol` header of a definition block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSymbol {
    pub module: String,
    pub symbol: String,
}

impl fmt::Display for ModuleSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.symbol)
    }
}

/// One `label(value)` pair of an enumerated INTEGER syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueMapEntry {
    pub label: String,
    pub value: i64,
}

impl ValueMapEntry {
    pub fn new(label: &str, value: i64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Structured fields found in one definition block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_symbol: Option<ModuleSymbol>,
    /// Markup-escaped description text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_map: Option<Vec<ValueMapEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textual_convention: Option<String>,
}

impl Definition {
    pub fn module(&self) -> Option<&str> {
        self.module_symbol.as_ref().map(|m| m.module.as_str())
    }

    pub fn symbol(&self) -> Option<&str> {
        self.module_symbol.as_ref().map(|m| m.symbol.as_str())
    }
}

/// Parse a translator definition block. Never fails; missing fields are `None`.
pub fn parse(block: &str) -> Definition {
    Definition {
        module_symbol: parse_module_symbol(block),
        description: parse_description(block),
        value_map: parse_value_map(block),
        textual_convention: parse_textual_convention(block),
    }
}

pub fn parse_module_symbol(block: &str) -> Option<ModuleSymbol> {
    let caps = MODULE_SYMBOL.captures(block)?;
    Some(ModuleSymbol {
        module: caps.get(1)?.as_str().to_string(),
        symbol: caps.get(2)?.as_str().to_string(),
    })
}

/// Quoted DESCRIPTION text, escaped for embedding in markup.
pub fn parse_description(block: &str) -> Option<String> {
    let caps = DESCRIPTION.captures(block)?;
    Some(escape_markup(caps.get(1)?.as_str()))
}

/// Ordered `label(value)` pairs of a `SYNTAX INTEGER { ... }` clause.
pub fn parse_value_map(block: &str) -> Option<Vec<ValueMapEntry>> {
    let caps = INTEGER_SYNTAX.captures(block)?;
    let body = caps.get(1)?.as_str();

    let entries: Vec<ValueMapEntry> = ENUM_PAIR
        .captures_iter(body)
        .filter_map(|pair| {
            let label = pair.get(1)?.as_str();
            let value = pair.get(2)?.as_str().parse::<i64>().ok()?;
            Some(ValueMapEntry::new(label, value))
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

pub fn parse_textual_convention(block: &str) -> Option<String> {
    let caps = TEXTUAL_CONVENTION.captures(block)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Entities produced by [`escape_markup`]; an `&` already starting one of
/// them is kept as is, which makes escaping idempotent.
const KNOWN_ENTITIES: &[&str] = &["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;", "&#39;"];

/// HTML-style escaping of `&`, `<`, `>`, `"` and `'`.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' => {
                let rest = &text[idx..];
                if KNOWN_ENTITIES.iter().any(|e| rest.starts_with(e)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const IF_ADMIN_STATUS: &str = r#"IF-MIB::ifAdminStatus
ifAdminStatus OBJECT-TYPE
  -- FROM	IF-MIB
  SYNTAX	INTEGER {up(1), down(2), testing(3)}
  MAX-ACCESS	read-write
  STATUS	current
  DESCRIPTION	"The desired state of the interface.  The testing(3) state
            indicates that no operational packets can be passed."
::= { iso(1) org(3) dod(6) internet(1) mgmt(2) mib-2(1) interfaces(2) ifTable(2) ifEntry(1) 7 }"#;

    const SYS_DESCR: &str = r#"SNMPv2-MIB::sysDescr.0
sysDescr OBJECT-TYPE
  -- FROM	SNMPv2-MIB
  -- TEXTUAL CONVENTION DisplayString
  SYNTAX	OCTET STRING (0..255)
  DISPLAY-HINT	"255a"
  MAX-ACCESS	read-only
  STATUS	current
  DESCRIPTION	"A textual description of the entity <incl. OS & version>."
::= { iso(1) org(3) dod(6) internet(1) mgmt(2) mib-2(1) system(1) 1 }"#;

    #[test]
    fn test_parse_full_block() {
        let def = parse(IF_ADMIN_STATUS);
        assert_eq!(def.module(), Some("IF-MIB"));
        assert_eq!(def.symbol(), Some("ifAdminStatus"));
        assert!(def
            .description
            .as_deref()
            .unwrap()
            .starts_with("The desired state of the interface."));
        assert_eq!(def.value_map.as_ref().unwrap().len(), 3);
        assert!(def.textual_convention.is_none());
    }

    #[test]
    fn test_value_map_order_and_values() {
        let block = "SYNTAX INTEGER { up(1), down(2), testing(3) }";
        assert_eq!(
            parse_value_map(block).unwrap(),
            vec![
                ValueMapEntry::new("up", 1),
                ValueMapEntry::new("down", 2),
                ValueMapEntry::new("testing", 3),
            ]
        );
    }

    #[test]
    fn test_value_map_without_spaces_or_with_negatives() {
        let block = "SYNTAX\tINTEGER {other(-1),ok(0),failed(7)}";
        let map = parse_value_map(block).unwrap();
        assert_eq!(map[0], ValueMapEntry::new("other", -1));
        assert_eq!(map[1], ValueMapEntry::new("ok", 0));
        assert_eq!(map[2], ValueMapEntry::new("failed", 7));
    }

    #[test]
    fn test_value_map_absent_for_plain_integer() {
        assert!(parse_value_map("SYNTAX\tINTEGER (0..2147483647)").is_none());
        assert!(parse_value_map("SYNTAX\tOCTET STRING (0..255)").is_none());
        assert!(parse_value_map("SYNTAX INTEGER { }").is_none());
    }

    #[test]
    fn test_textual_convention() {
        let def = parse(SYS_DESCR);
        assert_eq!(def.textual_convention.as_deref(), Some("DisplayString"));
        assert_eq!(def.symbol(), Some("sysDescr.0"));
    }

    #[test]
    fn test_description_is_escaped() {
        let def = parse(SYS_DESCR);
        assert_eq!(
            def.description.as_deref(),
            Some("A textual description of the entity &lt;incl. OS &amp; version&gt;.")
        );
    }

    #[test]
    fn test_escaping_is_idempotent() {
        let raw = r#"a < b & c > "d" 'e'"#;
        let once = escape_markup(raw);
        assert_eq!(once, "a &lt; b &amp; c &gt; &quot;d&quot; &#x27;e&#x27;");
        assert_eq!(escape_markup(&once), once);
    }

    #[test]
    fn test_module_symbol_only_at_block_start() {
        let block = "sysDescr OBJECT-TYPE\n  -- FROM SNMPv2-MIB::sysDescr";
        assert!(parse_module_symbol(block).is_none());

        let block = "\n  SNMPv2-MIB::sysUpTime.0\nsysUpTime OBJECT-TYPE";
        let ms = parse_module_symbol(block).unwrap();
        assert_eq!(ms.to_string(), "SNMPv2-MIB::sysUpTime.0");
    }

    #[test]
    fn test_unresolved_block_still_yields_metadata() {
        let block = "No log handling enabled - using stderr logging\n\
                     DESCRIPTION \"vendor counter\"\nSYNTAX INTEGER {on(1), off(2)}";
        let def = parse(block);
        assert!(def.module_symbol.is_none());
        assert_eq!(def.description.as_deref(), Some("vendor counter"));
        assert_eq!(def.value_map.unwrap().len(), 2);
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(parse(""), Definition::default());
    }
}
