//! XML to JSON conversion for NETCONF-style replies.
//!
//! Mapping rules:
//! - the root element becomes a single-key object
//! - attributes become `@name` keys, namespace declarations `@xmlns[:prefix]`
//! - repeated child elements are collected into an array
//! - an element holding only text becomes that string, an empty one `null`
//! - text next to attributes or children is stored under `#text`

use roxmltree::{Document, Node};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use super::output::pretty;

/// NETCONF 1.0 end-of-message marker
const NETCONF_EOM: &str = "]]>]]>";

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("Failed to parse XML: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Qualified name of an element or attribute as written in the document
fn qualified_name(node: Node, local: &str, namespace: Option<&str>) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

/// Namespace declarations introduced on `node` itself
fn declared_namespaces(node: Node) -> Vec<(String, String)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| {
            let key = match ns.name() {
                Some(prefix) => format!("@xmlns:{}", prefix),
                None => "@xmlns".to_string(),
            };
            (key, ns.uri().to_string())
        })
        .collect()
}

/// Insert a child value, turning repeated keys into arrays
fn push_child(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        },
    }
}

fn element_to_value(node: Node) -> Value {
    let mut map = Map::new();

    for (key, uri) in declared_namespaces(node) {
        map.insert(key, Value::String(uri));
    }
    for attr in node.attributes() {
        let name = qualified_name(node, attr.name(), attr.namespace());
        map.insert(format!("@{}", name), Value::String(attr.value().to_string()));
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            let name = qualified_name(child, child.tag_name().name(), child.tag_name().namespace());
            push_child(&mut map, name, element_to_value(child));
        } else if child.is_text() {
            if let Some(t) = child.text() {
                text.push_str(t);
            }
        }
    }

    let text = text.trim();
    if map.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_string())
        };
    }
    if !text.is_empty() {
        map.insert("#text".to_string(), Value::String(text.to_string()));
    }
    Value::Object(map)
}

/// Parse XML into a JSON value tree
pub fn xml_to_value(xml: &str) -> Result<Value, XmlError> {
    let cleaned = xml.replace(NETCONF_EOM, "");
    let doc = Document::parse(&cleaned)?;
    let root = doc.root_element();

    let name = qualified_name(root, root.tag_name().name(), root.tag_name().namespace());
    let mut top = Map::new();
    top.insert(name, element_to_value(root));
    Ok(Value::Object(top))
}

/// Convert XML to JSON text with sorted keys and `indent` spaces per level
///
/// # Examples
/// ```
/// use libbart::utils::xml::xml2json;
///
/// let json = xml2json("<vrf><name>mgmt</name></vrf>]]>]]>", 2)?;
/// assert_eq!(json, "{\n  \"vrf\": {\n    \"name\": \"mgmt\"\n  }\n}");
/// # Ok::<(), libbart::utils::xml::XmlError>(())
/// ```
pub fn xml2json(xml: &str, indent: usize) -> Result<String, XmlError> {
    let value = xml_to_value(xml)?;
    Ok(pretty(&value, indent)?)
}
