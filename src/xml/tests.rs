//! Tests for response tree module

use super::reader::decode_entities;
use super::*;
use serde_json::json;

// ============================================================================
// Reader Tests
// ============================================================================

#[test]
fn test_parse_basic_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<RETS ReplyCode="0" ReplyText="Operation Successful">
  <COUNT Records="3" />
</RETS>"#;

    let root = Element::parse(xml).unwrap();
    assert_eq!(root.name(), "RETS");
    assert_eq!(root.attribute("ReplyCode"), Some("0"));
    assert_eq!(root.attribute("ReplyText"), Some("Operation Successful"));
    assert!(root.has_child("COUNT"));
    assert_eq!(root.child_attribute("COUNT", "Records"), Some("3"));
    assert!(!root.has_child("DATA"));
}

#[test]
fn test_parse_preserves_tabs_in_text() {
    let xml = "<RETS><COLUMNS>\tA\tB\t</COLUMNS><DATA>\t1\t2\t</DATA></RETS>";

    let root = Element::parse(xml).unwrap();
    assert_eq!(root.child_text("COLUMNS"), Some("\tA\tB\t"));
    assert_eq!(root.child_text("DATA"), Some("\t1\t2\t"));
}

#[test]
fn test_parse_repeated_children_in_order() {
    let xml = "<RETS><DATA>a</DATA><DATA>b</DATA><DATA>c</DATA></RETS>";

    let root = Element::parse(xml).unwrap();
    let lines: Vec<&str> = root.children("DATA").iter().map(|d| d.text()).collect();
    assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn test_parse_single_quoted_attributes_and_entities() {
    let xml = r#"<RETS ReplyText='Tom &amp; Jerry &#38; &#x41;'><X>&lt;b&gt; &quot;q&quot; &apos;</X></RETS>"#;

    let root = Element::parse(xml).unwrap();
    assert_eq!(root.attribute("ReplyText"), Some("Tom & Jerry & A"));
    assert_eq!(root.child_text("X"), Some("<b> \"q\" '"));
}

#[test]
fn test_parse_cdata_and_comments() {
    let xml = "<RETS><!-- note --><Remarks><![CDATA[a < b & c]]></Remarks></RETS>";

    let root = Element::parse(xml).unwrap();
    assert_eq!(root.child_text("Remarks"), Some("a < b & c"));
}

#[test]
fn test_parse_drops_namespace_declarations() {
    let xml = r#"<RETS-RESPONSE xmlns="urn:rets:syndication" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" Version="1.0"><Listing/></RETS-RESPONSE>"#;
    let root = Element::parse(xml).unwrap();

    assert_eq!(root.attribute("xmlns"), None);
    assert_eq!(root.attribute("xmlns:xsi"), None);
    assert_eq!(root.attribute("Version"), Some("1.0"));
    assert_eq!(root.attributes().len(), 1);
}

#[test]
fn test_parse_doctype_skipped() {
    let xml = r#"<!DOCTYPE RETS [ <!ENTITY x "y"> ]><RETS><A>1</A></RETS>"#;

    let root = Element::parse(xml).unwrap();
    assert_eq!(root.child_text("A"), Some("1"));
}

#[test]
fn test_parse_mismatched_tag() {
    let result = Element::parse("<RETS><A>1</B></RETS>");
    assert!(matches!(result, Err(crate::Error::XmlParse { .. })));
}

#[test]
fn test_parse_missing_close_tag() {
    let result = Element::parse("<RETS><A>1</A>");
    assert!(result.is_err());
}

#[test]
fn test_parse_not_xml() {
    let result = Element::parse("not xml");
    assert!(result.is_err());
}

#[test]
fn test_parse_trailing_garbage() {
    let result = Element::parse("<RETS/><OTHER/>");
    assert!(result.is_err());
}

#[test]
fn test_decode_entities_keeps_stray_ampersand() {
    assert_eq!(decode_entities("Smith & Sons").unwrap(), "Smith & Sons");
    assert_eq!(decode_entities("&unknown;").unwrap(), "&unknown;");
    assert!(decode_entities("&#xZZ;").is_err());
}

// ============================================================================
// Tree Conversion Tests
// ============================================================================

#[test]
fn test_to_tree_leaf_is_string() {
    let el = Element::new("ListPrice").with_text("250000");
    assert_eq!(el.to_tree(), json!("250000"));

    let empty = Element::new("Remarks");
    assert_eq!(empty.to_tree(), json!(""));
}

#[test]
fn test_to_tree_attributes_wrapper() {
    let el = Element::parse(r#"<Photo LastUpdated="2020-01-01"><Url>x</Url></Photo>"#).unwrap();
    assert_eq!(
        el.to_tree(),
        json!({"@attributes": {"LastUpdated": "2020-01-01"}, "Url": "x"})
    );
}

#[test]
fn test_to_tree_singleton_vs_repeated() {
    let one = Element::parse("<R><Listing><Id>1</Id></Listing></R>").unwrap();
    assert_eq!(one.to_tree(), json!({"Listing": {"Id": "1"}}));

    let two = Element::parse("<R><Listing><Id>1</Id></Listing><Listing><Id>2</Id></Listing></R>")
        .unwrap();
    assert_eq!(
        two.to_tree(),
        json!({"Listing": [{"Id": "1"}, {"Id": "2"}]})
    );
}

#[test]
fn test_to_tree_key_order_follows_document() {
    let el = Element::parse("<R><Zeta>1</Zeta><Alpha>2</Alpha></R>").unwrap();
    let tree = el.to_tree();
    let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["Zeta", "Alpha"]);
}

#[test]
fn test_to_tree_text_with_attributes() {
    let el = Element::parse(r#"<Price currency="USD">100</Price>"#).unwrap();
    assert_eq!(
        el.to_tree(),
        json!({"@attributes": {"currency": "USD"}, "#text": "100"})
    );
}
