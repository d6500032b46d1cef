//! Parse LLM output into shipment details
//!
//! The model is asked for a single JSON object but replies are free text.
//! The object is located by slicing from the first `{` to the last `}`;
//! anything that does not decode degrades to an empty shipment.

use serde_json::{Map, Value};
use shipmail_domain::ExtractedShipment;
use thiserror::Error;
use tracing::debug;

/// Why no JSON object could be taken from a reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// Reply contains no `{`
    #[error("no opening brace in reply")]
    NoOpeningBrace,

    /// Reply contains no `}`
    #[error("no closing brace in reply")]
    NoClosingBrace,

    /// Last `}` comes before the first `{`
    #[error("closing brace at byte {close} precedes opening brace at byte {open}")]
    ReversedBraces {
        /// Byte offset of the first `{`
        open: usize,
        /// Byte offset of the last `}`
        close: usize,
    },

    /// The brace-delimited span is not a valid JSON object
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

/// Outcome of parsing one model reply
#[derive(Debug, Clone)]
pub struct ParsedReply {
    /// Decoded JSON object, or an empty object when extraction failed
    pub entities: Value,

    /// Shipment fields read from `entities` with defaults for missing keys
    pub shipment: ExtractedShipment,

    /// Set when the reply could not be decoded
    pub failure: Option<ExtractionFailure>,
}

/// Locate and decode the JSON object in a model reply.
///
/// Takes the span from the first `{` to the last `}` inclusive. Field types
/// are not validated here.
pub fn extract_json_object(reply: &str) -> Result<Map<String, Value>, ExtractionFailure> {
    let open = reply.find('{').ok_or(ExtractionFailure::NoOpeningBrace)?;
    let close = reply.rfind('}').ok_or(ExtractionFailure::NoClosingBrace)?;

    if close < open {
        return Err(ExtractionFailure::ReversedBraces { open, close });
    }

    serde_json::from_str(&reply[open..=close])
        .map_err(|e| ExtractionFailure::InvalidJson(e.to_string()))
}

/// Parse a model reply, substituting an empty shipment on failure
pub fn parse_reply(reply: &str) -> ParsedReply {
    match extract_json_object(reply) {
        Ok(object) => ParsedReply {
            shipment: shipment_from_object(&object),
            entities: Value::Object(object),
            failure: None,
        },
        Err(failure) => {
            debug!("Failed to parse JSON response from model: {}", failure);
            ParsedReply {
                entities: Value::Object(Map::new()),
                shipment: ExtractedShipment::default(),
                failure: Some(failure),
            }
        }
    }
}

/// Read the six shipment fields out of a decoded object
pub fn shipment_from_object(object: &Map<String, Value>) -> ExtractedShipment {
    ExtractedShipment {
        po_numbers: list_field(object, "po_numbers"),
        part_numbers: list_field(object, "part_numbers"),
        quantities: list_field(object, "quantities"),
        tracking_number: scalar_field(object, "tracking_number"),
        source: scalar_field(object, "source"),
        type_of_email: scalar_field(object, "type_of_email"),
    }
}

/// Display text for a JSON value placed in a report cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn list_field(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(cell_text).collect(),
        // A lone scalar is read as a one-element list
        Some(other) => vec![cell_text(other)],
    }
}

fn scalar_field(object: &Map<String, Value>, key: &str) -> String {
    object.get(key).map(cell_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_plain_object() {
        let object = extract_json_object(r#"{"source": "Vendor"}"#).unwrap();
        assert_eq!(object["source"], json!("Vendor"));
    }

    #[test]
    fn test_extract_object_surrounded_by_prose() {
        let reply = "Here is the data:\n```json\n{\"po_numbers\": [\"PO1\"]}\n```\nHope this helps.";
        let object = extract_json_object(reply).unwrap();
        assert_eq!(object["po_numbers"], json!(["PO1"]));
    }

    #[test]
    fn test_nested_objects_are_kept_whole() {
        let reply = r#"{"source": "Vendor", "meta": {"carrier": "UPS"}}"#;
        let object = extract_json_object(reply).unwrap();
        assert_eq!(object["meta"]["carrier"], json!("UPS"));
    }

    #[test]
    fn test_no_braces() {
        assert_eq!(
            extract_json_object("I could not find any shipment data."),
            Err(ExtractionFailure::NoOpeningBrace)
        );
    }

    #[test]
    fn test_no_closing_brace() {
        assert_eq!(
            extract_json_object("{\"source\": \"Vendor\""),
            Err(ExtractionFailure::NoClosingBrace)
        );
    }

    #[test]
    fn test_reversed_braces() {
        assert_eq!(
            extract_json_object("} nothing here {"),
            Err(ExtractionFailure::ReversedBraces { open: 15, close: 0 })
        );
    }

    #[test]
    fn test_two_objects_select_invalid_span() {
        let reply = r#"{"a": 1} and also {"b": 2}"#;
        assert!(matches!(
            extract_json_object(reply),
            Err(ExtractionFailure::InvalidJson(_))
        ));
    }

    #[test]
    fn test_trailing_prose_with_braces_breaks_span() {
        let reply = r#"{"source": "Vendor"} I used {regex} matching."#;
        assert!(matches!(
            extract_json_object(reply),
            Err(ExtractionFailure::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_reply_full_object() {
        let reply = r#"{"po_numbers":["PO1"],"part_numbers":["P1"],"quantities":[5],"tracking_number":"T1","source":"Vendor","type_of_email":"Shipped"}"#;
        let parsed = parse_reply(reply);

        assert!(parsed.failure.is_none());
        assert_eq!(parsed.shipment.po_numbers, vec!["PO1"]);
        assert_eq!(parsed.shipment.part_numbers, vec!["P1"]);
        assert_eq!(parsed.shipment.quantities, vec!["5"]);
        assert_eq!(parsed.shipment.tracking_number, "T1");
        assert_eq!(parsed.shipment.source, "Vendor");
        assert_eq!(parsed.shipment.type_of_email, "Shipped");
        assert_eq!(parsed.entities["quantities"], json!([5]));
    }

    #[test]
    fn test_parse_reply_failure_degrades_to_empty() {
        let parsed = parse_reply("Sorry, I can't help with that.");

        assert_eq!(parsed.failure, Some(ExtractionFailure::NoOpeningBrace));
        assert!(parsed.shipment.is_empty());
        assert_eq!(parsed.entities, json!({}));
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let parsed = parse_reply(r#"{"tracking_number": "1Z999"}"#);

        assert!(parsed.failure.is_none());
        assert!(parsed.shipment.po_numbers.is_empty());
        assert_eq!(parsed.shipment.tracking_number, "1Z999");
        assert_eq!(parsed.shipment.source, "");
    }

    #[test]
    fn test_loose_field_types() {
        let object = extract_json_object(
            r#"{"po_numbers": "PO7", "part_numbers": null, "quantities": [2, "3", 1.5, null], "tracking_number": 12345}"#,
        )
        .unwrap();
        let shipment = shipment_from_object(&object);

        assert_eq!(shipment.po_numbers, vec!["PO7"]);
        assert!(shipment.part_numbers.is_empty());
        assert_eq!(shipment.quantities, vec!["2", "3", "1.5", ""]);
        assert_eq!(shipment.tracking_number, "12345");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("abc")), "abc");
        assert_eq!(cell_text(&json!(7)), "7");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!(["a"])), r#"["a"]"#);
    }
}
