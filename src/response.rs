//! Response normalization.
//!
//! The analysis service answers with JSON of no fixed shape: sometimes a bare string, sometimes
//! an object carrying the answer in `output` or `message`, sometimes something else entirely.
//! [`normalize`] collapses any of these into the one string the renderers display, so nothing
//! downstream has to branch on payload shape.

use serde_json::Value;

/// Raw value returned by the service for one query.
pub type ServerPayload = Value;

/// Text shown when the payload carries nothing recognizable.
pub const FALLBACK_DISPLAY: &str = "Response received successfully";

type Extractor = fn(&Value) -> Option<String>;

/// Tried in order; the first hit wins.
const EXTRACTORS: &[Extractor] = &[bare_string, output_field, message_field];

/// Reduce an arbitrary payload to a display string.
///
/// Never fails: anything the extractors do not recognize yields [`FALLBACK_DISPLAY`].
pub fn normalize(payload: &ServerPayload) -> String {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(payload))
        .unwrap_or_else(|| FALLBACK_DISPLAY.to_string())
}

fn bare_string(payload: &Value) -> Option<String> {
    payload.as_str().map(str::to_owned)
}

fn output_field(payload: &Value) -> Option<String> {
    truthy_field(payload, "output")
}

fn message_field(payload: &Value) -> Option<String> {
    truthy_field(payload, "message")
}

fn truthy_field(payload: &Value, name: &str) -> Option<String> {
    payload
        .as_object()?
        .get(name)
        .filter(|value| is_truthy(value))
        .map(display_text)
}

/// JSON truthiness: `null`, `false`, zero and `""` are falsy, every other value (including
/// empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Strings pass through verbatim; anything else is shown in its compact JSON form.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn string_payload_is_returned_unchanged() {
        assert_eq!(normalize(&json!("Plain text answer")), "Plain text answer");
        assert_eq!(normalize(&json!("a\nb\n")), "a\nb\n");
        assert_eq!(normalize(&json!("")), "");
    }

    #[test]
    fn output_takes_precedence_over_message() {
        let payload = json!({"output": "from output", "message": "from message"});
        assert_eq!(normalize(&payload), "from output");
    }

    #[test]
    fn falsy_output_falls_through_to_message() {
        for output in [json!(""), json!(0), json!(false), json!(null)] {
            let payload = json!({"output": output, "message": "fallback message"});
            assert_eq!(normalize(&payload), "fallback message");
        }
    }

    #[test]
    fn unrecognized_shapes_use_fallback() {
        for payload in [
            json!(null),
            json!(42),
            json!(true),
            json!(false),
            json!({}),
            json!([]),
            json!(["output"]),
            json!({"output": "", "message": ""}),
            json!({"error": "Query is required"}),
        ] {
            assert_eq!(normalize(&payload), FALLBACK_DISPLAY, "payload: {payload}");
        }
    }

    #[test]
    fn truthy_non_string_fields_are_stringified() {
        assert_eq!(normalize(&json!({"output": 7})), "7");
        assert_eq!(normalize(&json!({"message": true})), "true");
        assert_eq!(normalize(&json!({"output": {"a": 1}})), r#"{"a":1}"#);
        assert_eq!(normalize(&json!({"output": []})), "[]");
    }

    #[test]
    fn truthiness_rules() {
        assert!(!is_truthy(&json!(0.0)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(" ")));
    }

    proptest! {
        #[test]
        fn any_string_normalizes_to_itself(s in ".*") {
            prop_assert_eq!(normalize(&Value::String(s.clone())), s);
        }

        #[test]
        fn truthy_output_wins_regardless_of_message(
            output in ".+",
            message in proptest::option::of(".*"),
        ) {
            let mut payload = json!({"output": output.clone()});
            if let Some(message) = message {
                payload["message"] = Value::String(message);
            }
            prop_assert_eq!(normalize(&payload), output);
        }

        #[test]
        fn message_used_when_output_absent(message in ".+", extra in "[a-z]{1,8}") {
            prop_assume!(extra != "output" && extra != "message");
            let mut payload = json!({"message": message.clone()});
            payload[extra.as_str()] = json!("ignored");
            prop_assert_eq!(normalize(&payload), message);
        }

        #[test]
        fn numbers_and_booleans_fall_back(n in any::<i64>(), b in any::<bool>()) {
            prop_assert_eq!(normalize(&json!(n)), FALLBACK_DISPLAY);
            prop_assert_eq!(normalize(&json!(b)), FALLBACK_DISPLAY);
        }
    }
}
