//! Transaction reference extraction from relay responses

use serde_json::Value;

/// Key names the relay has been seen to use for the signature
const SIGNATURE_KEYS: [&str; 3] = ["signature", "txSignature", "tx_signature"];

/// Where to look, in priority order: `None` is the top level, `Some(key)`
/// is one level down under that key
const SCOPES: [Option<&str>; 2] = [None, Some("data")];

/// Returns the first string-valued signature field, checking every key at
/// the top level before descending into `data`
pub fn extract_reference(response: &Value) -> Option<String> {
    SCOPES
        .iter()
        .filter_map(|scope| match scope {
            None => Some(response),
            Some(key) => response.get(key).filter(|v| v.is_object()),
        })
        .flat_map(|obj| SIGNATURE_KEYS.iter().map(move |key| obj.get(key)))
        .find_map(|value| value.and_then(Value::as_str).map(str::to_string))
}
