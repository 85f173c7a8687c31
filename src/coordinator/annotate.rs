//! Hit annotation for JSON payloads.

use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

/// Adds provenance fields to a cached JSON object.
///
/// Returns `None` when the content type is not JSON or the payload is not a
/// JSON object; the caller then serves the payload as stored.
pub fn annotate_hit(payload: &[u8], content_type: &str, node_id: &str) -> Option<Bytes> {
    if !is_json(content_type) {
        return None;
    }

    let mut value: Value = match serde_json::from_slice(payload) {
        Ok(value) => value,
        Err(e) => {
            debug!("Annotation skipped, payload is not valid JSON: {}", e);
            return None;
        }
    };

    let object = value.as_object_mut()?;
    object.insert("cached".to_string(), Value::Bool(true));
    object.insert("cache_server".to_string(), Value::String(node_id.to_string()));

    serde_json::to_vec(&value).ok().map(Bytes::from)
}

/// `application/json` or any `+json` structured suffix, parameters ignored.
fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || essence.ends_with("+json")
}
