// Log summaries of relayed payloads
//
// Upstream bodies are opaque: these helpers only read a few well-known
// fields and never fail when they are absent.

use serde_json::{json, Map, Value};

use super::utils::{base64_decoded_len, truncate_chars};
use crate::proxy::upstream::client::VeoEndpoint;

const PROMPT_PREVIEW_CHARS: usize = 100;
const MAX_LOGGED_STRING_CHARS: usize = 256;

const SENSITIVE_KEYS: &[&str] = &[
    "authorization",
    "token",
    "accesstoken",
    "access_token",
    "refreshtoken",
    "refresh_token",
    "apikey",
    "api_key",
    "idtoken",
    "id_token",
];

fn count(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}

fn first_request(body: &Value) -> Option<&Value> {
    body.get("requests").and_then(|r| r.get(0))
}

/// What gets logged when a request is forwarded
pub fn summarize_request(endpoint: VeoEndpoint, body: &Value) -> Value {
    match endpoint {
        VeoEndpoint::GenerateText | VeoEndpoint::GenerateImage => {
            let first = first_request(body);
            let prompt = first
                .and_then(|r| r.pointer("/textInput/prompt"))
                .and_then(Value::as_str)
                .map(|p| truncate_chars(p, PROMPT_PREVIEW_CHARS));
            let mut summary = json!({
                "requests": count(body.get("requests")),
                "prompt": prompt,
                "aspectRatio": first.and_then(|r| r.get("aspectRatio")),
            });
            if endpoint == VeoEndpoint::GenerateImage {
                summary["mediaId"] = first
                    .and_then(|r| r.pointer("/startImage/mediaId"))
                    .cloned()
                    .unwrap_or(Value::Null);
            }
            summary
        }
        VeoEndpoint::CheckStatus => json!({
            "operations": count(body.get("operations")),
        }),
        VeoEndpoint::UploadImage => {
            let image = body.get("imageInput");
            let raw = image
                .and_then(|i| i.get("rawImageBytes"))
                .and_then(Value::as_str)
                .unwrap_or("");
            json!({
                "imageChars": raw.len(),
                "imageBytes": base64_decoded_len(raw),
                "mimeType": image.and_then(|i| i.get("mimeType")),
                "aspectRatio": image.and_then(|i| i.get("aspectRatio")),
            })
        }
    }
}

/// What gets logged when the upstream answers with success
pub fn summarize_response(endpoint: VeoEndpoint, body: &Value) -> Value {
    match endpoint {
        VeoEndpoint::GenerateText | VeoEndpoint::GenerateImage => json!({
            "operations": count(body.get("operations")),
        }),
        VeoEndpoint::CheckStatus => {
            let first = body.get("operations").and_then(|ops| ops.get(0));
            json!({
                "operations": count(body.get("operations")),
                "status": first.and_then(|op| op.get("status")),
                "done": first.and_then(|op| op.get("done")),
            })
        }
        VeoEndpoint::UploadImage => json!({
            "mediaId": upload_media_id(body),
        }),
    }
}

/// Media id issued by the upload endpoint, in either of its two shapes
pub fn upload_media_id(body: &Value) -> Option<&str> {
    body.pointer("/mediaGenerationId/mediaGenerationId")
        .and_then(Value::as_str)
        .or_else(|| body.get("mediaId").and_then(Value::as_str))
}

/// Copy of `value` safe for debug logs: long strings (inline image data) are
/// replaced by their length, credential-like fields are blanked.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::String(s) if s.chars().count() > MAX_LOGGED_STRING_CHARS => {
            Value::String(format!("<{} chars redacted>", s.chars().count()))
        }
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        Value::Object(map) => {
            let redacted: Map<String, Value> = map
                .iter()
                .map(|(key, v)| {
                    if is_sensitive_key(key) {
                        (key.clone(), Value::String("<redacted>".to_string()))
                    } else {
                        (key.clone(), redact(v))
                    }
                })
                .collect();
            Value::Object(redacted)
        }
        other => other.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SENSITIVE_KEYS.contains(&lower.as_str())
}
