//! Canonical hashing and seed derivation.
//!
//! Generation requests are hashed over their canonical JSON form so that two
//! requests with the same content map to the same seed regardless of key
//! order or whitespace:
//!
//! ```text
//! request_seed = truncate_u32(BLAKE3(canonical_json(request)))
//! ```

use crate::error::SpecError;
use crate::track::GenerationRequest;

/// Computes the canonical BLAKE3 hash of a JSON value.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Derives the generation seed for a request.
///
/// # Example
/// ```
/// use tunecraft_spec::GenerationRequest;
/// use tunecraft_spec::hash::request_seed;
///
/// let a = GenerationRequest::new("rainy night piano").with_genre("lofi");
/// let b = GenerationRequest::new("rainy night piano").with_genre("lofi");
/// assert_eq!(request_seed(&a).unwrap(), request_seed(&b).unwrap());
/// ```
pub fn request_seed(request: &GenerationRequest) -> Result<u32, SpecError> {
    let value = serde_json::to_value(request)?;
    let canonical = canonicalize_json(&value);
    Ok(truncate_u32(blake3::hash(canonical.as_bytes())))
}

/// Derives an independent seed from a base seed and a string key.
///
/// ```text
/// derived = truncate_u32(BLAKE3(base_seed_le || key))
/// ```
pub fn derive_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());
    truncate_u32(blake3::hash(&input))
}

/// Strong entity tag for a PCM payload, quoted as HTTP expects.
pub fn pcm_etag(pcm: &[u8]) -> String {
    let hex = blake3::hash(pcm).to_hex();
    format!("\"{}\"", &hex[..32])
}

/// Short hexadecimal identifier derived from arbitrary bytes.
pub fn short_id(data: &[u8]) -> String {
    blake3::hash(data).to_hex()[..12].to_string()
}

fn truncate_u32(hash: blake3::Hash) -> u32 {
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Canonicalizes a JSON value (RFC 8785 style).
///
/// - Object keys are sorted lexicographically
/// - No whitespace between tokens
/// - Integral floats are written without a fractional part
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_number(n),
        serde_json::Value::String(s) => format_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => "null".to_string(),
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{}", f),
        None => "null".to_string(),
    }
}

fn format_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
