use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

const FENCE: &str = "```";
const LANGUAGE_TAGS: &[&str] = &["json", "python", "yaml"];

/// Return the fenced block at `index`, counting back from the last one.
///
/// Index 0 is the last complete block in `text`. A leading language tag line
/// (`json`, `python`, `yaml`) is dropped and the result trimmed. Returns
/// `None` when there are not enough complete blocks.
pub fn extract_block(text: &str, index: usize) -> Option<String> {
    let segments: Vec<&str> = text.split(FENCE).collect();
    // Odd segments sit between two fences; the final segment is never closed.
    let closed = segments.len().saturating_sub(1);

    let block = (1..closed).step_by(2).rev().nth(index)?;
    Some(strip_language_tag(segments[block]))
}

fn strip_language_tag(block: &str) -> String {
    let block = block.strip_prefix('\n').unwrap_or(block);
    let (first, rest) = block.split_once('\n').unwrap_or((block, ""));

    if LANGUAGE_TAGS.contains(&first.trim()) {
        rest.trim().to_string()
    } else {
        block.trim().to_string()
    }
}

/// Parse `text` as a JSON object, falling back to its last fenced block.
pub fn parse_structured(text: &str) -> EngineResult<Map<String, Value>> {
    let direct = serde_json::from_str::<Value>(text.trim());
    let value = match direct {
        Ok(value) => value,
        Err(direct_err) => {
            let block = extract_block(text, 0)
                .ok_or_else(|| EngineError::StructuralParse(direct_err.to_string()))?;
            serde_json::from_str(&block)
                .map_err(|e| EngineError::StructuralParse(format!("fenced block: {e}")))?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(EngineError::StructuralParse(format!(
            "expected an object, found {}",
            kind_of(&other)
        ))),
    }
}

/// Best-effort object extraction. An empty map means nothing was recoverable.
pub fn extract_structured_object(text: &str) -> Map<String, Value> {
    parse_structured(text).unwrap_or_default()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
