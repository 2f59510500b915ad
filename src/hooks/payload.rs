use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

/// Payload for prompt-time hooks. A document without a `prompt` field fails
/// the parse and reads as "no qualifying input".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptPayload {
    pub prompt: String,
}

/// Payload for tool-completion hooks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ToolPayload {
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: Value,
    #[serde(default)]
    pub tool_response: Value,
}

impl ToolPayload {
    /// The invoked skill identifier, when present. Hosts differ on the field
    /// name, so `skill` is preferred with `command` as the fallback.
    pub fn skill_identifier(&self) -> Option<&str> {
        self.tool_input
            .get("skill")
            .and_then(Value::as_str)
            .or_else(|| self.tool_input.get("command").and_then(Value::as_str))
    }
}

fn read_raw(reader: &mut impl Read) -> Option<String> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(raw)
}

/// Malformed or empty stdin is never an error, only an absent payload.
pub fn read_prompt_payload(reader: &mut impl Read) -> Option<PromptPayload> {
    serde_json::from_str(&read_raw(reader)?).ok()
}

pub fn read_tool_payload(reader: &mut impl Read) -> Option<ToolPayload> {
    serde_json::from_str(&read_raw(reader)?).ok()
}
