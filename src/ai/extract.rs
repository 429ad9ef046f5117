use json::Value;

/// Best-effort parse of the JSON object embedded in a model reply.
///
/// Takes the span from the first `{` to the last `}`; if that is missing or
/// does not parse, the whole reply is returned as `{"raw": text}`.
pub fn json_block(text: &str) -> Value {
  let parsed = match (text.find('{'), text.rfind('}')) {
    (Some(start), Some(end)) if start < end => {
      json::from_str::<Value>(&text[start..=end]).ok()
    }
    _ => None,
  };

  match parsed {
    Some(value @ Value::Object(_)) => value,
    _ => json::json!({ "raw": text }),
  }
}
