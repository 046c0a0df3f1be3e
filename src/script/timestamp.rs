/// Parse a `M_S` / `M:S` timestamp into seconds.
///
/// Never fails: a missing or non-numeric component counts as zero, and anything after the second
/// component is ignored. A bare number has no separator, so it is read as minutes (`"90"` is
/// 5400 seconds).
pub fn parse_timestamp(ts: &str) -> f64 {
    let normalized = ts.replace(':', "_");
    let mut parts = normalized.split('_');
    let minutes = parts.next().map(parse_component).unwrap_or(0);
    let seconds = parts.next().map(parse_component).unwrap_or(0);
    (minutes as f64) * 60.0 + (seconds as f64)
}

/// Parse a timestamp stored either as a JSON string or a JSON number.
///
/// Numbers are stringified first and then follow the string rules, so `1.5` yields `0`.
pub fn parse_timestamp_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::String(s) => parse_timestamp(s),
        serde_json::Value::Number(n) => parse_timestamp(&n.to_string()),
        _ => 0.0,
    }
}

fn parse_component(part: &str) -> u64 {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    // All-digit strings only fail on overflow.
    part.parse().unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/script/timestamp.rs"]
mod tests;
