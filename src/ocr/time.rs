//! Parsing of the "Real Time" duration line.

/// Token positions of the hour, minute and second parts.
/// Positions 0 and 1 hold the label words "Real" and "Time".
const HOURS_INDEX: usize = 2;
const MINUTES_INDEX: usize = 3;
const SECONDS_INDEX: usize = 4;

/// Parses a line like `Real Time 2h 15m 30s` into decimal hours with 2 decimals.
///
/// Missing or unreadable parts count as zero, so this never fails.
pub fn parse(line: &str) -> String {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let hours = component(&tokens, HOURS_INDEX);
    let minutes = component(&tokens, MINUTES_INDEX);
    let seconds = component(&tokens, SECONDS_INDEX);

    format!("{:.2}", hours + minutes / 60.0 + seconds / 3600.0)
}

/// Reads the number in front of a unit suffix (`15m` -> 15).
fn component(tokens: &[&str], index: usize) -> f64 {
    tokens
        .get(index)
        .map(|token| token.trim_end_matches(|c: char| c.is_ascii_alphabetic()))
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
