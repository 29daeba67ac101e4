/// Returns the first line of `text` that starts with `label`.
///
/// Leading whitespace on a line is ignored, the prefix match itself is exact
/// and case-sensitive. An empty string means the field is absent.
pub fn locate<'a>(text: &'a str, label: &str) -> &'a str {
    text.lines()
        .map(str::trim_start)
        .find(|line| line.starts_with(label))
        .unwrap_or("")
}
