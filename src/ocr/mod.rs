pub mod codec;
pub mod extract;
pub mod locate;
pub mod source;
pub mod time;

pub use codec::encode;
pub use extract::{extract, Field};
pub use locate::locate;
pub use source::{collect_paths, read_capture, OcrCapture};

/// Locates and extracts one field from a full block of OCR text.
///
/// Returns an empty string when the field's line is missing. For
/// `Real Time` this means an absent line yields an unreadable duration,
/// while a present but garbled one still parses to `0.00`.
pub fn read_field(text: &str, field: Field) -> String {
    let label = field.label();
    let line = locate(text, label);
    if line.is_empty() {
        return String::new();
    }
    extract(label, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_field() {
        let text = "Tier 5\nCoins Earned 1.5 M\n";
        assert_eq!(read_field(text, Field::Tier), "5");
        assert_eq!(read_field(text, Field::CoinsEarned), "1.5M");
        assert_eq!(read_field(text, Field::CashEarned), "");
    }

    #[test]
    fn test_read_field_absent_duration_is_empty() {
        assert_eq!(read_field("Tier 5", Field::RealTime), "");
    }

    #[test]
    fn test_read_field_garbled_duration_is_zero() {
        assert_eq!(read_field("Tier 5\nReal Time ??", Field::RealTime), "0.00");
    }
}
