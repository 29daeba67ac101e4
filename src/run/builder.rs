//! Builds a `RunRecord` from the recognized text of one summary screen.

use crate::ocr::{self, codec, Field};

use super::record::{Amount, QuantityStats, Reading, RunRecord};

/// Builds a complete record from raw OCR text.
///
/// Never fails: fields that are missing or unreadable end up as empty text
/// or `"NaN"` in the record.
pub fn build(raw_text: &str, run_timestamp: i64) -> RunRecord {
    let tier = ocr::read_field(raw_text, Field::Tier);
    let wave = parse_wave(&ocr::read_field(raw_text, Field::Wave));
    let duration_hours = parse_duration(&ocr::read_field(raw_text, Field::RealTime));

    let quantity = |field: Field| {
        let absolute = decode_amount(&ocr::read_field(raw_text, field));
        QuantityStats::derive(absolute, duration_hours, wave)
    };
    let reading = |field: Field| Reading::new(decode_amount(&ocr::read_field(raw_text, field)));

    RunRecord {
        run_timestamp,
        tier,
        duration_hours,
        wave,
        killed_by: ocr::read_field(raw_text, Field::KilledBy),
        cash: quantity(Field::CashEarned),
        coins: quantity(Field::CoinsEarned),
        cells: quantity(Field::CellsEarned),
        reroll_shards: quantity(Field::RerollShardsEarned),
        damage_taken: reading(Field::DamageTaken),
        damage_dealt: reading(Field::DamageDealt),
        notes: String::new(),
    }
}

fn decode_amount(raw: &str) -> Amount {
    Amount::from_option(codec::decode(raw))
}

/// Wave numbers may carry a thousands separator (`1,204`).
fn parse_wave(raw: &str) -> Option<u64> {
    raw.replace(',', "").parse::<u64>().ok()
}

fn parse_duration(raw: &str) -> Amount {
    Amount::from_option(raw.parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "Battle Report\n\
        Tier 5\n\
        Wave 120\n\
        Real Time 1h 0m 0s\n\
        Killed By Boss\n\
        Coins Earned 500.00K\n\
        Cash Earned $1,2348\n\
        Cells Earned 1.2 K\n\
        Damage Taken 3.4M\n\
        Damage Dealt 7.7B\n\
        Reroll Shards Earned 240\n";

    #[test]
    fn test_build_end_to_end() {
        let record = build(SUMMARY, 1000);

        assert_eq!(record.run_timestamp, 1000);
        assert_eq!(record.tier, "5");
        assert_eq!(record.wave, Some(120));
        assert_eq!(record.duration_text(), "1.00");
        assert_eq!(record.coins.absolute, Amount::Valid(500_000.0));
        assert_eq!(record.coins.display, "500.00K");
        assert_eq!(record.coins.per_hour, "500.00K");
        assert_eq!(record.coins.per_wave, "4.17K");
        assert_eq!(record.killed_by, "Boss");
        assert!(record.notes.is_empty());
    }

    #[test]
    fn test_build_corrects_misread_billions() {
        let record = build(SUMMARY, 1000);

        let cash = record.cash.absolute.value().unwrap();
        assert!((cash - 1.23e9).abs() < 1.0);
        assert_eq!(record.cash.display, "1.23B");
    }

    #[test]
    fn test_build_rejoined_suffix_and_readings() {
        let record = build(SUMMARY, 1000);

        assert_eq!(record.cells.absolute, Amount::Valid(1200.0));
        assert_eq!(record.reroll_shards.absolute, Amount::Valid(240.0));
        assert_eq!(record.reroll_shards.per_wave, "2.00");
        assert_eq!(record.damage_taken.display, "3.40M");
        assert_eq!(record.damage_dealt.display, "7.70B");
    }

    #[test]
    fn test_build_unreadable_quantity_is_nan() {
        let text = "Tier 3\nWave 50\nReal Time 0h 30m 0s\nCoins Earned ???\n";
        let record = build(text, 7);

        assert_eq!(record.coins.absolute, Amount::Unparseable);
        assert_eq!(record.coins.display, "NaN");
        assert_eq!(record.coins.per_hour, "NaN");
        assert_eq!(record.coins.per_wave, "NaN");
    }

    #[test]
    fn test_build_missing_time_and_wave() {
        let text = "Tier 1\nCoins Earned 10K\n";
        let record = build(text, 7);

        assert_eq!(record.wave, None);
        assert_eq!(record.duration_hours, Amount::Unparseable);
        assert_eq!(record.coins.display, "10.00K");
        assert_eq!(record.coins.per_hour, "NaN");
        assert_eq!(record.coins.per_wave, "NaN");
        assert_eq!(record.cash, QuantityStats::unparseable());
        assert_eq!(record.killed_by, "");
    }

    #[test]
    fn test_build_zero_duration_is_nan_rate() {
        let text = "Wave 10\nReal Time 0h 0m 0s\nCoins Earned 10K\n";
        let record = build(text, 7);

        assert_eq!(record.duration_hours, Amount::Valid(0.0));
        assert_eq!(record.coins.per_hour, "NaN");
        assert_eq!(record.coins.per_wave, "1.00K");
    }

    #[test]
    fn test_parse_wave_separators() {
        assert_eq!(parse_wave("1,204"), Some(1204));
        assert_eq!(parse_wave("12O"), None);
        assert_eq!(parse_wave(""), None);
    }
}
