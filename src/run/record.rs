//! Typed run record built from one end-of-run summary.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::ocr::codec;

/// Text rendered for any value that could not be read.
pub const NAN_SENTINEL: &str = "NaN";

/// A numeric reading that is either usable or known to be bad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Valid(f64),
    Unparseable,
}

impl Amount {
    /// Wraps a float, treating NaN and infinities as unparseable.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Amount::Valid(value)
        } else {
            Amount::Unparseable
        }
    }

    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Amount::Unparseable, Amount::from_f64)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Amount::Valid(v) => Some(v),
            Amount::Unparseable => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Amount::Valid(_))
    }

    /// Divides by `divisor`. A zero or unparseable divisor gives `Unparseable`.
    pub fn per(self, divisor: Amount) -> Amount {
        match (self, divisor) {
            (Amount::Valid(value), Amount::Valid(d)) if d != 0.0 => Amount::from_f64(value / d),
            _ => Amount::Unparseable,
        }
    }

    /// Abbreviated rendering, `"NaN"` when unparseable.
    pub fn encode(self) -> String {
        match self {
            Amount::Valid(v) => codec::encode(v),
            Amount::Unparseable => NAN_SENTINEL.to_string(),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Amount::Valid(v) => serializer.serialize_f64(*v),
            Amount::Unparseable => serializer.serialize_str(NAN_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Stored {
            Number(f64),
            Text(String),
        }

        match Stored::deserialize(deserializer)? {
            Stored::Number(v) => Ok(Amount::from_f64(v)),
            Stored::Text(text) if text == NAN_SENTINEL => Ok(Amount::Unparseable),
            Stored::Text(text) => Err(de::Error::custom(format!(
                "expected a number or \"{}\", got \"{}\"",
                NAN_SENTINEL, text
            ))),
        }
    }
}

/// Serde adapter storing `Option<u64>` as a number or the `"NaN"` sentinel.
mod wave_sentinel {
    use super::NAN_SENTINEL;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::Serializer;

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_u64(*v),
            None => serializer.serialize_str(NAN_SENTINEL),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Stored {
            Number(u64),
            Text(String),
        }

        match Stored::deserialize(deserializer)? {
            Stored::Number(v) => Ok(Some(v)),
            Stored::Text(text) if text == NAN_SENTINEL => Ok(None),
            Stored::Text(text) => Err(de::Error::custom(format!(
                "expected a wave number or \"{}\", got \"{}\"",
                NAN_SENTINEL, text
            ))),
        }
    }
}

/// One tracked quantity with its derived rates.
///
/// All three strings are `"NaN"` whenever `absolute` is unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityStats {
    pub absolute: Amount,
    pub display: String,
    pub per_hour: String,
    pub per_wave: String,
}

impl QuantityStats {
    /// Derives display value and rates from an absolute amount.
    pub fn derive(absolute: Amount, duration_hours: Amount, wave: Option<u64>) -> Self {
        if !absolute.is_valid() {
            return Self::unparseable();
        }

        let waves = Amount::from_option(wave.map(|w| w as f64));
        Self {
            absolute,
            display: absolute.encode(),
            per_hour: absolute.per(duration_hours).encode(),
            per_wave: absolute.per(waves).encode(),
        }
    }

    pub fn unparseable() -> Self {
        Self {
            absolute: Amount::Unparseable,
            display: NAN_SENTINEL.to_string(),
            per_hour: NAN_SENTINEL.to_string(),
            per_wave: NAN_SENTINEL.to_string(),
        }
    }

    /// False when an unreadable absolute carries any rendered value.
    pub fn is_consistent(&self) -> bool {
        self.absolute.is_valid()
            || [&self.display, &self.per_hour, &self.per_wave]
                .iter()
                .all(|text| text.as_str() == NAN_SENTINEL)
    }

    /// Absolute value per hour, for statistics.
    pub fn hourly_rate(&self, duration_hours: Amount) -> Amount {
        self.absolute.per(duration_hours)
    }
}

/// A quantity recorded without rates (damage figures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub absolute: Amount,
    pub display: String,
}

impl Reading {
    pub fn new(absolute: Amount) -> Self {
        Self {
            absolute,
            display: absolute.encode(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.absolute.is_valid() || self.display == NAN_SENTINEL
    }
}

/// One completed game run.
///
/// Built once by the record builder; only `notes` changes afterwards, through
/// `RunHistory::set_notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    /// Capture time in epoch milliseconds, unique within a history
    pub run_timestamp: i64,
    pub tier: String,
    pub duration_hours: Amount,
    #[serde(with = "wave_sentinel")]
    pub wave: Option<u64>,
    pub killed_by: String,
    pub cash: QuantityStats,
    pub coins: QuantityStats,
    pub cells: QuantityStats,
    pub reroll_shards: QuantityStats,
    pub damage_taken: Reading,
    pub damage_dealt: Reading,
    #[serde(default)]
    pub notes: String,
}

/// The rate-tracked quantities, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Coins,
    Cash,
    Cells,
    RerollShards,
}

impl Quantity {
    pub const ALL: [Quantity; 4] = [
        Quantity::Coins,
        Quantity::Cash,
        Quantity::Cells,
        Quantity::RerollShards,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Quantity::Coins => "Coins",
            Quantity::Cash => "Cash",
            Quantity::Cells => "Cells",
            Quantity::RerollShards => "Reroll Shards",
        }
    }
}

impl RunRecord {
    /// First quantity (by stored name) whose rendering contradicts an
    /// unreadable value.
    pub fn inconsistent_field(&self) -> Option<&'static str> {
        let quantities = [
            ("cash", &self.cash),
            ("coins", &self.coins),
            ("cells", &self.cells),
            ("rerollShards", &self.reroll_shards),
        ];
        let readings = [
            ("damageTaken", &self.damage_taken),
            ("damageDealt", &self.damage_dealt),
        ];

        quantities
            .into_iter()
            .find(|(_, stats)| !stats.is_consistent())
            .map(|(name, _)| name)
            .or_else(|| {
                readings
                    .into_iter()
                    .find(|(_, reading)| !reading.is_consistent())
                    .map(|(name, _)| name)
            })
    }

    pub fn quantity(&self, quantity: Quantity) -> &QuantityStats {
        match quantity {
            Quantity::Coins => &self.coins,
            Quantity::Cash => &self.cash,
            Quantity::Cells => &self.cells,
            Quantity::RerollShards => &self.reroll_shards,
        }
    }

    /// Wave as text, `"NaN"` when unreadable.
    pub fn wave_text(&self) -> String {
        self.wave
            .map_or_else(|| NAN_SENTINEL.to_string(), |w| w.to_string())
    }

    /// Duration as 2-decimal hours, `"NaN"` when unreadable.
    pub fn duration_text(&self) -> String {
        match self.duration_hours {
            Amount::Valid(h) => format!("{:.2}", h),
            Amount::Unparseable => NAN_SENTINEL.to_string(),
        }
    }
}
