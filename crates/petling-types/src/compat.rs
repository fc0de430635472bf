//! Serde helpers for the snapshot wire format.
//!
//! Instants are written as integer milliseconds since the Unix epoch.
//! When reading, older clients' encodings are accepted as well: float
//! milliseconds, RFC 3339 strings (inventory `date` fields), and the
//! `"Sat Oct 17 2026"` day format used for `lastTapDate`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Day format written by current clients.
const ISO_DAY: &str = "%Y-%m-%d";

/// Day format written by legacy clients.
const LEGACY_DAY: &str = "%a %b %d %Y";

/// Any encoding of an instant found in saved snapshots.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInstant {
    Millis(i64),
    FloatMillis(f64),
    Text(String),
}

impl RawInstant {
    #[allow(clippy::cast_possible_truncation)]
    fn into_instant(self) -> Result<DateTime<Utc>, String> {
        match self {
            Self::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| format!("timestamp {ms} is out of range")),
            Self::FloatMillis(ms) if ms.is_finite() => {
                let rounded = ms.round() as i64;
                DateTime::from_timestamp_millis(rounded)
                    .ok_or_else(|| format!("timestamp {ms} is out of range"))
            }
            Self::FloatMillis(ms) => Err(format!("timestamp {ms} is not finite")),
            Self::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| format!("invalid timestamp {text:?}: {e}")),
        }
    }
}

fn parse_day(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, ISO_DAY)
        .or_else(|_| NaiveDate::parse_from_str(text, LEGACY_DAY))
        .map_err(|e| format!("invalid calendar day {text:?}: {e}"))
}

/// Required instant encoded as epoch milliseconds.
pub mod epoch_millis {
    use super::{DateTime, Deserialize, Deserializer, RawInstant, Serializer, Utc};
    use serde::de::Error as _;

    /// Write the instant as integer milliseconds.
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(value.timestamp_millis())
    }

    /// Read an instant from any accepted encoding.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        RawInstant::deserialize(d)?
            .into_instant()
            .map_err(D::Error::custom)
    }
}

/// Optional instant encoded as epoch milliseconds.
pub mod epoch_millis_opt {
    use super::{DateTime, Deserialize, Deserializer, RawInstant, Serializer, Utc};
    use serde::de::Error as _;

    /// Write the instant as integer milliseconds, or `null`.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_some(&dt.timestamp_millis()),
            None => s.serialize_none(),
        }
    }

    /// Read an optional instant from any accepted encoding.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<RawInstant>::deserialize(d)?
            .map(RawInstant::into_instant)
            .transpose()
            .map_err(D::Error::custom)
    }
}

/// Optional calendar day, written as `YYYY-MM-DD`.
pub mod calendar_day {
    use super::{Deserialize, Deserializer, ISO_DAY, NaiveDate, Serializer, parse_day};
    use serde::de::Error as _;

    /// Write the day as an ISO date string, or `null`.
    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(day) => s.serialize_some(&day.format(ISO_DAY).to_string()),
            None => s.serialize_none(),
        }
    }

    /// Read a day in either the ISO or the legacy format.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|text| parse_day(&text))
            .transpose()
            .map_err(D::Error::custom)
    }
}
