// Deserialization for trip timestamps. Uploads carry either an RFC 3339 string
// or a number of seconds since the Unix epoch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    EpochSeconds(f64),
    Text(String),
}

impl RawTimestamp {
    fn into_datetime<E: Error>(self) -> Result<DateTime<Utc>, E> {
        match self {
            RawTimestamp::EpochSeconds(seconds) => {
                if !seconds.is_finite() {
                    return Err(E::custom(format!("invalid epoch timestamp {seconds}")));
                }
                DateTime::from_timestamp_millis((seconds * 1000.).round() as i64)
                    .ok_or_else(|| E::custom(format!("epoch timestamp out of range: {seconds}")))
            }
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|e| E::custom(format!("invalid timestamp {text:?}: {e}"))),
        }
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    RawTimestamp::deserialize(deserializer)?.into_datetime()
}

pub(crate) fn deserialize_option<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawTimestamp>::deserialize(deserializer)?
        .map(RawTimestamp::into_datetime)
        .transpose()
}
