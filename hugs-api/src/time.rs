//! Timestamps as exchanged with the remote store.
//!
//! Two shapes show up on the wire: full RFC 3339 strings as produced by a
//! javascript `toISOString()` (`2024-07-16T21:46:50.784Z`), and naive
//! fractional-second strings without any offset (`2024-02-15T19:43:03.999084`)
//! coming from the seed data. A [`Timestamp`] remembers the string it was read
//! from and writes it back untouched, so editing a post never rewrites the
//! dates it already had. Only timestamps created here are formatted, as
//! RFC 3339 with millisecond precision.

use std::{cmp::Ordering, fmt, hash};

use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

pub type Time = DateTime<Utc>;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Naive strings are read as UTC. A javascript `Date.parse` reads the same
/// string in the device's local time zone instead, so ages shown for such
/// timestamps can be off by the local UTC offset. The string itself is never
/// altered, see [`Timestamp`].
pub fn parse(s: &str) -> anyhow::Result<Time> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&t));
        }
    }
    Err(anyhow!("unrecognized timestamp format"))
        .with_context(|| format!("parsing timestamp {s:?}"))
}

pub fn format(t: &Time) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A point in time along with its wire spelling.
///
/// Comparison, equality and hashing only look at the instant: two timestamps
/// naming the same instant are equal whatever their spelling.
#[derive(Clone, Debug)]
pub struct Timestamp {
    raw: String,
    time: Time,
}

impl Timestamp {
    pub fn parse(s: &str) -> anyhow::Result<Timestamp> {
        Ok(Timestamp {
            raw: String::from(s),
            time: parse(s)?,
        })
    }

    pub fn time(&self) -> Time {
        self.time
    }

    /// The string this timestamp is sent as
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<Time> for Timestamp {
    fn from(time: Time) -> Timestamp {
        Timestamp {
            raw: format(&time),
            time,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Timestamp) -> bool {
        self.time == other.time
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Timestamp) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Timestamp) -> Ordering {
        self.time.cmp(&other.time)
    }
}

impl hash::Hash for Timestamp {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.time.hash(state)
    }
}

impl serde::Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.raw)
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Timestamp, D::Error> {
        let s = String::deserialize(de)?;
        Timestamp::parse(&s).map_err(|e| serde::de::Error::custom(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn parses_both_wire_shapes() {
        let zulu = parse("2024-07-16T21:46:50.784Z").unwrap();
        let naive = parse("2024-07-16T21:46:50.784").unwrap();
        assert_eq!(zulu, naive);

        let micro = parse("2024-02-15T19:43:03.999084").unwrap();
        let later = parse("2024-02-15T19:43:04Z").unwrap();
        assert!(micro < later);
        assert!(later - micro < Duration::milliseconds(1));
    }

    #[test]
    fn offsets_are_normalized() {
        assert_eq!(
            parse("2024-01-01T02:00:00+02:00").unwrap(),
            parse("2024-01-01T00:00:00Z").unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("").is_err());
        assert!(serde_json::from_str::<Timestamp>(r#""tomorrow""#).is_err());
    }

    #[test]
    fn formats_like_javascript() {
        let t = parse("2024-02-15T19:43:03.999084").unwrap();
        assert_eq!(format(&t), "2024-02-15T19:43:03.999Z");
        assert_eq!(format(&parse("2024-01-01T00:00:00Z").unwrap()), "2024-01-01T00:00:00.000Z");
        assert_eq!(Timestamp::from(t).as_str(), "2024-02-15T19:43:03.999Z");
    }

    #[test]
    fn wire_spelling_is_kept() {
        for s in [
            "2024-02-15T19:43:03.999084",
            "2024-02-15 19:43:03.5",
            "2024-07-16T21:46:50.784Z",
            "2024-01-01T02:00:00+02:00",
        ] {
            let json = format!("{s:?}");
            let t: Timestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(t.as_str(), s);
            assert_eq!(serde_json::to_string(&t).unwrap(), json);
        }
    }

    #[test]
    fn compares_by_instant() {
        let a = Timestamp::parse("2024-01-01T02:00:00+02:00").unwrap();
        let b = Timestamp::parse("2024-01-01T00:00:00").unwrap();
        assert_eq!(a, b);

        let early = Timestamp::parse("2024-02-15T19:43:03.999084").unwrap();
        let late = Timestamp::parse("2024-02-15T19:43:03.999884").unwrap();
        assert!(early < late);
        assert_eq!(early.time(), parse("2024-02-15T19:43:03.999084").unwrap());
    }
}
