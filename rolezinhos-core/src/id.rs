//! Record identifiers.
//!
//! Seed data carries numeric ids (`1`, `2`, ...) while records created on
//! the site get timestamp strings (`"1718035200000"`). Both forms are the
//! same logical key, so every id is normalized to its string form on the
//! way in and compared as a string afterwards.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A normalized record identifier.
///
/// Equality and hashing operate on the normalized string, so `RecordId::from(1)`
/// equals `RecordId::from("1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Loose equality between two ids in any accepted form.
    pub fn equals(a: impl Into<RecordId>, b: impl Into<RecordId>) -> bool {
        a.into() == b.into()
    }
}

/// Normalize a JSON number the way it prints: integral values lose the
/// fractional part (`1.0` -> `"1"`).
fn normalize_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.trim().to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::from(s.as_str())
    }
}

impl From<&String> for RecordId {
    fn from(s: &String) -> Self {
        RecordId::from(s.as_str())
    }
}

impl From<&RecordId> for RecordId {
    fn from(id: &RecordId) -> Self {
        id.clone()
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId(n.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId(n.to_string())
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId(n.to_string())
    }
}

impl From<f64> for RecordId {
    fn from(n: f64) -> Self {
        RecordId(normalize_number(n))
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RecordId::from(s))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Str(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => RecordId::from(n),
            RawId::Float(n) => RecordId::from(n),
            RawId::Str(s) => RecordId::from(s),
        })
    }
}

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Generate a fresh id from the current time in milliseconds.
///
/// Calls within the same millisecond get bumped forward, so ids issued by
/// one process are strictly increasing.
pub fn new_id() -> RecordId {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ISSUED.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_ISSUED.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return RecordId::from(next),
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numeric_and_string_forms_are_equal() {
        assert!(RecordId::equals(1, "1"));
        assert!(RecordId::equals(1.0, "1"));
        assert!(RecordId::equals(" 42 ", 42));
        assert!(!RecordId::equals(1, "01"));
        assert!(!RecordId::equals("a", "A"));
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[1, "2", 3.0, 1.5]"#).unwrap();
        assert_eq!(ids[0].as_str(), "1");
        assert_eq!(ids[1].as_str(), "2");
        assert_eq!(ids[2].as_str(), "3");
        assert_eq!(ids[3].as_str(), "1.5");
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&RecordId::from(7)).unwrap();
        assert_eq!(json, r#""7""#);
    }

    #[test]
    fn new_ids_are_distinct_and_increasing() {
        let ids: Vec<i64> = (0..1000)
            .map(|_| new_id().as_str().parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
