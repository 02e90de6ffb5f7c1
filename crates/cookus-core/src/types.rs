// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common wire types shared across the CookUS client crates.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The notification `type` tag the backend uses for badge awards.
pub const BADGE_KIND: &str = "badge";

/// A server-issued notification record.
///
/// `notification_id` is unique within a user's notification list. `is_read`
/// is sent by the backend as `0 | 1`; the deserializer also accepts JSON
/// booleans. `created_at` accepts both RFC 3339 and bare SQL datetimes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i64,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub related_id: Option<i64>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(with = "flexible_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "int_bool")]
    pub is_read: bool,
}

impl Notification {
    /// True if this notification announces a badge award.
    pub fn is_badge(&self) -> bool {
        self.kind == BADGE_KIND
    }
}

/// Newest-first ordering for notification lists.
///
/// Ties on `created_at` fall back to descending id so merge output is
/// deterministic.
pub fn newest_first(a: &Notification, b: &Notification) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then(b.notification_id.cmp(&a.notification_id))
}

/// Categories a badge can belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Contest,
    Recipe,
    Goal,
    Likes,
    Cooked,
    Fridge,
    Ranks,
    Others,
}

/// Serde adapter for the backend's `0 | 1` read flag.
pub mod int_bool {
    use serde::de::{self, Unexpected};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = bool;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("0, 1, or a boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
                Ok(v)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
                match v {
                    0 => Ok(false),
                    1 => Ok(true),
                    other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
                match v {
                    0 => Ok(false),
                    1 => Ok(true),
                    other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// Serde adapter for timestamps that may arrive as RFC 3339 or as a bare
/// SQL datetime (`YYYY-MM-DD HH:MM:SS`, assumed UTC).
pub mod flexible_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::{self, Deserialize};
    use serde::{Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp `{raw}`")))
    }

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_json(id: i64, kind: &str, is_read: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "notification_id": id,
            "user_id": "u-1",
            "type": kind,
            "related_id": null,
            "title": "New badge",
            "body": "You earned something",
            "link_url": null,
            "created_at": "2025-03-01T10:00:00Z",
            "is_read": is_read,
        })
    }

    #[test]
    fn deserializes_integer_read_flag() {
        let n: Notification = serde_json::from_value(sample_json(1, "badge", 0.into())).unwrap();
        assert!(!n.is_read);
        assert!(n.is_badge());

        let n: Notification = serde_json::from_value(sample_json(2, "system", 1.into())).unwrap();
        assert!(n.is_read);
        assert!(!n.is_badge());
    }

    #[test]
    fn deserializes_boolean_read_flag() {
        let n: Notification =
            serde_json::from_value(sample_json(3, "badge", serde_json::Value::Bool(true))).unwrap();
        assert!(n.is_read);
    }

    #[test]
    fn rejects_out_of_range_read_flag() {
        let result: Result<Notification, _> =
            serde_json::from_value(sample_json(4, "badge", 2.into()));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_read_flag_as_integer() {
        let n: Notification = serde_json::from_value(sample_json(5, "badge", 1.into())).unwrap();
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["is_read"], serde_json::json!(1));
        assert_eq!(value["type"], serde_json::json!("badge"));
    }

    #[test]
    fn parses_bare_sql_datetime() {
        let mut value = sample_json(6, "badge", 0.into());
        value["created_at"] = serde_json::json!("2025-03-01 10:30:00");
        let n: Notification = serde_json::from_value(value).unwrap();
        assert_eq!(n.created_at.to_rfc3339(), "2025-03-01T10:30:00+00:00");
    }

    #[test]
    fn newest_first_orders_by_timestamp_then_id() {
        let older: Notification =
            serde_json::from_value(sample_json(10, "badge", 0.into())).unwrap();
        let mut newer = older.clone();
        newer.notification_id = 11;
        newer.created_at = older.created_at + chrono::Duration::seconds(5);

        assert_eq!(newest_first(&newer, &older), Ordering::Less);

        let mut tied = older.clone();
        tied.notification_id = 12;
        assert_eq!(newest_first(&tied, &older), Ordering::Less);
    }

    #[test]
    fn badge_category_round_trips() {
        for category in [
            BadgeCategory::Contest,
            BadgeCategory::Recipe,
            BadgeCategory::Goal,
            BadgeCategory::Likes,
            BadgeCategory::Cooked,
            BadgeCategory::Fridge,
            BadgeCategory::Ranks,
            BadgeCategory::Others,
        ] {
            let s = category.to_string();
            assert_eq!(BadgeCategory::from_str(&s).unwrap(), category);
        }
    }
}
