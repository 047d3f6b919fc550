//! Lenient ISO-8601 timestamp handling for server payloads.
//!
//! Server timestamps are ISO-8601 strings, usually RFC 3339 with a trailing `Z`. Decoding
//! never fails on a malformed value: the current UTC instant is substituted and a warning is
//! logged, so one bad field cannot sink an otherwise valid response. That also means bad data
//! is masked rather than surfaced, which callers comparing timestamps should keep in mind.

// crates.io
use serde::{Deserializer, Serializer, ser::Error as _};
use serde_json::Value;
use time::{
	Date, PrimitiveDateTime,
	format_description::well_known::{Iso8601, Rfc3339},
};
// self
use crate::{_prelude::*, obs};

/// Parses an ISO-8601 timestamp; values without an offset are taken as UTC.
pub fn parse(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();

	if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Some(instant);
	}
	if let Ok(instant) = OffsetDateTime::parse(raw, &Iso8601::DEFAULT) {
		return Some(instant);
	}
	if let Ok(naive) = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
		return Some(naive.assume_utc());
	}

	Date::parse(raw, &Iso8601::DEFAULT).ok().map(|date| date.midnight().assume_utc())
}

/// Parses `raw`, substituting the current UTC instant when it is malformed.
pub fn parse_or_now(raw: &str) -> OffsetDateTime {
	parse(raw).unwrap_or_else(|| {
		obs::log_timestamp_fallback(raw);

		OffsetDateTime::now_utc()
	})
}

pub(crate) fn now() -> OffsetDateTime {
	OffsetDateTime::now_utc()
}

fn from_value(value: &Value) -> OffsetDateTime {
	match value {
		Value::String(raw) => parse_or_now(raw),
		other => parse_or_now(&other.to_string()),
	}
}

/// Serializes as RFC 3339.
pub fn serialize<S>(instant: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = instant.format(&Rfc3339).map_err(S::Error::custom)?;

	serializer.serialize_str(&formatted)
}

/// Deserializes any JSON value, falling back to "now" for anything unparsable.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;

	Ok(from_value(&value))
}

/// Optional variant: `null`, absent, and blank strings decode to `None`.
pub mod option {
	// self
	use super::*;

	/// Serializes `Some` as RFC 3339 and `None` as `null`.
	pub fn serialize<S>(instant: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match instant {
			Some(instant) => super::serialize(instant, serializer),
			None => serializer.serialize_none(),
		}
	}

	/// Deserializes an optional timestamp without ever fabricating one for absent data.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = Option::<Value>::deserialize(deserializer)?;

		Ok(match value {
			None | Some(Value::Null) => None,
			Some(Value::String(raw)) if raw.trim().is_empty() => None,
			Some(other) => Some(from_value(&other)),
		})
	}
}
