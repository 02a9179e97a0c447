use chrono::{
  DateTime,
  NaiveDateTime,
  TimeZone,
  Utc
};
use chrono_tz::Tz;

/// Value format of an
/// `<input type="datetime-local">`.
pub const INPUT_FORMAT: &str =
  "%Y-%m-%dT%H:%M";

const INPUT_FORMATS: [&str; 3] = [
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%dT%H:%M:%S%.f"
];

pub fn parse_input(
  raw: &str
) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }
  INPUT_FORMATS.iter().find_map(|fmt| {
    NaiveDateTime::parse_from_str(
      raw, fmt
    )
    .ok()
  })
}

/// Server-rendered timestamps may be
/// either a bare local value or a full
/// RFC 3339 instant; the latter is
/// shown in `tz`.
pub fn parse_attribute(
  raw: &str,
  tz: &Tz
) -> Option<NaiveDateTime> {
  if let Some(naive) = parse_input(raw)
  {
    return Some(naive);
  }
  DateTime::parse_from_rfc3339(
    raw.trim()
  )
  .ok()
  .map(|instant| {
    instant
      .with_timezone(tz)
      .naive_local()
  })
}

pub fn format_input(
  value: &NaiveDateTime
) -> String {
  value.format(INPUT_FORMAT).to_string()
}

/// Interprets `value` as wall-clock time
/// in `tz` and renders the instant the
/// way `Date.prototype.toISOString`
/// does. Skipped local times yield
/// `None`; ambiguous ones take the
/// earlier instant.
pub fn to_utc_iso(
  value: &NaiveDateTime,
  tz: &Tz
) -> Option<String> {
  tz.from_local_datetime(value)
    .earliest()
    .map(|local| {
      local
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
    })
}
