use std::collections::BTreeMap;

use chrono_tz::Tz;
use netsched_shared::Interval;
use tracing::{
  debug,
  warn
};

use crate::datetime;
use crate::draft::{
  TaskDraft,
  TaskId,
  TaskTarget
};
use crate::error::DecodeError;

pub const ATTR_TASK_ID: &str = "taskId";
pub const ATTR_TASK_NAME: &str =
  "taskName";
pub const ATTR_TEST_TYPE: &str =
  "testType";
pub const ATTR_CHART_TYPE: &str =
  "chartType";
pub const ATTR_RECENT_DAYS: &str =
  "recentDays";
pub const ATTR_DATETIME: &str =
  "datetime";
pub const ATTR_RECURRING: &str =
  "recurring";
pub const ATTR_INTERVAL: &str =
  "interval";
pub const ATTR_ACTIVE: &str = "active";

pub const ATTRIBUTES: [&str; 9] = [
  ATTR_TASK_ID,
  ATTR_TASK_NAME,
  ATTR_TEST_TYPE,
  ATTR_CHART_TYPE,
  ATTR_RECENT_DAYS,
  ATTR_DATETIME,
  ATTR_RECURRING,
  ATTR_INTERVAL,
  ATTR_ACTIVE
];

/// Dataset of a server-rendered task
/// element, keyed by the camelCase
/// `DOMStringMap` name.
pub type TaskAttributes =
  BTreeMap<String, String>;

fn attr<'a>(
  attrs: &'a TaskAttributes,
  key: &str
) -> Option<&'a str> {
  attrs
    .get(key)
    .map(|value| value.trim())
    .filter(|value| !value.is_empty())
}

/// Decodes a task element's dataset.
///
/// `fallback_id` is the id the element
/// was looked up by; it is used when the
/// element does not repeat its own id.
pub fn decode_task(
  attrs: &TaskAttributes,
  fallback_id: Option<&str>,
  tz: &Tz
) -> Result<(TaskId, TaskDraft), DecodeError>
{
  let id = match attr(
    attrs,
    ATTR_TASK_ID
  )
  .or(fallback_id)
  {
    | Some(raw) => TaskId::parse(raw)?,
    | None => {
      return Err(
        DecodeError::MissingTaskId
      );
    }
  };

  let recent_days = attr(
    attrs,
    ATTR_RECENT_DAYS
  )
  .and_then(|raw| {
    raw.parse::<i64>().ok()
  })
  .unwrap_or(0);

  let target = if let Some(test_type) =
    attr(attrs, ATTR_TEST_TYPE)
  {
    TaskTarget::Test {
      test_type: test_type.to_string()
    }
  } else if let Some(chart_type) =
    attr(attrs, ATTR_CHART_TYPE)
  {
    let recent_days =
      u32::try_from(recent_days)
        .ok()
        .filter(|days| *days > 0);
    TaskTarget::Chart {
      chart_type: chart_type
        .to_string(),
      historic: recent_days.is_some(),
      recent_days
    }
  } else {
    warn!(
      task_id = %id,
      "task element has neither a test \
       nor a chart type"
    );
    TaskTarget::default()
  };

  let interval = match attr(
    attrs,
    ATTR_INTERVAL
  ) {
    | Some(raw) => raw
      .parse::<Interval>()
      .unwrap_or_else(|error| {
        warn!(
          task_id = %id,
          %error,
          "falling back to daily \
           interval"
        );
        Interval::Daily
      }),
    | None => Interval::Daily
  };

  let datetime =
    attr(attrs, ATTR_DATETIME)
      .and_then(|raw| {
        let parsed =
          datetime::parse_attribute(
            raw, tz
          );
        if parsed.is_none() {
          warn!(
            task_id = %id,
            raw,
            "unparseable task datetime"
          );
        }
        parsed
      });

  let draft = TaskDraft {
    name: attr(attrs, ATTR_TASK_NAME)
      .unwrap_or_default()
      .to_string(),
    target,
    datetime,
    recurring: attr(
      attrs,
      ATTR_RECURRING
    ) == Some("true"),
    interval,
    active: attr(attrs, ATTR_ACTIVE)
      .is_none_or(|raw| raw == "true")
  };

  debug!(task_id = %id, ?draft, "decoded task attributes");
  Ok((id, draft))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn attrs(
    pairs: &[(&str, &str)]
  ) -> TaskAttributes {
    pairs
      .iter()
      .map(|(k, v)| {
        (k.to_string(), v.to_string())
      })
      .collect()
  }

  #[test]
  fn decodes_historic_chart_task() {
    let (id, draft) = decode_task(
      &attrs(&[
        ("taskId", "1700000000"),
        ("taskName", "Nightly"),
        ("testType", ""),
        ("chartType", "latency"),
        ("recentDays", "7"),
        ("datetime", "2024-01-01T00:00"),
        ("recurring", "true"),
        ("interval", "weekly"),
        ("active", "false")
      ]),
      None,
      &chrono_tz::UTC
    )
    .expect("decode task");

    assert_eq!(id.as_str(), "1700000000");
    assert_eq!(draft.name, "Nightly");
    assert_eq!(
      draft.target,
      TaskTarget::Chart {
        chart_type:  "latency"
          .to_string(),
        historic:    true,
        recent_days: Some(7)
      }
    );
    assert_eq!(
      draft.datetime,
      NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| {
          d.and_hms_opt(0, 0, 0)
        })
    );
    assert!(draft.recurring);
    assert_eq!(
      draft.interval,
      Interval::Weekly
    );
    assert!(!draft.active);
  }

  #[test]
  fn zero_recent_days_is_not_historic() {
    let (_, draft) = decode_task(
      &attrs(&[
        ("taskId", "9"),
        ("chartType", "bandwidth"),
        ("recentDays", "0")
      ]),
      None,
      &chrono_tz::UTC
    )
    .expect("decode task");

    assert!(!draft.target.is_historic());
    assert_eq!(
      draft.target.recent_days(),
      None
    );
  }

  #[test]
  fn garbage_fields_fall_back_to_defaults(
  ) {
    let (id, draft) = decode_task(
      &attrs(&[
        ("testType", "icmp"),
        ("recentDays", "lots"),
        ("interval", "hourly"),
        ("datetime", "soon"),
        ("recurring", "yes")
      ]),
      Some("17"),
      &chrono_tz::UTC
    )
    .expect("decode task");

    assert_eq!(id.as_str(), "17");
    assert_eq!(
      draft.target,
      TaskTarget::Test {
        test_type: "icmp".to_string()
      }
    );
    assert_eq!(
      draft.interval,
      Interval::Daily
    );
    assert_eq!(draft.datetime, None);
    assert!(!draft.recurring);
    assert!(draft.active);
  }

  #[test]
  fn missing_id_is_an_error() {
    assert_eq!(
      decode_task(
        &attrs(&[("taskName", "x")]),
        None,
        &chrono_tz::UTC
      ),
      Err(DecodeError::MissingTaskId)
    );
  }
}
