use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};
use thiserror::Error;

/// Recurrence cadence understood by the
/// scheduler backend.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
  #[default]
  Daily,
  Weekly,
  Monthly,
  Bimonthly,
  Biannually,
  Annually
}

impl Interval {
  pub const ALL: [Interval; 6] = [
    Interval::Daily,
    Interval::Weekly,
    Interval::Monthly,
    Interval::Bimonthly,
    Interval::Biannually,
    Interval::Annually
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | Interval::Daily => "daily",
      | Interval::Weekly => "weekly",
      | Interval::Monthly => "monthly",
      | Interval::Bimonthly => {
        "bimonthly"
      }
      | Interval::Biannually => {
        "biannually"
      }
      | Interval::Annually => {
        "annually"
      }
    }
  }
}

impl fmt::Display for Interval {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
#[error("unknown interval: {0}")]
pub struct UnknownInterval(
  pub String
);

impl FromStr for Interval {
  type Err = UnknownInterval;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let raw = s.trim();
    Interval::ALL
      .into_iter()
      .find(|interval| {
        interval
          .as_str()
          .eq_ignore_ascii_case(raw)
      })
      .ok_or_else(|| {
        UnknownInterval(raw.to_string())
      })
  }
}

/// Body of `POST /schedule/create` and
/// `PUT /schedule/edit?id=<id>`.
///
/// Exactly one of `test_type` and
/// `chart_type` is set; `recent_days`
/// only ever rides along with a chart.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ScheduleRequest {
  pub name:        String,
  pub datetime:    String,
  pub recurring:   bool,
  pub interval:    Interval,
  pub active:      bool,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub test_type:   Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub chart_type:  Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub recent_days: Option<u32>
}

/// Task as echoed back by the server
/// after a create or edit.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ScheduledTaskDto {
  #[serde(default)]
  pub name:        String,
  #[serde(default)]
  pub test_type:   Option<String>,
  #[serde(default)]
  pub chart_type:  Option<String>,
  #[serde(default)]
  pub recent_days: Option<i64>,
  #[serde(default)]
  pub datetime:    Option<String>,
  #[serde(default)]
  pub recurring:   bool,
  #[serde(default)]
  pub interval:    Option<String>,
  #[serde(default)]
  pub active:      bool,
  #[serde(default)]
  pub last_ran:    Option<String>,
  #[serde(default)]
  pub created_on:  Option<String>
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn chart_request_omits_test_type() {
    let request = ScheduleRequest {
      name:        "Nightly".to_string(),
      datetime:
        "2024-01-01T00:00:00.000Z"
          .to_string(),
      recurring:   true,
      interval:    Interval::Daily,
      active:      true,
      test_type:   None,
      chart_type:  Some(
        "latency".to_string()
      ),
      recent_days: Some(7)
    };

    let value =
      serde_json::to_value(&request)
        .expect("serialize request");
    assert_eq!(
      value,
      json!({
        "name": "Nightly",
        "datetime": "2024-01-01T00:00:00.000Z",
        "recurring": true,
        "interval": "daily",
        "active": true,
        "chart_type": "latency",
        "recent_days": 7
      })
    );
  }

  #[test]
  fn test_request_has_no_chart_fields() {
    let request = ScheduleRequest {
      name:        "Probe".to_string(),
      datetime:
        "2024-03-05T10:30:00.000Z"
          .to_string(),
      recurring:   false,
      interval:    Interval::Weekly,
      active:      false,
      test_type:   Some(
        "icmp".to_string()
      ),
      chart_type:  None,
      recent_days: None
    };

    let value =
      serde_json::to_value(&request)
        .expect("serialize request");
    let object = value
      .as_object()
      .expect("request is an object");
    assert!(
      !object.contains_key("chart_type")
    );
    assert!(
      !object.contains_key("recent_days")
    );
    assert_eq!(
      object["interval"],
      json!("weekly")
    );
  }

  #[test]
  fn interval_parses_case_insensitively(
  ) {
    assert_eq!(
      " Biannually "
        .parse::<Interval>()
        .expect("parse interval"),
      Interval::Biannually
    );
    let err = "fortnightly"
      .parse::<Interval>()
      .expect_err("unknown interval");
    assert_eq!(
      err.to_string(),
      "unknown interval: fortnightly"
    );
  }

  #[test]
  fn server_echo_tolerates_sparse_fields(
  ) {
    let dto: ScheduledTaskDto =
      serde_json::from_value(json!({
        "name": "Nightly",
        "chart_type": "latency",
        "recent_days": 7,
        "datetime": "2024-01-01T00:00:00Z",
        "recurring": true,
        "interval": "daily",
        "active": true,
        "created_on": "2023-12-31T12:00:00Z"
      }))
      .expect("decode server echo");

    assert_eq!(dto.test_type, None);
    assert_eq!(
      dto.chart_type.as_deref(),
      Some("latency")
    );
    assert_eq!(dto.recent_days, Some(7));
    assert_eq!(dto.last_ran, None);
  }
}
