use std::collections::BTreeMap;

use crate::datetime;
use crate::draft::{
  TaskDraft,
  TaskKind,
  TaskTarget
};

pub const FIELD_NAME: &str = "name";
pub const FIELD_TASK_TYPE: &str =
  "task_type";
pub const FIELD_TEST_TYPE: &str =
  "test_type";
pub const FIELD_CHART_TYPE: &str =
  "chart_type";
pub const FIELD_HISTORIC: &str =
  "historic";
pub const FIELD_RECENT_DAYS: &str =
  "recent_days";
pub const FIELD_DATETIME: &str =
  "datetime";
pub const FIELD_RECURRING: &str =
  "recurring";
pub const FIELD_INTERVAL: &str =
  "interval";
pub const FIELD_ACTIVE: &str = "active";

pub const FIELDS: [&str; 10] = [
  FIELD_NAME,
  FIELD_TASK_TYPE,
  FIELD_TEST_TYPE,
  FIELD_CHART_TYPE,
  FIELD_HISTORIC,
  FIELD_RECENT_DAYS,
  FIELD_DATETIME,
  FIELD_RECURRING,
  FIELD_INTERVAL,
  FIELD_ACTIVE
];

/// Value submitted by a checked
/// checkbox without a `value` attribute.
pub const CHECKED: &str = "on";

/// What `new FormData(form)` would see:
/// successful controls only, so an
/// unchecked checkbox is simply absent.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct FormSnapshot {
  values: BTreeMap<String, String>
}

impl FormSnapshot {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(
    &mut self,
    name: &str,
    value: impl Into<String>
  ) {
    self
      .values
      .insert(name.to_string(), value.into());
  }

  pub fn with(
    mut self,
    name: &str,
    value: impl Into<String>
  ) -> Self {
    self.set(name, value);
    self
  }

  pub fn get(
    &self,
    name: &str
  ) -> Option<&str> {
    self
      .values
      .get(name)
      .map(String::as_str)
  }

  pub fn is_checked(
    &self,
    name: &str
  ) -> bool {
    self.get(name) == Some(CHECKED)
  }

  /// `None` when no `task_type` radio is
  /// selected.
  pub fn kind(&self) -> Option<TaskKind> {
    self
      .get(FIELD_TASK_TYPE)
      .map(TaskKind::from_form_value)
  }

  pub fn historic(&self) -> bool {
    self.is_checked(FIELD_HISTORIC)
  }

  pub fn recurring(&self) -> bool {
    self.is_checked(FIELD_RECURRING)
  }

  /// The snapshot a form populated from
  /// `draft` would produce. Both sub-type
  /// selects stay successful controls
  /// even while hidden, so the inactive
  /// one is carried as an empty string.
  pub fn from_draft(
    draft: &TaskDraft
  ) -> Self {
    let mut snapshot = FormSnapshot::new()
      .with(FIELD_NAME, draft.name.clone())
      .with(
        FIELD_TASK_TYPE,
        draft.kind().form_value()
      )
      .with(
        FIELD_INTERVAL,
        draft.interval.as_str()
      )
      .with(
        FIELD_DATETIME,
        draft
          .datetime
          .as_ref()
          .map(datetime::format_input)
          .unwrap_or_default()
      );

    match &draft.target {
      | TaskTarget::Test { test_type } => {
        snapshot.set(
          FIELD_TEST_TYPE,
          test_type.clone()
        );
        snapshot
          .set(FIELD_CHART_TYPE, "");
        snapshot
          .set(FIELD_RECENT_DAYS, "");
      }
      | TaskTarget::Chart {
        chart_type,
        historic,
        recent_days
      } => {
        snapshot.set(FIELD_TEST_TYPE, "");
        snapshot.set(
          FIELD_CHART_TYPE,
          chart_type.clone()
        );
        if *historic {
          snapshot
            .set(FIELD_HISTORIC, CHECKED);
        }
        snapshot.set(
          FIELD_RECENT_DAYS,
          recent_days
            .map(|days| days.to_string())
            .unwrap_or_default()
        );
      }
    }

    if draft.recurring {
      snapshot
        .set(FIELD_RECURRING, CHECKED);
    }
    if draft.active {
      snapshot.set(FIELD_ACTIVE, CHECKED);
    }

    snapshot
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unchecked_boxes_are_absent() {
    let draft = TaskDraft {
      active: false,
      ..TaskDraft::default()
    };
    let snapshot =
      FormSnapshot::from_draft(&draft);

    assert_eq!(
      snapshot.get(FIELD_ACTIVE),
      None
    );
    assert!(!snapshot.recurring());
    assert_eq!(
      snapshot.kind(),
      Some(TaskKind::Test)
    );
  }

  #[test]
  fn unknown_radio_value_means_chart() {
    let snapshot = FormSnapshot::new()
      .with(FIELD_TASK_TYPE, "anything");
    assert_eq!(
      snapshot.kind(),
      Some(TaskKind::Chart)
    );
    assert_eq!(
      FormSnapshot::new().kind(),
      None
    );
  }
}
