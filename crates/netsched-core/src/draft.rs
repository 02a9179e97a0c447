use std::fmt;

use chrono::NaiveDateTime;
use netsched_shared::Interval;

use crate::error::DecodeError;

/// Identifier of a scheduled task as
/// rendered into `#task-<id>`.
///
/// Only URL-safe ids are accepted so the
/// edit URL can be built by plain
/// concatenation.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash,
)]
pub struct TaskId(String);

impl TaskId {
  pub fn parse(
    raw: &str
  ) -> Result<Self, DecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
      return Err(
        DecodeError::MissingTaskId
      );
    }
    if !raw.chars().all(|c| {
      c.is_ascii_alphanumeric()
        || c == '-'
        || c == '_'
    }) {
      return Err(
        DecodeError::InvalidTaskId(
          raw.to_string()
        )
      );
    }
    Ok(Self(raw.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub enum Mode {
  #[default]
  Create,
  Edit(TaskId)
}

impl Mode {
  pub fn task_id(
    &self
  ) -> Option<&TaskId> {
    match self {
      | Mode::Create => None,
      | Mode::Edit(id) => Some(id)
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum TaskKind {
  #[default]
  Test,
  Chart
}

impl TaskKind {
  /// Value of the `task_type` radio.
  pub fn form_value(
    self
  ) -> &'static str {
    match self {
      | TaskKind::Test => "test",
      | TaskKind::Chart => "chart"
    }
  }

  /// Anything other than `test` is a
  /// chart, same as the form's markup.
  pub fn from_form_value(
    raw: &str
  ) -> Self {
    if raw == "test" {
      TaskKind::Test
    } else {
      TaskKind::Chart
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum TaskTarget {
  Test {
    test_type: String
  },
  Chart {
    chart_type:  String,
    historic:    bool,
    recent_days: Option<u32>
  }
}

impl Default for TaskTarget {
  fn default() -> Self {
    TaskTarget::Test {
      test_type: String::new()
    }
  }
}

impl TaskTarget {
  pub fn kind(&self) -> TaskKind {
    match self {
      | TaskTarget::Test { .. } => {
        TaskKind::Test
      }
      | TaskTarget::Chart { .. } => {
        TaskKind::Chart
      }
    }
  }

  pub fn is_historic(&self) -> bool {
    matches!(
      self,
      TaskTarget::Chart {
        historic: true,
        ..
      }
    )
  }

  pub fn recent_days(
    &self
  ) -> Option<u32> {
    match self {
      | TaskTarget::Chart {
        recent_days,
        ..
      } => *recent_days,
      | TaskTarget::Test { .. } => None
    }
  }
}

/// The not-yet-submitted field set of
/// the task being created or edited.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskDraft {
  pub name:      String,
  pub target:    TaskTarget,
  pub datetime:  Option<NaiveDateTime>,
  pub recurring: bool,
  pub interval:  Interval,
  pub active:    bool
}

impl Default for TaskDraft {
  fn default() -> Self {
    Self {
      name:      String::new(),
      target:    TaskTarget::default(),
      datetime:  None,
      recurring: false,
      interval:  Interval::Daily,
      active:    true
    }
  }
}

impl TaskDraft {
  pub fn kind(&self) -> TaskKind {
    self.target.kind()
  }

  /// Recent-days is only revealed when
  /// there is a positive window to show.
  pub fn shows_recent_days(
    &self
  ) -> bool {
    self.target.is_historic()
      && self
        .target
        .recent_days()
        .is_some_and(|days| days > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn task_id_rejects_unsafe_chars() {
    assert_eq!(
      TaskId::parse("1712345678901")
        .expect("numeric id")
        .as_str(),
      "1712345678901"
    );
    assert_eq!(
      TaskId::parse("  "),
      Err(DecodeError::MissingTaskId)
    );
    assert!(matches!(
      TaskId::parse("1&id=2"),
      Err(DecodeError::InvalidTaskId(_))
    ));
  }

  #[test]
  fn mode_carries_id_only_when_editing(
  ) {
    assert_eq!(
      Mode::Create.task_id(),
      None
    );
    let id = TaskId::parse("42")
      .expect("valid id");
    assert_eq!(
      Mode::Edit(id.clone()).task_id(),
      Some(&id)
    );
  }

  #[test]
  fn recent_days_hidden_without_window(
  ) {
    let mut draft = TaskDraft {
      target: TaskTarget::Chart {
        chart_type:  "latency"
          .to_string(),
        historic:    true,
        recent_days: None
      },
      ..TaskDraft::default()
    };
    assert!(!draft.shows_recent_days());

    draft.target = TaskTarget::Chart {
      chart_type:  "latency".to_string(),
      historic:    true,
      recent_days: Some(3)
    };
    assert!(draft.shows_recent_days());
  }
}
