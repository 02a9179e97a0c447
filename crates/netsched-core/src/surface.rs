use crate::attributes::TaskAttributes;
use crate::draft::TaskDraft;
use crate::form::FormSnapshot;

/// Independently shown or hidden parts
/// of the task form.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub enum Section {
  TestFields,
  ChartFields,
  RecentDays,
  IntervalGroup
}

/// Everything the controller needs from
/// the page. The browser implementation
/// talks to the DOM and htmx; tests use
/// an in-memory form.
///
/// Implementations must not call back
/// into the controller.
pub trait FormSurface {
  fn show_modal(&mut self);

  fn hide_modal(&mut self);

  fn set_title(&mut self, title: &str);

  /// Restore every control to the value
  /// it was rendered with.
  fn reset_controls(&mut self);

  fn write_draft(
    &mut self,
    draft: &TaskDraft
  );

  fn snapshot(&self) -> FormSnapshot;

  /// Dataset of the task element
  /// rendered for `task_id`, if any.
  fn lookup_task(
    &self,
    task_id: &str
  ) -> Option<TaskAttributes>;

  fn set_section_visible(
    &mut self,
    section: Section,
    visible: bool
  );

  /// Whether a save request is in
  /// flight; the page may disable its
  /// submit button meanwhile.
  fn set_busy(&mut self, busy: bool);

  /// Broadcast that the task list is
  /// stale.
  fn emit_task_changed(&mut self);

  /// Blocking, user-visible notice.
  fn notify_user(
    &mut self,
    message: &str
  );
}
