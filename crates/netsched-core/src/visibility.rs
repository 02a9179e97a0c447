use crate::draft::TaskKind;
use crate::form::FormSnapshot;
use crate::surface::Section;

/// Which kind-dependent groups of the
/// form are displayed.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct FieldVisibility {
  pub test_fields:  bool,
  pub chart_fields: bool,
  pub recent_days:  bool
}

impl FieldVisibility {
  /// A test task never shows chart
  /// fields or the recent-days input,
  /// whatever state the hidden historic
  /// checkbox was left in.
  pub fn for_kind(
    kind: TaskKind,
    historic: bool
  ) -> Self {
    match kind {
      | TaskKind::Test => Self {
        test_fields:  true,
        chart_fields: false,
        recent_days:  false
      },
      | TaskKind::Chart => Self {
        test_fields: false,
        chart_fields: true,
        recent_days: historic
      }
    }
  }

  /// `None` when no kind is selected, in
  /// which case the form is left alone.
  pub fn from_snapshot(
    snapshot: &FormSnapshot
  ) -> Option<Self> {
    snapshot.kind().map(|kind| {
      Self::for_kind(
        kind,
        snapshot.historic()
      )
    })
  }

  pub fn sections(
    self
  ) -> [(Section, bool); 3] {
    [
      (
        Section::TestFields,
        self.test_fields
      ),
      (
        Section::ChartFields,
        self.chart_fields
      ),
      (
        Section::RecentDays,
        self.recent_days
      )
    ]
  }
}
