use tracing::debug;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum Direction {
  Previous,
  Next
}

impl Direction {
  /// Maps the `-1` / `+1` step used by
  /// the page's prev/next buttons. Other
  /// steps are rejected.
  pub fn from_step(
    step: i32
  ) -> Option<Self> {
    match step {
      | -1 => Some(Direction::Previous),
      | 1 => Some(Direction::Next),
      | _ => None
    }
  }
}

/// Visual state after a move.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct NavigatorFrame {
  pub cursor:         usize,
  pub offset_percent: usize,
  pub prev_disabled:  bool,
  pub next_disabled:  bool
}

impl NavigatorFrame {
  /// CSS `transform` for the panel strip.
  pub fn transform(&self) -> String {
    format!(
      "translateX(-{}%)",
      self.offset_percent
    )
  }
}

/// Cursor over a strip of panels shown
/// one at a time.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct PanelNavigator {
  cursor: usize
}

impl PanelNavigator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  /// Moves one panel in `direction`,
  /// clamped to `[0, panel_count - 1]`.
  ///
  /// The count is taken per call since
  /// the page may have swapped panels in
  /// or out since the last move.
  pub fn step(
    &mut self,
    direction: Direction,
    panel_count: usize
  ) -> NavigatorFrame {
    let last =
      panel_count.saturating_sub(1);
    self.cursor = match direction {
      | Direction::Previous => {
        self.cursor.saturating_sub(1)
      }
      | Direction::Next => {
        self.cursor.saturating_add(1)
      }
    }
    .min(last);

    let frame = NavigatorFrame {
      cursor:         self.cursor,
      offset_percent: self.cursor * 100,
      prev_disabled:  self.cursor == 0,
      next_disabled:  panel_count == 0
        || self.cursor == last
    };
    debug!(
      ?direction,
      panel_count,
      cursor = frame.cursor,
      "moved panel navigator"
    );
    frame
  }
}

/// A lazy placeholder still needs its
/// load triggered while its markup lacks
/// the rendered marker.
pub fn needs_lazy_load(
  inner_html: &str,
  rendered_marker: &str
) -> bool {
  !inner_html.contains(rendered_marker)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_steps_other_than_one() {
    assert_eq!(
      Direction::from_step(-1),
      Some(Direction::Previous)
    );
    assert_eq!(
      Direction::from_step(1),
      Some(Direction::Next)
    );
    assert_eq!(
      Direction::from_step(0),
      None
    );
    assert_eq!(
      Direction::from_step(2),
      None
    );
  }

  #[test]
  fn walks_and_clamps_at_both_ends() {
    let mut nav = PanelNavigator::new();

    let frame =
      nav.step(Direction::Previous, 3);
    assert_eq!(frame.cursor, 0);
    assert!(frame.prev_disabled);
    assert!(!frame.next_disabled);

    nav.step(Direction::Next, 3);
    let frame =
      nav.step(Direction::Next, 3);
    assert_eq!(frame.cursor, 2);
    assert_eq!(
      frame.transform(),
      "translateX(-200%)"
    );
    assert!(frame.next_disabled);
    assert!(!frame.prev_disabled);

    let frame =
      nav.step(Direction::Next, 3);
    assert_eq!(frame.cursor, 2);
  }

  #[test]
  fn cursor_stays_in_range_on_any_walk() {
    // Deterministic pseudo-random walk
    // over a few strip lengths.
    let mut seed: u32 = 0x2545_f491;
    for panel_count in 1..=6 {
      let mut nav = PanelNavigator::new();
      for _ in 0..200 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let direction = if seed & 1 == 0 {
          Direction::Previous
        } else {
          Direction::Next
        };
        let frame =
          nav.step(direction, panel_count);
        assert!(frame.cursor < panel_count);
        assert_eq!(
          frame.prev_disabled,
          frame.cursor == 0
        );
        assert_eq!(
          frame.next_disabled,
          frame.cursor == panel_count - 1
        );
        assert_eq!(
          frame.offset_percent,
          frame.cursor * 100
        );
      }
    }
  }

  #[test]
  fn single_panel_disables_both() {
    let mut nav = PanelNavigator::new();
    let frame =
      nav.step(Direction::Next, 1);
    assert_eq!(frame.cursor, 0);
    assert!(frame.prev_disabled);
    assert!(frame.next_disabled);
  }

  #[test]
  fn empty_strip_and_shrinking_strip() {
    let mut nav = PanelNavigator::new();
    let frame =
      nav.step(Direction::Next, 0);
    assert_eq!(frame.cursor, 0);
    assert!(frame.prev_disabled);
    assert!(frame.next_disabled);

    for _ in 0..4 {
      nav.step(Direction::Next, 5);
    }
    assert_eq!(nav.cursor(), 4);
    let frame =
      nav.step(Direction::Previous, 2);
    assert_eq!(frame.cursor, 1);
    assert!(frame.next_disabled);
  }

  #[test]
  fn rendered_placeholders_are_skipped() {
    assert!(needs_lazy_load(
      "<div class=\"spinner\"></div>",
      "svg"
    ));
    assert!(!needs_lazy_load(
      "<svg viewBox=\"0 0 10 10\"></svg>",
      "svg"
    ));
  }
}
