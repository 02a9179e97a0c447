use netsched_core::config::CarouselSelectors;
use netsched_core::navigator::{
  self,
  Direction,
  NavigatorFrame,
  PanelNavigator
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlButtonElement,
  HtmlElement
};

use super::htmx;
use super::surface::query_all;

/// The accordion carousel on the results
/// page.
pub struct Carousel {
  document:   Document,
  selectors:  CarouselSelectors,
  lazy_event: String,
  navigator:  PanelNavigator
}

impl Carousel {
  pub fn new(
    document: Document,
    selectors: CarouselSelectors,
    lazy_event: String
  ) -> Self {
    Self {
      document,
      selectors,
      lazy_event,
      navigator: PanelNavigator::new()
    }
  }

  pub fn step(
    &mut self,
    direction: Direction
  ) -> NavigatorFrame {
    let panels = query_all(
      &self.document,
      &self.selectors.panels
    );
    let frame = self
      .navigator
      .step(direction, panels.len());

    self.apply_transform(&frame);
    self.set_button_disabled(
      &self.selectors.prev,
      frame.prev_disabled
    );
    self.set_button_disabled(
      &self.selectors.next,
      frame.next_disabled
    );

    if let Some(panel) =
      panels.get(frame.cursor)
    {
      self.load_pending_charts(panel);
    }
    frame
  }

  fn apply_transform(
    &self,
    frame: &NavigatorFrame
  ) {
    let container = self
      .document
      .query_selector(
        &self.selectors.container
      )
      .ok()
      .flatten()
      .and_then(|el| {
        el.dyn_into::<HtmlElement>().ok()
      });
    let Some(container) = container else {
      tracing::warn!(
        selector = %self.selectors.container,
        "carousel container missing"
      );
      return;
    };
    if let Err(error) = container
      .style()
      .set_property(
        "transform",
        &frame.transform()
      )
    {
      tracing::warn!(
        error = ?error,
        "failed to move carousel"
      );
    }
  }

  fn set_button_disabled(
    &self,
    selector: &str,
    disabled: bool
  ) {
    if let Some(button) = self
      .document
      .query_selector(selector)
      .ok()
      .flatten()
      .and_then(|el| {
        el.dyn_into::<HtmlButtonElement>()
          .ok()
      })
    {
      button.set_disabled(disabled);
    }
  }

  fn load_pending_charts(
    &self,
    panel: &Element
  ) {
    let Ok(list) = panel
      .query_selector_all(
        &self.selectors.lazy_load
      )
    else {
      return;
    };
    for chart in (0..list.length())
      .filter_map(|i| list.item(i))
      .filter_map(|node| {
        node.dyn_into::<Element>().ok()
      })
    {
      if navigator::needs_lazy_load(
        &chart.inner_html(),
        &self.selectors.rendered_marker
      ) {
        tracing::debug!(
          id = %chart.id(),
          "triggering lazy chart load"
        );
        htmx::trigger(
          &chart,
          &self.lazy_event
        );
      }
    }
  }
}
