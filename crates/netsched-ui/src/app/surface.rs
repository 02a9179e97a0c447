use netsched_core::attributes::{
  ATTRIBUTES,
  TaskAttributes
};
use netsched_core::config::Selectors;
use netsched_core::datetime;
use netsched_core::form::{
  FIELD_ACTIVE,
  FIELD_CHART_TYPE,
  FIELD_DATETIME,
  FIELD_HISTORIC,
  FIELD_INTERVAL,
  FIELD_NAME,
  FIELD_RECENT_DAYS,
  FIELD_RECURRING,
  FIELD_TEST_TYPE,
  FIELDS,
  FormSnapshot
};
use netsched_core::surface::{
  FormSurface,
  Section
};
use netsched_core::{
  TaskDraft,
  TaskTarget
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  FormData,
  HtmlButtonElement,
  HtmlElement,
  HtmlFormElement,
  HtmlInputElement,
  HtmlSelectElement
};

use super::htmx;

pub(super) fn set_displayed(
  element: &Element,
  visible: bool
) {
  if let Some(element) =
    element.dyn_ref::<HtmlElement>()
  {
    let value =
      if visible { "block" } else { "none" };
    if let Err(error) = element
      .style()
      .set_property("display", value)
    {
      tracing::warn!(
        error = ?error,
        "failed to set display"
      );
    }
  }
}

pub(super) fn query_all(
  document: &Document,
  selector: &str
) -> Vec<Element> {
  let Ok(list) =
    document.query_selector_all(selector)
  else {
    tracing::warn!(
      selector,
      "invalid selector"
    );
    return vec![];
  };
  (0..list.length())
    .filter_map(|i| list.item(i))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

/// `data-*` attributes of a task element
/// that the decoder knows about.
pub(super) fn dataset_of(
  element: &Element
) -> Option<TaskAttributes> {
  let element =
    element.dyn_ref::<HtmlElement>()?;
  let dataset = element.dataset();
  Some(
    ATTRIBUTES
      .iter()
      .filter_map(|key| {
        dataset.get(key).map(|value| {
          (key.to_string(), value)
        })
      })
      .collect()
  )
}

/// The task modal as rendered by the
/// server. Elements are looked up on
/// every call since htmx may have
/// swapped them.
pub struct DomSurface {
  document:     Document,
  selectors:    Selectors,
  task_changed: String
}

impl DomSurface {
  pub fn new(
    document: Document,
    selectors: Selectors,
    task_changed: String
  ) -> Self {
    Self {
      document,
      selectors,
      task_changed
    }
  }

  fn modal(&self) -> Option<Element> {
    self
      .document
      .get_element_by_id(
        &self.selectors.modal_id
      )
  }

  fn form(
    &self
  ) -> Option<HtmlFormElement> {
    self
      .document
      .query_selector(&self.selectors.form)
      .ok()
      .flatten()
      .and_then(|el| {
        el.dyn_into::<HtmlFormElement>()
          .ok()
      })
  }

  fn input(
    &self,
    id: &str
  ) -> Option<HtmlInputElement> {
    self
      .document
      .get_element_by_id(id)
      .and_then(|el| {
        el.dyn_into::<HtmlInputElement>()
          .ok()
      })
  }

  fn select(
    &self,
    id: &str
  ) -> Option<HtmlSelectElement> {
    self
      .document
      .get_element_by_id(id)
      .and_then(|el| {
        el.dyn_into::<HtmlSelectElement>()
          .ok()
      })
  }

  fn set_value(
    &self,
    id: &str,
    value: &str
  ) {
    if let Some(input) = self.input(id) {
      input.set_value(value);
    } else if let Some(select) =
      self.select(id)
    {
      select.set_value(value);
    }
  }

  fn set_checked(
    &self,
    id: &str,
    checked: bool
  ) {
    if let Some(input) = self.input(id) {
      input.set_checked(checked);
    }
  }

  fn check_task_type(
    &self,
    value: &str
  ) {
    let selector = format!(
      "input[name=\"task_type\"][value=\"{value}\"]"
    );
    if let Some(radio) = self
      .document
      .query_selector(&selector)
      .ok()
      .flatten()
      .and_then(|el| {
        el.dyn_into::<HtmlInputElement>()
          .ok()
      })
    {
      radio.set_checked(true);
    }
  }
}

impl FormSurface for DomSurface {
  fn show_modal(&mut self) {
    if let Some(modal) = self.modal() {
      set_displayed(&modal, true);
    }
  }

  fn hide_modal(&mut self) {
    if let Some(modal) = self.modal() {
      set_displayed(&modal, false);
    }
  }

  fn set_title(&mut self, title: &str) {
    if let Some(heading) = self
      .document
      .query_selector(
        &self.selectors.title
      )
      .ok()
      .flatten()
    {
      heading.set_text_content(Some(title));
    }
  }

  fn reset_controls(&mut self) {
    if let Some(form) = self.form() {
      form.reset();
    }
  }

  fn write_draft(
    &mut self,
    draft: &TaskDraft
  ) {
    self.set_value(FIELD_NAME, &draft.name);
    self.check_task_type(
      draft.kind().form_value()
    );

    match &draft.target {
      | TaskTarget::Test { test_type } => {
        self.set_value(
          FIELD_TEST_TYPE,
          test_type
        );
      }
      | TaskTarget::Chart {
        chart_type,
        historic,
        recent_days
      } => {
        self.set_value(
          FIELD_CHART_TYPE,
          chart_type
        );
        if *historic
          && let Some(days) = recent_days
        {
          self.set_checked(
            FIELD_HISTORIC,
            true
          );
          self.set_value(
            FIELD_RECENT_DAYS,
            &days.to_string()
          );
        }
      }
    }

    if let Some(value) = &draft.datetime {
      self.set_value(
        FIELD_DATETIME,
        &datetime::format_input(value)
      );
    }
    self.set_checked(
      FIELD_RECURRING,
      draft.recurring
    );
    self.set_value(
      FIELD_INTERVAL,
      draft.interval.as_str()
    );
    self.set_checked(
      FIELD_ACTIVE,
      draft.active
    );
  }

  fn snapshot(&self) -> FormSnapshot {
    let mut snapshot = FormSnapshot::new();
    let Some(data) = self.form().and_then(
      |form| {
        FormData::new_with_form(&form).ok()
      }
    ) else {
      tracing::warn!(
        "task form missing; empty \
         snapshot"
      );
      return snapshot;
    };
    for name in FIELDS {
      if let Some(value) =
        data.get(name).as_string()
      {
        snapshot.set(name, value);
      }
    }
    snapshot
  }

  fn lookup_task(
    &self,
    task_id: &str
  ) -> Option<TaskAttributes> {
    let id = format!(
      "{}{task_id}",
      self.selectors.task_item_prefix
    );
    self
      .document
      .get_element_by_id(&id)
      .and_then(|el| dataset_of(&el))
  }

  fn set_section_visible(
    &mut self,
    section: Section,
    visible: bool
  ) {
    match section {
      | Section::TestFields => {
        for el in query_all(
          &self.document,
          &self.selectors.test_fields
        ) {
          set_displayed(&el, visible);
        }
      }
      | Section::ChartFields => {
        for el in query_all(
          &self.document,
          &self.selectors.chart_fields
        ) {
          set_displayed(&el, visible);
        }
      }
      | Section::RecentDays => {
        if let Some(el) = self
          .document
          .query_selector(
            &self
              .selectors
              .recent_days_field
          )
          .ok()
          .flatten()
        {
          set_displayed(&el, visible);
        }
      }
      | Section::IntervalGroup => {
        if let Some(el) = self
          .document
          .get_element_by_id(
            &self
              .selectors
              .interval_group_id
          )
        {
          set_displayed(&el, visible);
        }
      }
    }
  }

  fn set_busy(&mut self, busy: bool) {
    let button = self
      .form()
      .and_then(|form| {
        form
          .query_selector(
            &self.selectors.submit_button
          )
          .ok()
          .flatten()
      })
      .and_then(|el| {
        el.dyn_into::<HtmlButtonElement>()
          .ok()
      });
    if let Some(button) = button {
      button.set_disabled(busy);
    }
  }

  fn emit_task_changed(&mut self) {
    if let Some(body) = self.document.body()
    {
      htmx::trigger(
        &body,
        &self.task_changed
      );
    }
  }

  fn notify_user(
    &mut self,
    message: &str
  ) {
    gloo::dialogs::alert(message);
  }
}
