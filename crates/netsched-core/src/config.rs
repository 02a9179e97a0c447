use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{
  error,
  info,
  warn
};

/// Page wiring for the schedule form:
/// where requests go, which elements to
/// drive and what to tell the user.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct UiConfig {
  pub version:   u32,
  /// Zone the `datetime-local` input is
  /// read in.
  pub timezone:  String,
  pub endpoints: Endpoints,
  pub selectors: Selectors,
  pub carousel:  CarouselSelectors,
  pub events:    EventNames,
  pub labels:    Labels
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct Endpoints {
  pub create: String,
  pub edit:   String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct Selectors {
  pub modal_id:          String,
  pub form:              String,
  pub title:             String,
  pub submit_button:     String,
  pub task_item_prefix:  String,
  pub test_fields:       String,
  pub chart_fields:      String,
  pub recent_days_field: String,
  pub interval_group_id: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct CarouselSelectors {
  pub container:       String,
  pub panels:          String,
  pub prev:            String,
  pub next:            String,
  pub lazy_load:       String,
  /// Markup whose presence means a lazy
  /// placeholder already rendered.
  pub rendered_marker: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct EventNames {
  pub task_changed: String,
  pub lazy_load:    String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct Labels {
  pub create_title: String,
  pub edit_title:   String,
  pub not_found:    String,
  pub save_failed:  String,
  pub invalid_form: String
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      version:   1,
      timezone:  default_timezone(),
      endpoints: Endpoints::default(),
      selectors: Selectors::default(),
      carousel:  CarouselSelectors::default(),
      events:    EventNames::default(),
      labels:    Labels::default()
    }
  }
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      create: "/schedule/create"
        .to_string(),
      edit:   "/schedule/edit"
        .to_string()
    }
  }
}

impl Default for Selectors {
  fn default() -> Self {
    Self {
      modal_id:          "task-modal"
        .to_string(),
      form:              ".task-form"
        .to_string(),
      title:             "#task-modal h3"
        .to_string(),
      submit_button:
        "button[type=\"submit\"]"
          .to_string(),
      task_item_prefix:  "task-"
        .to_string(),
      test_fields:       ".test-field"
        .to_string(),
      chart_fields:      ".chart-field"
        .to_string(),
      recent_days_field:
        ".recent-days-field".to_string(),
      interval_group_id:
        "interval-group".to_string()
    }
  }
}

impl Default for CarouselSelectors {
  fn default() -> Self {
    Self {
      container:       ".carousel-container"
        .to_string(),
      panels:          ".accordion-item"
        .to_string(),
      prev:            ".carousel-nav.prev"
        .to_string(),
      next:            ".carousel-nav.next"
        .to_string(),
      lazy_load:
        "[hx-trigger=\"load\"]"
          .to_string(),
      rendered_marker: "svg".to_string()
    }
  }
}

impl Default for EventNames {
  fn default() -> Self {
    Self {
      task_changed: "taskChanged"
        .to_string(),
      lazy_load:    "load".to_string()
    }
  }
}

impl Default for Labels {
  fn default() -> Self {
    Self {
      create_title: "Add New Task"
        .to_string(),
      edit_title:   "Edit Task"
        .to_string(),
      not_found:
        "Error: Could not find task data"
          .to_string(),
      save_failed:  "Error saving task"
        .to_string(),
      invalid_form: "Please check the \
                     task form"
        .to_string()
    }
  }
}

fn default_timezone() -> String {
  "UTC".to_string()
}

fn restore_blank(
  value: &mut String,
  fallback: String
) {
  if value.trim().is_empty() {
    *value = fallback;
  }
}

impl UiConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<UiConfig>(raw)
        .context(
          "failed to parse schedule \
           form config"
        )?;
    config.sanitize();
    Ok(config)
  }

  /// Parses the embedded config, logging
  /// and falling back to defaults when it
  /// is unusable.
  pub fn load(raw: &str) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(config) => {
        info!(
          version = config.version,
          timezone = %config.timezone,
          create = %config.endpoints.create,
          edit = %config.endpoints.edit,
          "loaded schedule form config"
        );
        config
      }
      | Err(error) => {
        error!(error = %format!("{error:#}"), "failed parsing schedule form config; using defaults");
        UiConfig::default()
      }
    }
  }

  /// Blank strings would make selectors
  /// match nothing; put the defaults
  /// back.
  pub fn sanitize(&mut self) {
    restore_blank(
      &mut self.timezone,
      default_timezone()
    );

    let endpoints = Endpoints::default();
    restore_blank(
      &mut self.endpoints.create,
      endpoints.create
    );
    restore_blank(
      &mut self.endpoints.edit,
      endpoints.edit
    );

    let selectors = Selectors::default();
    let s = &mut self.selectors;
    restore_blank(
      &mut s.modal_id,
      selectors.modal_id
    );
    restore_blank(
      &mut s.form,
      selectors.form
    );
    restore_blank(
      &mut s.title,
      selectors.title
    );
    restore_blank(
      &mut s.submit_button,
      selectors.submit_button
    );
    restore_blank(
      &mut s.task_item_prefix,
      selectors.task_item_prefix
    );
    restore_blank(
      &mut s.test_fields,
      selectors.test_fields
    );
    restore_blank(
      &mut s.chart_fields,
      selectors.chart_fields
    );
    restore_blank(
      &mut s.recent_days_field,
      selectors.recent_days_field
    );
    restore_blank(
      &mut s.interval_group_id,
      selectors.interval_group_id
    );

    let carousel =
      CarouselSelectors::default();
    let c = &mut self.carousel;
    restore_blank(
      &mut c.container,
      carousel.container
    );
    restore_blank(
      &mut c.panels,
      carousel.panels
    );
    restore_blank(
      &mut c.prev,
      carousel.prev
    );
    restore_blank(
      &mut c.next,
      carousel.next
    );
    restore_blank(
      &mut c.lazy_load,
      carousel.lazy_load
    );
    restore_blank(
      &mut c.rendered_marker,
      carousel.rendered_marker
    );

    let events = EventNames::default();
    restore_blank(
      &mut self.events.task_changed,
      events.task_changed
    );
    restore_blank(
      &mut self.events.lazy_load,
      events.lazy_load
    );

    let labels = Labels::default();
    let l = &mut self.labels;
    restore_blank(
      &mut l.create_title,
      labels.create_title
    );
    restore_blank(
      &mut l.edit_title,
      labels.edit_title
    );
    restore_blank(
      &mut l.not_found,
      labels.not_found
    );
    restore_blank(
      &mut l.save_failed,
      labels.save_failed
    );
    restore_blank(
      &mut l.invalid_form,
      labels.invalid_form
    );
  }

  pub fn timezone(&self) -> Tz {
    match self.timezone.trim().parse::<Tz>()
    {
      | Ok(tz) => tz,
      | Err(error) => {
        warn!(
          timezone = %self.timezone,
          %error,
          "unknown timezone; using UTC"
        );
        chrono_tz::UTC
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let config =
      UiConfig::from_toml_str("")
        .expect("parse empty config");
    assert_eq!(config, UiConfig::default());
    assert_eq!(
      config.timezone(),
      chrono_tz::UTC
    );
  }

  #[test]
  fn partial_sections_keep_other_defaults(
  ) {
    let config = UiConfig::from_toml_str(
      r#"
timezone = "Europe/London"

[endpoints]
create = "/api/schedule/create"

[labels]
edit_title = ""
"#
    )
    .expect("parse config");

    assert_eq!(
      config.endpoints.create,
      "/api/schedule/create"
    );
    assert_eq!(
      config.endpoints.edit,
      "/schedule/edit"
    );
    assert_eq!(
      config.labels.edit_title,
      "Edit Task"
    );
    assert_eq!(
      config.timezone(),
      chrono_tz::Europe::London
    );
  }

  #[test]
  fn unknown_timezone_falls_back_to_utc()
  {
    let config = UiConfig {
      timezone: "Mars/Olympus_Mons"
        .to_string(),
      ..UiConfig::default()
    };
    assert_eq!(
      config.timezone(),
      chrono_tz::UTC
    );
  }

  #[test]
  fn malformed_document_falls_back() {
    assert!(
      UiConfig::from_toml_str(
        "timezone = [",
      )
      .is_err()
    );
    assert_eq!(
      UiConfig::load("version = \"x\""),
      UiConfig::default()
    );
  }
}
