use chrono_tz::Tz;
use netsched_shared::ScheduleRequest;
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::attributes::{
  self,
  TaskAttributes
};
use crate::config::UiConfig;
use crate::draft::{
  Mode,
  TaskId
};
use crate::error::{
  ControllerError,
  TransportError
};
use crate::events::{
  self,
  AfterRequestDetail
};
use crate::request;
use crate::surface::{
  FormSurface,
  Section
};
use crate::visibility::FieldVisibility;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum Method {
  Post,
  Put
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Post => "POST",
      | Method::Put => "PUT"
    }
  }
}

/// A save the controller has committed
/// to; the caller performs the request
/// and reports back through
/// [`FormController::finish_submit`].
///
/// `session` names the opening of the
/// form the save belongs to. A result
/// for an older session no longer owns
/// the modal.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct PendingSubmit {
  pub method:  Method,
  pub url:     String,
  pub body:    ScheduleRequest,
  pub session: u64
}

/// The task modal: create/edit mode,
/// field visibility and request
/// construction.
///
/// One per page. The modal starts closed
/// in create mode and returns to create
/// mode whenever it closes.
pub struct FormController<S> {
  surface:    S,
  config:     UiConfig,
  tz:         Tz,
  open:       bool,
  mode:       Mode,
  submitting: bool,
  session:    u64
}

impl<S: FormSurface> FormController<S> {
  pub fn new(
    surface: S,
    config: UiConfig
  ) -> Self {
    let tz = config.timezone();
    Self {
      surface,
      config,
      tz,
      open: false,
      mode: Mode::Create,
      submitting: false,
      session: 0
    }
  }

  pub fn is_open(&self) -> bool {
    self.open
  }

  pub fn mode(&self) -> &Mode {
    &self.mode
  }

  pub fn task_id(
    &self
  ) -> Option<&TaskId> {
    self.mode.task_id()
  }

  pub fn is_submitting(&self) -> bool {
    self.submitting
  }

  /// Bumped every time the form opens or
  /// closes.
  pub fn session(&self) -> u64 {
    self.session
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn surface_mut(
    &mut self
  ) -> &mut S {
    &mut self.surface
  }

  #[tracing::instrument(skip_all)]
  pub fn open_for_create(&mut self) {
    info!("opening task form for create");
    self.begin_session();
    self.mode = Mode::Create;
    self.surface.reset_controls();
    self.sync_reset_visibility();
    self.surface.set_title(
      &self.config.labels.create_title
    );
    self.open = true;
    self.surface.show_modal();
  }

  #[tracing::instrument(skip(self))]
  pub fn open_for_edit(
    &mut self,
    task_id: &str
  ) -> Result<(), ControllerError> {
    let Some(attrs) =
      self.surface.lookup_task(task_id)
    else {
      error!(
        task_id,
        "could not find schedule item"
      );
      let notice =
        self.config.labels.not_found.clone();
      self.surface.notify_user(&notice);
      return Err(
        ControllerError::TaskNotFound(
          task_id.to_string()
        )
      );
    };
    self.edit_from(&attrs, Some(task_id))
  }

  /// Edit straight from an element's
  /// dataset, which must then carry its
  /// own `taskId`.
  #[tracing::instrument(skip_all)]
  pub fn open_for_edit_from(
    &mut self,
    attrs: &TaskAttributes
  ) -> Result<(), ControllerError> {
    self.edit_from(attrs, None)
  }

  fn edit_from(
    &mut self,
    attrs: &TaskAttributes,
    fallback_id: Option<&str>
  ) -> Result<(), ControllerError> {
    let (task_id, draft) =
      match attributes::decode_task(
        attrs,
        fallback_id,
        &self.tz
      ) {
        | Ok(decoded) => decoded,
        | Err(err) => {
          error!(error = %err, "rejecting task element");
          let notice = format!(
            "{}: {err}",
            self.config.labels.not_found
          );
          self.surface.notify_user(&notice);
          return Err(err.into());
        }
      };

    info!(task_id = %task_id, "opening task form for edit");
    self.begin_session();
    self.mode = Mode::Edit(task_id);

    self.surface.reset_controls();
    self.surface.write_draft(&draft);
    self.refresh_field_visibility();
    self.surface.set_section_visible(
      Section::IntervalGroup,
      draft.recurring
    );
    self.surface.set_section_visible(
      Section::RecentDays,
      draft.shows_recent_days()
    );

    self.surface.set_title(
      &self.config.labels.edit_title
    );
    self.open = true;
    self.surface.show_modal();
    Ok(())
  }

  /// Safe to call on a closed form; the
  /// draft is reset either way. A save
  /// still in flight is abandoned: its
  /// result will not touch the form.
  #[tracing::instrument(skip_all)]
  pub fn close(&mut self) {
    debug!(
      was_open = self.open,
      "closing task form"
    );
    self.begin_session();
    self.surface.hide_modal();
    self.surface.reset_controls();
    self.sync_reset_visibility();
    self.open = false;
    self.mode = Mode::Create;
  }

  pub fn on_backdrop_click(&mut self) {
    if self.open {
      self.close();
    }
  }

  /// Re-applies the kind/historic
  /// visibility rules to the form.
  pub fn refresh_field_visibility(
    &mut self
  ) {
    let snapshot = self.surface.snapshot();
    let Some(visibility) =
      FieldVisibility::from_snapshot(
        &snapshot
      )
    else {
      debug!(
        "no task type selected; leaving \
         field visibility alone"
      );
      return;
    };
    for (section, visible) in
      visibility.sections()
    {
      self
        .surface
        .set_section_visible(
          section, visible
        );
    }
  }

  pub fn on_task_type_changed(
    &mut self
  ) {
    self.refresh_field_visibility();
  }

  pub fn on_recurring_changed(
    &mut self,
    checked: bool
  ) {
    self.surface.set_section_visible(
      Section::IntervalGroup,
      checked
    );
  }

  pub fn on_historic_changed(
    &mut self
  ) {
    self.refresh_field_visibility();
  }

  /// Validates the form and commits to a
  /// save. At most one save is in flight;
  /// a second one is refused until
  /// [`Self::finish_submit`] runs.
  #[tracing::instrument(skip_all)]
  pub fn prepare_submit(
    &mut self
  ) -> Result<PendingSubmit, ControllerError>
  {
    if !self.open {
      warn!(
        "submit on a closed task form"
      );
      return Err(
        ControllerError::NotOpen
      );
    }
    if self.submitting {
      warn!(
        "ignoring submit while a save is \
         in flight"
      );
      return Err(
        ControllerError::SubmitInFlight
      );
    }

    let snapshot = self.surface.snapshot();
    let body = match request::build_request(
      &snapshot, &self.tz
    ) {
      | Ok(body) => body,
      | Err(err) => {
        warn!(error = %err, "task form failed validation");
        let notice = format!(
          "{}: {err}",
          self.config.labels.invalid_form
        );
        self.surface.notify_user(&notice);
        return Err(err.into());
      }
    };

    let (method, url) = match &self.mode
    {
      | Mode::Create => (
        Method::Post,
        self.config.endpoints.create.clone()
      ),
      | Mode::Edit(id) => (
        Method::Put,
        format!(
          "{}?id={id}",
          self.config.endpoints.edit
        )
      )
    };

    info!(
      method = method.as_str(),
      url = %url,
      ?body,
      "submitting task"
    );
    self.submitting = true;
    self.surface.set_busy(true);
    Ok(PendingSubmit {
      method,
      url,
      body,
      session: self.session
    })
  }

  /// Settles the save started by
  /// [`Self::prepare_submit`]. On failure
  /// the form stays open with its
  /// contents untouched.
  ///
  /// If the form was closed or reopened
  /// since, only the task list is
  /// refreshed on success and failures
  /// are logged without a notice.
  #[tracing::instrument(skip(self, outcome))]
  pub fn finish_submit<T>(
    &mut self,
    session: u64,
    outcome: Result<T, TransportError>
  ) -> Result<T, ControllerError> {
    if session != self.session {
      return self
        .settle_abandoned(session, outcome);
    }

    self.submitting = false;
    self.surface.set_busy(false);

    match outcome {
      | Ok(saved) => {
        info!("task saved");
        self.close();
        self.surface.emit_task_changed();
        Ok(saved)
      }
      | Err(err) => {
        error!(error = %err, status = ?err.status, "saving task failed");
        let notice = format!(
          "{}: {err}",
          self.config.labels.save_failed
        );
        self.surface.notify_user(&notice);
        Err(err.into())
      }
    }
  }

  /// Closes the form when htmx itself
  /// completed a write to the schedule
  /// endpoints.
  pub fn on_htmx_after_request(
    &mut self,
    detail: &AfterRequestDetail
  ) {
    if detail.successful
      && events::is_schedule_write(
        &detail.request_path,
        &self.config.endpoints.create,
        &self.config.endpoints.edit
      )
    {
      debug!(
        path = %detail.request_path,
        "htmx completed a schedule write"
      );
      self.close();
    }
  }

  fn settle_abandoned<T>(
    &mut self,
    session: u64,
    outcome: Result<T, TransportError>
  ) -> Result<T, ControllerError> {
    match outcome {
      | Ok(saved) => {
        info!(
          session,
          current = self.session,
          "task saved after its form closed"
        );
        self.surface.emit_task_changed();
        Ok(saved)
      }
      | Err(err) => {
        warn!(
          session,
          current = self.session,
          error = %err,
          "abandoned save failed"
        );
        Err(err.into())
      }
    }
  }

  /// Starts a new opening of the form and
  /// releases any in-flight guard held by
  /// the previous one.
  fn begin_session(&mut self) {
    self.session =
      self.session.wrapping_add(1);
    if self.submitting {
      debug!(
        "abandoning in-flight save"
      );
      self.submitting = false;
      self.surface.set_busy(false);
    }
  }

  /// After `form.reset()` the kind radio
  /// and the recurring box are back at
  /// their rendered defaults; make the
  /// groups agree with them.
  fn sync_reset_visibility(&mut self) {
    self.refresh_field_visibility();
    let recurring =
      self.surface.snapshot().recurring();
    self.surface.set_section_visible(
      Section::IntervalGroup,
      recurring
    );
  }
}
