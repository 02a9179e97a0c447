mod carousel;
mod htmx;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console::log;
use gloo::events::{
  EventListener,
  EventListenerOptions
};
use js_sys::Reflect;
use netsched_core::config::UiConfig;
use netsched_core::events::{
  AfterRequestDetail,
  CHANGE,
  CLICK,
  HTMX_AFTER_REQUEST,
  HTMX_BEFORE_REQUEST
};
use netsched_core::form::{
  FIELD_HISTORIC,
  FIELD_RECURRING,
  FIELD_TASK_TYPE
};
use netsched_core::{
  ControllerError,
  Direction,
  FormController
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
  CustomEvent,
  Element,
  Event,
  HtmlInputElement,
  Window
};

use crate::api;
use carousel::Carousel;
use surface::DomSurface;

const SCHEDULE_FORM_TOML: &str =
  include_str!(
    "../assets/schedule-form.toml"
  );

type Controller =
  Rc<RefCell<FormController<DomSurface>>>;

/// Loads the config, builds the
/// controller and carousel, and wires
/// them to the page.
pub fn start() {
  let Some(window) = web_sys::window()
  else {
    return;
  };
  let Some(document) = window.document()
  else {
    return;
  };
  let Some(body) = document.body() else {
    tracing::error!(
      "document has no body; schedule \
       form controller not mounted"
    );
    return;
  };

  let config = Rc::new(UiConfig::load(
    SCHEDULE_FORM_TOML
  ));

  let controller: Controller =
    Rc::new(RefCell::new(
      FormController::new(
        DomSurface::new(
          document.clone(),
          config.selectors.clone(),
          config.events.task_changed.clone()
        ),
        (*config).clone()
      )
    ));
  let carousel =
    Rc::new(RefCell::new(Carousel::new(
      document.clone(),
      config.carousel.clone(),
      config.events.lazy_load.clone()
    )));

  listen_before_request(
    &body,
    &config,
    &controller
  );
  listen_after_request(
    &body,
    &controller
  );
  listen_form_changes(
    &document,
    &config,
    &controller
  );
  listen_backdrop_click(
    &window,
    &config,
    &controller
  );

  if let Err(error) = install_globals(
    &window,
    &controller,
    &carousel
  ) {
    tracing::error!(
      error = ?error,
      "failed to install page entry \
       points"
    );
  }

  with_controller(
    &controller,
    "init",
    |ctl| ctl.refresh_field_visibility()
  );
  ui_debug(
    "app.mounted",
    "schedule form controller ready"
  );
}

/// Runs `f` unless the controller is
/// already borrowed further up the
/// stack, e.g. by an htmx event raised
/// from inside a controller call.
fn with_controller<R>(
  controller: &Controller,
  what: &str,
  f: impl FnOnce(
    &mut FormController<DomSurface>
  ) -> R
) -> Option<R> {
  match controller.try_borrow_mut() {
    | Ok(mut ctl) => Some(f(&mut ctl)),
    | Err(_) => {
      tracing::warn!(
        what,
        "controller busy; dropping \
         re-entrant call"
      );
      None
    }
  }
}

fn submit(controller: &Controller) {
  let pending = match with_controller(
    controller,
    "submit",
    |ctl| ctl.prepare_submit()
  ) {
    | Some(Ok(pending)) => pending,
    | Some(Err(err)) => {
      tracing::debug!(error = %err, "submit not sent");
      return;
    }
    | None => return
  };

  let controller = controller.clone();
  wasm_bindgen_futures::spawn_local(
    async move {
      let outcome =
        api::send_schedule(&pending)
          .await;
      match with_controller(
        &controller,
        "finish_submit",
        |ctl| {
          ctl.finish_submit(
            pending.session,
            outcome
          )
        }
      ) {
        | Some(Ok(_)) => ui_debug(
          "submit.saved",
          &pending.url
        ),
        | Some(Err(
          ControllerError::Transport(err)
        )) => {
          tracing::debug!(error = %err, "save left form open");
        }
        | Some(Err(err)) => {
          tracing::error!(error = %err, "unexpected submit outcome");
        }
        | None => tracing::error!(
          "could not settle save; form \
           stays busy"
        )
      }
    }
  );
}

fn detail_of(event: &Event) -> JsValue {
  event
    .dyn_ref::<CustomEvent>()
    .map(|e| e.detail())
    .unwrap_or(JsValue::UNDEFINED)
}

fn get_path(
  target: &JsValue,
  path: &[&str]
) -> JsValue {
  path.iter().fold(
    target.clone(),
    |value, key| {
      if value.is_undefined()
        || value.is_null()
      {
        return JsValue::UNDEFINED;
      }
      Reflect::get(
        &value,
        &JsValue::from_str(key)
      )
      .unwrap_or(JsValue::UNDEFINED)
    }
  )
}

/// htmx is about to send the form's own
/// request; cancel it and send the JSON
/// body instead.
fn listen_before_request(
  body: &Element,
  config: &Rc<UiConfig>,
  controller: &Controller
) {
  let form_selector =
    config.selectors.form.clone();
  let controller = controller.clone();
  EventListener::new_with_options(
    body,
    HTMX_BEFORE_REQUEST,
    EventListenerOptions::enable_prevent_default(),
    move |event| {
      let elt = get_path(
        &detail_of(event),
        &["elt"]
      )
      .dyn_into::<Element>()
      .ok();
      let Some(elt) = elt else {
        return;
      };
      if !elt
        .matches(&form_selector)
        .unwrap_or(false)
      {
        return;
      }
      ui_debug(
        "form.submit",
        "intercepting task form request"
      );
      event.prevent_default();
      submit(&controller);
    }
  )
  .forget();
}

fn listen_after_request(
  body: &Element,
  controller: &Controller
) {
  let controller = controller.clone();
  EventListener::new(
    body,
    HTMX_AFTER_REQUEST,
    move |event| {
      let detail = detail_of(event);
      let detail = AfterRequestDetail {
        successful: get_path(
          &detail,
          &["successful"]
        )
        .as_bool()
        .unwrap_or(false),
        request_path: get_path(
          &detail,
          &["pathInfo", "requestPath"]
        )
        .as_string()
        .unwrap_or_default()
      };
      with_controller(
        &controller,
        HTMX_AFTER_REQUEST,
        |ctl| {
          ctl.on_htmx_after_request(&detail)
        }
      );
    }
  )
  .forget();
}

/// Delegated `change` handling for the
/// task form, so a form swapped in by
/// htmx keeps working.
fn listen_form_changes(
  document: &web_sys::Document,
  config: &Rc<UiConfig>,
  controller: &Controller
) {
  let form_selector =
    config.selectors.form.clone();
  let controller = controller.clone();
  EventListener::new(
    document,
    CHANGE,
    move |event| {
      let Some(input) = event
        .target()
        .and_then(|t| {
          t.dyn_into::<HtmlInputElement>()
            .ok()
        })
      else {
        return;
      };
      if !matches!(
        input.closest(&form_selector),
        Ok(Some(_))
      ) {
        return;
      }

      let checked = input.checked();
      if input.name() == FIELD_TASK_TYPE {
        with_controller(
          &controller,
          "task_type",
          |ctl| ctl.on_task_type_changed()
        );
      } else if input.id() == FIELD_RECURRING
      {
        with_controller(
          &controller,
          "recurring",
          |ctl| {
            ctl.on_recurring_changed(checked)
          }
        );
      } else if input.id() == FIELD_HISTORIC
      {
        with_controller(
          &controller,
          "historic",
          |ctl| ctl.on_historic_changed()
        );
      }
    }
  )
  .forget();
}

fn listen_backdrop_click(
  window: &Window,
  config: &Rc<UiConfig>,
  controller: &Controller
) {
  let modal_id =
    config.selectors.modal_id.clone();
  let controller = controller.clone();
  EventListener::new(
    window,
    CLICK,
    move |event| {
      let on_backdrop = event
        .target()
        .and_then(|t| {
          t.dyn_into::<Element>().ok()
        })
        .is_some_and(|el| el.id() == modal_id);
      if on_backdrop {
        with_controller(
          &controller,
          "backdrop",
          |ctl| ctl.on_backdrop_click()
        );
      }
    }
  )
  .forget();
}

fn set_global(
  window: &Window,
  name: &str,
  value: &JsValue
) -> Result<(), JsValue> {
  Reflect::set(
    window,
    &JsValue::from_str(name),
    value
  )?;
  Ok(())
}

/// `editTask('123')` and `editTask(123)`
/// are both rendered by the server.
fn task_id_arg(
  value: &JsValue
) -> Option<String> {
  normalize_task_id(
    value.as_string(),
    value.as_f64()
  )
}

fn normalize_task_id(
  text: Option<String>,
  number: Option<f64>
) -> Option<String> {
  text.or_else(|| {
    number
      .filter(|n| {
        n.is_finite() && n.fract() == 0.0
      })
      .map(|n| format!("{n:.0}"))
  })
}

/// Entry points called from inline
/// `onclick` handlers in the page.
fn install_globals(
  window: &Window,
  controller: &Controller,
  carousel: &Rc<RefCell<Carousel>>
) -> Result<(), JsValue> {
  let show_modal = {
    let controller = controller.clone();
    Closure::<dyn Fn()>::new(move || {
      ui_debug(
        "action.show_modal",
        "showModal called"
      );
      with_controller(
        &controller,
        "showModal",
        |ctl| ctl.open_for_create()
      );
    })
  };
  set_global(
    window,
    "showModal",
    show_modal.as_ref()
  )?;
  show_modal.forget();

  let edit_task = {
    let controller = controller.clone();
    Closure::<dyn Fn(JsValue)>::new(
      move |id: JsValue| {
        let Some(id) = task_id_arg(&id)
        else {
          tracing::error!(
            id = ?id,
            "editTask called without a \
             usable id"
          );
          return;
        };
        ui_debug("action.edit_task", &id);
        with_controller(
          &controller,
          "editTask",
          |ctl| ctl.open_for_edit(&id)
        );
      }
    )
  };
  set_global(
    window,
    "editTask",
    edit_task.as_ref()
  )?;
  edit_task.forget();

  let edit_from_element = {
    let controller = controller.clone();
    Closure::<dyn Fn(JsValue)>::new(
      move |element: JsValue| {
        let attrs = element
          .dyn_into::<Element>()
          .ok()
          .and_then(|el| {
            surface::dataset_of(&el)
          });
        let Some(attrs) = attrs else {
          tracing::error!(
            "editTaskFromElement called \
             without an element"
          );
          return;
        };
        with_controller(
          &controller,
          "editTaskFromElement",
          |ctl| {
            ctl.open_for_edit_from(&attrs)
          }
        );
      }
    )
  };
  set_global(
    window,
    "editTaskFromElement",
    edit_from_element.as_ref()
  )?;
  edit_from_element.forget();

  let close_modal = {
    let controller = controller.clone();
    Closure::<dyn Fn()>::new(move || {
      ui_debug(
        "action.close_modal",
        "closeModal called"
      );
      with_controller(
        &controller,
        "closeModal",
        |ctl| ctl.close()
      );
    })
  };
  set_global(
    window,
    "closeModal",
    close_modal.as_ref()
  )?;
  close_modal.forget();

  let move_carousel = {
    let carousel = carousel.clone();
    Closure::<dyn Fn(JsValue)>::new(
      move |step: JsValue| {
        let direction = step
          .as_f64()
          .filter(|n| n.fract() == 0.0)
          .and_then(|n| {
            Direction::from_step(n as i32)
          });
        let Some(direction) = direction
        else {
          tracing::warn!(
            step = ?step,
            "ignoring carousel step other \
             than -1 or +1"
          );
          return;
        };
        match carousel.try_borrow_mut() {
          | Ok(mut carousel) => {
            carousel.step(direction);
          }
          | Err(_) => tracing::warn!(
            "carousel busy; dropping move"
          )
        }
      }
    )
  };
  set_global(
    window,
    "moveCarousel",
    move_carousel.as_ref()
  )?;
  move_carousel.forget();

  Ok(())
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
