//! Names and payload shapes of the page
//! events the controller listens to or
//! raises.

/// Fired by htmx on the triggering
/// element before it issues a request.
/// `detail.elt` is that element; calling
/// `preventDefault()` cancels the
/// request.
pub const HTMX_BEFORE_REQUEST: &str =
  "htmx:beforeRequest";

/// Fired by htmx once a request settles.
/// Payload: see [`AfterRequestDetail`].
pub const HTMX_AFTER_REQUEST: &str =
  "htmx:afterRequest";

pub const DOM_CONTENT_LOADED: &str =
  "DOMContentLoaded";

pub const CHANGE: &str = "change";

pub const CLICK: &str = "click";

/// The parts of `htmx:afterRequest`'s
/// `detail` the controller reads:
/// `detail.successful` and
/// `detail.pathInfo.requestPath`.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct AfterRequestDetail {
  pub successful:   bool,
  pub request_path: String
}

/// Whether `path` is one of the schedule
/// write endpoints. Edit URLs carry the
/// task id as a query string, so they
/// match by prefix.
pub fn is_schedule_write(
  path: &str,
  create_path: &str,
  edit_path: &str
) -> bool {
  path == create_path
    || (!edit_path.is_empty()
      && path.starts_with(edit_path))
}
