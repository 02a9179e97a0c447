//! Platform-independent half of the schedule form: the typed task draft,
//! decoding of server-rendered task attributes, field visibility rules,
//! request construction, the modal controller state machine and the panel
//! navigator. The browser binding lives in `netsched_ui` and drives
//! everything here through [`surface::FormSurface`].

pub mod attributes;
pub mod config;
pub mod controller;
pub mod datetime;
pub mod draft;
pub mod error;
pub mod events;
pub mod form;
pub mod navigator;
pub mod request;
pub mod surface;
pub mod visibility;

pub use controller::{
  FormController,
  Method,
  PendingSubmit
};
pub use draft::{
  Mode,
  TaskDraft,
  TaskId,
  TaskKind,
  TaskTarget
};
pub use error::{
  ControllerError,
  DecodeError,
  RequestError,
  TransportError
};
pub use navigator::{
  Direction,
  NavigatorFrame,
  PanelNavigator
};
