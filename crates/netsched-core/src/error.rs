use thiserror::Error;

/// Failure to turn a task element's
/// `data-*` attributes into a draft.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum DecodeError {
  #[error("task element has no id")]
  MissingTaskId,
  #[error("invalid task id: {0:?}")]
  InvalidTaskId(String)
}

/// Form contents that cannot be sent.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum RequestError {
  #[error(
    "invalid date/time value: {0:?}"
  )]
  InvalidDatetime(String),
  #[error("invalid interval: {0:?}")]
  InvalidInterval(String),
  #[error(
    "invalid recent days value: {0:?}"
  )]
  InvalidRecentDays(String)
}

/// Network error or non-2xx response.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
#[error("{message}")]
pub struct TransportError {
  pub status:  Option<u16>,
  pub message: String
}

impl TransportError {
  pub fn http(
    status: u16,
    status_text: &str
  ) -> Self {
    Self {
      status:  Some(status),
      message: format!(
        "HTTP {status}: {status_text}"
      )
    }
  }

  pub fn network(
    message: impl Into<String>
  ) -> Self {
    Self {
      status:  None,
      message: message.into()
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ControllerError {
  #[error(
    "no task element found for id \
     {0:?}"
  )]
  TaskNotFound(String),
  #[error(transparent)]
  Decode(#[from] DecodeError),
  #[error(transparent)]
  Invalid(#[from] RequestError),
  #[error("the task form is not open")]
  NotOpen,
  #[error(
    "a save request is already in \
     flight"
  )]
  SubmitInFlight,
  #[error(transparent)]
  Transport(#[from] TransportError)
}
