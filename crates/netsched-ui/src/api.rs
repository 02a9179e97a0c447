use gloo::net::http::Request;
use netsched_core::{
  Method,
  PendingSubmit,
  TransportError
};
use netsched_shared::ScheduledTaskDto;

/// Sends a committed save. Any 2xx with
/// a JSON body counts as success; the
/// echoed task is decoded when it has
/// the expected shape.
pub async fn send_schedule(
  pending: &PendingSubmit
) -> Result<Option<ScheduledTaskDto>, TransportError>
{
  let builder = match pending.method {
    | Method::Post => {
      Request::post(&pending.url)
    }
    | Method::Put => {
      Request::put(&pending.url)
    }
  };

  let response = builder
    .json(&pending.body)
    .map_err(|e| {
      TransportError::network(format!(
        "failed to encode request: {e}"
      ))
    })?
    .send()
    .await
    .map_err(|e| {
      TransportError::network(
        e.to_string()
      )
    })?;

  if !response.ok() {
    return Err(TransportError::http(
      response.status(),
      &response.status_text()
    ));
  }

  let text =
    response.text().await.map_err(|e| {
      TransportError::network(format!(
        "failed to read response: {e}"
      ))
    })?;
  let value = serde_json::from_str::<
    serde_json::Value
  >(&text)
  .map_err(|e| {
    TransportError::network(format!(
      "invalid JSON response: {e}"
    ))
  })?;

  match serde_json::from_value::<
    ScheduledTaskDto
  >(value)
  {
    | Ok(task) => {
      tracing::debug!(
        name = %task.name,
        active = task.active,
        "server echoed saved task"
      );
      Ok(Some(task))
    }
    | Err(error) => {
      tracing::warn!(
        %error,
        "save response is not a task; \
         treating as saved"
      );
      Ok(None)
    }
  }
}
