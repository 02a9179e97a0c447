mod api;
mod app;

use gloo::events::EventListener;
use netsched_core::events::DOM_CONTENT_LOADED;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting schedule form controller"
  );

  let Some(document) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
  else {
    tracing::error!(
      "no document; schedule form \
       controller not mounted"
    );
    return;
  };

  if document.ready_state() == "loading"
  {
    EventListener::once(
      &document,
      DOM_CONTENT_LOADED,
      |_| app::start()
    )
    .forget();
  } else {
    app::start();
  }
}
