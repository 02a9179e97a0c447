use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
  #[wasm_bindgen(
    js_namespace = htmx,
    js_name = trigger,
    catch
  )]
  fn htmx_trigger(
    elt: &Element,
    name: &str
  ) -> Result<(), JsValue>;
}

/// `htmx.trigger(elt, name)`. A page
/// without htmx only gets a log line.
pub fn trigger(
  elt: &Element,
  name: &str
) {
  if let Err(error) =
    htmx_trigger(elt, name)
  {
    tracing::error!(
      event = name,
      error = ?error,
      "htmx.trigger failed"
    );
  }
}
