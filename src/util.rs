use wasm_bindgen::JsValue;

/// Console logging for the wasm host layer.
pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}
