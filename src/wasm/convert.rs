use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

use crate::color::ColorInput;
use crate::error::{Error, Result};
use crate::options::Options;

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        let js = js_sys::Error::new(&err.to_string());
        js.set_name(err.js_name());
        js.into()
    }
}

/// Round-trip a JS value through `JSON.stringify`. `None` for `undefined`/`null`.
fn to_json(value: &JsValue) -> Option<String> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(value).ok()?.as_string()
}

fn decode<T: DeserializeOwned>(json: &str, wrap: fn(String) -> Error) -> Result<T> {
    serde_json::from_str(json).map_err(|e| wrap(e.to_string()))
}

pub fn options_from_js(value: &JsValue) -> Result<Options> {
    match to_json(value) {
        Some(json) => Options::from_json(&json),
        None => Ok(Options::default()),
    }
}

pub fn color_from_js(value: &JsValue) -> Result<ColorInput> {
    if let Some(hex) = value.as_string() {
        return Ok(ColorInput::Hex(hex));
    }
    let json = to_json(value).ok_or_else(|| Error::InvalidColor(format!("{value:?}")))?;
    decode(&json, Error::InvalidColor)
}
