//! Reading image specs and options out of JS values.
//!
//! Plain data goes through `JSON.stringify` and serde. Function-valued
//! options are dropped by JSON and are read with `Reflect` instead.

use js_sys::{Function, Reflect, JSON};
use juxta_core::{ImageSpec, JxError, JxResult, SliderOptions};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};

/// Options plus the JS callbacks that ride along with them
pub struct JsConfig {
    pub options: SliderOptions,
    pub callback: Option<Function>,
    pub on_error: Option<Function>,
}

fn to_json(value: &JsValue) -> JxResult<String> {
    JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .ok_or_else(|| JxError::invalid_options("value is not JSON-serializable"))
}

/// Image specs from a JS array. Anything unreadable yields an empty list,
/// which the controller rejects with a warning.
pub fn read_images(value: &JsValue) -> Vec<ImageSpec> {
    let parsed = to_json(value).and_then(|json| {
        serde_json::from_str::<Vec<ImageSpec>>(&json).map_err(|e| JxError::invalid_options(e.to_string()))
    });

    match parsed {
        Ok(images) => images,
        Err(e) => {
            warn!(error = %e, "could not read images");
            Vec::new()
        }
    }
}

/// Options from an optional JS object. Fields with bad values fall back to
/// their defaults one by one.
pub fn read_options(value: &JsValue) -> JsConfig {
    if value.is_undefined() || value.is_null() {
        return JsConfig {
            options: SliderOptions::default(),
            callback: None,
            on_error: None,
        };
    }

    let options = match to_json(value).and_then(|json| SliderOptions::from_json_lenient(&json)) {
        Ok((options, rejected)) => {
            for field in rejected {
                warn!(option = %field, "ignoring option with an invalid value");
            }
            options
        }
        Err(e) => {
            warn!(error = %e, "ignoring invalid options");
            SliderOptions::default()
        }
    };

    JsConfig {
        options,
        callback: function_field(value, "callback"),
        on_error: function_field(value, "onError"),
    }
}

fn function_field(object: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .and_then(|field| field.dyn_into::<Function>().ok())
}
