use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlDocument, HtmlTextAreaElement, Window};

use crate::error::SurfaceError;

fn clipboard(window: &Window) -> Option<JsValue> {
    Reflect::get(&window.navigator(), &"clipboard".into())
        .ok()
        .filter(|clipboard| !clipboard.is_undefined() && !clipboard.is_null())
}

/// `navigator.clipboard` exists and the page is a secure context.
pub fn is_available(window: &Window) -> bool {
    window.is_secure_context() && clipboard(window).is_some()
}

/// Resolves to whether `navigator.clipboard.writeText` succeeded.
pub async fn write_text(text: String) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(clipboard) = clipboard(&window) else {
        return false;
    };
    let promise = Reflect::get(&clipboard, &"writeText".into())
        .and_then(|write| write.dyn_into::<Function>().map_err(JsValue::from))
        .and_then(|write| write.call1(&clipboard, &JsValue::from_str(&text)))
        .and_then(|promise| promise.dyn_into::<Promise>().map_err(JsValue::from));
    match promise {
        Ok(promise) => JsFuture::from(promise).await.is_ok(),
        Err(error) => {
            log::warn!("clipboard.writeText unavailable: {error:?}");
            false
        }
    }
}

/// Copies through a hidden textarea and `document.execCommand("copy")`.
pub fn copy_via_selection(document: &Document, text: &str) -> Result<(), SurfaceError> {
    let failed = |error: JsValue| SurfaceError::new("copy_via_selection", format!("{error:?}"));

    let body = document
        .body()
        .ok_or_else(|| SurfaceError::new("copy_via_selection", "document has no body"))?;
    let textarea = document
        .create_element("textarea")
        .map_err(failed)?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| SurfaceError::new("copy_via_selection", "not a textarea"))?;
    textarea.set_value(text);
    textarea
        .style()
        .set_css_text("position: fixed; top: 0; left: 0; opacity: 0;");
    body.append_child(&textarea).map_err(failed)?;
    textarea.select();

    let copied = document
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| SurfaceError::new("copy_via_selection", "not an HTML document"))
        .and_then(|document| document.exec_command("copy").map_err(failed));
    textarea.remove();

    match copied? {
        true => Ok(()),
        false => Err(SurfaceError::new(
            "copy_via_selection",
            "copy command was rejected",
        )),
    }
}
