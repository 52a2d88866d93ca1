//! `window.showSection`, `window.toggleMobileMenu` and `window.copyUID`,
//! for inline handlers in the page markup.
//!
//! Each returns `false`, so `onclick="return showSection('about')"` cancels
//! the link's own navigation.

use ember_scene::{Command, SectionId};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::bridge::SiteRuntime;

pub fn expose(runtime: &SiteRuntime) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let show_section = Closure::wrap(Box::new({
        let runtime = runtime.clone();
        move |id: String| {
            runtime.execute(Command::ShowSection {
                section: SectionId::new(id),
            });
            JsValue::FALSE
        }
    }) as Box<dyn Fn(String) -> JsValue>);
    Reflect::set(&window, &"showSection".into(), show_section.as_ref()).ok();
    show_section.forget();

    let toggle_menu = Closure::wrap(Box::new({
        let runtime = runtime.clone();
        move || {
            runtime.execute(Command::ToggleMenu);
            JsValue::FALSE
        }
    }) as Box<dyn Fn() -> JsValue>);
    Reflect::set(&window, &"toggleMobileMenu".into(), toggle_menu.as_ref()).ok();
    toggle_menu.forget();

    let copy_uid = Closure::wrap(Box::new({
        let runtime = runtime.clone();
        move || {
            runtime.execute(Command::CopyUid);
            JsValue::FALSE
        }
    }) as Box<dyn Fn() -> JsValue>);
    Reflect::set(&window, &"copyUID".into(), copy_uid.as_ref()).ok();
    copy_uid.forget();
}
