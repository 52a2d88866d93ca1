//! Native listeners translated into [`UiEvent`]s.

use ember_scene::{NodeId, ObserverKind, Outcome, Role, UiEvent};
use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node,
};

use super::bridge::SiteRuntime;
use crate::error::SurfaceError;
use crate::surface::Surface;

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(error) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        log::warn!("cannot listen to '{kind}': {error:?}");
    }
    closure.forget();
}

fn apply(event: &Event, outcome: Outcome) {
    if outcome.prevent_default {
        event.prevent_default();
    }
    if outcome.stop_propagation {
        event.stop_propagation();
    }
}

/// Binds a click listener to every element with `role`.
fn on_click(runtime: &SiteRuntime, role: Role, make: fn(NodeId) -> UiEvent) {
    let elements: Vec<(NodeId, Element)> = runtime
        .with_site(|site| {
            let surface = site.surface();
            surface
                .query(role)
                .into_iter()
                .filter_map(|node| surface.element(node).map(|element| (node, element)))
                .collect()
        })
        .unwrap_or_default();
    for (node, element) in elements {
        let runtime = runtime.clone();
        listen(&element, "click", move |event| {
            apply(&event, runtime.dispatch(make(node)));
        });
    }
}

fn element_of(runtime: &SiteRuntime, role: Role) -> Option<Element> {
    runtime
        .with_site(|site| {
            let surface = site.surface();
            surface.query_first(role).and_then(|node| surface.element(node))
        })
        .flatten()
}

/// Registers every page listener. Called once per runtime.
pub fn bind(runtime: &SiteRuntime) {
    let Some((window, document)) = runtime.with_site(|site| {
        (
            site.surface().window().clone(),
            site.surface().document().clone(),
        )
    }) else {
        return;
    };

    on_click(runtime, Role::NavLink, |node| UiEvent::NavLinkClicked { node });
    on_click(runtime, Role::FooterLink, |node| UiEvent::FooterLinkClicked { node });
    on_click(runtime, Role::HeroButton, |node| UiEvent::HeroButtonClicked { node });
    on_click(runtime, Role::SocialCard, |node| UiEvent::SocialCardClicked { node });
    on_click(runtime, Role::MemberSocialLink, |node| UiEvent::SocialLinkClicked { node });
    on_click(runtime, Role::GalleryItem, |node| UiEvent::GalleryItemClicked { node });
    on_click(runtime, Role::ViewProfileButton, |node| UiEvent::ViewProfileClicked { node });

    if let Some(button) = element_of(runtime, Role::MenuButton) {
        let runtime = runtime.clone();
        listen(&button, "click", move |event| {
            apply(&event, runtime.dispatch(UiEvent::MenuButtonClicked));
        });
    }
    if let Some(button) = element_of(runtime, Role::BackToTop) {
        let runtime = runtime.clone();
        listen(&button, "click", move |event| {
            apply(&event, runtime.dispatch(UiEvent::BackToTopClicked));
        });
    }
    if let Some(form) = element_of(runtime, Role::ContactForm) {
        let runtime = runtime.clone();
        listen(&form, "submit", move |event| {
            apply(&event, runtime.dispatch(UiEvent::ContactFormSubmitted));
        });
    }

    let menu = [
        element_of(runtime, Role::NavLinks),
        element_of(runtime, Role::MenuButton),
    ];
    {
        let runtime = runtime.clone();
        listen(&document, "click", move |event| {
            let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            let inside_menu = menu
                .iter()
                .flatten()
                .any(|container| container.contains(target.as_ref()));
            apply(&event, runtime.dispatch(UiEvent::DocumentClicked { inside_menu }));
        });
    }
    {
        let runtime = runtime.clone();
        let performance = window.performance();
        listen(&document, "touchend", move |event| {
            let at_ms = performance.as_ref().map_or(0.0, |performance| performance.now());
            apply(&event, runtime.dispatch(UiEvent::TouchEnded { at_ms }));
        });
    }
    {
        let runtime = runtime.clone();
        let watched = document.clone();
        listen(&document, "visibilitychange", move |_| {
            runtime.dispatch(UiEvent::VisibilityChanged {
                hidden: watched.hidden(),
            });
        });
    }
    {
        let runtime = runtime.clone();
        let scrolled = window.clone();
        listen(&window, "scroll", move |_| {
            let offset_y = scrolled.scroll_y().unwrap_or(0.0);
            runtime.dispatch(UiEvent::Scrolled { offset_y });
        });
    }
    {
        let runtime = runtime.clone();
        listen(&window, "orientationchange", move |_| {
            runtime.dispatch(UiEvent::OrientationChanged);
        });
    }
    for (kind, online) in [("online", true), ("offline", false)] {
        let runtime = runtime.clone();
        listen(&window, kind, move |_| {
            runtime.dispatch(UiEvent::ConnectivityChanged { online });
        });
    }
    {
        let runtime = runtime.clone();
        listen(&window, "error", move |event| {
            let message = Reflect::get(&event, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
                .unwrap_or_else(|| "unknown error".to_string());
            runtime.dispatch(UiEvent::RuntimeError { message });
        });
    }
}

/// Creates the entrance and counter observers and hands them to the surface.
pub fn observe_viewport(runtime: &SiteRuntime) -> Result<(), SurfaceError> {
    let Some(animation) = runtime.with_site(|site| site.config().animation.clone()) else {
        return Ok(());
    };
    let entrance = observer(
        runtime,
        ObserverKind::Entrance,
        animation.entrance_threshold,
        Some(&animation.entrance_root_margin),
    )?;
    let counter = observer(runtime, ObserverKind::Counter, animation.counter_threshold, None)?;
    runtime.with_site(|site| {
        site.surface_mut()
            .install_observer(ObserverKind::Entrance, entrance);
        site.surface_mut()
            .install_observer(ObserverKind::Counter, counter);
    });
    Ok(())
}

fn observer(
    runtime: &SiteRuntime,
    kind: ObserverKind,
    threshold: f64,
    root_margin: Option<&str>,
) -> Result<IntersectionObserver, SurfaceError> {
    let runtime = runtime.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(node) = runtime.with_site(|site| site.surface().node_id(&target)) else {
                    continue;
                };
                runtime.dispatch(UiEvent::ViewportEntered {
                    observer: kind,
                    node,
                    ratio: entry.intersection_ratio(),
                });
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(root_margin) = root_margin {
        options.set_root_margin(root_margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|error| SurfaceError::new("IntersectionObserver", format!("{error:?}")))?;
    callback.forget();
    Ok(observer)
}
