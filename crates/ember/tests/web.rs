//! Browser surface tests. Run with `wasm-pack test --headless --firefox crates/ember`.

#![cfg(target_arch = "wasm32")]

use ember::platform::browser::BrowserSurface;
use ember::scene::{ObserverKind, classes};
use ember::zoon::Timer;
use ember::{NodeId, Role, SectionId, Surface, UiEvent};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn page() -> BrowserSurface {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(
        r##"
        <nav><ul id="navLinks">
            <li><a class="nav-link active" href="#home">Home</a></li>
            <li><a class="nav-link" href="#about">About</a></li>
        </ul>
        <button class="mobile-menu-btn"><i class="fas fa-bars"></i></button></nav>
        <section id="home" class="section active">
            <h1 class="animate-slide-up">Hi</h1>
            <div class="stat-value" data-target="87">0</div>
        </section>
        <section id="about" class="section">
            <div class="card animate-card-in"></div>
        </section>
        "##,
    );
    BrowserSurface::new().unwrap()
}

#[wasm_bindgen_test]
fn queries_resolve_role_selectors() {
    let surface = page();
    assert_eq!(surface.query(Role::NavLink).len(), 2);
    assert_eq!(surface.query(Role::CounterValue).len(), 1);
    assert!(surface.section(&SectionId::new("about")).is_some());
    assert!(surface.section(&SectionId::new("navLinks")).is_none());
}

#[wasm_bindgen_test]
fn node_ids_are_stable() {
    let surface = page();
    let first = surface.query(Role::Section);
    let second = surface.query(Role::Section);
    assert_eq!(first, second);
    assert_ne!(first[0], first[1]);
}

#[wasm_bindgen_test]
fn class_mutations_reach_the_dom() {
    let mut surface = page();
    let about = surface.section(&SectionId::new("about")).unwrap();
    surface.add_class(about, classes::ACTIVE);
    assert!(surface.has_class(about, classes::ACTIVE));

    let animated: Vec<NodeId> = surface.descendants_with_class_prefix(about, classes::ANIMATION_PREFIX);
    assert_eq!(animated.len(), 1);
    assert_eq!(surface.closest(animated[0], Role::Section), Some(about));
}

#[wasm_bindgen_test]
fn notifications_mount_and_detach() {
    let mut surface = page();
    let toast = surface.mount_notification("UID 1 copied to clipboard!").unwrap();
    assert!(surface.is_attached(toast));
    assert_eq!(surface.text(toast).as_deref(), Some("UID 1 copied to clipboard!"));
    surface.detach(toast);
    assert!(!surface.is_attached(toast));
    assert!(surface.element(toast).is_none());
}

#[wasm_bindgen_test]
fn elements_from_another_surface_are_registered_again() {
    let first = page();
    let stale = first.query(Role::Section);
    let second = BrowserSurface::new().unwrap();
    let fresh = second.query(Role::Section);
    assert_eq!(fresh.len(), stale.len());
    assert!(fresh.iter().all(|node| second.element(*node).is_some()));
}

#[wasm_bindgen_test]
async fn started_page_routes_window_calls_and_animates_counters() {
    page();
    let runtime = ember::platform::browser::start().unwrap();
    let counter = runtime
        .with_site(|site| site.surface().query(Role::CounterValue)[0])
        .unwrap();

    let window = web_sys::window().unwrap();
    let show_section: Function = Reflect::get(&window, &"showSection".into())
        .unwrap()
        .unchecked_into();
    let returned = show_section
        .call1(&JsValue::NULL, &JsValue::from_str("about"))
        .unwrap();
    assert_eq!(returned, JsValue::FALSE);
    assert_eq!(
        runtime.with_site(|site| site.state().current_section.clone()).unwrap(),
        "about"
    );

    runtime.dispatch(UiEvent::ViewportEntered {
        observer: ObserverKind::Counter,
        node: counter,
        ratio: 1.0,
    });
    Timer::sleep(2000).await;
    let text = runtime.with_site(|site| site.surface().text(counter)).flatten();
    assert_eq!(text.as_deref(), Some("87"));
}
