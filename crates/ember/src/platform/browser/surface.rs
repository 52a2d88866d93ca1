use std::cell::RefCell;
use std::collections::BTreeMap;

use ember_scene::{NodeId, ObserverKind, Role, SectionId};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, IntersectionObserver,
    NodeList, ScrollBehavior, ScrollToOptions, Window,
};

use super::clipboard;
use crate::error::SurfaceError;
use crate::surface::Surface;

/// Attribute carrying the `NodeId` an element was registered under.
const NODE_ATTRIBUTE: &str = "data-ember-node";

const NOTIFICATION_CSS: &str = "position: fixed; top: 100px; right: 20px; \
    background: linear-gradient(45deg, #ff0000, #ff6600); color: white; \
    padding: 15px 25px; border-radius: 10px; z-index: 9999; \
    font-family: 'Oxanium', sans-serif; font-weight: bold; \
    box-shadow: 0 5px 20px rgba(255,0,0,0.5); \
    animation: slideInRight 0.3s ease-out; border: 2px solid #ff0000;";

/// Elements handed out as `NodeId`s. Ids are never reused.
#[derive(Default)]
struct Registry {
    elements: BTreeMap<NodeId, Element>,
    next: u32,
}

/// [`Surface`] over the live DOM.
///
/// Elements get a `NodeId` the first time a query returns them.
pub struct BrowserSurface {
    window: Window,
    document: Document,
    nodes: RefCell<Registry>,
    observers: BTreeMap<ObserverKind, IntersectionObserver>,
    pending_clipboard: Option<String>,
}

impl BrowserSurface {
    pub fn new() -> Result<Self, SurfaceError> {
        let window =
            web_sys::window().ok_or_else(|| SurfaceError::new("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| SurfaceError::new("document", "window has no document"))?;
        Ok(Self {
            window,
            document,
            nodes: RefCell::new(Registry::default()),
            observers: BTreeMap::new(),
            pending_clipboard: None,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn node_id(&self, element: &Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let known = element
            .get_attribute(NODE_ATTRIBUTE)
            .and_then(|raw| raw.parse::<u32>().ok())
            .map(NodeId)
            .filter(|node| nodes.elements.get(node) == Some(element));
        if let Some(node) = known {
            return node;
        }
        let node = NodeId(nodes.next);
        nodes.next += 1;
        let _ = element.set_attribute(NODE_ATTRIBUTE, &node.0.to_string());
        nodes.elements.insert(node, element.clone());
        node
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().elements.get(&node).cloned()
    }

    fn html_element(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    pub fn install_observer(&mut self, kind: ObserverKind, observer: IntersectionObserver) {
        if let Some(previous) = self.observers.insert(kind, observer) {
            previous.disconnect();
        }
    }

    /// The text of a clipboard write requested since the last call.
    pub fn take_clipboard_write(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    fn register_all(&self, list: Result<NodeList, JsValue>) -> Vec<NodeId> {
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.node_id(&element))
            .collect()
    }
}

impl Surface for BrowserSurface {
    fn query(&self, role: Role) -> Vec<NodeId> {
        self.register_all(self.document.query_selector_all(role.selector()))
    }

    fn find_within(&self, root: NodeId, role: Role) -> Option<NodeId> {
        let element = self.element(root)?.query_selector(role.selector()).ok()??;
        Some(self.node_id(&element))
    }

    fn closest(&self, node: NodeId, role: Role) -> Option<NodeId> {
        let element = self.element(node)?.closest(role.selector()).ok()??;
        Some(self.node_id(&element))
    }

    fn section(&self, section: &SectionId) -> Option<NodeId> {
        let element = self.document.get_element_by_id(section.as_str())?;
        if !element.matches(Role::Section.selector()).unwrap_or(false) {
            return None;
        }
        Some(self.node_id(&element))
    }

    fn nodes_with_any_class(&self, classes: &[&str]) -> Vec<NodeId> {
        if classes.is_empty() {
            return Vec::new();
        }
        let selector = classes
            .iter()
            .map(|class| format!(".{class}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.register_all(self.document.query_selector_all(&selector))
    }

    fn descendants_with_class_prefix(&self, root: NodeId, prefix: &str) -> Vec<NodeId> {
        let Some(root) = self.element(root) else {
            return Vec::new();
        };
        self.register_all(root.query_selector_all(&format!("[class*=\"{prefix}\"]")))
            .into_iter()
            .filter(|node| {
                self.class_names(*node)
                    .iter()
                    .any(|class| class.starts_with(prefix))
            })
            .collect()
    }

    fn class_names(&self, node: NodeId) -> Vec<String> {
        let Some(element) = self.element(node) else {
            return Vec::new();
        };
        let list = element.class_list();
        (0..list.length()).filter_map(|index| list.item(index)).collect()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.element(node)?.text_content()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(element) = self.element(node) {
            element.set_inner_html(html);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.html_element(node) else {
            return;
        };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(error) = result {
            log::warn!("style {property} on {node}: {error:?}");
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(button) = self
            .element(node)
            .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(disabled);
        }
    }

    fn reset_form(&mut self, form: NodeId) {
        if let Some(form) = self
            .element(form)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn force_reflow(&mut self, node: NodeId) {
        if let Some(element) = self.html_element(node) {
            // Reading layout flushes the pending style change
            let _ = element.offset_height();
        }
    }

    fn scroll_to_top(&mut self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn observe(&mut self, node: NodeId, kind: ObserverKind) {
        if let (Some(observer), Some(element)) = (self.observers.get(&kind), self.element(node)) {
            observer.observe(&element);
        }
    }

    fn unobserve(&mut self, node: NodeId, kind: ObserverKind) {
        if let (Some(observer), Some(element)) = (self.observers.get(&kind), self.element(node)) {
            observer.unobserve(&element);
        }
    }

    fn clipboard_available(&self) -> bool {
        clipboard::is_available(&self.window)
    }

    fn begin_clipboard_write(&mut self, text: &str) {
        self.pending_clipboard = Some(text.to_string());
    }

    fn copy_via_selection(&mut self, text: &str) -> Result<(), SurfaceError> {
        clipboard::copy_via_selection(&self.document, text)
    }

    fn alert(&mut self, message: &str) -> Result<(), SurfaceError> {
        self.window
            .alert_with_message(message)
            .map_err(|error| SurfaceError::new("alert", format!("{error:?}")))
    }

    fn mount_notification(&mut self, message: &str) -> Result<NodeId, SurfaceError> {
        let failed = |error: JsValue| SurfaceError::new("mount_notification", format!("{error:?}"));
        let body = self
            .document
            .body()
            .ok_or_else(|| SurfaceError::new("mount_notification", "document has no body"))?;
        let toast = self
            .document
            .create_element("div")
            .map_err(failed)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SurfaceError::new("mount_notification", "not an HTML element"))?;
        toast.set_class_name("uid-notification");
        toast.style().set_css_text(NOTIFICATION_CSS);
        toast.set_text_content(Some(message));
        body.append_child(&toast).map_err(failed)?;
        Ok(self.node_id(&toast))
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.element(node)
            .is_some_and(|element| element.is_connected())
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(element) = self.nodes.get_mut().elements.remove(&node) {
            element.remove();
        }
    }
}
