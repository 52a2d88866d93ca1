//! The rendering surface: the page the runtime drives.
//!
//! Lookups that find nothing return `None`/empty and the runtime skips the
//! work. Mutations of elements that no longer exist are silently dropped by
//! implementations. Only the calls whose failure changes what the runtime
//! does next return a `Result`.

use crate::error::SurfaceError;
use ember_scene::{NodeId, ObserverKind, Role, SectionId};

pub trait Surface {
    /// All attached elements with `role`, in document order.
    fn query(&self, role: Role) -> Vec<NodeId>;

    fn query_first(&self, role: Role) -> Option<NodeId> {
        self.query(role).into_iter().next()
    }

    /// First descendant of `root` with `role`.
    fn find_within(&self, root: NodeId, role: Role) -> Option<NodeId>;

    /// `node` itself or its nearest ancestor with `role`.
    fn closest(&self, node: NodeId, role: Role) -> Option<NodeId>;

    /// The section element whose id is `section`.
    fn section(&self, section: &SectionId) -> Option<NodeId>;

    /// Every attached element carrying at least one of `classes`.
    fn nodes_with_any_class(&self, classes: &[&str]) -> Vec<NodeId>;

    /// Descendants of `root` with at least one class starting with `prefix`.
    fn descendants_with_class_prefix(&self, root: NodeId, prefix: &str) -> Vec<NodeId>;

    fn class_names(&self, node: NodeId) -> Vec<String>;

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_names(node).iter().any(|name| name == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn inner_html(&self, node: NodeId) -> String;

    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// Sets an inline style property; an empty value clears it.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    fn reset_form(&mut self, form: NodeId);

    /// Forces a synchronous layout so a re-added animation class restarts.
    fn force_reflow(&mut self, node: NodeId);

    fn scroll_to_top(&mut self);

    /// Starts reporting viewport crossings of `node` to the `kind` observer.
    fn observe(&mut self, node: NodeId, kind: ObserverKind);

    fn unobserve(&mut self, node: NodeId, kind: ObserverKind);

    /// Whether the asynchronous clipboard API may be used (secure context).
    fn clipboard_available(&self) -> bool;

    /// Starts an asynchronous clipboard write. The platform reports the result
    /// as [`UiEvent::ClipboardWriteSettled`](ember_scene::UiEvent::ClipboardWriteSettled).
    fn begin_clipboard_write(&mut self, text: &str);

    /// Synchronous selection-based copy used when the clipboard API is missing or failed.
    fn copy_via_selection(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Blocking prompt shown to the user.
    fn alert(&mut self, message: &str) -> Result<(), SurfaceError>;

    /// Mounts a toast element showing `message` with its entrance animation.
    fn mount_notification(&mut self, message: &str) -> Result<NodeId, SurfaceError>;

    fn is_attached(&self, node: NodeId) -> bool;

    /// Removes `node` from the document.
    fn detach(&mut self, node: NodeId);
}
