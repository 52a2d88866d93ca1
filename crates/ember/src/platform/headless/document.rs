use std::collections::{BTreeMap, BTreeSet};

use ember_scene::{MenuIcon, NodeId, ObserverKind, Role, SectionId, classes};
use serde::Serialize;

use crate::error::SurfaceError;
use crate::surface::Surface;

/// How the document answers clipboard requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardMode {
    /// Asynchronous API present; pending writes settle with `accept`.
    Async { accept: bool },
    /// No asynchronous API, but the selection copy works.
    SelectionOnly,
    /// Neither mechanism works.
    Unavailable,
}

/// An element to append to a [`Document`].
#[derive(Clone, Debug, Default)]
pub struct Element {
    roles: Vec<Role>,
    html_id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    content: String,
    parent: Option<NodeId>,
    attached: bool,
    disabled: bool,
    notification: bool,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.html_id = Some(id.to_string());
        self
    }

    /// Adds whitespace-separated classes.
    pub fn class(mut self, names: &str) -> Self {
        for name in names.split_whitespace() {
            if !self.classes.iter().any(|class| class == name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }
}

/// In-memory page implementing [`Surface`].
///
/// Elements live in one vector in document order; a `NodeId` is the index.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    observed: BTreeSet<(NodeId, ObserverKind)>,
    clipboard_mode: ClipboardMode,
    clipboard: Option<String>,
    pending_clipboard: Option<String>,
    alerts: Vec<String>,
    failing_alerts: bool,
    form_resets: BTreeMap<NodeId, usize>,
    scroll_to_top_count: usize,
    reflow_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementSnapshot {
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Everything observable about the document, for comparisons and the CLI.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub elements: Vec<ElementSnapshot>,
    pub clipboard: Option<String>,
    pub alerts: Vec<String>,
    pub scroll_to_top_count: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding only `<body>`.
    pub fn new() -> Self {
        let body = Element {
            attached: true,
            ..Element::new().role(Role::Body)
        };
        Self {
            elements: vec![body],
            observed: BTreeSet::new(),
            clipboard_mode: ClipboardMode::Async { accept: true },
            clipboard: None,
            pending_clipboard: None,
            alerts: Vec::new(),
            failing_alerts: false,
            form_resets: BTreeMap::new(),
            scroll_to_top_count: 0,
            reflow_count: 0,
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let node = NodeId(self.elements.len() as u32);
        let attached = self.is_attached(parent);
        self.elements.push(Element {
            parent: Some(parent),
            attached,
            ..element
        });
        node
    }

    pub fn with_clipboard(mut self, mode: ClipboardMode) -> Self {
        self.clipboard_mode = mode;
        self
    }

    /// Every blocking prompt fails, as in a page that suppresses dialogs.
    pub fn with_failing_alerts(mut self) -> Self {
        self.failing_alerts = true;
        self
    }

    /// The page the site ships with: five sections, navigation, loading
    /// screen, stats widgets, squad, gallery and contact form.
    pub fn portfolio() -> Self {
        let mut doc = Self::new();
        let body = doc.body();

        let loading = doc.append(
            body,
            Element::new().role(Role::LoadingScreen).id("loadingScreen"),
        );
        doc.append(
            loading,
            Element::new().role(Role::ProgressBar).class("progress-bar"),
        );

        let app = doc.append(
            body,
            Element::new().role(Role::AppContainer).id("appContainer"),
        );
        let nav_links = doc.append(app, Element::new().role(Role::NavLinks).id("navLinks"));
        for (index, section) in ["home", "about", "squad", "gallery", "contact"]
            .into_iter()
            .enumerate()
        {
            let link = Element::new()
                .role(Role::NavLink)
                .class("nav-link")
                .attr("href", &format!("#{section}"))
                .content(section);
            doc.append(
                nav_links,
                if index == 0 { link.class(classes::ACTIVE) } else { link },
            );
        }
        doc.append(
            app,
            Element::new()
                .role(Role::MenuButton)
                .class("mobile-menu-btn")
                .content(MenuIcon::Open.html()),
        );

        let home = doc.append(app, section("home").class(classes::ACTIVE));
        doc.append(home, Element::new().class("hero-title animate-slide-up"));
        doc.append(home, Element::new().class("hero-subtitle animate-zoom-in"));
        for label in ["Watch Live", "Join Squad"] {
            doc.append(home, Element::new().role(Role::HeroButton).content(label));
        }
        for target in ["87", "4.5"] {
            doc.append(
                home,
                Element::new()
                    .role(Role::CounterValue)
                    .class("stat-value")
                    .attr("data-target", target)
                    .content("0"),
            );
        }
        doc.append(
            home,
            Element::new()
                .role(Role::StatBar)
                .class("stat-bar")
                .attr("data-width", "75"),
        );
        doc.append(
            home,
            Element::new()
                .role(Role::LiveStatus)
                .class("stat-value online")
                .content("Playing Now"),
        );
        doc.append(
            home,
            Element::new()
                .role(Role::WinStreak)
                .class("stat-value")
                .content("12"),
        );
        doc.append(
            home,
            Element::new()
                .role(Role::SquadPresence)
                .class("stat-value")
                .content("2/4 Online"),
        );

        let about = doc.append(app, section("about"));
        doc.append(about, Element::new().class("about-card animate-card-in"));
        doc.append(
            about,
            Element::new()
                .role(Role::ScrollReveal)
                .class(classes::ANIMATE_ON_SCROLL),
        );
        doc.append(
            about,
            Element::new()
                .role(Role::SocialCard)
                .class("social-card game")
                .attr("href", "#"),
        );
        doc.append(
            about,
            Element::new()
                .role(Role::SocialCard)
                .class("social-card")
                .attr("href", "https://twitch.tv"),
        );

        let squad = doc.append(app, section("squad"));
        for name in ["Nova", "Blaze", "Echo", "Rook"] {
            let card = doc.append(
                squad,
                Element::new()
                    .role(Role::SquadMemberCard)
                    .class("squad-member-card"),
            );
            doc.append(
                card,
                Element::new()
                    .role(Role::MemberName)
                    .class("member-name")
                    .content(name),
            );
            doc.append(
                card,
                Element::new()
                    .role(Role::PresenceDot)
                    .class("member-status offline"),
            );
            doc.append(
                card,
                Element::new()
                    .role(Role::MemberSocialLink)
                    .class("social-link"),
            );
            doc.append(
                card,
                Element::new()
                    .role(Role::ViewProfileButton)
                    .class("view-profile-btn")
                    .content("View Profile"),
            );
        }
        doc.append(
            squad,
            Element::new()
                .role(Role::ScrollReveal)
                .class(classes::ANIMATE_ON_SCROLL),
        );

        let gallery = doc.append(app, section("gallery"));
        let item = doc.append(
            gallery,
            Element::new().role(Role::GalleryItem).class("gallery-item"),
        );
        doc.append(
            item,
            Element::new()
                .role(Role::GalleryOverlay)
                .class("gallery-overlay"),
        );

        let contact = doc.append(app, section("contact"));
        let form = doc.append(
            contact,
            Element::new().role(Role::ContactForm).id("contactForm"),
        );
        doc.append(
            form,
            Element::new()
                .role(Role::SubmitButton)
                .attr("type", "submit")
                .content("Send Message"),
        );

        for target in ["#about", "#contact"] {
            doc.append(
                body,
                Element::new()
                    .role(Role::FooterLink)
                    .attr("href", target),
            );
        }
        doc.append(body, Element::new().role(Role::BackToTop).id("backToTop"));
        doc
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0 as usize)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements
            .get_mut(node.0 as usize)
            .filter(|element| element.attached)
    }

    fn attached_nodes(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.attached)
            .map(|(index, element)| (NodeId(index as u32), element))
    }

    fn is_descendant(&self, node: NodeId, root: NodeId) -> bool {
        let mut current = self.element(node).and_then(|element| element.parent);
        while let Some(parent) = current {
            if parent == root {
                return true;
            }
            current = self.element(parent).and_then(|element| element.parent);
        }
        false
    }

    pub fn html_id(&self, node: NodeId) -> Option<&str> {
        self.element(node)?.html_id.as_deref()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node)?.style.get(property).map(String::as_str)
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|element| element.disabled)
    }

    pub fn is_observed(&self, node: NodeId, kind: ObserverKind) -> bool {
        self.observed.contains(&(node, kind))
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn scroll_to_top_count(&self) -> usize {
        self.scroll_to_top_count
    }

    pub fn reflow_count(&self) -> usize {
        self.reflow_count
    }

    pub fn form_resets(&self, form: NodeId) -> usize {
        self.form_resets.get(&form).copied().unwrap_or(0)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Messages of the toasts currently attached.
    pub fn notifications(&self) -> Vec<String> {
        self.attached_nodes()
            .filter(|(_, element)| element.notification)
            .map(|(_, element)| element.content.clone())
            .collect()
    }

    pub fn notification_nodes(&self) -> Vec<NodeId> {
        self.attached_nodes()
            .filter(|(_, element)| element.notification)
            .map(|(node, _)| node)
            .collect()
    }

    /// Resolves the pending asynchronous clipboard write, if any.
    ///
    /// Returns whether it succeeded; the caller reports the result back to
    /// the site as `UiEvent::ClipboardWriteSettled`.
    pub fn take_settled_clipboard_write(&mut self) -> Option<bool> {
        let text = self.pending_clipboard.take()?;
        let accept = matches!(self.clipboard_mode, ClipboardMode::Async { accept: true });
        if accept {
            self.clipboard = Some(text);
        }
        Some(accept)
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            elements: self
                .attached_nodes()
                .map(|(node, element)| ElementSnapshot {
                    node,
                    id: element.html_id.clone(),
                    classes: element.classes.clone(),
                    style: element.style.clone(),
                    content: element.content.clone(),
                    disabled: element.disabled,
                })
                .collect(),
            clipboard: self.clipboard.clone(),
            alerts: self.alerts.clone(),
            scroll_to_top_count: self.scroll_to_top_count,
        }
    }
}

fn section(id: &str) -> Element {
    Element::new().role(Role::Section).class("section").id(id)
}

impl Surface for Document {
    fn query(&self, role: Role) -> Vec<NodeId> {
        self.attached_nodes()
            .filter(|(_, element)| element.roles.contains(&role))
            .map(|(node, _)| node)
            .collect()
    }

    fn find_within(&self, root: NodeId, role: Role) -> Option<NodeId> {
        self.attached_nodes()
            .find(|(node, element)| element.roles.contains(&role) && self.is_descendant(*node, root))
            .map(|(node, _)| node)
    }

    fn closest(&self, node: NodeId, role: Role) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            let element = self.element(candidate)?;
            if element.roles.contains(&role) {
                return Some(candidate);
            }
            current = element.parent;
        }
        None
    }

    fn section(&self, section: &SectionId) -> Option<NodeId> {
        self.attached_nodes()
            .find(|(_, element)| {
                element.roles.contains(&Role::Section)
                    && element.html_id.as_deref() == Some(section.as_str())
            })
            .map(|(node, _)| node)
    }

    fn nodes_with_any_class(&self, classes: &[&str]) -> Vec<NodeId> {
        self.attached_nodes()
            .filter(|(_, element)| {
                element
                    .classes
                    .iter()
                    .any(|class| classes.contains(&class.as_str()))
            })
            .map(|(node, _)| node)
            .collect()
    }

    fn descendants_with_class_prefix(&self, root: NodeId, prefix: &str) -> Vec<NodeId> {
        self.attached_nodes()
            .filter(|(node, element)| {
                element.classes.iter().any(|class| class.starts_with(prefix))
                    && self.is_descendant(*node, root)
            })
            .map(|(node, _)| node)
            .collect()
    }

    fn class_names(&self, node: NodeId) -> Vec<String> {
        self.element(node)
            .map(|element| element.classes.clone())
            .unwrap_or_default()
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            if !element.classes.iter().any(|name| name == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes.retain(|name| name != class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.attributes.get(name).cloned()
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.element(node).map(|element| element.content.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element_mut(node) {
            element.content = text.to_string();
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.content.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.set_text(node, html);
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            if value.is_empty() {
                element.style.remove(property);
            } else {
                element.style.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(element) = self.element_mut(node) {
            element.disabled = disabled;
        }
    }

    fn reset_form(&mut self, form: NodeId) {
        *self.form_resets.entry(form).or_default() += 1;
    }

    fn force_reflow(&mut self, _node: NodeId) {
        self.reflow_count += 1;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_to_top_count += 1;
    }

    fn observe(&mut self, node: NodeId, kind: ObserverKind) {
        self.observed.insert((node, kind));
    }

    fn unobserve(&mut self, node: NodeId, kind: ObserverKind) {
        self.observed.remove(&(node, kind));
    }

    fn clipboard_available(&self) -> bool {
        matches!(self.clipboard_mode, ClipboardMode::Async { .. })
    }

    fn begin_clipboard_write(&mut self, text: &str) {
        self.pending_clipboard = Some(text.to_string());
    }

    fn copy_via_selection(&mut self, text: &str) -> Result<(), SurfaceError> {
        if self.clipboard_mode == ClipboardMode::Unavailable {
            return Err(SurfaceError::new(
                "copy_via_selection",
                "copy command is not supported",
            ));
        }
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    fn alert(&mut self, message: &str) -> Result<(), SurfaceError> {
        if self.failing_alerts {
            return Err(SurfaceError::new("alert", "dialogs are blocked"));
        }
        self.alerts.push(message.to_string());
        Ok(())
    }

    fn mount_notification(&mut self, message: &str) -> Result<NodeId, SurfaceError> {
        let body = self.body();
        let node = self.append(body, Element::new().class("uid-notification").content(message));
        if let Some(element) = self.elements.get_mut(node.0 as usize) {
            element.notification = true;
        }
        Ok(node)
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|element| element.attached)
    }

    fn detach(&mut self, node: NodeId) {
        let detached: Vec<usize> = (0..self.elements.len())
            .filter(|index| {
                let candidate = NodeId(*index as u32);
                candidate == node || self.is_descendant(candidate, node)
            })
            .collect();
        for index in detached {
            self.elements[index].attached = false;
        }
    }
}
