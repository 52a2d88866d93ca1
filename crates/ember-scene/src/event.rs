use serde::{Deserialize, Serialize};

use crate::{NodeId, SectionId};

/// The two viewport observers the page registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverKind {
    /// `animate-on-scroll` elements, threshold 10 %.
    Entrance,
    /// Numeric `data-target` counters, threshold 50 %.
    Counter,
}

/// Everything the surface reports to the runtime.
///
/// Platforms translate their native events into these; the runtime never
/// sees a DOM event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    NavLinkClicked { node: NodeId },
    FooterLinkClicked { node: NodeId },
    MenuButtonClicked,
    /// A click anywhere on the document, after element handlers ran.
    DocumentClicked { inside_menu: bool },
    OrientationChanged,
    Scrolled { offset_y: f64 },
    BackToTopClicked,
    ContactFormSubmitted,
    HeroButtonClicked { node: NodeId },
    SocialCardClicked { node: NodeId },
    SocialLinkClicked { node: NodeId },
    GalleryItemClicked { node: NodeId },
    ViewProfileClicked { node: NodeId },
    TouchEnded { at_ms: f64 },
    ViewportEntered {
        observer: ObserverKind,
        node: NodeId,
        ratio: f64,
    },
    ClipboardWriteSettled { ok: bool },
    ConnectivityChanged { online: bool },
    VisibilityChanged { hidden: bool },
    RuntimeError { message: String },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NavLinkClicked { .. } => "nav_link_clicked",
            Self::FooterLinkClicked { .. } => "footer_link_clicked",
            Self::MenuButtonClicked => "menu_button_clicked",
            Self::DocumentClicked { .. } => "document_clicked",
            Self::OrientationChanged => "orientation_changed",
            Self::Scrolled { .. } => "scrolled",
            Self::BackToTopClicked => "back_to_top_clicked",
            Self::ContactFormSubmitted => "contact_form_submitted",
            Self::HeroButtonClicked { .. } => "hero_button_clicked",
            Self::SocialCardClicked { .. } => "social_card_clicked",
            Self::SocialLinkClicked { .. } => "social_link_clicked",
            Self::GalleryItemClicked { .. } => "gallery_item_clicked",
            Self::ViewProfileClicked { .. } => "view_profile_clicked",
            Self::TouchEnded { .. } => "touch_ended",
            Self::ViewportEntered { .. } => "viewport_entered",
            Self::ClipboardWriteSettled { .. } => "clipboard_write_settled",
            Self::ConnectivityChanged { .. } => "connectivity_changed",
            Self::VisibilityChanged { .. } => "visibility_changed",
            Self::RuntimeError { .. } => "runtime_error",
        }
    }
}

/// The narrow command interface of the site, callable from page scripts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    ShowSection { section: SectionId },
    ToggleMenu,
    CloseMenu,
    CopyUid,
}

/// What the platform should do with the native event after dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl Outcome {
    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: false,
        }
    }

    pub fn stop_propagation() -> Self {
        Self {
            prevent_default: false,
            stop_propagation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_use_snake_case_tags() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type":"nav_link_clicked","node":4}"#).unwrap();
        assert_eq!(event, UiEvent::NavLinkClicked { node: NodeId(4) });
        assert_eq!(event.name(), "nav_link_clicked");
    }

    #[test]
    fn viewport_event_carries_observer() {
        let event: UiEvent = serde_json::from_str(
            r#"{"type":"viewport_entered","observer":"counter","node":2,"ratio":0.75}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            UiEvent::ViewportEntered {
                observer: ObserverKind::Counter,
                node: NodeId(2),
                ratio: 0.75,
            }
        );
    }

    #[test]
    fn commands_parse_section_ids() {
        let command: Command =
            serde_json::from_str(r#"{"type":"show_section","section":"gallery"}"#).unwrap();
        assert_eq!(
            command,
            Command::ShowSection {
                section: SectionId::new("gallery")
            }
        );
    }
}
