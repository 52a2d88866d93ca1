use serde::{Deserialize, Serialize};

/// What a surface element is for.
///
/// The runtime asks the surface for elements by role; the browser surface
/// resolves each role with the page's CSS selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Body,
    Section,
    NavLink,
    FooterLink,
    NavLinks,
    MenuButton,
    LoadingScreen,
    ProgressBar,
    AppContainer,
    ScrollReveal,
    CounterValue,
    StatBar,
    LiveStatus,
    WinStreak,
    SquadPresence,
    PresenceDot,
    BackToTop,
    ContactForm,
    SubmitButton,
    HeroButton,
    SocialCard,
    MemberSocialLink,
    GalleryItem,
    GalleryOverlay,
    ViewProfileButton,
    SquadMemberCard,
    MemberName,
}

impl Role {
    pub fn selector(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Section => ".section",
            Self::NavLink => ".nav-link",
            Self::FooterLink => ".footer-links a",
            Self::NavLinks => "#navLinks",
            Self::MenuButton => ".mobile-menu-btn",
            Self::LoadingScreen => "#loadingScreen",
            Self::ProgressBar => ".progress-bar",
            Self::AppContainer => "#appContainer",
            Self::ScrollReveal => ".animate-on-scroll",
            Self::CounterValue => ".stat-value[data-target]",
            Self::StatBar => ".stat-bar[data-width]",
            Self::LiveStatus => ".stat-value.online",
            Self::WinStreak => ".live-stat-card:nth-child(2) .stat-value",
            Self::SquadPresence => ".live-stat-card:nth-child(3) .stat-value",
            Self::PresenceDot => ".member-status",
            Self::BackToTop => "#backToTop",
            Self::ContactForm => "#contactForm",
            Self::SubmitButton => "button[type=\"submit\"]",
            Self::HeroButton => ".hero-actions button",
            Self::SocialCard => ".social-card",
            Self::MemberSocialLink => ".member-social .social-link",
            Self::GalleryItem => ".gallery-item",
            Self::GalleryOverlay => ".gallery-overlay",
            Self::ViewProfileButton => ".view-profile-btn",
            Self::SquadMemberCard => ".squad-member-card",
            Self::MemberName => ".member-name",
        }
    }
}
