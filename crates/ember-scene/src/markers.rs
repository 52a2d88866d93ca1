use serde::{Deserialize, Serialize};

/// Icon shown inside the mobile menu button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuIcon {
    /// Hamburger, shown while the menu is closed.
    Open,
    /// Cross, shown while the menu is open.
    Close,
}

impl MenuIcon {
    pub fn html(self) -> &'static str {
        match self {
            Self::Open => r#"<i class="fas fa-bars"></i>"#,
            Self::Close => r#"<i class="fas fa-times"></i>"#,
        }
    }
}

/// Presence indicator state of a squad member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Online,
    Idle,
    Offline,
}

impl PresenceStatus {
    pub const ALL: [PresenceStatus; 3] = [Self::Online, Self::Idle, Self::Offline];

    pub fn class(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::Offline => "offline",
        }
    }
}
