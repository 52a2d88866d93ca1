//! Marker classes toggled on surface elements.

/// Marks the visible section, the current nav link and the open nav container.
pub const ACTIVE: &str = "active";

pub const ANIMATE_SLIDE_UP: &str = "animate-slide-up";
pub const ANIMATE_CARD_IN: &str = "animate-card-in";
pub const ANIMATE_ZOOM_IN: &str = "animate-zoom-in";

/// Entrance classes stripped page-wide before a section replays its animations.
pub const ENTRANCE_ANIMATIONS: [&str; 3] = [ANIMATE_SLIDE_UP, ANIMATE_CARD_IN, ANIMATE_ZOOM_IN];

/// Every class starting with this prefix is an animation marker.
pub const ANIMATION_PREFIX: &str = "animate-";

/// Flags an element for a one-shot entrance once it scrolls into view.
pub const ANIMATE_ON_SCROLL: &str = "animate-on-scroll";

/// Social cards carrying this class copy the player UID instead of following a link.
pub const GAME_CARD: &str = "game";

pub const CLICKED: &str = "clicked";
pub const PULSE: &str = "pulse";
pub const SHOW: &str = "show";
pub const OFFLINE: &str = "offline";

pub fn is_animation_marker(class: &str) -> bool {
    class.starts_with(ANIMATION_PREFIX)
}
