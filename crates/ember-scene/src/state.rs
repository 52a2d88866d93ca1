use serde::{Deserialize, Serialize};

use crate::SectionId;

/// Navigation state. Reset to the defaults on every mount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub current_section: SectionId,
    pub is_menu_open: bool,
}
