//! Plain data shared between the ember runtime, its platforms and the CLI.
//!
//! Nothing in here touches a document or a clock. The runtime crate owns the
//! behavior; this crate only names things.

pub mod classes;
mod config;
mod event;
mod ids;
mod markers;
mod role;
mod state;

pub use config::{
    AnimationConfig, InteractionConfig, LiveConfig, LoadingConfig, NotificationConfig, SiteConfig,
};
pub use event::{Command, ObserverKind, Outcome, UiEvent};
pub use ids::{NodeId, SectionId};
pub use markers::{MenuIcon, PresenceStatus};
pub use role::Role;
pub use state::AppState;
