//! Runtime of the ember portfolio site.
//!
//! [`Site`] owns the navigation state and every component, and reacts to
//! [`UiEvent`]s reported by a [`Surface`]. Time only exists as timer requests
//! the [`Scheduler`] hands to the platform: `platform::browser` runs them on
//! zoon tasks, `platform::headless` on a virtual clock.

pub mod animation;
pub mod clipboard;
pub mod config;
pub mod counter;
pub mod error;
pub mod interactions;
pub mod live_updates;
pub mod loading;
pub mod navigation;
pub mod notification;
pub mod platform;
pub mod scheduler;
pub mod scroll_observer;
pub mod site;
pub mod surface;

pub use ember_scene as scene;
pub use ember_scene::{AppState, Command, NodeId, Outcome, Role, SectionId, SiteConfig, UiEvent};
pub use error::{ConfigError, SiteError, SurfaceError};
pub use scheduler::{Delay, Job, Scheduler, TaskId, TimerCommand, TimerRequest};
pub use site::{Ctx, Site};
pub use surface::Surface;

#[cfg(target_arch = "wasm32")]
pub use zoon;
