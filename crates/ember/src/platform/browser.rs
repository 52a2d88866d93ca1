//! The site running in a real page.
//!
//! One [`SiteRuntime`] per page, kept in a thread-local. Timers run as zoon
//! tasks, animation frames through `requestAnimationFrame`.

mod api;
mod bridge;
mod clipboard;
mod events;
mod logger;
mod surface;

use std::cell::RefCell;

use ember_scene::SiteConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config;
use crate::error::{ConfigError, SiteError};
use crate::site::Site;

pub use bridge::SiteRuntime;
pub use surface::BrowserSurface;

/// Id of the optional `<script type="application/json">` block holding config overrides.
pub const CONFIG_ELEMENT_ID: &str = "siteConfig";

thread_local! {
    static RUNTIME: RefCell<Option<SiteRuntime>> = const { RefCell::new(None) };
}

/// Mounts the site on the current page. Later calls return the running instance.
pub fn start() -> Result<SiteRuntime, SiteError> {
    if let Some(runtime) = RUNTIME.with_borrow(|runtime| runtime.clone()) {
        return Ok(runtime);
    }
    logger::init(log::LevelFilter::Info);

    let surface = BrowserSurface::new()?;
    let config = read_config(surface.document())?;
    let runtime = SiteRuntime::new(Site::new(surface, config, StdRng::from_os_rng()));

    events::observe_viewport(&runtime)?;
    events::bind(&runtime);
    api::expose(&runtime);
    runtime.mount();

    RUNTIME.with_borrow_mut(|slot| *slot = Some(runtime.clone()));
    Ok(runtime)
}

pub fn runtime() -> Option<SiteRuntime> {
    RUNTIME.with_borrow(|runtime| runtime.clone())
}

fn read_config(document: &web_sys::Document) -> Result<SiteConfig, ConfigError> {
    let Some(source) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return Ok(SiteConfig::default());
    };
    config::from_json(&source)
}
