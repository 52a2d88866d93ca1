//! Runs the scheduler's timer requests on zoon tasks and animation frames.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ember_scene::{Command, Outcome, UiEvent};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use zoon::{Task, TaskHandle, Timer};

use super::clipboard;
use super::surface::BrowserSurface;
use crate::scheduler::{Delay, TaskId, TimerCommand, TimerRequest};
use crate::site::Site;

/// Shared handle to the page's single [`Site`].
#[derive(Clone)]
pub struct SiteRuntime {
    site: Rc<RefCell<Site<BrowserSurface>>>,
    /// Dropping a handle aborts its sleep.
    timers: Rc<RefCell<BTreeMap<TaskId, TaskHandle>>>,
}

impl SiteRuntime {
    pub fn new(site: Site<BrowserSurface>) -> Self {
        Self {
            site: Rc::new(RefCell::new(site)),
            timers: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    /// Runs `f` on the site unless it is already borrowed further up the stack.
    pub fn with_site<R>(&self, f: impl FnOnce(&mut Site<BrowserSurface>) -> R) -> Option<R> {
        match self.site.try_borrow_mut() {
            Ok(mut site) => Some(f(&mut site)),
            Err(_) => {
                log::warn!("site is busy, dropping re-entrant call");
                None
            }
        }
    }

    pub fn mount(&self) {
        self.with_site(|site| site.mount());
        self.flush();
    }

    pub fn unmount(&self) {
        self.with_site(|site| site.unmount());
        self.flush();
    }

    pub fn dispatch(&self, event: UiEvent) -> Outcome {
        let outcome = self
            .with_site(|site| site.dispatch(event))
            .unwrap_or_default();
        self.flush();
        outcome
    }

    pub fn execute(&self, command: Command) {
        self.with_site(|site| site.execute(command));
        self.flush();
    }

    /// Starts and cancels timers the site asked for and launches a pending
    /// clipboard write.
    fn flush(&self) {
        let Some((commands, clipboard_write)) = self.with_site(|site| {
            (
                site.take_timer_commands(),
                site.surface_mut().take_clipboard_write(),
            )
        }) else {
            return;
        };
        for command in commands {
            match command {
                TimerCommand::Start(request) => self.start_timer(request),
                TimerCommand::Cancel(id) => {
                    let handle = self.timers.borrow_mut().remove(&id);
                    drop(handle);
                }
            }
        }
        if let Some(text) = clipboard_write {
            let runtime = self.clone();
            Task::start(async move {
                let ok = clipboard::write_text(text).await;
                runtime.dispatch(UiEvent::ClipboardWriteSettled { ok });
            });
        }
    }

    fn start_timer(&self, TimerRequest { id, delay }: TimerRequest) {
        let runtime = self.clone();
        match delay {
            Delay::Millis(ms) => {
                let handle = Task::start_droppable(async move {
                    Timer::sleep(ms).await;
                    runtime.fire(id);
                });
                self.timers.borrow_mut().insert(id, handle);
            }
            Delay::AnimationFrame => {
                // Frees itself once the frame has run.
                let callback = Closure::once_into_js(move || runtime.fire(id));
                if let Some(window) = web_sys::window() {
                    let _ = window.request_animation_frame(callback.unchecked_ref());
                }
            }
        }
    }

    fn fire(&self, id: TaskId) {
        let finished = self.timers.borrow_mut().remove(&id);
        self.with_site(|site| site.fire_timer(id));
        drop(finished);
        self.flush();
    }
}
