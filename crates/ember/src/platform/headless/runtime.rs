use ember_scene::{AppState, Command, Outcome, SiteConfig, UiEvent};
use serde::Serialize;

use super::clock::VirtualClock;
use super::document::{Document, DocumentSnapshot};
use crate::scheduler::TimerCommand;
use crate::site::Site;

/// Drives a [`Site`] over a [`Document`] on virtual time.
pub struct HeadlessRuntime {
    site: Site<Document>,
    clock: VirtualClock,
    settle_clipboard: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuntimeSnapshot {
    pub now_ms: u64,
    pub state: AppState,
    pub loading_progress: f64,
    pub revealed: bool,
    pub document: DocumentSnapshot,
}

impl HeadlessRuntime {
    pub fn new(document: Document, config: SiteConfig, seed: u64) -> Self {
        Self {
            site: Site::with_seed(document, config, seed),
            clock: VirtualClock::new(),
            settle_clipboard: true,
        }
    }

    pub fn portfolio(seed: u64) -> Self {
        Self::new(Document::portfolio(), SiteConfig::default(), seed)
    }

    /// Leaves clipboard writes pending until the caller settles them.
    pub fn with_manual_clipboard(mut self) -> Self {
        self.settle_clipboard = false;
        self
    }

    pub fn mount(&mut self) {
        self.site.mount();
        self.pump();
    }

    pub fn unmount(&mut self) {
        self.site.unmount();
        self.pump();
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Outcome {
        let outcome = self.site.dispatch(event);
        self.settle();
        outcome
    }

    pub fn execute(&mut self, command: Command) {
        self.site.execute(command);
        self.settle();
    }

    /// Runs every timer due within the next `ms` milliseconds, in order.
    pub fn advance_by(&mut self, ms: u64) {
        let target = self.clock.now_ms() + ms;
        self.pump();
        while let Some(id) = self.clock.pop_due(target) {
            self.site.fire_timer(id);
            self.settle();
        }
        self.clock.advance_to(target);
    }

    fn settle(&mut self) {
        if self.settle_clipboard {
            if let Some(ok) = self.site.surface_mut().take_settled_clipboard_write() {
                self.site.dispatch(UiEvent::ClipboardWriteSettled { ok });
            }
        }
        self.pump();
    }

    fn pump(&mut self) {
        for command in self.site.take_timer_commands() {
            match command {
                TimerCommand::Start(request) => self.clock.schedule(request.id, request.delay),
                TimerCommand::Cancel(id) => self.clock.cancel(id),
            }
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.clock.pending_count()
    }

    pub fn site(&self) -> &Site<Document> {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut Site<Document> {
        &mut self.site
    }

    pub fn document(&self) -> &Document {
        self.site.surface()
    }

    pub fn snapshot(&self) -> RuntimeSnapshot {
        RuntimeSnapshot {
            now_ms: self.clock.now_ms(),
            state: self.site.state().clone(),
            loading_progress: self.site.loading_progress(),
            revealed: self.site.is_revealed(),
            document: self.document().snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Surface;
    use ember_scene::Role;

    #[test]
    fn shell_is_revealed_after_two_and_a_half_seconds() {
        let mut runtime = HeadlessRuntime::portfolio(3);
        runtime.mount();
        runtime.advance_by(2499);
        assert!(!runtime.site().is_revealed());
        runtime.advance_by(1);
        assert!(runtime.site().is_revealed());
        assert_eq!(runtime.site().loading_progress(), 100.0);

        let shell = runtime.document().query_first(Role::AppContainer).unwrap();
        assert_eq!(runtime.document().style(shell, "opacity"), Some("1"));
    }

    #[test]
    fn unmount_drops_every_pending_timer() {
        let mut runtime = HeadlessRuntime::portfolio(3);
        runtime.mount();
        runtime.advance_by(1000);
        runtime.unmount();
        assert_eq!(runtime.pending_timers(), 0);
    }
}
