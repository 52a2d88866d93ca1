//! The single owner of state and components, and the event dispatcher.

use ember_scene::{AppState, Command, NodeId, ObserverKind, Outcome, SectionId, SiteConfig, UiEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ulid::Ulid;

use crate::animation::AnimationTrigger;
use crate::clipboard::ClipboardPublisher;
use crate::error::SiteError;
use crate::interactions::Interactions;
use crate::live_updates::{self, LiveUpdateScheduler};
use crate::loading::LoadingSequencer;
use crate::navigation::NavigationController;
use crate::notification::NotificationPresenter;
use crate::scheduler::{Job, Scheduler, TaskId, TimerCommand};
use crate::scroll_observer::{self, ScrollObserver};
use crate::surface::Surface;

/// What every component works against: the page, the timers, the
/// configuration and the random source.
#[derive(Debug)]
pub struct Ctx<S> {
    pub surface: S,
    pub scheduler: Scheduler,
    pub config: SiteConfig,
    pub rng: StdRng,
}

impl<S: Surface> Ctx<S> {
    pub fn new(surface: S, config: SiteConfig, rng: StdRng) -> Self {
        Self {
            surface,
            scheduler: Scheduler::new(),
            config,
            rng,
        }
    }

    pub fn seeded(surface: S, config: SiteConfig, seed: u64) -> Self {
        Self::new(surface, config, StdRng::seed_from_u64(seed))
    }
}

pub struct Site<S: Surface> {
    ctx: Ctx<S>,
    navigation: NavigationController,
    animations: AnimationTrigger,
    scroll: ScrollObserver,
    live: LiveUpdateScheduler,
    loading: LoadingSequencer,
    notifications: NotificationPresenter,
    clipboard: ClipboardPublisher,
    interactions: Interactions,
    mounted: bool,
}

impl<S: Surface> Site<S> {
    pub fn new(surface: S, config: SiteConfig, rng: StdRng) -> Self {
        Self::from_ctx(Ctx::new(surface, config, rng))
    }

    pub fn with_seed(surface: S, config: SiteConfig, seed: u64) -> Self {
        Self::from_ctx(Ctx::seeded(surface, config, seed))
    }

    fn from_ctx(ctx: Ctx<S>) -> Self {
        Self {
            ctx,
            navigation: NavigationController::new(),
            animations: AnimationTrigger::new(),
            scroll: ScrollObserver::new(),
            live: LiveUpdateScheduler::new(),
            loading: LoadingSequencer::new(),
            notifications: NotificationPresenter::new(),
            clipboard: ClipboardPublisher::new(),
            interactions: Interactions::new(),
            mounted: false,
        }
    }

    /// Starts loading, observers and live updates. A second call does nothing.
    pub fn mount(&mut self) {
        if self.mounted {
            log::debug!("site already mounted");
            return;
        }
        self.mounted = true;
        let initial = self.ctx.config.initial_section.clone();
        self.navigation.reset(&mut self.ctx, &initial);
        self.loading.start(&mut self.ctx);
        self.scroll.mount(&mut self.ctx);
        self.live.start(&mut self.ctx);
        log::info!("site mounted");
    }

    /// Cancels every task and detaches observers and the live toast.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.loading.stop(&mut self.ctx);
        self.live.stop(&mut self.ctx);
        self.scroll.unmount(&mut self.ctx);
        self.notifications.clear(&mut self.ctx);
        self.animations.clear();
        self.interactions.clear();
        self.ctx.scheduler.cancel_all();
        log::info!("site unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Runs the handler for `event`. A failing handler is logged and yields
    /// a neutral outcome.
    pub fn dispatch(&mut self, event: UiEvent) -> Outcome {
        let name = event.name();
        match self.handle(event) {
            Ok(outcome) => outcome,
            Err(error) => {
                log::error!("{name} handler failed: {error}");
                Outcome::default()
            }
        }
    }

    fn handle(&mut self, event: UiEvent) -> Result<Outcome, SiteError> {
        let ctx = &mut self.ctx;
        let outcome = match event {
            UiEvent::NavLinkClicked { node } => {
                if let Some(section) = self.link_target(node) {
                    self.show_section(&section);
                }
                self.close_menu();
                Outcome::prevent_default()
            }
            UiEvent::FooterLinkClicked { node } => {
                if let Some(section) = self.link_target(node) {
                    self.show_section(&section);
                }
                Outcome::prevent_default()
            }
            UiEvent::MenuButtonClicked => {
                self.toggle_menu();
                Outcome::stop_propagation()
            }
            UiEvent::DocumentClicked { inside_menu } => {
                if !inside_menu && self.navigation.state().is_menu_open {
                    self.close_menu();
                }
                Outcome::default()
            }
            UiEvent::OrientationChanged => {
                self.close_menu();
                let delay = self.ctx.config.animation.orientation_retrigger_delay_ms;
                self.ctx
                    .scheduler
                    .after(delay, Job::RetriggerCurrentSection);
                Outcome::default()
            }
            UiEvent::Scrolled { offset_y } => {
                self.interactions.scrolled(ctx, offset_y);
                Outcome::default()
            }
            UiEvent::BackToTopClicked => {
                self.interactions.back_to_top(ctx);
                Outcome::default()
            }
            UiEvent::ContactFormSubmitted => {
                self.interactions.submit_contact(ctx);
                Outcome::prevent_default()
            }
            UiEvent::HeroButtonClicked { node } => {
                self.interactions.flash(ctx, node, ember_scene::classes::CLICKED);
                Outcome::default()
            }
            UiEvent::SocialCardClicked { node } => {
                let handled = self.interactions.social_card(
                    ctx,
                    &mut self.clipboard,
                    &mut self.notifications,
                    node,
                )?;
                if handled {
                    Outcome::prevent_default()
                } else {
                    Outcome::default()
                }
            }
            UiEvent::SocialLinkClicked { node } => {
                self.interactions.flash(ctx, node, ember_scene::classes::PULSE);
                Outcome::default()
            }
            UiEvent::GalleryItemClicked { node } => {
                self.interactions.gallery_item(ctx, node);
                Outcome::default()
            }
            UiEvent::ViewProfileClicked { node } => {
                self.interactions.view_profile(ctx, node)?;
                Outcome::prevent_default()
            }
            UiEvent::TouchEnded { at_ms } => {
                if self.interactions.touch_ended(ctx, at_ms) {
                    Outcome::prevent_default()
                } else {
                    Outcome::default()
                }
            }
            UiEvent::ViewportEntered {
                observer,
                node,
                ratio,
            } => {
                self.scroll.entered(ctx, observer, node, ratio);
                Outcome::default()
            }
            UiEvent::ClipboardWriteSettled { ok } => {
                self.clipboard
                    .settled(ctx, &mut self.notifications, ok)?;
                Outcome::default()
            }
            UiEvent::ConnectivityChanged { online } => {
                self.interactions.connectivity(ctx, online);
                Outcome::default()
            }
            UiEvent::VisibilityChanged { hidden } => {
                log::info!("page {}", if hidden { "hidden" } else { "visible" });
                Outcome::default()
            }
            UiEvent::RuntimeError { message } => {
                log::error!("page error: {message}");
                Outcome::default()
            }
        };
        Ok(outcome)
    }

    fn link_target(&self, node: NodeId) -> Option<SectionId> {
        let href = self.ctx.surface.attribute(node, "href")?;
        SectionId::from_href(&href)
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::ShowSection { section } => {
                self.show_section(&section);
            }
            Command::ToggleMenu => self.toggle_menu(),
            Command::CloseMenu => self.close_menu(),
            Command::CopyUid => {
                if let Err(error) = self.copy_uid() {
                    log::error!("copy_uid failed: {error}");
                }
            }
        }
    }

    /// Returns whether `section` exists and was shown.
    pub fn show_section(&mut self, section: &SectionId) -> bool {
        self.navigation
            .show_section(&mut self.ctx, &mut self.animations, section)
    }

    pub fn toggle_menu(&mut self) {
        self.navigation.toggle_menu(&mut self.ctx);
    }

    pub fn close_menu(&mut self) {
        self.navigation.close_menu(&mut self.ctx);
    }

    pub fn copy_uid(&mut self) -> Result<(), SiteError> {
        self.clipboard
            .copy_uid(&mut self.ctx, &mut self.notifications)
    }

    pub fn trigger_animations(&mut self, section: &SectionId) {
        self.animations.trigger(&mut self.ctx, section);
    }

    pub fn notify(&mut self, message: &str) -> Result<Ulid, SiteError> {
        Ok(self.notifications.notify(&mut self.ctx, message)?)
    }

    /// Runs the job of an elapsed timer. Cancelled or unknown tasks are ignored.
    pub fn fire_timer(&mut self, id: TaskId) {
        let Some(job) = self.ctx.scheduler.fire(id) else {
            return;
        };
        if let Err(error) = self.run_job(job) {
            log::error!("timer {} failed: {error}", id.0);
        }
    }

    fn run_job(&mut self, job: Job) -> Result<(), SiteError> {
        let ctx = &mut self.ctx;
        match job {
            Job::LoadingProgress => self.loading.tick(ctx),
            Job::RevealShell => self.loading.reveal(ctx),
            Job::FinishReveal => self.loading.finish(ctx, &mut self.animations),
            Job::RestartAnimations(section) => self.animations.restart(ctx, &section),
            Job::RetriggerCurrentSection => {
                let current = self.navigation.state().current_section.clone();
                self.animations.trigger(ctx, &current);
            }
            Job::CounterFrame(node) => self.scroll.counters.frame(ctx, node),
            Job::FillStatBars => scroll_observer::fill_stat_bars(ctx),
            Job::LiveStatus => live_updates::refresh_status(ctx),
            Job::LiveSquad => live_updates::refresh_squad(ctx),
            Job::LiveStreak => live_updates::refresh_streak(ctx),
            Job::DismissNotification(id) => self.notifications.dismiss(ctx, id),
            Job::RemoveNotification(id) => self.notifications.remove(ctx, id),
            Job::ClearFeedback { node, class } => {
                self.interactions.clear_feedback(ctx, node, class)
            }
            Job::FinishContactSubmit => self.interactions.finish_contact(ctx)?,
            Job::HideGalleryOverlay(overlay) => {
                self.interactions.hide_gallery_overlay(ctx, overlay)
            }
        }
        Ok(())
    }

    pub fn take_timer_commands(&mut self) -> Vec<TimerCommand> {
        self.ctx.scheduler.take_commands()
    }

    pub fn state(&self) -> &AppState {
        self.navigation.state()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.ctx.config
    }

    pub fn surface(&self) -> &S {
        &self.ctx.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.ctx.surface
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.ctx.scheduler
    }

    pub fn loading_progress(&self) -> f64 {
        self.loading.progress()
    }

    pub fn is_revealed(&self) -> bool {
        self.loading.is_revealed()
    }

    pub fn is_watching(&self, kind: ObserverKind, node: NodeId) -> bool {
        self.scroll.is_watching(kind, node)
    }

    pub fn live_notification(&self) -> Option<Ulid> {
        self.notifications.live_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::Document;
    use ember_scene::{MenuIcon, Role, classes};

    fn site() -> Site<Document> {
        let mut site = Site::with_seed(Document::portfolio(), SiteConfig::default(), 21);
        site.mount();
        site
    }

    fn nav_link(site: &Site<Document>, href: &str) -> NodeId {
        site.surface()
            .query(Role::NavLink)
            .into_iter()
            .find(|link| site.surface().attribute(*link, "href").as_deref() == Some(href))
            .unwrap()
    }

    #[test]
    fn mount_is_idempotent() {
        let mut site = site();
        let tasks = site.scheduler().active_count();
        site.mount();
        assert_eq!(site.scheduler().active_count(), tasks);
    }

    #[test]
    fn unmount_cancels_everything() {
        let mut site = site();
        site.unmount();
        assert_eq!(site.scheduler().active_count(), 0);
        assert!(
            site.take_timer_commands()
                .iter()
                .any(|command| matches!(command, TimerCommand::Cancel(_)))
        );
    }

    #[test]
    fn nav_click_shows_section_and_closes_menu() {
        let mut site = site();
        site.toggle_menu();
        let link = nav_link(&site, "#gallery");
        let outcome = site.dispatch(UiEvent::NavLinkClicked { node: link });

        assert!(outcome.prevent_default);
        assert_eq!(site.state().current_section, "gallery");
        assert!(!site.state().is_menu_open);
    }

    #[test]
    fn menu_button_stops_propagation() {
        let mut site = site();
        let outcome = site.dispatch(UiEvent::MenuButtonClicked);
        assert!(outcome.stop_propagation);
        assert!(site.state().is_menu_open);

        site.dispatch(UiEvent::DocumentClicked { inside_menu: true });
        assert!(site.state().is_menu_open);
        site.dispatch(UiEvent::DocumentClicked { inside_menu: false });
        assert!(!site.state().is_menu_open);
        let button = site.surface().query_first(Role::MenuButton).unwrap();
        assert_eq!(site.surface().inner_html(button), MenuIcon::Open.html());
    }

    #[test]
    fn orientation_change_closes_and_schedules_retrigger() {
        let mut site = site();
        site.toggle_menu();
        let before = site.scheduler().active_count();
        site.dispatch(UiEvent::OrientationChanged);
        assert!(!site.state().is_menu_open);
        assert_eq!(site.scheduler().active_count(), before + 1);
    }

    #[test]
    fn failing_handler_yields_neutral_outcome() {
        let mut site = Site::with_seed(
            Document::portfolio().with_failing_alerts(),
            SiteConfig::default(),
            1,
        );
        let button = site.surface().query_first(Role::ViewProfileButton).unwrap();
        let outcome = site.dispatch(UiEvent::ViewProfileClicked { node: button });
        assert_eq!(outcome, Outcome::default());
        assert!(site.surface().has_class(button, classes::CLICKED));
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut site = site();
        site.unmount();
        site.fire_timer(TaskId(0));
        assert_eq!(site.loading_progress(), 0.0);
    }

    #[test]
    fn copy_command_notifies() {
        let mut site = site();
        site.execute(Command::CopyUid);
        let settled = site.surface_mut().take_settled_clipboard_write();
        if let Some(ok) = settled {
            site.dispatch(UiEvent::ClipboardWriteSettled { ok });
        }
        assert!(site.live_notification().is_some());
    }
}
