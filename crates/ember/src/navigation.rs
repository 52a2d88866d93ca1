//! Section switching and the mobile menu.

use ember_scene::{AppState, MenuIcon, Role, SectionId, classes};

use crate::animation::AnimationTrigger;
use crate::site::Ctx;
use crate::surface::Surface;

/// Sole owner of [`AppState`].
#[derive(Debug, Default)]
pub struct NavigationController {
    state: AppState,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Brings state and page back to `initial` with the menu closed, without
    /// scrolling or animating. Used on mount.
    pub fn reset<S: Surface>(&mut self, ctx: &mut Ctx<S>, initial: &SectionId) {
        self.state = AppState::default();
        self.activate(ctx, initial);
        self.close_menu(ctx);
    }

    /// Makes `section` the only active section and replays its animations.
    ///
    /// An id without a matching section changes nothing. Returns whether the
    /// section was shown.
    pub fn show_section<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        animations: &mut AnimationTrigger,
        section: &SectionId,
    ) -> bool {
        if !self.activate(ctx, section) {
            return false;
        }
        ctx.surface.scroll_to_top();
        animations.trigger(ctx, section);
        true
    }

    /// Moves the `active` markers and `current_section` to `section`.
    fn activate<S: Surface>(&mut self, ctx: &mut Ctx<S>, section: &SectionId) -> bool {
        let Some(target) = ctx.surface.section(section) else {
            log::debug!("show_section: no section '{section}'");
            return false;
        };

        for node in ctx.surface.query(Role::Section) {
            ctx.surface.remove_class(node, classes::ACTIVE);
        }

        let href = section.href();
        for link in ctx.surface.query(Role::NavLink) {
            ctx.surface.remove_class(link, classes::ACTIVE);
            if ctx.surface.attribute(link, "href").as_deref() == Some(href.as_str()) {
                ctx.surface.add_class(link, classes::ACTIVE);
            }
        }

        ctx.surface.add_class(target, classes::ACTIVE);
        self.state.current_section = section.clone();
        true
    }

    pub fn toggle_menu<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        if self.state.is_menu_open {
            self.close_menu(ctx);
            return;
        }
        self.state.is_menu_open = true;
        if let Some(nav_links) = ctx.surface.query_first(Role::NavLinks) {
            ctx.surface.add_class(nav_links, classes::ACTIVE);
        }
        set_menu_icon(ctx, MenuIcon::Close);
        set_scroll_locked(ctx, true);
    }

    /// Idempotent: closing a closed menu rewrites the same closed state.
    pub fn close_menu<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        self.state.is_menu_open = false;
        if let Some(nav_links) = ctx.surface.query_first(Role::NavLinks) {
            ctx.surface.remove_class(nav_links, classes::ACTIVE);
        }
        set_menu_icon(ctx, MenuIcon::Open);
        set_scroll_locked(ctx, false);
    }
}

fn set_menu_icon<S: Surface>(ctx: &mut Ctx<S>, icon: MenuIcon) {
    if let Some(button) = ctx.surface.query_first(Role::MenuButton) {
        ctx.surface.set_inner_html(button, icon.html());
    }
}

fn set_scroll_locked<S: Surface>(ctx: &mut Ctx<S>, locked: bool) {
    if let Some(body) = ctx.surface.query_first(Role::Body) {
        ctx.surface
            .set_style(body, "overflow", if locked { "hidden" } else { "" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::Document;
    use crate::site::Ctx;

    fn fixture() -> (Ctx<Document>, NavigationController, AnimationTrigger) {
        (
            Ctx::seeded(Document::portfolio(), Default::default(), 1),
            NavigationController::new(),
            AnimationTrigger::new(),
        )
    }

    fn active_sections(ctx: &Ctx<Document>) -> Vec<String> {
        ctx.surface
            .query(Role::Section)
            .into_iter()
            .filter(|node| ctx.surface.has_class(*node, classes::ACTIVE))
            .filter_map(|node| ctx.surface.html_id(node).map(str::to_string))
            .collect()
    }

    #[test]
    fn showing_a_section_activates_only_it() {
        let (mut ctx, mut nav, mut animations) = fixture();
        assert!(nav.show_section(&mut ctx, &mut animations, &SectionId::new("squad")));
        assert_eq!(active_sections(&ctx), vec!["squad"]);
        assert_eq!(nav.state().current_section, "squad");

        assert!(nav.show_section(&mut ctx, &mut animations, &SectionId::new("gallery")));
        assert_eq!(active_sections(&ctx), vec!["gallery"]);
    }

    #[test]
    fn unknown_section_is_a_no_op() {
        let (mut ctx, mut nav, mut animations) = fixture();
        nav.show_section(&mut ctx, &mut animations, &SectionId::new("about"));
        let before = active_sections(&ctx);

        assert!(!nav.show_section(&mut ctx, &mut animations, &SectionId::new("missing")));
        assert_eq!(active_sections(&ctx), before);
        assert_eq!(nav.state().current_section, "about");
    }

    #[test]
    fn matching_nav_link_becomes_active() {
        let (mut ctx, mut nav, mut animations) = fixture();
        nav.show_section(&mut ctx, &mut animations, &SectionId::new("contact"));
        let active_links: Vec<String> = ctx
            .surface
            .query(Role::NavLink)
            .into_iter()
            .filter(|link| ctx.surface.has_class(*link, classes::ACTIVE))
            .filter_map(|link| ctx.surface.attribute(link, "href"))
            .collect();
        assert_eq!(active_links, vec!["#contact"]);
    }

    #[test]
    fn showing_a_section_scrolls_to_top() {
        let (mut ctx, mut nav, mut animations) = fixture();
        nav.show_section(&mut ctx, &mut animations, &SectionId::new("about"));
        assert_eq!(ctx.surface.scroll_to_top_count(), 1);
    }

    #[test]
    fn reset_moves_markers_back_without_scrolling() {
        let (mut ctx, mut nav, mut animations) = fixture();
        nav.show_section(&mut ctx, &mut animations, &SectionId::new("gallery"));
        nav.toggle_menu(&mut ctx);

        nav.reset(&mut ctx, &SectionId::home());
        assert_eq!(active_sections(&ctx), vec!["home"]);
        assert_eq!(nav.state().current_section, "home");
        assert!(!nav.state().is_menu_open);
        assert_eq!(ctx.surface.scroll_to_top_count(), 1);
    }

    #[test]
    fn toggle_opens_and_locks_scroll() {
        let (mut ctx, mut nav, _) = fixture();
        nav.toggle_menu(&mut ctx);
        let button = ctx.surface.query_first(Role::MenuButton).unwrap();
        let body = ctx.surface.query_first(Role::Body).unwrap();
        let nav_links = ctx.surface.query_first(Role::NavLinks).unwrap();

        assert!(nav.state().is_menu_open);
        assert_eq!(ctx.surface.inner_html(button), MenuIcon::Close.html());
        assert_eq!(ctx.surface.style(body, "overflow"), Some("hidden"));
        assert!(ctx.surface.has_class(nav_links, classes::ACTIVE));
    }

    #[test]
    fn full_toggle_cycle_restores_closed_state() {
        let (mut ctx, mut nav, _) = fixture();
        nav.close_menu(&mut ctx);
        let button = ctx.surface.query_first(Role::MenuButton).unwrap();
        let body = ctx.surface.query_first(Role::Body).unwrap();
        let closed_icon = ctx.surface.inner_html(button);
        let closed_overflow = ctx.surface.style(body, "overflow").map(str::to_string);

        nav.toggle_menu(&mut ctx);
        nav.toggle_menu(&mut ctx);

        assert!(!nav.state().is_menu_open);
        assert_eq!(ctx.surface.inner_html(button), closed_icon);
        assert_eq!(
            ctx.surface.style(body, "overflow").map(str::to_string),
            closed_overflow
        );
    }

    #[test]
    fn close_menu_is_idempotent() {
        let (mut ctx, mut nav, _) = fixture();
        nav.close_menu(&mut ctx);
        let snapshot = ctx.surface.snapshot();
        nav.close_menu(&mut ctx);
        assert_eq!(ctx.surface.snapshot(), snapshot);
        assert!(!nav.state().is_menu_open);
    }
}
