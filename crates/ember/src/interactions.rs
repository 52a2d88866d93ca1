//! Small page behaviours around the core navigation.

use ember_scene::{NodeId, Role, classes};

use crate::clipboard::ClipboardPublisher;
use crate::error::SiteError;
use crate::notification::NotificationPresenter;
use crate::scheduler::Job;
use crate::site::Ctx;
use crate::surface::Surface;

pub const SENDING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#;
pub const MESSAGE_SENT: &str = "Message sent successfully! I'll get back to you soon.";

#[derive(Debug)]
struct PendingSubmit {
    form: NodeId,
    button: Option<NodeId>,
    label: String,
}

#[derive(Debug, Default)]
pub struct Interactions {
    pending_submit: Option<PendingSubmit>,
    last_touch_ms: Option<f64>,
}

impl Interactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scrolled<S: Surface>(&mut self, ctx: &mut Ctx<S>, offset_y: f64) {
        let Some(button) = ctx.surface.query_first(Role::BackToTop) else {
            return;
        };
        if offset_y > ctx.config.interaction.back_to_top_offset {
            ctx.surface.add_class(button, classes::SHOW);
        } else {
            ctx.surface.remove_class(button, classes::SHOW);
        }
    }

    pub fn back_to_top<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        ctx.surface.scroll_to_top();
    }

    /// Simulates sending the contact form. Ignored while a send is pending.
    pub fn submit_contact<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        if self.pending_submit.is_some() {
            log::debug!("contact form already sending");
            return;
        }
        let Some(form) = ctx.surface.query_first(Role::ContactForm) else {
            return;
        };
        let button = ctx.surface.find_within(form, Role::SubmitButton);
        let label = button
            .map(|button| ctx.surface.inner_html(button))
            .unwrap_or_default();
        if let Some(button) = button {
            ctx.surface.set_inner_html(button, SENDING_LABEL);
            ctx.surface.set_disabled(button, true);
        }
        self.pending_submit = Some(PendingSubmit {
            form,
            button,
            label,
        });
        ctx.scheduler.after(
            ctx.config.interaction.form_submit_delay_ms,
            Job::FinishContactSubmit,
        );
    }

    pub fn finish_contact<S: Surface>(&mut self, ctx: &mut Ctx<S>) -> Result<(), SiteError> {
        let Some(pending) = self.pending_submit.take() else {
            return Ok(());
        };
        let alerted = ctx.surface.alert(MESSAGE_SENT);
        ctx.surface.reset_form(pending.form);
        if let Some(button) = pending.button {
            ctx.surface.set_inner_html(button, &pending.label);
            ctx.surface.set_disabled(button, false);
        }
        alerted?;
        Ok(())
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submit.is_some()
    }

    /// Adds `class` to `node` for the configured feedback duration.
    pub fn flash<S: Surface>(&mut self, ctx: &mut Ctx<S>, node: NodeId, class: &'static str) {
        ctx.surface.add_class(node, class);
        ctx.scheduler.after(
            ctx.config.interaction.feedback_ms,
            Job::ClearFeedback { node, class },
        );
    }

    pub fn clear_feedback<S: Surface>(&mut self, ctx: &mut Ctx<S>, node: NodeId, class: &str) {
        ctx.surface.remove_class(node, class);
    }

    /// Game cards copy the UID; returns whether the card was handled.
    pub fn social_card<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        clipboard: &mut ClipboardPublisher,
        notifications: &mut NotificationPresenter,
        node: NodeId,
    ) -> Result<bool, SiteError> {
        if !ctx.surface.has_class(node, classes::GAME_CARD) {
            return Ok(false);
        }
        self.flash(ctx, node, classes::PULSE);
        clipboard.copy_uid(ctx, notifications)?;
        Ok(true)
    }

    pub fn gallery_item<S: Surface>(&mut self, ctx: &mut Ctx<S>, node: NodeId) {
        let Some(overlay) = ctx.surface.find_within(node, Role::GalleryOverlay) else {
            return;
        };
        ctx.surface.set_style(overlay, "transform", "translateY(0)");
        ctx.scheduler.after(
            ctx.config.interaction.gallery_overlay_ms,
            Job::HideGalleryOverlay(overlay),
        );
    }

    pub fn hide_gallery_overlay<S: Surface>(&mut self, ctx: &mut Ctx<S>, overlay: NodeId) {
        ctx.surface.set_style(overlay, "transform", "translateY(100%)");
    }

    pub fn view_profile<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        node: NodeId,
    ) -> Result<(), SiteError> {
        self.flash(ctx, node, classes::CLICKED);
        let name = ctx
            .surface
            .closest(node, Role::SquadMemberCard)
            .and_then(|card| ctx.surface.find_within(card, Role::MemberName))
            .and_then(|name| ctx.surface.text(name));
        let Some(name) = name else {
            log::debug!("view profile {node}: no member name");
            return Ok(());
        };
        ctx.surface
            .alert(&format!("Opening {}'s profile...", name.trim()))?;
        Ok(())
    }

    /// Whether a touch end should be swallowed as the second half of a double tap.
    pub fn touch_ended<S: Surface>(&mut self, ctx: &mut Ctx<S>, at_ms: f64) -> bool {
        let window = ctx.config.interaction.double_tap_window_ms;
        let double_tap = self
            .last_touch_ms
            .is_some_and(|last| at_ms - last <= window);
        self.last_touch_ms = Some(at_ms);
        double_tap
    }

    pub fn connectivity<S: Surface>(&mut self, ctx: &mut Ctx<S>, online: bool) {
        let Some(body) = ctx.surface.query_first(Role::Body) else {
            return;
        };
        if online {
            log::info!("back online");
            ctx.surface.remove_class(body, classes::OFFLINE);
        } else {
            log::info!("connection lost");
            ctx.surface.add_class(body, classes::OFFLINE);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::Document;

    fn ctx() -> Ctx<Document> {
        Ctx::seeded(Document::portfolio(), Default::default(), 12)
    }

    #[test]
    fn back_to_top_shows_past_offset() {
        let mut ctx = ctx();
        let mut interactions = Interactions::new();
        let button = ctx.surface.query_first(Role::BackToTop).unwrap();

        interactions.scrolled(&mut ctx, 301.0);
        assert!(ctx.surface.has_class(button, classes::SHOW));
        interactions.scrolled(&mut ctx, 300.0);
        assert!(!ctx.surface.has_class(button, classes::SHOW));
    }

    #[test]
    fn contact_submit_round_trip() {
        let mut ctx = ctx();
        let mut interactions = Interactions::new();
        let form = ctx.surface.query_first(Role::ContactForm).unwrap();
        let button = ctx.surface.find_within(form, Role::SubmitButton).unwrap();
        let label = ctx.surface.inner_html(button);

        interactions.submit_contact(&mut ctx);
        assert_eq!(ctx.surface.inner_html(button), SENDING_LABEL);
        assert!(ctx.surface.is_disabled(button));

        interactions.submit_contact(&mut ctx);
        assert_eq!(ctx.scheduler.active_count(), 1);

        interactions.finish_contact(&mut ctx).unwrap();
        assert_eq!(ctx.surface.inner_html(button), label);
        assert!(!ctx.surface.is_disabled(button));
        assert_eq!(ctx.surface.alerts(), [MESSAGE_SENT]);
        assert_eq!(ctx.surface.form_resets(form), 1);
    }

    #[test]
    fn double_tap_is_detected_within_window() {
        let mut ctx = ctx();
        let mut interactions = Interactions::new();
        assert!(!interactions.touch_ended(&mut ctx, 1000.0));
        assert!(interactions.touch_ended(&mut ctx, 1200.0));
        assert!(!interactions.touch_ended(&mut ctx, 1600.0));
    }

    #[test]
    fn plain_social_card_is_not_handled() {
        let mut ctx = ctx();
        let mut interactions = Interactions::new();
        let card = ctx
            .surface
            .query(Role::SocialCard)
            .into_iter()
            .find(|card| !ctx.surface.has_class(*card, classes::GAME_CARD))
            .unwrap();
        let handled = interactions
            .social_card(
                &mut ctx,
                &mut ClipboardPublisher::new(),
                &mut NotificationPresenter::new(),
                card,
            )
            .unwrap();
        assert!(!handled);
        assert!(!ctx.surface.has_class(card, classes::PULSE));
    }

    #[test]
    fn view_profile_names_the_member() {
        let mut ctx = ctx();
        let mut interactions = Interactions::new();
        let button = ctx.surface.query_first(Role::ViewProfileButton).unwrap();
        interactions.view_profile(&mut ctx, button).unwrap();
        assert_eq!(ctx.surface.alerts(), ["Opening Nova's profile..."]);
        assert!(ctx.surface.has_class(button, classes::CLICKED));
    }

    #[test]
    fn gallery_overlay_slides_in() {
        let mut ctx = ctx();
        let mut interactions = Interactions::new();
        let item = ctx.surface.query_first(Role::GalleryItem).unwrap();
        let overlay = ctx.surface.find_within(item, Role::GalleryOverlay).unwrap();
        interactions.gallery_item(&mut ctx, item);
        assert_eq!(ctx.surface.style(overlay, "transform"), Some("translateY(0)"));
        interactions.hide_gallery_overlay(&mut ctx, overlay);
        assert_eq!(
            ctx.surface.style(overlay, "transform"),
            Some("translateY(100%)")
        );
    }

    #[test]
    fn offline_marks_the_body() {
        let mut ctx = ctx();
        let mut interactions = Interactions::new();
        let body = ctx.surface.query_first(Role::Body).unwrap();
        interactions.connectivity(&mut ctx, false);
        assert!(ctx.surface.has_class(body, classes::OFFLINE));
        interactions.connectivity(&mut ctx, true);
        assert!(!ctx.surface.has_class(body, classes::OFFLINE));
    }
}
