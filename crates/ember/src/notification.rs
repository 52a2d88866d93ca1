//! The toast shown after a copy. Only one exists at a time.

use ember_scene::NodeId;
use rand::Rng;
use ulid::Ulid;

use crate::error::SurfaceError;
use crate::scheduler::{Job, TaskId};
use crate::site::Ctx;
use crate::surface::Surface;

pub const SLIDE_OUT: &str = "slideOutRight 0.3s ease-out";

#[derive(Debug)]
struct Toast {
    id: Ulid,
    node: NodeId,
    timer: TaskId,
}

#[derive(Debug, Default)]
pub struct NotificationPresenter {
    live: Option<Toast>,
    seq: u64,
}

impl NotificationPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any live toast with one showing `message`.
    pub fn notify<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        message: &str,
    ) -> Result<Ulid, SurfaceError> {
        self.remove_live(ctx);
        let node = ctx.surface.mount_notification(message)?;

        self.seq += 1;
        let id = Ulid::from_parts(self.seq, ctx.rng.random());
        let timer = ctx
            .scheduler
            .after(ctx.config.notification.visible_ms, Job::DismissNotification(id));
        self.live = Some(Toast { id, node, timer });
        log::debug!("notification {id}: {message}");
        Ok(id)
    }

    pub fn dismiss<S: Surface>(&mut self, ctx: &mut Ctx<S>, id: Ulid) {
        let Some(toast) = self.live.as_mut().filter(|toast| toast.id == id) else {
            return;
        };
        ctx.surface.set_style(toast.node, "animation", SLIDE_OUT);
        toast.timer = ctx
            .scheduler
            .after(ctx.config.notification.exit_ms, Job::RemoveNotification(id));
    }

    pub fn remove<S: Surface>(&mut self, ctx: &mut Ctx<S>, id: Ulid) {
        if self.live.as_ref().is_some_and(|toast| toast.id == id) {
            self.remove_live(ctx);
        }
    }

    fn remove_live<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        let Some(toast) = self.live.take() else {
            return;
        };
        ctx.scheduler.cancel(toast.timer);
        if ctx.surface.is_attached(toast.node) {
            ctx.surface.detach(toast.node);
        }
    }

    pub fn live_node(&self) -> Option<NodeId> {
        self.live.as_ref().map(|toast| toast.node)
    }

    pub fn live_id(&self) -> Option<Ulid> {
        self.live.as_ref().map(|toast| toast.id)
    }

    pub fn clear<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        self.remove_live(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::Document;

    fn ctx() -> Ctx<Document> {
        Ctx::seeded(Document::portfolio(), Default::default(), 4)
    }

    #[test]
    fn second_toast_replaces_the_first() {
        let mut ctx = ctx();
        let mut presenter = NotificationPresenter::new();
        presenter.notify(&mut ctx, "first").unwrap();
        let first = presenter.live_node().unwrap();
        presenter.notify(&mut ctx, "second").unwrap();

        assert!(!ctx.surface.is_attached(first));
        assert_eq!(ctx.surface.notifications().len(), 1);
    }

    #[test]
    fn dismissal_of_a_replaced_toast_is_ignored() {
        let mut ctx = ctx();
        let mut presenter = NotificationPresenter::new();
        let first = presenter.notify(&mut ctx, "first").unwrap();
        presenter.notify(&mut ctx, "second").unwrap();
        let node = presenter.live_node().unwrap();

        presenter.dismiss(&mut ctx, first);
        presenter.remove(&mut ctx, first);
        assert!(ctx.surface.is_attached(node));
        assert_eq!(ctx.surface.style(node, "animation"), None);
    }

    #[test]
    fn dismiss_then_remove_detaches() {
        let mut ctx = ctx();
        let mut presenter = NotificationPresenter::new();
        let id = presenter.notify(&mut ctx, "hello").unwrap();
        let node = presenter.live_node().unwrap();

        presenter.dismiss(&mut ctx, id);
        assert_eq!(ctx.surface.style(node, "animation"), Some(SLIDE_OUT));
        presenter.remove(&mut ctx, id);
        assert!(!ctx.surface.is_attached(node));
        assert_eq!(presenter.live_id(), None);
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let mut ctx = ctx();
        let mut presenter = NotificationPresenter::new();
        let first = presenter.notify(&mut ctx, "a").unwrap();
        let second = presenter.notify(&mut ctx, "b").unwrap();
        assert!(second > first);
    }
}
