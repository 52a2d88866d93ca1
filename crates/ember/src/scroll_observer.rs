//! One-shot viewport triggers: entrance animations and counters.

use std::collections::BTreeSet;

use ember_scene::{NodeId, ObserverKind, Role, classes};

use crate::counter::CounterAnimator;
use crate::scheduler::Job;
use crate::site::Ctx;
use crate::surface::Surface;

#[derive(Debug, Default)]
pub struct ScrollObserver {
    entrance: BTreeSet<NodeId>,
    counter_targets: BTreeSet<NodeId>,
    pub counters: CounterAnimator,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every entrance and counter element with the surface.
    pub fn mount<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        for node in ctx.surface.query(Role::ScrollReveal) {
            if self.entrance.insert(node) {
                ctx.surface.observe(node, ObserverKind::Entrance);
            }
        }
        for node in ctx.surface.query(Role::CounterValue) {
            if self.counter_targets.insert(node) {
                ctx.surface.observe(node, ObserverKind::Counter);
            }
        }
        ctx.scheduler
            .after(ctx.config.animation.stat_bar_delay_ms, Job::FillStatBars);
    }

    pub fn unmount<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        for node in std::mem::take(&mut self.entrance) {
            ctx.surface.unobserve(node, ObserverKind::Entrance);
        }
        for node in std::mem::take(&mut self.counter_targets) {
            ctx.surface.unobserve(node, ObserverKind::Counter);
        }
        self.counters.clear();
    }

    /// Handles a viewport crossing. Fires at most once per element.
    pub fn entered<S: Surface>(
        &mut self,
        ctx: &mut Ctx<S>,
        kind: ObserverKind,
        node: NodeId,
        ratio: f64,
    ) {
        let threshold = match kind {
            ObserverKind::Entrance => ctx.config.animation.entrance_threshold,
            ObserverKind::Counter => ctx.config.animation.counter_threshold,
        };
        if ratio < threshold {
            return;
        }
        let watched = match kind {
            ObserverKind::Entrance => &mut self.entrance,
            ObserverKind::Counter => &mut self.counter_targets,
        };
        if !watched.remove(&node) {
            return;
        }
        ctx.surface.unobserve(node, kind);

        match kind {
            ObserverKind::Entrance => {
                if ctx.surface.has_class(node, classes::ANIMATE_ON_SCROLL) {
                    ctx.surface.add_class(node, classes::ANIMATE_SLIDE_UP);
                }
            }
            ObserverKind::Counter => self.counters.start(ctx, node),
        }
    }

    pub fn is_watching(&self, kind: ObserverKind, node: NodeId) -> bool {
        match kind {
            ObserverKind::Entrance => self.entrance.contains(&node),
            ObserverKind::Counter => self.counter_targets.contains(&node),
        }
    }
}

/// Widens every `data-width` stat bar to its percentage.
pub fn fill_stat_bars<S: Surface>(ctx: &mut Ctx<S>) {
    for bar in ctx.surface.query(Role::StatBar) {
        if let Some(width) = ctx.surface.attribute(bar, "data-width") {
            ctx.surface.set_style(bar, "width", &format!("{}%", width.trim()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::Document;

    fn mounted() -> (Ctx<Document>, ScrollObserver) {
        let mut ctx = Ctx::seeded(Document::portfolio(), Default::default(), 3);
        let mut observer = ScrollObserver::new();
        observer.mount(&mut ctx);
        (ctx, observer)
    }

    #[test]
    fn mount_observes_every_target() {
        let (ctx, observer) = mounted();
        for node in ctx.surface.query(Role::ScrollReveal) {
            assert!(observer.is_watching(ObserverKind::Entrance, node));
            assert!(ctx.surface.is_observed(node, ObserverKind::Entrance));
        }
        for node in ctx.surface.query(Role::CounterValue) {
            assert!(ctx.surface.is_observed(node, ObserverKind::Counter));
        }
    }

    #[test]
    fn entrance_below_threshold_waits() {
        let (mut ctx, mut observer) = mounted();
        let node = ctx.surface.query_first(Role::ScrollReveal).unwrap();
        observer.entered(&mut ctx, ObserverKind::Entrance, node, 0.05);
        assert!(!ctx.surface.has_class(node, classes::ANIMATE_SLIDE_UP));
        assert!(observer.is_watching(ObserverKind::Entrance, node));
    }

    #[test]
    fn entrance_fires_once_and_detaches() {
        let (mut ctx, mut observer) = mounted();
        let node = ctx.surface.query_first(Role::ScrollReveal).unwrap();
        observer.entered(&mut ctx, ObserverKind::Entrance, node, 0.2);
        assert!(ctx.surface.has_class(node, classes::ANIMATE_SLIDE_UP));
        assert!(!ctx.surface.is_observed(node, ObserverKind::Entrance));

        ctx.surface.remove_class(node, classes::ANIMATE_SLIDE_UP);
        observer.entered(&mut ctx, ObserverKind::Entrance, node, 1.0);
        assert!(!ctx.surface.has_class(node, classes::ANIMATE_SLIDE_UP));
    }

    #[test]
    fn counter_starts_at_half_visibility_only_once() {
        let (mut ctx, mut observer) = mounted();
        let node = ctx.surface.query_first(Role::CounterValue).unwrap();
        observer.entered(&mut ctx, ObserverKind::Counter, node, 0.3);
        assert!(!observer.counters.is_running(node));

        observer.entered(&mut ctx, ObserverKind::Counter, node, 0.5);
        assert!(observer.counters.is_running(node));
        assert!(!observer.is_watching(ObserverKind::Counter, node));
    }

    #[test]
    fn stat_bars_take_their_width() {
        let (mut ctx, _) = mounted();
        fill_stat_bars(&mut ctx);
        for bar in ctx.surface.query(Role::StatBar) {
            let expected = format!("{}%", ctx.surface.attribute(bar, "data-width").unwrap());
            assert_eq!(ctx.surface.style(bar, "width"), Some(expected.as_str()));
        }
    }
}
