//! Replaying a section's entrance animations.
//!
//! Triggering strips the entrance classes from the whole page at once, then
//! after `restart_delay_ms` re-adds every animation class found under the
//! target section with a reflow in between, so the browser restarts the
//! animation instead of treating the class as already applied.

use std::collections::BTreeMap;

use ember_scene::{NodeId, Role, SectionId, classes};

use crate::scheduler::Job;
use crate::site::Ctx;
use crate::surface::Surface;

#[derive(Debug, Default)]
pub struct AnimationTrigger {
    /// Entrance classes taken off each element by the last global strip,
    /// kept until the element's section replays them.
    stripped: BTreeMap<NodeId, Vec<&'static str>>,
}

impl AnimationTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger<S: Surface>(&mut self, ctx: &mut Ctx<S>, section: &SectionId) {
        self.strip_all(ctx);
        ctx.scheduler.after(
            ctx.config.animation.restart_delay_ms,
            Job::RestartAnimations(section.clone()),
        );
    }

    fn strip_all<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        for node in ctx
            .surface
            .nodes_with_any_class(&classes::ENTRANCE_ANIMATIONS)
        {
            let stripped = self.stripped.entry(node).or_default();
            for class in classes::ENTRANCE_ANIMATIONS {
                if ctx.surface.has_class(node, class) {
                    ctx.surface.remove_class(node, class);
                    if !stripped.contains(&class) {
                        stripped.push(class);
                    }
                }
            }
        }
    }

    /// Re-applies the animation classes under `section`. Missing sections are skipped.
    pub fn restart<S: Surface>(&mut self, ctx: &mut Ctx<S>, section: &SectionId) {
        let Some(root) = ctx.surface.section(section) else {
            log::debug!("restart_animations: no section '{section}'");
            return;
        };

        let mut targets = ctx
            .surface
            .descendants_with_class_prefix(root, classes::ANIMATION_PREFIX);
        for node in self.stripped.keys() {
            if !targets.contains(node) && ctx.surface.closest(*node, Role::Section) == Some(root) {
                targets.push(*node);
            }
        }

        for node in targets {
            let mut markers: Vec<String> = ctx
                .surface
                .class_names(node)
                .into_iter()
                .filter(|class| classes::is_animation_marker(class))
                .collect();
            for class in self.stripped.remove(&node).unwrap_or_default() {
                if !markers.iter().any(|marker| marker == class) {
                    markers.push(class.to_string());
                }
            }
            for class in &markers {
                ctx.surface.remove_class(node, class);
                ctx.surface.force_reflow(node);
                ctx.surface.add_class(node, class);
            }
        }
    }

    pub fn clear(&mut self) {
        self.stripped.clear();
    }
}
