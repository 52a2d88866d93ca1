//! Stochastic live stats: status label, squad presence and win streak.
//!
//! Three independent repeating tasks. Each tick reads what is displayed and
//! writes a new value; a missing cell turns the tick into a no-op.

use ember_scene::{PresenceStatus, Role};
use rand::Rng;

use crate::scheduler::{Job, TaskId};
use crate::site::Ctx;
use crate::surface::Surface;

#[derive(Debug, Default)]
pub struct LiveUpdateScheduler {
    tasks: Vec<TaskId>,
}

impl LiveUpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        if !self.tasks.is_empty() {
            return;
        }
        let live = &ctx.config.live;
        self.tasks = vec![
            ctx.scheduler.every(live.status_interval_ms, Job::LiveStatus),
            ctx.scheduler.every(live.squad_interval_ms, Job::LiveSquad),
            ctx.scheduler.every(live.streak_interval_ms, Job::LiveStreak),
        ];
    }

    pub fn stop<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        for id in self.tasks.drain(..) {
            ctx.scheduler.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty()
    }
}

pub fn refresh_status<S: Surface>(ctx: &mut Ctx<S>) {
    let Some(cell) = ctx.surface.query_first(Role::LiveStatus) else {
        return;
    };
    let labels = &ctx.config.live.status_labels;
    if labels.is_empty() {
        return;
    }
    let label = labels[ctx.rng.random_range(0..labels.len())].clone();
    ctx.surface.set_text(cell, &label);
}

pub fn refresh_squad<S: Surface>(ctx: &mut Ctx<S>) {
    if ctx.surface.query_first(Role::SquadPresence).is_none() {
        return;
    }
    let size = ctx.config.live.squad_size.max(1);
    let online = ctx.rng.random_range(1..=size);
    apply_squad_presence(ctx, online);
}

/// Shows `online` of the squad as online and everyone else as idle.
pub fn apply_squad_presence<S: Surface>(ctx: &mut Ctx<S>, online: u32) {
    let Some(cell) = ctx.surface.query_first(Role::SquadPresence) else {
        return;
    };
    let size = ctx.config.live.squad_size;
    ctx.surface
        .set_text(cell, &format!("{online}/{size} Online"));

    for (index, dot) in ctx.surface.query(Role::PresenceDot).into_iter().enumerate() {
        let status = if (index as u32) < online {
            PresenceStatus::Online
        } else {
            PresenceStatus::Idle
        };
        for other in PresenceStatus::ALL {
            if other != status {
                ctx.surface.remove_class(dot, other.class());
            }
        }
        ctx.surface.add_class(dot, status.class());
    }
}

pub fn refresh_streak<S: Surface>(ctx: &mut Ctx<S>) {
    let probability = ctx.config.live.streak_increment_probability;
    let increment = ctx.rng.random_bool(probability.clamp(0.0, 1.0));
    apply_streak(ctx, increment);
}

/// Rewrites the displayed streak, adding one when `increment` is set.
/// Text without a leading integer is left untouched.
pub fn apply_streak<S: Surface>(ctx: &mut Ctx<S>, increment: bool) {
    let Some(cell) = ctx.surface.query_first(Role::WinStreak) else {
        return;
    };
    let Some(current) = ctx.surface.text(cell).as_deref().and_then(parse_leading_int) else {
        log::debug!("win streak cell does not start with a number");
        return;
    };
    let next = if increment { current.saturating_add(1) } else { current };
    ctx.surface.set_text(cell, &next.to_string());
}

/// Integer prefix of `text`, ignoring leading whitespace (`"12 wins"` → 12).
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::Document;

    fn ctx(seed: u64) -> Ctx<Document> {
        Ctx::seeded(Document::portfolio(), Default::default(), seed)
    }

    fn dots_with(ctx: &Ctx<Document>, status: PresenceStatus) -> usize {
        ctx.surface
            .query(Role::PresenceDot)
            .into_iter()
            .filter(|dot| ctx.surface.has_class(*dot, status.class()))
            .count()
    }

    #[test]
    fn squad_of_three_online() {
        let mut ctx = ctx(1);
        apply_squad_presence(&mut ctx, 3);
        let cell = ctx.surface.query_first(Role::SquadPresence).unwrap();
        assert_eq!(ctx.surface.text(cell).as_deref(), Some("3/4 Online"));
        assert_eq!(dots_with(&ctx, PresenceStatus::Online), 3);
        assert_eq!(dots_with(&ctx, PresenceStatus::Idle), 1);
        assert_eq!(dots_with(&ctx, PresenceStatus::Offline), 0);
    }

    #[test]
    fn random_squad_stays_in_range() {
        let mut ctx = ctx(99);
        for _ in 0..40 {
            refresh_squad(&mut ctx);
            let online = dots_with(&ctx, PresenceStatus::Online);
            assert!((1..=4).contains(&online));
            assert_eq!(online + dots_with(&ctx, PresenceStatus::Idle), 4);
            assert_eq!(dots_with(&ctx, PresenceStatus::Offline), 0);
        }
    }

    #[test]
    fn status_comes_from_the_label_set() {
        let mut ctx = ctx(5);
        let cell = ctx.surface.query_first(Role::LiveStatus).unwrap();
        for _ in 0..20 {
            refresh_status(&mut ctx);
            let text = ctx.surface.text(cell).unwrap();
            assert!(ctx.config.live.status_labels.contains(&text));
        }
    }

    #[test]
    fn streak_increments_by_one_at_most() {
        let mut ctx = ctx(8);
        let cell = ctx.surface.query_first(Role::WinStreak).unwrap();
        ctx.surface.set_text(cell, "12");
        apply_streak(&mut ctx, false);
        assert_eq!(ctx.surface.text(cell).as_deref(), Some("12"));
        apply_streak(&mut ctx, true);
        assert_eq!(ctx.surface.text(cell).as_deref(), Some("13"));
    }

    #[test]
    fn unreadable_streak_is_left_alone() {
        let mut ctx = ctx(8);
        let cell = ctx.surface.query_first(Role::WinStreak).unwrap();
        ctx.surface.set_text(cell, "many");
        apply_streak(&mut ctx, true);
        assert_eq!(ctx.surface.text(cell).as_deref(), Some("many"));
    }

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(parse_leading_int("12 wins"), Some(12));
        assert_eq!(parse_leading_int("  -4"), Some(-4));
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn start_is_idempotent() {
        let mut ctx = ctx(2);
        let mut live = LiveUpdateScheduler::new();
        live.start(&mut ctx);
        live.start(&mut ctx);
        assert_eq!(ctx.scheduler.active_count(), 3);
        live.stop(&mut ctx);
        assert_eq!(ctx.scheduler.active_count(), 0);
    }
}
