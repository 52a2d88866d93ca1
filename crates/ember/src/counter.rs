//! Frame-driven numeric counters.
//!
//! A counter advances toward its target in a fixed number of equal steps,
//! one per animation frame, and then settles on the exact target. Duration is
//! bound to frames, not wall-clock time.

use std::collections::BTreeMap;

use ember_scene::NodeId;

use crate::scheduler::Job;
use crate::site::Ctx;
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub struct CounterWidget {
    pub target_value: f64,
    pub current_value: f64,
    pub is_integer: bool,
    steps: u32,
    step: u32,
}

/// One rendered value of a counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub finished: bool,
}

impl CounterWidget {
    pub fn new(target_value: f64, steps: u32) -> Self {
        Self {
            target_value,
            current_value: 0.0,
            is_integer: target_value.fract() == 0.0,
            steps: steps.max(1),
            step: 0,
        }
    }

    /// Advances one frame.
    ///
    /// Frames `1..=steps` render `target * k / steps`; the frame after renders
    /// the target and finishes. Non-positive targets finish on the first frame.
    pub fn advance(&mut self) -> CounterFrame {
        let finished = !(self.target_value > 0.0) || self.step >= self.steps;
        if finished {
            self.current_value = self.target_value;
        } else {
            self.step += 1;
            self.current_value = if self.step == self.steps {
                self.target_value
            } else {
                (self.target_value * f64::from(self.step) / f64::from(self.steps))
                    .min(self.target_value)
            };
        }
        CounterFrame {
            text: format_value(self.current_value, self.is_integer),
            finished,
        }
    }

    /// Every frame until the counter finishes, final value last.
    pub fn render_all(mut self) -> Vec<String> {
        let mut frames = Vec::new();
        loop {
            let frame = self.advance();
            frames.push(frame.text);
            if frame.finished {
                return frames;
            }
        }
    }
}

pub fn format_value(value: f64, is_integer: bool) -> String {
    if is_integer {
        format!("{:.0}", value.round())
    } else {
        format!("{value:.2}")
    }
}

/// Reads a `data-target` attribute. Non-numeric targets yield `None`.
pub fn parse_target(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Running counters keyed by their element.
#[derive(Debug, Default)]
pub struct CounterAnimator {
    running: BTreeMap<NodeId, CounterWidget>,
}

impl CounterAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting `node` up to its `data-target`. Already running or
    /// unparseable counters are left alone.
    pub fn start<S: Surface>(&mut self, ctx: &mut Ctx<S>, node: NodeId) {
        if self.running.contains_key(&node) {
            return;
        }
        let Some(target) = ctx
            .surface
            .attribute(node, "data-target")
            .as_deref()
            .and_then(parse_target)
        else {
            log::debug!("counter {node}: no numeric data-target");
            return;
        };
        self.running.insert(
            node,
            CounterWidget::new(target, ctx.config.animation.counter_steps),
        );
        ctx.scheduler.next_frame(Job::CounterFrame(node));
    }

    pub fn frame<S: Surface>(&mut self, ctx: &mut Ctx<S>, node: NodeId) {
        let Some(widget) = self.running.get_mut(&node) else {
            return;
        };
        let frame = widget.advance();
        ctx.surface.set_text(node, &frame.text);
        if frame.finished {
            self.running.remove(&node);
        } else {
            ctx.scheduler.next_frame(Job::CounterFrame(node));
        }
    }

    pub fn is_running(&self, node: NodeId) -> bool {
        self.running.contains_key(&node)
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_target_renders_fifty_steps_then_final() {
        let frames = CounterWidget::new(87.0, 50).render_all();
        assert_eq!(frames.len(), 51);
        assert_eq!(frames.last().unwrap(), "87");

        let values: Vec<i64> = frames.iter().map(|text| text.parse().unwrap()).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(values.iter().all(|value| *value <= 87));
    }

    #[test]
    fn fractional_target_uses_two_decimals() {
        let frames = CounterWidget::new(4.5, 50).render_all();
        assert_eq!(frames.last().unwrap(), "4.50");
        for text in &frames {
            let (_, decimals) = text.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2, "{text}");
        }
        assert_eq!(frames[0], "0.09");
    }

    #[test]
    fn step_count_does_not_depend_on_target() {
        for target in [1.0, 12.0, 98.5, 100.0, 1000.0, 3.7] {
            assert_eq!(CounterWidget::new(target, 50).render_all().len(), 51);
        }
    }

    #[test]
    fn non_positive_target_finishes_at_once() {
        assert_eq!(CounterWidget::new(0.0, 50).render_all(), vec!["0"]);
        assert_eq!(CounterWidget::new(-3.0, 50).render_all(), vec!["-3"]);
    }

    #[test]
    fn huge_integer_target_ends_exactly_on_target() {
        let frames = CounterWidget::new(1e20, 50).render_all();
        assert_eq!(frames.last().unwrap(), "100000000000000000000");
    }

    #[test]
    fn target_parsing() {
        assert_eq!(parse_target(" 87 "), Some(87.0));
        assert_eq!(parse_target("4.5"), Some(4.5));
        assert_eq!(parse_target("lots"), None);
        assert_eq!(parse_target("NaN"), None);
    }
}
