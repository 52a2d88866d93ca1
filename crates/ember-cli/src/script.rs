//! Timed input for `ember simulate`.

use anyhow::{Result, bail};
use ember_scene::{Command, UiEvent};
use serde::Deserialize;

/// One scripted step: at `at_ms` virtual milliseconds, dispatch `event` or run `command`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(default)]
    pub event: Option<UiEvent>,
    #[serde(default)]
    pub command: Option<Command>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Event(UiEvent),
    Command(Command),
}

/// Parses a JSON array of steps, ordered by time. Steps at the same time keep
/// their file order.
pub fn parse(source: &str) -> Result<Vec<(u64, Action)>> {
    let steps: Vec<Step> = serde_json::from_str(source)?;
    let mut actions = Vec::with_capacity(steps.len());
    for (index, step) in steps.into_iter().enumerate() {
        let action = match (step.event, step.command) {
            (Some(event), None) => Action::Event(event),
            (None, Some(command)) => Action::Command(command),
            (Some(_), Some(_)) => bail!("step {index} has both an event and a command"),
            (None, None) => bail!("step {index} has neither an event nor a command"),
        };
        actions.push((step.at_ms, action));
    }
    actions.sort_by_key(|(at_ms, _)| *at_ms);
    Ok(actions)
}
