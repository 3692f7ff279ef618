use crate::config::GameConfig;
use crate::env::Dice;

use super::events::CombatEvent;

/// Working context for one resolution: balance config, dice and the events
/// produced so far.
pub struct Resolution<'a> {
    pub config: &'a GameConfig,
    pub dice: Dice<'a>,
    pub events: Vec<CombatEvent>,
}

impl<'a> Resolution<'a> {
    pub fn new(config: &'a GameConfig, dice: Dice<'a>) -> Self {
        Self {
            config,
            dice,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.events.push(CombatEvent::log(message));
    }
}
