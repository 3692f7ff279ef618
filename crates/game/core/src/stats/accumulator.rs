//! Working state threaded through the aggregator stages.

use super::bonus::{Bonus, BonusStack};
use super::channel::{SpecialValues, StatChannel, StatFlags};
use super::modifier::{Curse, CurseKind, Modifier};
use strum::EnumCount;

/// Curse penalties in percent, applied when each affected stat is finalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursePenalties {
    pub healing_received: i32,
    pub max_hp: i32,
    pub atk: i32,
    pub def: i32,
    pub all_stats: i32,
    pub no_exp: bool,
}

impl CursePenalties {
    pub fn add(&mut self, curse: Curse) {
        let percent = curse.percent.max(0);
        match curse.kind {
            CurseKind::HealingReceived => self.healing_received += percent,
            CurseKind::MaxHp => self.max_hp += percent,
            CurseKind::Atk => self.atk += percent,
            CurseKind::Def => self.def += percent,
            CurseKind::AllStats => self.all_stats += percent,
            CurseKind::NoExp => self.no_exp = true,
        }
    }
}

/// Raw equipment numbers that feed the resource and combat formulas directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EquipmentTotals {
    pub atk: i32,
    pub def: i32,
    pub hp: i32,
    pub mp: i32,
    /// ATK from socketed gems.
    pub socket_atk: i32,
}

/// Per-channel bonus stacks plus flags, keyed values and curse penalties.
///
/// `Accumulator::default()` is the reset stage: every channel at identity, no
/// flags, no curses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulator {
    channels: [BonusStack; StatChannel::COUNT],
    pub flags: StatFlags,
    pub specials: SpecialValues,
    pub curses: CursePenalties,
    pub equipment: EquipmentTotals,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            channels: core::array::from_fn(|_| BonusStack::new()),
            flags: StatFlags::empty(),
            specials: SpecialValues::default(),
            curses: CursePenalties::default(),
            equipment: EquipmentTotals::default(),
        }
    }
}

impl Accumulator {
    pub fn channel(&self, channel: StatChannel) -> &BonusStack {
        &self.channels[channel.index()]
    }

    /// A primary attribute's stack chained with the all-stats stack.
    pub fn attribute(&self, channel: StatChannel) -> BonusStack {
        self.channel(channel).chain(self.channel(StatChannel::AllStats))
    }

    pub fn push(&mut self, channel: StatChannel, bonus: Bonus) {
        self.channels[channel.index()].add(bonus);
    }

    pub fn apply(&mut self, modifier: &Modifier) {
        match modifier {
            Modifier::Flag(flags) => self.flags |= *flags,
            Modifier::Keyed { key, value } => self.specials.add(*key, *value),
            other => {
                if let Some((channel, bonus)) = other.channel_bonus() {
                    self.push(channel, bonus);
                }
            }
        }
    }

    pub fn apply_all<'m>(&mut self, modifiers: impl IntoIterator<Item = &'m Modifier>) {
        for modifier in modifiers {
            self.apply(modifier);
        }
    }

    pub fn curse(&mut self, curse: Curse) {
        self.curses.add(curse);
        if curse.kind == CurseKind::NoExp {
            self.flags |= StatFlags::NO_EXP;
        }
    }

    /// Flat total plus the multiplier's distance from identity, for channels
    /// that are themselves percentages (spell damage, lifesteal, gold, ...).
    pub fn percent_bonus(&self, channel: StatChannel) -> i32 {
        let stack = self.channel(channel);
        stack.flat_total() + stack.multiplier_percent() - 100
    }
}
