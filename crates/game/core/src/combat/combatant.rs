//! The seam shared by both sides of an encounter.

use crate::state::{Character, Enemy, StatusEffect, StatusEffects, StatusKind};
use crate::stats::{SpecialValues, StatChannel, StatFlags};

/// Anything that can take a hit.
pub trait Combatant {
    fn hp(&self) -> i32;

    fn set_hp(&mut self, hp: i32);

    /// Effective DEF before frenzy.
    fn def(&self) -> i32;

    /// Derived dodge chance in percent.
    fn dodge(&self) -> i32;

    fn flags(&self) -> StatFlags;

    fn specials(&self) -> SpecialValues;

    fn status(&self) -> &StatusEffects;

    fn status_mut(&mut self) -> &mut StatusEffects;

    fn invulnerable_turns_mut(&mut self) -> &mut u32;

    /// Heals up to max HP. Returns the HP gained.
    fn restore_hp(&mut self, amount: i32) -> i32;

    fn is_dead(&self) -> bool {
        self.hp() <= 0
    }

    fn take_damage(&mut self, amount: i32) {
        let hp = self.hp().saturating_sub(amount.max(0));
        self.set_hp(hp);
    }

    /// Applies a status, honoring stun immunity. Returns whether it stuck.
    fn apply_status(&mut self, effect: StatusEffect) -> bool {
        if effect.kind == StatusKind::Stun && self.flags().contains(StatFlags::STUN_IMMUNE) {
            return false;
        }
        self.status_mut().apply(effect)
    }
}

impl Combatant for Character {
    fn hp(&self) -> i32 {
        self.hp
    }

    fn set_hp(&mut self, hp: i32) {
        self.hp = hp;
    }

    fn def(&self) -> i32 {
        self.derived.def
    }

    fn dodge(&self) -> i32 {
        self.derived.dodge
    }

    fn flags(&self) -> StatFlags {
        self.derived.flags
    }

    fn specials(&self) -> SpecialValues {
        self.derived.specials
    }

    fn status(&self) -> &StatusEffects {
        &self.status
    }

    fn status_mut(&mut self) -> &mut StatusEffects {
        &mut self.status
    }

    fn invulnerable_turns_mut(&mut self) -> &mut u32 {
        &mut self.invulnerable_turns
    }

    fn restore_hp(&mut self, amount: i32) -> i32 {
        self.heal(amount)
    }
}

impl Combatant for Enemy {
    fn hp(&self) -> i32 {
        self.hp
    }

    fn set_hp(&mut self, hp: i32) {
        self.hp = hp;
    }

    /// Buff-granted flat DEF stacks on the template value.
    fn def(&self) -> i32 {
        self.def + self.status.total(StatusKind::StatBoost(StatChannel::Def))
    }

    fn dodge(&self) -> i32 {
        0
    }

    fn flags(&self) -> StatFlags {
        self.traits.flags
    }

    fn specials(&self) -> SpecialValues {
        self.traits.specials
    }

    fn status(&self) -> &StatusEffects {
        &self.status
    }

    fn status_mut(&mut self) -> &mut StatusEffects {
        &mut self.status
    }

    fn invulnerable_turns_mut(&mut self) -> &mut u32 {
        &mut self.invulnerable_turns
    }

    fn restore_hp(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        (self.hp - before).max(0)
    }
}
