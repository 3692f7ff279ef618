//! Status effects carried by characters and enemies.
//!
//! Effects count down once per combat round. An effect with
//! `remaining_turns <= 0` is purged before the next recompute; a shield is
//! purged as soon as its absorption magnitude is spent.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::ids::StatusId;
use crate::stats::StatChannel;

/// What a status effect does while active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Stat contributions (read by the aggregator)
    // ========================================================================
    /// Flat bonus of `magnitude` on a channel (STR, VIT, INT, DEF, dodge, ...).
    StatBoost(StatChannel),

    /// Percentage bonus of `magnitude` on a channel (gold, EXP, ...).
    Multiplier(StatChannel),

    /// Outgoing damage reduced by `magnitude` percent.
    DamageDown,

    /// Self-inflicted rage: `magnitude` percent more damage, less effective DEF.
    Frenzy,

    // ========================================================================
    // Combat effects (read by the session)
    // ========================================================================
    /// Absorbs up to `magnitude` incoming damage.
    Shield,

    /// Loses `magnitude` HP at the end of each round.
    Poison,

    /// Recovers `magnitude` HP at the end of each round.
    Regen,

    /// Reflects `magnitude` percent of mitigated damage to the attacker.
    PlagueWard,

    /// Skips the next action.
    Stun,
}

impl StatusKind {
    pub fn is_damage_over_time(self) -> bool {
        matches!(self, StatusKind::Poison)
    }
}

/// Status descriptor stored in skill and item catalogs.
///
/// Applying it clones it into a live [`StatusEffect`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub id: StatusId,
    pub kind: StatusKind,
    pub turns: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: i32,
}

impl StatusTemplate {
    pub fn instantiate(&self) -> StatusEffect {
        StatusEffect {
            id: self.id.clone(),
            kind: self.kind,
            remaining_turns: self.turns,
            magnitude: self.magnitude,
        }
    }
}

/// A live status effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: StatusId,
    pub kind: StatusKind,
    pub remaining_turns: i32,
    pub magnitude: i32,
}

impl StatusEffect {
    pub fn is_expired(&self) -> bool {
        self.remaining_turns <= 0 || (self.kind == StatusKind::Shield && self.magnitude <= 0)
    }
}

/// HP changes produced by one end-of-round tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub damage: i32,
    pub healing: i32,
}

/// Active status effects, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect.
    ///
    /// Re-applying an effect with the same id refreshes its duration and
    /// magnitude in place. Shields always stack as separate entries. Returns
    /// `false` when the list is full and the effect was dropped.
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        if effect.kind != StatusKind::Shield
            && let Some(existing) = self.effects.iter_mut().find(|e| e.id == effect.id)
        {
            *existing = effect;
            return true;
        }
        self.effects.try_push(effect).is_ok()
    }

    /// Removes expired effects and drained shields.
    pub fn purge_expired(&mut self) {
        self.effects.retain(|e| !e.is_expired());
    }

    /// Sums damage-over-time and regeneration, then counts every effect down.
    pub fn tick(&mut self) -> StatusTick {
        let mut tick = StatusTick::default();
        for effect in &mut self.effects {
            match effect.kind {
                StatusKind::Poison => tick.damage += effect.magnitude.max(0),
                StatusKind::Regen => tick.healing += effect.magnitude.max(0),
                _ => {}
            }
            effect.remaining_turns -= 1;
        }
        self.purge_expired();
        tick
    }

    /// Absorbs `damage` with shields, oldest first. Returns the residual.
    pub fn absorb(&mut self, damage: i32) -> i32 {
        let mut residual = damage;
        for shield in self
            .effects
            .iter_mut()
            .filter(|e| e.kind == StatusKind::Shield && e.magnitude > 0)
        {
            if residual <= 0 {
                break;
            }
            let absorbed = residual.min(shield.magnitude);
            shield.magnitude -= absorbed;
            residual -= absorbed;
        }
        self.effects
            .retain(|e| !(e.kind == StatusKind::Shield && e.magnitude <= 0));
        residual
    }

    /// Consumes one stun, if present. Returns whether the holder is stunned.
    pub fn consume_stun(&mut self) -> bool {
        match self.effects.iter().position(|e| e.kind == StatusKind::Stun) {
            Some(index) => {
                self.effects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every damage-over-time effect.
    pub fn cleanse_damage_over_time(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.kind.is_damage_over_time());
        before - self.effects.len()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.active().any(|e| e.kind == kind)
    }

    /// Summed magnitude of active effects of `kind`.
    pub fn total(&self, kind: StatusKind) -> i32 {
        self.active()
            .filter(|e| e.kind == kind)
            .map(|e| e.magnitude)
            .sum()
    }

    /// Effects that have not expired yet.
    pub fn active(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter().filter(|e| !e.is_expired())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
