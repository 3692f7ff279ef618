//! EXP, levels and victory rewards.

use crate::config::GameConfig;
use crate::env::{Env, OracleError};
use crate::state::{Character, Enemy, MetaProgress, RunState};
use crate::stats::{self, DerivedStats, StatFlags};

/// EXP needed to go from `level` to `level + 1`.
pub fn exp_to_next(config: &GameConfig, level: u32) -> u32 {
    config.exp_per_level.saturating_mul(level.max(1))
}

/// EXP and gold for defeating `enemy`.
///
/// NO_EXP blocks EXP absolutely, whatever the multiplier says.
pub fn rewards(derived: &DerivedStats, enemy: &Enemy) -> (u32, u32) {
    let exp = if derived.flags.contains(StatFlags::NO_EXP) {
        0
    } else {
        scale(enemy.exp, derived.exp_multiplier)
    };
    (exp, scale(enemy.gold, derived.gold_multiplier))
}

/// Adds EXP and applies every level-up it pays for.
///
/// Each level-up recomputes and then restores HP/MP to the new caps. Returns
/// the levels reached plus any lookup failures from the recomputes.
pub fn grant_exp(
    character: &mut Character,
    run: &RunState,
    meta: &MetaProgress,
    env: &Env<'_>,
    exp: u32,
) -> (Vec<u32>, Vec<OracleError>) {
    let config = env.config();
    let mut levels = Vec::new();
    let mut skipped = Vec::new();

    character.exp = character.exp.saturating_add(exp);
    loop {
        let needed = exp_to_next(config, character.level);
        if needed == 0 || character.exp < needed {
            break;
        }
        character.exp -= needed;
        character.level += 1;
        skipped.extend(stats::recompute(character, run, meta, env));
        character.restore();
        levels.push(character.level);
    }
    (levels, skipped)
}

fn scale(value: u32, percent: i32) -> u32 {
    let percent = percent.max(0) as u64;
    (u64::from(value) * percent / 100).min(u64::from(u32::MAX)) as u32
}
