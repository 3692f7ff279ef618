/// Balance constants consumed by the stat pipeline and combat rules.
///
/// Percent values are integers (`150` = ×1.5). Per-point rates for dodge and
/// crit are expressed in hundredths of a percent so that fractional rates
/// stay exact under integer arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub base_hp: i32,
    pub hp_per_vit: i32,
    pub base_mp: i32,
    pub mp_per_int: i32,
    /// ATK granted per point of STR, in percent (`200` = 2 ATK per STR).
    pub atk_per_str: i32,
    /// Dodge granted per point of AGI, in hundredths of a percent.
    pub dodge_per_agi: i32,
    /// Crit chance granted per point of LUCK, in hundredths of a percent.
    pub crit_per_luck: i32,
    pub max_dodge: i32,
    pub crit_multiplier: i32,

    pub ethereal_dodge: u32,
    pub intangible_dodge: u32,
    pub frenzy_def_penalty: i32,

    /// Chance (percent) that an enemy uses a skill instead of attacking.
    pub enemy_skill_chance: u32,

    pub flee_base: i32,
    pub flee_per_level: i32,
    pub flee_per_floor: i32,
    pub flee_elite_penalty: i32,
    pub flee_boss_penalty: i32,

    /// Fraction of max HP restored by the auto-revive relic, in percent.
    pub revive_hp_percent: i32,
    /// EXP required per level: `exp_per_level * level`.
    pub exp_per_level: u32,
    /// Gold cost of the first enhancement; each further level adds the same.
    pub enhance_cost: u32,
    pub inventory_capacity: usize,
}

impl GameConfig {
    pub const MAX_GEM_SOCKETS: usize = 3;
    pub const MAX_HISTORY: usize = 200;
    pub const MAX_STATUS_EFFECTS: usize = 16;

    pub fn new() -> Self {
        Self {
            base_hp: 50,
            hp_per_vit: 10,
            base_mp: 20,
            mp_per_int: 5,
            atk_per_str: 200,
            dodge_per_agi: 50,
            crit_per_luck: 50,
            max_dodge: 75,
            crit_multiplier: 150,
            ethereal_dodge: 15,
            intangible_dodge: 30,
            frenzy_def_penalty: 5,
            enemy_skill_chance: 40,
            flee_base: 50,
            flee_per_level: 3,
            flee_per_floor: 2,
            flee_elite_penalty: 15,
            flee_boss_penalty: 30,
            revive_hp_percent: 50,
            exp_per_level: 100,
            enhance_cost: 50,
            inventory_capacity: 20,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
