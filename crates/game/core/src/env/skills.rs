use crate::ids::SkillId;
use crate::state::StatusTemplate;

/// Read-only skill catalog shared by the player and enemies.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition>;
}

/// Skill category as stored in content files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Deals damage `hits` times.
    Strike,
    Heal,
    /// Pushes its status onto the caster.
    Buff,
    /// Pushes its status onto the target.
    Debuff,
    /// Narrative-only; resolves to nothing.
    Special,
}

/// Resolver dispatch archetype, derived from kind + hit count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillArchetype {
    SingleHit,
    MultiHit(u32),
    Heal,
    BuffDebuff,
    Special,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    #[default]
    Physical,
    Magical,
}

/// Requirements for using a skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRequirement {
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub kind: SkillKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    /// Power in percent (`150` = ×1.5).
    #[cfg_attr(feature = "serde", serde(default = "default_power"))]
    pub power: i32,
    /// MP cost.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_hits"))]
    pub hits: u32,
    /// Flat damage added before the power multiplier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_def: bool,
    /// Lifesteal in percent of damage dealt.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lifesteal: i32,
    /// Invulnerability turns granted by heals.
    #[cfg_attr(feature = "serde", serde(default))]
    pub invulnerable_turns: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub req: Option<SkillRequirement>,
}

#[cfg(feature = "serde")]
fn default_power() -> i32 {
    100
}

#[cfg(feature = "serde")]
fn default_hits() -> u32 {
    1
}

impl SkillDefinition {
    pub fn archetype(&self) -> SkillArchetype {
        match self.kind {
            SkillKind::Strike if self.hits > 1 => SkillArchetype::MultiHit(self.hits),
            SkillKind::Strike => SkillArchetype::SingleHit,
            SkillKind::Heal => SkillArchetype::Heal,
            SkillKind::Buff | SkillKind::Debuff => SkillArchetype::BuffDebuff,
            SkillKind::Special => SkillArchetype::Special,
        }
    }

    /// Minimum character level required, if any.
    pub fn required_level(&self) -> u32 {
        self.req.map(|r| r.level).unwrap_or(0)
    }
}
