//! Typed catalog identifiers.
//!
//! Every catalog entry (item, skill, passive, ...) is keyed by a string id in
//! content files. Each kind gets its own newtype so a `SkillId` can never be
//! passed where a `RelicId` is expected.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Item template identifier.
    ItemId
);
string_id!(
    /// Skill identifier (shared by player and enemy skills).
    SkillId
);
string_id!(
    /// Passive ability identifier.
    PassiveId
);
string_id!(
    /// Relic identifier.
    RelicId
);
string_id!(
    /// Equipment set identifier (the `setBonus` tag on items).
    SetId
);
string_id!(
    /// Enemy or boss template identifier.
    EnemyId
);
string_id!(
    /// Run-level challenge modifier identifier.
    RunModifierId
);
string_id!(
    /// Permanent meta-progression upgrade identifier.
    MetaUpgradeId
);
string_id!(
    /// Character evolution identifier.
    EvolutionId
);
string_id!(
    /// Status effect identifier, used for refresh-on-reapply.
    StatusId
);
