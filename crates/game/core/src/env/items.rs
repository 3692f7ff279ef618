use crate::ids::{ItemId, SetId};
use crate::state::{EquipSlot, Gem, StatusTemplate};
use crate::stats::{Curse, Modifier};

/// Read-only item catalog, including set-bonus definitions.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &ItemId) -> Option<ItemTemplate>;

    fn set_bonus(&self, id: &SetId) -> Option<SetBonusDefinition>;
}

/// Immutable item template.
///
/// Templates never change at runtime; a character owns [`Item`] value copies
/// created from them.
///
/// [`Item`]: crate::state::Item
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: ItemStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sockets: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub curse: Option<Curse>,
    /// Per-item effects (e.g. "10% lifesteal"), folded in with set bonuses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique_effect: Vec<Modifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub set_bonus: Option<SetId>,
}

/// Item category with kind-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Weapon,
    Armor,
    Accessory,
    Consumable(ConsumableEffect),
    /// Socketable gem; not usable on its own.
    Gem(Gem),
}

impl ItemKind {
    /// The equipment slot this kind fits, if any.
    pub fn slot(&self) -> Option<EquipSlot> {
        match self {
            ItemKind::Weapon => Some(EquipSlot::Weapon),
            ItemKind::Armor => Some(EquipSlot::Armor),
            ItemKind::Accessory => Some(EquipSlot::Accessory),
            ItemKind::Consumable(_) | ItemKind::Gem(_) => None,
        }
    }
}

/// Effects of consumable items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    Potion {
        #[cfg_attr(feature = "serde", serde(default))]
        hp: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        mp: i32,
    },
    /// Grants a status effect to the user.
    Elixir(StatusTemplate),
    /// Removes damage-over-time effects.
    Antidote,
}

/// Base stat block of an equippable item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemStats {
    pub atk: i32,
    pub def: i32,
    pub hp: i32,
    pub mp: i32,
    pub str: i32,
    pub vit: i32,
    pub int: i32,
    pub agi: i32,
    pub luck: i32,
}

impl ItemStats {
    /// Applies `plus` enhancement levels to ATK/DEF/HP/MP.
    ///
    /// Each level adds 10% of the base value, at least +1 when the base is
    /// positive. Attribute bonuses do not scale.
    pub fn enhanced(&self, plus: u8) -> Self {
        let scale = |base: i32| -> i32 {
            if base <= 0 || plus == 0 {
                return base;
            }
            let per_level = (base / 10).max(1);
            base + per_level * i32::from(plus)
        };
        Self {
            atk: scale(self.atk),
            def: scale(self.def),
            hp: scale(self.hp),
            mp: scale(self.mp),
            ..*self
        }
    }
}

/// Bonuses unlocked by equipping several items sharing a set tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetBonusDefinition {
    pub id: SetId,
    pub name: String,
    /// Applied with exactly two pieces equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub two: Vec<Modifier>,
    /// Applied with three pieces equipped (replaces the two-piece tier).
    #[cfg_attr(feature = "serde", serde(default))]
    pub three: Vec<Modifier>,
}

impl SetBonusDefinition {
    /// The modifiers unlocked by `pieces` equipped items.
    pub fn tier(&self, pieces: usize) -> &[Modifier] {
        match pieces {
            0 | 1 => &[],
            2 => &self.two,
            _ => &self.three,
        }
    }
}
