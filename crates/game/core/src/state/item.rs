use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{ItemKind, ItemStats, ItemTemplate};
use crate::ids::{ItemId, SetId};
use crate::stats::{Curse, Modifier, StatChannel};

use super::EquipSlot;

/// A socketable gem: a flat bonus on one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gem {
    pub channel: StatChannel,
    pub value: i32,
}

impl Gem {
    pub fn modifier(&self) -> Modifier {
        Modifier::flat(self.channel, self.value)
    }
}

/// An owned item instance.
///
/// Items are independent values. Equipping moves the value from the
/// inventory into a slot and unequipping moves it back, so two slots can never
/// share an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: ItemStats,
    /// Enhancement level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub plus: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sockets: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gems: ArrayVec<Gem, { GameConfig::MAX_GEM_SOCKETS }>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub curse: Option<Curse>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique_effect: Vec<Modifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub set_bonus: Option<SetId>,
}

impl Item {
    /// Creates a fresh copy of a catalog template.
    pub fn from_template(template: &ItemTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            kind: template.kind.clone(),
            stats: template.stats,
            plus: 0,
            sockets: template.sockets.min(GameConfig::MAX_GEM_SOCKETS as u8),
            gems: ArrayVec::new(),
            curse: template.curse,
            unique_effect: template.unique_effect.clone(),
            set_bonus: template.set_bonus.clone(),
        }
    }

    pub fn slot(&self) -> Option<EquipSlot> {
        self.kind.slot()
    }

    /// Base stats with enhancement applied.
    pub fn effective_stats(&self) -> ItemStats {
        self.stats.enhanced(self.plus)
    }

    pub fn free_sockets(&self) -> usize {
        usize::from(self.sockets).saturating_sub(self.gems.len())
    }

    /// Sockets `gem`. Returns it back when no socket is free.
    pub fn socket(&mut self, gem: Gem) -> Result<(), Gem> {
        if self.free_sockets() == 0 {
            return Err(gem);
        }
        self.gems.try_push(gem).map_err(|e| e.element())
    }

    /// Attribute bonuses expressed as flat channel modifiers.
    pub fn attribute_modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        let stats = self.effective_stats();
        [
            (StatChannel::Str, stats.str),
            (StatChannel::Vit, stats.vit),
            (StatChannel::Int, stats.int),
            (StatChannel::Agi, stats.agi),
            (StatChannel::Luck, stats.luck),
        ]
        .into_iter()
        .filter(|(_, value)| *value != 0)
        .map(|(channel, value)| Modifier::flat(channel, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CurseKind;

    fn sword() -> ItemTemplate {
        ItemTemplate {
            id: ItemId::from("cursed_blade"),
            name: "Cursed Blade".into(),
            kind: ItemKind::Weapon,
            stats: ItemStats {
                atk: 20,
                str: 3,
                ..ItemStats::default()
            },
            sockets: 1,
            curse: Some(Curse::new(CurseKind::HealingReceived, 50)),
            unique_effect: Vec::new(),
            set_bonus: None,
        }
    }

    #[test]
    fn copies_are_independent() {
        let template = sword();
        let mut a = Item::from_template(&template);
        let b = Item::from_template(&template);
        a.plus = 3;
        assert_eq!(b.plus, 0);
        assert_eq!(a.effective_stats().atk, 26);
        assert_eq!(a.curse, template.curse);
    }

    #[test]
    fn socket_respects_template_capacity() {
        let mut item = Item::from_template(&sword());
        let gem = Gem {
            channel: StatChannel::Atk,
            value: 4,
        };
        assert!(item.socket(gem).is_ok());
        assert_eq!(item.socket(gem), Err(gem));
    }
}
