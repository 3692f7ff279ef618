//! In-memory catalog used by unit tests.

use std::collections::HashMap;

use crate::config::GameConfig;
use crate::env::{
    ConsumableEffect, DamageType, EnemyOracle, EnemyRank, EnemyTemplate, Env,
    EvolutionDefinition, FixedRng, ItemKind, ItemOracle, ItemStats, ItemTemplate, LootOracle,
    MetaUpgradeDefinition, ModifierOracle, PassiveDefinition, RelicDefinition, RngOracle,
    RunModifierDefinition, SetBonusDefinition, SkillDefinition, SkillKind, SkillOracle,
    SkillRequirement,
};
use crate::ids::*;
use crate::state::{Gem, Item, StatusKind, StatusTemplate};
use crate::stats::{Curse, CurseKind, Modifier, SpecialKey, StatChannel, StatFlags};

pub(crate) struct TestCatalog {
    items: HashMap<ItemId, ItemTemplate>,
    sets: HashMap<SetId, SetBonusDefinition>,
    skills: HashMap<SkillId, SkillDefinition>,
    passives: HashMap<PassiveId, PassiveDefinition>,
    relics: HashMap<RelicId, RelicDefinition>,
    evolutions: HashMap<EvolutionId, EvolutionDefinition>,
    run_modifiers: HashMap<RunModifierId, RunModifierDefinition>,
    meta: HashMap<MetaUpgradeId, MetaUpgradeDefinition>,
    enemies: HashMap<EnemyId, EnemyTemplate>,
    bosses: HashMap<u32, EnemyId>,
    /// Every chance roll comes up 100, so nothing below 100% succeeds.
    never: FixedRng,
}

fn item(id: &str, kind: ItemKind, stats: ItemStats) -> ItemTemplate {
    ItemTemplate {
        id: ItemId::from(id),
        name: id.to_owned(),
        kind,
        stats,
        sockets: 0,
        curse: None,
        unique_effect: Vec::new(),
        set_bonus: None,
    }
}

fn skill(id: &str, kind: SkillKind, power: i32, cost: i32) -> SkillDefinition {
    SkillDefinition {
        id: SkillId::from(id),
        name: id.to_owned(),
        kind,
        damage_type: DamageType::Physical,
        power,
        cost,
        hits: 1,
        bonus: 0,
        ignore_def: false,
        lifesteal: 0,
        invulnerable_turns: 0,
        status: None,
        req: None,
    }
}

fn status(id: &str, kind: StatusKind, turns: i32, magnitude: i32) -> StatusTemplate {
    StatusTemplate {
        id: StatusId::from(id),
        kind,
        turns,
        magnitude,
    }
}

fn enemy(id: &str, rank: EnemyRank, hp: i32, atk: i32, def: i32) -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyId::from(id),
        name: id.to_owned(),
        rank,
        hp,
        atk,
        def,
        exp: 20,
        gold: 10,
        skills: Vec::new(),
        passives: Vec::new(),
        drops: Vec::new(),
    }
}

impl TestCatalog {
    pub(crate) fn standard() -> Self {
        let mut catalog = Self {
            items: HashMap::new(),
            sets: HashMap::new(),
            skills: HashMap::new(),
            passives: HashMap::new(),
            relics: HashMap::new(),
            evolutions: HashMap::new(),
            run_modifiers: HashMap::new(),
            meta: HashMap::new(),
            enemies: HashMap::new(),
            bosses: HashMap::new(),
            never: FixedRng(99),
        };

        // ===== items =====
        let mut sword = item(
            "iron_sword",
            ItemKind::Weapon,
            ItemStats {
                atk: 12,
                str: 3,
                ..ItemStats::default()
            },
        );
        sword.sockets = 2;
        catalog.add_item(sword);
        catalog.add_item(item(
            "leather_armor",
            ItemKind::Armor,
            ItemStats {
                def: 5,
                ..ItemStats::default()
            },
        ));
        for (id, kind) in [
            ("shadow_blade", ItemKind::Weapon),
            ("shadow_cloak", ItemKind::Armor),
            ("shadow_charm", ItemKind::Accessory),
        ] {
            let mut piece = item(id, kind, ItemStats::default());
            piece.set_bonus = Some(SetId::from("shadow"));
            catalog.add_item(piece);
        }
        let mut fang = item("vampire_fang", ItemKind::Accessory, ItemStats::default());
        fang.unique_effect = vec![Modifier::percent(StatChannel::Lifesteal, 10)];
        catalog.add_item(fang);
        let mut cursed = item(
            "cursed_blade",
            ItemKind::Weapon,
            ItemStats {
                atk: 30,
                ..ItemStats::default()
            },
        );
        cursed.curse = Some(Curse::new(CurseKind::HealingReceived, 50));
        catalog.add_item(cursed);
        let mut amnesia = item("amnesia_ring", ItemKind::Accessory, ItemStats::default());
        amnesia.curse = Some(Curse::new(CurseKind::NoExp, 0));
        catalog.add_item(amnesia);
        catalog.add_item(item(
            "potion",
            ItemKind::Consumable(ConsumableEffect::Potion { hp: 30, mp: 0 }),
            ItemStats::default(),
        ));
        catalog.add_item(item(
            "antidote",
            ItemKind::Consumable(ConsumableEffect::Antidote),
            ItemStats::default(),
        ));
        catalog.add_item(item(
            "iron_elixir",
            ItemKind::Consumable(ConsumableEffect::Elixir(status(
                "iron_elixir",
                StatusKind::StatBoost(StatChannel::Def),
                3,
                10,
            ))),
            ItemStats::default(),
        ));
        catalog.add_item(item(
            "ruby",
            ItemKind::Gem(Gem {
                channel: StatChannel::Atk,
                value: 5,
            }),
            ItemStats::default(),
        ));

        catalog.sets.insert(
            SetId::from("shadow"),
            SetBonusDefinition {
                id: SetId::from("shadow"),
                name: "Shadow".into(),
                two: vec![Modifier::keyed(SpecialKey::SetDodge, 10)],
                three: vec![
                    Modifier::keyed(SpecialKey::SetDodge, 20),
                    Modifier::percent(StatChannel::Damage, 20),
                ],
            },
        );

        // ===== skills =====
        let mut power_strike = skill("power_strike", SkillKind::Strike, 150, 5);
        power_strike.bonus = 2;
        catalog.add_skill(power_strike);
        let mut pierce = skill("pierce", SkillKind::Strike, 100, 3);
        pierce.ignore_def = true;
        catalog.add_skill(pierce);
        let mut flurry = skill("flurry", SkillKind::Strike, 50, 8);
        flurry.hits = 3;
        flurry.lifesteal = 50;
        catalog.add_skill(flurry);
        let mut fireball = skill("fireball", SkillKind::Strike, 120, 6);
        fireball.damage_type = DamageType::Magical;
        fireball.bonus = 4;
        catalog.add_skill(fireball);
        let mut mend = skill("mend", SkillKind::Heal, 100, 4);
        mend.invulnerable_turns = 1;
        catalog.add_skill(mend);
        let mut war_cry = skill("war_cry", SkillKind::Buff, 0, 2);
        war_cry.status = Some(status("war_cry", StatusKind::StatBoost(StatChannel::Str), 3, 5));
        catalog.add_skill(war_cry);
        let mut weaken = skill("weaken", SkillKind::Debuff, 0, 2);
        weaken.status = Some(status("weaken", StatusKind::DamageDown, 2, 50));
        catalog.add_skill(weaken);
        let mut daze = skill("daze", SkillKind::Debuff, 0, 2);
        daze.status = Some(status("daze", StatusKind::Stun, 1, 0));
        catalog.add_skill(daze);
        catalog.add_skill(skill("prayer", SkillKind::Special, 0, 0));
        let mut ultimate = skill("ultimate", SkillKind::Strike, 300, 1);
        ultimate.req = Some(SkillRequirement { level: 5 });
        catalog.add_skill(ultimate);
        let mut frailty = skill("curse_of_frailty", SkillKind::Debuff, 0, 0);
        frailty.status = Some(status("frailty", StatusKind::DamageDown, 2, 30));
        catalog.add_skill(frailty);
        let mut roar = skill("roar", SkillKind::Buff, 0, 0);
        roar.status = Some(status("roar", StatusKind::Frenzy, 2, 20));
        catalog.add_skill(roar);

        // ===== modifier catalogs =====
        for (id, stats) in [
            ("iron_skin", vec![Modifier::flat(StatChannel::Def, 5)]),
            ("scholar", vec![Modifier::percent(StatChannel::Exp, 50)]),
            ("thorns", vec![Modifier::keyed(SpecialKey::Thorns, 15)]),
            ("ethereal", vec![Modifier::Flag(StatFlags::ETHEREAL)]),
            ("intangible", vec![Modifier::Flag(StatFlags::INTANGIBLE)]),
            ("unshakable", vec![Modifier::Flag(StatFlags::STUN_IMMUNE)]),
            ("executioner", vec![Modifier::keyed(SpecialKey::ExecuteThreshold, 20)]),
            ("reaper", vec![Modifier::keyed(SpecialKey::KillHeal, 10)]),
        ] {
            catalog.passives.insert(
                PassiveId::from(id),
                PassiveDefinition {
                    id: PassiveId::from(id),
                    name: id.to_owned(),
                    stats,
                },
            );
        }
        catalog.relics.insert(
            RelicId::from("blood_pact"),
            RelicDefinition {
                id: RelicId::from("blood_pact"),
                name: "Blood Pact".into(),
                modifiers: vec![Modifier::percent(StatChannel::Damage, 30)],
                curse: Some(Curse::new(CurseKind::MaxHp, 20)),
            },
        );
        catalog.relics.insert(
            RelicId::from("phoenix_feather"),
            RelicDefinition {
                id: RelicId::from("phoenix_feather"),
                name: "Phoenix Feather".into(),
                modifiers: vec![Modifier::Flag(StatFlags::AUTO_REVIVE)],
                curse: None,
            },
        );
        catalog.evolutions.insert(
            EvolutionId::from("berserker"),
            EvolutionDefinition {
                id: EvolutionId::from("berserker"),
                name: "Berserker".into(),
                stats: vec![Modifier::percent(StatChannel::Atk, 10)],
            },
        );
        catalog.run_modifiers.insert(
            RunModifierId::from("glass_cannon"),
            RunModifierDefinition {
                id: RunModifierId::from("glass_cannon"),
                name: "Glass Cannon".into(),
                max_hp: 50,
                atk: 150,
                def: 100,
                flags: StatFlags::empty(),
            },
        );
        catalog.run_modifiers.insert(
            RunModifierId::from("mortal"),
            RunModifierDefinition {
                id: RunModifierId::from("mortal"),
                name: "Mortal".into(),
                max_hp: 100,
                atk: 100,
                def: 100,
                flags: StatFlags::NO_REVIVE,
            },
        );
        catalog.meta.insert(
            MetaUpgradeId::from("vitality"),
            MetaUpgradeDefinition {
                id: MetaUpgradeId::from("vitality"),
                name: "Vitality".into(),
                max_rank: 5,
                per_rank: vec![Modifier::flat(StatChannel::Hp, 10)],
            },
        );

        // ===== enemies =====
        let mut slime = enemy("slime", EnemyRank::Normal, 30, 6, 2);
        slime.drops = vec![ItemId::from("potion")];
        catalog.add_enemy(slime);
        let mut wraith = enemy("wraith", EnemyRank::Elite, 40, 8, 0);
        wraith.passives = vec![PassiveId::from("ethereal")];
        catalog.add_enemy(wraith);
        let mut hexer = enemy("hexer", EnemyRank::Normal, 30, 10, 0);
        hexer.skills = vec![SkillId::from("curse_of_frailty")];
        catalog.add_enemy(hexer);
        let mut brute = enemy("brute", EnemyRank::Normal, 30, 10, 0);
        brute.skills = vec![SkillId::from("roar")];
        catalog.add_enemy(brute);
        let mut thorn_beast = enemy("thorn_beast", EnemyRank::Normal, 50, 5, 0);
        thorn_beast.passives = vec![PassiveId::from("thorns")];
        catalog.add_enemy(thorn_beast);
        catalog.add_enemy(enemy("ogre", EnemyRank::Normal, 200, 500, 50));
        let mut warden = enemy("warden", EnemyRank::Boss, 60, 8, 3);
        warden.exp = 100;
        catalog.add_enemy(warden);
        catalog.bosses.insert(1, EnemyId::from("warden"));
        let mut lich = enemy("lich", EnemyRank::Boss, 10, 8, 0);
        lich.exp = 500;
        catalog.add_enemy(lich);
        catalog.bosses.insert(3, EnemyId::from("lich"));

        catalog
    }

    fn add_item(&mut self, template: ItemTemplate) {
        self.items.insert(template.id.clone(), template);
    }

    fn add_skill(&mut self, definition: SkillDefinition) {
        self.skills.insert(definition.id.clone(), definition);
    }

    fn add_enemy(&mut self, template: EnemyTemplate) {
        self.enemies.insert(template.id.clone(), template);
    }

    pub(crate) fn template(&self, id: &str) -> ItemTemplate {
        self.items
            .get(&ItemId::from(id))
            .cloned()
            .unwrap_or_else(|| panic!("unknown test item {id}"))
    }

    pub(crate) fn item_copy(&self, id: &str) -> Item {
        Item::from_template(&self.template(id))
    }

    /// Environment whose rolls never succeed below 100%.
    pub(crate) fn env<'a>(&'a self, config: &'a GameConfig) -> Env<'a> {
        self.env_with(config, &self.never)
    }

    pub(crate) fn env_with<'a>(&'a self, config: &'a GameConfig, rng: &'a dyn RngOracle) -> Env<'a> {
        Env::new(config)
            .with_items(self)
            .with_skills(self)
            .with_modifiers(self)
            .with_enemies(self)
            .with_loot(self)
            .with_rng(rng)
    }
}

impl ItemOracle for TestCatalog {
    fn item(&self, id: &ItemId) -> Option<ItemTemplate> {
        self.items.get(id).cloned()
    }

    fn set_bonus(&self, id: &SetId) -> Option<SetBonusDefinition> {
        self.sets.get(id).cloned()
    }
}

impl SkillOracle for TestCatalog {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition> {
        self.skills.get(id).cloned()
    }
}

impl ModifierOracle for TestCatalog {
    fn passive(&self, id: &PassiveId) -> Option<PassiveDefinition> {
        self.passives.get(id).cloned()
    }

    fn relic(&self, id: &RelicId) -> Option<RelicDefinition> {
        self.relics.get(id).cloned()
    }

    fn evolution(&self, id: &EvolutionId) -> Option<EvolutionDefinition> {
        self.evolutions.get(id).cloned()
    }

    fn run_modifier(&self, id: &RunModifierId) -> Option<RunModifierDefinition> {
        self.run_modifiers.get(id).cloned()
    }

    fn meta_upgrade(&self, id: &MetaUpgradeId) -> Option<MetaUpgradeDefinition> {
        self.meta.get(id).cloned()
    }
}

impl EnemyOracle for TestCatalog {
    fn enemy(&self, id: &EnemyId) -> Option<EnemyTemplate> {
        self.enemies.get(id).cloned()
    }

    fn boss_for_floor(&self, floor: u32) -> Option<EnemyTemplate> {
        self.bosses
            .get(&floor)
            .and_then(|id| self.enemies.get(id))
            .cloned()
    }

    fn milestone_floor(&self) -> u32 {
        3
    }
}

impl LootOracle for TestCatalog {
    /// First listed drop on a roll of 50 or less.
    fn roll_drop(&self, enemy: &EnemyTemplate, _floor: u32, roll: u32) -> Option<ItemId> {
        (roll <= 50).then(|| enemy.drops.first().cloned()).flatten()
    }
}
