//! Integration test: Catalog -> Selections -> Build -> Stat queries
//!
//! Exercises the full flow with the bundled sample catalog.

use build_core::prelude::*;
use build_core::source::ItemEventKind;
use build_core::{CatalogData, Coefficients, StatAccumulator};
use std::sync::Arc;

fn catalog() -> Arc<Catalog> {
    CatalogRepository::with_provider(default_catalog().unwrap())
        .catalog()
        .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn jinx(catalog: Arc<Catalog>) -> Build {
    let mut build = Build::new(catalog, "Jinx").unwrap();
    build.set_level(18).unwrap();
    build
        .set_masteries([
            ("Fury", 5),
            ("Feast", 1),
            ("Vampirism", 5),
            ("Bounty Hunter", 1),
            ("Battering Blows", 5),
            ("Fervor of Battle", 1),
            ("Wanderer", 5),
            ("Secret Stash", 1),
            ("Merciless", 5),
            ("Dangerous Game", 1),
        ])
        .unwrap();
    build
        .set_runes([
            ("Greater Mark of Attack Damage", 9),
            ("Greater Seal of Armor", 9),
            ("Greater Glyph of Magic Resist", 9),
            ("Greater Quintessence of Attack Speed", 3),
        ])
        .unwrap();
    build
        .set_items([
            "Infinity Edge",
            "Berserker's Greaves",
            "Lord Dominik's Regards",
            "The Bloodthirster",
            "Mercurial Scimitar",
            "Banshee's Veil",
        ])
        .unwrap();
    build
}

#[test]
fn test_full_page_jinx() {
    let build = jinx(catalog());
    assert_eq!(build.level(), 18);
    assert_eq!(build.masteries().total_points(), 30);
    assert_eq!(build.runes().total(), 30);
    assert_eq!(build.items().len(), 6);

    // Armor: base at 18, nine seals, no armor items
    let base = 28.0 + 3.5 * 17.0;
    assert!(approx(build.base(Attribute::Armor), base));
    assert!(approx(build.query("base_armor").unwrap(), base));
    assert!(approx(build.bonus(Attribute::Armor), 9.0));

    // Attack speed percentages go to the base-only multiplier
    let attack_speed = build.value(Attribute::AttackSpeed);
    assert!(attack_speed.modifiers.percent_base > 0.35);
    assert!(approx(attack_speed.modifiers.percent, 0.0));
    assert!(build.total(Attribute::AttackSpeed) > build.base(Attribute::AttackSpeed));

    for attribute in Attribute::all() {
        assert!(approx(
            build.bonus(*attribute),
            build.total(*attribute) - build.base(*attribute)
        ));
    }
}

#[test]
fn test_thresh_by_ids() {
    let catalog = catalog();
    let mut build = Build::new(Arc::clone(&catalog), 412u32).unwrap();
    build.set_level(5).unwrap();
    build
        .set_masteries([
            (6311u32, 5),
            (6322, 1),
            (6332, 5),
            (6342, 1),
            (6212, 5),
            (6223, 1),
            (6232, 5),
            (6241, 1),
            (6251, 5),
            (6263, 1),
        ])
        .unwrap();
    build.set_runes([(5317u32, 9), (5245, 9), (5289, 9), (5297, 3)]).unwrap();
    build.set_items([3111u32, 1029]).unwrap();

    assert_eq!(build.champion().name, "Thresh");
    assert_eq!(build.masteries().total_points(), 30);
    assert!(build.stats().contains_key("bonus_armor"));

    // Unyielding scales bonus armor only
    let armor = build.value(Attribute::Armor);
    assert!(armor.modifiers.percent_bonus > 0.0);
    let pre_bonus = armor.pre_bonus();
    assert!(approx(
        build.total(Attribute::Armor),
        pre_bonus + armor.modifiers.percent_bonus * (pre_bonus - armor.base)
    ));
}

#[test]
fn test_enchanted_item_build() {
    let mut build = Build::new(catalog(), "Thresh").unwrap();
    build.set_items(["Stalker's Blade - Cinderhulk"]).unwrap();

    let items = build.items();
    assert_eq!(items.slots().len(), 1);
    assert_eq!(items.enchantments().len(), 1);
    assert_eq!(items.iter().count(), 2);

    // Cinderhulk: flat health plus a bonus-only multiplier
    let health = build.value(Attribute::Health);
    assert!(approx(health.modifiers.flat, 300.0));
    assert!(approx(build.bonus(Attribute::Health), 300.0 * 1.15));
}

#[test]
fn test_definition_round_trip_preserves_totals() {
    let catalog = catalog();
    let build = jinx(Arc::clone(&catalog));
    let definition = build.definition();

    let text = definition.to_toml().unwrap();
    let parsed = BuildDefinition::parse(&text).unwrap();
    let copy = Build::from_definition(catalog, &parsed).unwrap();

    for attribute in Attribute::all() {
        assert!(approx(copy.total(*attribute), build.total(*attribute)));
    }
    assert_eq!(copy.cost(), build.cost());
}

#[test]
fn test_build_from_definition_file_text() {
    let definition = BuildDefinition::parse(
        r#"
champion = "Annie"
level = 10
items = ["Rabadon's Deathcap"]
runes = [{ key = "Greater Quintessence of Ability Power", count = 3 }]
masteries = [{ key = "Sorcery", points = 5 }]
"#,
    )
    .unwrap();
    let build = Build::from_definition(catalog(), &definition).unwrap();
    assert_eq!(build.level(), 10);
    assert!(build.total(Attribute::AbilityPower) > 120.0);
}

#[test]
fn test_replay_then_build() {
    let catalog = catalog();
    let json = r#"[
        {"timestamp": 1000, "type": "ITEM_PURCHASED", "participant": 1, "item": "Doran's Blade"},
        {"timestamp": 1000, "type": "ITEM_PURCHASED", "participant": 1, "item": "Health Potion"},
        {"timestamp": 1000, "type": "ITEM_PURCHASED", "participant": 1, "item": "Warding Totem (Trinket)"},
        {"timestamp": 400000, "type": "ITEM_PURCHASED", "participant": 1, "item": "Long Sword"},
        {"timestamp": 400500, "type": "ITEM_SOLD", "participant": 1, "item": "Long Sword"},
        {"timestamp": 401000, "type": "ITEM_UNDO", "participant": 1, "item_before": 1036, "item_after": 0},
        {"timestamp": 900000, "type": "ITEM_SOLD", "participant": 1, "item": "Doran's Blade"}
    ]"#;
    let events = build_core::source::parse_events(json).unwrap();
    assert_eq!(events[5].kind, ItemEventKind::Undo);

    let items = EventReplayer::new(Arc::clone(&catalog)).replay(events).unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["Long Sword", "Warding Totem (Trinket)"]);

    let mut build = Build::new(catalog, "Jinx").unwrap();
    build.set_item_set(items).unwrap();
    assert!(approx(build.bonus(Attribute::AttackDamage), 10.0));
}

#[test]
fn test_custom_catalog_provider() {
    let data = CatalogData::parse(
        r#"
[[characters]]
id = 7
name = "Dummy"

[characters.stats]
armor = { flat = 10.0, per_level = 2.0 }

[[items]]
id = 1
name = "Plate"
gold = { base = 100, total = 100, sell = 70 }

[items.stats]
armor = { flat = 5.0, percent = 0.5 }
"#,
    )
    .unwrap();
    let catalog = CatalogRepository::with_provider(data).catalog().unwrap();
    let mut build = Build::new(catalog, "Dummy").unwrap();
    build.set_items(["Plate"]).unwrap();
    assert!(approx(build.total(Attribute::Armor), 15.0 * 1.5));

    let mut stats = StatAccumulator::new();
    stats.apply_source(build.items());
    assert_eq!(stats.get(Attribute::Armor), Coefficients { flat: 5.0, percent: 0.5, ..Default::default() });
}

#[test]
fn test_errors_carry_kinds() {
    let catalog = catalog();
    let mut build = Build::new(Arc::clone(&catalog), "Jinx").unwrap();

    let cases: Vec<(BuildError, ErrorKind)> = vec![
        (Build::new(Arc::clone(&catalog), "Nobody").unwrap_err(), ErrorKind::Lookup),
        (build.set_level(42).unwrap_err(), ErrorKind::Range),
        (
            build
                .set_items(["Long Sword", "Long Sword", "Long Sword", "Long Sword", "Long Sword", "Long Sword", "Long Sword"])
                .unwrap_err(),
            ErrorKind::Capacity,
        ),
        (build.set_items(["Warding Totem (Trinket)", "Sweeping Lens (Trinket)"]).unwrap_err(), ErrorKind::Capacity),
        (build.set_masteries([("Fury", 5), ("Vampirism", 1)]).unwrap_err(), ErrorKind::Structural),
        (build.query("bonus_luck").unwrap_err(), ErrorKind::Argument),
    ];
    for (err, kind) in cases {
        assert_eq!(err.kind(), kind, "{}", err);
    }
}
