use valsim_backend::weapons::{EngagementRange, WeaponCatalog, WeaponId, WeaponType};

#[test]
fn test_catalog_prices_match_the_buy_menu() {
    let catalog = WeaponCatalog::new();
    let expected = [
        (WeaponId::Classic, 0),
        (WeaponId::Shorty, 150),
        (WeaponId::Frenzy, 450),
        (WeaponId::Ghost, 500),
        (WeaponId::Sheriff, 800),
        (WeaponId::Stinger, 950),
        (WeaponId::Spectre, 1600),
        (WeaponId::Bucky, 850),
        (WeaponId::Judge, 1850),
        (WeaponId::Bulldog, 2050),
        (WeaponId::Guardian, 2250),
        (WeaponId::Phantom, 2900),
        (WeaponId::Vandal, 2900),
        (WeaponId::Marshal, 950),
        (WeaponId::Operator, 4700),
        (WeaponId::Outlaw, 2400),
        (WeaponId::Ares, 1600),
        (WeaponId::Odin, 3200),
    ];
    for (weapon, cost) in expected {
        assert_eq!(catalog.cost(weapon), cost, "{weapon} has the wrong price");
    }
}

#[test]
fn test_catalog_covers_every_weapon_with_sane_stats() {
    let catalog = WeaponCatalog::new();
    for weapon in WeaponId::ALL {
        let stats = catalog.lookup(weapon);
        assert!((0.0..=1.0).contains(&stats.accuracy), "{weapon} accuracy");
        assert!((0.0..=1.0).contains(&stats.movement_accuracy), "{weapon} movement accuracy");
        assert!((0.0..=1.0).contains(&stats.armor_penetration), "{weapon} armor penetration");
        assert!((0.0..=1.0).contains(&stats.wall_penetration), "{weapon} wall penetration");
        assert!(stats.damage > 0.0);
        assert!(stats.fire_rate > 0.0);
        assert!(stats.magazine_size > 0);
        for range in [EngagementRange::Close, EngagementRange::Medium, EngagementRange::Long] {
            assert!(stats.range_multipliers.at(range) > 0.0);
        }
    }
}

#[test]
fn test_weapon_types() {
    let catalog = WeaponCatalog::new();
    assert_eq!(catalog.lookup(WeaponId::Classic).weapon_type, WeaponType::Sidearm);
    assert_eq!(catalog.lookup(WeaponId::Spectre).weapon_type, WeaponType::Smg);
    assert_eq!(catalog.lookup(WeaponId::Vandal).weapon_type, WeaponType::Rifle);
    assert_eq!(catalog.lookup(WeaponId::Operator).weapon_type, WeaponType::Sniper);
    assert_eq!(catalog.lookup(WeaponId::Outlaw).weapon_type, WeaponType::Sniper);
    assert_eq!(catalog.lookup(WeaponId::Judge).weapon_type, WeaponType::Shotgun);
    assert_eq!(catalog.lookup(WeaponId::Odin).weapon_type, WeaponType::Heavy);
}

#[test]
fn test_weapon_names_round_trip() {
    for weapon in WeaponId::ALL {
        assert_eq!(WeaponId::from_name(weapon.name()), Some(weapon));
    }
    assert_eq!(WeaponId::from_name("Knife"), None);
}
