use std::collections::BTreeSet;

use valsim_backend::agents::Agent;
use valsim_backend::generator::{salary_for, GenerateOptions, PlayerGenerator, BASE_SALARY};
use valsim_backend::player::{validate_player, CoreStats, Region, Role};

fn options(min: u32, max: u32) -> GenerateOptions {
    GenerateOptions {
        region: None,
        role: None,
        min_rating: Some(min),
        max_rating: Some(max),
        max_age: None,
    }
}

#[test]
fn test_generated_player_passes_validation() {
    let mut generator = PlayerGenerator::with_seed(1);
    for _ in 0..20 {
        let player = generator.generate_player(&options(60, 95)).expect("generation failed");
        validate_player(&player).expect("generated player failed validation");
    }
}

#[test]
fn test_rating_bounds_and_role_bias() {
    let mut generator = PlayerGenerator::with_seed(2);
    let mut opts = options(80, 80);
    opts.role = Some(Role::Duelist);
    let player = generator.generate_player(&opts).expect("generation failed");

    // A pinned rating makes the 10% role bias visible exactly.
    assert!((player.core_stats.aim - 88.0).abs() < 1e-9);
    assert!((player.core_stats.movement - 88.0).abs() < 1e-9);
    assert_eq!(player.core_stats.game_sense, 80.0);
    assert_eq!(player.core_stats.utility_usage, 80.0);
    assert_eq!(player.core_stats.communication, 80.0);
    assert_eq!(player.core_stats.clutch, 80.0);
}

#[test]
fn test_role_bias_caps_at_one_hundred() {
    let mut generator = PlayerGenerator::with_seed(3);
    let mut opts = options(95, 100);
    opts.role = Some(Role::Controller);
    for _ in 0..10 {
        let player = generator.generate_player(&opts).expect("generation failed");
        assert!(player.core_stats.utility_usage <= 100.0);
        assert!(player.core_stats.game_sense <= 100.0);
    }
}

#[test]
fn test_proficiency_bands() {
    let mut generator = PlayerGenerator::with_seed(4);
    let mut opts = options(60, 90);
    opts.role = Some(Role::Sentinel);
    let player = generator.generate_player(&opts).expect("generation failed");

    for (role, value) in &player.role_proficiencies {
        if *role == Role::Sentinel {
            assert!((80.0..=100.0).contains(value));
        } else {
            assert!((50.0..=85.0).contains(value));
        }
    }
    for (agent, value) in &player.agent_proficiencies {
        if agent.role() == Role::Sentinel {
            assert!((80.0..=100.0).contains(value), "{agent}: {value}");
        } else {
            assert!((50.0..=85.0).contains(value), "{agent}: {value}");
        }
    }
    assert_eq!(player.agent_proficiencies.len(), Agent::ALL.len());
}

#[test]
fn test_region_constrains_nationality() {
    let mut generator = PlayerGenerator::with_seed(5);
    let mut opts = options(60, 90);
    opts.region = Some(Region::BR);
    let player = generator.generate_player(&opts).expect("generation failed");
    assert_eq!(player.region, Region::BR);
    assert_eq!(player.nationality, "Brazil");
}

#[test]
fn test_max_age_is_respected() {
    let mut generator = PlayerGenerator::with_seed(6);
    let mut opts = options(60, 90);
    opts.max_age = Some(19);
    for _ in 0..20 {
        let player = generator.generate_player(&opts).expect("generation failed");
        assert!((16..=19).contains(&player.age), "age {} out of range", player.age);
    }
}

#[test]
fn test_salary_age_brackets() {
    let peak = CoreStats {
        aim: 100.0,
        game_sense: 100.0,
        movement: 100.0,
        utility_usage: 100.0,
        communication: 100.0,
        clutch: 100.0,
    };
    assert_eq!(salary_for(&peak, 25), (BASE_SALARY * 1.2) as u32);
    assert_eq!(salary_for(&peak, 18), (BASE_SALARY * 0.8) as u32);
    assert_eq!(salary_for(&peak, 32), (BASE_SALARY * 0.7) as u32);
    assert_eq!(salary_for(&peak, 21), BASE_SALARY as u32);
}

#[test]
fn test_career_stats_are_coherent() {
    let mut generator = PlayerGenerator::with_seed(7);
    for _ in 0..20 {
        let player = generator.generate_player(&options(60, 95)).expect("generation failed");
        let career = &player.career_stats;
        assert!((50..=500).contains(&career.matches_played));
        assert!(career.rounds_played >= career.matches_played * 16);
        assert!(career.rounds_played <= career.matches_played * 24);
        assert!(career.kd_ratio > 0.0);
        assert!((0.0..=1.0).contains(&career.first_blood_rate));
        assert!((0.0..=1.0).contains(&career.clutch_rate));
    }
}

#[test]
fn test_roster_fills_core_roles_first() {
    let mut generator = PlayerGenerator::with_seed(8);
    let roster = generator.generate_roster(&options(70, 90), 5).expect("roster failed");
    assert_eq!(roster.len(), 5);

    let first_four: BTreeSet<Role> = roster.iter().take(4).map(|p| p.primary_role).collect();
    assert_eq!(first_four.len(), 4, "first four players must cover the core roles");

    let ids: BTreeSet<&String> = roster.iter().map(|p| &p.id).collect();
    assert_eq!(ids.len(), 5);
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let roster_a = PlayerGenerator::with_seed(42)
        .generate_roster(&options(70, 90), 5)
        .expect("roster failed");
    let roster_b = PlayerGenerator::with_seed(42)
        .generate_roster(&options(70, 90), 5)
        .expect("roster failed");
    assert_eq!(roster_a, roster_b);
}

#[test]
fn test_option_validation_aggregates_every_failure() {
    let mut generator = PlayerGenerator::with_seed(9);
    let opts = GenerateOptions {
        region: None,
        role: None,
        min_rating: Some(90),
        max_rating: Some(60),
        max_age: Some(40),
    };
    let err = generator.generate_player(&opts).expect_err("expected validation failure");
    assert_eq!(err.errors.len(), 2, "both problems should be reported: {err}");
    let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"min_rating"));
    assert!(fields.contains(&"max_age"));
}

#[test]
fn test_roster_size_bounds() {
    let mut generator = PlayerGenerator::with_seed(10);
    assert!(generator.generate_roster(&options(60, 90), 0).is_err());
    assert!(generator.generate_roster(&options(60, 90), 11).is_err());
    assert_eq!(generator.generate_roster(&options(60, 90), 7).expect("roster failed").len(), 7);
}
