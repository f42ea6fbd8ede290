use std::collections::{BTreeMap, BTreeSet};

use valsim_backend::agents::Agent;
use valsim_backend::economy::{
    LOSS_BONUS_TABLE, MAX_MONEY, MIN_MONEY, PLANT_BONUS, STARTING_CREDITS, WIN_REWARD,
};
use valsim_backend::engine::{mvp_score, MatchConfig, MatchResult, MatchSimulator, SimError};
use valsim_backend::maps::MapCatalog;
use valsim_backend::player::{CareerStats, CoreStats, Player, Region, Role};
use valsim_backend::weapons::WeaponCatalog;

fn make_player(id: &str, role: Role, rating: f64, kd: f64) -> Player {
    let mut role_proficiencies = BTreeMap::new();
    for r in Role::ALL {
        role_proficiencies.insert(r, if r == role { 90.0 } else { 60.0 });
    }
    let mut agent_proficiencies = BTreeMap::new();
    for a in Agent::ALL {
        agent_proficiencies.insert(a, if a.role() == role { 85.0 } else { 55.0 });
    }
    Player {
        id: id.to_string(),
        first_name: "Sim".to_string(),
        last_name: "Player".to_string(),
        gamer_tag: id.to_string(),
        age: 23,
        nationality: "USA".to_string(),
        region: Region::NA,
        primary_role: role,
        salary: 60_000,
        core_stats: CoreStats {
            aim: rating,
            game_sense: rating,
            movement: rating,
            utility_usage: rating,
            communication: rating,
            clutch: rating,
        },
        role_proficiencies,
        agent_proficiencies,
        career_stats: CareerStats {
            matches_played: 120,
            rounds_played: 2400,
            kills: 1700,
            deaths: 1500,
            assists: 700,
            first_bloods: 180,
            clutches: 90,
            kd_ratio: kd,
            first_blood_rate: 0.10,
            clutch_rate: 0.06,
        },
    }
}

fn build_team(prefix: &str, rating: f64) -> Vec<Player> {
    let roles = [Role::Duelist, Role::Controller, Role::Sentinel, Role::Initiator, Role::Duelist];
    roles
        .iter()
        .enumerate()
        .map(|(i, role)| {
            make_player(&format!("{prefix}{i}"), *role, rating, rating / 100.0 + 0.05 * i as f64)
        })
        .collect()
}

fn run_match(seed: u64) -> MatchResult {
    let weapons = WeaponCatalog::new();
    let maps = MapCatalog::with_standard_maps();
    let simulator = MatchSimulator::new(&weapons, &maps);
    let config = MatchConfig {
        map_name: "Ascent".to_string(),
        seed: Some(seed),
        agent_overrides: BTreeMap::new(),
    };
    simulator
        .simulate_match(&build_team("a", 75.0), &build_team("b", 72.0), &config)
        .expect("simulation failed")
}

#[test]
fn test_score_termination_and_round_count() {
    let result = run_match(42);
    let (a, b) = (result.score.team_a, result.score.team_b);
    assert!(
        (a == 13 && b <= 12) || (b == 13 && a <= 12),
        "unexpected final score {a}-{b}"
    );
    assert_eq!(result.rounds.len() as u32, 13 + a.min(b));
    assert_eq!(result.economy_logs.len(), result.rounds.len());
    assert!(result.duration > 0.0);
}

#[test]
fn test_round_numbers_and_winners_are_consistent() {
    let result = run_match(42);
    let mut score_a = 0;
    let mut score_b = 0;
    for (i, round) in result.rounds.iter().enumerate() {
        assert_eq!(round.round_number as usize, i);
        match round.winner {
            valsim_backend::economy::TeamSide::TeamA => score_a += 1,
            valsim_backend::economy::TeamSide::TeamB => score_b += 1,
        }
    }
    assert_eq!(score_a, result.score.team_a);
    assert_eq!(score_b, result.score.team_b);
}

#[test]
fn test_economy_ledger_identity() {
    let result = run_match(7);
    for log in &result.economy_logs {
        assert_eq!(
            log.team_a_end,
            log.team_a_start - log.team_a_spend + log.team_a_reward,
            "team_a ledger broken in round {}",
            log.round_number
        );
        assert_eq!(
            log.team_b_end,
            log.team_b_start - log.team_b_spend + log.team_b_reward,
            "team_b ledger broken in round {}",
            log.round_number
        );
        assert!(log.team_a_end <= MAX_MONEY * 5 && log.team_b_end <= MAX_MONEY * 5);
        assert!(log.team_a_end >= MIN_MONEY * 5 && log.team_b_end >= MIN_MONEY * 5);
        assert!(log.winner.is_some());
    }
}

#[test]
fn test_player_credits_stay_in_bounds_every_round() {
    let result = run_match(9);
    for round in &result.rounds {
        for (id, credits) in &round.player_credits {
            assert!(
                (MIN_MONEY..=MAX_MONEY).contains(credits),
                "round {}: {} holds {} credits",
                round.round_number,
                id,
                credits
            );
        }
    }
}

/// Replays the reward rules over the reported loadouts and checks every
/// wallet the engine published, loss-streak bookkeeping included.
#[test]
fn test_reward_replay_matches_reported_credits() {
    let result = run_match(11);
    let team_a_ids: Vec<String> = (0..5).map(|i| format!("a{i}")).collect();
    let team_b_ids: Vec<String> = (0..5).map(|i| format!("b{i}")).collect();

    let mut wallets: BTreeMap<String, u32> = BTreeMap::new();
    let mut streak_a = 0u32;
    let mut streak_b = 0u32;

    for round in &result.rounds {
        let pistol = round.round_number == 0 || round.round_number == 12;
        if pistol {
            for id in team_a_ids.iter().chain(team_b_ids.iter()) {
                wallets.insert(id.clone(), STARTING_CREDITS);
            }
        }
        let attacker_is_a = round.round_number < 12;
        let a_won = round.winner == valsim_backend::economy::TeamSide::TeamA;

        for (ids, loadouts, won) in [
            (&team_a_ids, &round.player_loadouts.team_a, a_won),
            (&team_b_ids, &round.player_loadouts.team_b, !a_won),
        ] {
            for id in ids.iter() {
                let spend = loadouts.get(id).map(|l| l.total_spend).unwrap_or(0);
                let after_buy = wallets.get(id).copied().unwrap_or(0) - spend;
                let loser_streak = if a_won { streak_b } else { streak_a };
                let mut expected = if won {
                    (after_buy + WIN_REWARD).min(MAX_MONEY)
                } else {
                    (after_buy + LOSS_BONUS_TABLE[loser_streak.min(4) as usize])
                        .clamp(MIN_MONEY, MAX_MONEY)
                };
                let on_planting_side = round.spike_planted
                    && ((attacker_is_a && id.starts_with('a'))
                        || (!attacker_is_a && id.starts_with('b')));
                if on_planting_side {
                    expected = (expected + PLANT_BONUS).min(MAX_MONEY);
                }
                assert_eq!(
                    round.player_credits.get(id),
                    Some(&expected),
                    "round {}: wallet mismatch for {}",
                    round.round_number,
                    id
                );
                wallets.insert(id.clone(), expected);
            }
        }

        if a_won {
            streak_a = 0;
            streak_b += 1;
        } else {
            streak_b = 0;
            streak_a += 1;
        }
    }
}

#[test]
fn test_pistol_rounds_reset_the_economy() {
    let result = run_match(13);
    assert!(result.rounds[0].is_pistol_round);
    assert_eq!(result.economy_logs[0].team_a_start, STARTING_CREDITS * 5);
    assert_eq!(result.economy_logs[0].team_b_start, STARTING_CREDITS * 5);

    if result.rounds.len() > 12 {
        assert!(result.rounds[12].is_pistol_round);
        assert_eq!(result.economy_logs[12].team_a_start, STARTING_CREDITS * 5);
        assert_eq!(result.economy_logs[12].team_b_start, STARTING_CREDITS * 5);
    }

    for round in &result.rounds {
        if round.is_pistol_round {
            for loadout in
                round.player_loadouts.team_a.values().chain(round.player_loadouts.team_b.values())
            {
                assert!(loadout.total_spend <= STARTING_CREDITS);
            }
        }
    }
}

#[test]
fn test_side_discipline_for_plants() {
    let result = run_match(17);
    for round in &result.rounds {
        for event in &round.map_data.events {
            if event.event_type == valsim_backend::round::MapEventType::Plant {
                let planted_by_a = event.player_id.starts_with('a');
                assert_eq!(
                    planted_by_a,
                    round.round_number < 12,
                    "round {}: plant by wrong side ({})",
                    round.round_number,
                    event.player_id
                );
            }
        }
        if round.spike_planted {
            assert!(round.map_data.spike_plant_position.is_some());
        }
    }
}

#[test]
fn test_agent_composition_covers_roles() {
    let result = run_match(19);
    for prefix in ['a', 'b'] {
        let agents: Vec<Agent> = result
            .player_agents
            .iter()
            .filter(|(id, _)| id.starts_with(prefix))
            .map(|(_, agent)| *agent)
            .collect();
        assert_eq!(agents.len(), 5);

        let classes: BTreeSet<Role> = agents.iter().map(|a| a.role()).collect();
        assert_eq!(classes.len(), 4, "team {prefix} misses a class: {agents:?}");

        let unique: BTreeSet<Agent> = agents.iter().copied().collect();
        assert_eq!(unique.len(), 5, "team {prefix} duplicated an agent: {agents:?}");
    }
}

#[test]
fn test_identical_seeds_produce_identical_results() {
    let first = run_match(123);
    let second = run_match(123);
    let a = serde_json::to_string(&first).expect("serialize failed");
    let b = serde_json::to_string(&second).expect("serialize failed");
    assert_eq!(a, b, "seeded runs must be byte-identical");
}

#[test]
fn test_different_seeds_usually_diverge() {
    let first = run_match(1);
    let second = run_match(2);
    let a = serde_json::to_string(&first).expect("serialize failed");
    let b = serde_json::to_string(&second).expect("serialize failed");
    assert_ne!(a, b);
}

#[test]
fn test_mvp_maximizes_the_career_heuristic() {
    let result = run_match(23);
    let team_a = build_team("a", 75.0);
    let team_b = build_team("b", 72.0);
    let best = team_a
        .iter()
        .chain(team_b.iter())
        .max_by(|x, y| mvp_score(x).total_cmp(&mvp_score(y)))
        .map(|p| p.id.clone())
        .unwrap_or_default();
    assert_eq!(result.mvp, best);
}

#[test]
fn test_unbalanced_match_goes_to_the_stronger_team() {
    let weapons = WeaponCatalog::new();
    let maps = MapCatalog::with_standard_maps();
    let simulator = MatchSimulator::new(&weapons, &maps);
    let config = MatchConfig {
        map_name: "Haven".to_string(),
        seed: Some(31),
        agent_overrides: BTreeMap::new(),
    };
    let result = simulator
        .simulate_match(&build_team("a", 95.0), &build_team("b", 40.0), &config)
        .expect("simulation failed");

    assert_eq!(result.score.team_a, 13, "the stronger team should close it out");
    assert!(result.rounds.len() <= 25);
}

#[test]
fn test_unknown_map_falls_back_with_a_note() {
    let weapons = WeaponCatalog::new();
    let maps = MapCatalog::with_standard_maps();
    let simulator = MatchSimulator::new(&weapons, &maps);
    let config = MatchConfig {
        map_name: "Fracture".to_string(),
        seed: Some(37),
        agent_overrides: BTreeMap::new(),
    };
    let result = simulator
        .simulate_match(&build_team("a", 75.0), &build_team("b", 75.0), &config)
        .expect("simulation failed");

    assert_eq!(result.map, "Fracture");
    assert!(
        result.economy_logs[0].notes.contains("substituted fallback layout"),
        "missing fallback note: {}",
        result.economy_logs[0].notes
    );
    assert_eq!(result.rounds[0].map_data.map_name, "Fracture");
}

#[test]
fn test_short_roster_is_rejected_with_field_errors() {
    let weapons = WeaponCatalog::new();
    let maps = MapCatalog::with_standard_maps();
    let simulator = MatchSimulator::new(&weapons, &maps);
    let config = MatchConfig {
        map_name: "Ascent".to_string(),
        seed: Some(41),
        agent_overrides: BTreeMap::new(),
    };
    let mut short = build_team("a", 75.0);
    short.pop();

    let err = simulator
        .simulate_match(&short, &build_team("b", 75.0), &config)
        .expect_err("four players must not validate");
    match err {
        SimError::Validation(v) => {
            assert!(v.errors.iter().any(|e| e.field == "team_a"), "got {v}");
        }
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn test_invalid_stats_are_aggregated_across_players() {
    let weapons = WeaponCatalog::new();
    let maps = MapCatalog::with_standard_maps();
    let simulator = MatchSimulator::new(&weapons, &maps);
    let config = MatchConfig::default();

    let mut team_a = build_team("a", 75.0);
    team_a[0].core_stats.aim = 140.0;
    team_a[2].career_stats.clutch_rate = 1.8;
    let err = simulator
        .simulate_match(&team_a, &build_team("b", 75.0), &config)
        .expect_err("bad stats must not validate");
    match err {
        SimError::Validation(v) => {
            assert!(v.errors.iter().any(|e| e.field.contains("a0") && e.field.contains("aim")));
            assert!(v
                .errors
                .iter()
                .any(|e| e.field.contains("a2") && e.field.contains("clutch_rate")));
        }
        other => panic!("expected a validation error, got {other}"),
    }
}

#[test]
fn test_agent_overrides_are_respected() {
    let weapons = WeaponCatalog::new();
    let maps = MapCatalog::with_standard_maps();
    let simulator = MatchSimulator::new(&weapons, &maps);
    let mut overrides = BTreeMap::new();
    overrides.insert("a0".to_string(), Agent::Yoru);
    overrides.insert("b3".to_string(), Agent::Gekko);
    let config = MatchConfig {
        map_name: "Bind".to_string(),
        seed: Some(43),
        agent_overrides: overrides,
    };
    let result = simulator
        .simulate_match(&build_team("a", 75.0), &build_team("b", 75.0), &config)
        .expect("simulation failed");

    assert_eq!(result.player_agents["a0"], Agent::Yoru);
    assert_eq!(result.player_agents["b3"], Agent::Gekko);
    for round in &result.rounds {
        assert_eq!(round.player_loadouts.team_a["a0"].agent, Agent::Yoru);
    }
}

#[test]
fn test_map_data_is_well_formed() {
    let result = run_match(47);
    for round in &result.rounds {
        let mut last = 0.0f64;
        for event in &round.map_data.events {
            assert!(event.timestamp >= last, "events out of order in round {}", round.round_number);
            last = event.timestamp;
            assert!((0.0..=1.0).contains(&event.position.0));
            assert!((0.0..=1.0).contains(&event.position.1));
        }
        for track in round.map_data.player_positions.values() {
            assert!(!track.is_empty());
            for pos in track {
                assert!((0.0..=1.0).contains(&pos.position.0));
                assert!((0.0..=1.0).contains(&pos.position.1));
                assert!((0.0..360.0).contains(&pos.rotation));
            }
        }
        assert_eq!(round.map_data.attacker_positions.len(), 5);
        assert_eq!(round.map_data.defender_positions.len(), 5);
    }
}

#[test]
fn test_survivors_and_clutch_are_consistent() {
    let result = run_match(53);
    for round in &result.rounds {
        assert!(round.survivors.team_a <= 5 && round.survivors.team_b <= 5);
        if let Some(clutch) = &round.clutch_player {
            let clutch_is_a = clutch.starts_with('a');
            let winner_is_a = round.winner == valsim_backend::economy::TeamSide::TeamA;
            assert_eq!(clutch_is_a, winner_is_a, "clutch player must be on the winning side");
        }
    }
}
