use std::collections::BTreeMap;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agents::{select_team_agents, Agent};
use crate::economy::{
    apply_round_rewards, reset_for_pistol, team_total, verify_post_round, EconomyLog,
    EconomyLogEntry, InvariantViolation, LossStreaks, TeamSide, STARTING_CREDITS,
};
use crate::maps::{MapCatalog, MapLayout};
use crate::player::{collect_roster_errors, Player, ValidationError};
use crate::round::{is_pistol_round, simulate_round, ByTeam, RoundResult, BUY_PHASE_SECONDS};
use crate::weapons::WeaponCatalog;

pub const WINNING_SCORE: u32 = 13;

#[derive(Debug)]
pub enum SimError {
    Validation(ValidationError),
    Invariant(InvariantViolation),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::Validation(e) => e.fmt(f),
            SimError::Invariant(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SimError {}

impl From<ValidationError> for SimError {
    fn from(e: ValidationError) -> Self {
        SimError::Validation(e)
    }
}

impl From<InvariantViolation> for SimError {
    fn from(e: InvariantViolation) -> Self {
        SimError::Invariant(e)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MatchConfig {
    pub map_name: String,
    /// Seeds the simulation RNG; omitted means OS entropy and a
    /// non-reproducible match.
    pub seed: Option<u64>,
    /// Pre-seeded player-to-agent picks; remaining slots are filled by the
    /// selector.
    #[serde(default)]
    pub agent_overrides: BTreeMap<String, Agent>,
}

/// Full wire-shape match report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchResult {
    pub score: ByTeam<u32>,
    pub rounds: Vec<RoundResult>,
    /// Simulated match length in minutes.
    pub duration: f64,
    pub map: String,
    pub mvp: String,
    pub economy_logs: Vec<EconomyLog>,
    pub player_agents: BTreeMap<String, Agent>,
}

/// Runs complete matches against shared, read-only catalogs. One instance
/// per request is cheap; all mutable state lives inside the call.
pub struct MatchSimulator<'a> {
    weapons: &'a WeaponCatalog,
    maps: &'a MapCatalog,
}

impl<'a> MatchSimulator<'a> {
    pub fn new(weapons: &'a WeaponCatalog, maps: &'a MapCatalog) -> Self {
        MatchSimulator { weapons, maps }
    }

    pub fn simulate_match(
        &self,
        team_a: &[Player],
        team_b: &[Player],
        config: &MatchConfig,
    ) -> Result<MatchResult, SimError> {
        let mut errors = Vec::new();
        collect_roster_errors(team_a, "team_a", &mut errors);
        collect_roster_errors(team_b, "team_b", &mut errors);
        if !errors.is_empty() {
            return Err(ValidationError::new(errors).into());
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let fallback;
        let (layout, map_substituted): (&MapLayout, bool) = match self.maps.lookup(&config.map_name)
        {
            Some(layout) => (layout, false),
            None => {
                debug!("unknown map '{}', using fallback layout", config.map_name);
                fallback = MapLayout::fallback(&config.map_name);
                (&fallback, true)
            }
        };

        let team_a_ids: Vec<String> = team_a.iter().map(|p| p.id.clone()).collect();
        let team_b_ids: Vec<String> = team_b.iter().map(|p| p.id.clone()).collect();

        let mut player_agents = select_team_agents(team_a, &config.agent_overrides);
        player_agents.extend(select_team_agents(team_b, &config.agent_overrides));

        let mut credits: BTreeMap<String, u32> = BTreeMap::new();
        for id in team_a_ids.iter().chain(team_b_ids.iter()) {
            credits.insert(id.clone(), STARTING_CREDITS);
        }
        let mut streaks = LossStreaks::default();
        let mut score: ByTeam<u32> = ByTeam::default();
        let mut rounds: Vec<RoundResult> = Vec::new();
        let mut log_entries: Vec<EconomyLogEntry> = Vec::new();
        let mut previous_winner: Option<TeamSide> = None;
        let mut round_number = 0;
        let mut duration_seconds = 0.0;

        while score.team_a < WINNING_SCORE && score.team_b < WINNING_SCORE {
            if is_pistol_round(round_number) {
                reset_for_pistol(&mut credits);
            }

            let mut entry = EconomyLogEntry::open(
                round_number,
                team_total(&credits, &team_a_ids),
                team_total(&credits, &team_b_ids),
            );
            if round_number == 0 {
                entry.note("Match start");
                if map_substituted {
                    entry.note(format!(
                        "Unknown map '{}', substituted fallback layout",
                        config.map_name
                    ));
                }
            }

            let outcome = simulate_round(
                round_number,
                team_a,
                team_b,
                &player_agents,
                &mut credits,
                &streaks,
                previous_winner,
                layout,
                self.weapons,
                &mut rng,
            );

            let winner = outcome.result.winner;
            *score.get_mut(winner) += 1;

            let rewards = apply_round_rewards(
                &mut credits,
                &mut streaks,
                &team_a_ids,
                &team_b_ids,
                winner,
                outcome.result.spike_planted,
                outcome.planting_side,
            );
            verify_post_round(&credits, &streaks, winner, round_number)?;

            entry.team_a_spend = outcome.spend.team_a;
            entry.team_b_spend = outcome.spend.team_b;
            entry.team_a_reward = rewards.team_a;
            entry.team_b_reward = rewards.team_b;
            entry.team_a_end = team_total(&credits, &team_a_ids);
            entry.team_b_end = team_total(&credits, &team_b_ids);
            entry.winner = Some(winner);
            entry.spike_planted = outcome.result.spike_planted;
            for note in &outcome.notes {
                entry.note(note.clone());
            }

            // The wire round reports the settled end-of-round economy.
            let mut round_result = outcome.result;
            round_result.player_credits = credits.clone();
            round_result.economy =
                ByTeam { team_a: entry.team_a_end, team_b: entry.team_b_end };

            log_entries.push(entry);
            duration_seconds += BUY_PHASE_SECONDS + outcome.elapsed_seconds;
            previous_winner = Some(winner);
            rounds.push(round_result);
            round_number += 1;
        }

        let mvp = pick_mvp(team_a, team_b);
        info!(
            "match complete on {}: {}-{} in {} rounds, mvp {}",
            layout.name, score.team_a, score.team_b, round_number, mvp
        );

        Ok(MatchResult {
            score,
            rounds,
            duration: duration_seconds / 60.0,
            map: layout.name.clone(),
            mvp,
            economy_logs: log_entries.iter().map(EconomyLogEntry::render).collect(),
            player_agents,
        })
    }
}

/// Career-stat heuristic over all ten players; input stats are taken as-is.
pub fn mvp_score(player: &Player) -> f64 {
    let career = &player.career_stats;
    0.4 * career.kd_ratio + 0.3 * career.clutch_rate + 0.3 * career.first_blood_rate
}

fn pick_mvp(team_a: &[Player], team_b: &[Player]) -> String {
    let mut best_id = String::new();
    let mut best_score = f64::NEG_INFINITY;
    for player in team_a.iter().chain(team_b.iter()) {
        let score = mvp_score(player);
        if score > best_score {
            best_score = score;
            best_id = player.id.clone();
        }
    }
    best_id
}
