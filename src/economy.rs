use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_MONEY: u32 = 9000;
pub const MIN_MONEY: u32 = 2000;
pub const STARTING_CREDITS: u32 = 800;
pub const TEAM_STARTING_ECONOMY: u32 = 4000;
pub const WIN_REWARD: u32 = 3000;
pub const LOSS_BONUS_TABLE: [u32; 5] = [1900, 2400, 2900, 3400, 3900];
pub const PLANT_BONUS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    TeamA,
    TeamB,
}

impl TeamSide {
    pub fn other(&self) -> TeamSide {
        match self {
            TeamSide::TeamA => TeamSide::TeamB,
            TeamSide::TeamB => TeamSide::TeamA,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamSide::TeamA => "team_a",
            TeamSide::TeamB => "team_b",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LossStreaks {
    pub team_a: u32,
    pub team_b: u32,
}

impl LossStreaks {
    pub fn get(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::TeamA => self.team_a,
            TeamSide::TeamB => self.team_b,
        }
    }

    fn set(&mut self, side: TeamSide, value: u32) {
        match side {
            TeamSide::TeamA => self.team_a = value,
            TeamSide::TeamB => self.team_b = value,
        }
    }
}

/// One round's economy ledger. Notes stay a list until the wire render so
/// line items can keep accumulating during the round.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyLogEntry {
    pub round_number: u32,
    pub team_a_start: u32,
    pub team_b_start: u32,
    pub team_a_spend: u32,
    pub team_b_spend: u32,
    pub team_a_end: u32,
    pub team_b_end: u32,
    pub team_a_reward: u32,
    pub team_b_reward: u32,
    pub winner: Option<TeamSide>,
    pub spike_planted: bool,
    pub notes: Vec<String>,
}

impl EconomyLogEntry {
    pub fn open(round_number: u32, team_a_start: u32, team_b_start: u32) -> Self {
        EconomyLogEntry {
            round_number,
            team_a_start,
            team_b_start,
            team_a_spend: 0,
            team_b_spend: 0,
            team_a_end: team_a_start,
            team_b_end: team_b_start,
            team_a_reward: 0,
            team_b_reward: 0,
            winner: None,
            spike_planted: false,
            notes: Vec::new(),
        }
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }

    pub fn render(&self) -> EconomyLog {
        EconomyLog {
            round_number: self.round_number,
            team_a_start: self.team_a_start,
            team_b_start: self.team_b_start,
            team_a_spend: self.team_a_spend,
            team_b_spend: self.team_b_spend,
            team_a_end: self.team_a_end,
            team_b_end: self.team_b_end,
            team_a_reward: self.team_a_reward,
            team_b_reward: self.team_b_reward,
            winner: self.winner,
            spike_planted: self.spike_planted,
            notes: self.notes.join("; "),
        }
    }
}

/// Wire shape of a per-round economy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EconomyLog {
    pub round_number: u32,
    pub team_a_start: u32,
    pub team_b_start: u32,
    pub team_a_spend: u32,
    pub team_b_spend: u32,
    pub team_a_end: u32,
    pub team_b_end: u32,
    pub team_a_reward: u32,
    pub team_b_reward: u32,
    pub winner: Option<TeamSide>,
    pub spike_planted: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRewards {
    pub team_a: u32,
    pub team_b: u32,
}

/// End-of-round credit transitions. Rewards are reported as the sum of
/// credits actually applied per team, after clamping, so the ledger identity
/// start - spend + reward = end holds exactly.
#[allow(clippy::too_many_arguments)]
pub fn apply_round_rewards(
    credits: &mut BTreeMap<String, u32>,
    streaks: &mut LossStreaks,
    team_a_ids: &[String],
    team_b_ids: &[String],
    winner: TeamSide,
    spike_planted: bool,
    planting_side: Option<TeamSide>,
) -> RoundRewards {
    let loser = winner.other();
    let loss_bonus = LOSS_BONUS_TABLE[streaks.get(loser).min(4) as usize];

    let mut rewards = RoundRewards::default();
    for (side, ids) in [(TeamSide::TeamA, team_a_ids), (TeamSide::TeamB, team_b_ids)] {
        let mut applied = 0;
        for id in ids {
            let current = credits.get(id).copied().unwrap_or(0);
            let mut updated = if side == winner {
                (current + WIN_REWARD).min(MAX_MONEY)
            } else {
                (current + loss_bonus).clamp(MIN_MONEY, MAX_MONEY)
            };
            if spike_planted && planting_side == Some(side) {
                updated = (updated + PLANT_BONUS).min(MAX_MONEY);
            }
            applied += updated - current;
            credits.insert(id.clone(), updated);
        }
        match side {
            TeamSide::TeamA => rewards.team_a = applied,
            TeamSide::TeamB => rewards.team_b = applied,
        }
    }

    streaks.set(winner, 0);
    streaks.set(loser, streaks.get(loser) + 1);

    rewards
}

/// Pistol boundary: every player back to starting credits.
pub fn reset_for_pistol(credits: &mut BTreeMap<String, u32>) {
    for value in credits.values_mut() {
        *value = STARTING_CREDITS;
    }
}

pub fn team_total(credits: &BTreeMap<String, u32>, ids: &[String]) -> u32 {
    ids.iter().map(|id| credits.get(id).copied().unwrap_or(0)).sum()
}

/// A post-round bookkeeping bug: the engine aborts the match rather than
/// carry corrupt state forward.
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantViolation {
    pub round_number: u32,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invariant violation in round {}: {}: {}",
            self.round_number, self.field, self.message
        )
    }
}

impl std::error::Error for InvariantViolation {}

/// Post-round checks: every wallet within bounds, winner streak reset.
pub fn verify_post_round(
    credits: &BTreeMap<String, u32>,
    streaks: &LossStreaks,
    winner: TeamSide,
    round_number: u32,
) -> Result<(), InvariantViolation> {
    for (id, value) in credits {
        if *value < MIN_MONEY || *value > MAX_MONEY {
            return Err(InvariantViolation {
                round_number,
                field: format!("player_credits.{id}"),
                message: format!("{value} outside [{MIN_MONEY}, {MAX_MONEY}]"),
            });
        }
    }
    if streaks.get(winner) != 0 {
        return Err(InvariantViolation {
            round_number,
            field: format!("loss_streaks.{}", winner.label()),
            message: "winner loss streak must reset to zero".to_string(),
        });
    }
    Ok(())
}
