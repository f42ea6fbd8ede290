use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttackPlan {
    AggressivePush,
    SplitPush,
    FastExecute,
    Default,
    Eco,
}

impl AttackPlan {
    pub fn label(&self) -> &'static str {
        match self {
            AttackPlan::AggressivePush => "aggressive_push",
            AttackPlan::SplitPush => "split_push",
            AttackPlan::FastExecute => "fast_execute",
            AttackPlan::Default => "default",
            AttackPlan::Eco => "eco",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DefensePlan {
    PassiveDefense,
    AggressiveDefense,
    StackA,
    StackB,
    BalancedDefense,
}

impl DefensePlan {
    pub fn label(&self) -> &'static str {
        match self {
            DefensePlan::PassiveDefense => "passive_defense",
            DefensePlan::AggressiveDefense => "aggressive_defense",
            DefensePlan::StackA => "stack_a",
            DefensePlan::StackB => "stack_b",
            DefensePlan::BalancedDefense => "balanced_defense",
        }
    }
}

/// Picks the round plans from each side's economy, diversified when the
/// previous round went that side's way.
///
/// `attacker_won_previous` is None on the opening round of a half.
pub fn pick_plans<R: Rng>(
    attacker_economy: u32,
    defender_economy: u32,
    attacker_won_previous: Option<bool>,
    rng: &mut R,
) -> (AttackPlan, DefensePlan) {
    let attacker_rich = attacker_economy >= 3500;
    let defender_rich = defender_economy >= 3500;

    let mut attack = if attacker_economy < 2000 {
        AttackPlan::Eco
    } else {
        AttackPlan::Default
    };
    let mut defense = if defender_economy < 2000 {
        DefensePlan::PassiveDefense
    } else {
        DefensePlan::BalancedDefense
    };

    if let Some(attacker_won) = attacker_won_previous {
        if attacker_won && attacker_rich {
            attack = *[AttackPlan::AggressivePush, AttackPlan::SplitPush, AttackPlan::Default]
                .choose(rng)
                .unwrap_or(&AttackPlan::Default);
        }
        if !attacker_won && defender_rich {
            defense = *[DefensePlan::StackA, DefensePlan::StackB, DefensePlan::BalancedDefense]
                .choose(rng)
                .unwrap_or(&DefensePlan::BalancedDefense);
        }
        if attacker_rich && defender_rich {
            if rng.random::<f64>() < 0.5 {
                attack = *[AttackPlan::FastExecute, AttackPlan::Default]
                    .choose(rng)
                    .unwrap_or(&AttackPlan::Default);
            }
            if rng.random::<f64>() < 0.5 {
                defense = *[
                    DefensePlan::AggressiveDefense,
                    DefensePlan::PassiveDefense,
                    DefensePlan::BalancedDefense,
                ]
                .choose(rng)
                .unwrap_or(&DefensePlan::BalancedDefense);
            }
        }
    }

    (attack, defense)
}

/// Matchup nudge applied to the attacker side, in [-0.20, 0.15]. Stack reads
/// are a coin flip since the attackers either hit the empty site or run into
/// five players. Notes explain what happened for the round log.
pub fn plan_modifier<R: Rng>(
    attack: AttackPlan,
    defense: DefensePlan,
    rng: &mut R,
) -> (f64, Vec<String>) {
    let mut notes = Vec::new();
    let mut modifier = 0.0;

    match attack {
        AttackPlan::AggressivePush => match defense {
            DefensePlan::PassiveDefense => modifier += 0.10,
            DefensePlan::StackA | DefensePlan::StackB => {
                if rng.random::<f64>() < 0.5 {
                    modifier += 0.15;
                    notes.push("Attackers avoided the defender stack".to_string());
                } else {
                    modifier -= 0.15;
                    notes.push("Attackers ran into the defender stack".to_string());
                }
            }
            _ => {}
        },
        AttackPlan::SplitPush => match defense {
            DefensePlan::StackA | DefensePlan::StackB => {
                modifier += 0.12;
                notes.push("Split push punished the defender stack".to_string());
            }
            DefensePlan::AggressiveDefense => {
                modifier -= 0.08;
                notes.push("Aggressive defense disrupted the split push".to_string());
            }
            _ => {}
        },
        AttackPlan::FastExecute => match defense {
            DefensePlan::PassiveDefense => {
                modifier += 0.15;
                notes.push("Fast execute overwhelmed a passive setup".to_string());
            }
            DefensePlan::AggressiveDefense => {
                if rng.random::<f64>() < 0.5 {
                    modifier += 0.10;
                    notes.push("Fast execute beat the aggressive defense".to_string());
                } else {
                    modifier -= 0.10;
                    notes.push("Aggressive defense countered the fast execute".to_string());
                }
            }
            _ => {}
        },
        AttackPlan::Default => modifier += 0.05,
        AttackPlan::Eco => {
            modifier -= 0.15;
            notes.push("Attackers on eco".to_string());
            if defense == DefensePlan::AggressiveDefense {
                modifier -= 0.05;
                notes.push("Defenders pushed out against the eco".to_string());
            }
        }
    }

    (modifier, notes)
}
