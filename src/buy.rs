use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agents::Agent;
use crate::player::{Player, Role};
use crate::weapons::{WeaponCatalog, WeaponId};

pub const PISTOL_ARMOR_COST: u32 = 400;
pub const FULL_ARMOR_COST: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    Pistol,
    Eco,
    ForceBuy,
    HalfBuy,
    FullBuy,
    SemiBuy,
}

/// Default round-type call from team economy and loss streak. Pistol rounds
/// are forced by the round number at the call site, never classified here.
pub fn classify_round_type(team_economy: u32, loss_streak: u32) -> RoundType {
    if team_economy >= 4000 {
        RoundType::FullBuy
    } else if team_economy >= 2000 || loss_streak >= 2 {
        RoundType::ForceBuy
    } else {
        RoundType::Eco
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuyDecision {
    pub weapon: WeaponId,
    pub armor: bool,
    pub total_spend: u32,
}

/// Picks a weapon and armor for one player from their own credits, stats,
/// role and signature agent. Pure: same inputs, same decision.
pub fn decide_buy(
    player: &Player,
    primary_agent: Agent,
    credits: u32,
    round_type: RoundType,
    catalog: &WeaponCatalog,
) -> BuyDecision {
    let weapon = match round_type {
        RoundType::Pistol => pistol_weapon(player, credits),
        RoundType::Eco => eco_weapon(player, primary_agent, credits),
        RoundType::ForceBuy => force_weapon(player, primary_agent, credits),
        RoundType::HalfBuy | RoundType::SemiBuy => half_weapon(player, primary_agent, credits),
        RoundType::FullBuy => full_weapon(player, primary_agent, credits),
    };

    let weapon_cost = catalog.cost(weapon);
    let remaining = credits.saturating_sub(weapon_cost);
    let armor_cost = if round_type == RoundType::Pistol { PISTOL_ARMOR_COST } else { FULL_ARMOR_COST };
    let armor = if round_type == RoundType::Eco {
        // Saving rounds skip armor unless nothing was spent on a gun.
        weapon == WeaponId::Classic && remaining > armor_cost
    } else {
        remaining >= armor_cost
    };

    BuyDecision {
        weapon,
        armor,
        total_spend: weapon_cost + if armor { armor_cost } else { 0 },
    }
}

fn pistol_weapon(player: &Player, credits: u32) -> WeaponId {
    let stats = &player.core_stats;
    if credits >= 800 && stats.aim > 90.0 {
        WeaponId::Sheriff
    } else if credits >= 500 && stats.aim > 75.0 {
        WeaponId::Ghost
    } else if credits >= 450 && (player.primary_role == Role::Duelist || stats.movement > 70.0) {
        WeaponId::Frenzy
    } else if credits >= 200
        && matches!(player.primary_role, Role::Sentinel | Role::Controller)
    {
        WeaponId::Shorty
    } else {
        WeaponId::Classic
    }
}

fn eco_weapon(player: &Player, primary_agent: Agent, credits: u32) -> WeaponId {
    let stats = &player.core_stats;
    if credits < 400 {
        return WeaponId::Classic;
    }
    if credits >= 800 && stats.aim > 80.0 {
        WeaponId::Sheriff
    } else if credits >= 700 && stats.aim > 60.0 {
        WeaponId::Ghost
    } else if credits >= 150
        && (matches!(primary_agent, Agent::Reyna | Agent::Raze | Agent::Jett)
            || player.primary_role == Role::Duelist)
    {
        WeaponId::Shorty
    } else if credits >= 600 && (player.primary_role == Role::Duelist || stats.movement > 70.0) {
        WeaponId::Frenzy
    } else {
        WeaponId::Classic
    }
}

fn force_weapon(player: &Player, primary_agent: Agent, credits: u32) -> WeaponId {
    let stats = &player.core_stats;
    if credits >= 1600 {
        WeaponId::Spectre
    } else if credits >= 950 && (stats.aim > 85.0 || primary_agent == Agent::Chamber) {
        WeaponId::Marshal
    } else if credits >= 950 {
        WeaponId::Stinger
    } else if credits >= 850 && (player.primary_role == Role::Duelist || stats.movement > 80.0) {
        WeaponId::Bucky
    } else {
        eco_weapon(player, primary_agent, credits)
    }
}

fn half_weapon(player: &Player, primary_agent: Agent, credits: u32) -> WeaponId {
    let stats = &player.core_stats;
    if credits >= 1850
        && (matches!(primary_agent, Agent::Raze | Agent::Jett | Agent::Reyna)
            || stats.movement > 85.0)
    {
        WeaponId::Judge
    } else if credits >= 1600
        && matches!(player.primary_role, Role::Sentinel | Role::Controller)
    {
        WeaponId::Ares
    } else if credits >= 1600 {
        WeaponId::Spectre
    } else {
        force_weapon(player, primary_agent, credits)
    }
}

fn full_weapon(player: &Player, primary_agent: Agent, credits: u32) -> WeaponId {
    let stats = &player.core_stats;
    if credits >= 4700 && (primary_agent == Agent::Chamber || stats.aim > 85.0) {
        WeaponId::Operator
    } else if credits >= 3200 && matches!(player.primary_role, Role::Sentinel | Role::Controller) {
        WeaponId::Odin
    } else if credits >= 2900 {
        rifle_preference(player)
    } else if credits >= 2250 && stats.aim > 80.0 {
        WeaponId::Guardian
    } else if credits >= 2250 {
        WeaponId::Bulldog
    } else if credits >= 1600 {
        WeaponId::Spectre
    } else {
        force_weapon(player, primary_agent, credits)
    }
}

/// Vandal for raw-aim profiles, Phantom for movement/utility profiles; the
/// role decides on a dead-even stat line.
fn rifle_preference(player: &Player) -> WeaponId {
    let stats = &player.core_stats;
    if stats.aim > stats.movement && stats.aim > stats.utility_usage {
        WeaponId::Vandal
    } else if stats.movement > stats.aim || stats.utility_usage > stats.aim {
        WeaponId::Phantom
    } else if player.primary_role == Role::Duelist {
        WeaponId::Vandal
    } else {
        WeaponId::Phantom
    }
}
