use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agents::Agent;
use crate::buy::{classify_round_type, decide_buy, RoundType};
use crate::duel::resolve_duel;
use crate::economy::{team_total, LossStreaks, TeamSide};
use crate::maps::MapLayout;
use crate::player::Player;
use crate::strategy::{pick_plans, plan_modifier};
use crate::weapons::{EngagementRange, WeaponCatalog, WeaponId};

pub const ROUND_TIME_SECONDS: f64 = 100.0;
pub const SPIKE_TIMER_SECONDS: f64 = 45.0;
pub const BUY_PHASE_SECONDS: f64 = 30.0;

const ENGAGEMENT_CHANCE: f64 = 0.7;
const PLANT_CHANCE: f64 = 0.3;

/// Pair of per-team values in the wire shape `{team_a: .., team_b: ..}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ByTeam<T> {
    pub team_a: T,
    pub team_b: T,
}

impl<T> ByTeam<T> {
    pub fn get(&self, side: TeamSide) -> &T {
        match side {
            TeamSide::TeamA => &self.team_a,
            TeamSide::TeamB => &self.team_b,
        }
    }

    pub fn get_mut(&mut self, side: TeamSide) -> &mut T {
        match side {
            TeamSide::TeamA => &mut self.team_a,
            TeamSide::TeamB => &mut self.team_b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerPosition {
    pub player_id: String,
    #[schema(value_type = Vec<f64>)]
    pub position: (f64, f64),
    pub rotation: f64,
    pub callout: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MapEventType {
    Kill,
    Plant,
}

/// Something that happened at a point on the map, in simulated-time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapEvent {
    pub event_type: MapEventType,
    #[schema(value_type = Vec<f64>)]
    pub position: (f64, f64),
    pub timestamp: f64,
    pub player_id: String,
    pub target_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoundMapData {
    pub map_name: String,
    pub player_positions: BTreeMap<String, Vec<PlayerPosition>>,
    pub events: Vec<MapEvent>,
    #[schema(value_type = Option<Vec<f64>>)]
    pub spike_plant_position: Option<(f64, f64)>,
    #[schema(value_type = Object)]
    pub attacker_positions: BTreeMap<String, (f64, f64)>,
    #[schema(value_type = Object)]
    pub defender_positions: BTreeMap<String, (f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerLoadout {
    pub weapon: WeaponId,
    pub armor: bool,
    pub total_spend: u32,
    pub agent: Agent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoundResult {
    pub winner: TeamSide,
    pub round_number: u32,
    pub spike_planted: bool,
    pub survivors: ByTeam<u32>,
    pub weapons: ByTeam<BTreeMap<String, WeaponId>>,
    pub armor: ByTeam<BTreeMap<String, bool>>,
    pub player_loadouts: ByTeam<BTreeMap<String, PlayerLoadout>>,
    pub player_credits: BTreeMap<String, u32>,
    pub is_pistol_round: bool,
    pub economy: ByTeam<u32>,
    pub clutch_player: Option<String>,
    pub summary: String,
    pub map_data: RoundMapData,
}

/// Everything the match loop needs from one simulated round, beyond the wire
/// result itself.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub result: RoundResult,
    pub spend: ByTeam<u32>,
    pub planting_side: Option<TeamSide>,
    pub elapsed_seconds: f64,
    pub notes: Vec<String>,
}

pub fn attacker_side_for_round(round_number: u32) -> TeamSide {
    if round_number < 12 {
        TeamSide::TeamA
    } else {
        TeamSide::TeamB
    }
}

pub fn is_pistol_round(round_number: u32) -> bool {
    round_number == 0 || round_number == 12
}

#[allow(clippy::too_many_arguments)]
pub fn simulate_round<R: Rng>(
    round_number: u32,
    team_a: &[Player],
    team_b: &[Player],
    player_agents: &BTreeMap<String, Agent>,
    credits: &mut BTreeMap<String, u32>,
    streaks: &LossStreaks,
    previous_winner: Option<TeamSide>,
    layout: &MapLayout,
    catalog: &WeaponCatalog,
    rng: &mut R,
) -> RoundOutcome {
    let attacker_side = attacker_side_for_round(round_number);
    let pistol = is_pistol_round(round_number);
    let mut notes = Vec::new();

    // Buy phase. Every wallet is the player's own; the team economy only
    // picks the round type.
    let mut weapons: ByTeam<BTreeMap<String, WeaponId>> = ByTeam::default();
    let mut armor: ByTeam<BTreeMap<String, bool>> = ByTeam::default();
    let mut loadouts: ByTeam<BTreeMap<String, PlayerLoadout>> = ByTeam::default();
    let mut spend: ByTeam<u32> = ByTeam::default();

    for (side, roster) in [(TeamSide::TeamA, team_a), (TeamSide::TeamB, team_b)] {
        let ids: Vec<String> = roster.iter().map(|p| p.id.clone()).collect();
        let economy = team_total(credits, &ids);
        let round_type =
            if pistol { RoundType::Pistol } else { classify_round_type(economy, streaks.get(side)) };
        notes.push(format!("{} round type: {:?} with {} credits", side.label(), round_type, economy));

        let mut team_spend = 0;
        for player in roster {
            let agent = player_agents.get(&player.id).copied().unwrap_or(Agent::Jett);
            let available = credits.get(&player.id).copied().unwrap_or(0);
            let decision = decide_buy(player, agent, available, round_type, catalog);
            credits.insert(player.id.clone(), available - decision.total_spend);
            team_spend += decision.total_spend;

            weapons.get_mut(side).insert(player.id.clone(), decision.weapon);
            armor.get_mut(side).insert(player.id.clone(), decision.armor);
            loadouts.get_mut(side).insert(
                player.id.clone(),
                PlayerLoadout {
                    weapon: decision.weapon,
                    armor: decision.armor,
                    total_spend: decision.total_spend,
                    agent,
                },
            );
        }
        notes.push(format!("{} spent {} credits in buy phase", side.label(), team_spend));
        *spend.get_mut(side) = team_spend;
    }

    let credits_after_buy = credits.clone();
    let team_a_ids: Vec<String> = team_a.iter().map(|p| p.id.clone()).collect();
    let team_b_ids: Vec<String> = team_b.iter().map(|p| p.id.clone()).collect();
    let economy_after_buy = ByTeam {
        team_a: team_total(credits, &team_a_ids),
        team_b: team_total(credits, &team_b_ids),
    };

    // Round plans, chosen after buys so an eco actually looks like one.
    let (attackers, defenders) = if attacker_side == TeamSide::TeamA {
        (team_a, team_b)
    } else {
        (team_b, team_a)
    };
    let (attack_plan, defense_plan) = pick_plans(
        *economy_after_buy.get(attacker_side),
        *economy_after_buy.get(attacker_side.other()),
        previous_winner.map(|w| w == attacker_side),
        rng,
    );
    notes.push(format!("Attackers strategy: {}", attack_plan.label()));
    notes.push(format!("Defenders strategy: {}", defense_plan.label()));
    let (attack_modifier, plan_notes) = plan_modifier(attack_plan, defense_plan, rng);
    notes.extend(plan_notes);

    // Spawn placement.
    let mut positions: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    let mut history: BTreeMap<String, Vec<PlayerPosition>> = BTreeMap::new();
    for (roster, attacking) in [(attackers, true), (defenders, false)] {
        let spawn = layout.spawn_for(attacking);
        for player in roster {
            let pos = clamp_unit((
                spawn.0 + rng.random_range(-0.05..0.05),
                spawn.1 + rng.random_range(-0.05..0.05),
            ));
            positions.insert(player.id.clone(), pos);
            history.insert(
                player.id.clone(),
                vec![PlayerPosition {
                    player_id: player.id.clone(),
                    position: pos,
                    rotation: rng.random_range(0.0..360.0),
                    callout: callout_at(layout, pos),
                }],
            );
        }
    }

    // Engagement loop. After a plant the loop keeps running through the
    // spike window: defenders can still retake by eliminating the attackers
    // before detonation.
    let mut alive_attackers: Vec<usize> = (0..attackers.len()).collect();
    let mut alive_defenders: Vec<usize> = (0..defenders.len()).collect();
    let mut events: Vec<MapEvent> = Vec::new();
    let mut clock = 0.0;
    let mut spike_planted = false;
    let mut plant_clock: Option<f64> = None;
    let mut spike_plant_position: Option<(f64, f64)> = None;
    let mut clutch_candidate: Option<(String, TeamSide)> = None;
    let defender_side = attacker_side.other();
    let mut end_clock;

    loop {
        if alive_attackers.is_empty() || alive_defenders.is_empty() {
            end_clock = clock;
            break;
        }
        clock += rng.random_range(5.0..15.0);
        match plant_clock {
            Some(planted_at) => {
                if clock >= planted_at + SPIKE_TIMER_SECONDS {
                    end_clock = planted_at + SPIKE_TIMER_SECONDS;
                    break;
                }
            }
            None => {
                if clock >= ROUND_TIME_SECONDS {
                    end_clock = ROUND_TIME_SECONDS;
                    break;
                }
            }
        }

        // Attackers push an objective; defenders shift slowly and sometimes
        // hold position.
        let targets = layout.push_targets();
        for &idx in &alive_attackers {
            let player = &attackers[idx];
            let target = targets
                .choose(rng)
                .map(|c| c.position)
                .unwrap_or((0.5, 0.5));
            let magnitude = rng.random_range(0.05..0.15);
            move_player(player, target, magnitude, &mut positions, &mut history, layout);
        }
        for &idx in &alive_defenders {
            let player = &defenders[idx];
            if rng.random::<f64>() < 0.3 {
                continue;
            }
            let target = targets
                .choose(rng)
                .map(|c| c.position)
                .unwrap_or((0.5, 0.5));
            let magnitude = rng.random_range(0.05..0.15) * 0.5;
            move_player(player, target, magnitude, &mut positions, &mut history, layout);
        }

        if rng.random_bool(ENGAGEMENT_CHANCE) {
            let att_slot = rng.random_range(0..alive_attackers.len());
            let def_slot = rng.random_range(0..alive_defenders.len());
            let att_player = &attackers[alive_attackers[att_slot]];
            let def_player = &defenders[alive_defenders[def_slot]];
            let range = *[EngagementRange::Close, EngagementRange::Medium, EngagementRange::Long]
                .choose(rng)
                .unwrap_or(&EngagementRange::Medium);

            let att_weapon = weapons.get(attacker_side).get(&att_player.id).copied().unwrap_or(WeaponId::Classic);
            let def_weapon = weapons.get(defender_side).get(&def_player.id).copied().unwrap_or(WeaponId::Classic);
            let att_armor = armor.get(attacker_side).get(&att_player.id).copied().unwrap_or(false);
            let def_armor = armor.get(defender_side).get(&def_player.id).copied().unwrap_or(false);

            let attacker_won = resolve_duel(
                att_player,
                def_player,
                att_weapon,
                def_weapon,
                range,
                att_armor,
                def_armor,
                attack_modifier,
                catalog,
                rng,
            );

            let (killer, victim) = if attacker_won {
                alive_defenders.remove(def_slot);
                (att_player, def_player)
            } else {
                alive_attackers.remove(att_slot);
                (def_player, att_player)
            };
            let victim_pos = positions.get(&victim.id).copied().unwrap_or((0.5, 0.5));
            events.push(MapEvent {
                event_type: MapEventType::Kill,
                position: victim_pos,
                timestamp: clock,
                player_id: killer.id.clone(),
                target_id: Some(victim.id.clone()),
            });

            if alive_attackers.len() == 1 && alive_defenders.len() >= 2 {
                clutch_candidate =
                    Some((attackers[alive_attackers[0]].id.clone(), attacker_side));
            } else if alive_defenders.len() == 1 && alive_attackers.len() >= 2 {
                clutch_candidate =
                    Some((defenders[alive_defenders[0]].id.clone(), defender_side));
            }
        }

        if !spike_planted && !alive_attackers.is_empty() && rng.random_bool(PLANT_CHANCE) {
            let site = layout
                .sites
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| "A".to_string());
            let site_pos =
                layout.site_callout(&site).map(|c| c.position).unwrap_or((0.5, 0.5));
            let plant_pos = clamp_unit((
                site_pos.0 + rng.random_range(-0.03..0.03),
                site_pos.1 + rng.random_range(-0.03..0.03),
            ));
            let planter_idx = *alive_attackers.choose(rng).unwrap_or(&0);
            let planter = &attackers[planter_idx];

            events.push(MapEvent {
                event_type: MapEventType::Plant,
                position: plant_pos,
                timestamp: clock,
                player_id: planter.id.clone(),
                target_id: None,
            });
            place_player(planter, plant_pos, &mut positions, &mut history, layout);
            for &idx in &alive_attackers {
                if idx == planter_idx {
                    continue;
                }
                let nearby = clamp_unit((
                    plant_pos.0 + rng.random_range(-0.10..0.10),
                    plant_pos.1 + rng.random_range(-0.10..0.10),
                ));
                place_player(&attackers[idx], nearby, &mut positions, &mut history, layout);
            }
            spike_plant_position = Some(plant_pos);
            spike_planted = true;
            plant_clock = Some(clock);
            notes.push(format!("Spike planted at {site} site"));
        }
    }

    // Outcome precedence: eliminations first, then the spike, then the clock.
    let (winner, summary) = if alive_defenders.is_empty() {
        (attacker_side, "Attackers win - Defenders eliminated")
    } else if alive_attackers.is_empty() {
        if spike_planted {
            (defender_side, "Defenders win - Spike defused")
        } else {
            (defender_side, "Defenders win - Attackers eliminated")
        }
    } else if spike_planted {
        (attacker_side, "Attackers win - Spike detonated")
    } else {
        (defender_side, "Defenders win - Time expired")
    };
    notes.push(summary.to_string());

    let elapsed_seconds = end_clock;

    let clutch_player = clutch_candidate
        .filter(|(_, side)| *side == winner)
        .map(|(id, _)| id);

    let mut survivors: ByTeam<u32> = ByTeam::default();
    *survivors.get_mut(attacker_side) = alive_attackers.len() as u32;
    *survivors.get_mut(defender_side) = alive_defenders.len() as u32;

    let mut attacker_positions = BTreeMap::new();
    let mut defender_positions = BTreeMap::new();
    for player in attackers {
        if let Some(pos) = positions.get(&player.id) {
            attacker_positions.insert(player.id.clone(), *pos);
        }
    }
    for player in defenders {
        if let Some(pos) = positions.get(&player.id) {
            defender_positions.insert(player.id.clone(), *pos);
        }
    }

    let result = RoundResult {
        winner,
        round_number,
        spike_planted,
        survivors,
        weapons,
        armor,
        player_loadouts: loadouts,
        player_credits: credits_after_buy,
        is_pistol_round: pistol,
        economy: economy_after_buy,
        clutch_player,
        summary: summary.to_string(),
        map_data: RoundMapData {
            map_name: layout.name.clone(),
            player_positions: history,
            events,
            spike_plant_position,
            attacker_positions,
            defender_positions,
        },
    };

    RoundOutcome {
        result,
        spend,
        planting_side: if spike_planted { Some(attacker_side) } else { None },
        elapsed_seconds,
        notes,
    }
}

fn clamp_unit(p: (f64, f64)) -> (f64, f64) {
    (p.0.clamp(0.0, 1.0), p.1.clamp(0.0, 1.0))
}

/// Steps a player toward a target and records the new position, facing the
/// way they moved.
fn move_player(
    player: &Player,
    target: (f64, f64),
    magnitude: f64,
    positions: &mut BTreeMap<String, (f64, f64)>,
    history: &mut BTreeMap<String, Vec<PlayerPosition>>,
    layout: &MapLayout,
) {
    let current = positions.get(&player.id).copied().unwrap_or((0.5, 0.5));
    let (dx, dy) = (target.0 - current.0, target.1 - current.1);
    let distance = (dx * dx + dy * dy).sqrt();
    if distance < 1e-9 {
        return;
    }
    let step = magnitude.min(distance);
    let next = clamp_unit((current.0 + dx / distance * step, current.1 + dy / distance * step));
    let rotation = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    positions.insert(player.id.clone(), next);
    if let Some(track) = history.get_mut(&player.id) {
        track.push(PlayerPosition {
            player_id: player.id.clone(),
            position: next,
            rotation,
            callout: callout_at(layout, next),
        });
    }
}

fn place_player(
    player: &Player,
    position: (f64, f64),
    positions: &mut BTreeMap<String, (f64, f64)>,
    history: &mut BTreeMap<String, Vec<PlayerPosition>>,
    layout: &MapLayout,
) {
    positions.insert(player.id.clone(), position);
    if let Some(track) = history.get_mut(&player.id) {
        let rotation = track.last().map(|p| p.rotation).unwrap_or(0.0);
        track.push(PlayerPosition {
            player_id: player.id.clone(),
            position,
            rotation,
            callout: callout_at(layout, position),
        });
    }
}

/// Name of the callout whose box contains the point, if any.
fn callout_at(layout: &MapLayout, point: (f64, f64)) -> Option<String> {
    layout
        .callouts
        .values()
        .find(|c| {
            (point.0 - c.position.0).abs() <= c.size.0 / 2.0
                && (point.1 - c.position.1).abs() <= c.size.1 / 2.0
        })
        .map(|c| c.name.clone())
}
