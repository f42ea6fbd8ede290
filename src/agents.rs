use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::player::{Player, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Agent {
    Jett,
    Phoenix,
    Raze,
    Reyna,
    Yoru,
    Neon,
    Omen,
    Brimstone,
    Viper,
    Astra,
    Harbor,
    Killjoy,
    Cypher,
    Sage,
    Chamber,
    Deadlock,
    Sova,
    Breach,
    Skye,
    #[serde(rename = "KAY/O")]
    KayO,
    Fade,
    Gekko,
}

impl Agent {
    pub const ALL: [Agent; 22] = [
        Agent::Jett,
        Agent::Phoenix,
        Agent::Raze,
        Agent::Reyna,
        Agent::Yoru,
        Agent::Neon,
        Agent::Omen,
        Agent::Brimstone,
        Agent::Viper,
        Agent::Astra,
        Agent::Harbor,
        Agent::Killjoy,
        Agent::Cypher,
        Agent::Sage,
        Agent::Chamber,
        Agent::Deadlock,
        Agent::Sova,
        Agent::Breach,
        Agent::Skye,
        Agent::KayO,
        Agent::Fade,
        Agent::Gekko,
    ];

    pub fn role(&self) -> Role {
        match self {
            Agent::Jett | Agent::Phoenix | Agent::Raze | Agent::Reyna | Agent::Yoru | Agent::Neon => {
                Role::Duelist
            }
            Agent::Omen | Agent::Brimstone | Agent::Viper | Agent::Astra | Agent::Harbor => {
                Role::Controller
            }
            Agent::Killjoy | Agent::Cypher | Agent::Sage | Agent::Chamber | Agent::Deadlock => {
                Role::Sentinel
            }
            Agent::Sova | Agent::Breach | Agent::Skye | Agent::KayO | Agent::Fade | Agent::Gekko => {
                Role::Initiator
            }
        }
    }

    pub fn for_role(role: Role) -> &'static [Agent] {
        match role {
            Role::Duelist => &[
                Agent::Jett,
                Agent::Phoenix,
                Agent::Raze,
                Agent::Reyna,
                Agent::Yoru,
                Agent::Neon,
            ],
            Role::Controller => {
                &[Agent::Omen, Agent::Brimstone, Agent::Viper, Agent::Astra, Agent::Harbor]
            }
            Role::Sentinel => {
                &[Agent::Killjoy, Agent::Cypher, Agent::Sage, Agent::Chamber, Agent::Deadlock]
            }
            Role::Initiator => &[
                Agent::Sova,
                Agent::Breach,
                Agent::Skye,
                Agent::KayO,
                Agent::Fade,
                Agent::Gekko,
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Agent::Jett => "Jett",
            Agent::Phoenix => "Phoenix",
            Agent::Raze => "Raze",
            Agent::Reyna => "Reyna",
            Agent::Yoru => "Yoru",
            Agent::Neon => "Neon",
            Agent::Omen => "Omen",
            Agent::Brimstone => "Brimstone",
            Agent::Viper => "Viper",
            Agent::Astra => "Astra",
            Agent::Harbor => "Harbor",
            Agent::Killjoy => "Killjoy",
            Agent::Cypher => "Cypher",
            Agent::Sage => "Sage",
            Agent::Chamber => "Chamber",
            Agent::Deadlock => "Deadlock",
            Agent::Sova => "Sova",
            Agent::Breach => "Breach",
            Agent::Skye => "Skye",
            Agent::KayO => "KAY/O",
            Agent::Fade => "Fade",
            Agent::Gekko => "Gekko",
        }
    }

    pub fn from_name(name: &str) -> Option<Agent> {
        Agent::ALL.iter().copied().find(|a| a.name() == name)
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Assigns one agent per player so that each of the four role classes is
/// covered where the roster allows it. Pre-seeded overrides are kept as-is
/// and count toward coverage and uniqueness.
pub fn select_team_agents(
    players: &[Player],
    overrides: &BTreeMap<String, Agent>,
) -> BTreeMap<String, Agent> {
    let mut assigned: BTreeMap<String, Agent> = BTreeMap::new();
    let mut taken: BTreeSet<Agent> = BTreeSet::new();
    let mut covered: BTreeSet<Role> = BTreeSet::new();

    for player in players {
        if let Some(agent) = overrides.get(&player.id) {
            assigned.insert(player.id.clone(), *agent);
            taken.insert(*agent);
            covered.insert(agent.role());
        }
    }

    // Highest primary-role proficiency picks first; id breaks ties so the
    // outcome is stable across runs.
    let mut order: Vec<&Player> =
        players.iter().filter(|p| !assigned.contains_key(&p.id)).collect();
    order.sort_by(|a, b| {
        let pa = a.role_proficiencies.get(&a.primary_role).copied().unwrap_or(0.0);
        let pb = b.role_proficiencies.get(&b.primary_role).copied().unwrap_or(0.0);
        pb.total_cmp(&pa).then_with(|| a.id.cmp(&b.id))
    });

    // First pass: fill unmet role classes from primary-role players.
    for &player in &order {
        if covered.contains(&player.primary_role) {
            continue;
        }
        let pick = ranked_agents(player, Some(player.primary_role))
            .into_iter()
            .find(|a| !taken.contains(a));
        if let Some(agent) = pick {
            assigned.insert(player.id.clone(), agent);
            taken.insert(agent);
            covered.insert(agent.role());
        }
    }

    // Second pass: everyone else takes their best remaining agent.
    for &player in &order {
        if assigned.contains_key(&player.id) {
            continue;
        }
        let agent = ranked_agents(player, None)
            .into_iter()
            .find(|a| !taken.contains(a))
            .unwrap_or(Agent::Jett);
        assigned.insert(player.id.clone(), agent);
        taken.insert(agent);
        covered.insert(agent.role());
    }

    assigned
}

/// Agents ranked by the player's recorded proficiency, optionally restricted
/// to one role class. A player with no proficiencies falls back to the full
/// roster in fixed order, which starts with Jett.
fn ranked_agents(player: &Player, role: Option<Role>) -> Vec<Agent> {
    let pool: Vec<Agent> = match role {
        Some(role) => Agent::for_role(role).to_vec(),
        None => Agent::ALL.to_vec(),
    };
    if player.agent_proficiencies.is_empty() {
        return pool;
    }
    let mut ranked: Vec<(Agent, f64)> = pool
        .into_iter()
        .map(|a| (a, player.agent_proficiencies.get(&a).copied().unwrap_or(0.0)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().map(|(a, _)| a).collect()
}
