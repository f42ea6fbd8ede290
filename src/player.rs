use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agents::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Region {
    NA,
    EU,
    APAC,
    BR,
    LATAM,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::NA, Region::EU, Region::APAC, Region::BR, Region::LATAM];

    pub fn countries(&self) -> &'static [&'static str] {
        match self {
            Region::NA => &["USA", "Canada", "Mexico"],
            Region::EU => &["France", "Germany", "UK", "Spain", "Sweden", "Denmark", "Poland", "Turkey"],
            Region::APAC => &["South Korea", "Japan", "Thailand", "Indonesia", "Philippines", "Singapore", "Malaysia"],
            Region::BR => &["Brazil"],
            Region::LATAM => &["Argentina", "Chile", "Colombia"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::NA => "NA",
            Region::EU => "EU",
            Region::APAC => "APAC",
            Region::BR => "BR",
            Region::LATAM => "LATAM",
        }
    }

    pub fn from_name(name: &str) -> Option<Region> {
        Region::ALL.iter().copied().find(|r| r.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Duelist,
    Controller,
    Sentinel,
    Initiator,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Duelist, Role::Controller, Role::Sentinel, Role::Initiator];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Duelist => "Duelist",
            Role::Controller => "Controller",
            Role::Sentinel => "Sentinel",
            Role::Initiator => "Initiator",
        }
    }

    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.name() == name)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoreStats {
    pub aim: f64,
    pub game_sense: f64,
    pub movement: f64,
    pub utility_usage: f64,
    pub communication: f64,
    pub clutch: f64,
}

impl CoreStats {
    pub fn mean(&self) -> f64 {
        (self.aim + self.game_sense + self.movement + self.utility_usage + self.communication + self.clutch) / 6.0
    }

    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("aim", self.aim),
            ("game_sense", self.game_sense),
            ("movement", self.movement),
            ("utility_usage", self.utility_usage),
            ("communication", self.communication),
            ("clutch", self.clutch),
        ]
    }
}

/// Career totals carried into a match. Only the three rate fields feed the
/// MVP pick; the counters exist for reporting. Records loaded from older
/// persistence rows may miss fields, so everything defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CareerStats {
    pub matches_played: u32,
    pub rounds_played: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub first_bloods: u32,
    pub clutches: u32,
    pub kd_ratio: f64,
    pub first_blood_rate: f64,
    pub clutch_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub gamer_tag: String,
    pub age: u32,
    pub nationality: String,
    pub region: Region,
    pub primary_role: Role,
    pub salary: u32,
    pub core_stats: CoreStats,
    #[schema(value_type = Object)]
    pub role_proficiencies: BTreeMap<Role, f64>,
    #[schema(value_type = Object)]
    pub agent_proficiencies: BTreeMap<Agent, f64>,
    #[serde(default)]
    pub career_stats: CareerStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError { field: field.into(), message: message.into() }
    }
}

/// Aggregated validation failure: every offending field is listed, so one
/// response round-trip is enough to fix a bad payload.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        ValidationError { errors }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: ")?;
        let rendered: Vec<String> =
            self.errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        f.write_str(&rendered.join("; "))
    }
}

impl std::error::Error for ValidationError {}

pub const MIN_PLAYER_AGE: u32 = 16;
pub const MAX_PLAYER_AGE: u32 = 35;

/// Collects every problem with a player record instead of stopping at the
/// first one.
pub fn collect_player_errors(player: &Player, prefix: &str, errors: &mut Vec<FieldError>) {
    if player.id.is_empty() {
        errors.push(FieldError::new(format!("{prefix}.id"), "id must not be empty"));
    }
    if player.age < MIN_PLAYER_AGE || player.age > MAX_PLAYER_AGE {
        errors.push(FieldError::new(
            format!("{prefix}.age"),
            format!("age must be between {MIN_PLAYER_AGE} and {MAX_PLAYER_AGE}"),
        ));
    }
    for (name, value) in player.core_stats.fields() {
        if !(0.0..=100.0).contains(&value) {
            errors.push(FieldError::new(
                format!("{prefix}.core_stats.{name}"),
                "stat must be between 0 and 100",
            ));
        }
    }
    for role in Role::ALL {
        match player.role_proficiencies.get(&role) {
            None => errors.push(FieldError::new(
                format!("{prefix}.role_proficiencies.{role}"),
                "missing proficiency",
            )),
            Some(value) if !(0.0..=100.0).contains(value) => errors.push(FieldError::new(
                format!("{prefix}.role_proficiencies.{role}"),
                "proficiency must be between 0 and 100",
            )),
            _ => {}
        }
    }
    for agent in Agent::ALL {
        match player.agent_proficiencies.get(&agent) {
            None => errors.push(FieldError::new(
                format!("{prefix}.agent_proficiencies.{agent}"),
                "missing proficiency",
            )),
            Some(value) if !(0.0..=100.0).contains(value) => errors.push(FieldError::new(
                format!("{prefix}.agent_proficiencies.{agent}"),
                "proficiency must be between 0 and 100",
            )),
            _ => {}
        }
    }
    let career = &player.career_stats;
    if career.kd_ratio < 0.0 {
        errors.push(FieldError::new(
            format!("{prefix}.career_stats.kd_ratio"),
            "ratio cannot be negative",
        ));
    }
    for (name, value) in
        [("first_blood_rate", career.first_blood_rate), ("clutch_rate", career.clutch_rate)]
    {
        if !(0.0..=1.0).contains(&value) {
            errors.push(FieldError::new(
                format!("{prefix}.career_stats.{name}"),
                "rate must be between 0 and 1",
            ));
        }
    }
}

pub fn validate_player(player: &Player) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    collect_player_errors(player, "player", &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(errors))
    }
}

/// Validates a five-player roster under the given label ("team_a"/"team_b").
pub fn collect_roster_errors(players: &[Player], label: &str, errors: &mut Vec<FieldError>) {
    if players.len() != 5 {
        errors.push(FieldError::new(
            label.to_string(),
            format!("a team needs exactly 5 players, got {}", players.len()),
        ));
    }
    for (i, player) in players.iter().enumerate() {
        collect_player_errors(player, &format!("{label}[{i}]"), errors);
    }
}
