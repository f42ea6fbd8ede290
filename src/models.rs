use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agents::Agent;
use crate::engine::{MatchConfig, MatchResult};
use crate::generator::GenerateOptions;
use crate::player::{FieldError, Region, Role, ValidationError};

pub const DEFAULT_MAP: &str = "Ascent";

/// Request body for POST /matches/simulate. Teams are referenced by id or
/// name and resolved against persistence.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SimulateMatchRequest {
    pub team_a: String,
    pub team_b: String,
    pub map_name: Option<String>,
    pub seed: Option<u64>,
    pub agent_overrides: Option<BTreeMap<String, String>>,
}

impl SimulateMatchRequest {
    pub fn to_config(&self) -> Result<MatchConfig, ValidationError> {
        let mut errors = Vec::new();
        let mut agent_overrides = BTreeMap::new();
        if let Some(overrides) = &self.agent_overrides {
            for (player_id, agent_name) in overrides {
                match Agent::from_name(agent_name) {
                    Some(agent) => {
                        agent_overrides.insert(player_id.clone(), agent);
                    }
                    None => errors.push(FieldError::new(
                        format!("agent_overrides.{player_id}"),
                        format!("unknown agent '{agent_name}'"),
                    )),
                }
            }
        }
        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }
        Ok(MatchConfig {
            map_name: self.map_name.clone().unwrap_or_else(|| DEFAULT_MAP.to_string()),
            seed: self.seed,
            agent_overrides,
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SimulateMatchResponse {
    pub match_id: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Request body for the generator endpoints. Region and role arrive as
/// strings so a typo surfaces as a field error rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GeneratePlayerRequest {
    pub region: Option<String>,
    pub role: Option<String>,
    pub min_rating: Option<u32>,
    pub max_rating: Option<u32>,
    pub max_age: Option<u32>,
}

impl GeneratePlayerRequest {
    pub fn to_options(&self) -> Result<GenerateOptions, ValidationError> {
        let mut errors = Vec::new();
        let region = match &self.region {
            Some(name) => match Region::from_name(name) {
                Some(region) => Some(region),
                None => {
                    errors.push(FieldError::new("region", format!("unknown region '{name}'")));
                    None
                }
            },
            None => None,
        };
        let role = match &self.role {
            Some(name) => match Role::from_name(name) {
                Some(role) => Some(role),
                None => {
                    errors.push(FieldError::new("role", format!("unknown role '{name}'")));
                    None
                }
            },
            None => None,
        };
        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }
        let options = GenerateOptions {
            region,
            role,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            max_age: self.max_age,
        };
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GenerateRosterRequest {
    #[serde(flatten)]
    pub player: GeneratePlayerRequest,
    pub roster_size: Option<usize>,
}

/// Structured error payload for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    pub fields: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody { message: message.into(), fields: Vec::new() }
    }

    pub fn from_validation(error: &ValidationError) -> Self {
        ErrorBody { message: "validation failed".to_string(), fields: error.errors.clone() }
    }
}
