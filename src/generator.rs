use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::agents::Agent;
use crate::player::{
    CareerStats, CoreStats, FieldError, Player, Region, Role, ValidationError, MAX_PLAYER_AGE,
    MIN_PLAYER_AGE,
};

pub const BASE_SALARY: f64 = 50_000.0;

const FIRST_NAMES: [&str; 24] = [
    "Tyson", "Marco", "Jae", "Victor", "Elias", "Noah", "Lucas", "Mateo", "Kai", "Theo", "Dmitri",
    "Oscar", "Felix", "Jonas", "Rafael", "Emil", "Andre", "Milan", "Sam", "Leo", "Bruno", "Ivan",
    "Hugo", "Aaron",
];

const LAST_NAMES: [&str; 24] = [
    "Reeves", "Silva", "Kim", "Novak", "Berg", "Tanaka", "Costa", "Moreau", "Weber", "Larsen",
    "Petrov", "Diaz", "Nguyen", "Kowalski", "Santos", "Fischer", "Olsen", "Park", "Romero",
    "Keller", "Souza", "Lindqvist", "Vargas", "Cole",
];

const TAG_PREFIXES: [&str; 16] = [
    "neon", "frost", "viper", "ace", "zero", "wick", "dash", "haze", "rush", "echo", "sly", "volt",
    "grim", "nova", "spark", "drift",
];

const TAG_SUFFIXES: [&str; 12] =
    ["x", "zy", "er", "os", "ik", "eon", "ix", "ah", "on", "io", "ez", "ys"];

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GenerateOptions {
    pub region: Option<Region>,
    pub role: Option<Role>,
    pub min_rating: Option<u32>,
    pub max_rating: Option<u32>,
    pub max_age: Option<u32>,
}

impl GenerateOptions {
    fn rating_bounds(&self) -> (u32, u32) {
        (self.min_rating.unwrap_or(60), self.max_rating.unwrap_or(95))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        let (min, max) = self.rating_bounds();
        if min > 100 {
            errors.push(FieldError::new("min_rating", "rating must be between 0 and 100"));
        }
        if max > 100 {
            errors.push(FieldError::new("max_rating", "rating must be between 0 and 100"));
        }
        if min > max {
            errors.push(FieldError::new(
                "min_rating",
                "minimum rating cannot be greater than maximum rating",
            ));
        }
        if let Some(age) = self.max_age {
            if !(MIN_PLAYER_AGE..=MAX_PLAYER_AGE).contains(&age) {
                errors.push(FieldError::new(
                    "max_age",
                    format!("max_age must be between {MIN_PLAYER_AGE} and {MAX_PLAYER_AGE}"),
                ));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

/// Creates player records with role-biased stats, proficiencies and career
/// history. Stateless apart from its own RNG; seed it for reproducible
/// rosters.
pub struct PlayerGenerator {
    rng: StdRng,
}

impl Default for PlayerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerGenerator {
    pub fn new() -> Self {
        PlayerGenerator { rng: StdRng::from_os_rng() }
    }

    pub fn with_seed(seed: u64) -> Self {
        PlayerGenerator { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn generate_player(&mut self, options: &GenerateOptions) -> Result<Player, ValidationError> {
        options.validate()?;
        let (min_rating, max_rating) = options.rating_bounds();

        let region = options
            .region
            .unwrap_or_else(|| *Region::ALL.choose(&mut self.rng).unwrap_or(&Region::NA));
        let nationality =
            region.countries().choose(&mut self.rng).copied().unwrap_or("USA").to_string();
        let primary_role = options
            .role
            .unwrap_or_else(|| *Role::ALL.choose(&mut self.rng).unwrap_or(&Role::Duelist));
        let age = self.rng.random_range(MIN_PLAYER_AGE..=options.max_age.unwrap_or(30));

        let core_stats = self.roll_core_stats(primary_role, min_rating, max_rating);
        let role_proficiencies = self.roll_role_proficiencies(primary_role);
        let agent_proficiencies = self.roll_agent_proficiencies(primary_role);
        let salary = salary_for(&core_stats, age);
        let career_stats = self.roll_career_stats(primary_role, &core_stats);

        let first_name = FIRST_NAMES.choose(&mut self.rng).unwrap_or(&"Sam").to_string();
        let last_name = LAST_NAMES.choose(&mut self.rng).unwrap_or(&"Cole").to_string();
        let gamer_tag = format!(
            "{}{}",
            TAG_PREFIXES.choose(&mut self.rng).unwrap_or(&"ace"),
            TAG_SUFFIXES.choose(&mut self.rng).unwrap_or(&"x"),
        );

        let player = Player {
            // Ids come from the generator's own RNG so a seeded generator
            // reproduces whole records, not just stats.
            id: uuid::Uuid::from_u128(self.rng.random()).to_string(),
            first_name,
            last_name,
            gamer_tag,
            age,
            nationality,
            region,
            primary_role,
            salary,
            core_stats,
            role_proficiencies,
            agent_proficiencies,
            career_stats,
        };
        crate::player::validate_player(&player)?;
        Ok(player)
    }

    /// A roster fills the four core roles first, then adds flex players with
    /// no role constraint until the requested size is reached.
    pub fn generate_roster(
        &mut self,
        options: &GenerateOptions,
        roster_size: usize,
    ) -> Result<Vec<Player>, ValidationError> {
        if !(1..=10).contains(&roster_size) {
            return Err(ValidationError::new(vec![FieldError::new(
                "roster_size",
                "roster size must be between 1 and 10",
            )]));
        }
        options.validate()?;

        let mut core_roles = Role::ALL.to_vec();
        core_roles.shuffle(&mut self.rng);

        let mut roster = Vec::with_capacity(roster_size);
        for role in core_roles.into_iter().take(roster_size) {
            let mut slot = options.clone();
            slot.role = Some(role);
            roster.push(self.generate_player(&slot)?);
        }
        while roster.len() < roster_size {
            let mut slot = options.clone();
            slot.role = None;
            roster.push(self.generate_player(&slot)?);
        }
        Ok(roster)
    }

    fn roll_core_stats(&mut self, role: Role, min_rating: u32, max_rating: u32) -> CoreStats {
        let mut stats = CoreStats {
            aim: self.rng.random_range(min_rating..=max_rating) as f64,
            game_sense: self.rng.random_range(min_rating..=max_rating) as f64,
            movement: self.rng.random_range(min_rating..=max_rating) as f64,
            utility_usage: self.rng.random_range(min_rating..=max_rating) as f64,
            communication: self.rng.random_range(min_rating..=max_rating) as f64,
            clutch: self.rng.random_range(min_rating..=max_rating) as f64,
        };
        let bias = |v: &mut f64| *v = (*v * 1.10).min(100.0);
        match role {
            Role::Duelist => {
                bias(&mut stats.aim);
                bias(&mut stats.movement);
            }
            Role::Controller => {
                bias(&mut stats.utility_usage);
                bias(&mut stats.game_sense);
            }
            Role::Sentinel => {
                bias(&mut stats.game_sense);
                bias(&mut stats.clutch);
            }
            Role::Initiator => {
                bias(&mut stats.utility_usage);
                bias(&mut stats.communication);
            }
        }
        stats
    }

    fn roll_role_proficiencies(&mut self, primary: Role) -> BTreeMap<Role, f64> {
        let mut proficiencies = BTreeMap::new();
        for role in Role::ALL {
            let value = if role == primary {
                self.rng.random_range(80..=100)
            } else {
                self.rng.random_range(50..=85)
            };
            proficiencies.insert(role, value as f64);
        }
        proficiencies
    }

    fn roll_agent_proficiencies(&mut self, primary: Role) -> BTreeMap<Agent, f64> {
        let mut proficiencies = BTreeMap::new();
        for agent in Agent::ALL {
            let value = if agent.role() == primary {
                self.rng.random_range(80..=100)
            } else {
                self.rng.random_range(50..=85)
            };
            proficiencies.insert(agent, value as f64);
        }
        proficiencies
    }

    fn roll_career_stats(&mut self, role: Role, core: &CoreStats) -> CareerStats {
        let matches_played = self.rng.random_range(50..=500);
        let rounds_per_match = self.rng.random_range(16..=24);
        let rounds_played = matches_played * rounds_per_match;

        let kpr = self.rng.random_range(0.55..0.90);
        let dpr = self.rng.random_range(0.55..0.80);
        let apr = self.rng.random_range(0.20..0.45);

        let kills = (rounds_played as f64 * kpr).round() as u32;
        let deaths = ((rounds_played as f64 * dpr).round() as u32).max(1);
        let assists = (rounds_played as f64 * apr).round() as u32;

        let first_blood_rate = match role {
            Role::Duelist => self.rng.random_range(0.12f64..0.20),
            _ => self.rng.random_range(0.05f64..0.12),
        }
        .clamp(0.0, 1.0);
        let clutch_rate =
            (self.rng.random_range(0.04..0.08) * (core.clutch / 75.0)).clamp(0.0, 1.0);

        CareerStats {
            matches_played,
            rounds_played,
            kills,
            deaths,
            assists,
            first_bloods: (kills as f64 * first_blood_rate).round() as u32,
            clutches: (rounds_played as f64 * clutch_rate).round() as u32,
            kd_ratio: kills as f64 / deaths as f64,
            first_blood_rate,
            clutch_rate,
        }
    }
}

/// Base salary scaled by mean core rating, adjusted for the player's age
/// bracket: prime years pay a premium, teenagers and veterans discount.
pub fn salary_for(core: &CoreStats, age: u32) -> u32 {
    let age_factor = if (23..=27).contains(&age) {
        1.2
    } else if age < 20 {
        0.8
    } else if age > 30 {
        0.7
    } else {
        1.0
    };
    (BASE_SALARY * (core.mean() / 100.0) * age_factor).round() as u32
}
