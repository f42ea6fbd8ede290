pub mod agents;
pub mod buy;
pub mod db;
pub mod duel;
pub mod economy;
pub mod engine;
pub mod generator;
pub mod maps;
pub mod models;
pub mod player;
pub mod round;
pub mod strategy;
pub mod weapons;

pub use agents::Agent;
pub use engine::{MatchConfig, MatchResult, MatchSimulator, SimError};
pub use generator::{GenerateOptions, PlayerGenerator};
pub use maps::{MapCatalog, MapLayout};
pub use player::{Player, Region, Role, ValidationError};
pub use weapons::{WeaponCatalog, WeaponId};
