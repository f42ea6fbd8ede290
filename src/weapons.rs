use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum WeaponId {
    Classic,
    Shorty,
    Frenzy,
    Ghost,
    Sheriff,
    Stinger,
    Spectre,
    Bucky,
    Judge,
    Bulldog,
    Guardian,
    Phantom,
    Vandal,
    Marshal,
    Operator,
    Outlaw,
    Ares,
    Odin,
}

impl WeaponId {
    pub const ALL: [WeaponId; 18] = [
        WeaponId::Classic,
        WeaponId::Shorty,
        WeaponId::Frenzy,
        WeaponId::Ghost,
        WeaponId::Sheriff,
        WeaponId::Stinger,
        WeaponId::Spectre,
        WeaponId::Bucky,
        WeaponId::Judge,
        WeaponId::Bulldog,
        WeaponId::Guardian,
        WeaponId::Phantom,
        WeaponId::Vandal,
        WeaponId::Marshal,
        WeaponId::Operator,
        WeaponId::Outlaw,
        WeaponId::Ares,
        WeaponId::Odin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponId::Classic => "Classic",
            WeaponId::Shorty => "Shorty",
            WeaponId::Frenzy => "Frenzy",
            WeaponId::Ghost => "Ghost",
            WeaponId::Sheriff => "Sheriff",
            WeaponId::Stinger => "Stinger",
            WeaponId::Spectre => "Spectre",
            WeaponId::Bucky => "Bucky",
            WeaponId::Judge => "Judge",
            WeaponId::Bulldog => "Bulldog",
            WeaponId::Guardian => "Guardian",
            WeaponId::Phantom => "Phantom",
            WeaponId::Vandal => "Vandal",
            WeaponId::Marshal => "Marshal",
            WeaponId::Operator => "Operator",
            WeaponId::Outlaw => "Outlaw",
            WeaponId::Ares => "Ares",
            WeaponId::Odin => "Odin",
        }
    }

    pub fn from_name(name: &str) -> Option<WeaponId> {
        WeaponId::ALL.iter().copied().find(|w| w.name() == name)
    }
}

impl std::fmt::Display for WeaponId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WeaponType {
    Sidearm,
    Smg,
    Rifle,
    Sniper,
    Shotgun,
    Heavy,
}

/// Engagement distance bands used by the duel resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EngagementRange {
    Close,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMultipliers {
    pub close: f64,
    pub medium: f64,
    pub long: f64,
}

impl RangeMultipliers {
    pub fn at(&self, range: EngagementRange) -> f64 {
        match range {
            EngagementRange::Close => self.close,
            EngagementRange::Medium => self.medium,
            EngagementRange::Long => self.long,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponStats {
    pub weapon_type: WeaponType,
    pub cost: u32,
    pub damage: f64,
    pub fire_rate: f64,
    pub magazine_size: u32,
    pub reload_time: f64,
    pub equip_time: f64,
    pub range_multipliers: RangeMultipliers,
    pub armor_penetration: f64,
    pub accuracy: f64,
    pub movement_accuracy: f64,
    pub wall_penetration: f64,
}

/// Immutable registry of weapon stats, built once at startup and shared by
/// reference afterwards.
pub struct WeaponCatalog {
    weapons: HashMap<WeaponId, WeaponStats>,
}

impl Default for WeaponCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl WeaponCatalog {
    pub fn new() -> Self {
        let mut weapons = HashMap::new();

        weapons.insert(
            WeaponId::Classic,
            WeaponStats {
                weapon_type: WeaponType::Sidearm,
                cost: 0,
                damage: 26.0,
                fire_rate: 6.75,
                magazine_size: 12,
                reload_time: 1.75,
                equip_time: 0.75,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 0.8, long: 0.6 },
                armor_penetration: 0.5,
                accuracy: 0.8,
                movement_accuracy: 0.6,
                wall_penetration: 0.2,
            },
        );
        weapons.insert(
            WeaponId::Shorty,
            WeaponStats {
                weapon_type: WeaponType::Shotgun,
                cost: 150,
                damage: 22.0,
                fire_rate: 3.3,
                magazine_size: 2,
                reload_time: 1.75,
                equip_time: 0.75,
                range_multipliers: RangeMultipliers { close: 1.3, medium: 0.5, long: 0.2 },
                armor_penetration: 0.3,
                accuracy: 0.7,
                movement_accuracy: 0.7,
                wall_penetration: 0.1,
            },
        );
        weapons.insert(
            WeaponId::Frenzy,
            WeaponStats {
                weapon_type: WeaponType::Sidearm,
                cost: 450,
                damage: 26.0,
                fire_rate: 10.0,
                magazine_size: 13,
                reload_time: 1.5,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.1, medium: 0.75, long: 0.5 },
                armor_penetration: 0.4,
                accuracy: 0.65,
                movement_accuracy: 0.7,
                wall_penetration: 0.2,
            },
        );
        weapons.insert(
            WeaponId::Ghost,
            WeaponStats {
                weapon_type: WeaponType::Sidearm,
                cost: 500,
                damage: 30.0,
                fire_rate: 6.75,
                magazine_size: 15,
                reload_time: 1.5,
                equip_time: 0.75,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 0.85, long: 0.7 },
                armor_penetration: 0.65,
                accuracy: 0.85,
                movement_accuracy: 0.6,
                wall_penetration: 0.4,
            },
        );
        weapons.insert(
            WeaponId::Sheriff,
            WeaponStats {
                weapon_type: WeaponType::Sidearm,
                cost: 800,
                damage: 55.0,
                fire_rate: 4.0,
                magazine_size: 6,
                reload_time: 2.25,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 0.9, long: 0.8 },
                armor_penetration: 0.75,
                accuracy: 0.85,
                movement_accuracy: 0.5,
                wall_penetration: 0.5,
            },
        );
        weapons.insert(
            WeaponId::Stinger,
            WeaponStats {
                weapon_type: WeaponType::Smg,
                cost: 950,
                damage: 27.0,
                fire_rate: 16.0,
                magazine_size: 20,
                reload_time: 2.25,
                equip_time: 0.75,
                range_multipliers: RangeMultipliers { close: 1.15, medium: 0.7, long: 0.5 },
                armor_penetration: 0.5,
                accuracy: 0.65,
                movement_accuracy: 0.8,
                wall_penetration: 0.3,
            },
        );
        weapons.insert(
            WeaponId::Spectre,
            WeaponStats {
                weapon_type: WeaponType::Smg,
                cost: 1600,
                damage: 26.0,
                fire_rate: 13.33,
                magazine_size: 30,
                reload_time: 2.25,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.2, medium: 0.8, long: 0.6 },
                armor_penetration: 0.6,
                accuracy: 0.75,
                movement_accuracy: 0.75,
                wall_penetration: 0.4,
            },
        );
        weapons.insert(
            WeaponId::Bucky,
            WeaponStats {
                weapon_type: WeaponType::Shotgun,
                cost: 850,
                damage: 40.0,
                fire_rate: 1.1,
                magazine_size: 5,
                reload_time: 2.5,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.3, medium: 0.6, long: 0.3 },
                armor_penetration: 0.4,
                accuracy: 0.7,
                movement_accuracy: 0.65,
                wall_penetration: 0.2,
            },
        );
        weapons.insert(
            WeaponId::Judge,
            WeaponStats {
                weapon_type: WeaponType::Shotgun,
                cost: 1850,
                damage: 34.0,
                fire_rate: 3.5,
                magazine_size: 7,
                reload_time: 2.2,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.25, medium: 0.6, long: 0.3 },
                armor_penetration: 0.5,
                accuracy: 0.7,
                movement_accuracy: 0.75,
                wall_penetration: 0.2,
            },
        );
        weapons.insert(
            WeaponId::Bulldog,
            WeaponStats {
                weapon_type: WeaponType::Rifle,
                cost: 2050,
                damage: 35.0,
                fire_rate: 10.0,
                magazine_size: 24,
                reload_time: 2.5,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 0.9, long: 0.75 },
                armor_penetration: 0.7,
                accuracy: 0.8,
                movement_accuracy: 0.5,
                wall_penetration: 0.6,
            },
        );
        weapons.insert(
            WeaponId::Guardian,
            WeaponStats {
                weapon_type: WeaponType::Rifle,
                cost: 2250,
                damage: 65.0,
                fire_rate: 5.25,
                magazine_size: 12,
                reload_time: 2.5,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 1.0, long: 0.9 },
                armor_penetration: 0.85,
                accuracy: 0.9,
                movement_accuracy: 0.4,
                wall_penetration: 0.7,
            },
        );
        weapons.insert(
            WeaponId::Phantom,
            WeaponStats {
                weapon_type: WeaponType::Rifle,
                cost: 2900,
                damage: 39.0,
                fire_rate: 11.0,
                magazine_size: 30,
                reload_time: 2.5,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 0.9, long: 0.8 },
                armor_penetration: 0.8,
                accuracy: 0.95,
                movement_accuracy: 0.45,
                wall_penetration: 0.7,
            },
        );
        weapons.insert(
            WeaponId::Vandal,
            WeaponStats {
                weapon_type: WeaponType::Rifle,
                cost: 2900,
                damage: 40.0,
                fire_rate: 9.75,
                magazine_size: 25,
                reload_time: 2.5,
                equip_time: 1.0,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 1.0, long: 1.0 },
                armor_penetration: 0.8,
                accuracy: 0.9,
                movement_accuracy: 0.4,
                wall_penetration: 0.8,
            },
        );
        weapons.insert(
            WeaponId::Marshal,
            WeaponStats {
                weapon_type: WeaponType::Sniper,
                cost: 950,
                damage: 101.0,
                fire_rate: 1.5,
                magazine_size: 5,
                reload_time: 2.5,
                equip_time: 1.25,
                range_multipliers: RangeMultipliers { close: 0.8, medium: 1.0, long: 1.1 },
                armor_penetration: 0.85,
                accuracy: 0.9,
                movement_accuracy: 0.2,
                wall_penetration: 0.8,
            },
        );
        weapons.insert(
            WeaponId::Operator,
            WeaponStats {
                weapon_type: WeaponType::Sniper,
                cost: 4700,
                damage: 150.0,
                fire_rate: 0.75,
                magazine_size: 5,
                reload_time: 3.7,
                equip_time: 1.5,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 1.0, long: 1.0 },
                armor_penetration: 1.0,
                accuracy: 1.0,
                movement_accuracy: 0.1,
                wall_penetration: 0.9,
            },
        );
        weapons.insert(
            WeaponId::Outlaw,
            WeaponStats {
                weapon_type: WeaponType::Sniper,
                cost: 2400,
                damage: 140.0,
                fire_rate: 2.75,
                magazine_size: 2,
                reload_time: 2.3,
                equip_time: 1.25,
                range_multipliers: RangeMultipliers { close: 0.9, medium: 1.0, long: 1.05 },
                armor_penetration: 0.9,
                accuracy: 0.95,
                movement_accuracy: 0.15,
                wall_penetration: 0.8,
            },
        );
        weapons.insert(
            WeaponId::Ares,
            WeaponStats {
                weapon_type: WeaponType::Heavy,
                cost: 1600,
                damage: 30.0,
                fire_rate: 13.0,
                magazine_size: 50,
                reload_time: 3.25,
                equip_time: 1.25,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 0.85, long: 0.7 },
                armor_penetration: 0.7,
                accuracy: 0.7,
                movement_accuracy: 0.6,
                wall_penetration: 0.75,
            },
        );
        weapons.insert(
            WeaponId::Odin,
            WeaponStats {
                weapon_type: WeaponType::Heavy,
                cost: 3200,
                damage: 38.0,
                fire_rate: 15.6,
                magazine_size: 100,
                reload_time: 5.0,
                equip_time: 1.25,
                range_multipliers: RangeMultipliers { close: 1.0, medium: 0.9, long: 0.8 },
                armor_penetration: 0.75,
                accuracy: 0.75,
                movement_accuracy: 0.55,
                wall_penetration: 0.8,
            },
        );

        WeaponCatalog { weapons }
    }

    /// Every id in `WeaponId` has an entry; a miss here is a bug in `new`.
    pub fn lookup(&self, id: WeaponId) -> &WeaponStats {
        &self.weapons[&id]
    }

    pub fn cost(&self, id: WeaponId) -> u32 {
        self.lookup(id).cost
    }
}
