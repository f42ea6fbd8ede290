use rand::Rng;

use crate::player::Player;
use crate::weapons::{EngagementRange, WeaponCatalog, WeaponId, WeaponType};

/// Resolves a 1v1 engagement. Returns true when the attacker takes it.
///
/// `attacker_modifier` carries the round-strategy nudge as a multiplier on
/// the attacker's rating (0.0 means no nudge). The resolver is stateless;
/// the caller owns the random source so seeded runs replay exactly.
#[allow(clippy::too_many_arguments)]
pub fn resolve_duel<R: Rng>(
    attacker: &Player,
    defender: &Player,
    attacker_weapon: WeaponId,
    defender_weapon: WeaponId,
    range: EngagementRange,
    attacker_armor: bool,
    defender_armor: bool,
    attacker_modifier: f64,
    catalog: &WeaponCatalog,
    rng: &mut R,
) -> bool {
    let att_weapon = catalog.lookup(attacker_weapon);
    let def_weapon = catalog.lookup(defender_weapon);

    let mut attacker_rating = attacker.core_stats.aim * 0.4 * att_weapon.accuracy
        + attacker.core_stats.movement * 0.3 * att_weapon.movement_accuracy
        + attacker.core_stats.game_sense * 0.3;
    let mut defender_rating = defender.core_stats.aim * 0.4 * def_weapon.accuracy
        + defender.core_stats.movement * 0.3 * def_weapon.movement_accuracy
        + defender.core_stats.game_sense * 0.3;

    attacker_rating *= att_weapon.range_multipliers.at(range);
    defender_rating *= def_weapon.range_multipliers.at(range);

    if att_weapon.weapon_type == WeaponType::Sniper && range == EngagementRange::Long {
        attacker_rating *= 1.5;
    }
    if def_weapon.weapon_type == WeaponType::Smg && range == EngagementRange::Close {
        defender_rating *= 1.2;
    }

    if defender_armor {
        attacker_rating *= 1.0 - (1.0 - att_weapon.armor_penetration) * 0.5;
    }
    if attacker_armor {
        defender_rating *= 1.0 - (1.0 - def_weapon.armor_penetration) * 0.5;
    }

    attacker_rating *= 1.0 + attacker_modifier;

    let attacker_roll = attacker_rating * rng.random_range(0.8..1.2);
    let defender_roll = defender_rating * rng.random_range(0.8..1.2);

    attacker_roll > defender_roll
}
