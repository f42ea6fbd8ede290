use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MapArea {
    AttackerSpawn,
    DefenderSpawn,
    ASite,
    BSite,
    CSite,
    Mid,
    Connector,
    Flank,
}

impl MapArea {
    /// Objective areas attackers push toward during a round.
    pub fn is_push_target(&self) -> bool {
        matches!(
            self,
            MapArea::ASite | MapArea::BSite | MapArea::CSite | MapArea::Mid | MapArea::Connector
        )
    }
}

/// A named region of a map with a centroid and size on the unit square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapCallout {
    pub name: String,
    pub area_type: MapArea,
    #[schema(value_type = Vec<f64>)]
    pub position: (f64, f64),
    #[schema(value_type = Vec<f64>)]
    pub size: (f64, f64),
}

impl MapCallout {
    pub fn new(name: &str, area_type: MapArea, position: (f64, f64), size: (f64, f64)) -> Self {
        MapCallout { name: name.to_string(), area_type, position, size }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapLayout {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub callouts: BTreeMap<String, MapCallout>,
    pub sites: Vec<String>,
    #[schema(value_type = Vec<f64>)]
    pub attacker_spawn: (f64, f64),
    #[schema(value_type = Vec<f64>)]
    pub defender_spawn: (f64, f64),
}

impl MapLayout {
    /// Synthetic two-site layout substituted when a requested map is unknown.
    pub fn fallback(name: &str) -> Self {
        let mut callouts = BTreeMap::new();
        callouts.insert(
            "attacker_spawn".to_string(),
            MapCallout::new("Attacker Spawn", MapArea::AttackerSpawn, (0.5, 0.9), (0.2, 0.1)),
        );
        callouts.insert(
            "defender_spawn".to_string(),
            MapCallout::new("Defender Spawn", MapArea::DefenderSpawn, (0.5, 0.1), (0.2, 0.1)),
        );
        callouts.insert(
            "a_site".to_string(),
            MapCallout::new("A Site", MapArea::ASite, (0.25, 0.25), (0.15, 0.15)),
        );
        callouts.insert(
            "b_site".to_string(),
            MapCallout::new("B Site", MapArea::BSite, (0.75, 0.25), (0.15, 0.15)),
        );

        MapLayout {
            id: name.to_lowercase().replace(' ', "_"),
            name: name.to_string(),
            image_url: "/static/maps/default.jpg".to_string(),
            width: 1024,
            height: 1024,
            callouts,
            sites: vec!["A".to_string(), "B".to_string()],
            attacker_spawn: (0.5, 0.9),
            defender_spawn: (0.5, 0.1),
        }
    }

    pub fn spawn_for(&self, attacking: bool) -> (f64, f64) {
        if attacking {
            self.attacker_spawn
        } else {
            self.defender_spawn
        }
    }

    /// Callout whose area type marks the given site letter, if authored.
    pub fn site_callout(&self, site: &str) -> Option<&MapCallout> {
        let wanted = match site {
            "A" => MapArea::ASite,
            "B" => MapArea::BSite,
            "C" => MapArea::CSite,
            _ => return None,
        };
        self.callouts.values().find(|c| c.area_type == wanted)
    }

    pub fn push_targets(&self) -> Vec<&MapCallout> {
        self.callouts.values().filter(|c| c.area_type.is_push_target()).collect()
    }
}

/// Registry of map layouts. Built at startup, shared read-only with the
/// simulators; `add` overwrites by id.
pub struct MapCatalog {
    maps: BTreeMap<String, MapLayout>,
}

impl Default for MapCatalog {
    fn default() -> Self {
        Self::with_standard_maps()
    }
}

impl MapCatalog {
    pub fn empty() -> Self {
        MapCatalog { maps: BTreeMap::new() }
    }

    pub fn with_standard_maps() -> Self {
        let mut catalog = MapCatalog::empty();
        catalog.add(ascent());
        catalog.add(bind());
        catalog.add(haven());
        catalog
    }

    pub fn add(&mut self, layout: MapLayout) {
        self.maps.insert(layout.id.clone(), layout);
    }

    pub fn lookup(&self, name: &str) -> Option<&MapLayout> {
        let id = name.to_lowercase().replace(' ', "_");
        self.maps.get(&id)
    }

    pub fn all_names(&self) -> Vec<String> {
        self.maps.values().map(|m| m.name.clone()).collect()
    }

    pub fn layouts(&self) -> impl Iterator<Item = &MapLayout> {
        self.maps.values()
    }
}

fn ascent() -> MapLayout {
    let mut callouts = BTreeMap::new();
    callouts.insert(
        "attacker_spawn".to_string(),
        MapCallout::new("Attacker Side Spawn", MapArea::AttackerSpawn, (0.5, 0.93), (0.25, 0.1)),
    );
    callouts.insert(
        "defender_spawn".to_string(),
        MapCallout::new("Defender Side Spawn", MapArea::DefenderSpawn, (0.5, 0.06), (0.25, 0.1)),
    );
    callouts.insert(
        "a_site".to_string(),
        MapCallout::new("A Site", MapArea::ASite, (0.2, 0.22), (0.16, 0.14)),
    );
    callouts.insert(
        "b_site".to_string(),
        MapCallout::new("B Site", MapArea::BSite, (0.79, 0.24), (0.16, 0.14)),
    );
    callouts.insert(
        "mid_courtyard".to_string(),
        MapCallout::new("Mid Courtyard", MapArea::Mid, (0.5, 0.5), (0.18, 0.2)),
    );
    callouts.insert(
        "mid_link".to_string(),
        MapCallout::new("Mid Link", MapArea::Connector, (0.35, 0.42), (0.1, 0.08)),
    );
    callouts.insert(
        "market".to_string(),
        MapCallout::new("Market", MapArea::Connector, (0.65, 0.4), (0.1, 0.08)),
    );
    callouts.insert(
        "a_main".to_string(),
        MapCallout::new("A Main", MapArea::Flank, (0.22, 0.55), (0.1, 0.12)),
    );
    callouts.insert(
        "b_main".to_string(),
        MapCallout::new("B Main", MapArea::Flank, (0.8, 0.55), (0.1, 0.12)),
    );

    MapLayout {
        id: "ascent".to_string(),
        name: "Ascent".to_string(),
        image_url: "/static/maps/ascent.jpg".to_string(),
        width: 1024,
        height: 1024,
        callouts,
        sites: vec!["A".to_string(), "B".to_string()],
        attacker_spawn: (0.5, 0.93),
        defender_spawn: (0.5, 0.06),
    }
}

fn bind() -> MapLayout {
    let mut callouts = BTreeMap::new();
    callouts.insert(
        "attacker_spawn".to_string(),
        MapCallout::new("Attacker Side Spawn", MapArea::AttackerSpawn, (0.5, 0.92), (0.3, 0.1)),
    );
    callouts.insert(
        "defender_spawn".to_string(),
        MapCallout::new("Defender Side Spawn", MapArea::DefenderSpawn, (0.5, 0.08), (0.3, 0.1)),
    );
    callouts.insert(
        "a_site".to_string(),
        MapCallout::new("A Site", MapArea::ASite, (0.24, 0.28), (0.16, 0.15)),
    );
    callouts.insert(
        "b_site".to_string(),
        MapCallout::new("B Site", MapArea::BSite, (0.76, 0.26), (0.16, 0.15)),
    );
    callouts.insert(
        "a_short".to_string(),
        MapCallout::new("A Short", MapArea::Connector, (0.33, 0.5), (0.09, 0.12)),
    );
    callouts.insert(
        "b_long".to_string(),
        MapCallout::new("B Long", MapArea::Connector, (0.72, 0.55), (0.1, 0.14)),
    );
    callouts.insert(
        "hookah".to_string(),
        MapCallout::new("Hookah", MapArea::Connector, (0.62, 0.38), (0.08, 0.08)),
    );
    callouts.insert(
        "showers".to_string(),
        MapCallout::new("Showers", MapArea::Flank, (0.18, 0.5), (0.08, 0.1)),
    );

    // Bind has no mid; the teleporter corridors play that role.
    MapLayout {
        id: "bind".to_string(),
        name: "Bind".to_string(),
        image_url: "/static/maps/bind.jpg".to_string(),
        width: 1024,
        height: 1024,
        callouts,
        sites: vec!["A".to_string(), "B".to_string()],
        attacker_spawn: (0.5, 0.92),
        defender_spawn: (0.5, 0.08),
    }
}

fn haven() -> MapLayout {
    let mut callouts = BTreeMap::new();
    callouts.insert(
        "attacker_spawn".to_string(),
        MapCallout::new("Attacker Side Spawn", MapArea::AttackerSpawn, (0.5, 0.94), (0.3, 0.08)),
    );
    callouts.insert(
        "defender_spawn".to_string(),
        MapCallout::new("Defender Side Spawn", MapArea::DefenderSpawn, (0.5, 0.05), (0.3, 0.08)),
    );
    callouts.insert(
        "a_site".to_string(),
        MapCallout::new("A Site", MapArea::ASite, (0.17, 0.2), (0.14, 0.13)),
    );
    callouts.insert(
        "b_site".to_string(),
        MapCallout::new("B Site", MapArea::BSite, (0.5, 0.24), (0.12, 0.12)),
    );
    callouts.insert(
        "c_site".to_string(),
        MapCallout::new("C Site", MapArea::CSite, (0.84, 0.22), (0.14, 0.13)),
    );
    callouts.insert(
        "mid_window".to_string(),
        MapCallout::new("Mid Window", MapArea::Mid, (0.45, 0.48), (0.1, 0.1)),
    );
    callouts.insert(
        "garage".to_string(),
        MapCallout::new("Garage", MapArea::Connector, (0.68, 0.45), (0.1, 0.1)),
    );
    callouts.insert(
        "a_long".to_string(),
        MapCallout::new("A Long", MapArea::Flank, (0.2, 0.55), (0.08, 0.14)),
    );
    callouts.insert(
        "c_long".to_string(),
        MapCallout::new("C Long", MapArea::Flank, (0.85, 0.55), (0.08, 0.14)),
    );

    MapLayout {
        id: "haven".to_string(),
        name: "Haven".to_string(),
        image_url: "/static/maps/haven.jpg".to_string(),
        width: 1024,
        height: 1024,
        callouts,
        sites: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        attacker_spawn: (0.5, 0.94),
        defender_spawn: (0.5, 0.05),
    }
}
