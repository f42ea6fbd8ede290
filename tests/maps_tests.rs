use valsim_backend::maps::{MapArea, MapCatalog, MapLayout};

#[test]
fn test_standard_catalog_contents() {
    let catalog = MapCatalog::with_standard_maps();
    let names = catalog.all_names();
    assert_eq!(names, vec!["Ascent", "Bind", "Haven"]);

    assert!(catalog.lookup("Ascent").is_some());
    assert!(catalog.lookup("ascent").is_some(), "lookup is case-insensitive");
    assert!(catalog.lookup("Pearl").is_none());
}

#[test]
fn test_haven_has_three_sites() {
    let catalog = MapCatalog::with_standard_maps();
    let haven = catalog.lookup("Haven").expect("Haven missing");
    assert_eq!(haven.sites, vec!["A", "B", "C"]);
    assert!(haven.site_callout("C").is_some());
}

#[test]
fn test_add_overwrites_by_id() {
    let mut catalog = MapCatalog::with_standard_maps();
    let mut replacement = MapLayout::fallback("Ascent");
    replacement.width = 2048;
    catalog.add(replacement);

    let stored = catalog.lookup("Ascent").expect("Ascent missing");
    assert_eq!(stored.width, 2048);
    assert_eq!(catalog.all_names().len(), 3);
}

#[test]
fn test_fallback_layout_shape() {
    let layout = MapLayout::fallback("Mystery Map");
    assert_eq!(layout.id, "mystery_map");
    assert_eq!(layout.name, "Mystery Map");
    assert_eq!(layout.sites, vec!["A", "B"]);
    assert_eq!(layout.callouts.len(), 4);
    assert!(layout.site_callout("A").is_some());
    assert!(layout.site_callout("B").is_some());
    assert!(layout.site_callout("C").is_none());
}

#[test]
fn test_callout_geometry_stays_in_the_unit_square() {
    let catalog = MapCatalog::with_standard_maps();
    for layout in catalog.layouts() {
        for callout in layout.callouts.values() {
            assert!((0.0..=1.0).contains(&callout.position.0), "{}: x", callout.name);
            assert!((0.0..=1.0).contains(&callout.position.1), "{}: y", callout.name);
            assert!(callout.size.0 > 0.0 && callout.size.1 > 0.0);
        }
        assert!(!layout.push_targets().is_empty());
        assert!(layout
            .callouts
            .values()
            .any(|c| c.area_type == MapArea::AttackerSpawn));
        assert!(layout
            .callouts
            .values()
            .any(|c| c.area_type == MapArea::DefenderSpawn));
    }
}

#[test]
fn test_spawns_match_side() {
    let layout = MapLayout::fallback("Range");
    assert_eq!(layout.spawn_for(true), layout.attacker_spawn);
    assert_eq!(layout.spawn_for(false), layout.defender_spawn);
}
