//! Tests for urn-model record types.

use urn_model::{CellRecord, CoverageArea, FormKey, GridBounds, GridPoint, RegionDefinition, Worldspace};

fn key(value: &str) -> FormKey {
    value.parse().expect("valid form key")
}

#[test]
fn display_name_falls_back_in_order() {
    let cell = CellRecord::new(key("01A2B3:Skyrim.esm"))
        .with_name("Whiterun Exterior")
        .with_editor_id("WhiterunExterior01");
    assert_eq!(cell.display_name(), "Whiterun Exterior");

    let cell = CellRecord::new(key("01A2B3:Skyrim.esm")).with_editor_id("WhiterunExterior01");
    assert_eq!(cell.display_name(), "WhiterunExterior01");

    let cell = CellRecord::new(key("01A2B3:Skyrim.esm"));
    assert_eq!(cell.display_name(), "01A2B3");
}

#[test]
fn empty_strings_count_as_missing() {
    let cell = CellRecord::new(key("000ABC:Skyrim.esm"))
        .with_name("")
        .with_editor_id("  ");
    assert_eq!(cell.name(), None);
    assert_eq!(cell.editor_id(), None);
    assert_eq!(cell.display_name(), "000ABC");
}

#[test]
fn persistent_cell_heuristic() {
    let world = key("00003C:Skyrim.esm");
    let persistent = CellRecord::exterior(key("000D74:Skyrim.esm"), world.clone(), (0, 0));
    assert!(persistent.looks_persistent());

    let named_origin =
        CellRecord::exterior(key("000D75:Skyrim.esm"), world.clone(), (0, 0)).with_name("Origin");
    assert!(!named_origin.looks_persistent());

    let elsewhere = CellRecord::exterior(key("000D76:Skyrim.esm"), world, (0, 1));
    assert!(!elsewhere.looks_persistent());

    let no_grid = CellRecord::new(key("000D77:Skyrim.esm"));
    assert!(!no_grid.looks_persistent());
}

#[test]
fn worldspace_matches_key_or_editor_id() {
    let worldspace = Worldspace {
        key: key("00003C:Skyrim.esm"),
        editor_id: Some("Tamriel".to_string()),
        bounds: None,
        regions: Vec::new(),
    };
    assert!(worldspace.matches("00003C:Skyrim.esm"));
    assert!(worldspace.matches("tamriel"));
    assert!(!worldspace.matches("00003D:Skyrim.esm"));
    assert!(!worldspace.matches("Solstheim"));
}

#[test]
fn region_label_prefers_editor_id() {
    let region = RegionDefinition::new(key("0C9E21:Skyrim.esm"));
    assert_eq!(region.label(), "0C9E21:Skyrim.esm");
    let region = region.with_editor_id("ReachRegion");
    assert_eq!(region.label(), "ReachRegion");
}

#[test]
fn cell_json_omits_absent_fields() {
    let cell = CellRecord::exterior(key("000D74:Skyrim.esm"), key("00003C:Skyrim.esm"), (3, -2));
    let json = serde_json::to_value(&cell).unwrap();
    assert_eq!(json["key"], "000D74:Skyrim.esm");
    assert_eq!(json["grid"]["y"], -2);
    assert!(json.get("name").is_none());
    assert!(json.get("regions").is_none());

    let parsed: CellRecord = serde_json::from_str(
        r#"{"key":"000D74:Skyrim.esm","flags":{"interior":true},"regions":[]}"#,
    )
    .unwrap();
    assert!(parsed.is_interior());
    assert_eq!(parsed.regions, Some(Vec::new()));
    assert_eq!(parsed.grid, None);
}

#[test]
fn worldspace_parses_from_json() {
    let worldspace: Worldspace = serde_json::from_str(
        r#"{
            "key": "00003C:Skyrim.esm",
            "editor_id": "Tamriel",
            "bounds": {"min": {"x": -57, "y": -43}, "max": {"x": 61, "y": 50}},
            "regions": [
                {
                    "key": "0C9E21:Skyrim.esm",
                    "editor_id": "ReachRegion",
                    "areas": [{"kind": "rect", "min": {"x": -50, "y": -10}, "max": {"x": -30, "y": 10}}]
                },
                {"key": "0C9E22:Skyrim.esm"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(
        worldspace.bounds,
        Some(GridBounds::new(GridPoint::new(-57, -43), GridPoint::new(61, 50)))
    );
    assert_eq!(worldspace.regions.len(), 2);
    assert_eq!(
        worldspace.regions[0].areas,
        vec![CoverageArea::rect((-50, -10), (-30, 10))]
    );
    assert!(worldspace.regions[1].areas.is_empty());
}

#[test]
fn rejects_bad_form_key_in_json() {
    let result = serde_json::from_str::<CellRecord>(r#"{"key":"Skyrim.esm"}"#);
    assert!(result.is_err());
}
