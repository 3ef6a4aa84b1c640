// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbology attachment, rule toggles and the legend parameter keys.

mod common;

use common::{demo_collection, recorder};
use serde_json::json;
use strata_legend::Symbology;
use strata_state::{MapEvent, MapEventKind, StateError};

fn eight_rule_legend() -> serde_json::Value {
    let symbols: Vec<serde_json::Value> = (0..8)
        .map(|key| {
            json!({
                "icon": format!("icon-{key}"),
                "title": format!("rule {key}"),
                "ruleKey": key.to_string(),
                "checked": true
            })
        })
        .collect();
    json!({
        "symbols": symbols,
        "title": "blocks",
        "type": "layer",
        "name": "blocks"
    })
}

#[test]
fn attaching_a_symbology_emits_at_layer_and_root() {
    let mut collection = demo_collection();
    let districts = collection.layer_by_name("districts").unwrap();

    let (at_root, root_callback) = recorder();
    collection.add_listener(MapEventKind::LayerSymbologyChanged, root_callback);
    let (at_layer, layer_callback) = recorder();
    collection.tree_mut().add_listener(
        districts,
        MapEventKind::LayerSymbologyChanged,
        layer_callback,
    );

    assert!(collection.tree().symbology(districts).is_none());
    collection
        .tree_mut()
        .set_symbology(districts, &json!({ "icon": "iVBORw0KGgo=", "title": "Districts" }))
        .unwrap();

    let Some(Symbology::Icon(icon)) = collection.tree().symbology(districts) else {
        panic!("expected a single-icon symbology");
    };
    assert!(icon.icon().starts_with("data:image/png;base64,"));

    let expected = MapEvent::LayerSymbologyChanged {
        name: "districts".into(),
    };
    assert_eq!(*at_layer.borrow(), vec![expected.clone()]);
    assert_eq!(*at_root.borrow(), vec![expected]);
}

#[test]
fn malformed_symbology_is_rejected() {
    let mut collection = demo_collection();
    let districts = collection.layer_by_name("districts").unwrap();
    let error = collection
        .tree_mut()
        .set_symbology(districts, &json!({ "title": "no icon" }))
        .unwrap_err();
    assert!(matches!(error, StateError::InvalidSymbology(_)));
    assert!(collection.tree().symbology(districts).is_none());
}

#[test]
fn rule_toggles_drive_the_legend_parameters() {
    let mut collection = demo_collection();
    let blocks = collection.layer_by_name("blocks").unwrap();
    let tree = collection.tree_mut();
    tree.set_symbology(blocks, &eight_rule_legend()).unwrap();

    // All rules checked: neither key is present.
    let parameters = tree.wms_parameters(blocks).unwrap();
    assert!(!parameters.contains_key("LEGEND_ON"));
    assert!(!parameters.contains_key("LEGEND_OFF"));

    for index in [0, 2, 4, 6] {
        tree.set_symbol_checked(blocks, index, false).unwrap();
    }
    let parameters = tree.wms_parameters(blocks).unwrap();
    assert_eq!(parameters["LEGEND_ON"], json!("1,3,5,7"));
    assert_eq!(parameters["LEGEND_OFF"], json!("0,2,4,6"));

    for index in [0, 2, 4] {
        tree.set_symbol_checked(blocks, index, true).unwrap();
    }
    let parameters = tree.wms_parameters(blocks).unwrap();
    assert_eq!(parameters["LEGEND_ON"], json!("0,1,2,3,4,5,7"));
    assert_eq!(parameters["LEGEND_OFF"], json!("6"));

    // Re-checking the last one removes both keys again.
    tree.set_symbol_checked(blocks, 6, true).unwrap();
    let parameters = tree.wms_parameters(blocks).unwrap();
    assert!(!parameters.contains_key("LEGEND_ON"));
    assert!(!parameters.contains_key("LEGEND_OFF"));
}

#[test]
fn rule_toggle_emits_at_three_scopes() {
    let mut collection = demo_collection();
    let blocks = collection.layer_by_name("blocks").unwrap();
    collection
        .tree_mut()
        .set_symbology(blocks, &eight_rule_legend())
        .unwrap();
    collection.tree_mut().set_symbol_checked(blocks, 6, false).unwrap();

    let (at_rule, rule_callback) = recorder();
    collection
        .tree_mut()
        .add_symbol_listener(blocks, 6, MapEventKind::SymbolCheckedChanged, rule_callback)
        .unwrap();
    let (at_layer, layer_callback) = recorder();
    collection.tree_mut().add_listener(
        blocks,
        MapEventKind::LayerSymbolCheckedChanged,
        layer_callback,
    );
    let (at_root, root_callback) = recorder();
    collection.add_listener(MapEventKind::LayerSymbolCheckedChanged, root_callback);

    collection
        .tree_mut()
        .set_symbol_checked(blocks, 6, true)
        .unwrap();

    assert_eq!(
        *at_rule.borrow(),
        vec![MapEvent::SymbolCheckedChanged {
            title: "rule 6".into(),
            rule_key: "6".into(),
            checked: true,
        }]
    );
    let layer_event = MapEvent::LayerSymbolCheckedChanged {
        name: "blocks".into(),
        title: "rule 6".into(),
        rule_key: "6".into(),
        checked: true,
    };
    assert_eq!(*at_layer.borrow(), vec![layer_event.clone()]);
    assert_eq!(*at_root.borrow(), vec![layer_event]);

    // Writing the current value back stays silent at every scope.
    at_rule.borrow_mut().clear();
    at_layer.borrow_mut().clear();
    at_root.borrow_mut().clear();
    collection
        .tree_mut()
        .set_symbol_checked(blocks, 6, true)
        .unwrap();
    assert!(at_rule.borrow().is_empty());
    assert!(at_layer.borrow().is_empty());
    assert!(at_root.borrow().is_empty());
}

#[test]
fn unknown_rules_are_rejected() {
    let mut collection = demo_collection();
    let blocks = collection.layer_by_name("blocks").unwrap();
    let districts = collection.layer_by_name("districts").unwrap();
    let tree = collection.tree_mut();

    // No symbology at all.
    let error = tree.set_symbol_checked(blocks, 0, false).unwrap_err();
    assert!(matches!(error, StateError::UnknownRule { .. }));

    // A single-icon symbology has no rules either.
    tree.set_symbology(districts, &json!({ "icon": "iVBORw0KGgo=" }))
        .unwrap();
    let error = tree.set_symbol_checked(districts, 0, false).unwrap_err();
    assert!(matches!(error, StateError::UnknownRule { .. }));

    // Out-of-range index.
    tree.set_symbology(blocks, &eight_rule_legend()).unwrap();
    let error = tree.set_symbol_checked(blocks, 8, false).unwrap_err();
    assert_eq!(
        error.to_string(),
        "the layer `blocks` has no legend rule at index 8"
    );
}

#[test]
fn clearing_the_symbology_drops_the_legend_keys() {
    let mut collection = demo_collection();
    let blocks = collection.layer_by_name("blocks").unwrap();
    let tree = collection.tree_mut();

    tree.set_symbology(blocks, &eight_rule_legend()).unwrap();
    tree.set_symbol_checked(blocks, 1, false).unwrap();
    assert!(tree.wms_parameters(blocks).unwrap().contains_key("LEGEND_ON"));

    tree.set_symbology(blocks, &json!(null)).unwrap();
    assert!(tree.symbology(blocks).is_none());
    let parameters = tree.wms_parameters(blocks).unwrap();
    assert!(!parameters.contains_key("LEGEND_ON"));
    assert!(!parameters.contains_key("LEGEND_OFF"));
}
