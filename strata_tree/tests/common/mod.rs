// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixture: the transit demo project, with hidden nodes and a
//! styled tram layer.

#![allow(
    dead_code,
    reason = "Shared across test binaries; not every binary uses every fixture."
)]

use serde_json::json;
use strata_config::{LayersConfig, LayersOrder, WmsCapabilityLayer, build_layer_tree_config};
use strata_state::MapTree;

pub fn demo_tree() -> MapTree {
    let capability: WmsCapabilityLayer = serde_json::from_value(json!({
        "Name": "transit_demo",
        "Title": "Transit - Demo",
        "Layer": [
            {
                "Name": "editing",
                "Title": "editing",
                "Layer": [
                    { "Name": "poi", "Title": "poi", "Style": [{ "Name": "default" }] },
                    { "Name": "routes", "Title": "routes", "Style": [{ "Name": "default" }] },
                    { "Name": "zones", "Title": "zones", "Style": [{ "Name": "default" }] }
                ]
            },
            {
                "Name": "transport",
                "Title": "transport",
                "Layer": [
                    {
                        "Name": "tram",
                        "Title": "Tram",
                        "Layer": [
                            { "Name": "tram_ridership", "Title": "tram_ridership" },
                            { "Name": "tram_stops", "Title": "tram_stops", "Style": [{ "Name": "default" }] },
                            {
                                "Name": "tram_lines", "Title": "tram_lines",
                                "Style": [
                                    { "Name": "black", "Title": "black" },
                                    { "Name": "colored", "Title": "colored" }
                                ]
                            }
                        ]
                    }
                ]
            },
            { "Name": "census", "Title": "census" },
            { "Name": "districts", "Title": "districts", "Style": [{ "Name": "default" }] },
            {
                "Name": "basemaps",
                "Title": "basemaps",
                "Layer": [
                    { "Name": "osm", "Title": "osm", "Style": [{ "Name": "default" }] }
                ]
            }
        ]
    }))
    .unwrap();

    let layers = LayersConfig::new(&json!({
        "editing": { "id": "editing", "name": "editing", "type": "group", "toggled": "True" },
        "poi": {
            "id": "poi01", "name": "poi", "geometryType": "point",
            "toggled": "False", "imageFormat": "image/png"
        },
        "routes": {
            "id": "routes01", "name": "routes", "geometryType": "line",
            "toggled": "True", "imageFormat": "image/png"
        },
        "zones": {
            "id": "zones01", "name": "zones", "geometryType": "polygon",
            "toggled": "False", "imageFormat": "image/png"
        },
        "transport": { "id": "transport", "name": "transport", "type": "group", "toggled": "True" },
        "tram": { "id": "Tram", "name": "Tram", "type": "group", "toggled": "True" },
        "tram_ridership": {
            "id": "tram_ridership01", "name": "tram_ridership", "geometryType": "none",
            "toggled": "False", "displayInLayerTree": "False"
        },
        "tram_stops": {
            "id": "tram_stops01", "name": "tram_stops", "geometryType": "point",
            "toggled": "True", "imageFormat": "image/png"
        },
        "tram_lines": {
            "id": "tram_lines01", "name": "tram_lines", "geometryType": "line",
            "toggled": "True", "imageFormat": "image/png"
        },
        "census": {
            "id": "census01", "name": "census", "geometryType": "none", "toggled": "False"
        },
        "districts": {
            "id": "districts01", "name": "districts", "geometryType": "polygon",
            "toggled": "False", "imageFormat": "image/png"
        },
        "basemaps": {
            "id": "basemaps", "name": "basemaps", "type": "group",
            "toggled": "True", "displayInLayerTree": "False"
        },
        "osm": {
            "id": "osm01", "name": "osm", "toggled": "True", "imageFormat": "image/png"
        }
    }))
    .unwrap();

    let root = build_layer_tree_config(&capability, &layers).unwrap();
    MapTree::new(
        &root,
        &LayersOrder::new(
            [
                ("poi", 0),
                ("routes", 1),
                ("zones", 2),
                ("tram_stops", 3),
                ("tram_lines", 4),
                ("districts", 5),
                ("osm", 6),
            ]
            .map(|(name, order)| (name.to_owned(), order)),
        ),
    )
}
