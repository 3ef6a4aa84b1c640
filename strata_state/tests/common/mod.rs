// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures: a small transit project with nested groups, a
//! non-spatial table, an external raster, and a mutually-exclusive variant.

#![allow(
    dead_code,
    reason = "Shared across test binaries; not every binary uses every fixture."
)]

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use strata_config::{
    LayersConfig, LayersOrder, TreeItemConfig, WmsCapabilityLayer, build_layer_tree_config,
};
use strata_state::{LayersAndGroupsCollection, MapEvent, MapTree};

pub fn demo_capability() -> WmsCapabilityLayer {
    serde_json::from_value(json!({
        "Name": "transit_demo",
        "Title": "Transit - Demo",
        "Abstract": "Demo project with bus and tram lines.",
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
                        "Name": "bus",
                        "Title": "Bus",
                        "EX_GeographicBoundingBox": [3.55326, 43.5265, 4.081239, 43.761579],
                        "BoundingBox": [
                            { "crs": "EPSG:3857", "extent": [395547.093, 5392456.984, 454321.449, 5428619.815] },
                            { "crs": "EPSG:4326", "extent": [3.55326, 43.5265, 4.081239, 43.761579] }
                        ],
                        "MaxScaleDenominator": 40001,
                        "Layer": [
                            {
                                "Name": "bus_stops", "Title": "bus_stops",
                                "MinScaleDenominator": 0, "MaxScaleDenominator": 15000,
                                "Style": [{ "Name": "default" }]
                            },
                            { "Name": "bus_lines", "Title": "bus_lines", "Style": [{ "Name": "default" }] }
                        ]
                    },
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
                    },
                    {
                        "Name": "buildings",
                        "Title": "Buildings",
                        "Layer": [
                            { "Name": "public_buildings", "Title": "public_buildings", "Style": [{ "Name": "default" }] },
                            { "Name": "public_buildings_tram", "Title": "public_buildings_tram", "Style": [{ "Name": "default" }] }
                        ]
                    }
                ]
            },
            { "Name": "census", "Title": "census" },
            { "Name": "districts", "Title": "districts", "Style": [{ "Name": "default" }] },
            { "Name": "blocks", "Title": "blocks", "Style": [{ "Name": "default" }] },
            {
                "Name": "basemaps",
                "Title": "basemaps",
                "Layer": [
                    {
                        "Name": "osm", "Title": "osm",
                        "EX_GeographicBoundingBox": [-180.0, -85.051129, 180.0, 85.051129],
                        "Style": [{ "Name": "default" }]
                    }
                ]
            }
        ]
    }))
    .unwrap()
}

pub fn demo_layers_config() -> LayersConfig {
    LayersConfig::new(&json!({
        "editing": { "id": "editing", "name": "editing", "type": "group", "title": "Editing", "toggled": "True" },
        "poi": {
            "id": "poi20121106170806413", "name": "poi", "title": "Points of interest",
            "geometryType": "point", "toggled": "False", "popup": "True",
            "imageFormat": "image/png", "crs": "EPSG:4326"
        },
        "routes": {
            "id": "routes20121106170806414", "name": "routes", "title": "Routes",
            "geometryType": "line", "toggled": "True", "imageFormat": "image/png"
        },
        "zones": {
            "id": "zones20121106170806417", "name": "zones", "title": "Zones",
            "geometryType": "polygon", "toggled": "False", "imageFormat": "image/png"
        },
        "transport": { "id": "transport", "name": "transport", "type": "group", "title": "Transport", "toggled": "True" },
        "bus": {
            "id": "Bus", "name": "Bus", "type": "group", "title": "Bus", "toggled": "False",
            "link": "https://transit.example.org/bus", "imageFormat": "image/png"
        },
        "bus_stops": {
            "id": "bus_stops20121106170806415", "name": "bus_stops", "title": "Stops",
            "geometryType": "point", "toggled": "False", "singleTile": "True",
            "imageFormat": "image/png", "extent": [3.55326, 43.526928, 4.039131, 43.752341],
            "crs": "EPSG:4326", "popup": "True", "popupMaxFeatures": 10
        },
        "bus_lines": {
            "id": "bus_lines20121106170806416", "name": "bus_lines", "title": "Lines",
            "geometryType": "line", "toggled": "False", "imageFormat": "image/png"
        },
        "tram": { "id": "Tram", "name": "Tram", "type": "group", "title": "Tram", "toggled": "True" },
        "tram_ridership": {
            "id": "tram_ridership20150915133200100", "name": "tram_ridership",
            "title": "Tram ridership", "geometryType": "none", "toggled": "False",
            "displayInLayerTree": "False", "crs": "EPSG:4326"
        },
        "tram_stops": {
            "id": "tram_stops20150915133205120", "name": "tram_stops", "title": "Tram stops",
            "geometryType": "point", "toggled": "True", "imageFormat": "image/png"
        },
        "tram_lines": {
            "id": "tram_lines20150915133210140", "name": "tram_lines", "title": "Tram lines",
            "geometryType": "line", "toggled": "True", "imageFormat": "image/png"
        },
        "buildings": { "id": "Buildings", "name": "Buildings", "type": "group", "title": "Buildings", "toggled": "True" },
        "public_buildings": {
            "id": "public_buildings20150420100958543", "name": "public_buildings",
            "title": "Public buildings", "geometryType": "polygon", "toggled": "True",
            "imageFormat": "image/png"
        },
        "public_buildings_tram": {
            "id": "public_buildings_tram20150420101001000", "name": "public_buildings_tram",
            "title": "Public buildings near tram", "geometryType": "polygon", "toggled": "False",
            "displayInLayerTree": "False", "imageFormat": "image/png"
        },
        "census": {
            "id": "census20160121144525075", "name": "census", "title": "Census",
            "geometryType": "none", "toggled": "False", "crs": "EPSG:4326"
        },
        "districts": {
            "id": "districts20160121124316563", "name": "districts", "title": "Districts",
            "geometryType": "polygon", "toggled": "False", "imageFormat": "image/png"
        },
        "blocks": {
            "id": "blocks20160121124316570", "name": "blocks", "title": "Blocks",
            "geometryType": "polygon", "toggled": "False", "imageFormat": "image/png"
        },
        "basemaps": {
            "id": "basemaps", "name": "basemaps", "type": "group", "title": "Base maps",
            "toggled": "True", "displayInLayerTree": "False"
        },
        "osm": {
            "id": "osm20180315181738526", "name": "osm", "title": "OpenStreetMap",
            "toggled": "True", "singleTile": "False", "cached": "True",
            "imageFormat": "image/png", "crs": "EPSG:3857",
            "extent": [-20037508.342789244, -20037508.342789255, 20037508.342789244, 20037508.342789244],
            "externalWmsToggle": "True",
            "externalAccess": {
                "type": "xyz",
                "url": "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
                "format": "",
                "crs": "EPSG:3857"
            }
        }
    }))
    .unwrap()
}

pub fn demo_order() -> LayersOrder {
    LayersOrder::new(
        [
            ("poi", 0),
            ("routes", 1),
            ("zones", 2),
            ("bus_stops", 3),
            ("bus_lines", 4),
            ("tram_stops", 5),
            ("tram_lines", 6),
            ("public_buildings", 7),
            ("public_buildings_tram", 8),
            ("districts", 9),
            ("blocks", 10),
            ("osm", 11),
        ]
        .map(|(name, order)| (name.to_owned(), order)),
    )
}

pub fn demo_config_tree() -> TreeItemConfig {
    build_layer_tree_config(&demo_capability(), &demo_layers_config()).unwrap()
}

pub fn demo_tree() -> MapTree {
    MapTree::new(&demo_config_tree(), &demo_order())
}

pub fn demo_collection() -> LayersAndGroupsCollection {
    LayersAndGroupsCollection::new(&demo_config_tree(), &demo_order())
}

/// A root with one mutually-exclusive group of two layers, the first one
/// initially active.
pub fn exclusive_tree() -> MapTree {
    let capability: WmsCapabilityLayer = serde_json::from_value(json!({
        "Name": "exclusive_demo",
        "Title": "Exclusive - Demo",
        "Layer": [{
            "Name": "scenarios",
            "Title": "scenarios",
            "Layer": [
                { "Name": "scenario_a", "Title": "scenario_a", "Style": [{ "Name": "default" }] },
                { "Name": "scenario_b", "Title": "scenario_b", "Style": [{ "Name": "default" }] }
            ]
        }]
    }))
    .unwrap();
    let layers = LayersConfig::new(&json!({
        "scenarios": {
            "id": "scenarios", "name": "scenarios", "type": "group",
            "toggled": "True", "mutuallyExclusive": "True"
        },
        "scenario_a": {
            "id": "scenario_a01", "name": "scenario_a", "geometryType": "polygon",
            "toggled": "True", "imageFormat": "image/png"
        },
        "scenario_b": {
            "id": "scenario_b01", "name": "scenario_b", "geometryType": "polygon",
            "toggled": "False", "imageFormat": "image/png"
        }
    }))
    .unwrap();
    let root = build_layer_tree_config(&capability, &layers).unwrap();
    MapTree::new(&root, &LayersOrder::new([("scenario_a".to_owned(), 0), ("scenario_b".to_owned(), 1)]))
}

/// A recording listener: returns the shared log and the boxed callback.
pub fn recorder() -> (Rc<RefCell<Vec<MapEvent>>>, Box<dyn FnMut(&MapEvent)>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, Box::new(move |event| sink.borrow_mut().push(event.clone())))
}
