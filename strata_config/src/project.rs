// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain structures for the per-layer project configuration.
//!
//! The project configuration is a JSON object keyed by layer name. Boolean
//! and numeric fields tolerate the loose spellings real configurations use
//! (`"True"`, `"1"`, …) via the coercion adapters in [`crate::convert`].

use hashbrown::HashMap;
use kurbo::Rect;
use serde::Deserialize;
use serde_json::Value;

use crate::convert;
use crate::error::ConfigError;
use crate::extent::extent_from_values;

/// The geometry kind of a vector layer.
///
/// `None` marks a non-spatial table: it can be checked in the interface but
/// has no drawable representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    /// Point geometries.
    Point,
    /// Line geometries.
    Line,
    /// Polygon geometries.
    Polygon,
    /// No geometry (attribute-only table).
    None,
}

/// Access description for a raster served outside the controlling service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalAccess {
    /// External service kind, e.g. `xyz` or `wms`.
    #[serde(rename = "type")]
    pub service_type: String,
    /// External service URL template.
    pub url: String,
    /// Image format requested from the external service.
    #[serde(default)]
    pub format: String,
    /// CRS the external service serves.
    #[serde(default)]
    pub crs: String,
}

/// The project-configuration entry for one layer or group.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerConfig {
    /// Stable layer id, unique across the project.
    #[serde(default)]
    pub id: Option<String>,
    /// Layer name, the project-side display key.
    pub name: String,
    /// Alternative WMS name when it differs from `name`.
    #[serde(default)]
    pub shortname: Option<String>,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Display abstract.
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    /// Link to more information.
    #[serde(default)]
    pub link: Option<String>,
    /// Whether the node starts checked.
    #[serde(default, deserialize_with = "convert::loose_bool")]
    pub toggled: bool,
    /// Whether the node appears in the legend.
    #[serde(
        rename = "displayInLegend",
        default = "default_true",
        deserialize_with = "convert::loose_bool"
    )]
    pub display_in_legend: bool,
    /// Whether the node appears in the UI layer tree.
    #[serde(
        rename = "displayInLayerTree",
        default = "default_true",
        deserialize_with = "convert::loose_bool"
    )]
    pub display_in_layer_tree: bool,
    /// Whether the node is hidden when listed as a child of its group.
    #[serde(
        rename = "hideAsChild",
        default,
        deserialize_with = "convert::loose_bool"
    )]
    pub hide_as_child: bool,
    /// Whether a group is drawn as a single flattened layer.
    #[serde(
        rename = "groupAsLayer",
        default,
        deserialize_with = "convert::loose_bool"
    )]
    pub group_as_layer: bool,
    /// Whether at most one child of the group may be visible at a time.
    #[serde(
        rename = "mutuallyExclusive",
        default,
        deserialize_with = "convert::loose_bool"
    )]
    pub mutually_exclusive: bool,
    /// Whether the layer is a base layer.
    #[serde(
        rename = "baseLayer",
        default,
        deserialize_with = "convert::loose_bool"
    )]
    pub base_layer: bool,
    /// Whether map images are requested as one single tile.
    #[serde(
        rename = "singleTile",
        default = "default_true",
        deserialize_with = "convert::loose_bool"
    )]
    pub single_tile: bool,
    /// Whether the server caches tiles for this layer.
    #[serde(default, deserialize_with = "convert::loose_bool")]
    pub cached: bool,
    /// Requested image format, e.g. `image/png`.
    #[serde(rename = "imageFormat", default)]
    pub image_format: Option<String>,
    /// Whether a popup is shown for the layer.
    #[serde(default, deserialize_with = "convert::loose_bool")]
    pub popup: bool,
    /// Maximum number of features in a popup.
    #[serde(
        rename = "popupMaxFeatures",
        default = "default_popup_max_features",
        deserialize_with = "convert::loose_u32"
    )]
    pub popup_max_features: u32,
    /// Whether popups also display children layers.
    #[serde(
        rename = "popupDisplayChildren",
        default,
        deserialize_with = "convert::loose_bool"
    )]
    pub popup_display_children: bool,
    /// Vector geometry kind; absent for rasters and groups.
    #[serde(rename = "geometryType", default)]
    pub geometry_type: Option<GeometryType>,
    /// Layer extent as raw coordinates, in `crs`.
    #[serde(default)]
    pub extent: Option<Vec<f64>>,
    /// CRS of the layer data.
    #[serde(default)]
    pub crs: Option<String>,
    /// Whether the raster is toggled to its external source.
    #[serde(
        rename = "externalWmsToggle",
        default,
        deserialize_with = "convert::loose_bool"
    )]
    pub external_wms_toggle: bool,
    /// External access description for rasters served elsewhere.
    #[serde(rename = "externalAccess", default)]
    pub external_access: Option<ExternalAccess>,
}

fn default_true() -> bool {
    true
}

fn default_popup_max_features() -> u32 {
    10
}

impl LayerConfig {
    /// The WMS name this entry answers to: the `shortname` when set,
    /// otherwise the layer name.
    #[must_use]
    pub fn wms_name(&self) -> &str {
        self.shortname.as_deref().unwrap_or(&self.name)
    }

    /// `true` when the layer has a drawable representation.
    ///
    /// Rasters are always spatial; vector layers are spatial unless their
    /// geometry kind is [`GeometryType::None`].
    #[must_use]
    pub fn is_spatial(&self) -> bool {
        self.geometry_type != Some(GeometryType::None)
    }

    /// The layer extent, when the configuration declares one.
    pub fn layer_extent(&self) -> Result<Option<Rect>, ConfigError> {
        self.extent
            .as_deref()
            .map(extent_from_values)
            .transpose()
    }
}

/// The project-configuration lookup, keyed by layer name and by WMS name.
#[derive(Debug, Clone, Default)]
pub struct LayersConfig {
    configs: Vec<LayerConfig>,
    by_name: HashMap<String, usize>,
    by_wms_name: HashMap<String, usize>,
}

impl LayersConfig {
    /// Builds the lookup from the raw `layers` object of a project
    /// configuration.
    pub fn new(raw: &Value) -> Result<Self, ConfigError> {
        let mut result = Self::default();
        if let Value::Object(entries) = raw {
            for entry in entries.values() {
                let config: LayerConfig = serde_json::from_value(entry.clone())?;
                result.push(config);
            }
        }
        Ok(result)
    }

    /// Builds the lookup from already-typed entries.
    pub fn from_configs(configs: impl IntoIterator<Item = LayerConfig>) -> Self {
        let mut result = Self::default();
        for config in configs {
            result.push(config);
        }
        result
    }

    fn push(&mut self, config: LayerConfig) {
        let index = self.configs.len();
        self.by_name.insert(config.name.clone(), index);
        self.by_wms_name.insert(config.wms_name().to_owned(), index);
        self.configs.push(config);
    }

    /// Looks up an entry by its layer name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LayerConfig> {
        self.by_name.get(name).map(|&index| &self.configs[index])
    }

    /// Looks up an entry by the WMS name the service advertises.
    #[must_use]
    pub fn by_wms_name(&self, wms_name: &str) -> Option<&LayerConfig> {
        self.by_wms_name
            .get(wms_name)
            .map(|&index| &self.configs[index])
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LayerConfig> {
        self.configs.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns `true` when no entry was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_fields_coerce() {
        let raw = json!({
            "bus_stops": {
                "id": "bus_stops20121106170806413",
                "name": "bus_stops",
                "toggled": "False",
                "popup": "True",
                "popupMaxFeatures": "10",
                "singleTile": 1,
                "geometryType": "point",
                "imageFormat": "image/png"
            }
        });
        let layers = LayersConfig::new(&raw).unwrap();
        let config = layers.get("bus_stops").unwrap();
        assert!(!config.toggled);
        assert!(config.popup);
        assert!(config.single_tile);
        assert_eq!(config.popup_max_features, 10);
        assert_eq!(config.geometry_type, Some(GeometryType::Point));
        assert!(config.is_spatial());
    }

    #[test]
    fn wms_name_prefers_shortname() {
        let raw = json!({
            "A long name": {
                "name": "A long name",
                "shortname": "short"
            }
        });
        let layers = LayersConfig::new(&raw).unwrap();
        assert!(layers.by_wms_name("short").is_some());
        assert!(layers.by_wms_name("A long name").is_none());
        assert!(layers.get("A long name").is_some());
    }

    #[test]
    fn non_spatial_tables_are_flagged() {
        let raw = json!({
            "stats": { "name": "stats", "geometryType": "none" }
        });
        let layers = LayersConfig::new(&raw).unwrap();
        assert!(!layers.get("stats").unwrap().is_spatial());
    }

    #[test]
    fn malformed_entries_fail() {
        let raw = json!({
            "broken": { "name": "broken", "toggled": "maybe" }
        });
        assert!(LayersConfig::new(&raw).is_err());
    }
}
