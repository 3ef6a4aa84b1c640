// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain structures mirroring the layer section of a WMS capability
//! document.
//!
//! Field names follow the JSON encoding of WMS 1.3.0 capabilities
//! (`Name`, `Title`, `EX_GeographicBoundingBox`, …). Parsing the XML
//! document into this shape is a collaborator's job; this crate only
//! consumes it. Coordinate arrays are kept raw and validated lazily by the
//! descriptor accessors.

use serde::Deserialize;

/// One layer element of a capability document, possibly nested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WmsCapabilityLayer {
    /// WMS layer name; absent on some root/container elements.
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// WMS layer title.
    #[serde(rename = "Title", default)]
    pub title: String,
    /// WMS layer abstract.
    #[serde(rename = "Abstract")]
    pub abstract_text: Option<String>,
    /// Geographic bounding box as raw `west, south, east, north` values.
    #[serde(rename = "EX_GeographicBoundingBox")]
    pub geographic_bounding_box: Option<Vec<f64>>,
    /// Per-CRS bounding boxes.
    #[serde(rename = "BoundingBox", default)]
    pub bounding_boxes: Vec<WmsBoundingBox>,
    /// Minimum scale denominator; absent means unbounded.
    #[serde(rename = "MinScaleDenominator")]
    pub min_scale_denominator: Option<f64>,
    /// Maximum scale denominator; absent means unbounded.
    #[serde(rename = "MaxScaleDenominator")]
    pub max_scale_denominator: Option<f64>,
    /// Styles the layer can be requested with.
    #[serde(rename = "Style", default)]
    pub styles: Vec<WmsStyle>,
    /// Optional attribution element.
    #[serde(rename = "Attribution")]
    pub attribution: Option<WmsAttribution>,
    /// Nested sub-layers; a non-empty list makes this element a group.
    #[serde(rename = "Layer", default)]
    pub layers: Vec<WmsCapabilityLayer>,
}

impl WmsCapabilityLayer {
    /// Clones the element without its nested sub-layers.
    ///
    /// Descriptors own their capability fields but never a second copy of
    /// the subtree; children are represented by child descriptors.
    #[must_use]
    pub(crate) fn without_children(&self) -> Self {
        Self {
            layers: Vec::new(),
            ..self.clone()
        }
    }
}

/// A bounding box element: a CRS name and four raw coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct WmsBoundingBox {
    /// CRS name, e.g. `EPSG:3857`.
    pub crs: String,
    /// Raw `x0, y0, x1, y1` values; validated when materialized.
    pub extent: Vec<f64>,
}

/// A style element.
#[derive(Debug, Clone, Deserialize)]
pub struct WmsStyle {
    /// WMS style name.
    #[serde(rename = "Name")]
    pub name: String,
    /// WMS style title; falls back to the name when absent.
    #[serde(rename = "Title")]
    pub title: Option<String>,
}

/// An attribution element.
#[derive(Debug, Clone, Deserialize)]
pub struct WmsAttribution {
    /// Attribution title.
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// Attribution link.
    #[serde(rename = "OnlineResource")]
    pub online_resource: Option<String>,
}
