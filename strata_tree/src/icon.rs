// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placeholder icons derived from the geometry kind.
//!
//! Until a layer gets a real legend icon from the server, the layer panel
//! shows a small inline SVG placeholder matching the geometry kind. The
//! placeholders are data URIs so they drop straight into an `img` source.

use strata_config::GeometryType;
use strata_legend::Symbology;
use strata_state::{MapTree, NodeId};

/// Placeholder icon for point layers.
pub const POINT_LAYER_ICON: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'><circle cx='8' cy='8' r='5' fill='none' stroke='currentColor'/></svg>";

/// Placeholder icon for line layers.
pub const LINE_LAYER_ICON: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'><path d='M2 12 L8 5 L14 10' fill='none' stroke='currentColor'/></svg>";

/// Placeholder icon for polygon layers.
pub const POLYGON_LAYER_ICON: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'><polygon points='2,13 8,3 14,13' fill='none' stroke='currentColor'/></svg>";

/// Placeholder icon for rasters and attribute-only layers.
pub const GENERIC_LAYER_ICON: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 16 16'><rect x='3' y='3' width='10' height='10' fill='none' stroke='currentColor'/></svg>";

/// The geometry-kind placeholder for a layer.
#[must_use]
pub fn geometry_icon(geometry: Option<GeometryType>) -> &'static str {
    match geometry {
        Some(GeometryType::Point) => POINT_LAYER_ICON,
        Some(GeometryType::Line) => LINE_LAYER_ICON,
        Some(GeometryType::Polygon) => POLYGON_LAYER_ICON,
        Some(GeometryType::None) | None => GENERIC_LAYER_ICON,
    }
}

/// The icon of a state-tree layer: its single-icon symbology when one is
/// assigned, the geometry placeholder otherwise.
///
/// A rule-container symbology keeps the placeholder; its per-rule icons
/// are rendered by the legend, not by the layer row.
#[must_use]
pub fn layer_icon(tree: &MapTree, id: NodeId) -> String {
    if let Some(Symbology::Icon(single)) = tree.symbology(id) {
        return single.icon();
    }
    geometry_icon(tree.geometry_type(id)).to_owned()
}
