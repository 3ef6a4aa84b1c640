// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The item-descriptor tree: the validated merge of a capability tree with
//! the project configuration.

use kurbo::Rect;

use crate::capability::WmsCapabilityLayer;
use crate::error::ConfigError;
use crate::extent::{AttributionConfig, BoundingBox, StyleConfig, extent_from_values};
use crate::project::{LayerConfig, LayersConfig};

/// Whether a descriptor stands for a group or a layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemType {
    /// A container of further items.
    Group,
    /// A drawable (or attribute-only) layer.
    Layer,
}

/// One node of the descriptor tree.
///
/// Descriptors are immutable: they carry the capability fields of the node,
/// the matched project-configuration entry (absent only on the synthetic
/// root) and, for groups, the ordered children. Insertion order of children
/// is draw/legend order.
#[derive(Debug, Clone)]
pub struct TreeItemConfig {
    name: String,
    item_type: ItemType,
    depth: usize,
    capability: WmsCapabilityLayer,
    layer_config: Option<LayerConfig>,
    children: Vec<TreeItemConfig>,
}

impl TreeItemConfig {
    /// The project-side item name, unique across the tree.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Group or layer.
    #[must_use]
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Distance from the root; the root itself is 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The WMS name the service advertises, when present.
    #[must_use]
    pub fn wms_name(&self) -> Option<&str> {
        self.capability.name.as_deref()
    }

    /// The WMS title.
    #[must_use]
    pub fn wms_title(&self) -> &str {
        &self.capability.title
    }

    /// The WMS abstract, when present.
    #[must_use]
    pub fn wms_abstract(&self) -> Option<&str> {
        self.capability.abstract_text.as_deref()
    }

    /// The geographic bounding box, lazily materialized.
    ///
    /// Fails with a validation error when the capability carries an array
    /// that is not exactly 4 finite numbers.
    pub fn wms_geographic_bounding_box(&self) -> Result<Option<Rect>, ConfigError> {
        self.capability
            .geographic_bounding_box
            .as_deref()
            .map(extent_from_values)
            .transpose()
    }

    /// The per-CRS bounding boxes, one descriptor per declared CRS.
    pub fn wms_bounding_boxes(&self) -> Result<Vec<BoundingBox>, ConfigError> {
        self.capability
            .bounding_boxes
            .iter()
            .map(|raw| {
                Ok(BoundingBox {
                    crs: raw.crs.clone(),
                    extent: extent_from_values(&raw.extent)?,
                })
            })
            .collect()
    }

    /// The minimum scale denominator, `-1.0` when unspecified.
    #[must_use]
    pub fn wms_min_scale_denominator(&self) -> f64 {
        self.capability.min_scale_denominator.unwrap_or(-1.0)
    }

    /// The maximum scale denominator, `-1.0` when unspecified.
    #[must_use]
    pub fn wms_max_scale_denominator(&self) -> f64 {
        self.capability.max_scale_denominator.unwrap_or(-1.0)
    }

    /// The styles the layer can be requested with.
    #[must_use]
    pub fn wms_styles(&self) -> Vec<StyleConfig> {
        self.capability
            .styles
            .iter()
            .map(|style| StyleConfig::new(style.name.clone(), style.title.clone()))
            .collect()
    }

    /// The attribution, materialized only when both a title and an online
    /// resource are present.
    #[must_use]
    pub fn wms_attribution(&self) -> Option<AttributionConfig> {
        let attribution = self.capability.attribution.as_ref()?;
        match (&attribution.title, &attribution.online_resource) {
            (Some(title), Some(url)) => Some(AttributionConfig {
                title: title.clone(),
                url: url.clone(),
            }),
            _ => None,
        }
    }

    /// The matched project-configuration entry; `None` only on the root.
    #[must_use]
    pub fn layer_config(&self) -> Option<&LayerConfig> {
        self.layer_config.as_ref()
    }

    /// Whether at most one child may be visible at a time (groups only).
    #[must_use]
    pub fn mutually_exclusive(&self) -> bool {
        self.layer_config
            .as_ref()
            .is_some_and(|config| config.mutually_exclusive)
    }

    /// Whether the group is drawn as a single flattened layer.
    #[must_use]
    pub fn group_as_layer(&self) -> bool {
        self.layer_config
            .as_ref()
            .is_some_and(|config| config.group_as_layer)
    }

    /// Ordered children; empty for layers.
    #[must_use]
    pub fn children(&self) -> &[TreeItemConfig] {
        &self.children
    }

    /// Clones the descriptor without its children.
    ///
    /// State nodes own their descriptor fields this way; the subtree itself
    /// is represented by child nodes, never by a second descriptor copy.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            children: Vec::new(),
            ..self.clone()
        }
    }

    /// Number of children.
    #[must_use]
    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    /// Collects the names of every descendant layer, in tree order.
    #[must_use]
    pub fn find_layer_config_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_layer_names(&mut names);
        names
    }

    fn collect_layer_names(&self, names: &mut Vec<String>) {
        for child in &self.children {
            match child.item_type {
                ItemType::Layer => names.push(child.name.clone()),
                ItemType::Group => child.collect_layer_names(names),
            }
        }
    }
}

/// Builds the descriptor tree from the capability root and the project
/// configuration.
///
/// Depth-first, pre-order. Every capability-advertised sub-layer must
/// resolve against the configuration; an unknown WMS name fails the whole
/// build with [`ConfigError::UnknownWmsLayerName`] and builds nothing. The
/// synthetic root is a group named `root` at depth 0 carrying the
/// capability root's fields but no configuration entry.
pub fn build_layer_tree_config(
    capability_root: &WmsCapabilityLayer,
    layers: &LayersConfig,
) -> Result<TreeItemConfig, ConfigError> {
    let children = build_items(capability_root, layers, 0)?;
    Ok(TreeItemConfig {
        name: "root".into(),
        item_type: ItemType::Group,
        depth: 0,
        capability: capability_root.without_children(),
        layer_config: None,
        children,
    })
}

fn build_items(
    group: &WmsCapabilityLayer,
    layers: &LayersConfig,
    depth: usize,
) -> Result<Vec<TreeItemConfig>, ConfigError> {
    let mut items = Vec::with_capacity(group.layers.len());
    for capability in &group.layers {
        let wms_name = capability.name.as_deref().unwrap_or_default();
        let Some(config) = layers.by_wms_name(wms_name) else {
            return Err(ConfigError::UnknownWmsLayerName(wms_name.to_owned()));
        };
        let item = if capability.layers.is_empty() {
            TreeItemConfig {
                name: config.name.clone(),
                item_type: ItemType::Layer,
                depth: depth + 1,
                capability: capability.clone(),
                layer_config: Some(config.clone()),
                children: Vec::new(),
            }
        } else {
            TreeItemConfig {
                name: config.name.clone(),
                item_type: ItemType::Group,
                depth: depth + 1,
                capability: capability.without_children(),
                layer_config: Some(config.clone()),
                children: build_items(capability, layers, depth + 1)?,
            }
        };
        items.push(item);
    }
    Ok(items)
}
