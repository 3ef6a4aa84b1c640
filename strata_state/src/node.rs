// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage for the state tree.

use smallvec::SmallVec;
use strata_config::{ExternalAccess, TreeItemConfig};
use strata_events::Registry;
use strata_legend::Symbology;

use crate::event::MapEvent;

/// Identifier of a node in a [`MapTree`](crate::MapTree).
///
/// A small, copyable index handle. The tree's structure is fixed at
/// construction, so ids never go stale; they are only valid for the tree
/// that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The drawing kind of a layer node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayerType {
    /// A vector layer (point, line, polygon, or attribute-only).
    Vector,
    /// A raster layer.
    Raster,
}

/// Selection and filter state of a vector layer.
#[derive(Debug, Default)]
pub(crate) struct SelectionState {
    /// Selected feature ids, in insertion order. Retained even while a
    /// token is the active representation.
    pub selected_features: Vec<String>,
    /// Server-issued token standing in for the selection.
    pub selection_token: Option<String>,
    /// Attribute filter expression.
    pub expression_filter: Option<String>,
    /// Server-issued token standing in for the filter.
    pub filter_token: Option<String>,
}

/// State shared by vector and raster layers.
pub(crate) struct LayerCore {
    /// The WMS style requests are made with.
    pub selected_style: String,
    /// The attached legend model, if any.
    pub symbology: Option<Symbology>,
    /// One listener registry per legend rule, parallel to the rule list.
    pub symbol_registries: Vec<Registry<MapEvent>>,
}

impl LayerCore {
    pub(crate) fn new(item: &TreeItemConfig) -> Self {
        let selected_style = item
            .wms_styles()
            .first()
            .map(|style| style.name().to_owned())
            .unwrap_or_else(|| "default".to_owned());
        Self {
            selected_style,
            symbology: None,
            symbol_registries: Vec::new(),
        }
    }
}

/// Kind-specific node state.
pub(crate) enum NodeKind {
    Group {
        /// At most one checked child at a time.
        mutually_exclusive: bool,
    },
    Vector {
        core: LayerCore,
        selection: SelectionState,
    },
    Raster {
        core: LayerCore,
        /// Access description when the raster is served elsewhere.
        external_access: Option<ExternalAccess>,
    },
}

/// One node of the state tree.
///
/// The arena owns the node; `parent` is a lookup-only back reference used
/// during event bubbling, never a second owner.
pub(crate) struct Node {
    pub item: TreeItemConfig,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub checked: bool,
    pub visibility: bool,
    pub layer_order: i32,
    pub kind: NodeKind,
    pub registry: Registry<MapEvent>,
}

impl Node {
    /// `true` for vector layers without a drawable geometry.
    pub(crate) fn is_non_spatial(&self) -> bool {
        matches!(self.kind, NodeKind::Vector { .. })
            && !self
                .item
                .layer_config()
                .is_none_or(strata_config::LayerConfig::is_spatial)
    }

    pub(crate) fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    pub(crate) fn core(&self) -> Option<&LayerCore> {
        match &self.kind {
            NodeKind::Vector { core, .. } | NodeKind::Raster { core, .. } => Some(core),
            NodeKind::Group { .. } => None,
        }
    }

    pub(crate) fn core_mut(&mut self) -> Option<&mut LayerCore> {
        match &mut self.kind {
            NodeKind::Vector { core, .. } | NodeKind::Raster { core, .. } => Some(core),
            NodeKind::Group { .. } => None,
        }
    }

    pub(crate) fn selection(&self) -> Option<&SelectionState> {
        match &self.kind {
            NodeKind::Vector { selection, .. } => Some(selection),
            _ => None,
        }
    }

    pub(crate) fn selection_mut(&mut self) -> Option<&mut SelectionState> {
        match &mut self.kind {
            NodeKind::Vector { selection, .. } => Some(selection),
            _ => None,
        }
    }
}
