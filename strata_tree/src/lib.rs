// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Tree: the UI-facing layer tree.
//!
//! [`LayerTreeView`] is a structurally parallel decoration over a built
//! [`MapTree`]: it mirrors the state tree minus every node the project
//! flags as hidden from the layer list (`displayInLayerTree = false`,
//! subtree included), without ever re-parenting or reordering the
//! survivors. On top of the filtered structure it derives what a layer
//! panel needs:
//!
//! - a placeholder icon from the geometry kind (point / line / polygon)
//!   until a single-icon symbology is assigned ([`icon`]);
//! - the WMS style surface — reading the selected style and assigning a
//!   new one, which fails with a type error for names outside the layer's
//!   declared styles and emits `layer.style.changed` on success;
//! - the filtered traversals ([`LayerTreeView::find_tree_layer_names`],
//!   [`LayerTreeView::find_tree_layers`],
//!   [`LayerTreeView::tree_layer_by_name`]).
//!
//! The view holds no layer state of its own: mutations delegate to the
//! state tree, whose events bubble through the state registries as usual.

pub mod icon;

use strata_config::ItemType;
use strata_state::{MapTree, NodeId, StateError};

/// Identifier of a node in a [`LayerTreeView`].
///
/// Only valid for the view that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(u32);

impl ViewId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct ViewNode {
    state: NodeId,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
}

/// The filtered, UI-facing layer tree.
#[derive(Debug)]
pub struct LayerTreeView {
    nodes: Vec<ViewNode>,
}

impl LayerTreeView {
    /// Builds the view over a state tree, pruning hidden nodes.
    #[must_use]
    pub fn new(tree: &MapTree) -> Self {
        let mut view = Self { nodes: Vec::new() };
        view.insert(tree, tree.root(), None);
        view
    }

    fn insert(&mut self, tree: &MapTree, state: NodeId, parent: Option<ViewId>) -> ViewId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "view trees stay far below u32::MAX nodes"
        )]
        let id = ViewId(self.nodes.len() as u32);
        self.nodes.push(ViewNode {
            state,
            parent,
            children: Vec::new(),
        });
        for &child in tree.children(state) {
            let hidden = tree
                .layer_config(child)
                .is_some_and(|config| !config.display_in_layer_tree);
            if hidden {
                continue;
            }
            let child_id = self.insert(tree, child, Some(id));
            self.nodes[id.idx()].children.push(child_id);
        }
        id
    }

    /// The view root, mirroring the state root.
    #[must_use]
    pub fn root(&self) -> ViewId {
        ViewId(0)
    }

    /// The state node a view node decorates.
    #[must_use]
    pub fn state_id(&self, id: ViewId) -> NodeId {
        self.nodes[id.idx()].state
    }

    /// The parent view node; `None` on the root.
    #[must_use]
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes[id.idx()].parent
    }

    /// Ordered surviving children.
    #[must_use]
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        &self.nodes[id.idx()].children
    }

    /// Number of surviving children.
    #[must_use]
    pub fn children_count(&self, id: ViewId) -> usize {
        self.nodes[id.idx()].children.len()
    }

    /// Whether the view node mirrors a group.
    #[must_use]
    pub fn is_group(&self, tree: &MapTree, id: ViewId) -> bool {
        tree.item(self.state_id(id)).item_type() == ItemType::Group
    }

    /// Collects the names of the visible-in-list descendant layers, in
    /// tree order.
    #[must_use]
    pub fn find_tree_layer_names(&self, tree: &MapTree, id: ViewId) -> Vec<String> {
        self.find_tree_layers(tree, id)
            .into_iter()
            .map(|layer| tree.name(self.state_id(layer)).to_owned())
            .collect()
    }

    /// Collects the visible-in-list descendant layer nodes, in tree order.
    #[must_use]
    pub fn find_tree_layers(&self, tree: &MapTree, id: ViewId) -> Vec<ViewId> {
        let mut layers = Vec::new();
        self.collect_layers(tree, id, &mut layers);
        layers
    }

    fn collect_layers(&self, tree: &MapTree, id: ViewId, out: &mut Vec<ViewId>) {
        for &child in self.children(id) {
            if self.is_group(tree, child) {
                self.collect_layers(tree, child, out);
            } else {
                out.push(child);
            }
        }
    }

    /// Finds a descendant layer by name.
    ///
    /// Fails with a lookup error naming the layer when no visible-in-list
    /// layer matches.
    pub fn tree_layer_by_name(&self, tree: &MapTree, name: &str) -> Result<ViewId, StateError> {
        self.find_tree_layers(tree, self.root())
            .into_iter()
            .find(|&layer| tree.name(self.state_id(layer)) == name)
            .ok_or_else(|| StateError::UnknownLayerName(name.to_owned()))
    }

    /// The icon to show for a layer node.
    ///
    /// A single-icon symbology wins; otherwise a placeholder is derived
    /// from the geometry kind.
    #[must_use]
    pub fn icon(&self, tree: &MapTree, id: ViewId) -> String {
        icon::layer_icon(tree, self.state_id(id))
    }

    /// The WMS style requests for this layer are made with.
    #[must_use]
    pub fn selected_style<'t>(&self, tree: &'t MapTree, id: ViewId) -> Option<&'t str> {
        tree.selected_style(self.state_id(id))
    }

    /// Selects a WMS style by name, delegating to the state tree.
    ///
    /// Unknown names fail with a type error; an actual change emits
    /// `layer.style.changed` at the state node, bubbled to the root.
    pub fn set_selected_style(
        &self,
        tree: &mut MapTree,
        id: ViewId,
        style: &str,
    ) -> Result<(), StateError> {
        tree.set_selected_style(self.state_id(id), style)
    }
}
