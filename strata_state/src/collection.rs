// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat lookups over a built state tree.

use hashbrown::HashMap;
use serde_json::Value;
use strata_config::{LayersOrder, TreeItemConfig};
use strata_events::{Envelope, ListenerId};

use crate::error::StateError;
use crate::event::{MapEvent, MapEventKind};
use crate::node::NodeId;
use crate::tree::MapTree;

/// A [`MapTree`] plus flat name / id / WMS-name indices, separately for
/// groups and for layers.
///
/// The indices are built once by a full walk and hand out the shared
/// [`NodeId`] handles — a lookup never copies a node. Every miss is an
/// error naming the lookup kind and the offending key.
///
/// Subscribing to the collection is subscribing to the root node's
/// registry: the collection forwards, it does not re-derive events.
#[derive(Debug)]
pub struct LayersAndGroupsCollection {
    tree: MapTree,
    layers: Vec<NodeId>,
    groups: Vec<NodeId>,
    layers_by_name: HashMap<String, NodeId>,
    layers_by_id: HashMap<String, NodeId>,
    layers_by_wms_name: HashMap<String, NodeId>,
    groups_by_name: HashMap<String, NodeId>,
    groups_by_id: HashMap<String, NodeId>,
    groups_by_wms_name: HashMap<String, NodeId>,
}

impl LayersAndGroupsCollection {
    /// Builds the tree and its indices from a descriptor tree and the
    /// draw-order index.
    #[must_use]
    pub fn new(config: &TreeItemConfig, order: &LayersOrder) -> Self {
        let tree = MapTree::new(config, order);
        let mut collection = Self {
            tree,
            layers: Vec::new(),
            groups: Vec::new(),
            layers_by_name: HashMap::new(),
            layers_by_id: HashMap::new(),
            layers_by_wms_name: HashMap::new(),
            groups_by_name: HashMap::new(),
            groups_by_id: HashMap::new(),
            groups_by_wms_name: HashMap::new(),
        };
        collection.index(collection.tree.root());
        collection
    }

    fn index(&mut self, id: NodeId) {
        let children = self.tree.children(id).to_vec();
        for child in children {
            let name = self.tree.name(child).to_owned();
            let config_id = self.tree.config_id(child).map(str::to_owned);
            let wms_name = self.tree.item(child).wms_name().map(str::to_owned);
            if self.tree.layer_type(child).is_some() {
                self.layers.push(child);
                self.layers_by_name.insert(name, child);
                if let Some(config_id) = config_id {
                    self.layers_by_id.insert(config_id, child);
                }
                if let Some(wms_name) = wms_name {
                    self.layers_by_wms_name.insert(wms_name, child);
                }
            } else {
                self.groups.push(child);
                self.groups_by_name.insert(name, child);
                if let Some(config_id) = config_id {
                    self.groups_by_id.insert(config_id, child);
                }
                if let Some(wms_name) = wms_name {
                    self.groups_by_wms_name.insert(wms_name, child);
                }
                self.index(child);
            }
        }
    }

    /// The underlying state tree.
    #[must_use]
    pub fn tree(&self) -> &MapTree {
        &self.tree
    }

    /// Mutable access to the underlying state tree.
    pub fn tree_mut(&mut self) -> &mut MapTree {
        &mut self.tree
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Layer ids, in tree order.
    #[must_use]
    pub fn layers(&self) -> &[NodeId] {
        &self.layers
    }

    /// Group ids (root excluded), in tree order.
    #[must_use]
    pub fn groups(&self) -> &[NodeId] {
        &self.groups
    }

    /// Layer names, in tree order.
    #[must_use]
    pub fn layer_names(&self) -> Vec<String> {
        self.layers
            .iter()
            .map(|&id| self.tree.name(id).to_owned())
            .collect()
    }

    /// Group names (root excluded), in tree order.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        self.groups
            .iter()
            .map(|&id| self.tree.name(id).to_owned())
            .collect()
    }

    /// Looks a layer up by name.
    pub fn layer_by_name(&self, name: &str) -> Result<NodeId, StateError> {
        self.layers_by_name
            .get(name)
            .copied()
            .ok_or_else(|| StateError::UnknownLayerName(name.to_owned()))
    }

    /// Looks a layer up by its configured id.
    pub fn layer_by_id(&self, id: &str) -> Result<NodeId, StateError> {
        self.layers_by_id
            .get(id)
            .copied()
            .ok_or_else(|| StateError::UnknownLayerId(id.to_owned()))
    }

    /// Looks a layer up by the WMS name the service advertises.
    pub fn layer_by_wms_name(&self, wms_name: &str) -> Result<NodeId, StateError> {
        self.layers_by_wms_name
            .get(wms_name)
            .copied()
            .ok_or_else(|| StateError::UnknownLayerWmsName(wms_name.to_owned()))
    }

    /// Looks a group up by name.
    pub fn group_by_name(&self, name: &str) -> Result<NodeId, StateError> {
        self.groups_by_name
            .get(name)
            .copied()
            .ok_or_else(|| StateError::UnknownGroupName(name.to_owned()))
    }

    /// Looks a group up by its configured id.
    pub fn group_by_id(&self, id: &str) -> Result<NodeId, StateError> {
        self.groups_by_id
            .get(id)
            .copied()
            .ok_or_else(|| StateError::UnknownGroupId(id.to_owned()))
    }

    /// Looks a group up by the WMS name the service advertises.
    pub fn group_by_wms_name(&self, wms_name: &str) -> Result<NodeId, StateError> {
        self.groups_by_wms_name
            .get(wms_name)
            .copied()
            .ok_or_else(|| StateError::UnknownGroupWmsName(wms_name.to_owned()))
    }

    /// Looks a node up by name, across layers and groups.
    pub fn layer_or_group_by_name(&self, name: &str) -> Result<NodeId, StateError> {
        self.layers_by_name
            .get(name)
            .or_else(|| self.groups_by_name.get(name))
            .copied()
            .ok_or_else(|| StateError::UnknownName(name.to_owned()))
    }

    /// Looks a node up by WMS name, across layers and groups.
    pub fn layer_or_group_by_wms_name(&self, wms_name: &str) -> Result<NodeId, StateError> {
        self.layers_by_wms_name
            .get(wms_name)
            .or_else(|| self.groups_by_wms_name.get(wms_name))
            .copied()
            .ok_or_else(|| StateError::UnknownWmsName(wms_name.to_owned()))
    }

    /// Registers a listener at the collection scope.
    ///
    /// Equivalent to registering on the root node: every bubbled event ends
    /// up here.
    pub fn add_listener(
        &mut self,
        kind: MapEventKind,
        callback: Box<dyn FnMut(&MapEvent)>,
    ) -> ListenerId {
        let root = self.tree.root();
        self.tree.add_listener(root, kind, callback)
    }

    /// Removes a collection-scope listener.
    pub fn remove_listener(&mut self, listener: ListenerId) -> bool {
        let root = self.tree.root();
        self.tree.remove_listener(root, listener)
    }

    /// Forwards a dispatch to the tree (replays are suppressed).
    pub fn dispatch(&mut self, origin: NodeId, envelope: &Envelope<MapEvent>) {
        self.tree.dispatch(origin, envelope);
    }

    /// Convenience passthrough for [`MapTree::set_checked`].
    pub fn set_checked(&mut self, id: NodeId, value: bool) {
        self.tree.set_checked(id, value);
    }

    /// Convenience passthrough for [`MapTree::set_selected_features`].
    pub fn set_selected_features(&mut self, id: NodeId, value: &Value) -> Result<(), StateError> {
        self.tree.set_selected_features(id, value)
    }
}
