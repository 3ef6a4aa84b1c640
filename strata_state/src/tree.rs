// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The state tree and its mutation engine.

use serde_json::Value;
use strata_config::{
    ConfigError, ExternalAccess, GeometryType, ItemType, LayerConfig, LayersOrder, TreeItemConfig,
};
use strata_events::{Envelope, EventSequence, ListenerId, Registry};
use strata_legend::Symbology;

use crate::error::StateError;
use crate::event::{MapEvent, MapEventKind};
use crate::node::{LayerCore, LayerType, Node, NodeId, NodeKind, SelectionState};

/// The live layer tree.
///
/// Nodes are arena-allocated and addressed by [`NodeId`]; structure is fixed
/// at construction, only per-node state mutates. See the crate docs for the
/// checked/visibility model.
pub struct MapTree {
    nodes: Vec<Node>,
    seq: EventSequence,
}

impl core::fmt::Debug for MapTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MapTree")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl MapTree {
    /// Builds the state tree from a descriptor tree and the draw-order
    /// index.
    ///
    /// Every node starts with `checked` taken from its configuration entry
    /// (`toggled`); the synthetic root starts checked. Visibility is then
    /// derived top-down.
    #[must_use]
    pub fn new(config: &TreeItemConfig, order: &LayersOrder) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            seq: EventSequence::new(),
        };
        let root = tree.insert(config, None, order);
        tree.nodes[root.idx()].checked = true;
        tree.initialize_visibility(root, true);
        tree
    }

    fn insert(
        &mut self,
        item: &TreeItemConfig,
        parent: Option<NodeId>,
        order: &LayersOrder,
    ) -> NodeId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "layer trees stay far below u32::MAX nodes"
        )]
        let id = NodeId(self.nodes.len() as u32);
        let config = item.layer_config();
        let checked = config.map(|c| c.toggled).unwrap_or_default();
        let (kind, layer_order) = match item.item_type() {
            ItemType::Group => (
                NodeKind::Group {
                    mutually_exclusive: item.mutually_exclusive(),
                },
                LayersOrder::UNORDERED,
            ),
            ItemType::Layer => {
                let kind = if config.is_some_and(|c| c.geometry_type.is_some()) {
                    NodeKind::Vector {
                        core: LayerCore::new(item),
                        selection: SelectionState::default(),
                    }
                } else {
                    NodeKind::Raster {
                        core: LayerCore::new(item),
                        external_access: config.and_then(|c| c.external_access.clone()),
                    }
                };
                (kind, order.get(item.name()))
            }
        };
        self.nodes.push(Node {
            item: item.detached(),
            parent,
            children: smallvec::SmallVec::new(),
            checked,
            visibility: false,
            layer_order,
            kind,
            registry: Registry::new(),
        });
        for child in item.children() {
            let child_id = self.insert(child, Some(id), order);
            self.nodes[id.idx()].children.push(child_id);
        }
        id
    }

    fn initialize_visibility(&mut self, id: NodeId, parent_visibility: bool) {
        let node = &self.nodes[id.idx()];
        let visibility = if node.is_non_spatial() {
            false
        } else {
            node.checked && parent_visibility
        };
        self.nodes[id.idx()].visibility = visibility;
        let children = self.nodes[id.idx()].children.clone();
        for child in children {
            self.initialize_visibility(child, visibility);
        }
    }

    // ------------------------------------------------------------------
    // Structure and descriptor access
    // ------------------------------------------------------------------

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    pub(crate) fn node_core(&self, id: NodeId) -> Option<&LayerCore> {
        self.node(id).core()
    }

    pub(crate) fn node_selection(&self, id: NodeId) -> Option<&SelectionState> {
        self.node(id).selection()
    }

    /// The immutable descriptor of a node.
    #[must_use]
    pub fn item(&self, id: NodeId) -> &TreeItemConfig {
        &self.node(id).item
    }

    /// The project-configuration entry; `None` only on the root.
    #[must_use]
    pub fn layer_config(&self, id: NodeId) -> Option<&LayerConfig> {
        self.node(id).item.layer_config()
    }

    /// The node name.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).item.name()
    }

    /// The parent id; `None` on the root. Lookup-only back reference.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Ordered children ids; empty for layers.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The configured stable id of the node, when it has one.
    #[must_use]
    pub fn config_id(&self, id: NodeId) -> Option<&str> {
        self.layer_config(id).and_then(|c| c.id.as_deref())
    }

    /// Vector or raster; `None` for groups.
    #[must_use]
    pub fn layer_type(&self, id: NodeId) -> Option<LayerType> {
        match self.node(id).kind {
            NodeKind::Group { .. } => None,
            NodeKind::Vector { .. } => Some(LayerType::Vector),
            NodeKind::Raster { .. } => Some(LayerType::Raster),
        }
    }

    /// The geometry kind of a vector layer.
    #[must_use]
    pub fn geometry_type(&self, id: NodeId) -> Option<GeometryType> {
        self.layer_config(id).and_then(|c| c.geometry_type)
    }

    /// `false` only for attribute-only vector layers.
    #[must_use]
    pub fn is_spatial(&self, id: NodeId) -> bool {
        !self.node(id).is_non_spatial()
    }

    /// The draw order assigned by the order index;
    /// [`LayersOrder::UNORDERED`] for groups and unordered layers.
    #[must_use]
    pub fn layer_order(&self, id: NodeId) -> i32 {
        self.node(id).layer_order
    }

    /// The configured layer extent, when one is declared.
    pub fn extent(&self, id: NodeId) -> Result<Option<kurbo::Rect>, ConfigError> {
        match self.layer_config(id) {
            Some(config) => config.layer_extent(),
            None => Ok(None),
        }
    }

    /// The configured CRS of the layer data.
    #[must_use]
    pub fn crs(&self, id: NodeId) -> Option<&str> {
        self.layer_config(id).and_then(|c| c.crs.as_deref())
    }

    /// External access description of a raster served elsewhere.
    #[must_use]
    pub fn external_access(&self, id: NodeId) -> Option<&ExternalAccess> {
        match &self.node(id).kind {
            NodeKind::Raster {
                external_access, ..
            } => external_access.as_ref(),
            _ => None,
        }
    }

    /// Whether a group admits at most one visible child.
    #[must_use]
    pub fn mutually_exclusive(&self, id: NodeId) -> bool {
        matches!(
            self.node(id).kind,
            NodeKind::Group {
                mutually_exclusive: true
            }
        )
    }

    /// Collects the names of every descendant layer, in tree order.
    #[must_use]
    pub fn find_layer_names(&self, id: NodeId) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_layer_names(id, &mut names);
        names
    }

    fn collect_layer_names(&self, id: NodeId, names: &mut Vec<String>) {
        for &child in self.children(id) {
            if self.node(child).is_group() {
                self.collect_layer_names(child, names);
            } else {
                names.push(self.name(child).to_owned());
            }
        }
    }

    // ------------------------------------------------------------------
    // Checked / visibility
    // ------------------------------------------------------------------

    /// The user-intended on/off state.
    #[must_use]
    pub fn checked(&self, id: NodeId) -> bool {
        self.node(id).checked
    }

    /// The derived on-screen state: checked, with every ancestor checked.
    #[must_use]
    pub fn visibility(&self, id: NodeId) -> bool {
        self.node(id).visibility
    }

    /// Writes the checked flag and propagates.
    ///
    /// Writing the current value back is a complete no-op. An actual change
    /// re-derives visibility over the affected subtree and emits a
    /// visibility event for every flip, descendants before ancestors,
    /// bubbled through every ancestor registry.
    ///
    /// Checking a node also re-checks its unchecked ancestors, and inside a
    /// mutually-exclusive group turns every checked sibling off first.
    /// Attribute-only vector layers update their flag and nothing else.
    pub fn set_checked(&mut self, id: NodeId, value: bool) {
        if self.nodes[id.idx()].checked == value {
            return;
        }
        self.nodes[id.idx()].checked = value;
        #[cfg(feature = "tracing")]
        tracing::debug!(name = self.name(id), value, "checked changed");
        if self.nodes[id.idx()].is_non_spatial() {
            // No drawable representation: the flag is queryable but drives
            // no visibility and no events.
            return;
        }

        let mut recompute_root = id;
        if value {
            let mut current = id;
            while let Some(parent) = self.nodes[current.idx()].parent {
                if self.mutually_exclusive(parent) {
                    let siblings = self.nodes[parent.idx()].children.clone();
                    let mut changed = false;
                    for sibling in siblings {
                        if sibling != current && self.nodes[sibling.idx()].checked {
                            self.nodes[sibling.idx()].checked = false;
                            changed = true;
                        }
                    }
                    if changed {
                        recompute_root = parent;
                    }
                }
                if !self.nodes[parent.idx()].checked {
                    self.nodes[parent.idx()].checked = true;
                    recompute_root = parent;
                }
                current = parent;
            }
        }

        let parent_visibility = match self.nodes[recompute_root.idx()].parent {
            Some(parent) => self.nodes[parent.idx()].visibility,
            None => true,
        };
        let mut events = Vec::new();
        self.recompute_visibility(recompute_root, parent_visibility, &mut events);
        for (origin, event) in events {
            let envelope = self.stamp(event);
            self.dispatch(origin, &envelope);
        }
    }

    /// Re-derives visibility over a subtree.
    ///
    /// New values flow top-down (`checked && parent visibility`); flip
    /// events are recorded in post-order so descendants precede the node
    /// that caused the change.
    fn recompute_visibility(
        &mut self,
        id: NodeId,
        parent_visibility: bool,
        events: &mut Vec<(NodeId, MapEvent)>,
    ) {
        let node = &self.nodes[id.idx()];
        let visibility = if node.is_non_spatial() {
            false
        } else {
            node.checked && parent_visibility
        };
        let flipped = visibility != node.visibility;
        self.nodes[id.idx()].visibility = visibility;

        let children = self.nodes[id.idx()].children.clone();
        for child in children {
            self.recompute_visibility(child, visibility, events);
        }

        if flipped {
            let name = self.name(id).to_owned();
            let event = if self.node(id).is_group() {
                MapEvent::GroupVisibilityChanged { name, visibility }
            } else {
                MapEvent::LayerVisibilityChanged { name, visibility }
            };
            events.push((id, event));
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Registers a listener on a node for one event kind.
    ///
    /// Listeners run synchronously, in registration order, during the
    /// mutation that produced the event.
    pub fn add_listener(
        &mut self,
        id: NodeId,
        kind: MapEventKind,
        callback: Box<dyn FnMut(&MapEvent)>,
    ) -> ListenerId {
        self.nodes[id.idx()].registry.add_listener(kind, callback)
    }

    /// Removes a listener previously registered on `id`.
    pub fn remove_listener(&mut self, id: NodeId, listener: ListenerId) -> bool {
        self.nodes[id.idx()].registry.remove_listener(listener)
    }

    /// Wraps an event with a fresh sequence number, ready to dispatch.
    pub fn stamp(&mut self, event: MapEvent) -> Envelope<MapEvent> {
        Envelope::stamp(&mut self.seq, event)
    }

    /// Delivers an envelope at `origin` and bubbles it to every ancestor.
    ///
    /// Registries that already saw the envelope ignore it, so re-dispatching
    /// an already-propagated event is a no-op at every level.
    pub fn dispatch(&mut self, origin: NodeId, envelope: &Envelope<MapEvent>) {
        let mut cursor = Some(origin);
        while let Some(id) = cursor {
            cursor = self.nodes[id.idx()].parent;
            self.nodes[id.idx()].registry.notify(envelope);
        }
    }

    fn emit(&mut self, origin: NodeId, event: MapEvent) {
        let envelope = self.stamp(event);
        self.dispatch(origin, &envelope);
    }

    // ------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------

    /// The WMS style requests for this layer are made with.
    ///
    /// `None` for groups.
    #[must_use]
    pub fn selected_style(&self, id: NodeId) -> Option<&str> {
        self.node(id).core().map(|core| core.selected_style.as_str())
    }

    /// Selects a WMS style by name.
    ///
    /// Re-selecting the current style is a no-op. An unknown name fails
    /// with a type error naming the style and the layer; on an actual
    /// change a `layer.style.changed` event is emitted and bubbled.
    ///
    /// # Panics
    ///
    /// Panics when `id` is a group.
    pub fn set_selected_style(&mut self, id: NodeId, style: &str) -> Result<(), StateError> {
        let node = &self.nodes[id.idx()];
        let Some(core) = node.core() else {
            panic!("node `{}` is not a layer", node.item.name());
        };
        if core.selected_style == style {
            return Ok(());
        }
        if !node.item.wms_styles().iter().any(|s| s.name() == style) {
            return Err(StateError::UnknownStyleName {
                layer: node.item.name().to_owned(),
                style: style.to_owned(),
            });
        }
        let name = node.item.name().to_owned();
        if let Some(core) = self.nodes[id.idx()].core_mut() {
            core.selected_style = style.to_owned();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(name = name.as_str(), style, "selected style changed");
        self.emit(
            id,
            MapEvent::LayerStyleChanged {
                name,
                style: style.to_owned(),
            },
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection and filters (vector layers)
    // ------------------------------------------------------------------

    fn selection(&self, id: NodeId) -> &SelectionState {
        let node = self.node(id);
        match node.selection() {
            Some(selection) => selection,
            None => panic!("node `{}` is not a vector layer", node.item.name()),
        }
    }

    fn selection_mut(&mut self, id: NodeId) -> &mut SelectionState {
        let name = self.nodes[id.idx()].item.name().to_owned();
        match self.nodes[id.idx()].selection_mut() {
            Some(selection) => selection,
            None => panic!("node `{name}` is not a vector layer"),
        }
    }

    /// The selected feature ids, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics when `id` is not a vector layer, here and for the other
    /// selection/filter accessors.
    #[must_use]
    pub fn selected_features(&self, id: NodeId) -> &[String] {
        &self.selection(id).selected_features
    }

    /// `true` when at least one feature is selected.
    #[must_use]
    pub fn has_selected_features(&self, id: NodeId) -> bool {
        !self.selection(id).selected_features.is_empty()
    }

    /// The active selection token.
    #[must_use]
    pub fn selection_token(&self, id: NodeId) -> Option<&str> {
        self.selection(id).selection_token.as_deref()
    }

    /// The active attribute filter expression.
    #[must_use]
    pub fn expression_filter(&self, id: NodeId) -> Option<&str> {
        self.selection(id).expression_filter.as_deref()
    }

    /// The active filter token.
    #[must_use]
    pub fn filter_token(&self, id: NodeId) -> Option<&str> {
        self.selection(id).filter_token.as_deref()
    }

    /// `true` when a filter expression or filter token is active.
    #[must_use]
    pub fn is_filtered(&self, id: NodeId) -> bool {
        let selection = self.selection(id);
        selection.expression_filter.is_some() || selection.filter_token.is_some()
    }

    /// Replaces the selected feature ids.
    ///
    /// `null` clears the selection; an array of scalar ids replaces it; any
    /// other value is a validation error and nothing changes. A successful
    /// write always clears the selection token.
    pub fn set_selected_features(&mut self, id: NodeId, value: &Value) -> Result<(), StateError> {
        let ids = match value {
            Value::Null => Vec::new(),
            Value::Array(_) => parse_feature_ids(value)?,
            _ => return Err(StateError::InvalidSelectionIds),
        };
        let selection = self.selection_mut(id);
        selection.selected_features = ids;
        selection.selection_token = None;
        Ok(())
    }

    /// Updates the selection token.
    ///
    /// `null` clears the token without touching the ids; a string sets it
    /// directly; an object must carry both `token` and `selectedFeatures`
    /// and replaces both fields atomically. Partial objects and other value
    /// types are validation errors and nothing changes.
    pub fn set_selection_token(&mut self, id: NodeId, value: &Value) -> Result<(), StateError> {
        match value {
            Value::Null => {
                self.selection_mut(id).selection_token = None;
            }
            Value::String(token) => {
                self.selection_mut(id).selection_token = Some(token.clone());
            }
            Value::Object(object) => {
                let token = object.get("token").and_then(Value::as_str);
                let features = object.get("selectedFeatures").filter(|v| v.is_array());
                let (Some(token), Some(features)) = (token, features) else {
                    return Err(StateError::IncompleteSelectionToken);
                };
                let ids = parse_feature_ids(features)?;
                let selection = self.selection_mut(id);
                selection.selected_features = ids;
                selection.selection_token = Some(token.to_owned());
            }
            _ => return Err(StateError::InvalidSelectionToken),
        }
        Ok(())
    }

    /// Replaces the attribute filter expression.
    ///
    /// `null` clears it; a string replaces it; any other value is a
    /// validation error and nothing changes. A successful write always
    /// clears the filter token.
    pub fn set_expression_filter(&mut self, id: NodeId, value: &Value) -> Result<(), StateError> {
        let expression = match value {
            Value::Null => None,
            Value::String(expression) => Some(expression.clone()),
            _ => return Err(StateError::InvalidExpressionFilter),
        };
        let selection = self.selection_mut(id);
        selection.expression_filter = expression;
        selection.filter_token = None;
        Ok(())
    }

    /// Updates the filter token.
    ///
    /// Same contract as [`Self::set_selection_token`], with
    /// `expressionFilter` as the object-form companion field.
    pub fn set_filter_token(&mut self, id: NodeId, value: &Value) -> Result<(), StateError> {
        match value {
            Value::Null => {
                self.selection_mut(id).filter_token = None;
            }
            Value::String(token) => {
                self.selection_mut(id).filter_token = Some(token.clone());
            }
            Value::Object(object) => {
                let token = object.get("token").and_then(Value::as_str);
                let expression = object.get("expressionFilter").and_then(Value::as_str);
                let (Some(token), Some(expression)) = (token, expression) else {
                    return Err(StateError::IncompleteFilterToken);
                };
                let selection = self.selection_mut(id);
                selection.expression_filter = Some(expression.to_owned());
                selection.filter_token = Some(token.to_owned());
            }
            _ => return Err(StateError::InvalidFilterToken),
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Symbology
    // ------------------------------------------------------------------

    /// The attached legend model, if any.
    #[must_use]
    pub fn symbology(&self, id: NodeId) -> Option<&Symbology> {
        self.node(id).core().and_then(|core| core.symbology.as_ref())
    }

    /// Attaches (or, with `null`, clears) the layer's legend model.
    ///
    /// Emits `layer.symbology.changed` at the layer, bubbled to every
    /// ancestor.
    ///
    /// # Panics
    ///
    /// Panics when `id` is a group.
    pub fn set_symbology(&mut self, id: NodeId, raw: &Value) -> Result<(), StateError> {
        let name = {
            let node = &self.nodes[id.idx()];
            if node.core().is_none() {
                panic!("node `{}` is not a layer", node.item.name());
            }
            node.item.name().to_owned()
        };
        let (symbology, registries) = if raw.is_null() {
            (None, Vec::new())
        } else {
            let symbology = Symbology::from_value(raw)?;
            let rules = symbology.children_count();
            (
                Some(symbology),
                (0..rules).map(|_| Registry::new()).collect(),
            )
        };
        if let Some(core) = self.nodes[id.idx()].core_mut() {
            core.symbology = symbology;
            core.symbol_registries = registries;
        }
        self.emit(id, MapEvent::LayerSymbologyChanged { name });
        Ok(())
    }

    /// Toggles one legend rule of the layer's rule-based symbology.
    ///
    /// Writing the current value is a no-op. An actual change emits the
    /// same payload at three scopes: `symbol.checked.changed` on the rule's
    /// own registry, then `layer.symbol.checked.changed` at the layer,
    /// bubbled to every ancestor. The layer's `LEGEND_ON`/`LEGEND_OFF`
    /// parameters re-derive on the next read.
    pub fn set_symbol_checked(
        &mut self,
        id: NodeId,
        index: usize,
        checked: bool,
    ) -> Result<(), StateError> {
        let name = self.nodes[id.idx()].item.name().to_owned();
        let unknown_rule = || StateError::UnknownRule {
            layer: name.clone(),
            index,
        };
        let Some(core) = self.nodes[id.idx()].core_mut() else {
            return Err(unknown_rule());
        };
        let Some(Symbology::Symbols(symbols)) = core.symbology.as_mut() else {
            return Err(unknown_rule());
        };
        let Some(rule) = symbols.child_mut(index) else {
            return Err(unknown_rule());
        };
        if !rule.set_checked(checked) {
            return Ok(());
        }
        let title = rule.title().to_owned();
        let rule_key = rule.rule_key().to_owned();

        let rule_event = self.stamp(MapEvent::SymbolCheckedChanged {
            title: title.clone(),
            rule_key: rule_key.clone(),
            checked,
        });
        if let Some(core) = self.nodes[id.idx()].core_mut() {
            core.symbol_registries[index].notify(&rule_event);
        }
        self.emit(
            id,
            MapEvent::LayerSymbolCheckedChanged {
                name,
                title,
                rule_key,
                checked,
            },
        );
        Ok(())
    }

    /// Registers a listener on one legend rule of the layer.
    pub fn add_symbol_listener(
        &mut self,
        id: NodeId,
        index: usize,
        kind: MapEventKind,
        callback: Box<dyn FnMut(&MapEvent)>,
    ) -> Result<ListenerId, StateError> {
        let name = self.nodes[id.idx()].item.name().to_owned();
        let registry = self
            .nodes[id.idx()]
            .core_mut()
            .and_then(|core| core.symbol_registries.get_mut(index));
        match registry {
            Some(registry) => Ok(registry.add_listener(kind, callback)),
            None => Err(StateError::UnknownRule { layer: name, index }),
        }
    }
}

fn parse_feature_ids(value: &Value) -> Result<Vec<String>, StateError> {
    let Value::Array(items) = value else {
        return Err(StateError::InvalidSelectionIds);
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(id) => Ok(id.clone()),
            Value::Number(id) => Ok(id.to_string()),
            _ => Err(StateError::InvalidSelectionIds),
        })
        .collect()
}
