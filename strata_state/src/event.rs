// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event vocabulary of the state tree.

use strata_events::BusEvent;

/// Subscription keys for [`MapEvent`], mirroring the dotted wire names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    /// A layer's derived visibility flipped.
    LayerVisibilityChanged,
    /// A group's derived visibility flipped.
    GroupVisibilityChanged,
    /// A layer's selected WMS style changed.
    LayerStyleChanged,
    /// A layer's symbology was assigned or cleared.
    LayerSymbologyChanged,
    /// A legend rule of a layer was toggled (layer scope).
    LayerSymbolCheckedChanged,
    /// A legend rule was toggled (rule scope).
    SymbolCheckedChanged,
}

impl MapEventKind {
    /// The dotted event name used by the wire protocol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LayerVisibilityChanged => "layer.visibility.changed",
            Self::GroupVisibilityChanged => "group.visibility.changed",
            Self::LayerStyleChanged => "layer.style.changed",
            Self::LayerSymbologyChanged => "layer.symbology.changed",
            Self::LayerSymbolCheckedChanged => "layer.symbol.checked.changed",
            Self::SymbolCheckedChanged => "symbol.checked.changed",
        }
    }
}

/// An event observed on the state tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    /// A layer's derived visibility flipped.
    LayerVisibilityChanged {
        /// Layer name.
        name: String,
        /// The new visibility.
        visibility: bool,
    },
    /// A group's derived visibility flipped.
    GroupVisibilityChanged {
        /// Group name.
        name: String,
        /// The new visibility.
        visibility: bool,
    },
    /// A layer's selected WMS style changed.
    LayerStyleChanged {
        /// Layer name.
        name: String,
        /// The newly selected style name.
        style: String,
    },
    /// A layer's symbology was assigned or cleared.
    LayerSymbologyChanged {
        /// Layer name.
        name: String,
    },
    /// A legend rule of a layer was toggled, observed at the layer and
    /// every ancestor.
    LayerSymbolCheckedChanged {
        /// Layer name.
        name: String,
        /// Rule title.
        title: String,
        /// Opaque rule key.
        rule_key: String,
        /// The new rule flag.
        checked: bool,
    },
    /// A legend rule was toggled, observed on the rule itself.
    SymbolCheckedChanged {
        /// Rule title.
        title: String,
        /// Opaque rule key.
        rule_key: String,
        /// The new rule flag.
        checked: bool,
    },
}

impl MapEvent {
    /// The name of the node the event concerns, when it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::LayerVisibilityChanged { name, .. }
            | Self::GroupVisibilityChanged { name, .. }
            | Self::LayerStyleChanged { name, .. }
            | Self::LayerSymbologyChanged { name }
            | Self::LayerSymbolCheckedChanged { name, .. } => Some(name),
            Self::SymbolCheckedChanged { .. } => None,
        }
    }
}

impl BusEvent for MapEvent {
    type Kind = MapEventKind;

    fn kind(&self) -> MapEventKind {
        match self {
            Self::LayerVisibilityChanged { .. } => MapEventKind::LayerVisibilityChanged,
            Self::GroupVisibilityChanged { .. } => MapEventKind::GroupVisibilityChanged,
            Self::LayerStyleChanged { .. } => MapEventKind::LayerStyleChanged,
            Self::LayerSymbologyChanged { .. } => MapEventKind::LayerSymbologyChanged,
            Self::LayerSymbolCheckedChanged { .. } => MapEventKind::LayerSymbolCheckedChanged,
            Self::SymbolCheckedChanged { .. } => MapEventKind::SymbolCheckedChanged,
        }
    }
}
