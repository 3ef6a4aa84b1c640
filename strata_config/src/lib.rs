// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Config: the immutable configuration model behind the layer tree.
//!
//! A WMS service advertises its layers through a capability document; a map
//! project describes how each of those layers should behave in the client
//! (display name, default visibility, image format, popups, …). This crate
//! merges the two into a validated, immutable tree of item descriptors that
//! the stateful layer tree (`strata_state`) is built from.
//!
//! Parsing the raw documents is out of scope: callers hand in plain
//! deserialized structures ([`WmsCapabilityLayer`], [`LayersConfig`]) and get
//! back a [`TreeItemConfig`] tree via [`build_layer_tree_config`].
//!
//! The merge is strict: every layer the capability advertises must be
//! described by the project configuration, otherwise the build fails with
//! [`ConfigError::UnknownWmsLayerName`] and produces nothing.
//!
//! Geometry uses [`kurbo`]: extents and bounding boxes are [`kurbo::Rect`]
//! values, validated at the seam from raw coordinate arrays.

mod capability;
mod convert;
mod error;
mod extent;
mod order;
mod project;
mod tree;

pub use capability::{WmsAttribution, WmsBoundingBox, WmsCapabilityLayer, WmsStyle};
pub use convert::{to_bool, to_f64};
pub use error::{ConfigError, ConversionError};
pub use extent::{AttributionConfig, BoundingBox, StyleConfig, extent_from_values};
pub use order::LayersOrder;
pub use project::{ExternalAccess, GeometryType, LayerConfig, LayersConfig};
pub use tree::{ItemType, TreeItemConfig, build_layer_tree_config};
