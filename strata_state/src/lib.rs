// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata State: the live, mutable layer tree of a WMS map client.
//!
//! [`MapTree`] is built once from a descriptor tree (`strata_config`) plus a
//! draw-order index and then drives everything the client draws, queries and
//! legends:
//!
//! - **Checked vs. visibility.** `checked` is user intent and persists on
//!   its own; `visibility` is derived — a node is visible exactly when it is
//!   checked and every ancestor up to the root is checked. Writing the
//!   current value back is a complete no-op. Checking a node re-checks its
//!   unchecked ancestors; inside a mutually-exclusive group it also turns
//!   every checked sibling off first.
//! - **Events.** Every visibility flip emits `layer.visibility.changed` or
//!   `group.visibility.changed` at the node and bubbles it through every
//!   ancestor registry (`strata_events`), descendants before the group that
//!   caused the change, one event fully propagated before the next.
//! - **Request parameters.** Vector and raster layers derive their WMS
//!   request parameter map (`LAYERS`, `STYLES`, `FORMAT`, `DPI`, plus the
//!   optional `SELECTION`/`SELECTIONTOKEN`, `FILTER`/`FILTERTOKEN` and
//!   `LEGEND_ON`/`LEGEND_OFF` contributions) on demand from the current
//!   state.
//! - **Collection.** [`LayersAndGroupsCollection`] adds flat name / id /
//!   WMS-name lookups over a built tree and forwards its event registry to
//!   the root node.
//!
//! Nodes live in an arena owned by the tree; a [`NodeId`] is a plain index
//! handle, and a node's parent reference is the parent's id — ownership is
//! strictly tree-shaped, the parent link is lookup-only.
//!
//! All of it is single-threaded and synchronous: a mutation runs to
//! completion, listener callbacks included, before the call returns.
//! Listeners receive `&MapEvent` while the tree is exclusively borrowed, so
//! they cannot re-enter the engine they observe.

mod collection;
mod error;
mod event;
mod node;
mod params;
mod tree;

pub use collection::LayersAndGroupsCollection;
pub use error::StateError;
pub use event::{MapEvent, MapEventKind};
pub use node::{LayerType, NodeId};
pub use params::DEFAULT_DPI;
pub use tree::MapTree;
