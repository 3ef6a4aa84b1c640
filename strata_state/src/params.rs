// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! WMS request-parameter derivation.
//!
//! The parameter map is a pure function of the current layer state and is
//! rebuilt on every read; nothing here is cached. Keys follow the WMS
//! request vocabulary (`LAYERS`, `STYLES`, `FORMAT`, `DPI`, `SELECTION`,
//! `SELECTIONTOKEN`, `FILTER`, `FILTERTOKEN`, `LEGEND_ON`, `LEGEND_OFF`).

use serde_json::{Map, Value, json};
use strata_legend::Symbology;

use crate::node::NodeId;
use crate::tree::MapTree;

/// The display resolution sent with every request.
pub const DEFAULT_DPI: u32 = 96;

impl MapTree {
    /// Derives the WMS request parameters of a layer.
    ///
    /// Always present: `LAYERS` (the WMS name), `STYLES` (the selected
    /// style), `FORMAT` (the configured image format, `image/png` when
    /// unset) and `DPI`. Selection, filter and legend-rule state contribute
    /// their optional entries independently:
    ///
    /// - a non-empty id selection without a token adds
    ///   `SELECTION: "<wmsName>:<id1>,<id2>,…"`; an active token adds
    ///   `SELECTIONTOKEN` instead — ids are never serialized alongside a
    ///   token;
    /// - the filter pair behaves the same way with `FILTER` /
    ///   `FILTERTOKEN`;
    /// - legend rules add `LEGEND_ON` / `LEGEND_OFF` (comma-joined rule
    ///   keys) only while the checked rules form a proper, non-empty
    ///   subset.
    ///
    /// Returns `None` for groups, which are not requested directly.
    #[must_use]
    pub fn wms_parameters(&self, id: NodeId) -> Option<Map<String, Value>> {
        let core = self.node_core(id)?;
        let item = self.item(id);
        let wms_name = item.wms_name().unwrap_or_else(|| item.name()).to_owned();
        let format = self
            .layer_config(id)
            .and_then(|config| config.image_format.clone())
            .unwrap_or_else(|| "image/png".to_owned());

        let mut parameters = Map::new();
        parameters.insert("LAYERS".to_owned(), json!(wms_name));
        parameters.insert("STYLES".to_owned(), json!(core.selected_style));
        parameters.insert("FORMAT".to_owned(), json!(format));
        parameters.insert("DPI".to_owned(), json!(DEFAULT_DPI));

        if let Some(selection) = self.node_selection(id) {
            if let Some(token) = &selection.selection_token {
                parameters.insert("SELECTIONTOKEN".to_owned(), json!(token));
            } else if !selection.selected_features.is_empty() {
                let ids = selection.selected_features.join(",");
                parameters.insert("SELECTION".to_owned(), json!(format_scoped(&wms_name, &ids)));
            }
            if let Some(token) = &selection.filter_token {
                parameters.insert("FILTERTOKEN".to_owned(), json!(token));
            } else if let Some(expression) = &selection.expression_filter {
                parameters.insert(
                    "FILTER".to_owned(),
                    json!(format_scoped(&wms_name, expression)),
                );
            }
        }

        if let Some(Symbology::Symbols(symbols)) = &core.symbology {
            if let Some((on, off)) = symbols.legend_on_off() {
                parameters.insert("LEGEND_ON".to_owned(), json!(on));
                parameters.insert("LEGEND_OFF".to_owned(), json!(off));
            }
        }

        Some(parameters)
    }
}

fn format_scoped(wms_name: &str, payload: &str) -> String {
    format!("{wms_name}:{payload}")
}
