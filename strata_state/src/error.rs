// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for state mutations and collection lookups.

use thiserror::Error;

/// Errors surfaced by the state tree.
///
/// Validation errors leave the previous state untouched; lookup errors name
/// the lookup kind and the offending key, with distinct wording per kind so
/// callers can report precisely.
#[derive(Debug, Error)]
pub enum StateError {
    /// A selected-features write that was neither `null` nor an array of
    /// scalar ids.
    #[error("selection ids could only be null or an array")]
    InvalidSelectionIds,

    /// A selection-token write that was neither `null`, a string, nor an
    /// object.
    #[error("selection token could only be null, a string or an object")]
    InvalidSelectionToken,

    /// An object-form selection token missing one of its two required
    /// properties.
    #[error("a selection token object needs both `token` and `selectedFeatures`")]
    IncompleteSelectionToken,

    /// An expression-filter write that was neither `null` nor a string.
    #[error("expression filter could only be null or a string")]
    InvalidExpressionFilter,

    /// A filter-token write that was neither `null`, a string, nor an
    /// object.
    #[error("expression filter token could only be null, a string or an object")]
    InvalidFilterToken,

    /// An object-form filter token missing one of its two required
    /// properties.
    #[error("a filter token object needs both `token` and `expressionFilter`")]
    IncompleteFilterToken,

    /// A legend description that could not be materialized.
    #[error(transparent)]
    InvalidSymbology(#[from] strata_legend::LegendError),

    /// A rule toggle addressed a rule the layer's symbology does not have.
    #[error("the layer `{layer}` has no legend rule at index {index}")]
    UnknownRule {
        /// The addressed layer.
        layer: String,
        /// The out-of-range rule index.
        index: usize,
    },

    /// A style assignment outside the layer's declared WMS styles.
    #[error("cannot assign an unknown WMS style name: `{style}` is not in the layer `{layer}` WMS styles")]
    UnknownStyleName {
        /// The addressed layer.
        layer: String,
        /// The rejected style name.
        style: String,
    },

    /// Layer lookup by name missed.
    #[error("the layer name `{0}` is unknown")]
    UnknownLayerName(String),

    /// Layer lookup by id missed.
    #[error("the layer id `{0}` is unknown")]
    UnknownLayerId(String),

    /// Layer lookup by WMS name missed.
    #[error("the layer WMS name `{0}` is unknown")]
    UnknownLayerWmsName(String),

    /// Group lookup by name missed.
    #[error("the group name `{0}` is unknown")]
    UnknownGroupName(String),

    /// Group lookup by id missed.
    #[error("the group id `{0}` is unknown")]
    UnknownGroupId(String),

    /// Group lookup by WMS name missed.
    #[error("the group WMS name `{0}` is unknown")]
    UnknownGroupWmsName(String),

    /// Lookup across layers and groups by name missed.
    #[error("the name `{0}` is unknown")]
    UnknownName(String),

    /// Lookup across layers and groups by WMS name missed.
    #[error("the WMS name `{0}` is unknown")]
    UnknownWmsName(String),
}
