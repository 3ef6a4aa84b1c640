// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for configuration loading and tree building.

use thiserror::Error;

/// A value could not be coerced to the expected primitive type.
///
/// Project configurations in the wild encode booleans and numbers loosely
/// (`"True"`, `"1"`, `1`, `true`, …); the coercion helpers accept those
/// spellings and reject everything else with this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The value is not a number and cannot be read as one.
    #[error("`{0}` is not a number")]
    NotANumber(String),
    /// The value is not one of the accepted boolean spellings.
    #[error("`{0}` is not an expected boolean")]
    NotABoolean(String),
}

/// Errors raised while loading configuration or building the descriptor tree.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A capability-advertised layer has no project-configuration entry.
    ///
    /// Every layer the service advertises must be described by the project;
    /// there is no silent skip.
    #[error("the WMS layer name `{0}` is unknown")]
    UnknownWmsLayerName(String),

    /// An extent array did not contain exactly 4 coordinates.
    #[error("an extent needs exactly 4 coordinates, got {0}")]
    InvalidExtentLength(usize),

    /// An extent coordinate was not a finite number.
    #[error("`{0}` is not a finite extent coordinate")]
    InvalidCoordinate(f64),

    /// A loose value failed to coerce to its expected type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A raw configuration object did not have the expected shape.
    #[error("invalid layer configuration: {0}")]
    InvalidLayerConfig(#[from] serde_json::Error),
}
