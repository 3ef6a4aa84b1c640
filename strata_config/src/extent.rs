// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extents, bounding boxes, styles and attributions materialized from
//! capability fields.

use kurbo::Rect;

use crate::error::ConfigError;

/// Builds a [`Rect`] from a raw `west, south, east, north` coordinate array.
///
/// Fails with a validation error unless the array holds exactly 4 finite
/// numbers.
pub fn extent_from_values(values: &[f64]) -> Result<Rect, ConfigError> {
    if values.len() != 4 {
        return Err(ConfigError::InvalidExtentLength(values.len()));
    }
    for &value in values {
        if !value.is_finite() {
            return Err(ConfigError::InvalidCoordinate(value));
        }
    }
    Ok(Rect::new(values[0], values[1], values[2], values[3]))
}

/// A bounding box declared for one coordinate reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    /// CRS name, e.g. `EPSG:3857`.
    pub crs: String,
    /// The box in that CRS, as `x0/y0` = west/south and `x1/y1` = east/north.
    pub extent: Rect,
}

/// A WMS style a layer can be drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    name: String,
    title: Option<String>,
}

impl StyleConfig {
    pub(crate) fn new(name: String, title: Option<String>) -> Self {
        Self { name, title }
    }

    /// The WMS style name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The WMS style title, falling back to the name when the capability
    /// omits it.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// A layer attribution: who provides the data, and where to read more.
///
/// Only materialized when the capability carries both a title and an online
/// resource; a partial attribution is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionConfig {
    /// Human-readable attribution title.
    pub title: String,
    /// Link to the attribution resource.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_needs_exactly_four_coordinates() {
        assert!(extent_from_values(&[3.5, 43.5, 4.0]).is_err());
        assert!(extent_from_values(&[3.5, 43.5, 4.0, 43.7, 0.0]).is_err());

        let rect = extent_from_values(&[3.5, 43.5, 4.0, 43.7]).unwrap();
        assert_eq!(rect, Rect::new(3.5, 43.5, 4.0, 43.7));
    }

    #[test]
    fn extent_rejects_non_finite_coordinates() {
        assert!(extent_from_values(&[f64::NAN, 0.0, 1.0, 1.0]).is_err());
        assert!(extent_from_values(&[0.0, f64::INFINITY, 1.0, 1.0]).is_err());
    }

    #[test]
    fn style_title_falls_back_to_name() {
        let style = StyleConfig::new("default".into(), None);
        assert_eq!(style.title(), "default");
        let style = StyleConfig::new("black".into(), Some("Black lines".into()));
        assert_eq!(style.title(), "Black lines");
    }
}
