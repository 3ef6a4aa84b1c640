// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer draw-order index.
//!
//! Draw order is assigned by a collaborator; this type only consumes the
//! resulting `name -> z-order` mapping. Non-spatial layers and anything the
//! collaborator left out read as [`LayersOrder::UNORDERED`].

use hashbrown::HashMap;

/// Lookup from layer name to draw order.
#[derive(Debug, Clone, Default)]
pub struct LayersOrder {
    orders: HashMap<String, i32>,
}

impl LayersOrder {
    /// The order reported for layers without an assigned z-order.
    pub const UNORDERED: i32 = -1;

    /// Builds the index from `(name, order)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (String, i32)>) -> Self {
        Self {
            orders: entries.into_iter().collect(),
        }
    }

    /// The draw order of `name`, or [`Self::UNORDERED`].
    #[must_use]
    pub fn get(&self, name: &str) -> i32 {
        self.orders.get(name).copied().unwrap_or(Self::UNORDERED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_names_are_unordered() {
        let order = LayersOrder::new([("bus_stops".to_owned(), 3)]);
        assert_eq!(order.get("bus_stops"), 3);
        assert_eq!(order.get("stats"), LayersOrder::UNORDERED);
    }
}
