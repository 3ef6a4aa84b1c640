// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Legend: the rule-based legend model attached to a single layer.
//!
//! A WMS server describes a layer's legend either as one icon for the whole
//! layer, or as a categorized list of *rules*, each with its own icon, title
//! and opaque `ruleKey`. The two shapes behave completely differently and
//! share no mutable state, so the model is a sum type ([`Symbology`]) rather
//! than a hierarchy.
//!
//! Rule leaves carry an independent `checked` flag (default on). The owning
//! layer turns the flags into `LEGEND_ON` / `LEGEND_OFF` request parameters
//! via [`SymbolsSymbology::legend_on_off`]; this crate holds only the data
//! and the derivation, events live with the layer state.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Data-URI prefix for the PNG icons a legend description carries.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A raw legend description that did not have one of the two known shapes.
#[derive(Debug, Error)]
pub enum LegendError {
    /// Neither a single-icon nor a rule-container description.
    #[error("invalid legend description: {0}")]
    InvalidDescription(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLegend {
    Symbols {
        #[serde(default)]
        title: String,
        symbols: Vec<RawSymbol>,
    },
    Icon {
        #[serde(default)]
        title: String,
        icon: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawSymbol {
    #[serde(default)]
    icon: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "ruleKey")]
    rule_key: String,
    #[serde(default = "default_checked")]
    checked: bool,
}

fn default_checked() -> bool {
    true
}

/// The legend model of one layer: a single icon, or a rule container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbology {
    /// One icon stands for the whole layer.
    Icon(IconSymbology),
    /// A categorized legend with independently togglable rules.
    Symbols(SymbolsSymbology),
}

impl Symbology {
    /// Materializes a raw legend description.
    ///
    /// A description with a `symbols` list becomes a rule container; one
    /// with a bare `icon` becomes a single-icon node. Anything else is a
    /// validation error and nothing is materialized.
    pub fn from_value(raw: &Value) -> Result<Self, LegendError> {
        let raw: RawLegend = serde_json::from_value(raw.clone())?;
        Ok(match raw {
            RawLegend::Icon { title, icon } => Self::Icon(IconSymbology { title, icon }),
            RawLegend::Symbols { title, symbols } => Self::Symbols(SymbolsSymbology {
                title,
                symbols: symbols
                    .into_iter()
                    .map(|raw| SymbolIcon {
                        icon: raw.icon,
                        title: raw.title,
                        rule_key: raw.rule_key,
                        checked: raw.checked,
                    })
                    .collect(),
            }),
        })
    }

    /// The legend title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Icon(icon) => &icon.title,
            Self::Symbols(symbols) => &symbols.title,
        }
    }

    /// The rule leaves; empty for a single-icon legend.
    #[must_use]
    pub fn children(&self) -> &[SymbolIcon] {
        match self {
            Self::Icon(_) => &[],
            Self::Symbols(symbols) => symbols.children(),
        }
    }

    /// Number of rule leaves; 0 for a single-icon legend.
    #[must_use]
    pub fn children_count(&self) -> usize {
        self.children().len()
    }
}

/// A single-icon legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSymbology {
    title: String,
    icon: String,
}

impl IconSymbology {
    /// The icon as a displayable data URI.
    #[must_use]
    pub fn icon(&self) -> String {
        format!("{PNG_DATA_URI_PREFIX}{}", self.icon)
    }

    /// The legend title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A rule-container legend: an ordered list of togglable rule leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolsSymbology {
    title: String,
    symbols: Vec<SymbolIcon>,
}

impl SymbolsSymbology {
    /// The legend title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The ordered rule leaves.
    #[must_use]
    pub fn children(&self) -> &[SymbolIcon] {
        &self.symbols
    }

    /// Number of rule leaves.
    #[must_use]
    pub fn children_count(&self) -> usize {
        self.symbols.len()
    }

    /// Mutable access to one rule leaf.
    #[must_use]
    pub fn child_mut(&mut self, index: usize) -> Option<&mut SymbolIcon> {
        self.symbols.get_mut(index)
    }

    /// The `LEGEND_ON` / `LEGEND_OFF` contribution of the rule flags.
    ///
    /// Only a proper, non-empty subset of checked rules contributes; when
    /// every rule is checked (the default) or none is, both entries are
    /// omitted. Keys are comma-joined in rule order.
    #[must_use]
    pub fn legend_on_off(&self) -> Option<(String, String)> {
        let checked = self.symbols.iter().filter(|s| s.checked).count();
        if checked == 0 || checked == self.symbols.len() {
            return None;
        }
        let join = |on: bool| {
            self.symbols
                .iter()
                .filter(|s| s.checked == on)
                .map(SymbolIcon::rule_key)
                .collect::<Vec<_>>()
                .join(",")
        };
        Some((join(true), join(false)))
    }
}

/// One togglable rule of a categorized legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolIcon {
    icon: String,
    title: String,
    rule_key: String,
    checked: bool,
}

impl SymbolIcon {
    /// The rule icon as a displayable data URI.
    #[must_use]
    pub fn icon(&self) -> String {
        format!("{PNG_DATA_URI_PREFIX}{}", self.icon)
    }

    /// The rule title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The opaque server-issued rule key.
    #[must_use]
    pub fn rule_key(&self) -> &str {
        &self.rule_key
    }

    /// Whether the rule is drawn.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Sets the rule flag, returning `true` when the value changed.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        if self.checked == checked {
            return false;
        }
        self.checked = checked;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eight_rules() -> Symbology {
        let symbols: Vec<Value> = (0..8)
            .map(|key| {
                json!({
                    "icon": format!("icon-{key}"),
                    "title": format!("rule {key}"),
                    "ruleKey": key.to_string(),
                    "checked": true
                })
            })
            .collect();
        Symbology::from_value(&json!({
            "symbols": symbols,
            "title": "blocks",
            "type": "layer",
            "name": "blocks"
        }))
        .unwrap()
    }

    #[test]
    fn single_icon_description() {
        let symbology = Symbology::from_value(&json!({
            "icon": "iVBORw0KGgo=",
            "title": "districts",
            "type": "layer",
            "name": "districts"
        }))
        .unwrap();
        let Symbology::Icon(icon) = &symbology else {
            panic!("expected a single-icon legend");
        };
        assert_eq!(icon.title(), "districts");
        assert!(icon.icon().starts_with(PNG_DATA_URI_PREFIX));
        assert!(icon.icon().ends_with("iVBORw0KGgo="));
        assert_eq!(symbology.children_count(), 0);
    }

    #[test]
    fn rule_container_description() {
        let symbology = eight_rules();
        let Symbology::Symbols(symbols) = &symbology else {
            panic!("expected a rule container");
        };
        assert_eq!(symbols.children_count(), 8);
        assert_eq!(symbols.children()[0].rule_key(), "0");
        assert!(symbols.children().iter().all(SymbolIcon::checked));
    }

    #[test]
    fn checked_defaults_to_true() {
        let symbology = Symbology::from_value(&json!({
            "symbols": [{ "icon": "i", "title": "t", "ruleKey": "0" }],
            "title": "one"
        }))
        .unwrap();
        assert!(symbology.children()[0].checked());
    }

    #[test]
    fn malformed_description_fails() {
        assert!(Symbology::from_value(&json!({ "title": "no icon" })).is_err());
        assert!(Symbology::from_value(&json!(42)).is_err());
    }

    #[test]
    fn legend_on_off_needs_a_proper_subset() {
        let Symbology::Symbols(mut symbols) = eight_rules() else {
            unreachable!()
        };
        assert_eq!(symbols.legend_on_off(), None);

        for index in [0, 2, 4, 6] {
            symbols.child_mut(index).unwrap().set_checked(false);
        }
        let (on, off) = symbols.legend_on_off().unwrap();
        assert_eq!(on, "1,3,5,7");
        assert_eq!(off, "0,2,4,6");

        for index in 0..8 {
            symbols.child_mut(index).unwrap().set_checked(false);
        }
        assert_eq!(symbols.legend_on_off(), None);

        for index in 0..8 {
            symbols.child_mut(index).unwrap().set_checked(true);
        }
        assert_eq!(symbols.legend_on_off(), None);
    }
}
