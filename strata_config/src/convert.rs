// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loose value coercions for project-configuration fields.
//!
//! Generators of project configurations disagree on how to spell scalars:
//! booleans arrive as `true`, `1`, `"True"`, `"yes"` or `""`, numbers arrive
//! as numbers or numeric strings. The helpers here normalize all accepted
//! spellings and reject the rest with a [`ConversionError`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ConversionError;

/// Coerces a JSON value to a number.
///
/// Accepts numbers and numeric strings.
pub fn to_f64(value: &Value) -> Result<f64, ConversionError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ConversionError::NotANumber(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ConversionError::NotANumber(s.clone())),
        other => Err(ConversionError::NotANumber(other.to_string())),
    }
}

/// Coerces a JSON value to a boolean.
///
/// Accepts `true`/`false`, `1`/`0`, the usual string spellings
/// (`"true"`, `"t"`, `"yes"`, `"y"`, `"1"`, `"false"`, `"f"`, `"no"`,
/// `"n"`, `"0"`, `""`, case-insensitive) and `null` (read as `false`).
pub fn to_bool(value: &Value) -> Result<bool, ConversionError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Ok(false),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(ConversionError::NotABoolean(n.to_string())),
        },
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "0" | "" => Ok(false),
            _ => Err(ConversionError::NotABoolean(s.clone())),
        },
        other => Err(ConversionError::NotABoolean(other.to_string())),
    }
}

/// Serde adapter for boolean fields with loose spellings.
pub(crate) fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    to_bool(&value).map_err(serde::de::Error::custom)
}

/// Serde adapter for numeric fields with loose spellings.
pub(crate) fn loose_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = to_f64(&value).map_err(serde::de::Error::custom)?;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "configuration counts are small non-negative integers"
    )]
    Ok(number.max(0.0) as u32)
}
