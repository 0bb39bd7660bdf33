//! Lenient decoding of query-string parameters
//!
//! Browsers and scripts spell booleans in several ways (`true`, `True`,
//! `1`, `on`, `yes`), and a negative minimum capacity is a valid way to say
//! "any size". These helpers are used with `#[serde(deserialize_with)]` on
//! the search and allocation parameter types.

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};

/// Parse a boolean flag.
///
/// Accepts `true`/`false`, `1`/`0`, `on`/`off` and `yes`/`no` in any case,
/// as well as native booleans and 0/1 integers from self-describing formats.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

/// Parse a signed lower bound and clamp it into the `u32` range.
///
/// Negative values become 0, values past `u32::MAX` saturate.
pub fn lower_bound<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LowerBoundVisitor)
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean (true/false, 1/0, on/off, yes/no)")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Ok(true),
            "false" | "0" | "off" | "no" => Ok(false),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

struct LowerBoundVisitor;

impl LowerBoundVisitor {
    fn clamp(v: i64) -> u32 {
        u32::try_from(v.max(0)).unwrap_or(u32::MAX)
    }
}

impl<'de> Visitor<'de> for LowerBoundVisitor {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
        Ok(Self::clamp(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
        Ok(u32::try_from(v).unwrap_or(u32::MAX))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
        v.trim()
            .parse::<i64>()
            .map(Self::clamp)
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}
