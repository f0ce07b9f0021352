//! Lenient deserializers for input fields that may arrive as query strings.
//!
//! Path and query parameters are merged into the JSON input as strings, so
//! numeric and boolean filters accept either their JSON type or its text form.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOr<T> {
    Value(T),
    Text(String),
}

fn parse<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    match Option::<TextOr<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TextOr::Value(value)) => Ok(Some(value)),
        Some(TextOr::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(TextOr::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid value: {}", text))),
    }
}

pub fn opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    parse(deserializer)
}

pub fn opt_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    parse(deserializer)
}

pub fn opt_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    parse(deserializer)
}
