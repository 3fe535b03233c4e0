//! Lenient deserializers.
//!
//! Browsers send empty query parameters (`?category=`) and HTML forms post
//! numbers as strings (`"price": "9.99"`). These helpers normalise both.

use serde::de::{self, Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Treats a missing or empty (after trimming) string as `None`, otherwise
/// parses it with [`FromStr`].
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum FloatOrString {
    Number(f64),
    Text(String),
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Number(i64),
    Text(String),
}

fn parse_finite<E: de::Error>(text: &str) -> Result<f64, E> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| E::custom(format!("`{}` is not a number", text)))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(E::custom(format!("`{}` is not a finite number", text)))
    }
}

fn to_i32<E: de::Error>(value: i64) -> Result<i32, E> {
    i32::try_from(value).map_err(|_| E::custom(format!("{} is out of range", value)))
}

/// Accepts a JSON number or a numeric string.
pub fn number_from_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match FloatOrString::deserialize(deserializer)? {
        FloatOrString::Number(n) if n.is_finite() => Ok(n),
        FloatOrString::Number(n) => Err(de::Error::custom(format!("{} is not finite", n))),
        FloatOrString::Text(s) => parse_finite(&s),
    }
}

/// Optional variant of [`number_from_string`]; `null` and `""` are `None`.
pub fn optional_number_from_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FloatOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FloatOrString::Number(n)) if n.is_finite() => Ok(Some(n)),
        Some(FloatOrString::Number(n)) => Err(de::Error::custom(format!("{} is not finite", n))),
        Some(FloatOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(FloatOrString::Text(s)) => parse_finite(&s).map(Some),
    }
}

/// Accepts a JSON integer or an integer string.
pub fn integer_from_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Number(n) => to_i32(n),
        IntOrString::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("`{}` is not an integer", s)))
            .and_then(to_i32),
    }
}

/// Optional variant of [`integer_from_string`]; `null` and `""` are `None`.
pub fn optional_integer_from_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Number(n)) => to_i32(n).map(Some),
        Some(IntOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IntOrString::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("`{}` is not an integer", s)))
            .and_then(to_i32)
            .map(Some),
    }
}
