//! Serde adapter that stores the profile picture as a Latin-1 string.
//!
//! Every byte maps to the code point of the same value, so arbitrary binary
//! content survives the trip through a JSON text field unchanged.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub fn decode(text: &str) -> Result<Vec<u8>, String> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| format!("character {:?} is outside Latin-1", c)))
        .collect()
}

pub fn serialize<S: Serializer>(
    picture: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match picture {
        Some(bytes) => serializer.serialize_some(&encode(bytes)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<u8>>, D::Error> {
    let text: Option<String> = Option::deserialize(deserializer)?;
    text.map(|t| decode(&t).map_err(D::Error::custom)).transpose()
}
