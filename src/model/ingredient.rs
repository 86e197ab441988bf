use serde::{Deserialize, Serialize};

/// A single ingredient of a meal, with its free-form measurement text.
///
/// The upstream API never assigns ingredients an identifier, so one is
/// derived at construction time from the raw name and measurement. The
/// display name is normalized independently of the identifier: underscores
/// become spaces and each whitespace-separated word is title-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    /// Derived identifier: raw name + measurement, lower-cased, with
    /// spaces replaced by underscores.
    pub id: String,
    /// Normalized display name.
    pub name: String,
    /// Free-form unit/quantity text, stored as received.
    pub measurement: String,
}

impl Ingredient {
    /// Builds an ingredient from the raw API values.
    ///
    /// The identifier is derived from the values as received, before any
    /// name normalization, so equal raw inputs always produce equal
    /// ingredients. Two ingredients with the same name but different
    /// measurements get distinct identifiers.
    pub fn new(name: &str, measurement: &str) -> Self {
        let id = format!("{name}{measurement}")
            .to_lowercase()
            .replace(' ', "_");

        Ingredient {
            id,
            name: title_case(&name.replace('_', " ")),
            measurement: measurement.to_string(),
        }
    }
}

/// Upper-cases the first character of each whitespace-separated word and
/// lower-cases the rest.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for ch in value.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            result.push(ch);
        } else if at_word_start {
            at_word_start = false;
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_lowercase());
        }
    }

    result
}
