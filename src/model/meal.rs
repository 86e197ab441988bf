use super::ingredient::Ingredient;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Number of numbered ingredient/measure slot pairs in the wire schema.
const MAX_INGREDIENT_SLOTS: usize = 20;

/// Identifier of the reserved placeholder meal.
const PLACEHOLDER_ID: i64 = 5071998;

/// Name of the reserved placeholder meal.
const PLACEHOLDER_NAME: &str = "Placeholder";

/// A recipe entity returned by the upstream database.
///
/// The upstream wire format is a flat object: the identifier arrives as a
/// string, tags as one comma-separated string, and ingredients as up to
/// twenty numbered name/measure field pairs. Decoding normalizes all of
/// that into this structure; encoding maps it back.
///
/// A meal is either a placeholder (skeleton rows shown while loading), a
/// partial entity from the list endpoint (id and name, little else), or a
/// fully populated entity from the lookup endpoint.
///
/// # Examples
///
/// ```
/// use mealdb_client::Meal;
///
/// let meal: Meal = serde_json::from_str(
///     r#"{"idMeal": "52768", "strMeal": "Apple Frangipan Tart"}"#,
/// )?;
/// assert_eq!(meal.id, 52768);
/// assert_eq!(meal.name, "Apple Frangipan Tart");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Meal {
    /// Upstream identifier, parsed from the wire format's string field.
    pub id: i64,
    /// Display name of the meal.
    pub name: String,
    /// Category name, e.g. "Dessert".
    pub category: Option<String>,
    /// Area/cuisine name, e.g. "British".
    pub area: Option<String>,
    /// Free-text cooking instructions.
    pub instructions: Option<String>,
    /// URL of the meal's thumbnail image.
    pub thumbnail_url: Option<String>,
    /// Tags, split from the wire format's comma-separated field.
    pub tags: Option<Vec<String>>,
    /// URL of an accompanying video.
    pub youtube_url: Option<String>,
    /// Attribution URL for the recipe's source.
    pub source_url: Option<String>,
    /// Deduplicated ingredients, sorted by name for stable ordering.
    pub ingredients: Option<Vec<Ingredient>>,
}

impl Meal {
    /// Creates a partial meal carrying only an identifier and a name,
    /// the shape the list endpoint returns.
    pub fn new(id: i64, name: &str) -> Self {
        Meal {
            id,
            name: name.to_string(),
            category: None,
            area: None,
            instructions: None,
            thumbnail_url: None,
            tags: None,
            youtube_url: None,
            source_url: None,
            ingredients: None,
        }
    }

    /// Returns the reserved sentinel meal used for skeleton/loading rows.
    pub fn placeholder() -> Self {
        Meal::new(PLACEHOLDER_ID, PLACEHOLDER_NAME)
    }

    /// Returns true if this meal is the loading placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }

    /// Builds the composite text that substring search runs against:
    /// the name, the tags and the ingredient names, space-joined.
    ///
    /// Case is preserved; callers are expected to lower-case both sides
    /// when matching.
    pub fn search_text(&self) -> String {
        let mut text = self.name.clone();

        if let Some(tags) = &self.tags {
            for tag in tags {
                text.push(' ');
                text.push_str(tag);
            }
        }

        if let Some(ingredients) = &self.ingredients {
            for ingredient in ingredients {
                text.push(' ');
                text.push_str(&ingredient.name);
            }
        }

        text
    }
}

impl<'de> Deserialize<'de> for Meal {
    /// Decodes a meal from the flat wire object.
    ///
    /// The identifier must parse as an integer and the name must be
    /// present; everything else is optional, with JSON `null` treated the
    /// same as an absent key. Ingredient slots are walked 1..=20 and a
    /// slot is kept only when both its name and measure are non-empty
    /// after trimming.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Map<String, Value> = Map::deserialize(deserializer)?;

        let id_text = required_string::<D::Error>(&raw, "idMeal")?;
        let id = id_text.parse::<i64>().map_err(|_| {
            de::Error::custom(format!("meal identifier is not numeric: {id_text:?}"))
        })?;
        let name = required_string::<D::Error>(&raw, "strMeal")?;

        let tags = optional_string(&raw, "strTags")
            .map(|value| {
                value
                    .split(',')
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|tags| !tags.is_empty());

        let mut ingredients = Vec::new();
        for slot in 1..=MAX_INGREDIENT_SLOTS {
            let name = optional_string(&raw, &format!("strIngredient{slot}"));
            let measurement = optional_string(&raw, &format!("strMeasure{slot}"));
            let (name, measurement) = match (name, measurement) {
                (Some(name), Some(measurement)) => (name, measurement),
                _ => continue,
            };

            let name = name.trim();
            let measurement = measurement.trim();
            if name.is_empty() || measurement.is_empty() {
                continue;
            }

            ingredients.push(Ingredient::new(name, measurement));
        }
        sort_ingredients(&mut ingredients);
        ingredients.dedup();
        let ingredients = if ingredients.is_empty() {
            None
        } else {
            Some(ingredients)
        };

        Ok(Meal {
            id,
            name,
            category: optional_string(&raw, "strCategory"),
            area: optional_string(&raw, "strArea"),
            instructions: optional_string(&raw, "strInstructions"),
            thumbnail_url: optional_string(&raw, "strMealThumb"),
            tags,
            youtube_url: optional_string(&raw, "strYoutube"),
            source_url: optional_string(&raw, "strSource"),
            ingredients,
        })
    }
}

impl Serialize for Meal {
    /// Encodes a meal back into the flat wire object.
    ///
    /// The identifier is written in its string form and tags are
    /// re-joined with commas, so a decoded meal re-encodes to the shape
    /// it came from. Optional fields are written only when present.
    /// Ingredients are re-expanded into numbered slots in stored order;
    /// entries past slot 20 do not fit the schema and are dropped.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut raw = Map::new();
        raw.insert("idMeal".to_string(), Value::String(self.id.to_string()));
        raw.insert("strMeal".to_string(), Value::String(self.name.clone()));

        insert_optional(&mut raw, "strCategory", &self.category);
        insert_optional(&mut raw, "strArea", &self.area);
        insert_optional(&mut raw, "strInstructions", &self.instructions);
        insert_optional(&mut raw, "strMealThumb", &self.thumbnail_url);
        if let Some(tags) = &self.tags {
            raw.insert("strTags".to_string(), Value::String(tags.join(",")));
        }
        insert_optional(&mut raw, "strYoutube", &self.youtube_url);
        insert_optional(&mut raw, "strSource", &self.source_url);

        if let Some(ingredients) = &self.ingredients {
            for (index, ingredient) in ingredients.iter().take(MAX_INGREDIENT_SLOTS).enumerate() {
                let slot = index + 1;
                raw.insert(
                    format!("strIngredient{slot}"),
                    Value::String(ingredient.name.clone()),
                );
                raw.insert(
                    format!("strMeasure{slot}"),
                    Value::String(ingredient.measurement.clone()),
                );
            }
        }

        raw.serialize(serializer)
    }
}

/// Reads a field that the wire format always carries as a string.
fn required_string<E: de::Error>(raw: &Map<String, Value>, key: &'static str) -> Result<String, E> {
    match raw.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(E::custom(format!("field `{key}` is not a string"))),
        None => Err(E::missing_field(key)),
    }
}

/// Writes an optional string field; absent values write no key.
fn insert_optional(raw: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        raw.insert(key.to_string(), Value::String(value.clone()));
    }
}

/// Reads an optional string field; `null` and absent keys read the same.
fn optional_string(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Orders ingredients by name, byte-wise, with the measurement breaking
/// ties so equal entries end up adjacent for deduplication.
fn sort_ingredients(ingredients: &mut [Ingredient]) {
    ingredients.sort_unstable_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.measurement.cmp(&b.measurement))
    });
}
