//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Complex types are converted to simpler representations suitable for FFI.

use crate::client::{Category, ClientError, MealDbClient};
use crate::model::{Ingredient, Meal};
use crate::search::search as search_internal;
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum MealDbError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },
}

impl From<ClientError> for MealDbError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::InvalidUrl(e) => MealDbError::InvalidUrl {
                message: e.to_string(),
            },
            ClientError::Request(e) => MealDbError::Network {
                message: e.to_string(),
            },
            ClientError::Decode(e) => MealDbError::Decode {
                message: e.to_string(),
            },
            ClientError::NotFound(id) => MealDbError::NotFound {
                message: format!("No meal found for id {}", id),
            },
        }
    }
}

/// FFI-safe representation of a recipe ingredient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredient {
    /// Stable identifier derived from the raw name and measurement
    pub id: String,
    /// Display name
    pub name: String,
    /// Quantity text as served by the API
    pub measurement: String,
}

impl From<Ingredient> for FfiIngredient {
    fn from(ingredient: Ingredient) -> Self {
        FfiIngredient {
            id: ingredient.id,
            name: ingredient.name,
            measurement: ingredient.measurement,
        }
    }
}

impl From<FfiIngredient> for Ingredient {
    fn from(ingredient: FfiIngredient) -> Self {
        // The id is carried over rather than re-derived so a record that
        // crosses the boundary twice stays identical.
        Ingredient {
            id: ingredient.id,
            name: ingredient.name,
            measurement: ingredient.measurement,
        }
    }
}

/// FFI-safe representation of a meal.
///
/// This is the main type for representing meals across the FFI boundary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMeal {
    /// Numeric meal identifier
    pub id: i64,
    /// Meal name
    pub name: String,
    /// Category name if present
    pub category: Option<String>,
    /// Area of origin if present
    pub area: Option<String>,
    /// Preparation instructions if present
    pub instructions: Option<String>,
    /// Thumbnail image URL if present
    pub thumbnail_url: Option<String>,
    /// YouTube video URL if present
    pub youtube_url: Option<String>,
    /// Source attribution URL if present
    pub source_url: Option<String>,
    /// List of tags, empty when the meal has none
    pub tags: Vec<String>,
    /// Normalized ingredient list, empty for listing rows
    pub ingredients: Vec<FfiIngredient>,
    /// True if this is the loading placeholder rather than real data
    pub is_placeholder: bool,
    /// Combined text used for local search matching
    pub search_text: String,
}

impl From<Meal> for FfiMeal {
    fn from(meal: Meal) -> Self {
        let is_placeholder = meal.is_placeholder();
        let search_text = meal.search_text();

        FfiMeal {
            id: meal.id,
            name: meal.name,
            category: meal.category,
            area: meal.area,
            instructions: meal.instructions,
            thumbnail_url: meal.thumbnail_url,
            youtube_url: meal.youtube_url,
            source_url: meal.source_url,
            tags: meal.tags.unwrap_or_default(),
            ingredients: meal
                .ingredients
                .unwrap_or_default()
                .into_iter()
                .map(FfiIngredient::from)
                .collect(),
            is_placeholder,
            search_text,
        }
    }
}

impl From<FfiMeal> for Meal {
    fn from(meal: FfiMeal) -> Self {
        // Empty collections collapse back to None; the derived fields
        // (is_placeholder, search_text) are recomputed on demand.
        let tags = if meal.tags.is_empty() {
            None
        } else {
            Some(meal.tags)
        };
        let ingredients = if meal.ingredients.is_empty() {
            None
        } else {
            Some(
                meal.ingredients
                    .into_iter()
                    .map(Ingredient::from)
                    .collect(),
            )
        };

        Meal {
            id: meal.id,
            name: meal.name,
            category: meal.category,
            area: meal.area,
            instructions: meal.instructions,
            thumbnail_url: meal.thumbnail_url,
            youtube_url: meal.youtube_url,
            source_url: meal.source_url,
            tags,
            ingredients,
        }
    }
}

/// FFI-safe meal category selector.
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiCategory {
    Beef,
    Breakfast,
    Chicken,
    Dessert,
    Goat,
    Lamb,
    Miscellaneous,
    Pasta,
    Pork,
    Seafood,
    Side,
    Starter,
    Vegan,
    Vegetarian,
}

impl From<FfiCategory> for Category {
    fn from(category: FfiCategory) -> Self {
        match category {
            FfiCategory::Beef => Category::Beef,
            FfiCategory::Breakfast => Category::Breakfast,
            FfiCategory::Chicken => Category::Chicken,
            FfiCategory::Dessert => Category::Dessert,
            FfiCategory::Goat => Category::Goat,
            FfiCategory::Lamb => Category::Lamb,
            FfiCategory::Miscellaneous => Category::Miscellaneous,
            FfiCategory::Pasta => Category::Pasta,
            FfiCategory::Pork => Category::Pork,
            FfiCategory::Seafood => Category::Seafood,
            FfiCategory::Side => Category::Side,
            FfiCategory::Starter => Category::Starter,
            FfiCategory::Vegan => Category::Vegan,
            FfiCategory::Vegetarian => Category::Vegetarian,
        }
    }
}

/// FFI-safe handle to the meal database client.
///
/// The handle owns the response cache, so foreign code should create one
/// client and share it rather than constructing a new one per request.
#[derive(uniffi::Object)]
pub struct FfiMealDbClient {
    inner: MealDbClient,
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiMealDbClient {
    /// Creates a client pointed at the production API.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(FfiMealDbClient {
            inner: MealDbClient::new(),
        })
    }

    /// Fetches the meals of a category from the network.
    pub async fn fetch_meals(&self, category: FfiCategory) -> Result<Vec<FfiMeal>, MealDbError> {
        let meals = self.inner.fetch_meals(category.into()).await?;
        Ok(meals.into_iter().map(FfiMeal::from).collect())
    }

    /// Fetches the full detail of a meal, consulting the cache first.
    pub async fn fetch_meal_details(&self, id: i64) -> Result<FfiMeal, MealDbError> {
        let meal = self.inner.fetch_meal_details(id).await?;
        Ok(meal.into())
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Searches a list of meals for a query string.
///
/// Matches against meal names, tags and ingredient names, and sorts the
/// results by relevance. An empty query returns the input unchanged.
///
/// # Arguments
/// * `meals` - The meals to search through
/// * `query` - Search query (can contain multiple space-separated terms)
///
/// # Returns
/// List of matching meals sorted by relevance.
#[uniffi::export]
pub fn search(meals: Vec<FfiMeal>, query: String) -> Vec<FfiMeal> {
    let meals: Vec<Meal> = meals.into_iter().map(Meal::from).collect();
    search_internal(&meals, &query)
        .into_iter()
        .map(FfiMeal::from)
        .collect()
}

/// Returns the placeholder meal shown while real data is loading.
#[uniffi::export]
pub fn placeholder_meal() -> FfiMeal {
    Meal::placeholder().into()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meal() -> Meal {
        let mut meal = Meal::new(52768, "Apple Frangipan Tart");
        meal.category = Some("Dessert".to_string());
        meal.area = Some("British".to_string());
        meal.tags = Some(vec!["Tart".to_string(), "Baking".to_string()]);
        meal.ingredients = Some(vec![
            Ingredient::new("digestive biscuits", "250g"),
            Ingredient::new("butter", "75g"),
        ]);
        meal
    }

    #[test]
    fn test_client_error_conversion() {
        let converted: MealDbError = ClientError::NotFound(42).into();
        assert!(matches!(converted, MealDbError::NotFound { .. }));
        assert!(converted.to_string().contains("42"));

        let decode_failure = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let converted: MealDbError = ClientError::Decode(decode_failure).into();
        assert!(matches!(converted, MealDbError::Decode { .. }));
    }

    #[test]
    fn test_meal_record_round_trip() {
        let meal = sample_meal();
        let record = FfiMeal::from(meal.clone());

        assert_eq!(record.id, 52768);
        assert_eq!(record.tags, vec!["Tart", "Baking"]);
        assert_eq!(record.ingredients.len(), 2);
        assert!(!record.is_placeholder);

        assert_eq!(Meal::from(record), meal);
    }

    #[test]
    fn test_meal_record_empty_collections_collapse() {
        let record = FfiMeal::from(Meal::new(1, "Plain"));
        assert!(record.tags.is_empty());
        assert!(record.ingredients.is_empty());

        let meal = Meal::from(record);
        assert_eq!(meal.tags, None);
        assert_eq!(meal.ingredients, None);
    }

    #[test]
    fn test_search_over_records() {
        let meals = vec![
            FfiMeal::from(sample_meal()),
            FfiMeal::from(Meal::new(1, "Beef Wellington")),
        ];

        let results = search(meals, "frangipan".to_string());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Apple Frangipan Tart");
    }

    #[test]
    fn test_placeholder_meal() {
        let placeholder = placeholder_meal();
        assert_eq!(placeholder.id, 5071998);
        assert!(placeholder.is_placeholder);
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
