//! Typed, cached access to the remote meal database.
//!
//! This module provides the HTTP client for the two API operations the
//! library issues: listing the meals of a category and looking up the
//! full detail of a single meal. Detail responses are cached in memory
//! for the lifetime of the client, keyed by meal identifier.

use crate::model::Meal;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

/// Root of the free production API tier.
const MEALDB_API_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";

/// Errors that can occur when talking to the meal database.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No meal found for id {0}")]
    NotFound(i64),
}

/// The two operations the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Lists the meals of a category with minimal fields populated.
    List,
    /// Returns the full detail of a single meal by identifier.
    Lookup,
}

impl Endpoint {
    /// Returns the path of the endpoint relative to the API root.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::List => "filter.php",
            Endpoint::Lookup => "lookup.php",
        }
    }
}

/// Meal categories recognized by the list endpoint's `c` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
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

impl Category {
    /// Every category the upstream API currently serves, in its order.
    pub const ALL: [Category; 14] = [
        Category::Beef,
        Category::Breakfast,
        Category::Chicken,
        Category::Dessert,
        Category::Goat,
        Category::Lamb,
        Category::Miscellaneous,
        Category::Pasta,
        Category::Pork,
        Category::Seafood,
        Category::Side,
        Category::Starter,
        Category::Vegan,
        Category::Vegetarian,
    ];

    /// Returns the value sent as the `c` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            Category::Beef => "Beef",
            Category::Breakfast => "Breakfast",
            Category::Chicken => "Chicken",
            Category::Dessert => "Dessert",
            Category::Goat => "Goat",
            Category::Lamb => "Lamb",
            Category::Miscellaneous => "Miscellaneous",
            Category::Pasta => "Pasta",
            Category::Pork => "Pork",
            Category::Seafood => "Seafood",
            Category::Side => "Side",
            Category::Starter => "Starter",
            Category::Vegan => "Vegan",
            Category::Vegetarian => "Vegetarian",
        }
    }
}

/// Wire envelope of the list endpoint. The meal array is required; the
/// endpoint answering `{"meals": null}` is a schema mismatch.
#[derive(Debug, Deserialize)]
struct MealListResponse {
    meals: Vec<Meal>,
}

/// Wire envelope of the lookup endpoint. Unknown identifiers come back
/// as `{"meals": null}` rather than an HTTP error.
#[derive(Debug, Deserialize)]
struct MealLookupResponse {
    meals: Option<Vec<Meal>>,
}

/// Client for the remote meal database.
///
/// Listing never touches the cache; detail lookups consult it first and
/// populate it on success, so each identifier is fetched from the
/// network at most once per client. The cache lives as long as the
/// client and is never persisted.
///
/// The client is cheap to share behind an `Arc` and all operations take
/// `&self`, so any number of fetches may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use mealdb_client::{Category, MealDbClient};
///
/// # async fn run() -> Result<(), mealdb_client::ClientError> {
/// let client = MealDbClient::new();
///
/// let desserts = client.fetch_meals(Category::Dessert).await?;
/// let detail = client.fetch_meal_details(desserts[0].id).await?;
/// println!("{} has {} ingredients", detail.name,
///     detail.ingredients.as_ref().map_or(0, |list| list.len()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
    cache: RwLock<HashMap<i64, Meal>>,
}

impl Default for MealDbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MealDbClient {
    /// Creates a client pointed at the production API, with the
    /// transport's default timeout behavior.
    pub fn new() -> Self {
        Self::with_base_url(MEALDB_API_BASE_URL)
    }

    /// Creates a client pointed at an alternative API root, e.g. a local
    /// test server. A missing trailing slash is added.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        MealDbClient {
            http: reqwest::Client::new(),
            base_url,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetches the meals of a category from the list endpoint.
    ///
    /// List responses carry minimal fields (identifier, name,
    /// thumbnail); fetch the full detail per meal with
    /// [`fetch_meal_details`](Self::fetch_meal_details). Every call hits
    /// the network.
    ///
    /// # Arguments
    ///
    /// * `category` - The category to filter the listing by
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Request` when the transport fails or the
    /// server answers with a non-success status, and
    /// `ClientError::Decode` when the body does not match the expected
    /// envelope.
    #[instrument(skip(self))]
    pub async fn fetch_meals(&self, category: Category) -> Result<Vec<Meal>, ClientError> {
        let url = self.endpoint_url(Endpoint::List, &[("c", category.query_value())])?;
        debug!(%url, "fetching category listing");

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: MealListResponse = serde_json::from_str(&body)?;

        Ok(response.meals)
    }

    /// Fetches the full detail of a meal, consulting the cache first.
    ///
    /// A cache hit returns immediately without a network call. On a
    /// miss the lookup endpoint is queried and a successfully decoded
    /// meal is inserted into the cache before it is returned, so a
    /// request abandoned mid-flight caches nothing.
    ///
    /// # Arguments
    ///
    /// * `id` - The meal identifier to look up
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` when the server reports no meal
    /// for the identifier, plus the same `Request`/`Decode` failures as
    /// [`fetch_meals`](Self::fetch_meals).
    #[instrument(skip(self))]
    pub async fn fetch_meal_details(&self, id: i64) -> Result<Meal, ClientError> {
        if let Some(meal) = self.cached_meal(id).await {
            debug!(id, "returning cached meal detail");
            return Ok(meal);
        }

        let url = self.endpoint_url(Endpoint::Lookup, &[("i", &id.to_string())])?;
        debug!(%url, "fetching meal detail");

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: MealLookupResponse = serde_json::from_str(&body)?;
        let meal = response
            .meals
            .and_then(|meals| meals.into_iter().next())
            .ok_or(ClientError::NotFound(id))?;

        let mut cache = self.cache.write().await;
        cache.insert(meal.id, meal.clone());

        Ok(meal)
    }

    /// Builds the absolute URL for an endpoint and its query parameters.
    fn endpoint_url(
        &self,
        endpoint: Endpoint,
        parameters: &[(&str, &str)],
    ) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint.path()))?;
        url.query_pairs_mut().extend_pairs(parameters);
        Ok(url)
    }

    /// Looks up a previously fetched meal. The guard is released before
    /// the caller reaches any suspension point.
    async fn cached_meal(&self, id: i64) -> Option<Meal> {
        let cache = self.cache.read().await;
        cache.get(&id).cloned()
    }
}
