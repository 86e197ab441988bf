pub mod client;
pub mod ffi;
pub mod model;
pub mod search;

pub use client::{Category, ClientError, Endpoint, MealDbClient};
pub use model::*;
pub use search::search;

uniffi::setup_scaffolding!();
