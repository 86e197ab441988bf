mod ingredient;
mod meal;

pub use ingredient::Ingredient;
pub use meal::Meal;
