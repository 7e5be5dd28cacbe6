pub mod contact;
pub mod recipe;

pub use contact::ContactMessage;
pub use recipe::{FavoriteRecipe, RecipeResult};
