pub mod contacts;
pub use contacts::ContactService;

pub mod favorites;
pub use favorites::{AddFavoriteOutcome, FavoriteError, FavoritesService};

pub mod recipes;
pub use recipes::{RecipeError, RecipeService, SearchCriteria};
