pub mod spoonacular;
