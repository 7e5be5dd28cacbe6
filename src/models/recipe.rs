use serde::{Deserialize, Serialize};

/// A normalized recipe returned by a search. Never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeResult {
    pub title: String,
    pub image: String,
    pub url: String,
    pub ingredients: Vec<String>,
}

/// A saved recipe, one row of `favorites.csv`. `title` is unique within the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecipe {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Ingredients", with = "ingredient_list")]
    pub ingredients: Vec<String>,
}

impl From<RecipeResult> for FavoriteRecipe {
    fn from(recipe: RecipeResult) -> Self {
        Self {
            title: recipe.title,
            image: recipe.image,
            url: recipe.url,
            ingredients: recipe.ingredients,
        }
    }
}

/// The ingredient list lives in a single CSV cell as a JSON array.
mod ingredient_list {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded =
            serde_json::to_string(items).map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| D::Error::custom(format!("invalid ingredient list {raw:?}: {e}")))
    }
}
