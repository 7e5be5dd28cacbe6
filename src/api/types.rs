use serde::Deserialize;

/// Every field is optional so absence is reported as `MissingField`
/// instead of a generic form rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FavoriteForm {
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationForm {
    /// Comma separated, e.g. `egg, flour`.
    pub ingredients: Option<String>,
    pub query: Option<String>,
}
