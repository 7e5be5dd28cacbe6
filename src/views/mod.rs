//! Server-side HTML rendering.
//!
//! Static page bodies live in `templates/` and are embedded into the binary.
//! Lists are rendered here; every dynamic value is HTML-escaped.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use rust_embed::RustEmbed;
use thiserror::Error;

use crate::models::{FavoriteRecipe, RecipeResult};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template not found: {0}")]
    MissingTemplate(&'static str),

    #[error("Template {0} is not valid UTF-8")]
    Encoding(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    About,
    Contact,
    ContactSuccess,
}

impl Page {
    const fn file(self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::About => "about.html",
            Self::Contact => "contact.html",
            Self::ContactSuccess => "contact_success.html",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Index => "Home",
            Self::About => "About",
            Self::Contact => "Contact",
            Self::ContactSuccess => "Message sent",
        }
    }
}

fn template(name: &'static str) -> Result<String, ViewError> {
    let file = Templates::get(name).ok_or(ViewError::MissingTemplate(name))?;
    String::from_utf8(file.data.into_owned()).map_err(|_| ViewError::Encoding(name))
}

/// Wraps `content` (already HTML) in the shared layout.
pub fn layout(title: &str, content: &str) -> Result<String, ViewError> {
    Ok(template("layout.html")?
        .replace("{{title}}", &encode_text(title))
        .replace("{{content}}", content))
}

pub fn static_page(page: Page) -> Result<String, ViewError> {
    layout(page.title(), &template(page.file())?)
}

/// Only http(s) links are emitted as-is.
fn safe_url(url: &str) -> &str {
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        "#"
    }
}

/// Writes one complete `<li>` card; `actions` is appended inside it, after the link.
fn recipe_card(
    out: &mut String,
    title: &str,
    image: &str,
    url: &str,
    ingredients: &[String],
    actions: &str,
) {
    let _ = write!(out, r#"<li class="recipe"><h2>{}</h2>"#, encode_text(title));

    if !image.is_empty() {
        let _ = write!(
            out,
            r#"<img src="{}" alt="{}">"#,
            encode_double_quoted_attribute(safe_url(image)),
            encode_double_quoted_attribute(title)
        );
    }

    if !ingredients.is_empty() {
        out.push_str("<ul class=\"ingredients\">");
        for ingredient in ingredients {
            let _ = write!(out, "<li>{}</li>", encode_text(ingredient));
        }
        out.push_str("</ul>");
    }

    let _ = write!(
        out,
        r#"<a href="{}" target="_blank" rel="noopener">View recipe</a>"#,
        encode_double_quoted_attribute(safe_url(url))
    );
    out.push_str(actions);
    out.push_str("</li>");
}

pub fn favorites_page(favorites: &[FavoriteRecipe]) -> Result<String, ViewError> {
    let mut content = String::from("<h1>Favorites</h1>");

    if favorites.is_empty() {
        content.push_str(r#"<p class="empty">No favorites yet.</p>"#);
    } else {
        content.push_str(r#"<ul class="recipes">"#);
        for favorite in favorites {
            recipe_card(
                &mut content,
                &favorite.title,
                &favorite.image,
                &favorite.url,
                &favorite.ingredients,
                "",
            );
        }
        content.push_str("</ul>");
    }

    layout("Favorites", &content)
}

pub fn recommendations_page(results: &[RecipeResult]) -> Result<String, ViewError> {
    let mut content = String::from("<h1>Recommended recipes</h1><ul class=\"recipes\">");

    for recipe in results {
        let save_form = format!(
            r#"<form method="post" action="/add_favorite"><input type="hidden" name="title" value="{}"><button type="submit">Save to favorites</button></form>"#,
            encode_double_quoted_attribute(&recipe.title)
        );
        recipe_card(
            &mut content,
            &recipe.title,
            &recipe.image,
            &recipe.url,
            &recipe.ingredients,
            &save_form,
        );
    }
    content.push_str("</ul>");

    layout("Recommendations", &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_pages_render() {
        for page in [Page::Index, Page::About, Page::Contact, Page::ContactSuccess] {
            let html = static_page(page).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.contains(page.title()));
            assert!(!html.contains("{{content}}"));
        }
    }

    #[test]
    fn test_contact_form_has_fields() {
        let html = static_page(Page::Contact).unwrap();
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains(r#"name="email""#));
        assert!(html.contains(r#"name="message""#));
    }

    #[test]
    fn test_favorites_are_escaped() {
        let favorites = vec![FavoriteRecipe {
            title: "<script>alert(1)</script>".to_string(),
            image: "https://img.example/a.jpg".to_string(),
            url: "javascript:alert(1)".to_string(),
            ingredients: vec!["salt & pepper".to_string()],
        }];

        let html = favorites_page(&favorites).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("salt &amp; pepper"));
        assert!(!html.contains("javascript:"));
    }

    fn open_items(html: &str) -> usize {
        html.matches("<li>").count() + html.matches("<li class=").count()
    }

    #[test]
    fn test_cards_are_closed() {
        let favorite = FavoriteRecipe {
            title: "Toast".to_string(),
            image: String::new(),
            url: "https://example.com/t".to_string(),
            ingredients: vec!["bread".to_string()],
        };
        let html = favorites_page(&[favorite.clone(), favorite]).unwrap();
        assert_eq!(open_items(&html), html.matches("</li>").count());
        assert_eq!(html.matches(r#"<li class="recipe">"#).count(), 2);

        let result = RecipeResult {
            title: "Toast".to_string(),
            image: String::new(),
            url: "https://example.com/t".to_string(),
            ingredients: vec![],
        };
        let html = recommendations_page(&[result]).unwrap();
        assert!(html.contains("Save to favorites</button></form></li>"));
        assert_eq!(open_items(&html), html.matches("</li>").count());
    }

    #[test]
    fn test_empty_favorites_message() {
        let html = favorites_page(&[]).unwrap();
        assert!(html.contains("No favorites yet."));
    }

    #[test]
    fn test_recommendations_offer_save_button() {
        let results = vec![RecipeResult {
            title: "Mom's \"Best\" Pancakes".to_string(),
            image: "https://spoonacular.com/recipeImages/1.jpg".to_string(),
            url: "https://example.com/p".to_string(),
            ingredients: vec!["egg".to_string(), "flour".to_string()],
        }];

        let html = recommendations_page(&results).unwrap();
        assert!(html.contains(r#"action="/add_favorite""#));
        assert!(html.contains("Mom's &quot;Best&quot; Pancakes"));
        assert!(html.contains("<li>egg</li><li>flour</li>"));
    }
}
