use axum::{Form, extract::State, response::Html};
use std::sync::Arc;

use crate::models::ContactMessage;
use crate::views::{self, Page};

use super::types::ContactForm;
use super::validation::require_field;
use super::{ApiError, AppState};

pub async fn index() -> Result<Html<String>, ApiError> {
    Ok(Html(views::static_page(Page::Index)?))
}

pub async fn about() -> Result<Html<String>, ApiError> {
    Ok(Html(views::static_page(Page::About)?))
}

pub async fn contact_form() -> Result<Html<String>, ApiError> {
    Ok(Html(views::static_page(Page::Contact)?))
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Result<Html<String>, ApiError> {
    let message = ContactMessage {
        name: require_field("name", form.name)?,
        email: require_field("email", form.email)?,
        message: require_field("message", form.message)?,
    };

    state.contacts().submit(message).await?;

    Ok(Html(views::static_page(Page::ContactSuccess)?))
}
